pub mod create_container_handler;
