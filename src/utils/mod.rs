pub mod config_utils;
pub mod docker_utils;
