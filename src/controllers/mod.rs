pub mod container_controller;
pub mod image_controller;
pub mod label_controller;
pub mod rendering_controller;
