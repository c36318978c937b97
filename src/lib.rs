//! Derives traefik routing labels for containers right before they are created.
//!
//! Labels and exposed ports declared on the container and on its image are merged,
//! every exposed port is rendered through the server evaluation template, and the
//! resulting `traefik.*` labels are written onto the create request.
pub mod controllers;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;
