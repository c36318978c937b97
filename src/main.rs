extern crate dotenv;

use std::env;

use dotenv::dotenv;
use route_labeler::{
    controllers::container_controller,
    errors::LabelerError,
    handlers::create_container_handler::{BeforeCreateHook, TraefikInterceptor},
    models::container_spec_models::CreateContainerParams,
    utils::{config_utils::PluginConfig, docker_utils},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let request_path = match args.next() {
        Some(path) => path,
        None => {
            return Err(LabelerError::InvalidRequest(
                "usage: route_labeler <request.json> [--dry-run]".to_string(),
            )
            .into())
        }
    };
    let dry_run = args.any(|arg| arg == "--dry-run");

    let config = PluginConfig::from_env()?;
    if config.enabled {
        tracing::info!(
            strategy = config.strategy.as_str(),
            "traefik route labeler loaded"
        );
    }

    let request = tokio::fs::read_to_string(&request_path)
        .await
        .map_err(|err| LabelerError::InvalidRequest(format!("{}: {}", request_path, err)))?;
    let mut params = CreateContainerParams::from_json(&request)?;

    let docker = docker_utils::connect()?;
    let interceptor = TraefikInterceptor::new(docker.clone(), config);

    if dry_run {
        interceptor.before_create(&mut params).await?;
        println!("{}", serde_json::to_string_pretty(&params.config.labels)?);
    } else {
        let container_id = container_controller::create_container(docker, &interceptor, params).await?;
        println!("{}", container_id);
    }
    Ok(())
}
