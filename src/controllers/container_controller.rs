use bollard::{container::CreateContainerOptions, Docker};

use crate::{
    errors::LabelerError, handlers::create_container_handler::BeforeCreateHook,
    models::container_spec_models::CreateContainerParams,
};

///runs the hook, then hands the (possibly relabeled) request to docker. Returns the docker container id
pub async fn create_container<H: BeforeCreateHook>(
    docker: &Docker,
    hook: &H,
    mut params: CreateContainerParams,
) -> Result<String, LabelerError> {
    hook.before_create(&mut params).await?;

    let options = Some(CreateContainerOptions {
        name: params.container_name.clone(),
        platform: None,
    });
    let create_container_result = docker.create_container(options, params.config).await;
    match create_container_result {
        Ok(res) => {
            for warning in res.warnings.iter() {
                tracing::warn!(container = %params.container_name, "{}", warning);
            }
            Ok(res.id)
        }
        Err(err) => {
            tracing::error!("[ERROR] Docker Create Container Error {}", err);
            Err(LabelerError::ContainerCreation(err.to_string()))
        }
    }
}
