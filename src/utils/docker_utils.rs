use std::sync::OnceLock;

use bollard::Docker;

use crate::errors::LabelerError;

pub static DOCKER: OnceLock<Docker> = OnceLock::new();

pub fn connect() -> Result<&'static Docker, LabelerError> {
    if let Some(docker) = DOCKER.get() {
        return Ok(docker);
    }
    match Docker::connect_with_local_defaults() {
        Ok(docker_connection) => Ok(DOCKER.get_or_init(|| docker_connection)),
        Err(err) => {
            tracing::error!("[ERROR] Docker Connection Error {}", err);
            Err(LabelerError::DockerConnection(err.to_string()))
        }
    }
}
