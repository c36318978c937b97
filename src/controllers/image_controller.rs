use bollard::Docker;

use crate::{errors::LabelerError, models::container_spec_models::ImageMetadata};

/// Read-only access to the runtime's "inspect image" query.
pub trait ImageInspector {
    async fn inspect_image(&self, image: &str) -> Result<ImageMetadata, LabelerError>;
}

impl ImageInspector for Docker {
    async fn inspect_image(&self, image: &str) -> Result<ImageMetadata, LabelerError> {
        let inspect_result = Docker::inspect_image(self, image).await;
        match inspect_result {
            Ok(image_inspect) => Ok(ImageMetadata::from(image_inspect)),
            Err(err) => {
                tracing::error!("[ERROR] Docker Inspect Image Error {}: {}", image, err);
                Err(LabelerError::ImageInspection(err.to_string()))
            }
        }
    }
}
