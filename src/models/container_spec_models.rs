use std::collections::{BTreeSet, HashMap};

use bollard::{container::Config, models::ImageInspect};
use serde::{Deserialize, Serialize};

use crate::errors::LabelerError;

/// The create request as handed to the runtime: the container name plus its config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateContainerParams {
    pub container_name: String,
    pub config: Config<String>,
}

impl CreateContainerParams {
    pub fn from_json(json: &str) -> Result<CreateContainerParams, LabelerError> {
        serde_json::from_str(json).map_err(|err| LabelerError::InvalidRequest(err.to_string()))
    }
}

/// The parts of a container config the route labels are derived from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSpec {
    pub image: String,
    pub name: String,
    pub labels: HashMap<String, String>,
    ///"<number>/<protocol>" e.g. "8080/tcp"
    pub exposed_ports: BTreeSet<String>,
    ///"NAME=value"
    pub env: Vec<String>,
}

/// Read-only view of the image's own config. Images without labels keep `labels` as None.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMetadata {
    pub labels: Option<HashMap<String, String>>,
    pub exposed_ports: BTreeSet<String>,
    pub env: Vec<String>,
}

impl ContainerSpec {
    pub fn from_params(params: &CreateContainerParams) -> ContainerSpec {
        let config = &params.config;
        ContainerSpec {
            image: config.image.clone().unwrap_or_default(),
            name: params.container_name.clone(),
            labels: config.labels.clone().unwrap_or_default(),
            exposed_ports: config
                .exposed_ports
                .as_ref()
                .map(|ports| ports.keys().cloned().collect())
                .unwrap_or_default(),
            env: config.env.clone().unwrap_or_default(),
        }
    }

    ///only the labels are written back, everything else on the config is left as the caller built it
    pub fn write_labels_to(self, params: &mut CreateContainerParams) {
        if self.labels.is_empty() && params.config.labels.is_none() {
            return;
        }
        params.config.labels = Some(self.labels);
    }
}

impl From<ImageInspect> for ImageMetadata {
    fn from(image_inspect: ImageInspect) -> Self {
        match image_inspect.config {
            Some(config) => ImageMetadata {
                labels: config.labels,
                exposed_ports: config
                    .exposed_ports
                    .map(|ports| ports.into_keys().collect())
                    .unwrap_or_default(),
                env: config.env.unwrap_or_default(),
            },
            None => ImageMetadata::default(),
        }
    }
}
