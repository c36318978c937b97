use std::collections::{BTreeSet, HashMap};

use super::container_spec_models::{ContainerSpec, ImageMetadata};

/// Scratch union of the container and image declarations, only used as rendering input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedView {
    ///image labels overwrite container labels with the same key
    pub labels: HashMap<String, String>,
    pub exposed_ports: BTreeSet<String>,
    ///container env first, then image env, duplicates kept
    pub env: Vec<String>,
}

impl MergedView {
    pub fn merge(container: &ContainerSpec, image: &ImageMetadata) -> MergedView {
        let mut labels = container.labels.clone();
        if let Some(image_labels) = &image.labels {
            labels.extend(
                image_labels
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        let exposed_ports = container
            .exposed_ports
            .union(&image.exposed_ports)
            .cloned()
            .collect();
        let env = container
            .env
            .iter()
            .chain(image.env.iter())
            .cloned()
            .collect();
        MergedView {
            labels,
            exposed_ports,
            env,
        }
    }
}
