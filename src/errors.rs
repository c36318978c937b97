use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelerError {
    ///the runtime could not inspect the image of the container being created
    ImageInspection(String),
    UnknownPlaceholder {
        placeholder: String,
        pattern: String,
    },
    ///a `<` or `>` that does not belong to a placeholder
    MalformedTemplate(String),
    ContainerCreation(String),
    DockerConnection(String),
    InvalidConfig(String),
    InvalidRequest(String),
}

impl Display for LabelerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageInspection(err) => write!(f, "Docker Inspect Image Error: {}", err),
            Self::UnknownPlaceholder {
                placeholder,
                pattern,
            } => write!(
                f,
                "Unknown placeholder <{}> in template \"{}\"",
                placeholder, pattern
            ),
            Self::MalformedTemplate(pattern) => write!(f, "Malformed template \"{}\"", pattern),
            Self::ContainerCreation(err) => write!(f, "Docker Create Container Error: {}", err),
            Self::DockerConnection(err) => write!(f, "Docker Connection Error: {}", err),
            Self::InvalidConfig(err) => write!(f, "Invalid configuration: {}", err),
            Self::InvalidRequest(err) => write!(f, "Invalid create request: {}", err),
        }
    }
}

impl std::error::Error for LabelerError {}
