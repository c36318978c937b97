use bollard::models::HostConfig;

/// The caller's host config plus the volume driver forced onto it.
/// Every field the caller set is carried over untouched; only `volume_driver` changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeHostConfig {
    pub host_config: HostConfig,
    pub volume_driver: String,
}

impl VolumeHostConfig {
    pub fn new(host_config: Option<&HostConfig>, volume_driver: &str) -> VolumeHostConfig {
        VolumeHostConfig {
            host_config: host_config.cloned().unwrap_or_default(),
            volume_driver: volume_driver.to_string(),
        }
    }
}

impl From<VolumeHostConfig> for HostConfig {
    fn from(value: VolumeHostConfig) -> Self {
        //no rest pattern: a new field must be given a conversion entry here
        let VolumeHostConfig {
            host_config,
            volume_driver,
        } = value;
        HostConfig {
            volume_driver: Some(volume_driver),
            ..host_config
        }
    }
}

/// Rewrites the host config of a create request so its volumes use `volume_driver`.
pub fn with_volume_driver(host_config: Option<&HostConfig>, volume_driver: &str) -> HostConfig {
    VolumeHostConfig::new(host_config, volume_driver).into()
}
