use crate::{
    controllers::rendering_controller::{CustomServerEvaluationStrategy, ServerEvaluationStrategy},
    errors::LabelerError,
};

pub const ENABLED_ENV: &str = "CHE_PLUGIN_TRAEFIK_STRATIO_ENABLED";
///accepted when ENABLED_ENV is unset
pub const ENABLED_ALIAS_ENV: &str = "CHE_PLUGIN_TRAEFIK_ENABLED";
pub const STRATEGY_ENV: &str = "CHE_DOCKER_SERVER__EVALUATION__STRATEGY";
pub const TEMPLATE_ENV: &str = "CHE_DOCKER_SERVER__EVALUATION__STRATEGY_CUSTOM_TEMPLATE";
pub const PROTOCOL_ENV: &str = "CHE_DOCKER_SERVER__EVALUATION__STRATEGY_CUSTOM_EXTERNAL_PROTOCOL";
pub const EXTERNAL_ADDRESS_ENV: &str = "CHE_DOCKER_IP_EXTERNAL";
pub const CHE_PORT_ENV: &str = "CHE_PORT";
pub const VOLUME_DRIVER_ENV: &str = "CHE_PLUGIN_TRAEFIK_VOLUME_DRIVER";

const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_EXTERNAL_ADDRESS: &str = "localhost";
const DEFAULT_CHE_PORT: &str = "8080";

/// Everything the interceptor needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    ///when false the interceptor never touches a create request
    pub enabled: bool,
    pub strategy: ServerEvaluationStrategy,
    ///None falls back to the default template
    pub template: Option<String>,
    pub volume_driver: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            enabled: false,
            strategy: ServerEvaluationStrategy::Default,
            template: None,
            volume_driver: None,
        }
    }
}

impl PluginConfig {
    pub fn from_env() -> Result<PluginConfig, LabelerError> {
        PluginConfig::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<PluginConfig, LabelerError> {
        //empty values count as unset
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let enabled = lookup(ENABLED_ENV)
            .or_else(|| lookup(ENABLED_ALIAS_ENV))
            .map(|value| parse_boolean(&value))
            .unwrap_or(false);
        let strategy = match lookup(STRATEGY_ENV).as_deref() {
            None | Some("default") => ServerEvaluationStrategy::Default,
            Some("docker-local") => ServerEvaluationStrategy::DockerLocal,
            Some("custom") => ServerEvaluationStrategy::Custom(CustomServerEvaluationStrategy {
                external_address: lookup(EXTERNAL_ADDRESS_ENV)
                    .unwrap_or_else(|| DEFAULT_EXTERNAL_ADDRESS.to_string()),
                che_port: lookup(CHE_PORT_ENV).unwrap_or_else(|| DEFAULT_CHE_PORT.to_string()),
                protocol: lookup(PROTOCOL_ENV).unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            }),
            Some(other) => {
                return Err(LabelerError::InvalidConfig(format!(
                    "{} must be one of default, docker-local, custom; got \"{}\"",
                    STRATEGY_ENV, other
                )))
            }
        };
        Ok(PluginConfig {
            enabled,
            strategy,
            template: lookup(TEMPLATE_ENV),
            volume_driver: lookup(VOLUME_DRIVER_ENV),
        })
    }
}

///"true" in any case is true, anything else is false
fn parse_boolean(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
