use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;

use crate::{errors::LabelerError, models::merged_view_model::MergedView};

pub const SERVER_NAME_PATTERN: &str = "service-<serverName>";
pub const DEFAULT_TEMPLATE: &str = "<externalAddress>/<final_endpoint_id>";

const SERVER_REF_LABEL_PREFIX: &str = "org.eclipse.che.server.";
const SERVER_REF_LABEL_SUFFIX: &str = ".ref";
const WORKSPACE_ID_ENV: &str = "CHE_WORKSPACE_ID";
const MACHINE_NAME_ENV: &str = "CHE_MACHINE_NAME";
const IS_DEV_MACHINE_ENV: &str = "CHE_IS_DEV_MACHINE";

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"<([A-Za-z_][A-Za-z0-9_]*)>").expect("placeholder regex is valid")
    })
}

/// Expands a pattern for one exposed port ("8080/tcp").
pub trait RenderingEvaluation {
    fn render(&self, pattern: &str, port: &str) -> Result<String, LabelerError>;
}

/// Builds a rendering evaluation out of the merged container and image declarations
/// without needing a running container.
pub trait RenderingStrategy {
    type Evaluation: RenderingEvaluation;

    fn offline_rendering_evaluation(
        &self,
        merged: &MergedView,
    ) -> Result<Self::Evaluation, LabelerError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvaluationStrategy {
    Default,
    DockerLocal,
    Custom(CustomServerEvaluationStrategy),
}

impl ServerEvaluationStrategy {
    pub fn as_str(&self) -> &str {
        match *self {
            Self::Default => "default",
            Self::DockerLocal => "docker-local",
            Self::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomServerEvaluationStrategy {
    pub external_address: String,
    pub che_port: String,
    pub protocol: String,
}

impl RenderingStrategy for CustomServerEvaluationStrategy {
    type Evaluation = OfflineRenderingEvaluation;

    fn offline_rendering_evaluation(
        &self,
        merged: &MergedView,
    ) -> Result<OfflineRenderingEvaluation, LabelerError> {
        let env = env_map(&merged.env);
        let env_value = |name: &str| env.get(name).copied().unwrap_or_default().to_string();

        let workspace_id = env_value(WORKSPACE_ID_ENV);
        let workspace_id_without_prefix = workspace_id
            .strip_prefix("workspace")
            .unwrap_or(&workspace_id)
            .to_string();
        let is_dev_machine = match env.get(IS_DEV_MACHINE_ENV) {
            Some(value) => value.to_string(),
            None => "false".to_string(),
        };

        let mut global_properties = HashMap::new();
        global_properties.insert("workspaceId".to_string(), workspace_id);
        global_properties.insert(
            "workspaceIdWithoutPrefix".to_string(),
            workspace_id_without_prefix,
        );
        global_properties.insert("machineName".to_string(), env_value(MACHINE_NAME_ENV));
        global_properties.insert("isDevMachine".to_string(), is_dev_machine);
        global_properties.insert("externalAddress".to_string(), self.external_address.clone());
        global_properties.insert("chePort".to_string(), self.che_port.clone());
        global_properties.insert("protocol".to_string(), self.protocol.clone());
        global_properties.insert(
            "wildcardNipDomain".to_string(),
            format!("{}.nip.io", self.external_address),
        );
        global_properties.insert(
            "wildcardXipDomain".to_string(),
            format!("{}.xip.io", self.external_address),
        );

        let ports_to_ref_name = merged
            .labels
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(SERVER_REF_LABEL_PREFIX)
                    .and_then(|rest| rest.strip_suffix(SERVER_REF_LABEL_SUFFIX))
                    .filter(|_| !value.is_empty())
                    .map(|port| (port.to_string(), value.clone()))
            })
            .collect();

        Ok(OfflineRenderingEvaluation {
            global_properties,
            ports_to_ref_name,
        })
    }
}

///first occurrence of a name wins, so container env shadows image env
fn env_map(env: &[String]) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for entry in env {
        if let Some((name, value)) = entry.split_once('=') {
            map.entry(name).or_insert(value);
        }
    }
    map
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfflineRenderingEvaluation {
    global_properties: HashMap<String, String>,
    ///"8080/tcp" -> ref name declared through labels
    ports_to_ref_name: HashMap<String, String>,
}

impl OfflineRenderingEvaluation {
    pub fn server_name(&self, port: &str) -> String {
        match self.ports_to_ref_name.get(port) {
            Some(ref_name) => ref_name.clone(),
            None => format!("server-{}", port.replace('/', "-")),
        }
    }

    fn final_endpoint_id(&self, server_name: &str) -> String {
        let global = |key: &str| {
            self.global_properties
                .get(key)
                .map(String::as_str)
                .unwrap_or_default()
        };
        [
            server_name,
            global("machineName"),
            global("workspaceIdWithoutPrefix"),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
        .to_lowercase()
    }
}

impl RenderingEvaluation for OfflineRenderingEvaluation {
    fn render(&self, pattern: &str, port: &str) -> Result<String, LabelerError> {
        let server_name = self.server_name(port);
        let port_number = port.split('/').next().unwrap_or(port).to_string();
        let final_endpoint_id = self.final_endpoint_id(&server_name);
        render_placeholders(pattern, |placeholder| match placeholder {
            "serverName" => Some(server_name.as_str()),
            "port" => Some(port_number.as_str()),
            "final_endpoint_id" => Some(final_endpoint_id.as_str()),
            other => self.global_properties.get(other).map(String::as_str),
        })
    }
}

/// Substitutes every `<name>` in `pattern` with `lookup(name)`.
///
/// Only plain `<name>` substitution is supported. Conditionals such as
/// `<if(isDevMachine)>...<endif>` are rejected as malformed or unknown placeholders.
pub fn render_placeholders<'a>(
    pattern: &str,
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Result<String, LabelerError> {
    let mut rendered = String::with_capacity(pattern.len());
    let mut last_end = 0;
    for captures in placeholder_regex().captures_iter(pattern) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_literal(&mut rendered, &pattern[last_end..whole.start()], pattern)?;
        match lookup(name.as_str()) {
            Some(value) => rendered.push_str(value),
            None => {
                return Err(LabelerError::UnknownPlaceholder {
                    placeholder: name.as_str().to_string(),
                    pattern: pattern.to_string(),
                })
            }
        }
        last_end = whole.end();
    }
    push_literal(&mut rendered, &pattern[last_end..], pattern)?;
    Ok(rendered)
}

fn push_literal(rendered: &mut String, literal: &str, pattern: &str) -> Result<(), LabelerError> {
    if literal.contains('<') || literal.contains('>') {
        return Err(LabelerError::MalformedTemplate(pattern.to_string()));
    }
    rendered.push_str(literal);
    Ok(())
}
