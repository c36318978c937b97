/// Prefix of every label the proxy reads.
pub const TRAEFIK_LABEL_PREFIX: &str = "traefik";
/// Entry point every route is attached to.
pub const HTTP_ENTRY_POINT: &str = "http";
/// Rule prefix; the service id is appended.
pub const PATH_PREFIX_STRIP: &str = "PathPrefixStrip:/";
/// Global key, rewritten for every port.
pub const TRAEFIK_FRONTEND_RULE: &str = "traefik.frontend.rule";

/// One route per exposed port. Lives only for the duration of a single create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoute {
    pub service_name: String,
    pub port: String,
    ///first segment of the rendered template, not emitted as a label
    pub hostname: String,
    pub service_id: String,
}

impl RenderedRoute {
    ///`port_spec` is "<number>/<protocol>", `hostname_and_port` is the rendered template
    pub fn new(service_name: String, port_spec: &str, hostname_and_port: &str) -> RenderedRoute {
        let port = port_spec.split('/').next().unwrap_or(port_spec).to_string();
        let mut elements = hostname_and_port.split('/');
        let hostname = elements.next().unwrap_or_default().to_string();
        let service_id = elements.next().unwrap_or_default().to_string();
        RenderedRoute {
            service_name,
            port,
            hostname,
            service_id,
        }
    }

    pub fn path_rule(&self) -> String {
        format!("{}{}", PATH_PREFIX_STRIP, self.service_id)
    }

    pub fn port_label(&self) -> String {
        format!("{}.{}.port", TRAEFIK_LABEL_PREFIX, self.service_name)
    }

    pub fn entry_points_label(&self) -> String {
        format!("{}.{}.frontend.entryPoints", TRAEFIK_LABEL_PREFIX, self.service_name)
    }

    pub fn frontend_rule_label(&self) -> String {
        format!("{}.{}.frontend.rule", TRAEFIK_LABEL_PREFIX, self.service_name)
    }

    /// The four labels written for this route, in write order.
    pub fn labels(&self, container_name: &str) -> [(String, String); 4] {
        [
            (self.port_label(), self.port.clone()),
            (self.entry_points_label(), HTTP_ENTRY_POINT.to_string()),
            (self.frontend_rule_label(), self.path_rule()),
            (TRAEFIK_FRONTEND_RULE.to_string(), container_name.to_string()),
        ]
    }
}
