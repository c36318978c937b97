use std::collections::HashMap;

use crate::{
    controllers::rendering_controller::{RenderingEvaluation, RenderingStrategy, SERVER_NAME_PATTERN},
    errors::LabelerError,
    models::{
        container_spec_models::{ContainerSpec, ImageMetadata},
        merged_view_model::MergedView,
        rendered_route_model::RenderedRoute,
    },
};

///Computes the route labels of every exposed port and writes them into `container.labels`.
///
///Every route is rendered before anything is written, so a rendering failure leaves the labels untouched.
///Existing labels are never removed and image labels are never written back.
///`traefik.frontend.rule` is shared by all ports: the last port in iteration order
///(greatest port string) decides its value, which is always the container name.
pub fn derive_labels<'a, S>(
    container: &'a mut ContainerSpec,
    image: &ImageMetadata,
    strategy: &S,
    template: &str,
) -> Result<&'a HashMap<String, String>, LabelerError>
where
    S: RenderingStrategy + ?Sized,
{
    let merged = MergedView::merge(container, image);
    if merged.exposed_ports.is_empty() {
        return Ok(&container.labels);
    }
    let evaluation = strategy.offline_rendering_evaluation(&merged)?;
    let routes = render_routes(&merged, &evaluation, template)?;

    for route in routes.iter() {
        tracing::debug!(
            container = %container.name,
            service = %route.service_name,
            port = %route.port,
            hostname = %route.hostname,
            "Deriving traefik labels"
        );
        container.labels.extend(route.labels(&container.name));
    }
    Ok(&container.labels)
}

/// One route per merged exposed port, in port order.
pub fn render_routes<E>(
    merged: &MergedView,
    evaluation: &E,
    template: &str,
) -> Result<Vec<RenderedRoute>, LabelerError>
where
    E: RenderingEvaluation + ?Sized,
{
    merged
        .exposed_ports
        .iter()
        .map(|port_value| -> Result<RenderedRoute, LabelerError> {
            let service_name = evaluation.render(SERVER_NAME_PATTERN, port_value)?;
            let hostname_and_port = evaluation.render(template, port_value)?;
            Ok(RenderedRoute::new(service_name, port_value, &hostname_and_port))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::controllers::rendering_controller::{
        render_placeholders, CustomServerEvaluationStrategy, DEFAULT_TEMPLATE,
    };

    use super::*;

    /// Renders `<serverName>` as "<container>-<port number>" and `<final_endpoint_id>` as "svc-<port number>".
    struct StubStrategy {
        container_name: String,
    }

    struct StubEvaluation {
        container_name: String,
        merged: MergedView,
    }

    impl RenderingStrategy for StubStrategy {
        type Evaluation = StubEvaluation;

        fn offline_rendering_evaluation(
            &self,
            merged: &MergedView,
        ) -> Result<StubEvaluation, LabelerError> {
            Ok(StubEvaluation {
                container_name: self.container_name.clone(),
                merged: merged.clone(),
            })
        }
    }

    impl RenderingEvaluation for StubEvaluation {
        fn render(&self, pattern: &str, port: &str) -> Result<String, LabelerError> {
            let number = port.split('/').next().unwrap_or(port);
            let server_name = format!("{}-{}", self.container_name, number);
            let endpoint_id = format!("svc-{}", number);
            let label = self.merged.labels.get("k").cloned().unwrap_or_default();
            render_placeholders(pattern, |placeholder| match placeholder {
                "serverName" => Some(server_name.as_str()),
                "final_endpoint_id" => Some(endpoint_id.as_str()),
                "k" => Some(label.as_str()),
                _ => None,
            })
        }
    }

    struct FailingStrategy;

    impl RenderingStrategy for FailingStrategy {
        type Evaluation = StubEvaluation;

        fn offline_rendering_evaluation(
            &self,
            _merged: &MergedView,
        ) -> Result<StubEvaluation, LabelerError> {
            Err(LabelerError::MalformedTemplate("unavailable".to_string()))
        }
    }

    fn ports(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn web1() -> ContainerSpec {
        ContainerSpec {
            image: "nginx".to_string(),
            name: "web1".to_string(),
            labels: HashMap::from([("k".to_string(), "v1".to_string())]),
            exposed_ports: ports(&["80/tcp", "443/tcp"]),
            env: vec![],
        }
    }

    fn stub() -> StubStrategy {
        StubStrategy {
            container_name: "web1".to_string(),
        }
    }

    #[test]
    fn no_exposed_ports_is_a_no_op() {
        let mut container = ContainerSpec {
            labels: HashMap::from([("a".to_string(), "b".to_string())]),
            ..Default::default()
        };
        let before = container.labels.clone();
        let labels =
            derive_labels(&mut container, &ImageMetadata::default(), &FailingStrategy, "x").unwrap();
        assert_eq!(labels, &before);
    }

    #[test]
    fn derives_labels_for_every_port() {
        let mut container = web1();
        let labels = derive_labels(
            &mut container,
            &ImageMetadata::default(),
            &stub(),
            "example.com/<final_endpoint_id>",
        )
        .unwrap();

        let get = |key: &str| labels.get(key).map(String::as_str);
        assert_eq!(get("traefik.service-web1-80.port"), Some("80"));
        assert_eq!(get("traefik.service-web1-80.frontend.entryPoints"), Some("http"));
        assert_eq!(
            get("traefik.service-web1-80.frontend.rule"),
            Some("PathPrefixStrip:/svc-80")
        );
        assert_eq!(get("traefik.service-web1-443.port"), Some("443"));
        assert_eq!(
            get("traefik.service-web1-443.frontend.rule"),
            Some("PathPrefixStrip:/svc-443")
        );
        assert_eq!(get("traefik.frontend.rule"), Some("web1"));
        //3 per port + the shared frontend rule + the original label
        assert_eq!(labels.len(), 3 * 2 + 1 + 1);
    }

    #[test]
    fn shared_frontend_rule_is_last_write_wins() {
        let mut container = web1();
        container
            .labels
            .insert("traefik.frontend.rule".to_string(), "stale".to_string());
        let labels = derive_labels(&mut container, &ImageMetadata::default(), &stub(), "h/x").unwrap();
        assert_eq!(
            labels.get("traefik.frontend.rule").map(String::as_str),
            Some("web1")
        );
        //"80/tcp" sorts after "443/tcp" and is therefore processed last
        let merged = MergedView::merge(&web1(), &ImageMetadata::default());
        assert_eq!(merged.exposed_ports.iter().last().map(String::as_str), Some("80/tcp"));
    }

    #[test]
    fn image_labels_are_used_for_rendering_but_not_written_back() {
        let mut container = web1();
        let image = ImageMetadata {
            labels: Some(HashMap::from([("k".to_string(), "v2".to_string())])),
            ..Default::default()
        };
        let labels = derive_labels(&mut container, &image, &stub(), "h/<k>").unwrap();
        assert_eq!(labels.get("k").map(String::as_str), Some("v1"));
        assert_eq!(
            labels
                .get("traefik.service-web1-80.frontend.rule")
                .map(String::as_str),
            Some("PathPrefixStrip:/v2")
        );
    }

    #[test]
    fn image_ports_get_routes_too() {
        let mut container = ContainerSpec {
            name: "c".to_string(),
            exposed_ports: ports(&["80/tcp"]),
            ..Default::default()
        };
        let image = ImageMetadata {
            exposed_ports: ports(&["80/tcp", "9000/tcp"]),
            ..Default::default()
        };
        let strategy = StubStrategy {
            container_name: "c".to_string(),
        };
        let labels = derive_labels(&mut container, &image, &strategy, "h").unwrap();
        assert_eq!(labels.get("traefik.service-c-9000.port").map(String::as_str), Some("9000"));
        assert_eq!(
            labels.get("traefik.service-c-9000.frontend.rule").map(String::as_str),
            Some("PathPrefixStrip:/")
        );
        assert_eq!(labels.len(), 3 * 2 + 1);
    }

    #[test]
    fn rendering_failure_writes_nothing() {
        let mut container = web1();
        let before = container.labels.clone();
        let result = derive_labels(&mut container, &ImageMetadata::default(), &stub(), "<unknown>");
        assert!(matches!(result, Err(LabelerError::UnknownPlaceholder { .. })));
        assert_eq!(container.labels, before);
    }

    #[test]
    fn unavailable_strategy_propagates() {
        let mut container = web1();
        let result = derive_labels(&mut container, &ImageMetadata::default(), &FailingStrategy, "x");
        assert!(result.is_err());
        assert_eq!(container.labels.len(), 1);
    }

    #[test]
    fn rerunning_overwrites_the_same_keys() {
        let mut container = web1();
        derive_labels(&mut container, &ImageMetadata::default(), &stub(), "h/x").unwrap();
        let first = container.labels.clone();
        derive_labels(&mut container, &ImageMetadata::default(), &stub(), "h/x").unwrap();
        assert_eq!(container.labels, first);
    }

    #[test]
    fn works_with_the_builtin_strategy() {
        let strategy = CustomServerEvaluationStrategy {
            external_address: "che.local".to_string(),
            che_port: "8080".to_string(),
            protocol: "http".to_string(),
        };
        let mut container = ContainerSpec {
            name: "workspace1_dev".to_string(),
            labels: HashMap::from([(
                "org.eclipse.che.server.4401/tcp.ref".to_string(),
                "wsagent".to_string(),
            )]),
            exposed_ports: ports(&["4401/tcp"]),
            env: vec!["CHE_MACHINE_NAME=dev".to_string()],
            ..Default::default()
        };
        let labels =
            derive_labels(&mut container, &ImageMetadata::default(), &strategy, DEFAULT_TEMPLATE)
                .unwrap();
        assert_eq!(labels.get("traefik.service-wsagent.port").map(String::as_str), Some("4401"));
        assert_eq!(
            labels.get("traefik.service-wsagent.frontend.rule").map(String::as_str),
            Some("PathPrefixStrip:/wsagent-dev")
        );
        assert_eq!(
            labels.get("traefik.frontend.rule").map(String::as_str),
            Some("workspace1_dev")
        );
    }
}
