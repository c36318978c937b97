use crate::{
    controllers::{
        image_controller::ImageInspector, label_controller::derive_labels,
        rendering_controller::{ServerEvaluationStrategy, DEFAULT_TEMPLATE},
    },
    errors::LabelerError,
    models::{
        container_spec_models::{ContainerSpec, CreateContainerParams},
        host_config_models::with_volume_driver,
    },
    utils::config_utils::PluginConfig,
};

/// Called with the create request right before the runtime creates the container.
/// An error aborts the create.
pub trait BeforeCreateHook {
    async fn before_create(&self, params: &mut CreateContainerParams) -> Result<(), LabelerError>;
}

/// Adds traefik route labels to every container created while the custom
/// server evaluation strategy is active.
pub struct TraefikInterceptor<I: ImageInspector> {
    inspector: I,
    config: PluginConfig,
}

impl<I: ImageInspector> TraefikInterceptor<I> {
    pub fn new(inspector: I, config: PluginConfig) -> TraefikInterceptor<I> {
        TraefikInterceptor { inspector, config }
    }

    pub fn template(&self) -> &str {
        self.config.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}

impl<I: ImageInspector> BeforeCreateHook for TraefikInterceptor<I> {
    async fn before_create(&self, params: &mut CreateContainerParams) -> Result<(), LabelerError> {
        if !self.config.enabled {
            return Ok(());
        }
        let ServerEvaluationStrategy::Custom(strategy) = &self.config.strategy else {
            tracing::debug!(
                strategy = self.config.strategy.as_str(),
                "Custom server evaluation strategy not active, skipping"
            );
            return Ok(());
        };

        let mut container = ContainerSpec::from_params(params);
        let image = self.inspector.inspect_image(&container.image).await?;
        derive_labels(&mut container, &image, strategy, self.template())?;
        tracing::info!(
            container = %container.name,
            image = %container.image,
            labels = container.labels.len(),
            "Traefik labels derived"
        );
        container.write_labels_to(params);

        if let Some(volume_driver) = &self.config.volume_driver {
            let host_config = with_volume_driver(params.config.host_config.as_ref(), volume_driver);
            params.config.host_config = Some(host_config);
        }
        Ok(())
    }
}
