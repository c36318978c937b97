pub mod container_spec_models;
pub mod host_config_models;
pub mod merged_view_model;
pub mod rendered_route_model;
