pub mod common;
pub mod ctx;

pub mod analytics_model;
pub mod data_layer;
pub mod data_pipeline;
pub mod listen_analytics;
pub mod player_tracking;
