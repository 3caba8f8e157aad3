pub mod config;
pub mod listen;
pub mod metrics;
pub mod pipeline;
pub mod sound;
pub mod tracking;
