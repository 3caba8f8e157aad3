mod metrics_event;
pub use metrics_event::*;
