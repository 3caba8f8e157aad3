mod analytics_context;
pub use analytics_context::*;
