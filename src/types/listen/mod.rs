mod listen_action;
pub use listen_action::*;
