mod play_context;
pub use play_context::*;

mod sound;
pub use sound::*;
