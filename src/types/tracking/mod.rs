mod failure;
pub use failure::*;

mod playback_state;
pub use playback_state::*;

mod tracked_event;
pub use tracked_event::*;
