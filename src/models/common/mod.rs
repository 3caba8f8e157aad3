mod debounced_queue;
pub use debounced_queue::*;

mod delta_tracker;
pub use delta_tracker::*;

mod eq_update;
pub use eq_update::*;
