use crate::types::listen::ListenAction;
use crate::types::tracking::TrackedEvent;
use serde_json::{Map, Value};

//
// Those messages are meant to be dispatched and handled only inside this crate
//
#[derive(Debug)]
pub enum Internal {
    /// Quiet period of the listen action queue elapsed for the given generation.
    ListenQueueElapsed(u64),
    /// Quiet period of the data layer queue elapsed for the given generation.
    TrackingQueueElapsed(u64),
    /// A listen action left the queue and has to be reported.
    ListenActionFlushed(ListenAction),
    /// A tracking push left the queue and has to be delivered.
    TrackedEventFlushed(TrackedEvent),
    /// Item view deferred until the current dispatch finished.
    ItemViewDeferred(Map<String, Value>),
    PlayerPing,
}
