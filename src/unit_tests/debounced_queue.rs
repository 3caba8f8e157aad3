use crate::models::common::{suppressed_indices, DebouncedQueue};
use crate::types::listen::{ListenAction, ListenActionType};
use crate::types::sound::SoundId;
use serde_json::Map;
use std::time::Duration;

fn action(sound_id: &str, action_type: ListenActionType) -> ListenAction {
    ListenAction {
        sound_id: SoundId::from(sound_id),
        action_type,
        payload: Map::new(),
    }
}

fn summary(actions: &[ListenAction]) -> Vec<(String, ListenActionType)> {
    actions
        .iter()
        .map(|action| (action.sound_id.0.to_owned(), action.action_type))
        .collect()
}

#[test]
fn pause_followed_by_finish_of_same_sound_is_suppressed() {
    let mut queue = DebouncedQueue::new(Duration::from_millis(100));
    queue.enqueue(action("a", ListenActionType::Start));
    queue.enqueue(action("a", ListenActionType::Pause));
    queue.enqueue(action("b", ListenActionType::Pause));
    let generation = queue
        .enqueue(action("a", ListenActionType::Finish))
        .expect("queue is not destroyed");
    assert_eq!(
        summary(&queue.flush(generation)),
        vec![
            ("a".to_owned(), ListenActionType::Start),
            ("b".to_owned(), ListenActionType::Pause),
            ("a".to_owned(), ListenActionType::Finish),
        ],
        "pause of a is dropped, pause of b is delivered"
    );
    assert!(queue.is_empty(), "buffer is reset after flush");
}

#[test]
fn pause_and_finish_in_different_batches_are_both_delivered() {
    let mut queue = DebouncedQueue::new(Duration::from_millis(100));
    let generation = queue.enqueue(action("a", ListenActionType::Pause)).unwrap();
    assert_eq!(queue.flush(generation).len(), 1);
    let generation = queue.enqueue(action("a", ListenActionType::Finish)).unwrap();
    assert_eq!(
        summary(&queue.flush(generation)),
        vec![("a".to_owned(), ListenActionType::Finish)]
    );
}

#[test]
fn finish_before_pause_does_not_suppress() {
    let items = vec![
        action("a", ListenActionType::Finish),
        action("a", ListenActionType::Pause),
        action("a", ListenActionType::Pause),
    ];
    assert!(suppressed_indices(&items).is_empty());
}

#[test]
fn stale_generation_flushes_nothing() {
    let mut queue = DebouncedQueue::new(Duration::from_millis(100));
    let first = queue.enqueue(action("a", ListenActionType::Start)).unwrap();
    let second = queue.enqueue(action("a", ListenActionType::Position)).unwrap();
    assert!(queue.flush(first).is_empty(), "superseded timer is ignored");
    assert_eq!(queue.items().len(), 2);
    assert_eq!(queue.flush(second).len(), 2, "all items coalesce into one flush");
    assert!(queue.flush(second).is_empty(), "empty queue flushes nothing");
}

#[test]
fn drain_delivers_latest_generation_right_away() {
    let mut queue = DebouncedQueue::new(Duration::from_millis(100));
    queue.enqueue(action("a", ListenActionType::Start));
    queue.enqueue(action("a", ListenActionType::Pause));
    let generation = queue.enqueue(action("a", ListenActionType::Finish)).unwrap();
    assert_eq!(
        summary(&queue.drain()),
        vec![
            ("a".to_owned(), ListenActionType::Start),
            ("a".to_owned(), ListenActionType::Finish),
        ]
    );
    assert!(queue.is_empty());
    assert!(queue.flush(generation).is_empty(), "pending timer finds nothing");
}

#[test]
fn destroying_queue_keeps_buffer_and_stops_scheduling() {
    let mut queue = DebouncedQueue::new(Duration::from_millis(100));
    let generation = queue.enqueue(action("a", ListenActionType::Start)).unwrap();
    queue.destroy();
    assert!(queue.is_destroying());
    assert_eq!(queue.flush(generation).len(), 1);
    assert_eq!(queue.items().len(), 1, "buffer is not reset while destroying");
    assert_eq!(
        queue.enqueue(action("a", ListenActionType::Pause)),
        None,
        "no flush is scheduled after destroy"
    );
}
