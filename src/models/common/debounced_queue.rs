use crate::runtime::msg::Msg;
use crate::runtime::{Effect, EffectFuture, Env, EnvFutureExt};
use futures::FutureExt;
use std::time::Duration;

/// An item that can be dropped from a batch because a later item of the same
/// group makes it redundant.
pub trait Batched {
    type Key: PartialEq;

    /// Group the item belongs to, items without a group are never suppressed.
    fn batch_key(&self) -> Option<&Self::Key>;
    /// Whether a later item of the same group makes this one redundant.
    fn is_superseded_by(&self, later: &Self) -> bool;
}

/// Accumulate-then-flush buffer with debounce semantics.
///
/// Every [`enqueue`](DebouncedQueue::enqueue) starts a new generation. A flush
/// is only honoured for the latest generation, so a timer armed by an earlier
/// enqueue is implicitly cancelled by the next one.
#[derive(Clone, PartialEq, Debug)]
pub struct DebouncedQueue<T> {
    items: Vec<T>,
    quiet_period: Duration,
    generation: u64,
    destroying: bool,
}

impl<T: Batched + Clone> DebouncedQueue<T> {
    pub fn new(quiet_period: Duration) -> Self {
        DebouncedQueue {
            items: vec![],
            quiet_period,
            generation: 0,
            destroying: false,
        }
    }
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
    pub fn items(&self) -> &[T] {
        &self.items
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn is_destroying(&self) -> bool {
        self.destroying
    }
    /// Appends the item and returns the generation a flush timer has to be
    /// armed for, or `None` once the queue is being torn down.
    pub fn enqueue(&mut self, item: T) -> Option<u64> {
        self.items.push(item);
        if self.destroying {
            return None;
        };
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }
    /// Returns the items to deliver, in enqueue order, without the suppressed ones.
    ///
    /// Stale generations yield nothing. The buffer is reset afterwards unless
    /// the queue is being torn down.
    pub fn flush(&mut self, generation: u64) -> Vec<T> {
        if generation != self.generation || self.items.is_empty() {
            return vec![];
        };
        let items = if self.destroying {
            self.items.to_owned()
        } else {
            std::mem::take(&mut self.items)
        };
        let suppressed = suppressed_indices(&items);
        if !suppressed.is_empty() {
            tracing::debug!(
                "suppressed {} of {} queued items",
                suppressed.len(),
                items.len()
            );
        };
        items
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !suppressed.contains(index))
            .map(|(_, item)| item)
            .collect()
    }
    /// Flushes the latest generation right away, the pending timer then finds
    /// nothing to deliver.
    pub fn drain(&mut self) -> Vec<T> {
        self.flush(self.generation)
    }
    pub fn destroy(&mut self) {
        self.destroying = true;
    }
}

/// Indices of the items made redundant by a later item of the same group.
pub fn suppressed_indices<T: Batched>(items: &[T]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(index, item)| {
            item.batch_key().map_or(false, |key| {
                items[index + 1..].iter().any(|later| {
                    later.batch_key() == Some(key) && item.is_superseded_by(later)
                })
            })
        })
        .map(|(index, _)| index)
        .collect()
}

/// Timer effect resolving to `msg` once `quiet_period` elapsed.
pub fn debounce_effect<E: Env + 'static>(quiet_period: Duration, msg: Msg) -> Effect {
    EffectFuture::Concurrent(
        E::set_timeout(quiet_period)
            .map(move |_| msg)
            .boxed_env(),
    )
    .into()
}
