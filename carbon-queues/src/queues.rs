use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::entry::QueueEntry;
use crate::error::QueueError;

/// Δ independent per-slot FIFOs holding assigned-but-not-yet-dispatched
/// requests (spec §3, §5).
///
/// Generalizes the host's single bounded `RollingWindow` into an array of
/// plain `VecDeque`s, one per slot: there is no eviction-by-age here (a slot
/// holds whatever it holds until drained), but the "push on one end, drain
/// from the front preserving order" shape is the same idiom.
pub struct SlotQueues {
    slots: Vec<VecDeque<QueueEntry>>,
}

impl SlotQueues {
    pub fn new(horizon: u32) -> Self {
        Self {
            slots: (0..horizon).map(|_| VecDeque::new()).collect(),
        }
    }

    pub fn horizon(&self) -> u32 {
        self.slots.len() as u32
    }

    #[instrument(skip(self, entry), fields(request_id = entry.request.id, slot))]
    pub fn enqueue(&mut self, slot: u32, entry: QueueEntry) -> Result<(), QueueError> {
        let queue = self.slots.get_mut(slot as usize).ok_or(QueueError::SlotOutOfRange {
            slot,
            horizon: self.slots.len() as u32,
        })?;
        queue.push_back(entry);
        Ok(())
    }

    /// Atomically empties one slot's queue, preserving FIFO order.
    #[instrument(skip(self))]
    pub fn drain_slot(&mut self, slot: u32) -> Result<Vec<QueueEntry>, QueueError> {
        let queue = self.slots.get_mut(slot as usize).ok_or(QueueError::SlotOutOfRange {
            slot,
            horizon: self.slots.len() as u32,
        })?;
        let drained: VecDeque<QueueEntry> = std::mem::take(queue);
        debug!(slot, count = drained.len(), "slot drained");
        Ok(drained.into_iter().collect())
    }

    /// Non-mutating observability hook: how many entries are waiting at `slot`.
    pub fn size_at(&self, slot: u32) -> Result<usize, QueueError> {
        self.slots
            .get(slot as usize)
            .map(|q| q.len())
            .ok_or(QueueError::SlotOutOfRange {
                slot,
                horizon: self.slots.len() as u32,
            })
    }
}
