//! Correlation of the different sentence types a receiver emits together once
//! per reporting cycle.
//!
//! The cache does not know any cycle up front. It records complete messages
//! until a type id shows up a second time, takes the recorded order as the
//! cycle, and from then on groups messages that follow that order. A message
//! that breaks the order throws the partial group away; one that is not part
//! of the cycle at all restarts learning.

use tracing::trace;

use crate::Message;

/// Upper bound on the number of distinct types recorded while learning.
const MAX_CYCLE_LEN: usize = 32;

/// Result of routing one message through a [`MultiPartCycleCache`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleOutcome {
    /// The message belongs to a learned cycle of more than one type.
    pub in_cycle: bool,
    /// Every message of the cycle, in order, when this message completed it.
    pub completed: Option<Vec<Message>>,
}

#[derive(Debug, Clone, Default)]
pub struct MultiPartCycleCache {
    cycle: Vec<String>,
    current: Vec<Message>,
}

impl MultiPartCycleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one complete message through the cache.
    pub fn push(&mut self, message: &Message) -> CycleOutcome {
        let type_id = message.type_id();

        if self.cycle.is_empty() {
            if !self.current.iter().any(|seen| seen.type_id() == type_id) {
                if self.current.len() >= MAX_CYCLE_LEN {
                    trace!(
                        len = self.current.len(),
                        "no repeating type, restarting cycle learning"
                    );
                    self.current.clear();
                }
                self.current.push(message.clone());
                return CycleOutcome::default();
            }

            self.cycle = self
                .current
                .drain(..)
                .map(|seen| seen.type_id().to_string())
                .collect();
            trace!(cycle = ?self.cycle, "learned reporting cycle");
        }

        let slot = self.current.len();
        if self.cycle.get(slot).is_some_and(|expected| expected == type_id) {
            self.current.push(message.clone());
        } else if self.cycle.first().is_some_and(|expected| expected == type_id) {
            trace!(type_id, dropped = slot, "cycle restarted before completion");
            self.current.clear();
            self.current.push(message.clone());
        } else {
            trace!(type_id, cycle = ?self.cycle, "message outside learned cycle, relearning");
            self.cycle.clear();
            self.current.clear();
            self.current.push(message.clone());
            return CycleOutcome::default();
        }

        let in_cycle = self.cycle.len() > 1;
        let completed = (self.current.len() == self.cycle.len())
            .then(|| std::mem::take(&mut self.current))
            .filter(|_| in_cycle);

        CycleOutcome {
            in_cycle,
            completed,
        }
    }

    /// Learned type order, empty while still learning.
    pub fn cycle(&self) -> &[String] {
        &self.cycle
    }

    pub fn is_learned(&self) -> bool {
        !self.cycle.is_empty()
    }

    /// Messages of the group in progress.
    pub fn pending(&self) -> &[Message] {
        &self.current
    }

    pub fn clear(&mut self) {
        self.cycle.clear();
        self.current.clear();
    }
}
