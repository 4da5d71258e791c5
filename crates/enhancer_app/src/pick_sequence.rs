//! Orders asynchronous file reads so only the newest pick reaches the
//! controller.

use std::cell::Cell;

/// Hands out a ticket per file-picker change; a finished read is delivered
/// only while its ticket is still the latest one.
#[derive(Debug, Default)]
pub struct PickSequence {
    latest: Cell<u64>,
}

impl PickSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new picker change and returns its ticket.
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}
