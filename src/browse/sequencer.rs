//! Request sequencing for superseded loads.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets; only the latest is current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    pub fn latest(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}
