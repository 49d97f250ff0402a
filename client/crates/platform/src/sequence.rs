//! Request Sequencing
//!
//! Per-operation monotonic tickets. A response may be applied only if its
//! ticket is still the latest one issued for that operation, so the most
//! recently issued request wins regardless of resolution order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed to one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ticket counter for one operation key
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every in-flight ticket without issuing a request
    ///
    /// Used when the context that started the requests is gone; the requests
    /// still run to completion but their results are dropped.
    pub fn abandon(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_abandon_supersedes_in_flight() {
        let seq = RequestSequence::new();
        let ticket = seq.issue();
        seq.abandon();
        assert!(!seq.is_current(ticket));
        assert!(seq.is_current(seq.issue()));
    }
}
