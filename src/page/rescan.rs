// SPDX-License-Identifier: MPL-2.0
//! Debounced re-resolution of page content.
//!
//! Diagrams are often turned into SVG by a renderer some time after the page
//! is written, so the media sequence has to be rebuilt once the content
//! settles. The scheduler knows nothing about files or widgets: callers
//! report content-change notifications and rescan outcomes, and get back
//! tickets to redeem after [`RescanScheduler::delay`].
//!
//! Every ticket carries a generation. Issuing a new ticket makes all earlier
//! ones stale, so only the latest notification leads to a rescan.

use crate::config::RescanTuning;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescanTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct RescanScheduler {
    delay: Duration,
    max_attempts: u32,
    generation: u64,
    attempts: u32,
}

impl RescanScheduler {
    #[must_use]
    pub fn new(tuning: &RescanTuning) -> Self {
        Self {
            delay: tuning.delay,
            max_attempts: tuning.max_attempts,
            generation: 0,
            attempts: 0,
        }
    }

    /// Quiet period to wait before redeeming a ticket.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Content changed: supersede any pending ticket and start a new
    /// retry budget.
    pub fn notify(&mut self) -> RescanTicket {
        self.attempts = 0;
        self.issue()
    }

    /// Redeems a ticket whose delay elapsed. Returns `true` when the caller
    /// should rescan now.
    pub fn fire(&mut self, ticket: RescanTicket) -> bool {
        let current = ticket.generation == self.generation;
        if !current {
            tracing::trace!(
                ticket = ticket.generation,
                current = self.generation,
                "stale rescan ticket ignored"
            );
        }
        current
    }

    /// Reports a finished rescan (or initial load). When content is still
    /// pending and retries remain, returns the ticket for the next attempt.
    pub fn after_rescan(&mut self, still_pending: bool) -> Option<RescanTicket> {
        if !still_pending {
            self.attempts = 0;
            return None;
        }
        if self.attempts >= self.max_attempts {
            tracing::debug!(attempts = self.attempts, "giving up waiting for diagrams");
            return None;
        }
        self.attempts += 1;
        Some(self.issue())
    }

    fn issue(&mut self) -> RescanTicket {
        self.generation = self.generation.wrapping_add(1);
        RescanTicket {
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(max_attempts: u32) -> RescanScheduler {
        RescanScheduler::new(&RescanTuning {
            watch_interval: Duration::from_secs(1),
            delay: Duration::from_millis(500),
            max_attempts,
        })
    }

    #[test]
    fn newer_notification_supersedes_older_ticket() {
        let mut scheduler = scheduler(3);
        let first = scheduler.notify();
        let second = scheduler.notify();

        assert!(!scheduler.fire(first));
        assert!(scheduler.fire(second));
    }

    #[test]
    fn retries_stop_after_the_bound() {
        let mut scheduler = scheduler(3);
        scheduler.notify();

        let mut retries = 0;
        while let Some(ticket) = scheduler.after_rescan(true) {
            assert!(scheduler.fire(ticket));
            retries += 1;
        }
        assert_eq!(retries, 3);
        assert_eq!(scheduler.after_rescan(true), None);
    }

    #[test]
    fn settled_content_resets_the_budget() {
        let mut scheduler = scheduler(2);
        assert!(scheduler.after_rescan(true).is_some());
        assert_eq!(scheduler.attempts(), 1);

        assert_eq!(scheduler.after_rescan(false), None);
        assert_eq!(scheduler.attempts(), 0);
    }

    #[test]
    fn notification_restarts_retries() {
        let mut scheduler = scheduler(1);
        assert!(scheduler.after_rescan(true).is_some());
        assert!(scheduler.after_rescan(true).is_none());

        scheduler.notify();
        assert!(scheduler.after_rescan(true).is_some());
    }

    #[test]
    fn retry_ticket_invalidates_pending_notification() {
        let mut scheduler = scheduler(3);
        let notified = scheduler.notify();
        let retry = scheduler.after_rescan(true).expect("retry available");

        assert!(!scheduler.fire(notified));
        assert!(scheduler.fire(retry));
        assert_eq!(scheduler.delay(), Duration::from_millis(500));
    }
}
