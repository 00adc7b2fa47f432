//! Hook for telling a content-addressed record store about declared triads.
//!
//! Notifications are fire-and-forget: nothing is returned, and whatever the
//! store does with them has no bearing on whether a compile succeeds.

use log::debug;

/// Stages call `notify` synchronously, in the middle of a compile. An
/// implementation must return promptly and must not panic; anything slow
/// (I/O, hashing, network) belongs on a queue or thread it hands off to.
pub trait StoreNotifier: Send + Sync {
    fn notify(&self, id: &[u8], payload: &[u8]);
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl StoreNotifier for NoopNotifier {
    fn notify(&self, _id: &[u8], _payload: &[u8]) {}
}

/// Writes each notification to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl StoreNotifier for LogNotifier {
    fn notify(&self, id: &[u8], payload: &[u8]) {
        debug!(
            "store notify {} ({} bytes): {}",
            String::from_utf8_lossy(id),
            payload.len(),
            String::from_utf8_lossy(payload)
        );
    }
}

impl<F> StoreNotifier for F
where
    F: Fn(&[u8], &[u8]) + Send + Sync,
{
    fn notify(&self, id: &[u8], payload: &[u8]) {
        self(id, payload)
    }
}

/// Record id of a triad as seen by one compiler stage.
pub fn triad_id(stage: &str, name: &str) -> Vec<u8> {
    format!("{}_triad_id_{}", stage, name).into_bytes()
}
