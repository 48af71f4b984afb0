use std::fmt;

use ambit_core::{Instant, TimerHandle};

/// Never reused within a cart, however fast notifications are created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ephemeral message shown to the user. Removes itself when its expiry
/// timer fires, unless dismissed first.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub created_at: Instant,
    pub(crate) expiry: TimerHandle,
}

impl Notification {
    /// Pending auto-removal; cancelled on dismissal.
    pub fn expiry(&self) -> TimerHandle {
        self.expiry
    }
}
