//! Notification gateway contract
//!
//! Narrow capability interface over the OS notification subsystem, so the
//! dispatcher stays testable without one. Implementations own permission
//! handling and actual delivery; this core only submits requests and asks
//! whether the application is currently foregrounded.

use super::event::NotificationEvent;
use anyhow::Result;

/// Gateway to the system notification subsystem
pub trait NotificationGateway: Send + Sync {
    /// Whether the application is currently in the foreground
    fn is_foregrounded(&self) -> bool;

    /// Submit a notification for immediate delivery (no trigger delay)
    fn submit(&self, event: &NotificationEvent) -> Result<()>;
}
