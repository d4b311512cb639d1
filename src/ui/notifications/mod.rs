// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for problems the reader should know about.
//!
//! Settings or state files that fail to load, pages that cannot be read and
//! rescans that bring in new diagrams surface here instead of blocking the
//! page.
//!
//! - [`notification`] - `Notification` with its severity and i18n key
//! - [`manager`] - queueing and auto-dismiss
//! - [`toast`] - rendering in the bottom-right corner

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
