// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Lightbox zoom factor bounds and steps
//! - **Gestures**: Swipe threshold
//! - **Transitions**: Close transition and feedback timings
//! - **Content**: Page watching and rescan timings
//! - **Page**: Scroll helper thresholds

use std::time::Duration;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom factor used when a diagram is first shown.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom change applied by the zoom-in/zoom-out controls.
pub const DEFAULT_ZOOM_STEP: f32 = 0.2;

/// Zoom change applied per mouse wheel tick.
pub const DEFAULT_WHEEL_ZOOM_STEP: f32 = 0.2;

/// Smallest accepted zoom step from the config file.
pub const MIN_ZOOM_STEP: f32 = 0.05;

/// Largest accepted zoom step from the config file.
pub const MAX_ZOOM_STEP: f32 = 1.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Minimum horizontal travel (pixels) for a swipe to navigate.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Delay between closing the lightbox and clearing its content.
pub const DEFAULT_CLOSE_TRANSITION_MS: u64 = 300;

/// How long the copy button shows its "copied" state.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Duration of smooth scroll animations.
pub const SCROLL_ANIMATION: Duration = Duration::from_millis(400);

// ==========================================================================
// Content Defaults
// ==========================================================================

/// Interval between page file fingerprint checks.
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;

/// Quiet period before a content change triggers a rescan.
pub const DEFAULT_RESCAN_DELAY_MS: u64 = 500;

/// Rescans attempted while diagrams are still pending.
pub const DEFAULT_RESCAN_MAX_ATTEMPTS: u32 = 3;

/// Upper bound accepted for the rescan attempt count.
pub const MAX_RESCAN_ATTEMPTS: u32 = 10;

// ==========================================================================
// Page Defaults
// ==========================================================================

/// Scroll offset after which the scroll-to-top button appears.
pub const DEFAULT_SCROLL_TOP_THRESHOLD_PX: f32 = 300.0;

/// Gap kept between the header and an anchor target after scrolling.
pub const DEFAULT_ANCHOR_MARGIN_PX: f32 = 20.0;

/// Window width below which the navigation collapses behind a toggle.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
