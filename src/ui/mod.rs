// SPDX-License-Identifier: MPL-2.0
//! Reading surface and theme-level interaction glue.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! keeps its own state and message type, and the application maps their
//! events to tasks.
//!
//! # Components
//!
//! - [`navbar`] - Site header, collapsible mobile menu, theme toggle
//! - [`article`] - Page blocks, clickable media, keyboard media focus
//! - [`scroll`] - Scroll-to-top, smooth anchor scrolling, reading progress
//! - [`code_copy`] - Copy buttons on code blocks
//! - [`notifications`] - Toasts for load failures and fallbacks
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Spinner and pan surface
//! - [`styles`] - Buttons, containers, overlays
//! - [`design_tokens`] - Colors, spacing, sizing
//! - [`theming`] - Light/Dark reading themes
//! - [`icons`] - Inline SVG icons

pub mod article;
pub mod code_copy;
pub mod design_tokens;
pub mod icons;
pub mod navbar;
pub mod notifications;
pub mod scroll;
pub mod styles;
pub mod theming;
pub mod widgets;
