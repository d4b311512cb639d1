// SPDX-License-Identifier: MPL-2.0
//! Media lightbox: enlarged viewing of article images and diagrams.
//!
//! The lightbox walks the page's [`MediaSequence`](crate::media::MediaSequence)
//! (images first, then diagrams). Images are decoded asynchronously behind a
//! loading state; diagrams open at once and can be zoomed and panned.
//!
//! - [`component`] - state machine, input handling and effects
//! - [`subcomponents`] - navigation, zoom, pan, gestures, loading, focus
//! - [`bindings`] - which page media are wired to the lightbox
//! - [`layout`] - content box and diagram geometry
//! - [`view`] - overlay rendering

pub mod bindings;
pub mod component;
pub mod layout;
pub mod subcomponents;
pub mod view;

pub use bindings::{BindOutcome, Bindings};
pub use component::{CleanupToken, Content, Effect, Message, Phase, State, LOAD_FAILED_TEXT};
pub use subcomponents::loading::RequestId;
pub use subcomponents::zoom::ZoomLevel;
