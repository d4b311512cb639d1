// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the lightbox.
//!
//! Each sub-component owns its state and exposes a `handle()` method; the
//! lightbox component orchestrates them.
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── navigation - Index within the media sequence
//!     ├── zoom       - Clamped diagram zoom level
//!     ├── pan        - Drag offset while magnified
//!     ├── gesture    - Touch swipe / pinch / pan recognition
//!     ├── loading    - Image load requests and spinner
//!     └── focus      - Keyboard focus among controls
//! ```

pub mod focus;
pub mod gesture;
pub mod loading;
pub mod navigation;
pub mod pan;
pub mod zoom;
