// SPDX-License-Identifier: MPL-2.0
//! Centralized widget styles for the reader and the lightbox.

pub mod button;
pub mod container;
pub mod overlay;
