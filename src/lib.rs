// SPDX-License-Identifier: MPL-2.0
//! `post_lens` is a reader for rendered blog posts built with the Iced GUI
//! framework.
//!
//! It recreates the blog theme's reading comforts natively (navigation menu,
//! light and dark themes, scroll helpers, code copy) and provides a lightbox
//! for enlarging images and zooming diagrams.

#![doc(html_root_url = "https://docs.rs/post_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod lightbox;
pub mod logging;
pub mod media;
pub mod page;
pub mod ui;

#[cfg(test)]
mod test_utils;
