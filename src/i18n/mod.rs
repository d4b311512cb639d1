// SPDX-License-Identifier: MPL-2.0
//! Localization of the reader's own interface strings.
//!
//! Page content is never translated; only chrome such as lightbox controls,
//! tooltips and error messages go through Fluent.
//!
//! Locale resolution order: `--lang` flag, `[general] language` from the
//! config file, the operating system locale, then `en-US`.

pub mod fluent;
