// SPDX-License-Identifier: MPL-2.0
//! What the main area shows.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// No page yet: an invitation to open one.
    #[default]
    Empty,
    /// First load of a page in progress.
    Loading,
    /// A page is displayed.
    Reader,
    /// The last page could not be opened.
    Failed,
}
