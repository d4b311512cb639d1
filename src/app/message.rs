// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::lightbox;
use crate::page::rescan::RescanTicket;
use crate::page::Page;
use crate::ui::article;
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::scroll;
use iced::{event, Size};
use std::path::PathBuf;

/// Why a page is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Opened by the reader (command line, dialog, drop, link).
    Open,
    /// Reloaded after the file changed; scroll position and lightbox survive.
    Rescan,
}

/// Top-level messages consumed by `App::update`. The variants forward
/// component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Article(article::Message),
    Lightbox(lightbox::Message),
    Scroll(scroll::Message),
    Notification(notifications::NotificationMessage),
    /// Keyboard event not consumed by a widget while the lightbox is hidden.
    PageKey(event::Event),
    WindowResized(Size),
    OpenFileDialog,
    OpenFileDialogResult(Option<PathBuf>),
    FileDropped(PathBuf),
    PageLoaded {
        path: PathBuf,
        origin: LoadOrigin,
        result: Result<Page, Error>,
    },
    /// Poll the page file for changes.
    WatchTick,
    RescanDue(RescanTicket),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Page to open on startup.
    pub file_path: Option<String>,
    /// Directory that root-relative image paths (`/assets/a.png`) resolve
    /// against. Defaults to the page's directory.
    pub site_root: Option<String>,
    /// Takes precedence over `POST_LENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Takes precedence over `POST_LENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
