// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the reader.
//!
//! The `App` struct wires together the page, the lightbox, the theme glue,
//! localization and persisted preferences, and translates component effects
//! into tasks such as image decoding, page reloads and timers.

mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, LoadOrigin, Message};
pub use screen::Screen;

use crate::config::{self, LightboxTuning, PageTuning, RescanTuning};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::lightbox::{self, Bindings};
use crate::page::{self, rescan::RescanScheduler, watcher::Watcher, Page};
use crate::ui::article::MediaFocus;
use crate::ui::code_copy;
use crate::ui::notifications;
use crate::ui::scroll;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    page: Option<Page>,
    /// Path being opened while `screen` is `Loading` or `Failed`.
    pending_path: Option<PathBuf>,
    load_error: Option<Error>,
    site_root: Option<PathBuf>,
    lightbox_tuning: LightboxTuning,
    rescan_tuning: RescanTuning,
    watcher: Option<Watcher>,
    rescan: RescanScheduler,
    bindings: Bindings,
    /// Created the first time the page has media to bind.
    lightbox: Option<lightbox::State>,
    media_focus: MediaFocus,
    code_copy: code_copy::State,
    scroll: scroll::State,
    theme_mode: ThemeMode,
    menu_open: bool,
    window_size: Size,
    app_state: persisted_state::AppState,
    /// Overrides where `app_state` is saved; `None` uses the data directory.
    state_dir: Option<PathBuf>,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("page", &self.page.as_ref().map(|p| p.path.clone()))
            .field(
                "lightbox",
                &self.lightbox.as_ref().map(lightbox::State::phase),
            )
            .finish_non_exhaustive()
    }
}

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        let rescan_tuning = RescanTuning::default();
        Self {
            i18n: I18n::default(),
            screen: Screen::Empty,
            page: None,
            pending_path: None,
            load_error: None,
            site_root: None,
            lightbox_tuning: LightboxTuning::default(),
            rescan_tuning,
            watcher: None,
            rescan: RescanScheduler::new(&rescan_tuning),
            bindings: Bindings::default(),
            lightbox: None,
            media_focus: MediaFocus::default(),
            code_copy: code_copy::State::new(),
            scroll: scroll::State::new(PageTuning::default()),
            theme_mode: ThemeMode::default(),
            menu_open: false,
            window_size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            app_state: persisted_state::AppState::default(),
            state_dir: None,
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Loads configuration and state, then starts loading the page named on
    /// the command line, if any.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

        let (config, config_warning) = config::load();
        let (app_state, state_warning) = persisted_state::AppState::load();

        let rescan_tuning = config.rescan_tuning();
        let mut app = App {
            i18n: I18n::new(flags.lang.clone(), &config),
            site_root: flags.site_root.map(PathBuf::from),
            lightbox_tuning: config.lightbox_tuning(),
            rescan_tuning,
            rescan: RescanScheduler::new(&rescan_tuning),
            scroll: scroll::State::new(config.page_tuning()),
            theme_mode: app_state.theme,
            app_state,
            ..Self::default()
        };

        for key in [config_warning, state_warning].into_iter().flatten() {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = match flags.file_path {
            Some(path) => app.open_page(PathBuf::from(path)),
            None => Task::none(),
        };
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.page.as_ref().and_then(Page::title) {
            Some(title) => format!("{title} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let lightbox_shown = self.lightbox.as_ref().is_some_and(lightbox::State::is_shown);
        let lightbox_loading = self
            .lightbox
            .as_ref()
            .is_some_and(lightbox::State::is_loading);

        Subscription::batch([
            subscription::events(lightbox_shown),
            subscription::watch(self.watcher.is_some(), self.rescan_tuning.watch_interval),
            subscription::frames(lightbox_loading, self.scroll.is_animating()),
            subscription::notifications(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navbar(navbar_message) => self.handle_navbar_message(navbar_message),
            Message::Article(article_message) => self.handle_article_message(article_message),
            Message::Lightbox(lightbox_message) => self.handle_lightbox_message(lightbox_message),
            Message::Scroll(scroll_message) => {
                self.scroll.handle(scroll_message).map(Message::Scroll)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::PageKey(event) => self.handle_page_key(&event),
            Message::WindowResized(size) => self.handle_resize(size),
            Message::OpenFileDialog => {
                update::open_file_dialog(self.app_state.last_open_directory.clone())
            }
            Message::OpenFileDialogResult(Some(path)) | Message::FileDropped(path) => {
                self.open_page(path)
            }
            Message::OpenFileDialogResult(None) => Task::none(),
            Message::PageLoaded {
                path,
                origin,
                result,
            } => self.handle_page_loaded(path, origin, result),
            Message::WatchTick => self.handle_watch_tick(),
            Message::RescanDue(ticket) => self.handle_rescan_due(ticket),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            page: self.page.as_ref(),
            pending_path: self.pending_path.as_deref(),
            load_error: self.load_error.as_ref(),
            bindings: &self.bindings,
            lightbox: self.lightbox.as_ref(),
            media_focus: self.media_focus.focused(),
            code_copy: &self.code_copy,
            scroll: &self.scroll,
            theme_mode: self.theme_mode,
            menu_open: self.menu_open,
            window_size: self.window_size,
            notifications: &self.notifications,
        })
    }

    /// Starts loading `path` as a new page.
    fn open_page(&mut self, path: PathBuf) -> Task<Message> {
        tracing::info!(path = %path.display(), "opening page");
        if self.page.is_none() {
            self.screen = Screen::Loading;
        }
        self.pending_path = Some(path.clone());
        load_task(path, self.site_root.clone(), LoadOrigin::Open)
    }
}

fn load_task(path: PathBuf, site_root: Option<PathBuf>, origin: LoadOrigin) -> Task<Message> {
    let task_path = path.clone();
    Task::perform(page::load_page_async(task_path, site_root), move |result| {
        Message::PageLoaded {
            path: path.clone(),
            origin,
            result,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_starts_empty() {
        let app = App::default();
        assert_eq!(app.screen, Screen::Empty);
        assert!(app.page.is_none());
        assert!(app.lightbox.is_none());
        assert_eq!(app.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn title_falls_back_to_app_name() {
        let app = App::default();
        assert_eq!(app.title(), app.i18n.tr("window-title"));
    }
}
