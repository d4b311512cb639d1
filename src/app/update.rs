// SPDX-License-Identifier: MPL-2.0
//! Message handlers: component events become state changes and tasks.

use super::{load_task, App, LoadOrigin, Message, Screen};
use crate::error::Error;
use crate::lightbox;
use crate::media;
use crate::page::rescan::RescanTicket;
use crate::page::{self, Block, Page};
use crate::ui::article;
use crate::ui::code_copy;
use crate::ui::design_tokens::sizing;
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::Notification;
use crate::ui::scroll;
use iced::{event, keyboard, window, Size, Task};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Key prefix of notifications about the page file itself.
const PAGE_NOTIFICATION_PREFIX: &str = "notification-page-";

/// Shows the open-page dialog, starting in the last browsed directory.
pub fn open_file_dialog(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().add_filter("HTML", &["html", "htm"]);
            if let Some(dir) = last_directory.filter(|dir| dir.exists()) {
                dialog = dialog.set_directory(&dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Sends `message` once `delay` has elapsed.
fn after(delay: Duration, message: Message) -> Task<Message> {
    Task::perform(tokio::time::sleep(delay), move |()| message)
}

/// Where a link on the page leads.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum LinkTarget {
    Anchor(String),
    Page(PathBuf),
    /// Remote or non-file scheme; never followed.
    External,
}

/// Classifies `href` as seen from a page in `page_dir`.
pub(super) fn resolve_link(href: &str, page_dir: &Path, site_root: &Path) -> LinkTarget {
    if let Some(id) = page::anchor_target(href) {
        return LinkTarget::Anchor(id.to_string());
    }
    if href.starts_with("//") || href.contains("://") || href.starts_with("mailto:") {
        return LinkTarget::External;
    }
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let mut target = match path.strip_prefix('/') {
        Some(rooted) => site_root.join(rooted),
        None => page_dir.join(path),
    };
    if path.is_empty() || path.ends_with('/') || target.is_dir() {
        target = target.join("index.html");
    }
    LinkTarget::Page(target)
}

impl App {
    pub(super) fn handle_navbar_message(&mut self, message: navbar::Message) -> Task<Message> {
        match navbar::update(message, &mut self.menu_open) {
            NavbarEvent::None => Task::none(),
            NavbarEvent::FollowLink(href) => self.follow_link(&href),
            NavbarEvent::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                self.app_state.theme = self.theme_mode;
                tracing::debug!(theme = ?self.theme_mode, "theme toggled");
                self.persist_state();
                Task::none()
            }
            NavbarEvent::OpenFile => open_file_dialog(self.app_state.last_open_directory.clone()),
        }
    }

    pub(super) fn handle_article_message(&mut self, message: article::Message) -> Task<Message> {
        match message {
            article::Message::OpenMedia(key) => {
                self.media_focus.clear();
                self.handle_lightbox_message(lightbox::Message::OpenKey(key))
            }
            article::Message::LinkPressed(href) => self.follow_link(&href),
            article::Message::Code(code_message) => match self.code_copy.handle(code_message) {
                code_copy::Effect::None => Task::none(),
                code_copy::Effect::Copy {
                    block,
                    token,
                    revert_after,
                } => {
                    let code = self.page.as_ref().and_then(|page| match page.blocks.get(block) {
                        Some(Block::Code { code, .. }) => Some(code.clone()),
                        _ => None,
                    });
                    let Some(code) = code else {
                        return Task::none();
                    };
                    Task::batch([
                        iced::clipboard::write(code),
                        after(
                            revert_after,
                            Message::Article(article::Message::Code(code_copy::Message::Revert(
                                token,
                            ))),
                        ),
                    ])
                }
            },
        }
    }

    pub(super) fn handle_lightbox_message(&mut self, message: lightbox::Message) -> Task<Message> {
        let Some(lightbox) = self.lightbox.as_mut() else {
            return Task::none();
        };
        let (effect, task) = lightbox.handle(message);
        let task = task.map(Message::Lightbox);

        let effect_task = match effect {
            lightbox::Effect::None => Task::none(),
            lightbox::Effect::LoadImage { request, source } => {
                Task::perform(media::load_source_async(source), move |result| {
                    Message::Lightbox(lightbox::Message::ImageLoaded { request, result })
                })
            }
            lightbox::Effect::ScheduleCleanup { token, after: delay } => after(
                delay,
                Message::Lightbox(lightbox::Message::CleanupElapsed(token)),
            ),
        };
        Task::batch([task, effect_task])
    }

    /// Page keyboard: media focus and activation, Escape for the menu.
    pub(super) fn handle_page_key(&mut self, event: &event::Event) -> Task<Message> {
        use keyboard::key::Named;

        let event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(named),
            modifiers,
            ..
        }) = event
        else {
            return Task::none();
        };
        let Some(page) = self.page.as_ref() else {
            return Task::none();
        };

        match named {
            Named::Tab => {
                let order = article::focus_order(page, &self.bindings);
                let Some(key) = self.media_focus.cycle(&order, modifiers.shift()) else {
                    return Task::none();
                };
                let block = article::block_of(page, key);
                self.reveal_block(block)
            }
            Named::Enter | Named::Space => match self.media_focus.focused() {
                Some(key) => self.handle_article_message(article::Message::OpenMedia(key)),
                None => Task::none(),
            },
            Named::Escape => {
                self.menu_open = false;
                self.media_focus.clear();
                Task::none()
            }
            _ => Task::none(),
        }
    }

    /// Scrolls a block into view when its estimated top is off screen.
    fn reveal_block(&mut self, block: Option<usize>) -> Task<Message> {
        let (Some(block), Some(page)) = (block, self.page.as_ref()) else {
            return Task::none();
        };
        let tops = article::estimate_block_tops(
            &page.blocks,
            article::column_width(self.window_size.width),
        );
        let Some(&top) = tops.get(block) else {
            return Task::none();
        };
        let metrics = self.scroll.metrics();
        let visible_from = metrics.offset + sizing::HEADER_HEIGHT;
        let visible_to = metrics.offset + metrics.viewport_height - sizing::DIAGRAM_PREVIEW_HEIGHT;
        if top >= visible_from && top <= visible_to {
            return Task::none();
        }
        let target = self.scroll.anchor_offset(top, sizing::HEADER_HEIGHT);
        self.scroll
            .handle(scroll::Message::ToOffset(target))
            .map(Message::Scroll)
    }

    pub(super) fn handle_resize(&mut self, size: Size) -> Task<Message> {
        self.window_size = size;
        navbar::on_resize(size.width, &mut self.menu_open);
        self.handle_lightbox_message(lightbox::Message::RawEvent(event::Event::Window(
            window::Event::Resized(size),
        )))
    }

    fn follow_link(&mut self, href: &str) -> Task<Message> {
        let Some(page) = self.page.as_ref() else {
            return Task::none();
        };
        let page_dir = page.path.parent().unwrap_or_else(|| Path::new("."));
        let site_root = self.site_root.as_deref().unwrap_or(page_dir);

        match resolve_link(href, page_dir, site_root) {
            LinkTarget::Anchor(id) => {
                let Some(block) = page.block_with_id(&id) else {
                    tracing::debug!(%id, "anchor target not found");
                    return Task::none();
                };
                let tops = article::estimate_block_tops(
                    &page.blocks,
                    article::column_width(self.window_size.width),
                );
                let Some(&top) = tops.get(block) else {
                    return Task::none();
                };
                let target = self.scroll.anchor_offset(top, sizing::HEADER_HEIGHT);
                self.scroll
                    .handle(scroll::Message::ToOffset(target))
                    .map(Message::Scroll)
            }
            LinkTarget::Page(path) if path.is_file() => self.open_page(path),
            LinkTarget::Page(path) => {
                self.notifications.push(
                    Notification::warning("notification-link-missing")
                        .with_arg("path", path.display().to_string()),
                );
                Task::none()
            }
            LinkTarget::External => {
                tracing::info!(%href, "external link not followed");
                Task::none()
            }
        }
    }

    pub(super) fn handle_page_loaded(
        &mut self,
        path: PathBuf,
        origin: LoadOrigin,
        result: Result<Page, Error>,
    ) -> Task<Message> {
        match (origin, result) {
            (LoadOrigin::Open, Ok(page)) => self.show_page(page),
            (LoadOrigin::Open, Err(error)) => {
                tracing::warn!(path = %path.display(), %error, "page failed to load");
                self.notifications.push(
                    Notification::error("notification-page-load-error")
                        .with_arg("path", path.display().to_string()),
                );
                if self.page.is_none() {
                    self.screen = Screen::Failed;
                    self.load_error = Some(error);
                }
                Task::none()
            }
            (LoadOrigin::Rescan, Ok(page)) => self.apply_rescan(page),
            (LoadOrigin::Rescan, Err(error)) => {
                tracing::warn!(path = %path.display(), %error, "rescan failed");
                self.schedule_retry(true)
            }
        }
    }

    /// Replaces the current page with a freshly opened one.
    fn show_page(&mut self, page: Page) -> Task<Message> {
        self.notifications.clear_matching(PAGE_NOTIFICATION_PREFIX);
        self.app_state.set_last_open_directory_from_file(&page.path);
        self.persist_state();

        self.screen = Screen::Reader;
        self.pending_path = None;
        self.load_error = None;
        self.menu_open = false;
        self.media_focus.clear();
        self.code_copy.clear();
        self.bindings.clear();
        self.lightbox = None;
        // Supersede rescans still queued for the previous page.
        let _ = self.rescan.notify();
        self.watcher = Some(page::watcher::Watcher::new(page.path.clone()));

        let outcome = self.bindings.bind(&page.media);
        if outcome.initialize {
            self.lightbox = Some(lightbox::State::new(
                page.media.clone(),
                &self.lightbox_tuning,
                self.window_size,
            ));
        }
        let still_pending = page.has_pending_diagrams();
        self.page = Some(page);

        let scroll_task = self.scroll.reset().map(Message::Scroll);
        Task::batch([scroll_task, self.schedule_retry(still_pending)])
    }

    /// Swaps in a reloaded version of the current page, keeping scroll
    /// position and the open lightbox item.
    fn apply_rescan(&mut self, page: Page) -> Task<Message> {
        let outcome = self.bindings.bind(&page.media);
        let new_diagrams = outcome
            .newly_bound
            .iter()
            .filter(|key| key.kind == media::MediaKind::Diagram)
            .count();

        let mut lightbox_task = Task::none();
        if self.lightbox.is_some() {
            lightbox_task =
                self.handle_lightbox_message(lightbox::Message::Rebind(page.media.clone()));
        } else if outcome.initialize {
            self.lightbox = Some(lightbox::State::new(
                page.media.clone(),
                &self.lightbox_tuning,
                self.window_size,
            ));
        }

        self.media_focus
            .retain(&article::focus_order(&page, &self.bindings));
        if new_diagrams > 0 {
            self.notifications.push(
                Notification::info("notification-diagrams-ready")
                    .with_arg("count", new_diagrams.to_string()),
            );
        }
        tracing::debug!(
            bound = outcome.newly_bound.len(),
            pending = page.pending_diagrams,
            "page rescanned"
        );

        let still_pending = page.has_pending_diagrams();
        self.page = Some(page);
        Task::batch([lightbox_task, self.schedule_retry(still_pending)])
    }

    fn persist_state(&mut self) {
        if let Some(key) = self.app_state.save_to(self.state_dir.clone()) {
            self.notifications.push(Notification::warning(key));
        }
    }

    /// Asks the scheduler for another attempt while diagrams are pending.
    fn schedule_retry(&mut self, still_pending: bool) -> Task<Message> {
        match self.rescan.after_rescan(still_pending) {
            Some(ticket) => after(self.rescan.delay(), Message::RescanDue(ticket)),
            None => Task::none(),
        }
    }

    pub(super) fn handle_watch_tick(&mut self) -> Task<Message> {
        let Some(watcher) = self.watcher.as_mut() else {
            return Task::none();
        };
        if !watcher.poll() {
            return Task::none();
        }
        tracing::debug!(path = %watcher.path().display(), "page changed on disk");
        let ticket = self.rescan.notify();
        after(self.rescan.delay(), Message::RescanDue(ticket))
    }

    pub(super) fn handle_rescan_due(&mut self, ticket: RescanTicket) -> Task<Message> {
        if !self.rescan.fire(ticket) {
            return Task::none();
        }
        let Some(path) = self.page.as_ref().map(|page| page.path.clone()) else {
            return Task::none();
        };
        load_task(path, self.site_root.clone(), LoadOrigin::Rescan)
    }
}
