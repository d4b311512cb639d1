// SPDX-License-Identifier: MPL-2.0
//! Tolerant HTML scanner producing a [`Page`].
//!
//! Rendered blog pages are HTML, not XML, so the reader is configured to
//! accept unmatched and mismatched end tags, void elements written without a
//! closing slash, unquoted or valueless attributes and HTML named entities.
//! Layout is not reproduced: the article becomes a flat list of blocks.
//!
//! Media participate in the lightbox only inside a content container
//! (`.post-content` or `.page-content`). Diagrams are `pre.mermaid` /
//! `div.mermaid` elements; one whose body holds no `<svg>` yet is pending.

use super::{Block, DiagramState, ListItem, NavLink, Page};
use crate::error::Result;
use crate::media::{DiagramData, ImageSource, MediaItem, MediaKey, MediaSequence};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::path::Path;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose bodies never reach the reader.
const SKIPPED_ELEMENTS: &[&str] = &["noscript", "template", "svg", "iframe"];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "cite", "code", "del", "em", "i", "ins", "kbd", "mark", "q", "s", "samp",
    "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Elements whose text belongs to site chrome rather than the article.
const CHROME_ELEMENTS: &[&str] = &["header", "nav", "footer", "aside"];

const CONTENT_CLASSES: &[&str] = &["post-content", "page-content"];

/// Parses `html` into a page. Image sources resolve against `page_dir`, or
/// `site_root` for root-relative paths.
///
/// # Errors
///
/// Returns [`crate::error::Error::Parse`] only when the markup is unreadable
/// before anything could be recovered; later errors truncate the page.
pub fn parse(html: &str, page_dir: &Path, site_root: &Path) -> Result<Page> {
    let html = strip_raw_text_elements(html);
    let mut reader = Reader::from_str(&html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.trim_text(false);

    let mut builder = PageBuilder::new(page_dir, site_root);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = element_name(e.name().as_ref());
                if SKIPPED_ELEMENTS.contains(&name.as_str()) {
                    if let Err(err) = reader.read_to_end(e.name()) {
                        tracing::debug!(element = %name, error = %err, "unterminated element");
                        break;
                    }
                } else if is_diagram(&name, &e) {
                    match reader.read_text(e.name()) {
                        Ok(inner) => builder.diagram(&inner),
                        Err(err) => {
                            tracing::debug!(error = %err, "unterminated diagram element");
                            break;
                        }
                    }
                } else {
                    builder.start(&name, &e, false);
                }
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(e.name().as_ref());
                builder.start(&name, &e, true);
            }
            Ok(Event::End(e)) => builder.end(&element_name(e.name().as_ref())),
            Ok(Event::Text(text)) => builder.text(&unescape_html(&String::from_utf8_lossy(&text))),
            Ok(Event::CData(data)) => builder.text(&String::from_utf8_lossy(&data.into_inner())),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                if builder.is_empty() {
                    return Err(err.into());
                }
                tracing::warn!(
                    position = reader.buffer_position(),
                    error = %err,
                    "stopped parsing malformed markup"
                );
                break;
            }
        }
    }

    Ok(builder.finish())
}

/// Elements whose bodies are raw text in HTML and may hold a bare `<`.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Cuts `<script>` and `<style>` elements out of the markup before it
/// reaches the tokenizer, which would otherwise read their bodies as tags.
fn strip_raw_text_elements(html: &str) -> Cow<'_, str> {
    // ASCII lowercasing keeps byte offsets identical to `html`.
    let lower = html.to_ascii_lowercase();
    let mut out = String::new();
    let mut pos = 0;

    while let Some((start, tag)) = next_raw_text_open(&lower, pos) {
        out.push_str(&html[pos..start]);
        let close = format!("</{tag}");
        pos = match lower[start..].find(&close) {
            Some(offset) => {
                let close_start = start + offset;
                lower[close_start..]
                    .find('>')
                    .map_or(html.len(), |gt| close_start + gt + 1)
            }
            None => html.len(),
        };
    }

    if pos == 0 {
        return Cow::Borrowed(html);
    }
    out.push_str(&html[pos..]);
    Cow::Owned(out)
}

fn next_raw_text_open(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    RAW_TEXT_ELEMENTS
        .iter()
        .filter_map(|tag| {
            let needle = format!("<{tag}");
            let mut search = from;
            while let Some(offset) = lower[search..].find(&needle) {
                let start = search + offset;
                let after = lower[start + needle.len()..].chars().next();
                if matches!(after, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
                    return Some((start, *tag));
                }
                search = start + needle.len();
            }
            None
        })
        .min_by_key(|(start, _)| *start)
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Option<String> {
    element
        .html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))
        .map(|attr| unescape_html(&String::from_utf8_lossy(&attr.value)).into_owned())
}

fn classes(element: &BytesStart<'_>) -> Vec<String> {
    attribute(element, "class")
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn has_class(element: &BytesStart<'_>, class: &str) -> bool {
    classes(element).iter().any(|c| c == class)
}

fn is_diagram(name: &str, element: &BytesStart<'_>) -> bool {
    matches!(name, "pre" | "div") && has_class(element, "mermaid")
}

/// Language named by a `language-*` or `lang-*` class.
fn code_language(element: &BytesStart<'_>) -> Option<String> {
    classes(element).into_iter().find_map(|class| {
        class
            .strip_prefix("language-")
            .or_else(|| class.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}

fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces character references. Text with an unknown or malformed
/// reference is kept as written, the way browsers render stray ampersands.
fn unescape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    quick_xml::escape::unescape_with(raw, resolve_entity).unwrap_or(Cow::Borrowed(raw))
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{ad}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "rArr" => "\u{21d2}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "sect" => "\u{a7}",
        "para" => "\u{b6}",
        "check" => "\u{2713}",
        _ => return None,
    })
}

struct Frame {
    name: String,
    content: bool,
    chrome: bool,
    nav: bool,
}

enum Target {
    Heading { level: u8, id: Option<String> },
    Paragraph,
    ListItem,
    Quote,
    SiteTitle,
    DocumentTitle,
    NavLink { href: String },
}

struct Capture {
    /// Stack index of the element being captured.
    depth: usize,
    name: String,
    target: Target,
    text: String,
    links: Vec<String>,
    in_link: bool,
    text_outside_links: bool,
}

struct ListBuilder {
    depth: usize,
    ordered: bool,
    items: Vec<ListItem>,
}

struct CodeCapture {
    depth: usize,
    language: Option<String>,
    code: String,
}

struct PageBuilder<'a> {
    page_dir: &'a Path,
    site_root: &'a Path,
    stack: Vec<Frame>,
    capture: Option<Capture>,
    list: Option<ListBuilder>,
    code: Option<CodeCapture>,
    loose_text: String,

    site_title: Option<String>,
    document_title: Option<String>,
    nav_links: Vec<NavLink>,
    blocks: Vec<Block>,
    images: Vec<MediaItem>,
    diagrams: Vec<MediaItem>,
    image_ordinal: usize,
    diagram_ordinal: usize,
    pending_diagrams: usize,
    is_post: bool,
}

impl<'a> PageBuilder<'a> {
    fn new(page_dir: &'a Path, site_root: &'a Path) -> Self {
        Self {
            page_dir,
            site_root,
            stack: Vec::new(),
            capture: None,
            list: None,
            code: None,
            loose_text: String::new(),
            site_title: None,
            document_title: None,
            nav_links: Vec::new(),
            blocks: Vec::new(),
            images: Vec::new(),
            diagrams: Vec::new(),
            image_ordinal: 0,
            diagram_ordinal: 0,
            pending_diagrams: 0,
            is_post: false,
        }
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
            && self.stack.is_empty()
            && self.site_title.is_none()
            && self.document_title.is_none()
    }

    fn in_content(&self) -> bool {
        self.stack.iter().any(|frame| frame.content)
    }

    fn in_chrome(&self) -> bool {
        self.stack.iter().any(|frame| frame.chrome)
    }

    fn in_nav(&self) -> bool {
        self.stack.iter().any(|frame| frame.nav)
    }

    fn in_head(&self) -> bool {
        self.stack.iter().any(|frame| frame.name == "head")
    }

    fn start(&mut self, name: &str, element: &BytesStart<'_>, empty: bool) {
        if let Some(code) = self.code.as_mut() {
            if name == "br" {
                code.code.push('\n');
            } else if name == "code" && code.language.is_none() {
                code.language = code_language(element);
            }
            if !(empty || VOID_ELEMENTS.contains(&name)) {
                self.push_frame(name, element);
            }
            return;
        }

        if !INLINE_ELEMENTS.contains(&name) && name != "br" && name != "img" {
            self.flush_loose_text();
        }

        match name {
            "br" => {
                if let Some(capture) = self.capture.as_mut() {
                    capture.text.push(' ');
                }
                return;
            }
            "img" => {
                self.image(element);
                return;
            }
            "hr" => {
                if self.capture.is_none() && !self.in_chrome() {
                    self.blocks.push(Block::Rule);
                }
                return;
            }
            _ if empty || VOID_ELEMENTS.contains(&name) => return,
            _ => {}
        }

        self.close_implicitly(name);
        let depth = self.push_frame(name, element);

        if let Some(capture) = self.capture.as_mut() {
            if name == "a" {
                capture.in_link = true;
                if let Some(href) = attribute(element, "href") {
                    capture.links.push(href);
                }
            }
            return;
        }

        let target = if self.in_chrome() {
            if has_class(element, "site-title") {
                Some(Target::SiteTitle)
            } else if name == "a" && self.in_nav() {
                attribute(element, "href").map(|href| Target::NavLink { href })
            } else {
                None
            }
        } else if name == "title" {
            self.in_head().then_some(Target::DocumentTitle)
        } else if let Some(level) = heading_level(name) {
            Some(Target::Heading {
                level,
                id: attribute(element, "id"),
            })
        } else {
            match name {
                "p" | "figcaption" | "dt" | "dd" | "summary" => Some(Target::Paragraph),
                "li" => Some(Target::ListItem),
                "blockquote" => Some(Target::Quote),
                "pre" => {
                    self.code = Some(CodeCapture {
                        depth,
                        language: code_language(element),
                        code: String::new(),
                    });
                    None
                }
                "ul" | "ol" => {
                    if self.list.is_none() {
                        self.list = Some(ListBuilder {
                            depth,
                            ordered: name == "ol",
                            items: Vec::new(),
                        });
                    }
                    None
                }
                _ => None,
            }
        };

        if let Some(target) = target {
            self.capture = Some(Capture {
                depth,
                name: name.to_string(),
                target,
                text: String::new(),
                links: Vec::new(),
                in_link: false,
                text_outside_links: false,
            });
        }
    }

    fn push_frame(&mut self, name: &str, element: &BytesStart<'_>) -> usize {
        let element_classes = classes(element);
        let content = element_classes
            .iter()
            .any(|class| CONTENT_CLASSES.contains(&class.as_str()));
        if element_classes.iter().any(|class| class == "post-content") {
            self.is_post = true;
        }
        let nav = element_classes.iter().any(|class| class == "main-nav")
            || attribute(element, "id").as_deref() == Some("navbarMenu");

        self.stack.push(Frame {
            name: name.to_string(),
            content,
            chrome: CHROME_ELEMENTS.contains(&name) || nav,
            nav,
        });
        self.stack.len() - 1
    }

    /// HTML closes an open `<p>` or `<li>` when a sibling starts, and an
    /// open paragraph when any block starts.
    fn close_implicitly(&mut self, name: &str) {
        let Some(capture) = self.capture.as_ref() else {
            return;
        };
        let same_sibling = capture.name == name && matches!(name, "p" | "li" | "dt" | "dd");
        let block_in_paragraph = matches!(capture.target, Target::Paragraph)
            && !INLINE_ELEMENTS.contains(&name);
        if same_sibling || block_in_paragraph {
            let depth = capture.depth;
            self.finish_capture();
            self.stack.truncate(depth);
        }
    }

    fn end(&mut self, name: &str) {
        let Some(index) = self.stack.iter().rposition(|frame| frame.name == name) else {
            return;
        };

        if self.code.as_ref().is_some_and(|code| code.depth >= index) {
            self.finish_code();
        }
        if name == "a" {
            if let Some(capture) = self.capture.as_mut() {
                capture.in_link = false;
            }
        }
        if self.capture.as_ref().is_some_and(|capture| capture.depth >= index) {
            self.finish_capture();
        }
        if !INLINE_ELEMENTS.contains(&name) {
            self.flush_loose_text();
        }
        if self.list.as_ref().is_some_and(|list| list.depth >= index) {
            self.finish_list();
        }
        self.stack.truncate(index);
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.code.push_str(text);
        } else if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
            if !capture.in_link && !text.trim().is_empty() {
                capture.text_outside_links = true;
            }
        } else if !self.stack.is_empty() && !self.in_head() && !self.in_chrome() {
            self.loose_text.push_str(text);
        }
    }

    fn image(&mut self, element: &BytesStart<'_>) {
        if self.in_chrome() {
            return;
        }
        let Some(src) = attribute(element, "src").or_else(|| attribute(element, "data-src"))
        else {
            return;
        };
        self.flush_paragraph_text();

        let source = ImageSource::resolve(&src, self.page_dir, self.site_root);
        let alt = attribute(element, "alt")
            .map(|alt| normalize_whitespace(&alt))
            .filter(|alt| !alt.is_empty());

        let key = self.in_content().then(|| {
            let key = MediaKey::image(self.image_ordinal);
            self.image_ordinal += 1;
            self.images.push(MediaItem::Image {
                key,
                source: source.clone(),
                alt: alt.clone(),
            });
            key
        });

        self.blocks.push(Block::Image { key, source, alt });
    }

    fn diagram(&mut self, inner: &str) {
        if self.in_chrome() {
            return;
        }
        self.flush_paragraph_text();
        self.flush_loose_text();

        let in_content = self.in_content();
        let key = in_content.then(|| {
            let key = MediaKey::diagram(self.diagram_ordinal);
            self.diagram_ordinal += 1;
            key
        });

        let state = match (inner.find("<svg"), inner.rfind("</svg>")) {
            (Some(start), Some(end)) if end > start => {
                DiagramState::Rendered(DiagramData::from_markup(&inner[start..end + "</svg>".len()]))
            }
            _ => {
                if in_content {
                    self.pending_diagrams += 1;
                }
                DiagramState::Pending(unescape_html(inner.trim()).into_owned())
            }
        };

        if let (Some(key), DiagramState::Rendered(diagram)) = (key, &state) {
            self.diagrams.push(MediaItem::Diagram {
                key,
                diagram: diagram.clone(),
            });
        }
        self.blocks.push(Block::Diagram { key, state });
    }

    /// Emits the text gathered so far in an open paragraph so a following
    /// image or diagram keeps its document position.
    fn flush_paragraph_text(&mut self) {
        if let Some(capture) = self.capture.as_mut() {
            if matches!(capture.target, Target::Paragraph) {
                let text = normalize_whitespace(&std::mem::take(&mut capture.text));
                if !text.is_empty() {
                    self.blocks.push(Block::Paragraph(text));
                }
            }
        }
    }

    fn flush_loose_text(&mut self) {
        let text = normalize_whitespace(&std::mem::take(&mut self.loose_text));
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(text));
        }
    }

    fn finish_capture(&mut self) {
        let Some(capture) = self.capture.take() else {
            return;
        };
        let text = normalize_whitespace(&capture.text);

        match capture.target {
            Target::Heading { level, id } => {
                if !text.is_empty() || id.is_some() {
                    self.blocks.push(Block::Heading { level, id, text });
                }
            }
            Target::Paragraph if !text.is_empty() => self.blocks.push(Block::Paragraph(text)),
            Target::Quote if !text.is_empty() => self.blocks.push(Block::Quote(text)),
            Target::ListItem => {
                let link = match capture.links.as_slice() {
                    [only] if !capture.text_outside_links => Some(only.clone()),
                    _ => None,
                };
                let item = ListItem { text, link };
                match self.list.as_mut() {
                    Some(list) => list.items.push(item),
                    None if !item.text.is_empty() => self.blocks.push(Block::Paragraph(item.text)),
                    None => {}
                }
            }
            Target::SiteTitle if !text.is_empty() => {
                self.site_title.get_or_insert(text);
            }
            Target::DocumentTitle if !text.is_empty() => self.document_title = Some(text),
            Target::NavLink { href } if !text.is_empty() => {
                self.nav_links.push(NavLink { label: text, href });
            }
            _ => {}
        }
    }

    fn finish_list(&mut self) {
        if let Some(list) = self.list.take() {
            if !list.items.is_empty() {
                self.blocks.push(Block::List {
                    ordered: list.ordered,
                    items: list.items,
                });
            }
        }
    }

    fn finish_code(&mut self) {
        if let Some(code) = self.code.take() {
            let text = code.code.strip_prefix('\n').unwrap_or(&code.code).trim_end();
            if !text.is_empty() {
                self.blocks.push(Block::Code {
                    language: code.language,
                    code: text.to_string(),
                });
            }
        }
    }

    fn finish(mut self) -> Page {
        self.finish_code();
        self.finish_capture();
        self.finish_list();
        self.flush_loose_text();

        Page {
            path: Default::default(),
            site_title: self.site_title,
            document_title: self.document_title,
            nav_links: self.nav_links,
            blocks: self.blocks,
            media: MediaSequence::new(self.images, self.diagrams),
            pending_diagrams: self.pending_diagrams,
            is_post: self.is_post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use std::path::PathBuf;

    fn parse_str(html: &str) -> Page {
        parse(html, Path::new("/site/posts"), Path::new("/site")).expect("page should parse")
    }

    const POST: &str = r##"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Post &mdash; Blog</title>
<style>body { color: red; }</style></head>
<body>
<header class="site-header">
  <a class="site-title" href="/">My Blog</a>
  <nav class="main-nav"><ul><li><a href="/">Home</a></li><li><a href="/about/">About</a></li></ul></nav>
  <img src="/logo.png" alt="logo">
</header>
<main>
<article class="post-content">
  <h2 id="intro">Intro</h2>
  <p>Hello&nbsp;world, <em>fine</em> day<br>
  second line</p>
  <pre class="mermaid"><svg viewBox="0 0 10 10"><rect width="10" height="10"/></svg></pre>
  <img src="one.png" alt="First">
  <ul><li><a href="#intro">Jump</a></li><li>Plain <a href="/x">link</a></li></ul>
  <pre><code class="language-rust">fn main() {
    println!("&lt;hi&gt;");
}
</code></pre>
  <div class="mermaid">graph TD; A--&gt;B</div>
  <img src="https://cdn.example.com/two.png">
  <hr>
</article>
<img src="/outside.png">
</main>
<script>if (a < b) { document.write("<p>x</p>"); }</script>
</body>
</html>"##;

    #[test]
    fn header_chrome_is_collected() {
        let page = parse_str(POST);
        assert_eq!(page.site_title.as_deref(), Some("My Blog"));
        assert_eq!(page.document_title.as_deref(), Some("Post \u{2014} Blog"));
        let labels: Vec<_> = page.nav_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Home", "About"]);
        assert!(page.is_post);
    }

    #[test]
    fn sequence_lists_images_before_diagrams() {
        let page = parse_str(POST);
        let keys: Vec<_> = page.media.keys().collect();
        assert_eq!(
            keys,
            [MediaKey::image(0), MediaKey::image(1), MediaKey::diagram(0)]
        );
        assert_eq!(page.media.get(2).map(MediaItem::kind), Some(MediaKind::Diagram));
    }

    #[test]
    fn pending_diagrams_are_counted_but_not_sequenced() {
        let page = parse_str(POST);
        assert_eq!(page.pending_diagrams, 1);
        let pending = page.blocks.iter().find_map(|block| match block {
            Block::Diagram {
                key,
                state: DiagramState::Pending(source),
            } => Some((*key, source.clone())),
            _ => None,
        });
        assert_eq!(pending, Some((Some(MediaKey::diagram(1)), "graph TD; A-->B".to_string())));
    }

    #[test]
    fn media_outside_content_is_not_bound() {
        let page = parse_str(POST);
        let outside = page.blocks.iter().find_map(|block| match block {
            Block::Image { key, source, .. }
                if *source == ImageSource::File(PathBuf::from("/site/outside.png")) =>
            {
                Some(*key)
            }
            _ => None,
        });
        assert_eq!(outside, Some(None));
        assert!(!page
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Image { alt: Some(alt), .. } if alt == "logo")));
    }

    #[test]
    fn prose_blocks_are_normalized() {
        let page = parse_str(POST);
        assert!(page.blocks.contains(&Block::Heading {
            level: 2,
            id: Some("intro".into()),
            text: "Intro".into(),
        }));
        assert!(page
            .blocks
            .contains(&Block::Paragraph("Hello world, fine day second line".into())));
    }

    #[test]
    fn single_link_list_items_are_clickable() {
        let page = parse_str(POST);
        let items = page
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::List { items, .. } => Some(items.clone()),
                _ => None,
            })
            .expect("list block");
        assert_eq!(items[0].link.as_deref(), Some("#intro"));
        assert_eq!(items[1].link, None);
        assert_eq!(items[1].text, "Plain link");
    }

    #[test]
    fn code_blocks_keep_layout_and_language() {
        let page = parse_str(POST);
        let code = page
            .blocks
            .iter()
            .find_map(|block| match block {
                Block::Code { language, code } => Some((language.clone(), code.clone())),
                _ => None,
            })
            .expect("code block");
        assert_eq!(code.0.as_deref(), Some("rust"));
        assert_eq!(code.1, "fn main() {\n    println!(\"<hi>\");\n}");
    }

    #[test]
    fn script_bodies_are_skipped() {
        let page = parse_str(POST);
        assert!(!page
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Paragraph(text) if text == "x")));
    }

    #[test]
    fn unclosed_paragraphs_and_items_close_on_siblings() {
        let page = parse_str(
            "<div class='page-content'><p>one<p>two<ul><li>a<li>b</ul></div>",
        );
        assert_eq!(
            page.blocks,
            vec![
                Block::Paragraph("one".into()),
                Block::Paragraph("two".into()),
                Block::List {
                    ordered: false,
                    items: vec![
                        ListItem { text: "a".into(), link: None },
                        ListItem { text: "b".into(), link: None },
                    ],
                },
            ]
        );
    }

    #[test]
    fn image_inside_paragraph_keeps_document_order() {
        let page = parse_str(
            r#"<div class="post-content"><p>Before <img src="a.png" alt=" "> after</p></div>"#,
        );
        assert_eq!(page.blocks.len(), 3);
        assert_eq!(page.blocks[0], Block::Paragraph("Before".into()));
        assert!(matches!(
            &page.blocks[1],
            Block::Image { key: Some(_), alt: None, .. }
        ));
        assert_eq!(page.blocks[2], Block::Paragraph("after".into()));
    }

    #[test]
    fn script_with_markup_in_head_does_not_hide_body() {
        let page = parse_str(
            r#"<head><script>if (a < b) { x.innerHTML = "<p>no</p>"; }</script></head>
            <body><div class="post-content"><p>yes</p></div></body>"#,
        );
        assert_eq!(page.blocks, vec![Block::Paragraph("yes".into())]);
    }

    #[test]
    fn raw_text_stripping_keeps_lookalike_tags() {
        assert_eq!(
            strip_raw_text_elements("<scripture>a</scripture><style>p{}</style>b"),
            "<scripture>a</scripture>b"
        );
    }

    #[test]
    fn stray_ampersands_survive() {
        let page = parse_str("<div class='post-content'><p>Fish & chips &unknown;</p></div>");
        assert_eq!(page.blocks, vec![Block::Paragraph("Fish & chips &unknown;".into())]);
    }
}
