// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the reader's hot paths.
//!
//! Measures the performance of:
//! - Parsing a long rendered post into blocks and media
//! - Stepping through the lightbox sequence (next/previous)
//! - Rebinding after a rescan

use criterion::{criterion_group, criterion_main, Criterion};
use iced::Size;
use post_lens::config::LightboxTuning;
use post_lens::lightbox::{Bindings, Message, State};
use post_lens::media::{DiagramData, ImageSource, MediaItem, MediaKey, MediaSequence};
use post_lens::page::parser;
use std::hint::black_box;
use std::path::{Path, PathBuf};

const DIAGRAM: &str =
    "<svg xmlns='http://www.w3.org/2000/svg' width='400' height='300'><rect width='10' height='10'/></svg>";

fn sequence(images: usize, diagrams: usize) -> MediaSequence {
    let images = (0..images)
        .map(|i| MediaItem::Image {
            key: MediaKey::image(i),
            source: ImageSource::File(PathBuf::from(format!("{i}.png"))),
            alt: None,
        })
        .collect();
    let diagrams = (0..diagrams)
        .map(|i| MediaItem::Diagram {
            key: MediaKey::diagram(i),
            diagram: DiagramData::from_markup(DIAGRAM),
        })
        .collect();
    MediaSequence::new(images, diagrams)
}

fn long_post(sections: usize) -> String {
    let mut html = String::from(
        "<html><head><title>Bench</title></head><body><article class=\"post-content\">",
    );
    for i in 0..sections {
        html.push_str(&format!(
            "<h2 id=\"s{i}\">Section {i}</h2>\
             <p>Paragraph with <a href=\"#s{i}\">a link</a> and <code>code</code>.</p>\
             <img src=\"img/{i}.png\" alt=\"figure {i}\">\
             <pre><code class=\"language-rust\">fn main() {{}}</code></pre>\
             <pre class=\"mermaid\">{DIAGRAM}</pre>"
        ));
    }
    html.push_str("</article></body></html>");
    html
}

/// Benchmark parsing a post with many media elements.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("page");
    let html = long_post(100);

    group.bench_function("parse_long_post", |b| {
        b.iter(|| {
            let page = parser::parse(black_box(&html), Path::new("/site"), Path::new("/site"));
            black_box(page.map(|p| p.media.len()).unwrap_or_default());
        });
    });

    group.finish();
}

/// Benchmark navigation over the diagram part of a sequence.
///
/// Diagrams open without a decode, so this measures the state machine alone.
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox");
    let media = sequence(0, 200);

    group.bench_function("next_previous_sweep", |b| {
        b.iter(|| {
            let mut state = State::new(
                media.clone(),
                &LightboxTuning::default(),
                Size::new(1280.0, 800.0),
            );
            let _ = state.handle(Message::Open(0));
            for _ in 0..199 {
                let _ = state.handle(Message::Next);
            }
            for _ in 0..199 {
                let _ = state.handle(Message::Previous);
            }
            black_box(state.current_index());
        });
    });

    group.finish();
}

/// Benchmark rebinding a grown sequence.
fn bench_rebind(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox");
    let before = sequence(50, 50);
    let after = sequence(50, 100);

    group.bench_function("rebind_after_rescan", |b| {
        b.iter(|| {
            let mut bindings = Bindings::default();
            bindings.bind(&before);
            black_box(bindings.bind(&after).newly_bound.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_navigate, bench_rebind);
criterion_main!(benches);
