// SPDX-License-Identifier: MPL-2.0
//! Which page media are wired to the lightbox.
//!
//! Binding is incremental: after a rescan only keys that were not bound
//! before are reported, and the lightbox itself is created once, the first
//! time a non-empty sequence is bound.

use crate::media::{MediaKey, MediaSequence};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOutcome {
    /// Keys that became clickable with this bind, in sequence order.
    pub newly_bound: Vec<MediaKey>,
    /// The lightbox should be created now.
    pub initialize: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Bindings {
    bound: HashSet<MediaKey>,
    initialized: bool,
}

impl Bindings {
    pub fn bind(&mut self, sequence: &MediaSequence) -> BindOutcome {
        if sequence.is_empty() && !self.initialized {
            return BindOutcome::default();
        }

        let present: HashSet<MediaKey> = sequence.keys().collect();
        self.bound.retain(|key| present.contains(key));

        let newly_bound: Vec<MediaKey> = sequence
            .keys()
            .filter(|key| self.bound.insert(*key))
            .collect();

        let initialize = !self.initialized;
        self.initialized = true;

        tracing::debug!(
            new = newly_bound.len(),
            total = self.bound.len(),
            initialize,
            "media bound"
        );
        BindOutcome {
            newly_bound,
            initialize,
        }
    }

    #[must_use]
    pub fn is_bound(&self, key: MediaKey) -> bool {
        self.bound.contains(&key)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Forgets everything; used when a different page is opened.
    pub fn clear(&mut self) {
        self.bound.clear();
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{DiagramData, ImageSource, MediaItem};

    fn sequence(images: usize, diagrams: usize) -> MediaSequence {
        let images = (0..images)
            .map(|i| MediaItem::Image {
                key: MediaKey::image(i),
                source: ImageSource::Unsupported(format!("https://x/{i}.png")),
                alt: None,
            })
            .collect();
        let diagrams = (0..diagrams)
            .map(|i| MediaItem::Diagram {
                key: MediaKey::diagram(i),
                diagram: DiagramData::from_markup("<svg width='1' height='1'/>"),
            })
            .collect();
        MediaSequence::new(images, diagrams)
    }

    #[test]
    fn empty_sequence_does_not_initialize() {
        let mut bindings = Bindings::default();
        assert_eq!(bindings.bind(&sequence(0, 0)), BindOutcome::default());
        assert!(!bindings.is_initialized());
    }

    #[test]
    fn first_bind_initializes_once() {
        let mut bindings = Bindings::default();
        let first = bindings.bind(&sequence(2, 0));
        assert!(first.initialize);
        assert_eq!(first.newly_bound.len(), 2);

        let second = bindings.bind(&sequence(2, 0));
        assert!(!second.initialize);
        assert!(second.newly_bound.is_empty());
    }

    #[test]
    fn rebind_reports_only_new_keys() {
        let mut bindings = Bindings::default();
        bindings.bind(&sequence(1, 0));
        let outcome = bindings.bind(&sequence(1, 2));
        assert_eq!(
            outcome.newly_bound,
            vec![MediaKey::diagram(0), MediaKey::diagram(1)]
        );
        assert!(bindings.is_bound(MediaKey::image(0)));
    }

    #[test]
    fn vanished_keys_are_unbound() {
        let mut bindings = Bindings::default();
        bindings.bind(&sequence(3, 0));
        bindings.bind(&sequence(1, 0));
        assert!(!bindings.is_bound(MediaKey::image(2)));

        let outcome = bindings.bind(&sequence(3, 0));
        assert_eq!(outcome.newly_bound.len(), 2);
    }
}
