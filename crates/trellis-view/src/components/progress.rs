//! Progress bar widget driven by a partial/total counter.

use crate::changeset::PropertyChange;
use crate::component::Component;
use crate::components::image::Image;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, StyleSheet};

/// Progress expressed as `partial` completed units out of `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCounter {
    partial: u32,
    total: u32,
}

impl ProgressCounter {
    /// A counter at zero out of `total` units.
    #[must_use]
    pub fn initial(total: u32) -> Self {
        Self { partial: 0, total }
    }

    /// A counter with `partial` clamped to `total`.
    #[must_use]
    pub fn new(partial: u32, total: u32) -> Self {
        Self {
            partial: partial.min(total),
            total,
        }
    }

    #[must_use]
    pub fn partial(&self) -> u32 {
        self.partial
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Completed fraction in `[0, 1]`. A zero-unit counter is complete.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.partial as f32 / self.total as f32
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.total - self.partial
    }
}

/// How the filled or track portion of the bar is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressContentType {
    Color(Color),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStyleSheet {
    pub progress_style: ProgressContentType,
    pub track_style: ProgressContentType,
}

impl Default for ProgressStyleSheet {
    fn default() -> Self {
        Self {
            progress_style: ProgressContentType::Color(Color::BLUE),
            track_style: ProgressContentType::Color(Color::GRAY),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressStyleChange {
    ProgressStyle(ProgressContentType),
    TrackStyle(ProgressContentType),
}

impl ProgressStyleSheet {
    fn change_set(&self, new: &ProgressStyleSheet) -> Vec<ProgressStyleChange> {
        let mut changes = Vec::new();
        if self.progress_style != new.progress_style {
            changes.push(ProgressStyleChange::ProgressStyle(
                new.progress_style.clone(),
            ));
        }
        if self.track_style != new.track_style {
            changes.push(ProgressStyleChange::TrackStyle(new.track_style.clone()));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<ProgressStyleChange> {
        vec![
            ProgressStyleChange::ProgressStyle(self.progress_style.clone()),
            ProgressStyleChange::TrackStyle(self.track_style.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressChangeSet {
    pub counter: PropertyChange<ProgressCounter>,
    pub base_style: Vec<BaseStyleChange>,
    pub progress_style: Vec<ProgressStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl ProgressChangeSet {
    pub(crate) fn full(
        counter: &ProgressCounter,
        style: &StyleSheet<ProgressStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            counter: PropertyChange::Changed(*counter),
            base_style: style.base.full_change_set(),
            progress_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&ProgressCounter, &StyleSheet<ProgressStyleSheet>, &Layout),
        new: (&ProgressCounter, &StyleSheet<ProgressStyleSheet>, &Layout),
    ) -> Self {
        let counter = if old.0 == new.0 {
            PropertyChange::NoChange
        } else {
            PropertyChange::Changed(*new.0)
        };
        Self {
            counter,
            base_style: old.1.base.change_set(&new.1.base),
            progress_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counter.is_no_change()
            && self.base_style.is_empty()
            && self.progress_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Build a progress bar from explicit counter, style, and layout.
pub fn progress<MsgT>(
    counter: ProgressCounter,
    style: StyleSheet<ProgressStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Progress(counter, style, layout)
}
