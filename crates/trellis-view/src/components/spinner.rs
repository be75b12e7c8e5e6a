//! Spinner widget: an indeterminate activity indicator.

use crate::changeset::PropertyChange;
use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, StyleSheet};

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerStyleSheet {
    pub color: Color,
}

impl Default for SpinnerStyleSheet {
    fn default() -> Self {
        Self { color: Color::GRAY }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinnerStyleChange {
    Color(Color),
}

impl SpinnerStyleSheet {
    fn change_set(&self, new: &SpinnerStyleSheet) -> Vec<SpinnerStyleChange> {
        if self.color == new.color {
            Vec::new()
        } else {
            vec![SpinnerStyleChange::Color(new.color)]
        }
    }

    fn full_change_set(&self) -> Vec<SpinnerStyleChange> {
        vec![SpinnerStyleChange::Color(self.color)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerChangeSet {
    pub is_active: PropertyChange<bool>,
    pub base_style: Vec<BaseStyleChange>,
    pub spinner_style: Vec<SpinnerStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl SpinnerChangeSet {
    pub(crate) fn full(
        is_active: bool,
        style: &StyleSheet<SpinnerStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            is_active: PropertyChange::Changed(is_active),
            base_style: style.base.full_change_set(),
            spinner_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (bool, &StyleSheet<SpinnerStyleSheet>, &Layout),
        new: (bool, &StyleSheet<SpinnerStyleSheet>, &Layout),
    ) -> Self {
        let is_active = if old.0 == new.0 {
            PropertyChange::NoChange
        } else {
            PropertyChange::Changed(new.0)
        };
        Self {
            is_active,
            base_style: old.1.base.change_set(&new.1.base),
            spinner_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_active.is_no_change()
            && self.base_style.is_empty()
            && self.spinner_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Build a spinner from explicit state, style, and layout.
pub fn spinner<MsgT>(
    is_active: bool,
    style: StyleSheet<SpinnerStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Spinner(is_active, style, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_spinner_diffs_empty() {
        let style = StyleSheet::new(SpinnerStyleSheet::default());
        let layout = Layout::default();
        let changes = SpinnerChangeSet::diff((true, &style, &layout), (true, &style, &layout));
        assert!(changes.is_empty());
    }

    #[test]
    fn activity_toggle_is_emitted() {
        let style = StyleSheet::new(SpinnerStyleSheet::default());
        let layout = Layout::default();
        let changes = SpinnerChangeSet::diff((false, &style, &layout), (true, &style, &layout));
        assert_eq!(changes.is_active, PropertyChange::Changed(true));
    }
}
