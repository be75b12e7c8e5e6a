//! Segmented control: a row of segments with exactly one selected.
//!
//! Segments live in a [`ZipList`](crate::ziplist::ZipList) so the selected
//! segment is part of the type, not a separate index that could drift out of
//! bounds. Segments carry tap messages, so the segment list is re-supplied on
//! every render and excluded from the emptiness check.

use crate::component::Component;
use crate::components::image::Image;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, Font, StyleSheet};
use crate::ziplist::ZipList;

/// What a segment displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentContentType {
    Title(String),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentProperties<MsgT> {
    pub content: SegmentContentType,
    pub on_tap: Option<MsgT>,
    pub is_enabled: bool,
}

impl<MsgT> SegmentProperties<MsgT> {
    pub fn title(title: impl Into<String>, on_tap: MsgT) -> Self {
        Self {
            content: SegmentContentType::Title(title.into()),
            on_tap: Some(on_tap),
            is_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedStyleSheet {
    pub text_font: Font,
    pub text_size: u16,
    pub text_color: Color,
    pub border_color: Color,
}

impl Default for SegmentedStyleSheet {
    fn default() -> Self {
        Self {
            text_font: Font::default(),
            text_size: 13,
            text_color: Color::BLACK,
            border_color: Color::BLUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentedStyleChange {
    TextFont(Font),
    TextSize(u16),
    TextColor(Color),
    BorderColor(Color),
}

impl SegmentedStyleSheet {
    fn change_set(&self, new: &SegmentedStyleSheet) -> Vec<SegmentedStyleChange> {
        let mut changes = Vec::new();
        if self.text_font != new.text_font {
            changes.push(SegmentedStyleChange::TextFont(new.text_font.clone()));
        }
        if self.text_size != new.text_size {
            changes.push(SegmentedStyleChange::TextSize(new.text_size));
        }
        if self.text_color != new.text_color {
            changes.push(SegmentedStyleChange::TextColor(new.text_color));
        }
        if self.border_color != new.border_color {
            changes.push(SegmentedStyleChange::BorderColor(new.border_color));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<SegmentedStyleChange> {
        vec![
            SegmentedStyleChange::TextFont(self.text_font.clone()),
            SegmentedStyleChange::TextSize(self.text_size),
            SegmentedStyleChange::TextColor(self.text_color),
            SegmentedStyleChange::BorderColor(self.border_color),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct SegmentedChangeSet<MsgT> {
    pub segments: ZipList<SegmentProperties<MsgT>>,
    pub base_style: Vec<BaseStyleChange>,
    pub segmented_style: Vec<SegmentedStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> SegmentedChangeSet<MsgT> {
    pub(crate) fn full(
        segments: &ZipList<SegmentProperties<MsgT>>,
        style: &StyleSheet<SegmentedStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            segments: segments.clone(),
            base_style: style.base.full_change_set(),
            segmented_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (
            &ZipList<SegmentProperties<MsgT>>,
            &StyleSheet<SegmentedStyleSheet>,
            &Layout,
        ),
        new: (
            &ZipList<SegmentProperties<MsgT>>,
            &StyleSheet<SegmentedStyleSheet>,
            &Layout,
        ),
    ) -> Self {
        Self {
            segments: new.0.clone(),
            base_style: old.1.base.change_set(&new.1.base),
            segmented_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    /// True when no visible attribute changed. Segments are always
    /// re-supplied and do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_style.is_empty() && self.segmented_style.is_empty() && self.layout.is_empty()
    }
}

/// Build a segmented control from explicit segments, style, and layout.
pub fn segmented<MsgT>(
    segments: ZipList<SegmentProperties<MsgT>>,
    style: StyleSheet<SegmentedStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Segmented(segments, style, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> ZipList<SegmentProperties<u32>> {
        ZipList::new(
            vec![SegmentProperties::title("One", 1)],
            SegmentProperties::title("Two", 2),
            vec![SegmentProperties::title("Three", 3)],
        )
    }

    #[test]
    fn self_diff_is_empty_but_segments_carry_over() {
        let segs = segments();
        let style = StyleSheet::new(SegmentedStyleSheet::default());
        let layout = Layout::default();

        let changes =
            SegmentedChangeSet::diff((&segs, &style, &layout), (&segs, &style, &layout));
        assert!(changes.is_empty());
        assert_eq!(changes.segments.len(), 3);
        assert_eq!(changes.segments.center_index(), 1);
    }

    #[test]
    fn style_change_is_detected() {
        let segs = segments();
        let old_style = StyleSheet::new(SegmentedStyleSheet::default());
        let mut new_style = old_style.clone();
        new_style.component.text_color = Color::WHITE;
        let layout = Layout::default();

        let changes =
            SegmentedChangeSet::diff((&segs, &old_style, &layout), (&segs, &new_style, &layout));
        assert_eq!(
            changes.segmented_style,
            vec![SegmentedStyleChange::TextColor(Color::WHITE)]
        );
        assert!(!changes.is_empty());
    }
}
