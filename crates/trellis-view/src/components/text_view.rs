//! Text view widget: multi-line text, optionally scrollable and editable.

use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, Font, StyleSheet, TextAlignment};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextViewProperties {
    pub text: String,
    pub is_scroll_enabled: bool,
    pub is_editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextViewStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u16,
    pub text_alignment: TextAlignment,
}

impl Default for TextViewStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: 17,
            text_alignment: TextAlignment::Natural,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextViewPropertyChange {
    Text(String),
    IsScrollEnabled(bool),
    IsEditable(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextViewStyleChange {
    TextColor(Color),
    TextFont(Font),
    TextSize(u16),
    TextAlignment(TextAlignment),
}

impl TextViewStyleSheet {
    fn change_set(&self, new: &TextViewStyleSheet) -> Vec<TextViewStyleChange> {
        let mut changes = Vec::new();
        if self.text_color != new.text_color {
            changes.push(TextViewStyleChange::TextColor(new.text_color));
        }
        if self.text_font != new.text_font {
            changes.push(TextViewStyleChange::TextFont(new.text_font.clone()));
        }
        if self.text_size != new.text_size {
            changes.push(TextViewStyleChange::TextSize(new.text_size));
        }
        if self.text_alignment != new.text_alignment {
            changes.push(TextViewStyleChange::TextAlignment(new.text_alignment));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<TextViewStyleChange> {
        vec![
            TextViewStyleChange::TextColor(self.text_color),
            TextViewStyleChange::TextFont(self.text_font.clone()),
            TextViewStyleChange::TextSize(self.text_size),
            TextViewStyleChange::TextAlignment(self.text_alignment),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextViewChangeSet {
    pub properties: Vec<TextViewPropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub text_view_style: Vec<TextViewStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl TextViewChangeSet {
    pub(crate) fn full(
        properties: &TextViewProperties,
        style: &StyleSheet<TextViewStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            properties: vec![
                TextViewPropertyChange::Text(properties.text.clone()),
                TextViewPropertyChange::IsScrollEnabled(properties.is_scroll_enabled),
                TextViewPropertyChange::IsEditable(properties.is_editable),
            ],
            base_style: style.base.full_change_set(),
            text_view_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&TextViewProperties, &StyleSheet<TextViewStyleSheet>, &Layout),
        new: (&TextViewProperties, &StyleSheet<TextViewStyleSheet>, &Layout),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.text != new.0.text {
            properties.push(TextViewPropertyChange::Text(new.0.text.clone()));
        }
        if old.0.is_scroll_enabled != new.0.is_scroll_enabled {
            properties.push(TextViewPropertyChange::IsScrollEnabled(
                new.0.is_scroll_enabled,
            ));
        }
        if old.0.is_editable != new.0.is_editable {
            properties.push(TextViewPropertyChange::IsEditable(new.0.is_editable));
        }
        Self {
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            text_view_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.base_style.is_empty()
            && self.text_view_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Build a text view from explicit properties, style, and layout.
pub fn text_view<MsgT>(
    properties: TextViewProperties,
    style: StyleSheet<TextViewStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::TextView(properties, style, layout)
}
