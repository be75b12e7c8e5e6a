//! Text field widget: editable single-line text input.

use std::sync::Arc;

use crate::changeset::PropertyChange;
use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, Font, StyleSheet, TextAlignment};

/// Editing lifecycle events a text field can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFieldEvent {
    EditingBegan(String),
    EditingChanged(String),
    EditingEnded(String),
}

/// Maps editing events to application messages. Events the application does
/// not care about map to `None`.
pub type TextFieldEventMap<MsgT> = Arc<dyn Fn(TextFieldEvent) -> Option<MsgT> + Send + Sync>;

#[derive(Clone)]
pub struct TextFieldProperties<MsgT> {
    pub text: Option<String>,
    pub placeholder: Option<String>,
    pub is_secure: bool,
    pub should_return: bool,
    pub on_events: TextFieldEventMap<MsgT>,
}

impl<MsgT> Default for TextFieldProperties<MsgT> {
    fn default() -> Self {
        Self {
            text: None,
            placeholder: None,
            is_secure: false,
            should_return: false,
            on_events: Arc::new(|_| None),
        }
    }
}

impl<MsgT> std::fmt::Debug for TextFieldProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFieldProperties")
            .field("text", &self.text)
            .field("placeholder", &self.placeholder)
            .field("is_secure", &self.is_secure)
            .field("should_return", &self.should_return)
            .field("on_events", &"<event map>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u16,
    pub text_alignment: TextAlignment,
}

impl Default for TextFieldStyleSheet {
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
pub enum TextFieldPropertyChange {
    Text(Option<String>),
    Placeholder(Option<String>),
    IsSecure(bool),
    ShouldReturn(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextFieldStyleChange {
    TextColor(Color),
    TextFont(Font),
    TextSize(u16),
    TextAlignment(TextAlignment),
}

impl TextFieldStyleSheet {
    fn change_set(&self, new: &TextFieldStyleSheet) -> Vec<TextFieldStyleChange> {
        let mut changes = Vec::new();
        if self.text_color != new.text_color {
            changes.push(TextFieldStyleChange::TextColor(new.text_color));
        }
        if self.text_font != new.text_font {
            changes.push(TextFieldStyleChange::TextFont(new.text_font.clone()));
        }
        if self.text_size != new.text_size {
            changes.push(TextFieldStyleChange::TextSize(new.text_size));
        }
        if self.text_alignment != new.text_alignment {
            changes.push(TextFieldStyleChange::TextAlignment(new.text_alignment));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<TextFieldStyleChange> {
        vec![
            TextFieldStyleChange::TextColor(self.text_color),
            TextFieldStyleChange::TextFont(self.text_font.clone()),
            TextFieldStyleChange::TextSize(self.text_size),
            TextFieldStyleChange::TextAlignment(self.text_alignment),
        ]
    }
}

/// Change set for a text field node.
///
/// The event map is a closure and cannot be compared; it is re-supplied on
/// every render and ignored by the emptiness check.
#[derive(Clone)]
pub struct TextFieldChangeSet<MsgT> {
    pub properties: Vec<TextFieldPropertyChange>,
    pub on_events: PropertyChange<TextFieldEventMap<MsgT>>,
    pub base_style: Vec<BaseStyleChange>,
    pub text_field_style: Vec<TextFieldStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT> TextFieldChangeSet<MsgT> {
    pub(crate) fn full(
        properties: &TextFieldProperties<MsgT>,
        style: &StyleSheet<TextFieldStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            properties: vec![
                TextFieldPropertyChange::Text(properties.text.clone()),
                TextFieldPropertyChange::Placeholder(properties.placeholder.clone()),
                TextFieldPropertyChange::IsSecure(properties.is_secure),
                TextFieldPropertyChange::ShouldReturn(properties.should_return),
            ],
            on_events: PropertyChange::Changed(Arc::clone(&properties.on_events)),
            base_style: style.base.full_change_set(),
            text_field_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (
            &TextFieldProperties<MsgT>,
            &StyleSheet<TextFieldStyleSheet>,
            &Layout,
        ),
        new: (
            &TextFieldProperties<MsgT>,
            &StyleSheet<TextFieldStyleSheet>,
            &Layout,
        ),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.text != new.0.text {
            properties.push(TextFieldPropertyChange::Text(new.0.text.clone()));
        }
        if old.0.placeholder != new.0.placeholder {
            properties.push(TextFieldPropertyChange::Placeholder(
                new.0.placeholder.clone(),
            ));
        }
        if old.0.is_secure != new.0.is_secure {
            properties.push(TextFieldPropertyChange::IsSecure(new.0.is_secure));
        }
        if old.0.should_return != new.0.should_return {
            properties.push(TextFieldPropertyChange::ShouldReturn(new.0.should_return));
        }
        Self {
            properties,
            on_events: PropertyChange::Changed(Arc::clone(&new.0.on_events)),
            base_style: old.1.base.change_set(&new.1.base),
            text_field_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.base_style.is_empty()
            && self.text_field_style.is_empty()
            && self.layout.is_empty()
    }
}

impl<MsgT> std::fmt::Debug for TextFieldChangeSet<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFieldChangeSet")
            .field("properties", &self.properties)
            .field("base_style", &self.base_style)
            .field("text_field_style", &self.text_field_style)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Build a text field from explicit properties, style, and layout.
pub fn text_field<MsgT>(
    properties: TextFieldProperties<MsgT>,
    style: StyleSheet<TextFieldStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::TextField(properties, style, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_diff_ignores_event_map() {
        let props = TextFieldProperties::<u32> {
            text: Some("abc".into()),
            ..TextFieldProperties::default()
        };
        let style = StyleSheet::new(TextFieldStyleSheet::default());
        let layout = Layout::default();

        let changes = TextFieldChangeSet::diff((&props, &style, &layout), (&props, &style, &layout));
        assert!(changes.is_empty());
        assert!(matches!(changes.on_events, PropertyChange::Changed(_)));
    }

    #[test]
    fn secure_toggle_is_detected() {
        let old = TextFieldProperties::<u32>::default();
        let new = TextFieldProperties::<u32> {
            is_secure: true,
            ..TextFieldProperties::default()
        };
        let style = StyleSheet::new(TextFieldStyleSheet::default());
        let layout = Layout::default();

        let changes = TextFieldChangeSet::diff((&old, &style, &layout), (&new, &style, &layout));
        assert_eq!(
            changes.properties,
            vec![TextFieldPropertyChange::IsSecure(true)]
        );
    }
}
