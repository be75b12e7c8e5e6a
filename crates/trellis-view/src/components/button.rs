//! Button widget: tappable control with text and/or icon.

use crate::changeset::PropertyChange;
use crate::component::Component;
use crate::components::image::Image;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, Font, StyleSheet};

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonProperties<MsgT> {
    pub text: Option<String>,
    pub is_active: bool,
    pub icon: Option<Image>,
    pub on_tap: Option<MsgT>,
}

impl<MsgT> Default for ButtonProperties<MsgT> {
    fn default() -> Self {
        Self {
            text: None,
            is_active: false,
            icon: None,
            on_tap: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u16,
}

impl Default for ButtonStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: 17,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonPropertyChange {
    Text(Option<String>),
    IsActive(bool),
    Icon(Option<Image>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonStyleChange {
    TextColor(Color),
    TextFont(Font),
    TextSize(u16),
}

impl ButtonStyleSheet {
    fn change_set(&self, new: &ButtonStyleSheet) -> Vec<ButtonStyleChange> {
        let mut changes = Vec::new();
        if self.text_color != new.text_color {
            changes.push(ButtonStyleChange::TextColor(new.text_color));
        }
        if self.text_font != new.text_font {
            changes.push(ButtonStyleChange::TextFont(new.text_font.clone()));
        }
        if self.text_size != new.text_size {
            changes.push(ButtonStyleChange::TextSize(new.text_size));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<ButtonStyleChange> {
        vec![
            ButtonStyleChange::TextColor(self.text_color),
            ButtonStyleChange::TextFont(self.text_font.clone()),
            ButtonStyleChange::TextSize(self.text_size),
        ]
    }
}

/// Change set for a button node.
///
/// `on_tap` is re-supplied on every render; the emptiness check ignores it
/// so that diffing identical trees still reports no visual work.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonChangeSet<MsgT> {
    pub properties: Vec<ButtonPropertyChange>,
    pub on_tap: PropertyChange<Option<MsgT>>,
    pub base_style: Vec<BaseStyleChange>,
    pub button_style: Vec<ButtonStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> ButtonChangeSet<MsgT> {
    pub(crate) fn full(
        properties: &ButtonProperties<MsgT>,
        style: &StyleSheet<ButtonStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            properties: vec![
                ButtonPropertyChange::Text(properties.text.clone()),
                ButtonPropertyChange::IsActive(properties.is_active),
                ButtonPropertyChange::Icon(properties.icon.clone()),
            ],
            on_tap: PropertyChange::Changed(properties.on_tap.clone()),
            base_style: style.base.full_change_set(),
            button_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&ButtonProperties<MsgT>, &StyleSheet<ButtonStyleSheet>, &Layout),
        new: (&ButtonProperties<MsgT>, &StyleSheet<ButtonStyleSheet>, &Layout),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.text != new.0.text {
            properties.push(ButtonPropertyChange::Text(new.0.text.clone()));
        }
        if old.0.is_active != new.0.is_active {
            properties.push(ButtonPropertyChange::IsActive(new.0.is_active));
        }
        if old.0.icon != new.0.icon {
            properties.push(ButtonPropertyChange::Icon(new.0.icon.clone()));
        }
        Self {
            properties,
            on_tap: PropertyChange::Changed(new.0.on_tap.clone()),
            base_style: old.1.base.change_set(&new.1.base),
            button_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.base_style.is_empty()
            && self.button_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Build a button with text and a tap message.
pub fn button<MsgT>(text: impl Into<String>, on_tap: MsgT) -> Component<MsgT> {
    Component::Button(
        ButtonProperties {
            text: Some(text.into()),
            on_tap: Some(on_tap),
            ..ButtonProperties::default()
        },
        StyleSheet::new(ButtonStyleSheet::default()),
        Layout::default(),
    )
}

/// Build a button from explicit properties, style, and layout.
pub fn styled_button<MsgT>(
    properties: ButtonProperties<MsgT>,
    style: StyleSheet<ButtonStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Button(properties, style, layout)
}
