//! Label widget: static single- or multi-line text.

use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, Font, StyleSheet, TextAlignment};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelProperties {
    pub text: String,
    /// Alternative text applied after the first layout pass, for labels whose
    /// final width is only known once solved.
    pub text_after_layout: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u16,
    pub text_alignment: TextAlignment,
    pub adjust_to_fit_width: bool,
    pub number_of_lines: u32,
    pub minimum_scale_factor: f32,
}

impl Default for LabelStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: 17,
            text_alignment: TextAlignment::Natural,
            adjust_to_fit_width: false,
            number_of_lines: 0,
            minimum_scale_factor: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelPropertyChange {
    Text(String),
    TextAfterLayout(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelStyleChange {
    TextColor(Color),
    TextFont(Font),
    TextSize(u16),
    TextAlignment(TextAlignment),
    AdjustToFitWidth(bool),
    NumberOfLines(u32),
    MinimumScaleFactor(f32),
}

impl LabelStyleSheet {
    fn change_set(&self, new: &LabelStyleSheet) -> Vec<LabelStyleChange> {
        let mut changes = Vec::new();
        if self.text_color != new.text_color {
            changes.push(LabelStyleChange::TextColor(new.text_color));
        }
        if self.text_font != new.text_font {
            changes.push(LabelStyleChange::TextFont(new.text_font.clone()));
        }
        if self.text_size != new.text_size {
            changes.push(LabelStyleChange::TextSize(new.text_size));
        }
        if self.text_alignment != new.text_alignment {
            changes.push(LabelStyleChange::TextAlignment(new.text_alignment));
        }
        if self.adjust_to_fit_width != new.adjust_to_fit_width {
            changes.push(LabelStyleChange::AdjustToFitWidth(new.adjust_to_fit_width));
        }
        if self.number_of_lines != new.number_of_lines {
            changes.push(LabelStyleChange::NumberOfLines(new.number_of_lines));
        }
        if self.minimum_scale_factor != new.minimum_scale_factor {
            changes.push(LabelStyleChange::MinimumScaleFactor(
                new.minimum_scale_factor,
            ));
        }
        changes
    }

    fn full_change_set(&self) -> Vec<LabelStyleChange> {
        vec![
            LabelStyleChange::TextColor(self.text_color),
            LabelStyleChange::TextFont(self.text_font.clone()),
            LabelStyleChange::TextSize(self.text_size),
            LabelStyleChange::TextAlignment(self.text_alignment),
            LabelStyleChange::AdjustToFitWidth(self.adjust_to_fit_width),
            LabelStyleChange::NumberOfLines(self.number_of_lines),
            LabelStyleChange::MinimumScaleFactor(self.minimum_scale_factor),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelChangeSet {
    pub properties: Vec<LabelPropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub label_style: Vec<LabelStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl LabelChangeSet {
    pub(crate) fn full(
        properties: &LabelProperties,
        style: &StyleSheet<LabelStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            properties: vec![
                LabelPropertyChange::Text(properties.text.clone()),
                LabelPropertyChange::TextAfterLayout(properties.text_after_layout.clone()),
            ],
            base_style: style.base.full_change_set(),
            label_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&LabelProperties, &StyleSheet<LabelStyleSheet>, &Layout),
        new: (&LabelProperties, &StyleSheet<LabelStyleSheet>, &Layout),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.text != new.0.text {
            properties.push(LabelPropertyChange::Text(new.0.text.clone()));
        }
        if old.0.text_after_layout != new.0.text_after_layout {
            properties.push(LabelPropertyChange::TextAfterLayout(
                new.0.text_after_layout.clone(),
            ));
        }
        Self {
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            label_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.base_style.is_empty()
            && self.label_style.is_empty()
            && self.layout.is_empty()
    }
}

/// Build a label with default styling.
pub fn label<MsgT>(text: impl Into<String>) -> Component<MsgT> {
    Component::Label(
        LabelProperties {
            text: text.into(),
            text_after_layout: None,
        },
        StyleSheet::new(LabelStyleSheet::default()),
        Layout::default(),
    )
}

/// Build a label from explicit properties, style, and layout.
pub fn styled_label<MsgT>(
    properties: LabelProperties,
    style: StyleSheet<LabelStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Label(properties, style, layout)
}
