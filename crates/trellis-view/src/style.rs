//! Style sheets for component rendering.
//!
//! Every component carries a [`StyleSheet`] combining the shared
//! [`BaseStyleSheet`] (colors, borders, alpha) with a widget-specific sheet.
//! Style sheets are plain value types; the reconciliation engine diffs them
//! field by field and emits [`BaseStyleChange`] lists so renderers only touch
//! the attributes that actually changed.

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const CLEAR: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Create an opaque color from components in `0.0..=1.0`.
    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Create a color, rejecting alpha values outside `0.0..=1.0`.
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Option<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        Some(Self {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Create an opaque color from 8-bit components.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
        )
    }

    /// Create an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb8(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }
}

/// A font referenced by name; resolution is the renderer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub name: String,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("System")
    }
}

/// How content is scaled to fit its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    ScaleToFill,
    ScaleAspectFit,
    ScaleAspectFill,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    #[default]
    Natural,
}

/// A component style sheet: the shared base attributes plus a
/// widget-specific sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet<ComponentStyleSheet> {
    pub base: BaseStyleSheet,
    pub component: ComponentStyleSheet,
}

impl<C> StyleSheet<C> {
    #[must_use]
    pub fn new(component: C) -> Self
    where
        C: Default,
    {
        Self {
            base: BaseStyleSheet::default(),
            component,
        }
    }

    #[must_use]
    pub fn with_base(component: C, base: BaseStyleSheet) -> Self {
        Self { base, component }
    }
}

/// Style attributes shared by every widget kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyleSheet {
    pub background_color: Color,
    pub corner_radius: Option<f32>,
    pub border_color: Color,
    pub border_width: f32,
    pub alpha: f32,
    pub content_mode: Option<ContentMode>,
}

impl Default for BaseStyleSheet {
    fn default() -> Self {
        Self {
            background_color: Color::CLEAR,
            corner_radius: None,
            border_color: Color::CLEAR,
            border_width: 0.0,
            alpha: 1.0,
            content_mode: None,
        }
    }
}

/// A single changed base-style attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseStyleChange {
    BackgroundColor(Color),
    CornerRadius(Option<f32>),
    BorderColor(Color),
    BorderWidth(f32),
    Alpha(f32),
    ContentMode(Option<ContentMode>),
}

impl BaseStyleSheet {
    /// Diff against a newer sheet, emitting only the attributes that differ.
    #[must_use]
    pub fn change_set(&self, new: &BaseStyleSheet) -> Vec<BaseStyleChange> {
        let mut changes = Vec::new();
        if self.background_color != new.background_color {
            changes.push(BaseStyleChange::BackgroundColor(new.background_color));
        }
        if self.corner_radius != new.corner_radius {
            changes.push(BaseStyleChange::CornerRadius(new.corner_radius));
        }
        if self.border_color != new.border_color {
            changes.push(BaseStyleChange::BorderColor(new.border_color));
        }
        if self.border_width != new.border_width {
            changes.push(BaseStyleChange::BorderWidth(new.border_width));
        }
        if self.alpha != new.alpha {
            changes.push(BaseStyleChange::Alpha(new.alpha));
        }
        if self.content_mode != new.content_mode {
            changes.push(BaseStyleChange::ContentMode(new.content_mode));
        }
        changes
    }

    /// Emit every attribute as changed, for first renders and variant swaps.
    #[must_use]
    pub fn full_change_set(&self) -> Vec<BaseStyleChange> {
        vec![
            BaseStyleChange::BackgroundColor(self.background_color),
            BaseStyleChange::CornerRadius(self.corner_radius),
            BaseStyleChange::BorderColor(self.border_color),
            BaseStyleChange::BorderWidth(self.border_width),
            BaseStyleChange::Alpha(self.alpha),
            BaseStyleChange::ContentMode(self.content_mode),
        ]
    }
}

/// An empty widget-specific sheet for widgets with no extra attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyStyleSheet;

/// Build a base-only style sheet with a configuration closure.
pub fn style_sheet(configure: impl FnOnce(&mut BaseStyleSheet)) -> StyleSheet<EmptyStyleSheet> {
    let mut base = BaseStyleSheet::default();
    configure(&mut base);
    StyleSheet::with_base(EmptyStyleSheet, base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sheets_produce_no_changes() {
        let sheet = BaseStyleSheet::default();
        assert!(sheet.change_set(&sheet.clone()).is_empty());
    }

    #[test]
    fn changed_fields_are_emitted_individually() {
        let old = BaseStyleSheet::default();
        let mut new = BaseStyleSheet::default();
        new.background_color = Color::RED;
        new.alpha = 0.5;

        let changes = old.change_set(&new);
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&BaseStyleChange::BackgroundColor(Color::RED)));
        assert!(changes.contains(&BaseStyleChange::Alpha(0.5)));
    }

    #[test]
    fn full_change_set_emits_every_attribute() {
        let sheet = BaseStyleSheet::default();
        assert_eq!(sheet.full_change_set().len(), 6);
    }

    #[test]
    fn color_from_hex_matches_components() {
        let color = Color::from_hex(0xFF0000);
        assert_eq!(color, Color::RED);
    }

    #[test]
    fn color_rejects_out_of_range_alpha() {
        assert!(Color::new(0.0, 0.0, 0.0, 1.5).is_none());
        assert!(Color::new(0.0, 0.0, 0.0, 0.5).is_some());
    }
}
