//! Layout attributes attached to component nodes.
//!
//! These describe box-model constraints in flexbox terms. Solving them into
//! concrete frames is the layout engine's job, which lives behind the
//! renderer; the core only carries the attributes and diffs them.

/// Main-axis direction of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignSelf {
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
    SpaceAround,
}

/// Layout direction for locales with right-to-left scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Inherit,
    LeftToRight,
    RightToLeft,
}

/// Per-edge values for margins, paddings, and absolute positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edge {
    pub left: Option<u32>,
    pub top: Option<u32>,
    pub right: Option<u32>,
    pub bottom: Option<u32>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub horizontal: Option<u32>,
    pub vertical: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Margin {
    All(u32),
    By(Edge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    All(u32),
    By(Edge),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute(Edge),
}

/// A non-negative flex factor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlexValue(f64);

impl FlexValue {
    pub const ZERO: FlexValue = FlexValue(0.0);
    pub const ONE: FlexValue = FlexValue(1.0);

    pub fn new(value: f64) -> Option<Self> {
        if value >= 0.0 { Some(Self(value)) } else { None }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Flex behavior of a node inside its container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flex {
    pub direction: FlexDirection,
    pub grow: FlexValue,
    pub shrink: FlexValue,
    pub wrap: FlexWrap,
    pub basis: Option<u32>,
}

/// Cross-axis alignment bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alignment {
    pub content: AlignContent,
    pub align_self: Option<AlignSelf>,
    pub items: AlignItems,
}

/// A dimension constraint with optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    pub value: Option<u32>,
    pub minimum: Option<u32>,
    pub maximum: Option<u32>,
}

impl Dimension {
    #[must_use]
    pub fn exactly(value: u32) -> Self {
        Self {
            value: Some(value),
            minimum: None,
            maximum: None,
        }
    }
}

/// The full set of layout attributes carried by a component node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub flex: Flex,
    pub justify_content: JustifyContent,
    pub alignment: Alignment,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub aspect_ratio: Option<f64>,
    pub margin: Option<Margin>,
    pub padding: Option<Padding>,
    pub position: Position,
    pub direction: Direction,
}

/// A single changed layout attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutChange {
    Flex(Flex),
    JustifyContent(JustifyContent),
    Alignment(Alignment),
    Width(Option<Dimension>),
    Height(Option<Dimension>),
    AspectRatio(Option<f64>),
    Margin(Option<Margin>),
    Padding(Option<Padding>),
    Position(Position),
    Direction(Direction),
}

impl Layout {
    /// Diff against a newer layout, emitting only the attributes that differ.
    #[must_use]
    pub fn change_set(&self, new: &Layout) -> Vec<LayoutChange> {
        let mut changes = Vec::new();
        if self.flex != new.flex {
            changes.push(LayoutChange::Flex(new.flex.clone()));
        }
        if self.justify_content != new.justify_content {
            changes.push(LayoutChange::JustifyContent(new.justify_content));
        }
        if self.alignment != new.alignment {
            changes.push(LayoutChange::Alignment(new.alignment.clone()));
        }
        if self.width != new.width {
            changes.push(LayoutChange::Width(new.width));
        }
        if self.height != new.height {
            changes.push(LayoutChange::Height(new.height));
        }
        if self.aspect_ratio != new.aspect_ratio {
            changes.push(LayoutChange::AspectRatio(new.aspect_ratio));
        }
        if self.margin != new.margin {
            changes.push(LayoutChange::Margin(new.margin));
        }
        if self.padding != new.padding {
            changes.push(LayoutChange::Padding(new.padding));
        }
        if self.position != new.position {
            changes.push(LayoutChange::Position(new.position));
        }
        if self.direction != new.direction {
            changes.push(LayoutChange::Direction(new.direction));
        }
        changes
    }

    /// Emit every attribute as changed.
    #[must_use]
    pub fn full_change_set(&self) -> Vec<LayoutChange> {
        vec![
            LayoutChange::Flex(self.flex.clone()),
            LayoutChange::JustifyContent(self.justify_content),
            LayoutChange::Alignment(self.alignment.clone()),
            LayoutChange::Width(self.width),
            LayoutChange::Height(self.height),
            LayoutChange::AspectRatio(self.aspect_ratio),
            LayoutChange::Margin(self.margin),
            LayoutChange::Padding(self.padding),
            LayoutChange::Position(self.position),
            LayoutChange::Direction(self.direction),
        ]
    }
}

/// Build a layout with a configuration closure.
pub fn layout(configure: impl FnOnce(&mut Layout)) -> Layout {
    let mut layout = Layout::default();
    configure(&mut layout);
    layout
}
