//! Table widget: a vertically scrolling list of row items.
//!
//! Rows carry a renderer closure that materializes the row's component tree
//! lazily, given the height the table allots to it. Renderers cannot be
//! compared, so the item list is re-supplied on every render and excluded
//! from the emptiness check.

use std::sync::Arc;

use crate::component::Component;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, Color, StyleSheet};

/// Highlight treatment applied to a row while it is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableItemSelectionStyle {
    None,
    #[default]
    Default,
    Blue,
    Gray,
}

/// The materialized content of a row.
pub struct TableItemRender<MsgT> {
    pub component: Component<MsgT>,
    /// Reuse-pool key: rows with the same identifier may recycle each
    /// other's native views.
    pub type_identifier: String,
}

pub type TableItemRenderer<MsgT> = Arc<dyn Fn(u32) -> TableItemRender<MsgT> + Send + Sync>;

#[derive(Clone)]
pub struct TableItemProperties<MsgT> {
    pub height: u32,
    pub on_tap: Option<MsgT>,
    pub selection_style: TableItemSelectionStyle,
    pub renderer: TableItemRenderer<MsgT>,
}

impl<MsgT> std::fmt::Debug for TableItemProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableItemProperties")
            .field("height", &self.height)
            .field("selection_style", &self.selection_style)
            .field("renderer", &"<renderer>")
            .finish()
    }
}

#[derive(Clone)]
pub struct TableProperties<MsgT> {
    pub items: Vec<TableItemProperties<MsgT>>,
    pub shows_vertical_scroll_indicator: bool,
    pub shows_horizontal_scroll_indicator: bool,
}

impl<MsgT> Default for TableProperties<MsgT> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            shows_vertical_scroll_indicator: true,
            shows_horizontal_scroll_indicator: true,
        }
    }
}

impl<MsgT> std::fmt::Debug for TableProperties<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableProperties")
            .field("items", &format_args!("<{} items>", self.items.len()))
            .field(
                "shows_vertical_scroll_indicator",
                &self.shows_vertical_scroll_indicator,
            )
            .field(
                "shows_horizontal_scroll_indicator",
                &self.shows_horizontal_scroll_indicator,
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyleSheet {
    pub separator_color: Option<Color>,
}

impl Default for TableStyleSheet {
    fn default() -> Self {
        Self {
            separator_color: Some(Color::GRAY),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TablePropertyChange {
    ShowsVerticalScrollIndicator(bool),
    ShowsHorizontalScrollIndicator(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableStyleChange {
    SeparatorColor(Option<Color>),
}

impl TableStyleSheet {
    fn change_set(&self, new: &TableStyleSheet) -> Vec<TableStyleChange> {
        if self.separator_color == new.separator_color {
            Vec::new()
        } else {
            vec![TableStyleChange::SeparatorColor(new.separator_color)]
        }
    }

    fn full_change_set(&self) -> Vec<TableStyleChange> {
        vec![TableStyleChange::SeparatorColor(self.separator_color)]
    }
}

pub struct TableChangeSet<MsgT> {
    pub items: Vec<TableItemProperties<MsgT>>,
    pub properties: Vec<TablePropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub table_style: Vec<TableStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl<MsgT: Clone> TableChangeSet<MsgT> {
    pub(crate) fn full(
        properties: &TableProperties<MsgT>,
        style: &StyleSheet<TableStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            items: properties.items.clone(),
            properties: vec![
                TablePropertyChange::ShowsVerticalScrollIndicator(
                    properties.shows_vertical_scroll_indicator,
                ),
                TablePropertyChange::ShowsHorizontalScrollIndicator(
                    properties.shows_horizontal_scroll_indicator,
                ),
            ],
            base_style: style.base.full_change_set(),
            table_style: style.component.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&TableProperties<MsgT>, &StyleSheet<TableStyleSheet>, &Layout),
        new: (&TableProperties<MsgT>, &StyleSheet<TableStyleSheet>, &Layout),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.shows_vertical_scroll_indicator != new.0.shows_vertical_scroll_indicator {
            properties.push(TablePropertyChange::ShowsVerticalScrollIndicator(
                new.0.shows_vertical_scroll_indicator,
            ));
        }
        if old.0.shows_horizontal_scroll_indicator != new.0.shows_horizontal_scroll_indicator {
            properties.push(TablePropertyChange::ShowsHorizontalScrollIndicator(
                new.0.shows_horizontal_scroll_indicator,
            ));
        }
        Self {
            items: new.0.items.clone(),
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            table_style: old.1.component.change_set(&new.1.component),
            layout: old.2.change_set(new.2),
        }
    }

    /// True when no visible attribute changed. Items are always re-supplied
    /// and do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.base_style.is_empty()
            && self.table_style.is_empty()
            && self.layout.is_empty()
    }
}

impl<MsgT> std::fmt::Debug for TableChangeSet<MsgT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableChangeSet")
            .field("items", &format_args!("<{} items>", self.items.len()))
            .field("properties", &self.properties)
            .field("base_style", &self.base_style)
            .field("table_style", &self.table_style)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Build a table from explicit properties, style, and layout.
pub fn table<MsgT>(
    properties: TableProperties<MsgT>,
    style: StyleSheet<TableStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::Table(properties, style, layout)
}
