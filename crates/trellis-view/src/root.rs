//! Root presentation chrome: what wraps a view's component tree.

use crate::component::Component;
use crate::components::image::Image;
use crate::style::{BaseStyleSheet, Color, Font, StyleSheet};

/// The outermost presentation shape of a rendered view.
#[derive(Debug, Clone)]
pub enum RootComponent<MsgT> {
    Simple,
    Stack(NavigationBar<MsgT>),
    Tab(TabBar<MsgT>),
}

/// What the navigation bar shows as its title.
#[derive(Debug, Clone)]
pub enum NavigationBarTitle<MsgT> {
    Text(String),
    Image(Image),
    Component(Component<MsgT>),
}

/// A tappable navigation bar item.
#[derive(Debug, Clone)]
pub enum NavigationBarButton<MsgT> {
    Text { title: String, on_tap: MsgT },
    Image { icon: Image, on_tap: MsgT },
}

#[derive(Debug, Clone)]
pub struct NavigationBarProperties<MsgT> {
    pub title: Option<NavigationBarTitle<MsgT>>,
    pub hide_back_button_title: bool,
    pub on_back: Option<MsgT>,
    pub left_button_items: Vec<NavigationBarButton<MsgT>>,
    pub right_button_items: Vec<NavigationBarButton<MsgT>>,
}

impl<MsgT> Default for NavigationBarProperties<MsgT> {
    fn default() -> Self {
        Self {
            title: None,
            hide_back_button_title: false,
            on_back: None,
            left_button_items: Vec::new(),
            right_button_items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationBarStyleSheet {
    pub tint_color: Color,
    pub title_text_color: Color,
    pub title_text_font: Font,
    pub title_text_size: u16,
    pub is_translucent: bool,
}

impl Default for NavigationBarStyleSheet {
    fn default() -> Self {
        Self {
            tint_color: Color::BLACK,
            title_text_color: Color::BLACK,
            title_text_font: Font::default(),
            title_text_size: 17,
            is_translucent: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationBar<MsgT> {
    pub properties: NavigationBarProperties<MsgT>,
    pub style: StyleSheet<NavigationBarStyleSheet>,
}

/// Build a navigation bar with a text title and a back message.
pub fn navigation_bar<MsgT>(title: impl Into<String>, on_back: MsgT) -> NavigationBar<MsgT> {
    NavigationBar {
        properties: NavigationBarProperties {
            title: Some(NavigationBarTitle::Text(title.into())),
            on_back: Some(on_back),
            ..NavigationBarProperties::default()
        },
        style: StyleSheet::new(NavigationBarStyleSheet::default()),
    }
}

/// Build a navigation bar from explicit properties.
pub fn styled_navigation_bar<MsgT>(
    properties: NavigationBarProperties<MsgT>,
    base: BaseStyleSheet,
    style: NavigationBarStyleSheet,
) -> NavigationBar<MsgT> {
    NavigationBar {
        properties,
        style: StyleSheet::with_base(style, base),
    }
}

/// One selectable tab.
#[derive(Debug, Clone)]
pub struct TabBarItem<MsgT> {
    pub title: Option<String>,
    pub icon: Option<Image>,
    pub on_tap: Option<MsgT>,
}

#[derive(Debug, Clone)]
pub struct TabBar<MsgT> {
    pub items: Vec<TabBarItem<MsgT>>,
}
