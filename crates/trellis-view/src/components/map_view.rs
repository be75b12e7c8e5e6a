//! Map view widget: placemarks over a pannable, zoomable map.

use crate::component::Component;
use crate::components::image::Image;
use crate::layout::{Layout, LayoutChange};
use crate::style::{BaseStyleChange, EmptyStyleSheet, StyleSheet};

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A pin on the map, optionally with a custom icon.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPlacemark {
    pub coordinates: Coordinates,
    pub icon: Option<Image>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapProperties {
    pub placemarks: Vec<MapPlacemark>,
    pub center: Option<Coordinates>,
    pub is_zoom_enabled: bool,
    pub zoom_level: f64,
    pub is_scroll_enabled: bool,
}

impl Default for MapProperties {
    fn default() -> Self {
        Self {
            placemarks: Vec::new(),
            center: None,
            is_zoom_enabled: true,
            zoom_level: 1.0,
            is_scroll_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapPropertyChange {
    Placemarks(Vec<MapPlacemark>),
    Center(Option<Coordinates>),
    IsZoomEnabled(bool),
    ZoomLevel(f64),
    IsScrollEnabled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapViewChangeSet {
    pub properties: Vec<MapPropertyChange>,
    pub base_style: Vec<BaseStyleChange>,
    pub layout: Vec<LayoutChange>,
}

impl MapViewChangeSet {
    pub(crate) fn full(
        properties: &MapProperties,
        style: &StyleSheet<EmptyStyleSheet>,
        layout: &Layout,
    ) -> Self {
        Self {
            properties: vec![
                MapPropertyChange::Placemarks(properties.placemarks.clone()),
                MapPropertyChange::Center(properties.center),
                MapPropertyChange::IsZoomEnabled(properties.is_zoom_enabled),
                MapPropertyChange::ZoomLevel(properties.zoom_level),
                MapPropertyChange::IsScrollEnabled(properties.is_scroll_enabled),
            ],
            base_style: style.base.full_change_set(),
            layout: layout.full_change_set(),
        }
    }

    pub(crate) fn diff(
        old: (&MapProperties, &StyleSheet<EmptyStyleSheet>, &Layout),
        new: (&MapProperties, &StyleSheet<EmptyStyleSheet>, &Layout),
    ) -> Self {
        let mut properties = Vec::new();
        if old.0.placemarks != new.0.placemarks {
            properties.push(MapPropertyChange::Placemarks(new.0.placemarks.clone()));
        }
        if old.0.center != new.0.center {
            properties.push(MapPropertyChange::Center(new.0.center));
        }
        if old.0.is_zoom_enabled != new.0.is_zoom_enabled {
            properties.push(MapPropertyChange::IsZoomEnabled(new.0.is_zoom_enabled));
        }
        if old.0.zoom_level != new.0.zoom_level {
            properties.push(MapPropertyChange::ZoomLevel(new.0.zoom_level));
        }
        if old.0.is_scroll_enabled != new.0.is_scroll_enabled {
            properties.push(MapPropertyChange::IsScrollEnabled(new.0.is_scroll_enabled));
        }
        Self {
            properties,
            base_style: old.1.base.change_set(&new.1.base),
            layout: old.2.change_set(new.2),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.base_style.is_empty() && self.layout.is_empty()
    }
}

/// Build a map view from explicit properties, style, and layout.
pub fn map_view<MsgT>(
    properties: MapProperties,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<MsgT> {
    Component::MapView(properties, style, layout)
}
