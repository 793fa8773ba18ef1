//! A map surface with no display.
//!
//! Keeps the state a real widget would show (markers, the open popup, the
//! current view) so it can be printed by the CLI or inspected in tests.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use super::{Bounds, MapSurface, MarkerHandle, MarkerIcon, Popup};
use crate::experience::Coordinate;

/// Background tile layer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    /// Tile URL template.
    pub url_template: String,
    /// Attribution shown on the map.
    pub attribution: String,
}

/// A marker as placed on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    /// Handle returned when the marker was added.
    pub handle: MarkerHandle,
    /// Marker position.
    pub coordinate: Coordinate,
    /// Marker appearance.
    pub icon: MarkerIcon,
    /// Bound popup content.
    pub popup: Popup,
}

/// Records every surface call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    center: Option<Coordinate>,
    zoom: u8,
    tile_layer: Option<TileLayer>,
    markers: BTreeMap<MarkerHandle, PlacedMarker>,
    open_popup: Option<MarkerHandle>,
    fitted: Option<Bounds>,
    fit_padding: Option<u32>,
    fit_count: usize,
    size_invalidations: usize,
    next_handle: u64,
}

impl HeadlessMap {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view centre, once a view has been set.
    #[must_use]
    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// The tile layer, once added.
    #[must_use]
    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layer.as_ref()
    }

    /// Markers currently on the surface, in placement order.
    pub fn markers(&self) -> Vec<&PlacedMarker> {
        self.markers.values().collect()
    }

    /// Look up a placed marker.
    #[must_use]
    pub fn marker(&self, handle: MarkerHandle) -> Option<&PlacedMarker> {
        self.markers.get(&handle)
    }

    /// The marker whose popup is open.
    #[must_use]
    pub fn opened_popup(&self) -> Option<MarkerHandle> {
        self.open_popup
    }

    /// Bounds of the last fit, if any.
    #[must_use]
    pub fn fitted_bounds(&self) -> Option<Bounds> {
        self.fitted
    }

    /// Padding used by the last fit, if any.
    #[must_use]
    pub fn fit_padding(&self) -> Option<u32> {
        self.fit_padding
    }

    /// Number of bounds fits so far.
    #[must_use]
    pub fn fit_count(&self) -> usize {
        self.fit_count
    }

    /// Number of size invalidations so far.
    #[must_use]
    pub fn size_invalidations(&self) -> usize {
        self.size_invalidations
    }
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        self.tile_layer = Some(TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
    }

    fn add_marker(&mut self, at: Coordinate, icon: MarkerIcon, popup: Popup) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(
            handle,
            PlacedMarker {
                handle,
                coordinate: at,
                icon,
                popup,
            },
        );
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_some() && self.open_popup == Some(marker) {
            self.open_popup = None;
        }
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        if self.markers.contains_key(&marker) {
            trace!(%marker, "Popup opened");
            self.open_popup = Some(marker);
        }
    }

    fn close_popup(&mut self, marker: MarkerHandle) {
        if self.open_popup == Some(marker) {
            trace!(%marker, "Popup closed");
            self.open_popup = None;
        }
    }

    fn pan_to(&mut self, at: Coordinate) {
        self.center = Some(at);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: u32) {
        self.center = Some(bounds.center());
        self.fitted = Some(bounds);
        self.fit_padding = Some(padding);
        self.fit_count += 1;
    }

    fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_popup() -> Popup {
        Popup::Group { items: Vec::new() }
    }

    #[test]
    fn test_new_is_blank() {
        let map = HeadlessMap::new();
        assert!(map.center().is_none());
        assert!(map.markers().is_empty());
        assert!(map.opened_popup().is_none());
        assert_eq!(map.fit_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut map = HeadlessMap::new();
        let at = Coordinate::new(50.0, 0.0);
        let a = map.add_marker(at, MarkerIcon::Group { count: 1 }, group_popup());
        let b = map.add_marker(at, MarkerIcon::Group { count: 1 }, group_popup());
        assert_ne!(a, b);
        assert_eq!(map.markers().len(), 2);
    }

    #[test]
    fn test_only_one_popup_open() {
        let mut map = HeadlessMap::new();
        let at = Coordinate::new(50.0, 0.0);
        let a = map.add_marker(at, MarkerIcon::Group { count: 1 }, group_popup());
        let b = map.add_marker(at, MarkerIcon::Group { count: 1 }, group_popup());

        map.open_popup(a);
        map.open_popup(b);
        assert_eq!(map.opened_popup(), Some(b));

        map.close_popup(a);
        assert_eq!(map.opened_popup(), Some(b));
        map.close_popup(b);
        assert!(map.opened_popup().is_none());
    }

    #[test]
    fn test_removing_marker_closes_its_popup() {
        let mut map = HeadlessMap::new();
        let a = map.add_marker(
            Coordinate::new(50.0, 0.0),
            MarkerIcon::Group { count: 1 },
            group_popup(),
        );
        map.open_popup(a);
        map.remove_marker(a);
        assert!(map.opened_popup().is_none());
        assert!(map.marker(a).is_none());

        // Unknown handles are ignored.
        map.remove_marker(a);
        map.open_popup(a);
        assert!(map.opened_popup().is_none());
    }

    #[test]
    fn test_fit_bounds_recenters() {
        let mut map = HeadlessMap::new();
        map.set_view(Coordinate::new(51.15, -0.1), 9);
        let bounds = Bounds::covering([Coordinate::new(50.0, -1.0), Coordinate::new(52.0, 1.0)])
            .unwrap();
        map.fit_bounds(bounds, 50);

        assert_eq!(map.center(), Some(Coordinate::new(51.0, 0.0)));
        assert_eq!(map.fitted_bounds(), Some(bounds));
        assert_eq!(map.fit_padding(), Some(50));
        assert_eq!(map.fit_count(), 1);
        assert_eq!(map.zoom(), 9);
    }
}
