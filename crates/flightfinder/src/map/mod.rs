//! Map projection of the visible experiences.
//!
//! The map widget itself lives outside this crate. It is reached through the
//! [`MapSurface`] trait, which only needs the handful of primitives a
//! slippy-map library provides: a view, a tile layer, markers with popups,
//! panning and bounds fitting.
//!
//! [`MarkerLayer`] groups the visible records by coordinate and owns the
//! markers it places. [`HeadlessMap`] is a surface that simply records what
//! was asked of it.

mod headless;
mod layer;

use std::fmt;

use serde::Serialize;

use crate::experience::{Coordinate, ExperienceId};

pub use headless::{HeadlessMap, PlacedMarker, TileLayer};
pub use layer::{GroupKey, MarkerGroup, MarkerLayer};

/// Opaque handle to a marker placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marker appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MarkerIcon {
    /// The home airfield.
    Home,
    /// One or more experiences at the same spot.
    Group {
        /// Number of experiences in the group.
        count: usize,
    },
}

impl MarkerIcon {
    /// Text drawn inside the marker.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Home => "🏠".to_string(),
            Self::Group { count } if *count > 1 => count.to_string(),
            Self::Group { .. } => "✈".to_string(),
        }
    }

    /// Edge length of the square icon in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        match self {
            Self::Home => 32,
            Self::Group { .. } => 24,
        }
    }

    /// CSS class of the inner marker element.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Home => "home-marker",
            Self::Group { .. } => "airfield-marker",
        }
    }
}

/// One experience listed in a marker popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupItem {
    /// Experience id, used to highlight its card on click.
    pub id: ExperienceId,
    /// Experience name.
    pub name: String,
    /// Price in whole currency units.
    pub price: u32,
    /// Flight time in minutes.
    pub duration: u32,
}

/// Popup content bound to a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Popup {
    /// The home airfield's popup.
    Home {
        /// Airfield name.
        name: String,
    },
    /// Every experience sharing the marker, separated visually.
    Group {
        /// Listed experiences, in visible order.
        items: Vec<PopupItem>,
    },
}

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Southern edge.
    pub south: f64,
    /// Western edge.
    pub west: f64,
    /// Northern edge.
    pub north: f64,
    /// Eastern edge.
    pub east: f64,
}

impl Bounds {
    /// Degenerate bounds covering a single point.
    #[must_use]
    pub fn from_point(point: Coordinate) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    /// Smallest bounds covering every point, or `None` if there are none.
    #[must_use]
    pub fn covering(points: impl IntoIterator<Item = Coordinate>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |bounds, point| bounds.extended(point)))
    }

    /// These bounds grown to include `point`.
    #[must_use]
    pub fn extended(self, point: Coordinate) -> Self {
        Self {
            south: self.south.min(point.lat),
            west: self.west.min(point.lng),
            north: self.north.max(point.lat),
            east: self.east.max(point.lng),
        }
    }

    /// Check whether `point` lies within the bounds, edges included.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }

    /// Midpoint of the bounds.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// The map widget, as seen by the browser.
///
/// Implementors wrap a concrete map library. Handles returned from
/// [`MapSurface::add_marker`] stay valid until passed to
/// [`MapSurface::remove_marker`].
pub trait MapSurface {
    /// Centre the view on `center` at `zoom`.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Add the background tile layer.
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);

    /// Place a marker and bind its popup.
    fn add_marker(&mut self, at: Coordinate, icon: MarkerIcon, popup: Popup) -> MarkerHandle;

    /// Remove a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Open a marker's popup, closing any other open popup.
    fn open_popup(&mut self, marker: MarkerHandle);

    /// Close a marker's popup if it is open.
    fn close_popup(&mut self, marker: MarkerHandle);

    /// Pan the view to `at`, keeping the zoom.
    fn pan_to(&mut self, at: Coordinate);

    /// Fit the view to `bounds`, leaving `padding` pixels on every side.
    fn fit_bounds(&mut self, bounds: Bounds, padding: u32);

    /// Recompute the widget's cached container size.
    fn invalidate_size(&mut self);
}
