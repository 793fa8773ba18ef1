//! Core catalog types for flightfinder.
//!
//! This module defines the records that make up the static dataset: the
//! flight experiences themselves and the airfields shown alongside them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseControlError;

/// Identifier of an experience record. Unique within a dataset.
pub type ExperienceId = u32;

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// The kind of aircraft flown on an experience.
///
/// Labels outside the known set are kept verbatim in [`AircraftType::Other`]
/// so a dataset with a new category still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AircraftType {
    /// Single-engine piston aircraft such as a Cessna or Piper.
    LightAircraft,
    /// Rotary wing.
    Helicopter,
    /// Unpowered or self-launching sailplane.
    Glider,
    /// Flex-wing or three-axis microlight.
    Microlight,
    /// Autogyro.
    Gyroplane,
    /// Purpose-built aerobatic aircraft.
    Aerobatic,
    /// Biplanes and other classic types.
    Vintage,
    /// Military heritage aircraft.
    Warbird,
    /// Any label not listed above.
    Other(String),
}

impl AircraftType {
    /// The dataset/control token for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LightAircraft => "light-aircraft",
            Self::Helicopter => "helicopter",
            Self::Glider => "glider",
            Self::Microlight => "microlight",
            Self::Gyroplane => "gyroplane",
            Self::Aerobatic => "aerobatic",
            Self::Vintage => "vintage",
            Self::Warbird => "warbird",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for AircraftType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "light-aircraft" => Self::LightAircraft,
            "helicopter" => Self::Helicopter,
            "glider" => Self::Glider,
            "microlight" => Self::Microlight,
            "gyroplane" => Self::Gyroplane,
            "aerobatic" => Self::Aerobatic,
            "vintage" => Self::Vintage,
            "warbird" => Self::Warbird,
            _ => Self::Other(label),
        }
    }
}

impl From<AircraftType> for String {
    fn from(kind: AircraftType) -> Self {
        match kind {
            AircraftType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far an experience is from the home airfield by road.
///
/// Variants are declared in increasing order so the derived `Ord` is the
/// ceiling ordering used by the drive-time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DriveCategory {
    /// Less than half an hour.
    #[serde(rename = "under30")]
    Under30,
    /// Less than an hour.
    #[serde(rename = "under1hr")]
    Under1Hr,
    /// Less than two hours.
    #[serde(rename = "under2hr")]
    Under2Hr,
    /// Less than three hours.
    #[serde(rename = "under3hr")]
    Under3Hr,
}

impl DriveCategory {
    /// All categories, nearest first.
    pub const ALL: [Self; 4] = [Self::Under30, Self::Under1Hr, Self::Under2Hr, Self::Under3Hr];

    /// Position of this category on the nearest-first ordering.
    #[must_use]
    pub fn rank(self) -> usize {
        self as usize
    }

    /// The dataset/control token for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Under30 => "under30",
            Self::Under1Hr => "under1hr",
            Self::Under2Hr => "under2hr",
            Self::Under3Hr => "under3hr",
        }
    }
}

impl fmt::Display for DriveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriveCategory {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseControlError::new("drive", s))
    }
}

/// One bookable flight experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceRecord {
    /// Unique identifier.
    pub id: ExperienceId,
    /// Display name.
    pub name: String,
    /// Aircraft model, e.g. "Robinson R44".
    pub aircraft: String,
    /// Aircraft category.
    pub aircraft_type: AircraftType,
    /// Company running the flight.
    #[serde(default)]
    pub operator: String,
    /// Airfield or town the flight departs from.
    #[serde(default)]
    pub location: String,
    /// Departure point.
    pub coordinates: Coordinate,
    /// Price in whole currency units.
    pub price: u32,
    /// Flight time in minutes.
    pub duration: u32,
    /// Price divided by flight time, precomputed in the dataset.
    pub cost_per_min: f64,
    /// Drive from the home airfield in minutes.
    pub drive_time: u32,
    /// Bucketed drive time.
    pub drive_category: DriveCategory,
    /// Whether the flight includes aerobatics.
    #[serde(default)]
    pub has_aerobatics: bool,
    /// Whether the passenger may fly the aircraft.
    #[serde(default)]
    pub can_take_controls: bool,
    /// Landmark tags visible on the route.
    #[serde(default)]
    pub landmarks: Vec<String>,
    /// Landmarks as a human-readable line.
    #[serde(default)]
    pub landmarks_list: String,
    /// When the experience runs.
    #[serde(default)]
    pub availability: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Booking page.
    #[serde(default)]
    pub website: String,
    /// Photo of the aircraft.
    #[serde(default)]
    pub image_url: String,
    /// Attribution for the photo.
    #[serde(default)]
    pub image_credit: String,
}

impl ExperienceRecord {
    /// Check whether the price exceeds the given budget.
    #[must_use]
    pub fn is_over_budget(&self, budget: u32) -> bool {
        self.price > budget
    }

    /// Check whether the landmark tag is on this experience's route.
    #[must_use]
    pub fn has_landmark(&self, tag: &str) -> bool {
        self.landmarks.iter().any(|landmark| landmark == tag)
    }
}

/// A named airfield. Exactly one in a dataset is the home airfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirfieldRecord {
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Whether this is the home airfield.
    #[serde(default)]
    pub is_home: bool,
}

impl AirfieldRecord {
    /// The airfield's position.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}
