//! The static catalog loaded at startup.
//!
//! A [`Dataset`] is read once from a JSON document with two top-level
//! collections, `experiences` and `airfields`, and is read-only afterwards.
//! No schema validation is performed beyond what deserialization implies.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::experience::{AirfieldRecord, ExperienceId, ExperienceRecord};

/// Immutable experience and airfield records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    experiences: Vec<ExperienceRecord>,
    #[serde(default)]
    airfields: Vec<AirfieldRecord>,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    #[must_use]
    pub fn new(experiences: Vec<ExperienceRecord>, airfields: Vec<AirfieldRecord>) -> Self {
        let dataset = Self {
            experiences,
            airfields,
        };
        dataset.check_home();
        dataset
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// experiences document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());

        let raw = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Self = serde_json::from_str(&raw).map_err(|source| Error::DatasetParse {
            path: path.to_path_buf(),
            source,
        })?;
        dataset.check_home();

        info!(
            experiences = dataset.experiences.len(),
            airfields = dataset.airfields.len(),
            "Dataset loaded from {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid experiences document.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.check_home();
        Ok(dataset)
    }

    /// All experiences in dataset order.
    #[must_use]
    pub fn experiences(&self) -> &[ExperienceRecord] {
        &self.experiences
    }

    /// All airfields in dataset order.
    #[must_use]
    pub fn airfields(&self) -> &[AirfieldRecord] {
        &self.airfields
    }

    /// Look up an experience by id.
    #[must_use]
    pub fn experience(&self, id: ExperienceId) -> Option<&ExperienceRecord> {
        self.experiences.iter().find(|exp| exp.id == id)
    }

    /// The home airfield, if the dataset has one.
    #[must_use]
    pub fn home(&self) -> Option<&AirfieldRecord> {
        self.airfields.iter().find(|airfield| airfield.is_home)
    }

    /// Every distinct landmark tag, in first-seen order.
    #[must_use]
    pub fn landmark_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.experiences.iter().flat_map(|exp| &exp.landmarks) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }

    /// Number of experiences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    /// Check if the dataset has no experiences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }

    fn check_home(&self) {
        let homes = self.airfields.iter().filter(|a| a.is_home).count();
        if homes != 1 {
            warn!(homes, "Dataset should have exactly one home airfield");
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small hand-built catalog shared by the unit tests.

    use super::Dataset;
    use crate::experience::{
        AircraftType, AirfieldRecord, Coordinate, DriveCategory, ExperienceRecord,
    };

    pub const SHOREHAM: Coordinate = Coordinate::new(50.8356, -0.2972);
    pub const GOODWOOD: Coordinate = Coordinate::new(50.8594, -0.7592);
    pub const HOME: Coordinate = Coordinate::new(50.8225, -0.1372);

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        id: u32,
        price: u32,
        duration: u32,
        drive_time: u32,
        drive_category: DriveCategory,
        aircraft_type: AircraftType,
        has_aerobatics: bool,
        coordinates: Coordinate,
        landmarks: &[&str],
    ) -> ExperienceRecord {
        ExperienceRecord {
            id,
            name: format!("Experience {id}"),
            aircraft: format!("Aircraft {id}"),
            aircraft_type,
            operator: format!("Operator {id}"),
            location: "Sussex".to_string(),
            coordinates,
            price,
            duration,
            cost_per_min: f64::from(price) / f64::from(duration.max(1)),
            drive_time,
            drive_category,
            has_aerobatics,
            can_take_controls: !has_aerobatics,
            landmarks: landmarks.iter().map(ToString::to_string).collect(),
            landmarks_list: landmarks.join(", "),
            availability: "Weekends".to_string(),
            notes: String::new(),
            website: format!("https://example.com/{id}"),
            image_url: format!("https://example.com/{id}.jpg"),
            image_credit: "Example".to_string(),
        }
    }

    pub fn home() -> AirfieldRecord {
        AirfieldRecord {
            name: "Brighton".to_string(),
            lat: HOME.lat,
            lng: HOME.lng,
            is_home: true,
        }
    }

    /// Six experiences with price/duration/drive ties to exercise sort stability.
    pub fn catalog() -> Dataset {
        use AircraftType::{Aerobatic, Glider, Helicopter, LightAircraft, Vintage};
        use DriveCategory::{Under1Hr, Under2Hr, Under30, Under3Hr};

        Dataset::new(
            vec![
                record(1, 150, 30, 20, Under30, LightAircraft, false, SHOREHAM, &["coast"]),
                record(2, 99, 20, 45, Under1Hr, Glider, false, GOODWOOD, &["south-downs"]),
                record(3, 350, 60, 20, Under30, Aerobatic, true, SHOREHAM, &["coast", "castle"]),
                record(
                    4,
                    150,
                    45,
                    110,
                    Under2Hr,
                    Helicopter,
                    false,
                    Coordinate::new(51.15, -0.18),
                    &["london"],
                ),
                record(5, 620, 90, 170, Under3Hr, Vintage, true, Coordinate::new(51.8, -1.2), &[]),
                record(
                    6,
                    99,
                    60,
                    45,
                    Under1Hr,
                    LightAircraft,
                    false,
                    GOODWOOD,
                    &["coast", "south-downs"],
                ),
            ],
            vec![
                home(),
                AirfieldRecord {
                    name: "Goodwood".to_string(),
                    lat: GOODWOOD.lat,
                    lng: GOODWOOD.lng,
                    is_home: false,
                },
            ],
        )
    }
}
