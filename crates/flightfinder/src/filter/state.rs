//! Filter state and the controls that mutate it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseControlError;
use crate::experience::{AircraftType, DriveCategory, ExperienceRecord};

/// Budget ceiling applied on startup and after a reset.
pub const DEFAULT_BUDGET: u32 = 500;

/// Token that every picker uses for "no restriction".
pub const ANY: &str = "any";

/// Flight-time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DurationBucket {
    /// No restriction.
    #[default]
    #[serde(rename = "any")]
    Any,
    /// Strictly under 30 minutes.
    #[serde(rename = "under30")]
    Under30,
    /// 30 to 60 minutes inclusive.
    #[serde(rename = "30-60")]
    From30To60,
    /// 60 minutes or more.
    #[serde(rename = "60+")]
    SixtyPlus,
}

impl DurationBucket {
    const ALL: [Self; 4] = [Self::Any, Self::Under30, Self::From30To60, Self::SixtyPlus];

    /// Check whether a flight of `minutes` falls in this bucket.
    ///
    /// The 30-60 bucket overlaps 60+ at exactly one hour.
    #[must_use]
    pub fn contains(self, minutes: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Under30 => minutes < 30,
            Self::From30To60 => (30..=60).contains(&minutes),
            Self::SixtyPlus => minutes >= 60,
        }
    }

    /// The control token for this bucket.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => ANY,
            Self::Under30 => "under30",
            Self::From30To60 => "30-60",
            Self::SixtyPlus => "60+",
        }
    }
}

/// Aerobatics requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AerobaticsFilter {
    /// No restriction.
    #[default]
    Any,
    /// Only flights with aerobatics.
    Yes,
    /// Only flights without aerobatics.
    No,
}

impl AerobaticsFilter {
    const ALL: [Self; 3] = [Self::Any, Self::Yes, Self::No];

    /// Check whether a flight with the given aerobatics flag is allowed.
    #[must_use]
    pub fn allows(self, has_aerobatics: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Yes => has_aerobatics,
            Self::No => !has_aerobatics,
        }
    }

    /// The control token for this requirement.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => ANY,
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Sort order for the visible subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Cheapest first.
    #[default]
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best value first.
    CostPerMinAsc,
    /// Shortest flight first.
    DurationAsc,
    /// Longest flight first.
    DurationDesc,
    /// Nearest first.
    DriveAsc,
    /// Furthest first.
    DriveDesc,
}

impl SortKey {
    /// Every sort key, in picker order.
    pub const ALL: [Self; 7] = [
        Self::PriceAsc,
        Self::PriceDesc,
        Self::CostPerMinAsc,
        Self::DurationAsc,
        Self::DurationDesc,
        Self::DriveAsc,
        Self::DriveDesc,
    ];

    /// Compare two records on this key alone.
    #[must_use]
    pub fn compare(self, a: &ExperienceRecord, b: &ExperienceRecord) -> Ordering {
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::CostPerMinAsc => a.cost_per_min.total_cmp(&b.cost_per_min),
            Self::DurationAsc => a.duration.cmp(&b.duration),
            Self::DurationDesc => b.duration.cmp(&a.duration),
            Self::DriveAsc => a.drive_time.cmp(&b.drive_time),
            Self::DriveDesc => b.drive_time.cmp(&a.drive_time),
        }
    }

    /// The control token for this key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::CostPerMinAsc => "cost-per-min-asc",
            Self::DurationAsc => "duration-asc",
            Self::DurationDesc => "duration-desc",
            Self::DriveAsc => "drive-asc",
            Self::DriveDesc => "drive-desc",
        }
    }
}

macro_rules! token_enum {
    ($ty:ty, $control:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseControlError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| ParseControlError::new($control, s))
            }
        }
    };
}

token_enum!(DurationBucket, "duration");
token_enum!(AerobaticsFilter, "aerobatics");
token_enum!(SortKey, "sort");

/// The user's current filter and sort choices.
///
/// Every dimension always holds exactly one value; `None`, `Any` and `false`
/// are the non-filtering values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Price ceiling.
    pub budget: u32,
    /// Ignore the price ceiling instead of excluding pricier records.
    pub show_over_budget: bool,
    /// Flight-time bucket.
    pub duration: DurationBucket,
    /// Aerobatics requirement.
    pub aerobatics: AerobaticsFilter,
    /// Required aircraft type.
    pub aircraft_type: Option<AircraftType>,
    /// Furthest acceptable drive category.
    pub drive: Option<DriveCategory>,
    /// Landmark tag that must be on the route.
    pub landmark: Option<String>,
    /// Sort order.
    pub sort: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            show_over_budget: false,
            duration: DurationBucket::Any,
            aerobatics: AerobaticsFilter::Any,
            aircraft_type: None,
            drive: None,
            landmark: None,
            sort: SortKey::PriceAsc,
        }
    }
}

impl FilterState {
    /// Restore every dimension to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Write one control's value into the state.
    pub fn apply(&mut self, change: ControlChange) {
        match change {
            ControlChange::Budget(budget) => self.budget = budget,
            ControlChange::ShowOverBudget(show) => self.show_over_budget = show,
            ControlChange::Duration(bucket) => self.duration = bucket,
            ControlChange::Aerobatics(filter) => self.aerobatics = filter,
            ControlChange::AircraftType(kind) => self.aircraft_type = kind,
            ControlChange::Drive(category) => self.drive = category,
            ControlChange::Landmark(tag) => self.landmark = tag,
            ControlChange::Sort(key) => self.sort = key,
        }
    }

    /// Check whether a record passes every filter dimension.
    #[must_use]
    pub fn matches(&self, record: &ExperienceRecord) -> bool {
        if !self.show_over_budget && record.is_over_budget(self.budget) {
            return false;
        }

        if !self.duration.contains(record.duration) {
            return false;
        }

        if !self.aerobatics.allows(record.has_aerobatics) {
            return false;
        }

        if let Some(kind) = &self.aircraft_type {
            if record.aircraft_type != *kind {
                return false;
            }
        }

        if let Some(ceiling) = self.drive {
            if record.drive_category.rank() > ceiling.rank() {
                return false;
            }
        }

        if let Some(tag) = &self.landmark {
            if !record.has_landmark(tag) {
                return false;
            }
        }

        true
    }
}

/// A single control writing a single filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChange {
    /// Budget slider.
    Budget(u32),
    /// "Show over budget" checkbox.
    ShowOverBudget(bool),
    /// Duration picker.
    Duration(DurationBucket),
    /// Aerobatics picker.
    Aerobatics(AerobaticsFilter),
    /// Aircraft type picker.
    AircraftType(Option<AircraftType>),
    /// Drive time picker.
    Drive(Option<DriveCategory>),
    /// Landmark picker.
    Landmark(Option<String>),
    /// Sort picker.
    Sort(SortKey),
}

impl ControlChange {
    /// Build a change from a control name and the raw value it emitted.
    ///
    /// Control names are `budget`, `show-over-budget`, `duration`,
    /// `aerobatics`, `type`, `drive`, `landmarks` and `sort`. Pickers accept
    /// `any` for "no restriction".
    ///
    /// # Errors
    ///
    /// Returns an error if the control is unknown or the value is not one the
    /// control can take.
    pub fn parse(control: &str, value: &str) -> Result<Self, ParseControlError> {
        let change = match control {
            "budget" => Self::Budget(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ParseControlError::new("budget", value))?,
            ),
            "show-over-budget" => Self::ShowOverBudget(
                value
                    .parse()
                    .map_err(|_| ParseControlError::new("show-over-budget", value))?,
            ),
            "duration" => Self::Duration(value.parse()?),
            "aerobatics" => Self::Aerobatics(value.parse()?),
            "type" => {
                Self::AircraftType(any_or(value, |v| Ok(AircraftType::from(v.to_string())))?)
            }
            "drive" => Self::Drive(any_or(value, str::parse::<DriveCategory>)?),
            "landmarks" => Self::Landmark(any_or(value, |v| Ok(v.to_string()))?),
            "sort" => Self::Sort(value.parse()?),
            _ => return Err(ParseControlError::new("control", control)),
        };
        Ok(change)
    }
}

fn any_or<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, ParseControlError>,
) -> Result<Option<T>, ParseControlError> {
    if value == ANY {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}
