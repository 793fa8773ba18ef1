//! Control panel values as the UI should show them.

use serde::Serialize;

use super::money;
use crate::filter::{FilterState, ANY};

/// What each control should display for a given filter state.
///
/// Pickers carry the same tokens [`crate::filter::ControlChange::parse`]
/// accepts, so a host can write them straight back into its widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlPanelView {
    /// Budget slider position.
    pub budget: u32,
    /// Text next to the slider, e.g. `£500`.
    pub budget_label: String,
    /// "Show over budget" checkbox.
    pub show_over_budget: bool,
    /// Duration picker token.
    pub duration: String,
    /// Aerobatics picker token.
    pub aerobatics: String,
    /// Aircraft type picker token.
    pub aircraft_type: String,
    /// Drive picker token.
    pub drive: String,
    /// Landmark picker token.
    pub landmark: String,
    /// Landmark picker options after `any`, in first-seen dataset order.
    pub landmark_options: Vec<String>,
    /// Sort picker token.
    pub sort: String,
}

impl ControlPanelView {
    /// Project a filter state, offering `landmark_options` in the landmark
    /// picker.
    #[must_use]
    pub fn project(filters: &FilterState, landmark_options: &[&str], currency: &str) -> Self {
        Self {
            budget: filters.budget,
            budget_label: money(currency, filters.budget),
            show_over_budget: filters.show_over_budget,
            duration: filters.duration.to_string(),
            aerobatics: filters.aerobatics.to_string(),
            aircraft_type: filters
                .aircraft_type
                .as_ref()
                .map_or_else(|| ANY.to_string(), ToString::to_string),
            drive: filters
                .drive
                .map_or_else(|| ANY.to_string(), |drive| drive.to_string()),
            landmark: filters.landmark.clone().unwrap_or_else(|| ANY.to_string()),
            landmark_options: landmark_options.iter().map(ToString::to_string).collect(),
            sort: filters.sort.to_string(),
        }
    }
}
