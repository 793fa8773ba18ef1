//! The detail view opened from a card.

use serde::Serialize;

use super::{money, rate, ImageView};
use crate::experience::{ExperienceId, ExperienceRecord};

/// Every field of one experience, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// Experience id.
    pub id: ExperienceId,
    /// Header image.
    pub image: ImageView,
    /// Attribution for the image.
    pub image_credit: String,
    /// Experience name.
    pub title: String,
    /// Aircraft model.
    pub aircraft: String,
    /// Price in whole currency units.
    pub price: u32,
    /// Flight time in minutes.
    pub duration: u32,
    /// Price per minute of flight.
    pub cost_per_min: f64,
    /// Drive from home in minutes.
    pub drive_time: u32,
    /// Name of the home airfield the drive is measured from.
    pub home_name: String,
    /// Includes aerobatics.
    pub has_aerobatics: bool,
    /// Passenger may take the controls.
    pub can_take_controls: bool,
    /// Landmarks line.
    pub landmarks: String,
    /// Free-form notes.
    pub notes: String,
    /// Departure location.
    pub location: String,
    /// Operator name.
    pub operator: String,
    /// When the experience runs.
    pub availability: String,
    /// Booking page.
    pub website: String,
}

impl DetailView {
    /// Project a record. `home_name` labels the drive-time row.
    #[must_use]
    pub fn project(record: &ExperienceRecord, home_name: &str) -> Self {
        Self {
            id: record.id,
            image: ImageView::new(&record.image_url, &record.aircraft),
            image_credit: record.image_credit.clone(),
            title: record.name.clone(),
            aircraft: record.aircraft.clone(),
            price: record.price,
            duration: record.duration,
            cost_per_min: record.cost_per_min,
            drive_time: record.drive_time,
            home_name: home_name.to_string(),
            has_aerobatics: record.has_aerobatics,
            can_take_controls: record.can_take_controls,
            landmarks: record.landmarks_list.clone(),
            notes: record.notes.clone(),
            location: record.location.clone(),
            operator: record.operator.clone(),
            availability: record.availability.clone(),
            website: record.website.clone(),
        }
    }

    /// The label/value grid shown under the title.
    #[must_use]
    pub fn facts(&self, currency: &str) -> Vec<(String, String)> {
        let yes_no = |flag: bool| if flag { "Yes ✓" } else { "No" }.to_string();
        vec![
            ("Price".to_string(), money(currency, self.price)),
            ("Duration".to_string(), format!("{} minutes", self.duration)),
            (
                "Cost per minute".to_string(),
                rate(currency, self.cost_per_min),
            ),
            (
                format!("Drive from {}", self.home_name),
                format!("{} minutes", self.drive_time),
            ),
            ("Aerobatics".to_string(), yes_no(self.has_aerobatics)),
            ("Take Controls".to_string(), yes_no(self.can_take_controls)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    #[test]
    fn test_project_copies_fields() {
        let dataset = fixtures::catalog();
        let record = dataset.experience(4).unwrap();
        let detail = DetailView::project(record, "Brighton");

        assert_eq!(detail.id, 4);
        assert_eq!(detail.title, "Experience 4");
        assert_eq!(detail.website, "https://example.com/4");
        assert_eq!(detail.image.alt, "Aircraft 4");
        assert_eq!(detail.availability, "Weekends");
    }

    #[test]
    fn test_facts() {
        let dataset = fixtures::catalog();
        let detail = DetailView::project(dataset.experience(1).unwrap(), "Brighton");
        let facts = detail.facts("£");

        assert_eq!(facts[0], ("Price".to_string(), "£150".to_string()));
        assert_eq!(facts[1], ("Duration".to_string(), "30 minutes".to_string()));
        assert_eq!(facts[2], ("Cost per minute".to_string(), "£5.00".to_string()));
        assert_eq!(
            facts[3],
            ("Drive from Brighton".to_string(), "20 minutes".to_string())
        );
        assert_eq!(facts[4], ("Aerobatics".to_string(), "No".to_string()));
        assert_eq!(facts[5], ("Take Controls".to_string(), "Yes ✓".to_string()));
    }
}
