//! List-view cards.

use serde::Serialize;

use super::{money, rate, ImageView};
use crate::experience::{ExperienceId, ExperienceRecord};

/// Heading of the empty-state placeholder.
pub const EMPTY_TITLE: &str = "No experiences match your filters";

/// Hint under the empty-state heading.
pub const EMPTY_HINT: &str = "Try adjusting your filters to see more options";

/// One card in the list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Experience id, used for event delegation.
    pub id: ExperienceId,
    /// Card image.
    pub image: ImageView,
    /// Experience name.
    pub title: String,
    /// Price in whole currency units.
    pub price: u32,
    /// Aircraft model.
    pub aircraft: String,
    /// Flight time in minutes.
    pub duration: u32,
    /// Price per minute of flight.
    pub cost_per_min: f64,
    /// Shows the aerobatics badge.
    pub has_aerobatics: bool,
    /// Shows the take-controls badge.
    pub can_take_controls: bool,
    /// Price is above the current budget, whether or not it was filtered.
    pub over_budget: bool,
    /// Landmarks line.
    pub landmarks: String,
    /// Operator name.
    pub operator: String,
    /// Drive from home in minutes.
    pub drive_time: u32,
    /// Card is visually selected.
    pub highlighted: bool,
}

impl CardView {
    /// Project a record against the current budget.
    #[must_use]
    pub fn project(record: &ExperienceRecord, budget: u32) -> Self {
        Self {
            id: record.id,
            image: ImageView::new(&record.image_url, &record.aircraft),
            title: record.name.clone(),
            price: record.price,
            aircraft: record.aircraft.clone(),
            duration: record.duration,
            cost_per_min: record.cost_per_min,
            has_aerobatics: record.has_aerobatics,
            can_take_controls: record.can_take_controls,
            over_budget: record.is_over_budget(budget),
            landmarks: record.landmarks_list.clone(),
            operator: record.operator.clone(),
            drive_time: record.drive_time,
            highlighted: false,
        }
    }

    /// Badge texts in display order.
    #[must_use]
    pub fn badges(&self, currency: &str) -> Vec<String> {
        let mut badges = vec![
            format!("⏱ {} min", self.duration),
            format!("{}/min", rate(currency, self.cost_per_min)),
        ];
        if self.has_aerobatics {
            badges.push("🔄 Aerobatics".to_string());
        }
        if self.can_take_controls {
            badges.push("🎮 Take Controls".to_string());
        }
        if self.over_budget {
            badges.push("Over Budget".to_string());
        }
        badges
    }

    /// Price text, e.g. `£245`.
    #[must_use]
    pub fn price_label(&self, currency: &str) -> String {
        money(currency, self.price)
    }

    /// Drive text, e.g. `🚗 45 min drive`.
    #[must_use]
    pub fn drive_label(&self) -> String {
        format!("🚗 {} min drive", self.drive_time)
    }
}

/// The whole list view: cards, or the empty-state placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "cards")]
pub enum CardList {
    /// Nothing matched; show the placeholder.
    #[default]
    Empty,
    /// One card per visible record, in visible order.
    Cards(Vec<CardView>),
}

impl CardList {
    /// Project the visible subset against the current budget.
    #[must_use]
    pub fn project(subset: &[&ExperienceRecord], budget: u32) -> Self {
        if subset.is_empty() {
            return Self::Empty;
        }
        Self::Cards(
            subset
                .iter()
                .map(|record| CardView::project(record, budget))
                .collect(),
        )
    }

    /// Check if the placeholder is showing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The cards, empty when the placeholder is showing.
    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: ExperienceId) -> Option<&CardView> {
        self.cards().iter().find(|card| card.id == id)
    }

    /// The highlighted card, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<ExperienceId> {
        self.cards()
            .iter()
            .find(|card| card.highlighted)
            .map(|card| card.id)
    }

    /// Highlight one card and clear every other, or clear all with `None`.
    pub fn set_highlight(&mut self, id: Option<ExperienceId>) {
        if let Self::Cards(cards) = self {
            for card in cards {
                card.highlighted = Some(card.id) == id;
            }
        }
    }

    /// Swap a card's image for the placeholder. Unknown ids are ignored.
    pub fn image_failed(&mut self, id: ExperienceId) {
        if let Self::Cards(cards) = self {
            if let Some(card) = cards.iter_mut().find(|card| card.id == id) {
                card.image.fail();
            }
        }
    }
}
