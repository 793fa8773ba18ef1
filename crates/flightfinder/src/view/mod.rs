//! View models projected from the visible subset.
//!
//! Each projection is a plain value built from records and filter state; the
//! host binds events to it and draws it. [`html`] turns the projections into
//! escaped markup for a DOM host.

mod card;
mod controls;
mod detail;
pub mod html;

use serde::Serialize;

pub use card::{CardList, CardView, EMPTY_HINT, EMPTY_TITLE};
pub use controls::ControlPanelView;
pub use detail::DetailView;

/// Background painted in place of an image that failed to load.
pub const IMAGE_FALLBACK: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";

/// An image slot that falls back to a placeholder when loading fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    /// Image URL.
    pub url: String,
    /// Alternative text.
    pub alt: String,
    /// Set once the image has failed to load.
    pub failed: bool,
}

impl ImageView {
    /// An image that has not failed yet.
    #[must_use]
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            failed: false,
        }
    }

    /// Swap to the placeholder. Alt text is dropped with the image.
    pub fn fail(&mut self) {
        self.failed = true;
        self.alt.clear();
    }
}

/// Which image failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// The image on a card.
    Card(crate::experience::ExperienceId),
    /// The image in the detail view.
    Detail,
}

/// The results counter, e.g. `1 experience` or `3 experiences`.
#[must_use]
pub fn results_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} experience{plural}")
}

/// A whole-unit price, e.g. `£245`.
#[must_use]
pub fn money(currency: &str, amount: u32) -> String {
    format!("{currency}{amount}")
}

/// A per-minute rate with two decimals, e.g. `£8.17`.
#[must_use]
pub fn rate(currency: &str, per_minute: f64) -> String {
    format!("{currency}{per_minute:.2}")
}
