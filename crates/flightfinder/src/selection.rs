//! Selection and hover tracking shared by the list and map views.

use crate::experience::ExperienceId;

/// Which record is selected, which is hovered, and whether the detail view
/// is showing.
///
/// Selection and hover are independent. Selection decides whether leaving a
/// card closes map popups; an open detail view suppresses hover popups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ExperienceId>,
    hovered: Option<ExperienceId>,
    detail_open: bool,
}

impl SelectionState {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected record, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ExperienceId> {
        self.selected
    }

    /// The hovered record, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<ExperienceId> {
        self.hovered
    }

    /// Check whether the detail view is showing.
    #[must_use]
    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// Select a record without opening its detail view.
    pub fn select(&mut self, id: ExperienceId) {
        self.selected = Some(id);
    }

    /// Select a record and mark its detail view as open.
    pub fn open_detail(&mut self, id: ExperienceId) {
        self.selected = Some(id);
        self.detail_open = true;
    }

    /// Close the detail view and drop the selection.
    pub fn close_detail(&mut self) {
        self.selected = None;
        self.detail_open = false;
    }

    /// Record the pointer entering a card.
    pub fn hover(&mut self, id: ExperienceId) {
        self.hovered = Some(id);
    }

    /// Record the pointer leaving a card.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Check whether hovering a card may open its marker's popup.
    #[must_use]
    pub fn hover_popups_allowed(&self) -> bool {
        !self.detail_open
    }

    /// Check whether leaving a card should close every open popup.
    #[must_use]
    pub fn closes_popups_on_leave(&self) -> bool {
        self.selected.is_none()
    }
}
