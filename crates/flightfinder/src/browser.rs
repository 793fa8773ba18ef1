//! The controller that owns all browsing state.
//!
//! A [`Browser`] holds the dataset, the filter and selection state, the
//! projected views and the map surface. Every user input is a method call;
//! each one updates state synchronously and re-renders what it touched.
//!
//! # Example
//!
//! ```
//! use flightfinder::browser::{Browser, BrowserSettings};
//! use flightfinder::filter::ControlChange;
//! use flightfinder::map::HeadlessMap;
//! use flightfinder::Dataset;
//!
//! let dataset = Dataset::from_json(r#"{"experiences": [], "airfields": []}"#).unwrap();
//! let mut browser = Browser::new(dataset, BrowserSettings::default(), HeadlessMap::new());
//!
//! browser.on_control(ControlChange::Budget(250));
//! assert_eq!(browser.results_label(), "0 experiences");
//! assert!(browser.cards().is_empty());
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::experience::{Coordinate, ExperienceId, ExperienceRecord};
use crate::filter::{derive, ControlChange, FilterState};
use crate::map::{MapSurface, MarkerHandle, MarkerIcon, MarkerLayer, Popup};
use crate::selection::SelectionState;
use crate::view::{results_label, CardList, ControlPanelView, DetailView, ImageSlot};

/// Key that closes the detail view.
pub const CANCEL_KEY: &str = "Escape";

/// Settings the browser needs from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserSettings {
    /// Initial view centre.
    pub center: Coordinate,
    /// Initial zoom.
    pub zoom: u8,
    /// Tile URL template.
    pub tile_url: String,
    /// Tile attribution.
    pub attribution: String,
    /// Padding when fitting bounds after a re-render.
    pub fit_padding: u32,
    /// Padding when re-fitting after the map view is shown.
    pub resize_fit_padding: u32,
    /// Delay before that re-fit.
    pub resize_delay: Duration,
    /// Price prefix.
    pub currency: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for BrowserSettings {
    fn from(config: &Config) -> Self {
        Self {
            center: config.map_center(),
            zoom: config.map.zoom,
            tile_url: config.map.tile_url.clone(),
            attribution: config.map.attribution.clone(),
            fit_padding: config.map.fit_padding,
            resize_fit_padding: config.map.resize_fit_padding,
            resize_delay: config.resize_delay(),
            currency: config.display.currency_symbol.clone(),
        }
    }
}

/// Which pane is showing on a narrow viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The card list.
    #[default]
    List,
    /// The map.
    Map,
}

/// Work queued to run after the current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Recompute the map size and re-fit bounds once the map is visible.
    RefreshMapLayout,
}

/// A deferred task and how long the host should wait before running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// Delay after the current render.
    pub delay: Duration,
    /// The task.
    pub task: DeferredTask,
}

/// Browsing state and the single entry point for user input.
#[derive(Debug)]
pub struct Browser<M: MapSurface> {
    dataset: Dataset,
    settings: BrowserSettings,
    filters: FilterState,
    selection: SelectionState,
    visible: Vec<ExperienceId>,
    cards: CardList,
    detail: Option<DetailView>,
    markers: MarkerLayer,
    home_marker: Option<MarkerHandle>,
    map: M,
    view_mode: ViewMode,
    filters_panel_open: bool,
    pending: Vec<Scheduled>,
    scroll_request: Option<ExperienceId>,
}

impl<M: MapSurface> Browser<M> {
    /// Set up the map, place the home marker and render the default view.
    pub fn new(dataset: Dataset, settings: BrowserSettings, mut map: M) -> Self {
        map.set_view(settings.center, settings.zoom);
        map.add_tile_layer(&settings.tile_url, &settings.attribution);

        let home_marker = dataset.home().map(|home| {
            map.add_marker(
                home.coordinate(),
                MarkerIcon::Home,
                Popup::Home {
                    name: home.name.clone(),
                },
            )
        });

        let mut browser = Self {
            dataset,
            settings,
            filters: FilterState::default(),
            selection: SelectionState::new(),
            visible: Vec::new(),
            cards: CardList::Empty,
            detail: None,
            markers: MarkerLayer::default(),
            home_marker,
            map,
            view_mode: ViewMode::List,
            filters_panel_open: false,
            pending: Vec::new(),
            scroll_request: None,
        };
        browser.refresh();
        info!(
            experiences = browser.dataset.len(),
            visible = browser.visible.len(),
            "Browser ready"
        );
        browser
    }

    /// The catalog.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The active settings.
    #[must_use]
    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Current filter state.
    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current selection state.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Ids of the visible experiences, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> &[ExperienceId] {
        &self.visible
    }

    /// The visible experiences, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&ExperienceRecord> {
        self.visible
            .iter()
            .filter_map(|&id| self.dataset.experience(id))
            .collect()
    }

    /// The list view.
    #[must_use]
    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    /// The detail view, while open.
    #[must_use]
    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// The marker groups on the map.
    #[must_use]
    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    /// The home marker, if the dataset has a home airfield.
    #[must_use]
    pub fn home_marker(&self) -> Option<MarkerHandle> {
        self.home_marker
    }

    /// The map surface.
    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    /// The results counter text.
    #[must_use]
    pub fn results_label(&self) -> String {
        results_label(self.visible.len())
    }

    /// What every control should show.
    #[must_use]
    pub fn controls(&self) -> ControlPanelView {
        ControlPanelView::project(
            &self.filters,
            &self.dataset.landmark_tags(),
            &self.settings.currency,
        )
    }

    /// Which pane is showing on narrow viewports.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Whether the filters panel is expanded on narrow viewports.
    #[must_use]
    pub fn filters_panel_open(&self) -> bool {
        self.filters_panel_open
    }

    /// Tasks waiting for [`Browser::run_deferred`].
    #[must_use]
    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    /// Take the card the list view should scroll to, if one was requested.
    pub fn take_scroll_request(&mut self) -> Option<ExperienceId> {
        self.scroll_request.take()
    }

    // === Control panel ===

    /// Apply one control's new value and re-render.
    pub fn on_control(&mut self, change: ControlChange) {
        debug!(?change, "Control changed");
        self.filters.apply(change);
        self.refresh();
    }

    /// Apply a raw control value as emitted by the host widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the control or value is unknown; state is left
    /// untouched in that case.
    pub fn on_control_input(&mut self, control: &str, value: &str) -> Result<()> {
        let change = ControlChange::parse(control, value)?;
        self.on_control(change);
        Ok(())
    }

    /// Restore default filters and re-render.
    ///
    /// Returns the control values the widgets must show, projected before
    /// the views are re-derived.
    pub fn reset_filters(&mut self) -> ControlPanelView {
        debug!("Filters reset");
        self.filters.reset();
        let controls = self.controls();
        self.refresh();
        controls
    }

    /// Replace every filter at once, then re-render.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.refresh();
    }

    // === List view ===

    /// A card was clicked.
    pub fn card_clicked(&mut self, id: ExperienceId) {
        self.open_detail(id);
    }

    /// The pointer entered a card.
    pub fn card_entered(&mut self, id: ExperienceId) {
        self.selection.hover(id);
        if !self.selection.hover_popups_allowed() {
            return;
        }
        if let Some(handle) = self.markers.handle_of(id) {
            self.map.open_popup(handle);
        }
    }

    /// The pointer left a card.
    pub fn card_left(&mut self) {
        self.selection.clear_hover();
        if self.selection.closes_popups_on_leave() {
            for handle in self.markers.handles() {
                self.map.close_popup(handle);
            }
        }
    }

    /// An image failed to load.
    pub fn image_failed(&mut self, slot: ImageSlot) {
        match slot {
            ImageSlot::Card(id) => self.cards.image_failed(id),
            ImageSlot::Detail => {
                if let Some(detail) = &mut self.detail {
                    detail.image.fail();
                }
            }
        }
    }

    // === Map view ===

    /// An experience listed in a marker popup was clicked.
    pub fn popup_item_clicked(&mut self, id: ExperienceId) {
        self.highlight_card(id);
        if self.cards.card(id).is_some() {
            self.scroll_request = Some(id);
        }
    }

    // === Detail view ===

    /// Open the detail view for an experience. Unknown ids are ignored.
    pub fn open_detail(&mut self, id: ExperienceId) {
        let Some(record) = self.dataset.experience(id) else {
            return;
        };
        let home_name = self.dataset.home().map_or("home", |home| home.name.as_str());
        self.detail = Some(DetailView::project(record, home_name));

        if let Some(handle) = self.markers.handle_of(id) {
            self.map.pan_to(record.coordinates);
            self.map.open_popup(handle);
        }

        self.highlight_card(id);
        self.selection.open_detail(id);
        debug!(id, "Detail opened");
    }

    /// Close the detail view and clear the selection.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.selection.close_detail();
        self.cards.set_highlight(None);
    }

    /// A click landed on the detail overlay outside its content.
    pub fn backdrop_clicked(&mut self) {
        self.close_detail();
    }

    /// A key was pressed anywhere.
    pub fn key_pressed(&mut self, key: &str) {
        if key == CANCEL_KEY {
            self.close_detail();
        }
    }

    // === Layout ===

    /// Expand or collapse the filters panel.
    pub fn toggle_filters_panel(&mut self) {
        self.filters_panel_open = !self.filters_panel_open;
    }

    /// Swap between the list and the map pane.
    ///
    /// Showing the map queues a [`DeferredTask::RefreshMapLayout`].
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Map => ViewMode::List,
            ViewMode::List => {
                self.pending.push(Scheduled {
                    delay: self.settings.resize_delay,
                    task: DeferredTask::RefreshMapLayout,
                });
                ViewMode::Map
            }
        };
    }

    /// Run every queued task.
    pub fn run_deferred(&mut self) {
        for scheduled in std::mem::take(&mut self.pending) {
            match scheduled.task {
                DeferredTask::RefreshMapLayout => {
                    self.map.invalidate_size();
                    self.fit_visible(self.settings.resize_fit_padding);
                }
            }
        }
    }

    // === Rendering ===

    fn highlight_card(&mut self, id: ExperienceId) {
        self.cards.set_highlight(Some(id));
        self.selection.select(id);
    }

    /// Re-derive the visible subset and rebuild both views from it.
    fn refresh(&mut self) {
        let subset = derive(&self.dataset, &self.filters);
        self.visible = subset.iter().map(|record| record.id).collect();

        self.cards = CardList::project(&subset, self.filters.budget);
        self.cards.set_highlight(self.selection.selected());

        // Markers are rebuilt from scratch, which also drops open popups.
        self.markers.detach(&mut self.map);
        self.markers = MarkerLayer::group(&subset);
        self.markers.attach(&mut self.map);

        self.fit_visible(self.settings.fit_padding);
    }

    fn fit_visible(&mut self, padding: u32) {
        let home = self.dataset.home().map(|home| home.coordinate());
        if let Some(bounds) = self.markers.bounds(home) {
            self.map.fit_bounds(bounds, padding);
        }
    }
}
