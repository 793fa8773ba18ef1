//! Filtering and sorting of the catalog.
//!
//! - **[`FilterState`]**: one value per filter dimension plus a sort key.
//!   Defaults are the identity filters with a budget of 500, sorted by price.
//!
//! - **[`ControlChange`]**: what a single control writes into the state,
//!   parsed from the token the control emits.
//!
//! - **[`derive`]**: the pure filter-then-stable-sort step.
//!
//! # Example
//!
//! ```
//! use flightfinder::filter::{derive, ControlChange, FilterState};
//! use flightfinder::Dataset;
//!
//! let dataset = Dataset::from_json(r#"{"experiences": [], "airfields": []}"#).unwrap();
//! let mut filters = FilterState::default();
//! filters.apply(ControlChange::parse("duration", "30-60").unwrap());
//!
//! assert!(derive(&dataset, &filters).is_empty());
//! ```

mod engine;
mod state;

pub use engine::derive;
pub use state::{
    AerobaticsFilter, ControlChange, DurationBucket, FilterState, SortKey, ANY, DEFAULT_BUDGET,
};
