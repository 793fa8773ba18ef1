//! `flightfinder` - Browse, filter and map a catalog of flight experiences
//!
//! This library holds the browsing model: the catalog, the filter and sort
//! engine, the list and detail projections, and marker grouping for any map
//! surface implementing [`map::MapSurface`]. [`Browser`] ties them together.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod browser;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod experience;
pub mod filter;
pub mod logging;
pub mod map;
pub mod selection;
pub mod view;

pub use browser::{Browser, BrowserSettings};
pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, ParseControlError, Result};
pub use experience::{AirfieldRecord, ExperienceId, ExperienceRecord};
pub use filter::{ControlChange, FilterState};
pub use logging::init_logging;
