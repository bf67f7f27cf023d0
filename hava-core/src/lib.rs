//! Core library for the `hava` weather dashboard.
//!
//! This crate defines:
//! - The place and snapshot domain models, with Persian display mappings
//! - The snapshot resolver: one request in, one fully populated snapshot out
//! - The upstream source abstraction and its HTTP implementation
//! - Reverse geocoding, the static place catalog, and the map projection
//!
//! It is used by `hava-cli`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod config;
pub mod geocode;
pub mod model;
pub mod projection;
pub mod resolver;
pub mod source;

pub use catalog::{find_city, map_cities, saved_cities};
pub use config::Config;
pub use model::{Condition, Place, PlaceQuery, WeatherSnapshot, compass_point};
pub use resolver::{DerivedDefaults, SnapshotResolver};
pub use source::{HttpSource, Observation, SourceError, WeatherSource};
