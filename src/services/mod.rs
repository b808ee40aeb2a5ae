// Service exports
pub mod geocoder;

pub use geocoder::{CachedLookup, CoordinateLookup, GeocodeError, NoLookup, StaticGazetteer};
