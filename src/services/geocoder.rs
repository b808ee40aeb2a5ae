use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use crate::models::Coordinates;

/// Errors a coordinate lookup can report
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid coordinates for {address}: ({latitude}, {longitude})")]
    InvalidCoordinates {
        address: String,
        latitude: f64,
        longitude: f64,
    },
}

/// Resolves a free-text address to coordinates
///
/// `Ok(None)` means the address is unknown; `Err` means the lookup itself
/// failed. The scorer treats both as "unresolvable".
pub trait CoordinateLookup: Send + Sync {
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

impl<F> CoordinateLookup for F
where
    F: Fn(&str) -> Result<Option<Coordinates>, GeocodeError> + Send + Sync,
{
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self(address)
    }
}

/// Resolves nothing; every location falls back to address similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl CoordinateLookup for NoLookup {
    fn lookup(&self, _address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        Ok(None)
    }
}

/// Fixed table of place names
///
/// Keys are matched case-insensitively with surrounding and repeated
/// whitespace ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticGazetteer {
    places: HashMap<String, Coordinates>,
}

impl StaticGazetteer {
    /// Build from `(address, latitude, longitude)` entries, rejecting
    /// out-of-range coordinates
    pub fn from_entries<I, S>(entries: I) -> Result<Self, GeocodeError>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: AsRef<str>,
    {
        let mut places = HashMap::new();
        for (address, latitude, longitude) in entries {
            let coordinates = Coordinates::new(latitude, longitude);
            if !coordinates.is_valid() {
                return Err(GeocodeError::InvalidCoordinates {
                    address: address.as_ref().to_string(),
                    latitude,
                    longitude,
                });
            }
            places.insert(normalize_address(address.as_ref()), coordinates);
        }

        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl CoordinateLookup for StaticGazetteer {
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        Ok(self.places.get(&normalize_address(address)).copied())
    }
}

/// Memoizes another lookup
///
/// Both hits and misses are cached for the configured TTL; errors are not,
/// so a flaky backend gets retried on the next request.
pub struct CachedLookup<L> {
    inner: L,
    cache: moka::sync::Cache<String, Option<Coordinates>>,
}

impl<L: CoordinateLookup> CachedLookup<L> {
    pub fn new(inner: L, capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::sync::Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl<L: CoordinateLookup> CoordinateLookup for CachedLookup<L> {
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let key = normalize_address(address);
        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!("Geocode cache hit: {}", key);
            return Ok(cached);
        }

        let resolved = self.inner.lookup(address)?;
        self.cache.insert(key, resolved);
        Ok(resolved)
    }
}

/// Lowercase and collapse whitespace so "  New  York" and "new york" agree
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
