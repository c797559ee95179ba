use async_trait::async_trait;

use super::domain::Coordinates;

/// Coordinate substituted for an unresolvable address when
/// `GeocodeFallback::Enabled` is configured. Null Island keeps a degraded run
/// recognizable in downstream audit data.
pub const SENTINEL_COORDINATES: Coordinates = Coordinates {
    latitude: 0.0,
    longitude: 0.0,
};

/// Failure raised by the geocoding collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("address could not be resolved: {address}")]
    Unresolvable { address: String },
    #[error("geocoding service unavailable: {0}")]
    Unavailable(String),
    #[error("geocoding timed out after {0} ms")]
    TimedOut(u64),
}

/// External geocoding collaborator.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}

/// Offline gazetteer resolving a handful of known metro areas by substring.
/// Backs the demo command and local development; production deployments
/// inject a real provider behind the same trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticGazetteer;

const KNOWN_PLACES: &[(&str, Coordinates)] = &[
    (
        "los angeles",
        Coordinates {
            latitude: 34.0522,
            longitude: -118.2437,
        },
    ),
    (
        "miami",
        Coordinates {
            latitude: 25.7617,
            longitude: -80.1918,
        },
    ),
    (
        "des moines",
        Coordinates {
            latitude: 41.5868,
            longitude: -93.6250,
        },
    ),
];

#[async_trait]
impl Geocoder for StaticGazetteer {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let needle = address.to_ascii_lowercase();
        KNOWN_PLACES
            .iter()
            .find(|(place, _)| needle.contains(place))
            .map(|(_, coordinates)| *coordinates)
            .ok_or_else(|| GeocodeError::Unresolvable {
                address: address.to_string(),
            })
    }
}
