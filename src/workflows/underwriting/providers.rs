//! Narrow read-only query seams for the upstream hazard-data services, plus
//! deterministic reference implementations used by the demo command and local
//! development. Evaluators depend only on these traits, never on a provider's
//! wire format.

use std::sync::Arc;

use async_trait::async_trait;

use super::domain::Coordinates;

/// Failure raised by any upstream hazard-data lookup.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("upstream service unavailable: {0}")]
    Unavailable(String),
    #[error("upstream returned malformed data: {0}")]
    Malformed(String),
}

/// Fire-station registry lookup (nearest station distance).
#[async_trait]
pub trait FireStationLocator: Send + Sync {
    async fn nearest_station_km(&self, coordinates: Coordinates) -> Result<f64, ProviderError>;
}

/// Wildfire and wind scores on the catalog's native 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindProfile {
    pub hurricane: f64,
    pub tornado: f64,
    pub hail: f64,
}

/// Combined hazard catalog (wildfire and windstorm components).
#[async_trait]
pub trait HazardCatalog: Send + Sync {
    async fn wildfire_score(&self, coordinates: Coordinates) -> Result<f64, ProviderError>;
    async fn wind_profile(&self, coordinates: Coordinates) -> Result<WindProfile, ProviderError>;
}

/// Flood-zone designations recognized by the rating table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodZone {
    Ve,
    Ae,
    A,
    D,
    X,
}

impl FloodZone {
    /// Base flood score on the native 0-5 hazard scale.
    pub const fn base_score(self) -> f64 {
        match self {
            FloodZone::Ve => 5.0,
            FloodZone::Ae => 4.0,
            FloodZone::A => 3.0,
            FloodZone::D => 2.0,
            FloodZone::X => 1.0,
        }
    }

    pub const fn designation(self) -> &'static str {
        match self {
            FloodZone::Ve => "VE",
            FloodZone::Ae => "AE",
            FloodZone::A => "A",
            FloodZone::D => "D",
            FloodZone::X => "X",
        }
    }
}

/// Flood-zone map lookup by coordinate.
#[async_trait]
pub trait FloodZoneMap: Send + Sync {
    async fn flood_zone(&self, coordinates: Coordinates) -> Result<FloodZone, ProviderError>;
}

/// Seismic design service (peak ground acceleration in g).
#[async_trait]
pub trait SeismicService: Send + Sync {
    async fn peak_ground_acceleration(
        &self,
        coordinates: Coordinates,
    ) -> Result<f64, ProviderError>;
}

/// Recorded condition of the building envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingCondition {
    Good,
    Fair,
    Poor,
}

impl BuildingCondition {
    pub const fn base_score(self) -> f64 {
        match self {
            BuildingCondition::Good => 1.0,
            BuildingCondition::Fair => 3.0,
            BuildingCondition::Poor => 5.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BuildingCondition::Good => "Good",
            BuildingCondition::Fair => "Fair",
            BuildingCondition::Poor => "Poor",
        }
    }
}

/// Property-records lookup by address.
#[async_trait]
pub trait PropertyRecords: Send + Sync {
    async fn building_condition(&self, address: &str) -> Result<BuildingCondition, ProviderError>;
}

/// Historical-claims warehouse query, shared read-only across runs.
#[async_trait]
pub trait ClaimsStore: Send + Sync {
    async fn claims_within(
        &self,
        coordinates: Coordinates,
        radius_km: f64,
        lookback_years: u32,
    ) -> Result<u32, ProviderError>;
}

/// Bundle of the upstream seams an evaluator registry is wired from.
/// Shared read-only across concurrent pipeline runs.
#[derive(Clone)]
pub struct ProviderSet {
    pub fire_stations: Arc<dyn FireStationLocator>,
    pub hazard_catalog: Arc<dyn HazardCatalog>,
    pub flood_zones: Arc<dyn FloodZoneMap>,
    pub seismic: Arc<dyn SeismicService>,
    pub property_records: Arc<dyn PropertyRecords>,
    pub claims: Arc<dyn ClaimsStore>,
}

impl ProviderSet {
    /// The deterministic reference providers backing the demo command.
    pub fn reference() -> Self {
        Self {
            fire_stations: Arc::new(StaticFireStations::default()),
            hazard_catalog: Arc::new(StaticHazardCatalog::default()),
            flood_zones: Arc::new(StaticFloodZoneMap::default()),
            seismic: Arc::new(StaticSeismicService::default()),
            property_records: Arc::new(StaticPropertyRecords::default()),
            claims: Arc::new(StaticClaimsStore::default()),
        }
    }
}

/// Fixed-response fire-station registry.
#[derive(Debug, Clone, Copy)]
pub struct StaticFireStations {
    pub nearest_km: f64,
}

impl Default for StaticFireStations {
    fn default() -> Self {
        Self { nearest_km: 2.5 }
    }
}

#[async_trait]
impl FireStationLocator for StaticFireStations {
    async fn nearest_station_km(&self, _coordinates: Coordinates) -> Result<f64, ProviderError> {
        Ok(self.nearest_km)
    }
}

/// Fixed-response hazard catalog.
#[derive(Debug, Clone, Copy)]
pub struct StaticHazardCatalog {
    pub wildfire: f64,
    pub wind: WindProfile,
}

impl Default for StaticHazardCatalog {
    fn default() -> Self {
        Self {
            wildfire: 64.0,
            wind: WindProfile {
                hurricane: 50.0,
                tornado: 60.0,
                hail: 30.0,
            },
        }
    }
}

#[async_trait]
impl HazardCatalog for StaticHazardCatalog {
    async fn wildfire_score(&self, _coordinates: Coordinates) -> Result<f64, ProviderError> {
        Ok(self.wildfire)
    }

    async fn wind_profile(&self, _coordinates: Coordinates) -> Result<WindProfile, ProviderError> {
        Ok(self.wind)
    }
}

/// Fixed-response flood-zone map.
#[derive(Debug, Clone, Copy)]
pub struct StaticFloodZoneMap {
    pub zone: FloodZone,
}

impl Default for StaticFloodZoneMap {
    fn default() -> Self {
        Self {
            zone: FloodZone::Ae,
        }
    }
}

#[async_trait]
impl FloodZoneMap for StaticFloodZoneMap {
    async fn flood_zone(&self, _coordinates: Coordinates) -> Result<FloodZone, ProviderError> {
        Ok(self.zone)
    }
}

/// Fixed-response seismic service.
#[derive(Debug, Clone, Copy)]
pub struct StaticSeismicService {
    pub pga: f64,
}

impl Default for StaticSeismicService {
    fn default() -> Self {
        Self { pga: 0.3 }
    }
}

#[async_trait]
impl SeismicService for StaticSeismicService {
    async fn peak_ground_acceleration(
        &self,
        _coordinates: Coordinates,
    ) -> Result<f64, ProviderError> {
        Ok(self.pga)
    }
}

/// Fixed-response property-records service.
#[derive(Debug, Clone, Copy)]
pub struct StaticPropertyRecords {
    pub condition: BuildingCondition,
}

impl Default for StaticPropertyRecords {
    fn default() -> Self {
        Self {
            condition: BuildingCondition::Fair,
        }
    }
}

#[async_trait]
impl PropertyRecords for StaticPropertyRecords {
    async fn building_condition(&self, _address: &str) -> Result<BuildingCondition, ProviderError> {
        Ok(self.condition)
    }
}

/// Fixed-response claims warehouse.
#[derive(Debug, Clone, Copy)]
pub struct StaticClaimsStore {
    pub nearby_claims: u32,
}

impl Default for StaticClaimsStore {
    fn default() -> Self {
        Self { nearby_claims: 2 }
    }
}

#[async_trait]
impl ClaimsStore for StaticClaimsStore {
    async fn claims_within(
        &self,
        _coordinates: Coordinates,
        _radius_km: f64,
        _lookback_years: u32,
    ) -> Result<u32, ProviderError> {
        Ok(self.nearby_claims)
    }
}
