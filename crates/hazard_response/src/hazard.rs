//! Hazard events and region categories shared by both engines.

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp_non_negative, clamp_unit};

// =============================================================================
// HazardType
// =============================================================================

/// Kind of hazard. Names outside the known set are kept as `Other` so they can
/// be logged, and every table treats them as unsupported.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
#[serde(from = "String", into = "String")]
pub enum HazardType {
    Flood,
    FlashFlood,
    Cyclone,
    StormSurge,
    Drought,
    Landslide,
    RiverErosion,
    Earthquake,
    Other(String),
}

impl HazardType {
    /// Every named variant, in table order.
    pub const KNOWN: [HazardType; 8] = [
        HazardType::Flood,
        HazardType::FlashFlood,
        HazardType::Cyclone,
        HazardType::StormSurge,
        HazardType::Drought,
        HazardType::Landslide,
        HazardType::RiverErosion,
        HazardType::Earthquake,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "flood" => HazardType::Flood,
            "flash_flood" => HazardType::FlashFlood,
            "cyclone" => HazardType::Cyclone,
            "storm_surge" => HazardType::StormSurge,
            "drought" => HazardType::Drought,
            "landslide" => HazardType::Landslide,
            "river_erosion" => HazardType::RiverErosion,
            "earthquake" => HazardType::Earthquake,
            _ => HazardType::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HazardType::Flood => "flood",
            HazardType::FlashFlood => "flash_flood",
            HazardType::Cyclone => "cyclone",
            HazardType::StormSurge => "storm_surge",
            HazardType::Drought => "drought",
            HazardType::Landslide => "landslide",
            HazardType::RiverErosion => "river_erosion",
            HazardType::Earthquake => "earthquake",
            HazardType::Other(name) => name,
        }
    }
}

impl From<String> for HazardType {
    fn from(name: String) -> Self {
        HazardType::from_name(&name)
    }
}

impl From<HazardType> for String {
    fn from(hazard: HazardType) -> Self {
        hazard.name().to_string()
    }
}

// =============================================================================
// RegionCategory
// =============================================================================

/// Region category used by the regional capacity, exposure and trust tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
#[serde(from = "String", into = "String")]
pub enum RegionCategory {
    Coastal,
    Urban,
    /// Major river flood plains; `riverine` is accepted as an alias.
    FloodPlain,
    /// Flash-flood prone wetland basins; `haor` is accepted as an alias.
    HaorBasin,
    CharLands,
    HillTracts,
    BarindTract,
    #[default]
    Generic,
}

impl RegionCategory {
    /// Unknown names fall back to `Generic`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "coastal" => RegionCategory::Coastal,
            "urban" => RegionCategory::Urban,
            "flood_plain" | "riverine" => RegionCategory::FloodPlain,
            "haor_basin" | "haor" => RegionCategory::HaorBasin,
            "char_lands" => RegionCategory::CharLands,
            "hill_tracts" => RegionCategory::HillTracts,
            "barind_tract" => RegionCategory::BarindTract,
            _ => RegionCategory::Generic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RegionCategory::Coastal => "coastal",
            RegionCategory::Urban => "urban",
            RegionCategory::FloodPlain => "flood_plain",
            RegionCategory::HaorBasin => "haor_basin",
            RegionCategory::CharLands => "char_lands",
            RegionCategory::HillTracts => "hill_tracts",
            RegionCategory::BarindTract => "barind_tract",
            RegionCategory::Generic => "generic",
        }
    }

    #[inline]
    pub fn is_urban(self) -> bool {
        self == RegionCategory::Urban
    }
}

impl From<String> for RegionCategory {
    fn from(name: String) -> Self {
        RegionCategory::from_name(&name)
    }
}

impl From<RegionCategory> for String {
    fn from(region: RegionCategory) -> Self {
        region.name().to_string()
    }
}

// =============================================================================
// HazardEvent
// =============================================================================

/// Footprint metadata for a hazard event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialFootprint {
    #[serde(default, alias = "type", alias = "region")]
    pub category: RegionCategory,
    /// Event duration in hours. Longer floods get longer forecast lead times.
    #[serde(default, alias = "duration")]
    pub duration_hours: Option<f64>,
}

/// A drawn hazard event, consumed once per warning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardEvent {
    #[serde(rename = "type")]
    pub hazard_type: HazardType,
    /// Normalized intensity; clamped to `[0, 1]` before use.
    #[serde(default)]
    pub intensity: f64,
    #[serde(default)]
    pub spatial_footprint: SpatialFootprint,
}

impl HazardEvent {
    pub fn new(hazard_type: HazardType, intensity: f64) -> Self {
        Self {
            hazard_type,
            intensity,
            spatial_footprint: SpatialFootprint::default(),
        }
    }

    pub fn in_region(mut self, region: RegionCategory) -> Self {
        self.spatial_footprint.category = region;
        self
    }

    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.spatial_footprint.duration_hours = Some(hours);
        self
    }

    #[inline]
    pub fn clamped_intensity(&self) -> f64 {
        clamp_unit(self.intensity)
    }

    #[inline]
    pub fn region(&self) -> RegionCategory {
        self.spatial_footprint.category
    }

    /// Footprint duration, clamped non-negative. `None` when not supplied.
    pub fn duration_hours(&self) -> Option<f64> {
        self.spatial_footprint.duration_hours.map(clamp_non_negative)
    }
}
