//! Response engine inputs and outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp_non_negative, clamp_unit};
use crate::early_warning::WarningOutcome;
use crate::hazard::{HazardType, RegionCategory};

// =============================================================================
// Operations and agencies
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Rescue,
    Evacuation,
    Relief,
    Medical,
    Restoration,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Rescue,
        Operation::Evacuation,
        Operation::Relief,
        Operation::Medical,
        Operation::Restoration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Rescue => "rescue",
            Operation::Evacuation => "evacuation",
            Operation::Relief => "relief",
            Operation::Medical => "medical",
            Operation::Restoration => "restoration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agency {
    DisasterManagement,
    FireService,
    Police,
    MedicalServices,
    Military,
    Ngos,
}

impl Agency {
    pub const ALL: [Agency; 6] = [
        Agency::DisasterManagement,
        Agency::FireService,
        Agency::Police,
        Agency::MedicalServices,
        Agency::Military,
        Agency::Ngos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Agency::DisasterManagement => "disaster_management",
            Agency::FireService => "fire_service",
            Agency::Police => "police",
            Agency::MedicalServices => "medical_services",
            Agency::Military => "military",
            Agency::Ngos => "ngos",
        }
    }
}

/// Administrative tier leading the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    National,
    Division,
    #[default]
    District,
    Upazila,
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Urban,
    Suburban,
    Rural,
}

impl Settlement {
    /// Urban regions are urban; every other category is treated as rural.
    pub fn for_region(region: RegionCategory) -> Self {
        if region.is_urban() {
            Settlement::Urban
        } else {
            Settlement::Rural
        }
    }
}

// =============================================================================
// DisasterImpacts
// =============================================================================

fn default_hazard() -> HazardType {
    HazardType::Flood
}

/// Severity figures for one disaster, after any warning has been applied.
/// Counts are clamped non-negative when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterImpacts {
    #[serde(default = "default_hazard")]
    pub hazard_type: HazardType,
    #[serde(default, alias = "region")]
    pub region_type: RegionCategory,
    #[serde(default)]
    pub casualties: Option<f64>,
    #[serde(default)]
    pub affected: Option<f64>,
    #[serde(default)]
    pub displaced: Option<f64>,
    #[serde(default)]
    pub deaths: Option<f64>,
    #[serde(default)]
    pub injuries: Option<f64>,
    /// Fraction of infrastructure damaged, `[0, 1]`.
    #[serde(default)]
    pub infrastructure_damage: Option<f64>,
    #[serde(default)]
    pub admin_level: Option<AdminLevel>,
    #[serde(default)]
    pub settlement: Option<Settlement>,
}

impl DisasterImpacts {
    pub fn new(hazard_type: HazardType, region_type: RegionCategory) -> Self {
        Self {
            hazard_type,
            region_type,
            casualties: None,
            affected: None,
            displaced: None,
            deaths: None,
            injuries: None,
            infrastructure_damage: None,
            admin_level: None,
            settlement: None,
        }
    }

    pub fn deaths(&self) -> f64 {
        self.deaths.map_or(0.0, clamp_non_negative)
    }

    pub fn injuries(&self) -> f64 {
        self.injuries.map_or(0.0, clamp_non_negative)
    }

    pub fn displaced(&self) -> f64 {
        self.displaced.map_or(0.0, clamp_non_negative)
    }

    /// Affected population. When absent or zero it is the sum of deaths,
    /// injuries and displaced.
    pub fn affected(&self) -> f64 {
        let affected = self.affected.map_or(0.0, clamp_non_negative);
        if affected > 0.0 {
            affected
        } else {
            self.deaths() + self.injuries() + self.displaced()
        }
    }

    /// Unmitigated deaths: `deaths`, falling back to `casualties`.
    pub fn baseline_deaths(&self) -> f64 {
        self.deaths
            .or(self.casualties)
            .map_or(0.0, clamp_non_negative)
    }

    pub fn infrastructure_damage(&self) -> f64 {
        self.infrastructure_damage.map_or(0.0, clamp_unit)
    }

    pub fn admin_level(&self) -> AdminLevel {
        self.admin_level.unwrap_or_default()
    }

    pub fn settlement(&self) -> Settlement {
        self.settlement
            .unwrap_or_else(|| Settlement::for_region(self.region_type))
    }

    /// Fold a warning's saved lives into the death toll.
    pub fn after_warning(mut self, outcome: &WarningOutcome) -> Self {
        let saved = outcome.lives_saved as f64;
        if let Some(deaths) = self.deaths {
            self.deaths = Some(clamp_non_negative(deaths - saved));
        }
        if let Some(casualties) = self.casualties {
            self.casualties = Some(clamp_non_negative(casualties - saved));
        }
        self
    }
}

// =============================================================================
// AvailableResources
// =============================================================================

/// Resource snapshot for one response. Absent values use the engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableResources {
    pub rescue_adequacy: Option<f64>,
    pub evacuation_adequacy: Option<f64>,
    pub relief_adequacy: Option<f64>,
    pub medical_adequacy: Option<f64>,
    pub restoration_adequacy: Option<f64>,
    /// Persons that can be sheltered at once.
    pub shelter_capacity: Option<f64>,
    /// Person-days of relief supplies.
    pub relief_days: Option<f64>,
    /// Injured persons that can be treated.
    pub medical_capacity: Option<f64>,
    /// Emergency medical kits in stock.
    pub medical_kits: Option<f64>,
    pub mobilization_time_hours: Option<f64>,
}

impl AvailableResources {
    pub fn adequacy_override(&self, operation: Operation) -> Option<f64> {
        let value = match operation {
            Operation::Rescue => self.rescue_adequacy,
            Operation::Evacuation => self.evacuation_adequacy,
            Operation::Relief => self.relief_adequacy,
            Operation::Medical => self.medical_adequacy,
            Operation::Restoration => self.restoration_adequacy,
        };
        value.map(clamp_unit)
    }
}

// =============================================================================
// ResponseOutcome
// =============================================================================

/// Supplies used and demanded by one response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConsumption {
    pub daily_food_person_days: u64,
    pub daily_water_liters: u64,
    pub medical_kits: u64,
    /// Persons actually sheltered.
    pub shelter_occupancy: u64,
    pub shelter_bed_days: u64,
    pub relief_days_required: u64,
    pub shelter_beds_required: u64,
    pub medical_demand: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOutcome {
    pub hazard_type: HazardType,
    pub region: RegionCategory,
    pub response_effectiveness: BTreeMap<Operation, f64>,
    /// Always `1 - effectiveness` for the same operation.
    pub response_gaps: BTreeMap<Operation, f64>,
    pub coordination_effectiveness: f64,
    pub transport_disruption: f64,
    pub resource_adequacy: BTreeMap<Operation, f64>,
    pub agency_capability: BTreeMap<Agency, f64>,
    pub regional_capacity: f64,
    pub response_timeliness: f64,
    pub resource_consumption: ResourceConsumption,
    pub additional_lives_saved: u64,
    /// Capacity over demand. Never negative; above 1 is a surplus.
    pub shelter_access_ratio: f64,
    pub relief_provision_ratio: f64,
    pub medical_service_ratio: f64,
    pub overall_response_score: f64,
}

impl ResponseOutcome {
    pub fn effectiveness(&self, operation: Operation) -> f64 {
        self.response_effectiveness
            .get(&operation)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn gap(&self, operation: Operation) -> f64 {
        self.response_gaps.get(&operation).copied().unwrap_or(1.0)
    }
}
