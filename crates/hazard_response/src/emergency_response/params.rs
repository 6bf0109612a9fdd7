//! Built-in parameter tables for the response engine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{AdminLevel, Agency, Operation, Settlement};
use crate::config::DEFAULT_RESOURCE_ADEQUACY;
use crate::hazard::{HazardType, RegionCategory};
use crate::params_error::{check_non_negative, check_unit, check_weight_sum, ParamsError};

// ---------------------------------------------------------------------------
// Agencies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdminTiers {
    pub national: f64,
    pub division: f64,
    pub district: f64,
    pub upazila: f64,
    pub union: f64,
}

impl AdminTiers {
    pub fn get(&self, level: AdminLevel) -> f64 {
        match level {
            AdminLevel::National => self.national,
            AdminLevel::Division => self.division,
            AdminLevel::District => self.district,
            AdminLevel::Upazila => self.upazila,
            AdminLevel::Union => self.union,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementTable {
    pub urban: f64,
    pub suburban: f64,
    pub rural: f64,
}

impl SettlementTable {
    pub fn get(&self, settlement: Settlement) -> f64 {
        match settlement {
            Settlement::Urban => self.urban,
            Settlement::Suburban => self.suburban,
            Settlement::Rural => self.rural,
        }
    }
}

/// Fire service and police share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldServiceParams {
    pub coverage: f64,
    pub equipment: f64,
    pub training: f64,
    pub response_minutes: SettlementTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MedicalParams {
    pub emergency_capacity: f64,
    pub distribution: SettlementTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MilitaryParams {
    pub equipment: f64,
    pub training: f64,
    /// Default response mobilization time.
    pub mobilization_time_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgoParams {
    pub national_coverage: f64,
    pub resources: f64,
    pub coordination: f64,
    pub regional_capacity: BTreeMap<RegionCategory, f64>,
    pub default_regional_capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyParams {
    pub disaster_management: AdminTiers,
    pub fire_service: FieldServiceParams,
    pub police: FieldServiceParams,
    pub medical: MedicalParams,
    pub military: MilitaryParams,
    pub ngos: NgoParams,
    /// Response-time factor is `reference / (reference + minutes)`.
    pub reference_response_minutes: f64,
    /// Floor of the lifted response-time factor.
    pub response_time_floor: f64,
}

impl Default for AgencyParams {
    fn default() -> Self {
        Self {
            disaster_management: AdminTiers {
                national: 0.8,
                division: 0.7,
                district: 0.6,
                upazila: 0.5,
                union: 0.4,
            },
            fire_service: FieldServiceParams {
                coverage: 0.6,
                equipment: 0.5,
                training: 0.7,
                response_minutes: SettlementTable {
                    urban: 20.0,
                    suburban: 40.0,
                    rural: 90.0,
                },
            },
            police: FieldServiceParams {
                coverage: 0.8,
                equipment: 0.6,
                training: 0.5,
                response_minutes: SettlementTable {
                    urban: 15.0,
                    suburban: 30.0,
                    rural: 60.0,
                },
            },
            medical: MedicalParams {
                emergency_capacity: 0.4,
                distribution: SettlementTable {
                    urban: 0.8,
                    suburban: 0.4,
                    rural: 0.2,
                },
            },
            military: MilitaryParams {
                equipment: 0.8,
                training: 0.9,
                mobilization_time_hours: 24.0,
            },
            ngos: NgoParams {
                national_coverage: 0.7,
                resources: 0.6,
                coordination: 0.5,
                regional_capacity: [
                    (RegionCategory::Coastal, 0.8),
                    (RegionCategory::Urban, 0.7),
                    (RegionCategory::FloodPlain, 0.6),
                    (RegionCategory::HaorBasin, 0.5),
                    (RegionCategory::HillTracts, 0.4),
                ]
                .into_iter()
                .collect(),
                default_regional_capacity: 0.6,
            },
            reference_response_minutes: 60.0,
            response_time_floor: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Regional capacity
// ---------------------------------------------------------------------------

/// Sub-scores for one region category. Also used for the blend weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityProfile {
    pub shelters: f64,
    pub relief: f64,
    pub equipment: f64,
    pub telecom: f64,
    pub logistics: f64,
}

impl CapacityProfile {
    const fn uniform(value: f64) -> Self {
        Self {
            shelters: value,
            relief: value,
            equipment: value,
            telecom: value,
            logistics: value,
        }
    }

    fn values(&self) -> [f64; 5] {
        [
            self.shelters,
            self.relief,
            self.equipment,
            self.telecom,
            self.logistics,
        ]
    }

    /// `sum(self[i] * weights[i])`.
    pub fn blend(&self, weights: &CapacityProfile) -> f64 {
        self.values()
            .iter()
            .zip(weights.values())
            .map(|(v, w)| v * w)
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Per-operation scores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationScores {
    pub rescue: f64,
    pub evacuation: f64,
    pub relief: f64,
    pub medical: f64,
    pub restoration: f64,
}

impl OperationScores {
    pub fn get(&self, operation: Operation) -> f64 {
        match operation {
            Operation::Rescue => self.rescue,
            Operation::Evacuation => self.evacuation,
            Operation::Relief => self.relief,
            Operation::Medical => self.medical,
            Operation::Restoration => self.restoration,
        }
    }
}

fn scores(rescue: f64, evacuation: f64, relief: f64, medical: f64, restoration: f64) -> OperationScores {
    OperationScores {
        rescue,
        evacuation,
        relief,
        medical,
        restoration,
    }
}

// ---------------------------------------------------------------------------
// Coordination
// ---------------------------------------------------------------------------

/// Pairwise coordination scores. Also used for their blend weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinationScores {
    pub inter_agency: f64,
    pub govt_ngo: f64,
    pub national_local: f64,
    pub civil_military: f64,
    pub international: f64,
}

impl CoordinationScores {
    fn values(&self) -> [f64; 5] {
        [
            self.inter_agency,
            self.govt_ngo,
            self.national_local,
            self.civil_military,
            self.international,
        ]
    }

    pub fn blend(&self, weights: &CoordinationScores) -> f64 {
        self.values()
            .iter()
            .zip(weights.values())
            .map(|(v, w)| v * w)
            .sum()
    }
}

fn coordination(
    inter_agency: f64,
    govt_ngo: f64,
    national_local: f64,
    civil_military: f64,
    international: f64,
) -> CoordinationScores {
    CoordinationScores {
        inter_agency,
        govt_ngo,
        national_local,
        civil_military,
        international,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinationParams {
    pub scores: CoordinationScores,
    pub default_weights: CoordinationScores,
    pub hazard_weights: BTreeMap<HazardType, CoordinationScores>,
}

impl Default for CoordinationParams {
    fn default() -> Self {
        Self {
            scores: coordination(0.6, 0.5, 0.5, 0.7, 0.6),
            default_weights: coordination(0.2, 0.2, 0.2, 0.2, 0.2),
            hazard_weights: [
                (HazardType::Cyclone, coordination(0.2, 0.2, 0.15, 0.25, 0.2)),
                (HazardType::Flood, coordination(0.25, 0.25, 0.2, 0.15, 0.15)),
                (HazardType::Earthquake, coordination(0.2, 0.15, 0.15, 0.25, 0.25)),
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl CoordinationParams {
    pub fn weights(&self, hazard: &HazardType) -> &CoordinationScores {
        self.hazard_weights
            .get(hazard)
            .unwrap_or(&self.default_weights)
    }

    pub fn effectiveness(&self, hazard: &HazardType) -> f64 {
        self.scores.blend(self.weights(hazard))
    }
}

// ---------------------------------------------------------------------------
// Transport, timeliness and logistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportParams {
    pub disruption: BTreeMap<HazardType, f64>,
    pub default_disruption: f64,
    /// Effectiveness is multiplied by `1 - penalty_scale * disruption`.
    pub penalty_scale: f64,
}

impl Default for TransportParams {
    fn default() -> Self {
        Self {
            disruption: [
                (HazardType::Flood, 0.7),
                (HazardType::FlashFlood, 0.7),
                (HazardType::RiverErosion, 0.7),
                (HazardType::Cyclone, 0.6),
                (HazardType::StormSurge, 0.6),
                (HazardType::Earthquake, 0.8),
                (HazardType::Landslide, 0.7),
                (HazardType::Drought, 0.2),
            ]
            .into_iter()
            .collect(),
            default_disruption: 0.5,
            penalty_scale: 0.5,
        }
    }
}

impl TransportParams {
    pub fn disruption(&self, hazard: &HazardType) -> f64 {
        self.disruption
            .get(hazard)
            .copied()
            .unwrap_or(self.default_disruption)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivesParams {
    pub rescue_share: f64,
    pub medical_share: f64,
    /// Hours after onset within which response still prevents deaths.
    pub golden_window_hours: BTreeMap<HazardType, f64>,
    pub default_golden_window_hours: f64,
}

impl Default for LivesParams {
    fn default() -> Self {
        Self {
            rescue_share: 0.6,
            medical_share: 0.4,
            golden_window_hours: [
                (HazardType::FlashFlood, 6.0),
                (HazardType::Landslide, 6.0),
                (HazardType::StormSurge, 12.0),
                (HazardType::Cyclone, 24.0),
                (HazardType::Flood, 48.0),
                (HazardType::Earthquake, 72.0),
                (HazardType::RiverErosion, 72.0),
                (HazardType::Drought, 720.0),
            ]
            .into_iter()
            .collect(),
            default_golden_window_hours: 24.0,
        }
    }
}

impl LivesParams {
    pub fn golden_window(&self, hazard: &HazardType) -> f64 {
        self.golden_window_hours
            .get(hazard)
            .copied()
            .unwrap_or(self.default_golden_window_hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticsParams {
    pub relief_days_per_person: f64,
    pub food_person_days_per_person: f64,
    pub water_liters_per_person: f64,
    /// Share of the affected population needing a medical kit.
    pub medical_kit_rate: f64,
    pub default_shelter_capacity: f64,
    pub default_relief_days: f64,
    pub default_medical_kits: f64,
    /// Medical capacity as a share of the affected population, when unset.
    pub default_medical_capacity_rate: f64,
}

impl Default for LogisticsParams {
    fn default() -> Self {
        Self {
            relief_days_per_person: 7.0,
            food_person_days_per_person: 1.0,
            water_liters_per_person: 3.0,
            medical_kit_rate: 0.05,
            default_shelter_capacity: 2_500_000.0,
            default_relief_days: 1_000_000.0,
            default_medical_kits: 50_000.0,
            default_medical_capacity_rate: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// ResponseParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseParams {
    pub agencies: AgencyParams,
    /// Agencies whose mean capability drives each operation.
    pub operation_agencies: BTreeMap<Operation, Vec<Agency>>,
    pub regional_profiles: BTreeMap<RegionCategory, CapacityProfile>,
    pub default_profile: CapacityProfile,
    pub capacity_weights: CapacityProfile,
    pub base_effectiveness: BTreeMap<HazardType, OperationScores>,
    /// Row used for hazards missing from `base_effectiveness`.
    pub fallback_hazard: HazardType,
    pub coordination: CoordinationParams,
    pub transport: TransportParams,
    pub lives: LivesParams,
    pub logistics: LogisticsParams,
    pub default_adequacy: f64,
    /// Default restoration adequacy is scaled by `1 - scale * damage`.
    pub restoration_damage_scale: f64,
    /// Floor of the lift applied to agency, regional and coordination scores.
    pub lift_floor: f64,
}

impl Default for ResponseParams {
    fn default() -> Self {
        let operation_agencies = [
            (
                Operation::Rescue,
                vec![Agency::FireService, Agency::Military, Agency::Police],
            ),
            (
                Operation::Evacuation,
                vec![Agency::DisasterManagement, Agency::Police, Agency::Military],
            ),
            (
                Operation::Relief,
                vec![Agency::Ngos, Agency::DisasterManagement],
            ),
            (Operation::Medical, vec![Agency::MedicalServices]),
            (
                Operation::Restoration,
                vec![Agency::Military, Agency::DisasterManagement],
            ),
        ]
        .into_iter()
        .collect();

        let profile = |shelters, relief, equipment, telecom, logistics| CapacityProfile {
            shelters,
            relief,
            equipment,
            telecom,
            logistics,
        };
        let regional_profiles = [
            (RegionCategory::Coastal, profile(0.8, 0.7, 0.6, 0.7, 0.6)),
            (RegionCategory::FloodPlain, profile(0.6, 0.6, 0.6, 0.6, 0.5)),
            (RegionCategory::HaorBasin, profile(0.4, 0.5, 0.5, 0.5, 0.4)),
            (RegionCategory::HillTracts, profile(0.3, 0.4, 0.4, 0.4, 0.3)),
            (RegionCategory::Urban, profile(0.6, 0.7, 0.7, 0.8, 0.7)),
        ]
        .into_iter()
        .collect();

        let base_effectiveness = [
            (HazardType::Flood, scores(0.7, 0.6, 0.6, 0.5, 0.5)),
            (HazardType::Cyclone, scores(0.6, 0.7, 0.6, 0.5, 0.4)),
            (HazardType::FlashFlood, scores(0.5, 0.4, 0.5, 0.5, 0.6)),
            (HazardType::Landslide, scores(0.4, 0.3, 0.4, 0.4, 0.5)),
            (HazardType::Earthquake, scores(0.3, 0.4, 0.5, 0.4, 0.3)),
            (HazardType::Drought, scores(0.8, 0.7, 0.6, 0.6, 0.4)),
            (HazardType::StormSurge, scores(0.5, 0.6, 0.6, 0.5, 0.4)),
            (HazardType::RiverErosion, scores(0.6, 0.6, 0.5, 0.5, 0.4)),
        ]
        .into_iter()
        .collect();

        Self {
            agencies: AgencyParams::default(),
            operation_agencies,
            regional_profiles,
            default_profile: CapacityProfile::uniform(0.6),
            capacity_weights: CapacityProfile::uniform(0.2),
            base_effectiveness,
            fallback_hazard: HazardType::Flood,
            coordination: CoordinationParams::default(),
            transport: TransportParams::default(),
            lives: LivesParams::default(),
            logistics: LogisticsParams::default(),
            default_adequacy: DEFAULT_RESOURCE_ADEQUACY,
            restoration_damage_scale: 0.5,
            lift_floor: 0.5,
        }
    }
}

impl ResponseParams {
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: ResponseParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn profile(&self, region: RegionCategory) -> &CapacityProfile {
        self.regional_profiles
            .get(&region)
            .unwrap_or(&self.default_profile)
    }

    /// Base effectiveness row, falling back to the flood row. A table with
    /// neither yields a neutral 0.5 everywhere.
    pub fn base_scores(&self, hazard: &HazardType) -> OperationScores {
        self.base_effectiveness
            .get(hazard)
            .or_else(|| self.base_effectiveness.get(&self.fallback_hazard))
            .copied()
            .unwrap_or(scores(0.5, 0.5, 0.5, 0.5, 0.5))
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        check_weight_sum("capacity_weights", &self.capacity_weights.values())?;
        check_weight_sum(
            "coordination.default_weights",
            &self.coordination.default_weights.values(),
        )?;
        for (hazard, weights) in &self.coordination.hazard_weights {
            check_weight_sum(
                &format!("coordination.hazard_weights.{}", hazard.name()),
                &weights.values(),
            )?;
        }
        check_weight_sum(
            "lives",
            &[self.lives.rescue_share, self.lives.medical_share],
        )?;

        for value in self.coordination.scores.values() {
            check_unit("coordination.scores", value)?;
        }
        for (region, profile) in &self.regional_profiles {
            for value in profile.values() {
                check_unit(&format!("regional_profiles.{}", region.name()), value)?;
            }
        }
        for (hazard, row) in &self.base_effectiveness {
            for operation in Operation::ALL {
                check_unit(
                    &format!("base_effectiveness.{}.{}", hazard.name(), operation.name()),
                    row.get(operation),
                )?;
            }
        }
        for (hazard, disruption) in &self.transport.disruption {
            check_unit(&format!("transport.disruption.{}", hazard.name()), *disruption)?;
        }
        for (hazard, window) in &self.lives.golden_window_hours {
            check_non_negative(&format!("lives.golden_window_hours.{}", hazard.name()), *window)?;
        }
        for operation in Operation::ALL {
            let agencies = self.operation_agencies.get(&operation);
            if agencies.map_or(true, |a| a.is_empty()) {
                return Err(ParamsError::EmptyTable {
                    table: format!("operation_agencies.{}", operation.name()),
                });
            }
        }
        check_unit("default_adequacy", self.default_adequacy)?;
        check_unit("restoration_damage_scale", self.restoration_damage_scale)?;
        check_unit("lift_floor", self.lift_floor)?;
        check_unit("transport.penalty_scale", self.transport.penalty_scale)?;
        check_non_negative(
            "agencies.military.mobilization_time_hours",
            self.agencies.military.mobilization_time_hours,
        )?;
        Ok(())
    }
}
