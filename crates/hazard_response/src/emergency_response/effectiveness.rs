//! Per-operation effectiveness, gaps and lives saved by the response.

use std::collections::BTreeMap;

use super::params::ResponseParams;
use super::types::{Agency, AvailableResources, DisasterImpacts, Operation};
use crate::bounds::{clamp_non_negative, clamp_unit, lift};
use crate::hazard::HazardType;

/// Scores shared by every operation of one response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseConditions {
    pub regional_capacity: f64,
    pub coordination: f64,
    pub transport_disruption: f64,
}

impl ResponseParams {
    /// Adequacy for `operation`: the supplied override, or the default.
    /// Restoration's default shrinks with infrastructure damage.
    pub fn resource_adequacy(
        &self,
        operation: Operation,
        resources: &AvailableResources,
        impacts: &DisasterImpacts,
    ) -> f64 {
        resources.adequacy_override(operation).unwrap_or_else(|| {
            let adequacy = clamp_unit(self.default_adequacy);
            if operation == Operation::Restoration {
                adequacy * (1.0 - self.restoration_damage_scale * impacts.infrastructure_damage())
            } else {
                adequacy
            }
        })
    }

    pub fn operation_effectiveness(
        &self,
        hazard: &HazardType,
        operation: Operation,
        adequacy: f64,
        agency_capability: f64,
        conditions: &ResponseConditions,
    ) -> f64 {
        let base = self.base_scores(hazard).get(operation);
        let transport = 1.0 - self.transport.penalty_scale * clamp_unit(conditions.transport_disruption);
        clamp_unit(
            base * clamp_unit(adequacy)
                * lift(agency_capability, self.lift_floor)
                * lift(conditions.regional_capacity, self.lift_floor)
                * lift(conditions.coordination, self.lift_floor)
                * transport,
        )
    }

    /// Effectiveness of every operation.
    pub fn effectiveness_by_operation(
        &self,
        hazard: &HazardType,
        adequacy: &BTreeMap<Operation, f64>,
        agency_capability: &BTreeMap<Agency, f64>,
        conditions: &ResponseConditions,
    ) -> BTreeMap<Operation, f64> {
        Operation::ALL
            .into_iter()
            .map(|operation| {
                let effectiveness = self.operation_effectiveness(
                    hazard,
                    operation,
                    adequacy.get(&operation).copied().unwrap_or(0.0),
                    self.operation_capability(operation, agency_capability),
                    conditions,
                );
                (operation, effectiveness)
            })
            .collect()
    }

    /// `min(1, golden_window / mobilization)`. Instant mobilization is fully
    /// timely.
    pub fn response_timeliness(&self, hazard: &HazardType, mobilization_hours: f64) -> f64 {
        let mobilization = clamp_non_negative(mobilization_hours);
        if mobilization <= 0.0 {
            return 1.0;
        }
        (self.lives.golden_window(hazard) / mobilization).min(1.0)
    }

    /// Deaths prevented by rescue and medical care, in `[0, baseline]`.
    pub fn additional_lives_saved(
        &self,
        baseline_deaths: f64,
        rescue: f64,
        medical: f64,
        timeliness: f64,
    ) -> u64 {
        let baseline = clamp_non_negative(baseline_deaths);
        let prevented = baseline
            * (self.lives.rescue_share * clamp_unit(rescue)
                + self.lives.medical_share * clamp_unit(medical))
            * clamp_unit(timeliness);
        prevented.round().clamp(0.0, baseline.floor()) as u64
    }
}

/// `1 - effectiveness` for every operation.
pub fn response_gaps(effectiveness: &BTreeMap<Operation, f64>) -> BTreeMap<Operation, f64> {
    effectiveness
        .iter()
        .map(|(&operation, &value)| (operation, 1.0 - value))
        .collect()
}
