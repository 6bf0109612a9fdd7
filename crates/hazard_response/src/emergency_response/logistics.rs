//! Supply demand, consumption and coverage ratios.

use super::params::LogisticsParams;
use super::types::{AvailableResources, DisasterImpacts, ResourceConsumption};
use crate::bounds::clamp_non_negative;

/// Capacity over demand. Demand below one person counts as one.
#[inline]
pub fn coverage_ratio(capacity: f64, demand: f64) -> f64 {
    clamp_non_negative(capacity) / demand.max(1.0)
}

/// Declared capacities with defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacities {
    pub shelter: f64,
    pub relief_days: f64,
    pub medical: f64,
    pub medical_kits: f64,
}

impl LogisticsParams {
    pub fn capacities(&self, resources: &AvailableResources, affected: f64) -> Capacities {
        Capacities {
            shelter: resources
                .shelter_capacity
                .map_or(self.default_shelter_capacity, clamp_non_negative),
            relief_days: resources
                .relief_days
                .map_or(self.default_relief_days, clamp_non_negative),
            medical: resources.medical_capacity.map_or(
                affected * self.default_medical_capacity_rate,
                clamp_non_negative,
            ),
            medical_kits: resources
                .medical_kits
                .map_or(self.default_medical_kits, clamp_non_negative),
        }
    }

    /// Consumption for one response given relief, medical and evacuation
    /// effectiveness.
    pub fn consumption(
        &self,
        impacts: &DisasterImpacts,
        capacities: &Capacities,
        relief: f64,
        medical: f64,
        evacuation: f64,
    ) -> ResourceConsumption {
        let affected = impacts.affected();
        let displaced = impacts.displaced();

        let food = affected * self.food_person_days_per_person * relief;
        let water = affected * self.water_liters_per_person * relief;
        let kits = (affected * self.medical_kit_rate * medical).min(capacities.medical_kits);
        let occupancy = (displaced * evacuation).min(capacities.shelter);

        ResourceConsumption {
            daily_food_person_days: food.round() as u64,
            daily_water_liters: water.round() as u64,
            medical_kits: kits.round() as u64,
            shelter_occupancy: occupancy.round() as u64,
            shelter_bed_days: (occupancy * self.relief_days_per_person).round() as u64,
            relief_days_required: (affected * self.relief_days_per_person).round() as u64,
            shelter_beds_required: displaced.round() as u64,
            medical_demand: impacts.injuries().round() as u64,
        }
    }
}
