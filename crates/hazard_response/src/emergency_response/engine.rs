use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use super::capacity::ResponseSite;
use super::effectiveness::{response_gaps, ResponseConditions};
use super::logistics::coverage_ratio;
use super::params::ResponseParams;
use super::types::{AvailableResources, DisasterImpacts, Operation, ResponseOutcome};
use crate::bounds::clamp_non_negative;
use crate::params_error::ParamsError;

/// Scores a disaster response against agency and regional capacity, and
/// tallies supplies against declared stocks.
///
/// Pure over its inputs: identical calls give identical outcomes.
#[derive(Resource, Debug, Clone, Default)]
pub struct EmergencyResponseEngine {
    params: Arc<ResponseParams>,
}

impl EmergencyResponseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: ResponseParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params: Arc::new(params),
        })
    }

    pub fn params(&self) -> &ResponseParams {
        &self.params
    }

    pub fn simulate_response(
        &self,
        impacts: &DisasterImpacts,
        resources: &AvailableResources,
    ) -> ResponseOutcome {
        let params = &*self.params;
        let hazard = &impacts.hazard_type;
        let region = impacts.region_type;

        let site = ResponseSite {
            region,
            admin_level: impacts.admin_level(),
            settlement: impacts.settlement(),
        };
        let agency_capability = params.agencies.capabilities(&site);
        let conditions = ResponseConditions {
            regional_capacity: params.regional_capacity(region),
            coordination: params.coordination.effectiveness(hazard),
            transport_disruption: params.transport.disruption(hazard),
        };

        let resource_adequacy: BTreeMap<Operation, f64> = Operation::ALL
            .into_iter()
            .map(|op| (op, params.resource_adequacy(op, resources, impacts)))
            .collect();
        let effectiveness = params.effectiveness_by_operation(
            hazard,
            &resource_adequacy,
            &agency_capability,
            &conditions,
        );
        let eff = |op: Operation| effectiveness.get(&op).copied().unwrap_or(0.0);

        let mobilization = resources
            .mobilization_time_hours
            .map_or(params.agencies.military.mobilization_time_hours, clamp_non_negative);
        let timeliness = params.response_timeliness(hazard, mobilization);
        let additional_lives_saved = params.additional_lives_saved(
            impacts.baseline_deaths(),
            eff(Operation::Rescue),
            eff(Operation::Medical),
            timeliness,
        );

        let affected = impacts.affected();
        let logistics = &params.logistics;
        let capacities = logistics.capacities(resources, affected);
        let consumption = logistics.consumption(
            impacts,
            &capacities,
            eff(Operation::Relief),
            eff(Operation::Medical),
            eff(Operation::Evacuation),
        );

        let shelter_access_ratio = coverage_ratio(capacities.shelter, impacts.displaced());
        let relief_provision_ratio = coverage_ratio(
            capacities.relief_days,
            affected * logistics.relief_days_per_person,
        );
        let medical_service_ratio = coverage_ratio(capacities.medical, impacts.injuries());

        let scored: Vec<f64> = effectiveness
            .values()
            .copied()
            .chain([
                shelter_access_ratio,
                relief_provision_ratio,
                medical_service_ratio,
            ])
            .map(|v| v.min(1.0))
            .collect();
        let overall_response_score = scored.iter().sum::<f64>() / scored.len() as f64;

        debug!(
            "Response: {} in {} scored {:.2}, shelter {:.2}, relief {:.2}, medical {:.2}, {} additional lives",
            hazard.name(),
            region.name(),
            overall_response_score,
            shelter_access_ratio,
            relief_provision_ratio,
            medical_service_ratio,
            additional_lives_saved
        );

        ResponseOutcome {
            hazard_type: hazard.clone(),
            region,
            response_gaps: response_gaps(&effectiveness),
            response_effectiveness: effectiveness,
            coordination_effectiveness: conditions.coordination,
            transport_disruption: conditions.transport_disruption,
            resource_adequacy,
            agency_capability,
            regional_capacity: conditions.regional_capacity,
            response_timeliness: timeliness,
            resource_consumption: consumption,
            additional_lives_saved,
            shelter_access_ratio,
            relief_provision_ratio,
            medical_service_ratio,
            overall_response_score,
        }
    }
}
