//! Agency capability and regional capacity scores.

use std::collections::BTreeMap;

use super::params::{AgencyParams, FieldServiceParams, ResponseParams};
use super::types::{AdminLevel, Agency, Operation, Settlement};
use crate::bounds::{clamp_unit, lift};
use crate::hazard::RegionCategory;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Where the response happens, as the agency tables see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSite {
    pub region: RegionCategory,
    pub admin_level: AdminLevel,
    pub settlement: Settlement,
}

impl AgencyParams {
    fn field_service(&self, service: &FieldServiceParams, settlement: Settlement) -> f64 {
        let readiness = mean(&[service.coverage, service.equipment, service.training]);
        let minutes = service.response_minutes.get(settlement).max(0.0);
        let speed = if self.reference_response_minutes + minutes > 0.0 {
            self.reference_response_minutes / (self.reference_response_minutes + minutes)
        } else {
            1.0
        };
        readiness * lift(speed, self.response_time_floor)
    }

    /// Capability of one agency at `site`, in `[0, 1]`.
    pub fn capability(&self, agency: Agency, site: &ResponseSite) -> f64 {
        let value = match agency {
            Agency::DisasterManagement => self.disaster_management.get(site.admin_level),
            Agency::FireService => self.field_service(&self.fire_service, site.settlement),
            Agency::Police => self.field_service(&self.police, site.settlement),
            Agency::MedicalServices => {
                0.5 * self.medical.emergency_capacity
                    + 0.5 * self.medical.distribution.get(site.settlement)
            }
            Agency::Military => mean(&[self.military.equipment, self.military.training]),
            Agency::Ngos => {
                let ngos = &self.ngos;
                let regional = ngos
                    .regional_capacity
                    .get(&site.region)
                    .copied()
                    .unwrap_or(ngos.default_regional_capacity);
                0.5 * mean(&[ngos.national_coverage, ngos.resources, ngos.coordination])
                    + 0.5 * regional
            }
        };
        clamp_unit(value)
    }

    pub fn capabilities(&self, site: &ResponseSite) -> BTreeMap<Agency, f64> {
        Agency::ALL
            .into_iter()
            .map(|agency| (agency, self.capability(agency, site)))
            .collect()
    }
}

impl ResponseParams {
    /// Weighted blend of the region's capacity profile.
    pub fn regional_capacity(&self, region: RegionCategory) -> f64 {
        clamp_unit(self.profile(region).blend(&self.capacity_weights))
    }

    /// Mean capability of the agencies leading `operation`.
    pub fn operation_capability(
        &self,
        operation: Operation,
        capabilities: &BTreeMap<Agency, f64>,
    ) -> f64 {
        let Some(agencies) = self.operation_agencies.get(&operation) else {
            return 0.0;
        };
        let values: Vec<f64> = agencies
            .iter()
            .filter_map(|agency| capabilities.get(agency).copied())
            .collect();
        mean(&values)
    }
}
