//! Share of a warned population that takes protective action.

use super::params::WarningParams;
use super::types::{LeadTimeCategory, PriorExperience, SystemCapabilities, WarningSpecificity};
use crate::bounds::clamp_unit;
use crate::hazard::{HazardType, RegionCategory};

/// Per-call situation the compliance model reads besides the capabilities.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceContext<'a> {
    pub hazard: &'a HazardType,
    pub region: RegionCategory,
    /// Intensity as perceived by the population, already clamped.
    pub intensity: f64,
    pub lead_time: LeadTimeCategory,
    pub trust: f64,
}

/// Product of every behavioural factor, clamped to `[0, 1]`.
pub fn population_response_rate(
    params: &WarningParams,
    context: &ComplianceContext<'_>,
    capabilities: &SystemCapabilities,
) -> f64 {
    let behavior = &params.behavior;

    let intensity_factor = behavior.intensity_floor + behavior.intensity_slope * context.intensity;
    let lead_time_factor = behavior.lead_time.factor(context.lead_time);

    let specificity_factor = match capabilities.warning_specificity() {
        WarningSpecificity::Generic => behavior.specificity.generic,
        WarningSpecificity::LocationSpecific => behavior.specificity.location_specific,
        WarningSpecificity::ImpactBased => behavior.specificity.impact_based,
    };
    let experience_factor = match capabilities.previous_experience() {
        PriorExperience::NoPriorEvent => behavior.experience.none,
        PriorExperience::FalseAlarm => behavior.experience.false_alarm,
        PriorExperience::MinorImpact => behavior.experience.minor_impact,
        PriorExperience::MajorImpact => behavior.experience.major_impact,
    };

    let regional_factor = behavior.affinity(context.region, context.hazard)
        * (behavior.capacity_floor
            + behavior.capacity_slope * params.regional_capacity(context.region));

    let demographics = capabilities.demographics();
    let demographic_factor = demographics.gender.weighted_by(&behavior.gender)
        * demographics.age.weighted_by(&behavior.age)
        * demographics.income.weighted_by(&behavior.income)
        * demographics.livelihood.weighted_by(&behavior.livelihood);

    clamp_unit(
        behavior.compliance_base_rate
            * intensity_factor
            * lead_time_factor
            * specificity_factor
            * experience_factor
            * regional_factor
            * demographic_factor
            * context.trust,
    )
}
