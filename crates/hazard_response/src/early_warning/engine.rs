use std::sync::Arc;

use bevy::prelude::*;

use super::compliance::{population_response_rate, ComplianceContext};
use super::dissemination::{dissemination_effectiveness, estimate_outreach};
use super::forecast::{nearest_bucket, select_lead_time};
use super::params::WarningParams;
use super::trust::RegionalTrustTracker;
use super::types::{SystemCapabilities, WarningOutcome};
use crate::hazard::HazardEvent;
use crate::params_error::ParamsError;
use crate::sim_rng::RandomSource;

/// Forecast, issuance, dissemination and compliance for one hazard event.
///
/// The engine only reads its parameter tables. Trust state and randomness are
/// passed in by the caller, so one engine can be shared by many workers.
#[derive(Resource, Debug, Clone, Default)]
pub struct EarlyWarningEngine {
    params: Arc<WarningParams>,
}

impl EarlyWarningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine over custom tables, rejecting invalid ones.
    pub fn with_params(params: WarningParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params: Arc::new(params),
        })
    }

    pub fn params(&self) -> &WarningParams {
        &self.params
    }

    /// A tracker using this engine's false-alarm decay settings.
    pub fn new_trust_tracker(&self) -> RegionalTrustTracker {
        RegionalTrustTracker::new(self.params.false_alarm)
    }

    /// Run one hazard event through the warning chain.
    ///
    /// Draw order from `rng`: one uniform for the lead time, one uniform for
    /// forecast correctness, then one Beta draw if a warning threshold is set
    /// and the forecast was correct. Unsupported hazards draw nothing.
    pub fn simulate_warning_process(
        &self,
        event: &HazardEvent,
        capabilities: &SystemCapabilities,
        trust: &mut RegionalTrustTracker,
        rng: &mut impl RandomSource,
    ) -> WarningOutcome {
        let params = &*self.params;
        let hazard = &event.hazard_type;
        let region = event.region();

        let Some(forecast) = params.forecast(hazard) else {
            debug!("Warning: no forecast capability for '{}'", hazard.name());
            return WarningOutcome::not_possible(event);
        };
        let Some(lead_time) = select_lead_time(forecast, event.duration_hours(), rng) else {
            debug!("Warning: '{}' has an empty lead-time table", hazard.name());
            return WarningOutcome::not_possible(event);
        };

        let intensity = event.clamped_intensity();
        let lead_time_category = forecast.categories.categorize(lead_time);
        let base_skill = nearest_bucket(&forecast.skill, lead_time).map_or(0.0, |b| b.skill);
        let skill = params.skill_blend.adjusted_skill(
            base_skill,
            capabilities.technology_level(),
            capabilities.staff_training(),
            capabilities.observation_network(),
        );
        let forecast_correct = rng.uniform() < skill;

        let mut outcome = WarningOutcome {
            warning_possible: true,
            forecast_lead_time: Some(lead_time),
            lead_time_category: Some(lead_time_category),
            forecast_accuracy: skill,
            forecast_correct,
            trust_factor: trust.current(region),
            ..WarningOutcome::not_possible(event)
        };

        if forecast_correct {
            if let Some(threshold) = capabilities.warning_threshold() {
                let concentration = params.issuance.beta_concentration;
                let probability =
                    rng.beta(concentration * skill, concentration * (1.0 - skill));
                outcome.forecast_probability = Some(probability);
                if probability < threshold {
                    debug!(
                        "Warning: {} forecast withheld, confidence {:.2} below threshold {:.2}",
                        hazard.name(),
                        probability,
                        threshold
                    );
                    return outcome;
                }
            }
        } else if intensity > params.issuance.missed_warning_intensity {
            info!(
                "Warning: missed {} in {} (intensity {:.2}, skill {:.2})",
                hazard.name(),
                region.name(),
                intensity,
                skill
            );
            return outcome;
        } else {
            outcome.false_alarm = true;
        }

        outcome.warning_issued = true;
        outcome.dissemination_effectiveness =
            dissemination_effectiveness(params, hazard, region, capabilities);

        let perceived_intensity = if outcome.false_alarm {
            params.issuance.false_alarm_perceived_intensity
        } else {
            intensity
        };
        let context = ComplianceContext {
            hazard,
            region,
            intensity: perceived_intensity,
            lead_time: lead_time_category,
            trust: outcome.trust_factor,
        };
        outcome.population_response_rate =
            population_response_rate(params, &context, capabilities);
        outcome.outreach = Some(estimate_outreach(
            params,
            capabilities,
            outcome.population_response_rate,
        ));

        if outcome.false_alarm {
            trust.decay(region, hazard);
            info!(
                "Warning: false alarm for {} in {}, trust now {:.2} after {} false alarms",
                hazard.name(),
                region.name(),
                trust.current(region),
                trust.false_alarm_count(region)
            );
            return outcome;
        }

        if intensity > params.casualties.significant_intensity {
            let potential = params.casualties.potential_casualties(
                hazard,
                region,
                intensity,
                capabilities.exposed_population(),
            );
            let prevented = potential
                * outcome.dissemination_effectiveness
                * outcome.population_response_rate;
            outcome.potential_casualties = potential;
            outcome.lives_saved = prevented.round().max(0.0) as u64;
        }

        debug!(
            "Warning: {} in {} issued {:.0}h ahead, dissemination {:.2}, response {:.2}, {} lives saved",
            hazard.name(),
            region.name(),
            lead_time,
            outcome.dissemination_effectiveness,
            outcome.population_response_rate,
            outcome.lives_saved
        );
        outcome
    }
}
