//! How well a warning reaches the exposed population.

use super::params::{ChannelParams, WarningParams};
use super::types::{OutreachEstimate, SystemCapabilities};
use crate::bounds::{clamp_unit, lift};
use crate::hazard::{HazardType, RegionCategory};

/// Single-channel effectiveness before weighting.
pub fn channel_effectiveness(
    channel: &ChannelParams,
    region: RegionCategory,
    capabilities: &SystemCapabilities,
    time_of_day_factor: f64,
) -> f64 {
    let mut effectiveness = channel.coverage * channel.reliability * channel.comprehension;

    if region.is_urban() {
        effectiveness *= 1.0 + channel.urban_bias;
    } else if channel.urban_bias < 0.0 {
        effectiveness *= 1.0 - channel.urban_bias;
    }

    if channel.literacy_dependent {
        effectiveness *= lift(capabilities.literacy_rate(), 0.5);
    }
    if channel.electricity_dependent {
        effectiveness *= capabilities.electricity_reliability();
    }
    if channel.training_dependent {
        effectiveness *= lift(capabilities.staff_training(), 0.5);
    }
    if channel.time_of_day_dependent {
        effectiveness *= time_of_day_factor;
    }
    effectiveness
}

/// Weighted mean of channel effectiveness over the available systems,
/// clamped to `[0, 1]`. No recognised channel means no dissemination.
pub fn dissemination_effectiveness(
    params: &WarningParams,
    hazard: &HazardType,
    region: RegionCategory,
    capabilities: &SystemCapabilities,
) -> f64 {
    let weighting = &params.channel_weighting;
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for channel in capabilities.channels() {
        let Some(channel_params) = params.channel(channel) else {
            continue;
        };
        let weight = weighting.weight(channel, hazard, region);
        weighted_sum += weight
            * channel_effectiveness(
                channel_params,
                region,
                capabilities,
                weighting.time_of_day_factor,
            );
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        0.0
    } else {
        clamp_unit(weighted_sum / total_weight)
    }
}

/// Population reached, informed and evacuated by an issued warning.
///
/// Channel reach is blended across the urban and rural population, then
/// combined as independent overlapping audiences.
pub fn estimate_outreach(
    params: &WarningParams,
    capabilities: &SystemCapabilities,
    response_rate: f64,
) -> OutreachEstimate {
    let population = capabilities.outreach_population();
    let urban_ratio = capabilities.urban_population_ratio();

    let mut unreached = 1.0;
    let mut comprehension_sum = 0.0;
    let mut channel_count = 0usize;

    for channel in capabilities.channels() {
        let Some(channel_params) = params.channel(channel) else {
            continue;
        };
        let urban_coverage = channel_params.coverage * (1.0 + channel_params.urban_bias);
        let rural_coverage = channel_params.coverage * (1.0 - channel_params.urban_bias);
        let coverage =
            clamp_unit(urban_coverage * urban_ratio + rural_coverage * (1.0 - urban_ratio));
        let reach = clamp_unit(coverage * channel_params.reliability);

        unreached *= 1.0 - reach;
        comprehension_sum += channel_params.comprehension;
        channel_count += 1;
    }

    let reached_fraction = if channel_count == 0 { 0.0 } else { 1.0 - unreached };
    let base_comprehension = if channel_count == 0 {
        0.0
    } else {
        comprehension_sum / channel_count as f64
    };

    let outreach = &params.outreach;
    let message_quality = 1.0 - outreach.clarity_weight - outreach.consistency_weight
        + outreach.clarity_weight * capabilities.message_clarity()
        + outreach.consistency_weight * capabilities.message_consistency();
    let comprehension = (base_comprehension * message_quality)
        .clamp(outreach.min_comprehension, outreach.max_comprehension);

    let reached = population * reached_fraction;
    let informed = reached * comprehension;
    let evacuated = informed * clamp_unit(response_rate);

    OutreachEstimate {
        total_population: population,
        population_reached: reached.round() as u64,
        population_informed: informed.round() as u64,
        evacuated_population: evacuated.round() as u64,
        comprehension,
    }
}
