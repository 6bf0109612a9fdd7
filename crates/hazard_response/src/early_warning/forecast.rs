//! Lead-time draw and forecast skill.

use super::params::{HazardForecast, SkillBlend, SkillBucket, WeightedLeadTime};
use crate::bounds::clamp_unit;
use crate::sim_rng::RandomSource;

/// Cumulative-weight pick. `draw` is a uniform value in `[0, 1)`; draws past
/// the final cumulative weight land on the last candidate.
pub fn pick_weighted(candidates: &[WeightedLeadTime], draw: f64) -> Option<f64> {
    let total: f64 = candidates.iter().map(|c| c.weight.max(0.0)).sum();
    if total <= 0.0 {
        return candidates.first().map(|c| c.hours);
    }
    let target = draw * total;
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += candidate.weight.max(0.0);
        if target < cumulative {
            return Some(candidate.hours);
        }
    }
    candidates.last().map(|c| c.hours)
}

/// Candidate set for this event: the extended set once the footprint lasts
/// longer than its minimum duration.
pub fn lead_time_candidates(forecast: &HazardForecast, duration_hours: Option<f64>) -> &[WeightedLeadTime] {
    match (&forecast.extended_lead_times, duration_hours) {
        (Some(extended), Some(duration)) if duration > extended.min_duration_hours => {
            &extended.candidates
        }
        _ => &forecast.lead_times,
    }
}

/// Draw a lead time in hours. Consumes exactly one uniform value.
pub fn select_lead_time(
    forecast: &HazardForecast,
    duration_hours: Option<f64>,
    rng: &mut impl RandomSource,
) -> Option<f64> {
    let draw = rng.uniform();
    pick_weighted(lead_time_candidates(forecast, duration_hours), draw)
        .or_else(|| forecast.skill.first().map(|b| b.lead_time_hours))
}

/// Bucket closest to `lead_time_hours`; a tie goes to the shorter lead time.
pub fn nearest_bucket(buckets: &[SkillBucket], lead_time_hours: f64) -> Option<&SkillBucket> {
    let mut best: Option<&SkillBucket> = None;
    for bucket in buckets {
        let distance = (bucket.lead_time_hours - lead_time_hours).abs();
        best = match best {
            None => Some(bucket),
            Some(current) => {
                let current_distance = (current.lead_time_hours - lead_time_hours).abs();
                if distance < current_distance
                    || (distance == current_distance
                        && bucket.lead_time_hours < current.lead_time_hours)
                {
                    Some(bucket)
                } else {
                    Some(current)
                }
            }
        };
    }
    best
}

impl SkillBlend {
    /// `base * (1 + t*tech + r*training + o*obs)`, clamped to `[0, 1]`.
    pub fn adjusted_skill(&self, base: f64, technology: f64, training: f64, observation: f64) -> f64 {
        clamp_unit(
            base * (1.0
                + self.technology * technology
                + self.training * training
                + self.observation * observation),
        )
    }
}
