//! Unwarned casualty baseline used for the lives-saved estimate.

use super::params::CasualtyParams;
use crate::bounds::{clamp_non_negative, clamp_unit};
use crate::config::CASUALTY_RATE_POPULATION;
use crate::hazard::{HazardType, RegionCategory};

impl CasualtyParams {
    pub fn base_rate(&self, hazard: &HazardType) -> f64 {
        self.base_rates
            .get(hazard)
            .copied()
            .unwrap_or(self.default_base_rate)
    }

    /// Linear up to the severe threshold, quadratic amplification above it.
    pub fn intensity_factor(&self, intensity: f64) -> f64 {
        let intensity = clamp_unit(intensity);
        if intensity > self.severe_intensity {
            let excess = intensity - self.severe_intensity;
            1.0 + self.severe_amplification * excess * excess
        } else if self.severe_intensity > 0.0 {
            intensity / self.severe_intensity
        } else {
            1.0
        }
    }

    pub fn exposure(&self, region: RegionCategory, hazard: &HazardType) -> f64 {
        self.exposure
            .iter()
            .find(|e| e.region == region && e.hazards.contains(hazard))
            .map_or(1.0, |e| e.factor)
    }

    pub fn density(&self, region: RegionCategory) -> f64 {
        self.density_proxy
            .get(&region)
            .copied()
            .unwrap_or(self.default_density)
    }

    /// Deaths expected without any warning.
    pub fn potential_casualties(
        &self,
        hazard: &HazardType,
        region: RegionCategory,
        intensity: f64,
        exposed_population: f64,
    ) -> f64 {
        self.base_rate(hazard)
            * self.intensity_factor(intensity)
            * self.exposure(region, hazard)
            * self.density(region)
            * clamp_non_negative(exposed_population)
            / CASUALTY_RATE_POPULATION
    }
}
