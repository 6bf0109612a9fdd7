//! Per-region public trust in warnings, eroded by false alarms.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::params::FalseAlarmParams;
use crate::bounds::clamp_non_negative;
use crate::hazard::{HazardType, RegionCategory};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct RegionalTrust {
    pub trust: f64,
    pub false_alarms: u32,
    pub false_alarms_by_hazard: BTreeMap<HazardType, u32>,
}

/// Caller-owned trust state. Each concurrent worker keeps its own tracker.
///
/// Regions start at full trust (1.0) and are only stored once something
/// happens to them.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct RegionalTrustTracker {
    params: FalseAlarmParams,
    regions: BTreeMap<RegionCategory, RegionalTrust>,
}

impl Default for RegionalTrustTracker {
    fn default() -> Self {
        Self::new(FalseAlarmParams::default())
    }
}

impl RegionalTrustTracker {
    pub fn new(params: FalseAlarmParams) -> Self {
        Self {
            params,
            regions: BTreeMap::new(),
        }
    }

    pub fn params(&self) -> &FalseAlarmParams {
        &self.params
    }

    /// Trust multiplier for `region`, in `[minimum_trust, 1]`.
    pub fn current(&self, region: RegionCategory) -> f64 {
        self.regions.get(&region).map_or(1.0, |r| r.trust)
    }

    /// Record a false alarm and erode trust by `decay_rate`.
    pub fn decay(&mut self, region: RegionCategory, hazard: &HazardType) {
        let params = self.params;
        let entry = self.regions.entry(region).or_insert_with(|| RegionalTrust {
            trust: 1.0,
            ..Default::default()
        });
        entry.trust = (entry.trust - params.decay_rate).max(params.minimum_trust);
        entry.false_alarms += 1;
        *entry
            .false_alarms_by_hazard
            .entry(hazard.clone())
            .or_insert(0) += 1;
    }

    /// Let every region recover for `years`. False alarm counts are kept.
    pub fn recover(&mut self, years: f64) {
        let years = clamp_non_negative(years);
        if self.params.recovery_years <= 0.0 {
            return;
        }
        let per_year = self.params.decay_rate / self.params.recovery_years;
        for entry in self.regions.values_mut() {
            entry.trust = (entry.trust + per_year * years).min(1.0);
        }
    }

    pub fn reset(&mut self, region: RegionCategory) {
        self.regions.remove(&region);
    }

    pub fn reset_all(&mut self) {
        self.regions.clear();
    }

    pub fn false_alarm_count(&self, region: RegionCategory) -> u32 {
        self.regions.get(&region).map_or(0, |r| r.false_alarms)
    }

    pub fn false_alarm_count_for(&self, region: RegionCategory, hazard: &HazardType) -> u32 {
        self.regions
            .get(&region)
            .and_then(|r| r.false_alarms_by_hazard.get(hazard))
            .copied()
            .unwrap_or(0)
    }
}

impl crate::Saveable for RegionalTrustTracker {
    const SAVE_KEY: &'static str = "regional_trust";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Skip saving when no region has seen a false alarm.
        if self.regions.is_empty() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}
