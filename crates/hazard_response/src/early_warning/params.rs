//! Built-in parameter tables for the warning engine.
//!
//! `WarningParams::default()` carries the calibrated tables. Drivers that want
//! to tune them load a JSON override with [`WarningParams::from_json_str`] or
//! [`WarningParams::from_json_file`]; missing sections keep their defaults.
//! Lead times are hours throughout.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{AgeMix, Channel, GenderMix, IncomeMix, LeadTimeCategory, LivelihoodMix};
use crate::config::{HOURS_PER_DAY, HOURS_PER_MONTH};
use crate::hazard::{HazardType, RegionCategory};
use crate::params_error::{check_non_negative, check_unit, check_weight_sum, ParamsError};

// ---------------------------------------------------------------------------
// Forecast skill and lead times
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillBucket {
    pub lead_time_hours: f64,
    pub skill: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedLeadTime {
    pub hours: f64,
    pub weight: f64,
}

/// Longer-lead candidates used once the footprint lasts longer than
/// `min_duration_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedLeadTimes {
    pub min_duration_hours: f64,
    pub candidates: Vec<WeightedLeadTime>,
}

/// Upper bounds (exclusive) of the lead-time categories for one hazard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeThresholds {
    pub very_short_below: f64,
    pub short_below: f64,
    pub adequate_below: f64,
}

impl LeadTimeThresholds {
    pub fn categorize(&self, hours: f64) -> LeadTimeCategory {
        if hours < self.very_short_below {
            LeadTimeCategory::VeryShort
        } else if hours < self.short_below {
            LeadTimeCategory::Short
        } else if hours < self.adequate_below {
            LeadTimeCategory::Adequate
        } else {
            LeadTimeCategory::Long
        }
    }
}

/// Everything needed to forecast one hazard. A hazard without a row cannot
/// be warned about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardForecast {
    pub hazard: HazardType,
    pub skill: Vec<SkillBucket>,
    pub lead_times: Vec<WeightedLeadTime>,
    #[serde(default)]
    pub extended_lead_times: Option<ExtendedLeadTimes>,
    pub categories: LeadTimeThresholds,
}

/// Linear blend applied to the base skill score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillBlend {
    pub technology: f64,
    pub training: f64,
    pub observation: f64,
}

impl Default for SkillBlend {
    fn default() -> Self {
        Self {
            technology: 0.3,
            training: 0.3,
            observation: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Dissemination channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub channel: Channel,
    pub coverage: f64,
    pub reliability: f64,
    pub comprehension: f64,
    /// Positive favours urban populations, negative favours rural ones.
    pub urban_bias: f64,
    #[serde(default)]
    pub literacy_dependent: bool,
    #[serde(default)]
    pub electricity_dependent: bool,
    #[serde(default)]
    pub training_dependent: bool,
    #[serde(default)]
    pub time_of_day_dependent: bool,
}

impl ChannelParams {
    fn new(channel: Channel, coverage: f64, reliability: f64, comprehension: f64, urban_bias: f64) -> Self {
        Self {
            channel,
            coverage,
            reliability,
            comprehension,
            urban_bias,
            literacy_dependent: false,
            electricity_dependent: false,
            training_dependent: false,
            time_of_day_dependent: false,
        }
    }
}

/// A multiplier applied to a set of channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPriority {
    pub channels: Vec<Channel>,
    pub weight: f64,
}

impl ChannelPriority {
    pub fn weight_for(&self, channel: Channel) -> f64 {
        if self.channels.contains(&channel) {
            self.weight
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardChannelPriority {
    pub hazard: HazardType,
    #[serde(flatten)]
    pub priority: ChannelPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelWeighting {
    pub hazard_priorities: Vec<HazardChannelPriority>,
    pub rural_priority: ChannelPriority,
    pub urban_priority: ChannelPriority,
    /// Multiplier for channels that only work at certain hours.
    pub time_of_day_factor: f64,
}

impl Default for ChannelWeighting {
    fn default() -> Self {
        Self {
            hazard_priorities: vec![
                HazardChannelPriority {
                    hazard: HazardType::Cyclone,
                    priority: ChannelPriority {
                        channels: vec![Channel::Sirens, Channel::Radio, Channel::VolunteerNetwork],
                        weight: 1.5,
                    },
                },
                HazardChannelPriority {
                    hazard: HazardType::Flood,
                    priority: ChannelPriority {
                        channels: vec![
                            Channel::Radio,
                            Channel::Television,
                            Channel::MosqueAnnouncements,
                        ],
                        weight: 1.3,
                    },
                },
            ],
            rural_priority: ChannelPriority {
                channels: vec![
                    Channel::Radio,
                    Channel::Television,
                    Channel::MosqueAnnouncements,
                ],
                weight: 1.2,
            },
            urban_priority: ChannelPriority {
                channels: vec![Channel::Sms],
                weight: 1.2,
            },
            time_of_day_factor: 0.8,
        }
    }
}

impl ChannelWeighting {
    pub fn weight(&self, channel: Channel, hazard: &HazardType, region: RegionCategory) -> f64 {
        let hazard_weight = self
            .hazard_priorities
            .iter()
            .find(|p| &p.hazard == hazard)
            .map_or(1.0, |p| p.priority.weight_for(channel));
        let region_weight = if region.is_urban() {
            self.urban_priority.weight_for(channel)
        } else {
            self.rural_priority.weight_for(channel)
        };
        hazard_weight * region_weight
    }
}

// ---------------------------------------------------------------------------
// Evacuation behaviour
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificityFactors {
    pub generic: f64,
    pub location_specific: f64,
    pub impact_based: f64,
}

impl Default for SpecificityFactors {
    fn default() -> Self {
        Self {
            generic: 0.8,
            location_specific: 1.0,
            impact_based: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceFactors {
    pub none: f64,
    pub false_alarm: f64,
    pub minor_impact: f64,
    pub major_impact: f64,
}

impl Default for ExperienceFactors {
    fn default() -> Self {
        Self {
            none: 0.9,
            false_alarm: 0.7,
            minor_impact: 1.1,
            major_impact: 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadTimeFactors {
    pub very_short: f64,
    pub short: f64,
    pub adequate: f64,
    pub long: f64,
}

impl Default for LeadTimeFactors {
    fn default() -> Self {
        Self {
            very_short: 0.8,
            short: 0.9,
            adequate: 1.1,
            long: 1.0,
        }
    }
}

impl LeadTimeFactors {
    pub fn factor(&self, category: LeadTimeCategory) -> f64 {
        match category {
            LeadTimeCategory::VeryShort => self.very_short,
            LeadTimeCategory::Short => self.short,
            LeadTimeCategory::Adequate => self.adequate,
            LeadTimeCategory::Long => self.long,
        }
    }
}

/// Extra willingness to act when a region knows a hazard well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAffinity {
    pub region: RegionCategory,
    pub hazard: HazardType,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvacuationBehavior {
    pub compliance_base_rate: f64,
    /// Intensity factor is `intensity_floor + intensity_slope * intensity`.
    pub intensity_floor: f64,
    pub intensity_slope: f64,
    pub gender: GenderMix,
    pub age: AgeMix,
    pub income: IncomeMix,
    pub livelihood: LivelihoodMix,
    pub specificity: SpecificityFactors,
    pub experience: ExperienceFactors,
    pub lead_time: LeadTimeFactors,
    pub regional_affinity: Vec<RegionalAffinity>,
    /// Regional factor is `affinity * (capacity_floor + capacity_slope * capacity)`.
    pub capacity_floor: f64,
    pub capacity_slope: f64,
}

impl Default for EvacuationBehavior {
    fn default() -> Self {
        Self {
            compliance_base_rate: 0.65,
            intensity_floor: 0.7,
            intensity_slope: 0.6,
            gender: GenderMix {
                male: 1.0,
                female: 0.85,
            },
            age: AgeMix {
                child: 1.1,
                adult: 1.0,
                elderly: 0.75,
            },
            income: IncomeMix {
                low: 0.85,
                medium: 1.0,
                high: 1.1,
            },
            livelihood: LivelihoodMix {
                agriculture: 0.8,
                fishing: 0.85,
                business: 0.9,
                service: 1.0,
                government: 1.1,
            },
            specificity: SpecificityFactors::default(),
            experience: ExperienceFactors::default(),
            lead_time: LeadTimeFactors::default(),
            regional_affinity: vec![
                RegionalAffinity {
                    region: RegionCategory::Coastal,
                    hazard: HazardType::Cyclone,
                    factor: 1.2,
                },
                RegionalAffinity {
                    region: RegionCategory::FloodPlain,
                    hazard: HazardType::Flood,
                    factor: 1.1,
                },
            ],
            capacity_floor: 0.75,
            capacity_slope: 0.5,
        }
    }
}

impl EvacuationBehavior {
    pub fn affinity(&self, region: RegionCategory, hazard: &HazardType) -> f64 {
        self.regional_affinity
            .iter()
            .find(|a| a.region == region && &a.hazard == hazard)
            .map_or(1.0, |a| a.factor)
    }
}

// ---------------------------------------------------------------------------
// Issuance and false alarms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuanceParams {
    /// `Beta(c * skill, c * (1 - skill))` concentration for forecast confidence.
    pub beta_concentration: f64,
    /// Wrong forecasts above this intensity are missed; at or below it they
    /// go out as false alarms.
    pub missed_warning_intensity: f64,
    /// Intensity the population perceives during a false alarm.
    pub false_alarm_perceived_intensity: f64,
}

impl Default for IssuanceParams {
    fn default() -> Self {
        Self {
            beta_concentration: 10.0,
            missed_warning_intensity: 0.5,
            false_alarm_perceived_intensity: 0.1,
        }
    }
}

/// Trust erosion after false alarms and its recovery over time.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
#[serde(default)]
pub struct FalseAlarmParams {
    pub decay_rate: f64,
    pub recovery_years: f64,
    pub minimum_trust: f64,
}

impl Default for FalseAlarmParams {
    fn default() -> Self {
        Self {
            decay_rate: 0.15,
            recovery_years: 3.0,
            minimum_trust: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Casualty baseline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureFactor {
    pub region: RegionCategory,
    pub hazards: Vec<HazardType>,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasualtyParams {
    /// Unwarned deaths per 100 000 exposed at reference intensity.
    pub base_rates: BTreeMap<HazardType, f64>,
    pub default_base_rate: f64,
    pub severe_intensity: f64,
    pub severe_amplification: f64,
    /// Lives are only counted as saved above this intensity.
    pub significant_intensity: f64,
    pub exposure: Vec<ExposureFactor>,
    pub density_proxy: BTreeMap<RegionCategory, f64>,
    pub default_density: f64,
}

impl Default for CasualtyParams {
    fn default() -> Self {
        let base_rates = [
            (HazardType::Cyclone, 50.0),
            (HazardType::Flood, 20.0),
            (HazardType::FlashFlood, 30.0),
            (HazardType::StormSurge, 40.0),
            (HazardType::Drought, 5.0),
            (HazardType::Landslide, 60.0),
            (HazardType::Earthquake, 100.0),
            (HazardType::RiverErosion, 10.0),
        ]
        .into_iter()
        .collect();

        let density_proxy = [
            (RegionCategory::Urban, 1.5),
            (RegionCategory::Coastal, 1.2),
            (RegionCategory::FloodPlain, 1.1),
            (RegionCategory::CharLands, 1.0),
            (RegionCategory::HaorBasin, 0.9),
            (RegionCategory::HillTracts, 0.7),
            (RegionCategory::BarindTract, 0.8),
            (RegionCategory::Generic, 1.0),
        ]
        .into_iter()
        .collect();

        Self {
            base_rates,
            default_base_rate: 10.0,
            severe_intensity: 0.7,
            severe_amplification: 10.0,
            significant_intensity: 0.3,
            exposure: vec![
                ExposureFactor {
                    region: RegionCategory::Coastal,
                    hazards: vec![HazardType::Cyclone, HazardType::StormSurge],
                    factor: 1.3,
                },
                ExposureFactor {
                    region: RegionCategory::HillTracts,
                    hazards: vec![HazardType::Landslide],
                    factor: 1.5,
                },
                ExposureFactor {
                    region: RegionCategory::Urban,
                    hazards: vec![HazardType::Flood, HazardType::Earthquake],
                    factor: 1.4,
                },
            ],
            density_proxy,
            default_density: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Outreach
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachParams {
    pub clarity_weight: f64,
    pub consistency_weight: f64,
    pub min_comprehension: f64,
    pub max_comprehension: f64,
}

impl Default for OutreachParams {
    fn default() -> Self {
        Self {
            clarity_weight: 0.15,
            consistency_weight: 0.15,
            min_comprehension: 0.2,
            max_comprehension: 0.95,
        }
    }
}

// ---------------------------------------------------------------------------
// WarningParams
// ---------------------------------------------------------------------------

/// All tables the warning engine reads. Built once, then shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningParams {
    pub forecasts: Vec<HazardForecast>,
    pub skill_blend: SkillBlend,
    pub channels: Vec<ChannelParams>,
    pub channel_weighting: ChannelWeighting,
    pub behavior: EvacuationBehavior,
    /// Early warning capacity per region, feeding the regional compliance factor.
    pub regional_capacity: BTreeMap<RegionCategory, f64>,
    pub default_regional_capacity: f64,
    pub issuance: IssuanceParams,
    pub false_alarm: FalseAlarmParams,
    pub casualties: CasualtyParams,
    pub outreach: OutreachParams,
}

fn buckets(unit_hours: f64, rows: &[(f64, f64)]) -> Vec<SkillBucket> {
    rows.iter()
        .map(|&(lead_time, skill)| SkillBucket {
            lead_time_hours: lead_time * unit_hours,
            skill,
        })
        .collect()
}

fn candidates(unit_hours: f64, rows: &[(f64, f64)]) -> Vec<WeightedLeadTime> {
    rows.iter()
        .map(|&(lead_time, weight)| WeightedLeadTime {
            hours: lead_time * unit_hours,
            weight,
        })
        .collect()
}

fn thresholds(unit_hours: f64, very_short: f64, short: f64, adequate: f64) -> LeadTimeThresholds {
    LeadTimeThresholds {
        very_short_below: very_short * unit_hours,
        short_below: short * unit_hours,
        adequate_below: adequate * unit_hours,
    }
}

const HOURS: f64 = 1.0;

fn default_forecasts() -> Vec<HazardForecast> {
    vec![
        HazardForecast {
            hazard: HazardType::Flood,
            skill: buckets(
                HOURS_PER_DAY,
                &[(1.0, 0.85), (3.0, 0.75), (5.0, 0.65), (7.0, 0.55), (10.0, 0.45)],
            ),
            lead_times: candidates(HOURS_PER_DAY, &[(1.0, 0.3), (3.0, 0.4), (5.0, 0.3)]),
            extended_lead_times: Some(ExtendedLeadTimes {
                min_duration_hours: 2.0 * HOURS_PER_DAY,
                candidates: candidates(HOURS_PER_DAY, &[(5.0, 0.3), (7.0, 0.4), (10.0, 0.3)]),
            }),
            categories: thresholds(HOURS_PER_DAY, 1.0, 3.0, 7.0),
        },
        HazardForecast {
            hazard: HazardType::FlashFlood,
            skill: buckets(HOURS, &[(1.0, 0.6), (3.0, 0.55), (6.0, 0.5), (12.0, 0.4), (24.0, 0.3)]),
            lead_times: candidates(HOURS, &[(1.0, 0.5), (3.0, 0.3), (6.0, 0.2)]),
            extended_lead_times: None,
            categories: thresholds(HOURS, 3.0, 6.0, 12.0),
        },
        HazardForecast {
            hazard: HazardType::Cyclone,
            skill: buckets(
                HOURS,
                &[(24.0, 0.75), (48.0, 0.65), (72.0, 0.55), (96.0, 0.45), (120.0, 0.35)],
            ),
            lead_times: candidates(HOURS, &[(48.0, 0.3), (72.0, 0.4), (96.0, 0.3)]),
            extended_lead_times: None,
            categories: thresholds(HOURS, 6.0, 24.0, 72.0),
        },
        HazardForecast {
            hazard: HazardType::StormSurge,
            skill: buckets(HOURS, &[(6.0, 0.7), (12.0, 0.65), (24.0, 0.5), (36.0, 0.35), (48.0, 0.25)]),
            lead_times: candidates(HOURS, &[(12.0, 0.3), (24.0, 0.4), (36.0, 0.3)]),
            extended_lead_times: None,
            categories: thresholds(HOURS, 6.0, 24.0, 72.0),
        },
        HazardForecast {
            hazard: HazardType::Drought,
            skill: buckets(
                HOURS_PER_MONTH,
                &[(0.5, 0.65), (1.0, 0.55), (2.0, 0.45), (3.0, 0.35), (6.0, 0.25)],
            ),
            lead_times: candidates(HOURS_PER_MONTH, &[(0.5, 0.3), (1.0, 0.4), (2.0, 0.3)]),
            extended_lead_times: None,
            categories: thresholds(HOURS_PER_MONTH, 0.5, 1.0, 3.0),
        },
    ]
}

fn default_channels() -> Vec<ChannelParams> {
    vec![
        ChannelParams::new(Channel::Sirens, 0.15, 0.8, 0.95, 0.7),
        ChannelParams {
            literacy_dependent: true,
            ..ChannelParams::new(Channel::Sms, 0.7, 0.85, 0.8, 0.6)
        },
        ChannelParams::new(Channel::Radio, 0.85, 0.9, 0.85, 0.2),
        ChannelParams {
            electricity_dependent: true,
            ..ChannelParams::new(Channel::Television, 0.6, 0.85, 0.9, 0.5)
        },
        ChannelParams {
            training_dependent: true,
            ..ChannelParams::new(Channel::VolunteerNetwork, 0.55, 0.75, 0.95, -0.3)
        },
        ChannelParams {
            time_of_day_dependent: true,
            ..ChannelParams::new(Channel::MosqueAnnouncements, 0.9, 0.7, 0.95, -0.1)
        },
    ]
}

impl Default for WarningParams {
    fn default() -> Self {
        let regional_capacity: BTreeMap<RegionCategory, f64> = [
            (RegionCategory::Coastal, 0.8),
            (RegionCategory::Urban, 0.7),
            (RegionCategory::FloodPlain, 0.6),
            (RegionCategory::HaorBasin, 0.5),
            (RegionCategory::CharLands, 0.4),
            (RegionCategory::HillTracts, 0.4),
            (RegionCategory::BarindTract, 0.5),
        ]
        .into_iter()
        .collect();
        // Generic regions sit at the national mean.
        let default_regional_capacity =
            regional_capacity.values().sum::<f64>() / regional_capacity.len() as f64;

        Self {
            forecasts: default_forecasts(),
            skill_blend: SkillBlend::default(),
            channels: default_channels(),
            channel_weighting: ChannelWeighting::default(),
            behavior: EvacuationBehavior::default(),
            regional_capacity,
            default_regional_capacity,
            issuance: IssuanceParams::default(),
            false_alarm: FalseAlarmParams::default(),
            casualties: CasualtyParams::default(),
            outreach: OutreachParams::default(),
        }
    }
}

impl WarningParams {
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: WarningParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn forecast(&self, hazard: &HazardType) -> Option<&HazardForecast> {
        self.forecasts.iter().find(|f| &f.hazard == hazard)
    }

    pub fn channel(&self, channel: Channel) -> Option<&ChannelParams> {
        self.channels.iter().find(|c| c.channel == channel)
    }

    pub fn regional_capacity(&self, region: RegionCategory) -> f64 {
        self.regional_capacity
            .get(&region)
            .copied()
            .unwrap_or(self.default_regional_capacity)
    }

    /// Reject tables that would silently distort every call.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for forecast in &self.forecasts {
            let name = forecast.hazard.name();
            if forecast.skill.is_empty() {
                return Err(ParamsError::EmptyTable {
                    table: format!("forecasts.{name}.skill"),
                });
            }
            for bucket in &forecast.skill {
                check_unit(&format!("forecasts.{name}.skill"), bucket.skill)?;
                check_non_negative(&format!("forecasts.{name}.lead_time_hours"), bucket.lead_time_hours)?;
            }
            validate_candidates(&format!("forecasts.{name}.lead_times"), &forecast.lead_times)?;
            if let Some(extended) = &forecast.extended_lead_times {
                validate_candidates(
                    &format!("forecasts.{name}.extended_lead_times"),
                    &extended.candidates,
                )?;
            }
        }

        check_non_negative("skill_blend.technology", self.skill_blend.technology)?;
        check_non_negative("skill_blend.training", self.skill_blend.training)?;
        check_non_negative("skill_blend.observation", self.skill_blend.observation)?;

        for channel in Channel::ALL {
            if self.channel(channel).is_none() {
                return Err(ParamsError::EmptyTable {
                    table: format!("channels.{}", channel.name()),
                });
            }
        }
        for channel in &self.channels {
            let name = channel.channel.name();
            check_unit(&format!("channels.{name}.coverage"), channel.coverage)?;
            check_unit(&format!("channels.{name}.reliability"), channel.reliability)?;
            check_unit(&format!("channels.{name}.comprehension"), channel.comprehension)?;
            if !(-1.0..=1.0).contains(&channel.urban_bias) {
                return Err(ParamsError::OutOfRange {
                    field: format!("channels.{name}.urban_bias"),
                    value: channel.urban_bias,
                });
            }
        }

        check_unit("behavior.compliance_base_rate", self.behavior.compliance_base_rate)?;
        for (region, capacity) in &self.regional_capacity {
            check_unit(&format!("regional_capacity.{}", region.name()), *capacity)?;
        }
        check_unit("default_regional_capacity", self.default_regional_capacity)?;

        check_unit("false_alarm.decay_rate", self.false_alarm.decay_rate)?;
        check_unit("false_alarm.minimum_trust", self.false_alarm.minimum_trust)?;
        if self.false_alarm.recovery_years <= 0.0 {
            return Err(ParamsError::OutOfRange {
                field: "false_alarm.recovery_years".to_string(),
                value: self.false_alarm.recovery_years,
            });
        }
        check_unit(
            "issuance.false_alarm_perceived_intensity",
            self.issuance.false_alarm_perceived_intensity,
        )?;

        for (hazard, rate) in &self.casualties.base_rates {
            check_non_negative(&format!("casualties.base_rates.{}", hazard.name()), *rate)?;
        }
        check_non_negative("casualties.default_base_rate", self.casualties.default_base_rate)?;

        if self.outreach.min_comprehension > self.outreach.max_comprehension {
            return Err(ParamsError::OutOfRange {
                field: "outreach.min_comprehension".to_string(),
                value: self.outreach.min_comprehension,
            });
        }
        Ok(())
    }
}

fn validate_candidates(table: &str, candidates: &[WeightedLeadTime]) -> Result<(), ParamsError> {
    if candidates.is_empty() {
        return Err(ParamsError::EmptyTable {
            table: table.to_string(),
        });
    }
    for candidate in candidates {
        check_non_negative(table, candidate.weight)?;
        check_non_negative(table, candidate.hours)?;
    }
    let weights: Vec<f64> = candidates.iter().map(|c| c.weight).collect();
    check_weight_sum(table, &weights)
}
