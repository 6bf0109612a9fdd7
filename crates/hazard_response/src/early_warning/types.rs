//! Warning engine inputs and outputs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::bounds::{clamp_non_negative, clamp_unit, weighted_factor};
use crate::config::{
    DEFAULT_CAPABILITY, DEFAULT_ELECTRICITY_RELIABILITY, DEFAULT_EXPOSED_POPULATION,
    DEFAULT_LITERACY_RATE, DEFAULT_MESSAGE_QUALITY, DEFAULT_OUTREACH_POPULATION,
    DEFAULT_URBAN_POPULATION_RATIO,
};
use crate::hazard::{HazardEvent, HazardType, RegionCategory};

// =============================================================================
// Dissemination channels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sirens,
    Sms,
    Radio,
    Television,
    VolunteerNetwork,
    MosqueAnnouncements,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Sirens,
        Channel::Sms,
        Channel::Radio,
        Channel::Television,
        Channel::VolunteerNetwork,
        Channel::MosqueAnnouncements,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sirens" => Some(Channel::Sirens),
            "sms" => Some(Channel::Sms),
            "radio" => Some(Channel::Radio),
            "television" | "tv" => Some(Channel::Television),
            "volunteer_network" => Some(Channel::VolunteerNetwork),
            "mosque_announcements" => Some(Channel::MosqueAnnouncements),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Sirens => "sirens",
            Channel::Sms => "sms",
            Channel::Radio => "radio",
            Channel::Television => "television",
            Channel::VolunteerNetwork => "volunteer_network",
            Channel::MosqueAnnouncements => "mosque_announcements",
        }
    }
}

// =============================================================================
// Behavioural categories
// =============================================================================

/// How far ahead of onset a warning lands, relative to the hazard's own scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeCategory {
    VeryShort,
    Short,
    Adequate,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSpecificity {
    #[default]
    Generic,
    LocationSpecific,
    ImpactBased,
}

/// What the population last experienced from a warned hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorExperience {
    #[default]
    #[serde(rename = "none")]
    NoPriorEvent,
    FalseAlarm,
    MinorImpact,
    MajorImpact,
}

// =============================================================================
// Demographic mixes
// =============================================================================
//
// The same shapes carry population shares (in `SystemCapabilities`) and
// compliance factors (in `EvacuationBehavior`). `weighted_by` combines the two.

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderMix {
    pub male: f64,
    pub female: f64,
}

impl Default for GenderMix {
    fn default() -> Self {
        Self {
            male: 0.5,
            female: 0.5,
        }
    }
}

impl GenderMix {
    pub fn weighted_by(&self, factors: &GenderMix) -> f64 {
        weighted_factor(&[(self.male, factors.male), (self.female, factors.female)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeMix {
    pub child: f64,
    pub adult: f64,
    pub elderly: f64,
}

impl Default for AgeMix {
    fn default() -> Self {
        Self {
            child: 0.3,
            adult: 0.6,
            elderly: 0.1,
        }
    }
}

impl AgeMix {
    pub fn weighted_by(&self, factors: &AgeMix) -> f64 {
        weighted_factor(&[
            (self.child, factors.child),
            (self.adult, factors.adult),
            (self.elderly, factors.elderly),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeMix {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for IncomeMix {
    fn default() -> Self {
        Self {
            low: 0.4,
            medium: 0.5,
            high: 0.1,
        }
    }
}

impl IncomeMix {
    pub fn weighted_by(&self, factors: &IncomeMix) -> f64 {
        weighted_factor(&[
            (self.low, factors.low),
            (self.medium, factors.medium),
            (self.high, factors.high),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivelihoodMix {
    pub agriculture: f64,
    pub fishing: f64,
    pub business: f64,
    pub service: f64,
    pub government: f64,
}

impl Default for LivelihoodMix {
    fn default() -> Self {
        Self {
            agriculture: 0.4,
            fishing: 0.1,
            business: 0.3,
            service: 0.15,
            government: 0.05,
        }
    }
}

impl LivelihoodMix {
    pub fn weighted_by(&self, factors: &LivelihoodMix) -> f64 {
        weighted_factor(&[
            (self.agriculture, factors.agriculture),
            (self.fishing, factors.fishing),
            (self.business, factors.business),
            (self.service, factors.service),
            (self.government, factors.government),
        ])
    }
}

/// Population shares for the exposed area. Defaults are national averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicMix {
    pub gender: GenderMix,
    pub age: AgeMix,
    pub income: IncomeMix,
    pub livelihood: LivelihoodMix,
}

// =============================================================================
// SystemCapabilities
// =============================================================================

/// Early warning system capability descriptor. Every field is optional; the
/// accessors document and apply the default used when a field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemCapabilities {
    pub technology_level: Option<f64>,
    pub staff_training: Option<f64>,
    pub observation_network: Option<f64>,
    pub available_systems: Option<Vec<String>>,
    pub literacy_rate: Option<f64>,
    pub electricity_reliability: Option<f64>,
    pub warning_specificity: Option<WarningSpecificity>,
    pub previous_experience: Option<PriorExperience>,
    pub demographics: Option<DemographicMix>,
    /// Minimum forecast probability required before a correct forecast is
    /// issued. No threshold means every correct forecast is issued.
    pub warning_threshold: Option<f64>,
    /// Population exposed to the hazard.
    pub affected_population: Option<f64>,
    pub urban_population_ratio: Option<f64>,
    pub message_clarity: Option<f64>,
    pub message_consistency: Option<f64>,
}

impl SystemCapabilities {
    /// Defaults to 0.5.
    pub fn technology_level(&self) -> f64 {
        clamp_unit(self.technology_level.unwrap_or(DEFAULT_CAPABILITY))
    }

    /// Defaults to 0.5.
    pub fn staff_training(&self) -> f64 {
        clamp_unit(self.staff_training.unwrap_or(DEFAULT_CAPABILITY))
    }

    /// Defaults to 0.5.
    pub fn observation_network(&self) -> f64 {
        clamp_unit(self.observation_network.unwrap_or(DEFAULT_CAPABILITY))
    }

    /// Defaults to 0.6.
    pub fn literacy_rate(&self) -> f64 {
        clamp_unit(self.literacy_rate.unwrap_or(DEFAULT_LITERACY_RATE))
    }

    /// Defaults to 0.7.
    pub fn electricity_reliability(&self) -> f64 {
        clamp_unit(
            self.electricity_reliability
                .unwrap_or(DEFAULT_ELECTRICITY_RELIABILITY),
        )
    }

    pub fn warning_specificity(&self) -> WarningSpecificity {
        self.warning_specificity.unwrap_or_default()
    }

    pub fn previous_experience(&self) -> PriorExperience {
        self.previous_experience.unwrap_or_default()
    }

    pub fn demographics(&self) -> DemographicMix {
        self.demographics.unwrap_or_default()
    }

    pub fn warning_threshold(&self) -> Option<f64> {
        self.warning_threshold.map(clamp_unit)
    }

    /// Population used for the lives-saved estimate. Defaults to 100 000.
    pub fn exposed_population(&self) -> f64 {
        self.affected_population
            .map(clamp_non_negative)
            .unwrap_or(DEFAULT_EXPOSED_POPULATION)
    }

    /// Population used for the outreach estimate. Defaults to 1 000 000.
    pub fn outreach_population(&self) -> f64 {
        self.affected_population
            .map(clamp_non_negative)
            .unwrap_or(DEFAULT_OUTREACH_POPULATION)
    }

    /// Defaults to 0.4.
    pub fn urban_population_ratio(&self) -> f64 {
        clamp_unit(
            self.urban_population_ratio
                .unwrap_or(DEFAULT_URBAN_POPULATION_RATIO),
        )
    }

    pub fn message_clarity(&self) -> f64 {
        clamp_unit(self.message_clarity.unwrap_or(DEFAULT_MESSAGE_QUALITY))
    }

    pub fn message_consistency(&self) -> f64 {
        clamp_unit(self.message_consistency.unwrap_or(DEFAULT_MESSAGE_QUALITY))
    }

    /// Recognised channels, each counted once. Radio and the volunteer
    /// network are assumed when no list is supplied.
    pub fn channels(&self) -> BTreeSet<Channel> {
        match &self.available_systems {
            Some(names) => names.iter().filter_map(|n| Channel::from_name(n)).collect(),
            None => [Channel::Radio, Channel::VolunteerNetwork].into_iter().collect(),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Reach of an issued warning across the exposed population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachEstimate {
    pub total_population: f64,
    pub population_reached: u64,
    /// Reached and understood the message.
    pub population_informed: u64,
    pub evacuated_population: u64,
    pub comprehension: f64,
}

/// Result of one warning call. Freshly constructed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningOutcome {
    pub hazard_type: HazardType,
    pub region: RegionCategory,
    pub warning_possible: bool,
    pub warning_issued: bool,
    /// Drawn lead time in hours. `None` when no warning is possible.
    pub forecast_lead_time: Option<f64>,
    pub lead_time_category: Option<LeadTimeCategory>,
    pub forecast_accuracy: f64,
    /// Beta-distributed forecast confidence, drawn only when a warning
    /// threshold is configured.
    pub forecast_probability: Option<f64>,
    pub forecast_correct: bool,
    /// Issued even though the forecast was wrong.
    pub false_alarm: bool,
    pub dissemination_effectiveness: f64,
    pub population_response_rate: f64,
    /// Regional trust multiplier in effect for this call.
    pub trust_factor: f64,
    /// Unwarned casualty baseline. Only computed for issued, correct warnings
    /// of significant intensity.
    pub potential_casualties: f64,
    pub lives_saved: u64,
    pub outreach: Option<OutreachEstimate>,
}

impl WarningOutcome {
    /// Outcome for a hazard with no forecast capability.
    pub fn not_possible(event: &HazardEvent) -> Self {
        Self {
            hazard_type: event.hazard_type.clone(),
            region: event.region(),
            warning_possible: false,
            warning_issued: false,
            forecast_lead_time: None,
            lead_time_category: None,
            forecast_accuracy: 0.0,
            forecast_probability: None,
            forecast_correct: false,
            false_alarm: false,
            dissemination_effectiveness: 0.0,
            population_response_rate: 0.0,
            trust_factor: 1.0,
            potential_casualties: 0.0,
            lives_saved: 0,
            outreach: None,
        }
    }

    /// A correct forecast that was not issued: withheld below threshold or
    /// missed outright.
    pub fn is_missed(&self) -> bool {
        self.warning_possible && !self.warning_issued
    }
}
