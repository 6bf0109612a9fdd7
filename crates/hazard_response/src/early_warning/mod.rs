//! Early warning model.
//!
//! Given a drawn hazard event and a description of the warning system, the
//! engine walks the chain from forecast to protective action:
//!
//!   1. Eligibility: hazards without a forecast table cannot be warned about
//!   2. Lead time: weighted draw, shifted longer for long-lasting floods
//!   3. Skill: nearest skill bucket, scaled by technology, training and the
//!      observation network
//!   4. Issuance: a correct forecast is issued (subject to an optional
//!      confidence threshold); a wrong one is either missed or goes out as a
//!      false alarm that erodes regional trust
//!   5. Dissemination: weighted mean over the available channels
//!   6. Compliance: behavioural factors times regional trust
//!   7. Lives saved: unwarned casualty baseline times dissemination times
//!      compliance
//!
//! Trust lives in a caller-owned [`RegionalTrustTracker`] so concurrent
//! workers never share it.

pub mod casualties;
pub mod compliance;
pub mod dissemination;
pub mod engine;
pub mod forecast;
pub mod params;
pub mod systems;
pub mod trust;
pub mod types;

#[cfg(test)]
mod tests_engine;

pub use engine::EarlyWarningEngine;
pub use params::{FalseAlarmParams, WarningParams};
pub use systems::{
    process_warning_requests, EarlyWarningPlugin, WarningCompleted, WarningRequested,
    WarningStatistics,
};
pub use trust::RegionalTrustTracker;
pub use types::{
    Channel, DemographicMix, LeadTimeCategory, OutreachEstimate, PriorExperience,
    SystemCapabilities, WarningOutcome, WarningSpecificity,
};
