//! Emergency response model.
//!
//! Scores the five response operations (rescue, evacuation, relief, medical,
//! restoration) for a disaster whose impacts are already known. Each
//! operation's effectiveness is its hazard baseline scaled by resource
//! adequacy, the capability of the agencies leading it, regional capacity,
//! inter-agency coordination and transport disruption. Shelter, relief and
//! medical stocks are compared against demand separately, so a shortfall
//! shows up as a coverage ratio below one.

pub mod capacity;
pub mod effectiveness;
pub mod engine;
pub mod logistics;
pub mod params;
pub mod systems;
pub mod types;

#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_systems;

pub use engine::EmergencyResponseEngine;
pub use params::ResponseParams;
pub use systems::{
    process_response_requests, EmergencyResponsePlugin, ResponseCompleted, ResponseRequested,
    ResponseStatistics,
};
pub use types::{
    AdminLevel, Agency, AvailableResources, DisasterImpacts, Operation, ResourceConsumption,
    ResponseOutcome, Settlement,
};
