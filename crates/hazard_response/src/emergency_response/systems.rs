use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::engine::EmergencyResponseEngine;
use super::types::{AvailableResources, DisasterImpacts, ResponseOutcome};
use crate::HazardResponseSet;

// =============================================================================
// Events
// =============================================================================

/// Ask the response engine to score the response to a disaster.
#[derive(Event, Debug, Clone)]
pub struct ResponseRequested {
    pub impacts: DisasterImpacts,
    pub resources: AvailableResources,
}

/// Fired once per `ResponseRequested`, in request order.
#[derive(Event, Debug, Clone)]
pub struct ResponseCompleted {
    pub impacts: DisasterImpacts,
    pub outcome: ResponseOutcome,
}

// =============================================================================
// Statistics
// =============================================================================

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseStatistics {
    pub responses_processed: u64,
    pub additional_lives_saved: u64,
    /// Responses with fewer shelter places than displaced persons.
    pub shelter_shortfalls: u64,
    pub relief_shortfalls: u64,
    pub medical_shortfalls: u64,
    pub total_response_score: f64,
}

impl ResponseStatistics {
    pub fn record(&mut self, outcome: &ResponseOutcome) {
        self.responses_processed = self.responses_processed.saturating_add(1);
        self.additional_lives_saved = self
            .additional_lives_saved
            .saturating_add(outcome.additional_lives_saved);
        if outcome.shelter_access_ratio < 1.0 {
            self.shelter_shortfalls = self.shelter_shortfalls.saturating_add(1);
        }
        if outcome.relief_provision_ratio < 1.0 {
            self.relief_shortfalls = self.relief_shortfalls.saturating_add(1);
        }
        if outcome.medical_service_ratio < 1.0 {
            self.medical_shortfalls = self.medical_shortfalls.saturating_add(1);
        }
        self.total_response_score += outcome.overall_response_score;
    }

    pub fn mean_response_score(&self) -> f64 {
        if self.responses_processed == 0 {
            0.0
        } else {
            self.total_response_score / self.responses_processed as f64
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn process_response_requests(
    mut requests: EventReader<ResponseRequested>,
    engine: Res<EmergencyResponseEngine>,
    mut stats: ResMut<ResponseStatistics>,
    mut completed: EventWriter<ResponseCompleted>,
) {
    for request in requests.read() {
        let outcome = engine.simulate_response(&request.impacts, &request.resources);
        if outcome.shelter_access_ratio < 1.0 {
            info!(
                "Shelter shortfall: {} in {} covers {:.0}% of displaced",
                outcome.hazard_type.name(),
                outcome.region.name(),
                outcome.shelter_access_ratio * 100.0
            );
        }
        stats.record(&outcome);
        completed.send(ResponseCompleted {
            impacts: request.impacts.clone(),
            outcome,
        });
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct EmergencyResponsePlugin;

impl Plugin for EmergencyResponsePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EmergencyResponseEngine>()
            .init_resource::<ResponseStatistics>()
            .add_event::<ResponseRequested>()
            .add_event::<ResponseCompleted>()
            .add_systems(
                Update,
                process_response_requests.in_set(HazardResponseSet::Response),
            );
    }
}
