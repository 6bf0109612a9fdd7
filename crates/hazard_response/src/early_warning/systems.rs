use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::engine::EarlyWarningEngine;
use super::trust::RegionalTrustTracker;
use super::types::{SystemCapabilities, WarningOutcome};
use crate::hazard::HazardEvent;
use crate::sim_rng::SimRng;
use crate::HazardResponseSet;

// =============================================================================
// Events
// =============================================================================

/// Ask the warning engine to process a drawn hazard event.
#[derive(Event, Debug, Clone)]
pub struct WarningRequested {
    pub event: HazardEvent,
    pub capabilities: SystemCapabilities,
}

/// Fired once per `WarningRequested`, in request order.
#[derive(Event, Debug, Clone)]
pub struct WarningCompleted {
    pub event: HazardEvent,
    pub outcome: WarningOutcome,
}

// =============================================================================
// Statistics
// =============================================================================

/// Running totals over every processed warning.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarningStatistics {
    pub events_processed: u64,
    pub warnings_possible: u64,
    pub warnings_issued: u64,
    pub false_alarms: u64,
    /// Possible warnings that were never issued.
    pub missed_warnings: u64,
    pub lives_saved: u64,
}

impl WarningStatistics {
    pub fn record(&mut self, outcome: &WarningOutcome) {
        self.events_processed = self.events_processed.saturating_add(1);
        if outcome.warning_possible {
            self.warnings_possible = self.warnings_possible.saturating_add(1);
        }
        if outcome.warning_issued {
            self.warnings_issued = self.warnings_issued.saturating_add(1);
        }
        if outcome.false_alarm {
            self.false_alarms = self.false_alarms.saturating_add(1);
        }
        if outcome.is_missed() {
            self.missed_warnings = self.missed_warnings.saturating_add(1);
        }
        self.lives_saved = self.lives_saved.saturating_add(outcome.lives_saved);
    }

    /// Share of possible warnings that went out, 0 when none were possible.
    pub fn issuance_rate(&self) -> f64 {
        if self.warnings_possible == 0 {
            0.0
        } else {
            self.warnings_issued as f64 / self.warnings_possible as f64
        }
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Runs the warning engine for every pending request.
pub fn process_warning_requests(
    mut requests: EventReader<WarningRequested>,
    engine: Res<EarlyWarningEngine>,
    mut trust: ResMut<RegionalTrustTracker>,
    mut rng: ResMut<SimRng>,
    mut stats: ResMut<WarningStatistics>,
    mut completed: EventWriter<WarningCompleted>,
) {
    for request in requests.read() {
        let outcome = engine.simulate_warning_process(
            &request.event,
            &request.capabilities,
            &mut trust,
            &mut *rng,
        );
        stats.record(&outcome);
        completed.send(WarningCompleted {
            event: request.event.clone(),
            outcome,
        });
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct EarlyWarningPlugin;

impl Plugin for EarlyWarningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EarlyWarningEngine>()
            .init_resource::<SimRng>()
            .init_resource::<WarningStatistics>()
            .add_event::<WarningRequested>()
            .add_event::<WarningCompleted>();

        // A tracker inserted before the plugin (e.g. restored from a
        // checkpoint) is kept.
        if !app.world().contains_resource::<RegionalTrustTracker>() {
            let tracker = app
                .world()
                .resource::<EarlyWarningEngine>()
                .new_trust_tracker();
            app.insert_resource(tracker);
        }

        app.add_systems(
            Update,
            process_warning_requests.in_set(HazardResponseSet::Warning),
        );
    }
}
