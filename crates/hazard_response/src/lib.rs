//! Early warning and emergency response models for a Monte-Carlo
//! disaster-risk simulation.
//!
//! The two engines are plain functions over immutable parameter tables:
//!
//! - [`early_warning::EarlyWarningEngine`] decides whether a hazard can be
//!   warned about, draws a forecast lead time, scores dissemination and
//!   population compliance, and estimates lives saved.
//! - [`emergency_response::EmergencyResponseEngine`] scores response
//!   operations against regional capacity and resource adequacy, and tallies
//!   resource consumption against declared capacities.
//!
//! The only mutable state is the caller-owned
//! [`early_warning::RegionalTrustTracker`] and the seeded [`sim_rng::SimRng`].
//! [`HazardResponsePlugin`] wires both engines into a Bevy `App` for drivers
//! that run on the ECS.

use bevy::prelude::*;

pub mod bounds;
pub mod config;
pub mod early_warning;
pub mod emergency_response;
pub mod hazard;
pub mod params_error;
pub mod sim_rng;


pub use hazard::{HazardEvent, HazardType, RegionCategory, SpatialFootprint};
pub use params_error::ParamsError;
pub use sim_rng::{RandomSource, ScriptedRandom, SimRng};

// ---------------------------------------------------------------------------
// Saveable trait
// ---------------------------------------------------------------------------

/// Trait for engine-local state a driver may checkpoint between runs.
///
/// The static parameter tables are never saved; only the RNG position and the
/// regional trust levels change during a simulation.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key for this resource in a checkpoint's extension map.
    /// Must be stable across versions.
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes.
    /// Return `None` to skip saving (e.g. when the resource is at its default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes, returning the restored resource.
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning `Default` on failure.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Ordering for the warning and response systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HazardResponseSet {
    Warning,
    Response,
}

pub struct HazardResponsePlugin;

impl Plugin for HazardResponsePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (HazardResponseSet::Warning, HazardResponseSet::Response).chain(),
        );

        app.add_plugins((
            sim_rng::SimRngPlugin,
            early_warning::EarlyWarningPlugin,
            emergency_response::EmergencyResponsePlugin,
        ));
    }
}
