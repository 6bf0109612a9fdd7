/// Capability fraction assumed when technology, training or observation
/// network levels are not supplied.
pub const DEFAULT_CAPABILITY: f64 = 0.5;
pub const DEFAULT_LITERACY_RATE: f64 = 0.6;
pub const DEFAULT_ELECTRICITY_RELIABILITY: f64 = 0.7;

/// Resource adequacy assumed for an operation with no supplied override.
pub const DEFAULT_RESOURCE_ADEQUACY: f64 = 0.7;

/// Casualty base rates are expressed per this many people.
pub const CASUALTY_RATE_POPULATION: f64 = 100_000.0;
/// Exposed population assumed for the lives-saved estimate.
pub const DEFAULT_EXPOSED_POPULATION: f64 = 100_000.0;

/// Population assumed for the outreach estimate.
pub const DEFAULT_OUTREACH_POPULATION: f64 = 1_000_000.0;
pub const DEFAULT_URBAN_POPULATION_RATIO: f64 = 0.4;
pub const DEFAULT_MESSAGE_QUALITY: f64 = 0.5;

pub const HOURS_PER_DAY: f64 = 24.0;
/// Thirty-day months, used for drought lead times.
pub const HOURS_PER_MONTH: f64 = 30.0 * HOURS_PER_DAY;
