use super::*;
use crate::hazard::{HazardEvent, HazardType, RegionCategory};
use crate::params_error::ParamsError;
use crate::sim_rng::{RandomSource, ScriptedRandom, SimRng};

fn cyclone(intensity: f64) -> HazardEvent {
    HazardEvent::new(HazardType::Cyclone, intensity)
        .in_region(RegionCategory::Coastal)
        .with_duration_hours(72.0)
}

fn run(
    engine: &EarlyWarningEngine,
    event: &HazardEvent,
    caps: &SystemCapabilities,
    trust: &mut RegionalTrustTracker,
    script: &[f64],
) -> WarningOutcome {
    let mut rng = ScriptedRandom::new(script.to_vec());
    engine.simulate_warning_process(event, caps, trust, &mut rng)
}

// ====================================================================
// Eligibility
// ====================================================================

#[test]
fn test_unsupported_hazard_is_not_possible() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let mut rng = ScriptedRandom::new(vec![0.0]);
    let event = HazardEvent::new(HazardType::from_name("meteor_strike"), 0.9);

    let outcome = engine.simulate_warning_process(
        &event,
        &SystemCapabilities::default(),
        &mut trust,
        &mut rng,
    );

    assert!(!outcome.warning_possible);
    assert!(!outcome.warning_issued);
    assert_eq!(outcome.forecast_lead_time, None);
    assert_eq!(outcome.forecast_accuracy, 0.0);
    assert_eq!(outcome.dissemination_effectiveness, 0.0);
    assert_eq!(outcome.population_response_rate, 0.0);
    assert_eq!(outcome.lives_saved, 0);
    assert_eq!(rng.draws(), 0, "unsupported hazards draw nothing");
}

#[test]
fn test_landslide_has_no_forecast() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let event = HazardEvent::new(HazardType::Landslide, 0.9).in_region(RegionCategory::HillTracts);
    let outcome = run(&engine, &event, &SystemCapabilities::default(), &mut trust, &[0.0]);
    assert!(!outcome.warning_possible);
}

// ====================================================================
// Issuance branches
// ====================================================================

#[test]
fn test_correct_forecast_saves_lives() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    // 0.5 lands on the 72 h candidate; 0.0 is always below the skill.
    let outcome = run(&engine, &cyclone(0.8), &SystemCapabilities::default(), &mut trust, &[0.5, 0.0]);

    assert!(outcome.warning_possible);
    assert!(outcome.warning_issued);
    assert!(outcome.forecast_correct);
    assert!(!outcome.false_alarm);
    assert_eq!(outcome.forecast_lead_time, Some(72.0));
    assert_eq!(outcome.lead_time_category, Some(LeadTimeCategory::Long));
    // 0.55 * (1 + 0.3 * 1.5)
    assert!((outcome.forecast_accuracy - 0.7975).abs() < 1e-12);
    assert!(outcome.potential_casualties > 0.0);
    assert!(outcome.lives_saved > 0);
    assert!(outcome.outreach.is_some());

    let expected = outcome.potential_casualties
        * outcome.dissemination_effectiveness
        * outcome.population_response_rate;
    assert_eq!(outcome.lives_saved, expected.round() as u64);
}

#[test]
fn test_missed_warning_for_severe_event() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let outcome = run(&engine, &cyclone(0.8), &SystemCapabilities::default(), &mut trust, &[0.0, 0.999]);

    assert!(outcome.warning_possible);
    assert!(!outcome.forecast_correct);
    assert!(!outcome.warning_issued);
    assert!(!outcome.false_alarm);
    assert!(outcome.is_missed());
    assert_eq!(outcome.lives_saved, 0);
    assert_eq!(outcome.dissemination_effectiveness, 0.0);
    assert_eq!(trust.false_alarm_count(RegionCategory::Coastal), 0);
}

#[test]
fn test_false_alarm_is_issued_and_erodes_trust() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let outcome = run(&engine, &cyclone(0.4), &SystemCapabilities::default(), &mut trust, &[0.0, 0.999]);

    assert!(outcome.warning_issued);
    assert!(outcome.false_alarm);
    assert!(!outcome.forecast_correct);
    assert_eq!(outcome.lives_saved, 0);
    assert_eq!(outcome.potential_casualties, 0.0);
    assert!(outcome.dissemination_effectiveness > 0.0);
    assert!(outcome.population_response_rate > 0.0);
    // The call itself runs at the trust level in effect before the decay.
    assert_eq!(outcome.trust_factor, 1.0);

    assert_eq!(trust.false_alarm_count(RegionCategory::Coastal), 1);
    assert!((trust.current(RegionCategory::Coastal) - 0.85).abs() < 1e-12);
}

#[test]
fn test_false_alarm_uses_perceived_intensity() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities::default();

    let mut trust = engine.new_trust_tracker();
    let false_alarm = run(&engine, &cyclone(0.45), &caps, &mut trust, &[0.0, 0.999]);

    let mut trust = engine.new_trust_tracker();
    let genuine = run(&engine, &cyclone(0.45), &caps, &mut trust, &[0.0, 0.0]);

    // Intensity factors 0.7 + 0.6 * 0.1 versus 0.7 + 0.6 * 0.45.
    let ratio = false_alarm.population_response_rate / genuine.population_response_rate;
    assert!((ratio - 0.76 / 0.97).abs() < 1e-9, "got {ratio}");
}

#[test]
fn test_false_alarms_reduce_later_compliance() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities::default();

    let mut fresh = engine.new_trust_tracker();
    let baseline = run(&engine, &cyclone(0.8), &caps, &mut fresh, &[0.5, 0.0]);

    let mut fatigued = engine.new_trust_tracker();
    run(&engine, &cyclone(0.3), &caps, &mut fatigued, &[0.5, 0.999]);
    let after = run(&engine, &cyclone(0.8), &caps, &mut fatigued, &[0.5, 0.0]);

    assert!((after.trust_factor - 0.85).abs() < 1e-12);
    let ratio = after.population_response_rate / baseline.population_response_rate;
    assert!((ratio - 0.85).abs() < 1e-9, "got {ratio}");
    assert!(after.lives_saved <= baseline.lives_saved);
}

#[test]
fn test_trust_is_regional() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    run(&engine, &cyclone(0.2), &SystemCapabilities::default(), &mut trust, &[0.5, 0.999]);

    let elsewhere = HazardEvent::new(HazardType::Cyclone, 0.8).in_region(RegionCategory::Urban);
    let outcome = run(&engine, &elsewhere, &SystemCapabilities::default(), &mut trust, &[0.5, 0.0]);
    assert_eq!(outcome.trust_factor, 1.0);
}

// ====================================================================
// Forecast threshold
// ====================================================================

#[test]
fn test_threshold_withholds_low_confidence() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let caps = SystemCapabilities {
        warning_threshold: Some(0.9),
        ..Default::default()
    };
    let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.5]);
    let outcome = engine.simulate_warning_process(&cyclone(0.8), &caps, &mut trust, &mut rng);

    assert_eq!(rng.draws(), 3);
    assert_eq!(outcome.forecast_probability, Some(0.5));
    assert!(outcome.forecast_correct);
    assert!(!outcome.warning_issued);
    assert_eq!(outcome.lives_saved, 0);
}

#[test]
fn test_threshold_passes_high_confidence() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let caps = SystemCapabilities {
        warning_threshold: Some(0.9),
        ..Default::default()
    };
    let outcome = run(&engine, &cyclone(0.8), &caps, &mut trust, &[0.0, 0.0, 0.95]);
    assert!(outcome.warning_issued);
    assert_eq!(outcome.forecast_probability, Some(0.95));
}

#[test]
fn test_no_threshold_skips_beta_draw() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let mut rng = ScriptedRandom::new(vec![0.0, 0.0]);
    let outcome = engine.simulate_warning_process(
        &cyclone(0.8),
        &SystemCapabilities::default(),
        &mut trust,
        &mut rng,
    );
    assert_eq!(rng.draws(), 2);
    assert_eq!(outcome.forecast_probability, None);
}

// ====================================================================
// Lead times and intensity
// ====================================================================

#[test]
fn test_long_flood_draws_extended_lead_time() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let event = HazardEvent::new(HazardType::Flood, 0.6)
        .in_region(RegionCategory::FloodPlain)
        .with_duration_hours(96.0);
    let outcome = run(&engine, &event, &SystemCapabilities::default(), &mut trust, &[0.5, 0.0]);
    assert_eq!(outcome.forecast_lead_time, Some(168.0));
    assert_eq!(outcome.lead_time_category, Some(LeadTimeCategory::Long));
}

#[test]
fn test_drought_lead_time_in_hours() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let event = HazardEvent::new(HazardType::Drought, 0.6).in_region(RegionCategory::BarindTract);
    let outcome = run(&engine, &event, &SystemCapabilities::default(), &mut trust, &[0.0, 0.0]);
    assert_eq!(outcome.forecast_lead_time, Some(360.0));
    assert_eq!(outcome.lead_time_category, Some(LeadTimeCategory::Short));
}

#[test]
fn test_weak_event_saves_no_lives() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let outcome = run(&engine, &cyclone(0.2), &SystemCapabilities::default(), &mut trust, &[0.5, 0.0]);
    assert!(outcome.warning_issued);
    assert!(outcome.forecast_correct);
    assert_eq!(outcome.lives_saved, 0);
    assert_eq!(outcome.potential_casualties, 0.0);
}

#[test]
fn test_out_of_range_intensity_is_clamped() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities::default();

    let mut trust = engine.new_trust_tracker();
    let over = run(&engine, &cyclone(1.7), &caps, &mut trust, &[0.5, 0.0]);
    let mut trust = engine.new_trust_tracker();
    let max = run(&engine, &cyclone(1.0), &caps, &mut trust, &[0.5, 0.0]);
    assert_eq!(over.lives_saved, max.lives_saved);
    assert_eq!(over.population_response_rate, max.population_response_rate);

    // NaN is treated as zero intensity: a wrong forecast becomes a false alarm.
    let mut trust = engine.new_trust_tracker();
    let nan = run(&engine, &cyclone(f64::NAN), &caps, &mut trust, &[0.5, 0.999]);
    assert!(nan.false_alarm);
}

#[test]
fn test_skill_clamped_for_strong_systems() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let caps = SystemCapabilities {
        technology_level: Some(3.0),
        staff_training: Some(1.0),
        observation_network: Some(1.0),
        ..Default::default()
    };
    let outcome = run(&engine, &cyclone(0.8), &caps, &mut trust, &[0.0, 0.0]);
    // 0.65 * 1.9 exceeds one.
    assert_eq!(outcome.forecast_accuracy, 1.0);
}

#[test]
fn test_empty_channel_list_disseminates_nothing() {
    let engine = EarlyWarningEngine::new();
    let mut trust = engine.new_trust_tracker();
    let caps = SystemCapabilities {
        available_systems: Some(Vec::new()),
        ..Default::default()
    };
    let outcome = run(&engine, &cyclone(0.8), &caps, &mut trust, &[0.5, 0.0]);
    assert!(outcome.warning_issued);
    assert_eq!(outcome.dissemination_effectiveness, 0.0);
    assert_eq!(outcome.lives_saved, 0);
}

// ====================================================================
// Reproducibility
// ====================================================================

#[test]
fn test_same_seed_same_outcomes() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities::default();
    let events: Vec<HazardEvent> = HazardType::KNOWN
        .iter()
        .map(|h| HazardEvent::new(h.clone(), 0.45).in_region(RegionCategory::FloodPlain))
        .collect();

    let run_all = |seed: u64| {
        let mut rng = SimRng::from_seed_u64(seed);
        let mut trust = engine.new_trust_tracker();
        events
            .iter()
            .cycle()
            .take(64)
            .map(|e| engine.simulate_warning_process(e, &caps, &mut trust, &mut rng))
            .collect::<Vec<_>>()
    };

    assert_eq!(run_all(7), run_all(7));
}

#[test]
fn test_tracker_reset_reproduces_output() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities::default();
    let mut trust = engine.new_trust_tracker();
    let event = cyclone(0.35);

    let mut rng = SimRng::from_seed_u64(99);
    let first: Vec<WarningOutcome> = (0..40)
        .map(|_| engine.simulate_warning_process(&event, &caps, &mut trust, &mut rng))
        .collect();
    assert!(first.iter().any(|o| o.false_alarm), "seed should hit a false alarm");

    trust.reset_all();
    let mut rng = SimRng::from_seed_u64(99);
    let second: Vec<WarningOutcome> = (0..40)
        .map(|_| engine.simulate_warning_process(&event, &caps, &mut trust, &mut rng))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_invariants_across_seeds() {
    let engine = EarlyWarningEngine::new();
    let caps = SystemCapabilities {
        available_systems: Some(
            Channel::ALL.iter().map(|c| c.name().to_string()).collect(),
        ),
        warning_threshold: Some(0.5),
        ..Default::default()
    };
    let regions = [
        RegionCategory::Coastal,
        RegionCategory::Urban,
        RegionCategory::HaorBasin,
        RegionCategory::Generic,
    ];

    for seed in 0..20u64 {
        let mut rng = SimRng::from_seed_u64(seed);
        let mut trust = engine.new_trust_tracker();
        for hazard in HazardType::KNOWN {
            for region in regions {
                let intensity = rng.uniform();
                let event = HazardEvent::new(hazard.clone(), intensity).in_region(region);
                let o = engine.simulate_warning_process(&event, &caps, &mut trust, &mut rng);

                assert!((0.0..=1.0).contains(&o.dissemination_effectiveness));
                assert!((0.0..=1.0).contains(&o.population_response_rate));
                assert!((0.0..=1.0).contains(&o.forecast_accuracy));
                if o.warning_issued {
                    assert!(o.warning_possible);
                }
                if o.lives_saved > 0 {
                    assert!(o.warning_issued && o.forecast_correct);
                }
                if o.false_alarm {
                    assert_eq!(o.lives_saved, 0);
                }
            }
        }
    }
}

// ====================================================================
// Custom parameters
// ====================================================================

#[test]
fn test_with_params_rejects_bad_lead_time_weights() {
    let mut params = WarningParams::default();
    params.forecasts[0].lead_times[0].weight = 0.9;
    let err = EarlyWarningEngine::with_params(params).expect_err("weights sum to 1.6");
    assert!(matches!(err, ParamsError::InvalidWeights { .. }));
}

#[test]
fn test_with_params_requires_every_channel() {
    let mut params = WarningParams::default();
    params.channels.retain(|c| c.channel != Channel::Television);
    let err = EarlyWarningEngine::with_params(params).expect_err("television row missing");
    assert!(matches!(err, ParamsError::EmptyTable { ref table } if table == "channels.television"));
}

#[test]
fn test_with_params_custom_decay() {
    let mut params = WarningParams::default();
    params.false_alarm.decay_rate = 0.5;
    let engine = EarlyWarningEngine::with_params(params).expect("valid params");
    let mut trust = engine.new_trust_tracker();
    run(&engine, &cyclone(0.3), &SystemCapabilities::default(), &mut trust, &[0.0, 0.999]);
    assert!((trust.current(RegionCategory::Coastal) - 0.5).abs() < 1e-12);
}

#[test]
fn test_params_json_override_keeps_defaults() {
    let json = r#"{
        "skill_blend": {"technology": 0.2},
        "issuance": {"missed_warning_intensity": 0.6},
        "notes": "tuned for the 2030s"
    }"#;
    let params = WarningParams::from_json_str(json).expect("valid override");
    assert_eq!(params.skill_blend.technology, 0.2);
    assert_eq!(params.skill_blend.training, 0.3);
    assert_eq!(params.issuance.missed_warning_intensity, 0.6);
    assert_eq!(params.forecasts.len(), WarningParams::default().forecasts.len());
}

#[test]
fn test_params_json_roundtrip_and_rejects() {
    let json = serde_json::to_string(&WarningParams::default()).expect("serialize");
    let parsed = WarningParams::from_json_str(&json).expect("default tables are valid");
    assert_eq!(parsed, WarningParams::default());

    let bad = r#"{"false_alarm": {"decay_rate": 1.5}}"#;
    assert!(matches!(
        WarningParams::from_json_str(bad),
        Err(ParamsError::OutOfRange { .. })
    ));
    assert!(matches!(
        WarningParams::from_json_str("{oops"),
        Err(ParamsError::Parse(_))
    ));
}

#[test]
fn test_params_missing_file_is_io_error() {
    let result = WarningParams::from_json_file("/definitely/not/here/warning.json");
    assert!(matches!(result, Err(ParamsError::Io(_))));
}
