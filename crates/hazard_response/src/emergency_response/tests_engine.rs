use super::*;
use crate::hazard::{HazardType, RegionCategory};
use crate::params_error::ParamsError;

fn haor_flood() -> DisasterImpacts {
    DisasterImpacts {
        deaths: Some(20.0),
        displaced: Some(1000.0),
        injuries: Some(50.0),
        affected: Some(5000.0),
        ..DisasterImpacts::new(HazardType::Flood, RegionCategory::HaorBasin)
    }
}

fn stocks(shelter: f64, relief_days: f64, medical: f64) -> AvailableResources {
    AvailableResources {
        shelter_capacity: Some(shelter),
        relief_days: Some(relief_days),
        medical_capacity: Some(medical),
        ..Default::default()
    }
}

fn assert_unit(name: &str, value: f64) {
    assert!((0.0..=1.0).contains(&value), "{name} = {value}");
}

// ====================================================================
// Haor flood
// ====================================================================

#[test]
fn test_haor_flood_shelter_shortfall() {
    let engine = EmergencyResponseEngine::new();
    let outcome = engine.simulate_response(&haor_flood(), &stocks(800.0, 3000.0, 100.0));

    assert_eq!(outcome.hazard_type, HazardType::Flood);
    assert_eq!(outcome.region, RegionCategory::HaorBasin);
    assert!((outcome.shelter_access_ratio - 0.8).abs() < 1e-12);
    assert!((outcome.relief_provision_ratio - 3000.0 / 35_000.0).abs() < 1e-12);
    assert!((outcome.medical_service_ratio - 2.0).abs() < 1e-12);
    assert_unit("overall", outcome.overall_response_score);
    assert!(outcome.additional_lives_saved <= 20);

    let used = &outcome.resource_consumption;
    assert_eq!(used.shelter_beds_required, 1000);
    assert_eq!(used.relief_days_required, 35_000);
    assert_eq!(used.medical_demand, 50);
    assert!(used.shelter_occupancy <= 800);
}

#[test]
fn test_haor_flood_component_scores() {
    let engine = EmergencyResponseEngine::new();
    let outcome = engine.simulate_response(&haor_flood(), &stocks(800.0, 3000.0, 100.0));

    assert!((outcome.regional_capacity - 0.46).abs() < 1e-12);
    // 0.6*.25 + 0.5*.25 + 0.5*.2 + 0.7*.15 + 0.6*.15
    assert!((outcome.coordination_effectiveness - 0.57).abs() < 1e-12);
    assert_eq!(outcome.transport_disruption, 0.7);
    assert_eq!(outcome.response_timeliness, 1.0);
    assert_eq!(outcome.agency_capability.len(), Agency::ALL.len());
    assert!((outcome.agency_capability[&Agency::MedicalServices] - 0.3).abs() < 1e-12);

    // 0.5 * 0.7 * lift(0.3) * lift(0.46) * lift(0.57) * (1 - 0.5 * 0.7)
    let medical = 0.5 * 0.7 * 0.65 * 0.73 * 0.785 * 0.65;
    assert!((outcome.effectiveness(Operation::Medical) - medical).abs() < 1e-12);
}

#[test]
fn test_overall_score_is_mean_of_capped_components() {
    let engine = EmergencyResponseEngine::new();
    let outcome = engine.simulate_response(&haor_flood(), &stocks(800.0, 3000.0, 100.0));

    let effectiveness: f64 = Operation::ALL
        .into_iter()
        .map(|op| outcome.effectiveness(op))
        .sum();
    // Medical coverage of 2.0 counts as 1.0.
    let expected = (effectiveness + 0.8 + 3000.0 / 35_000.0 + 1.0) / 8.0;
    assert!((outcome.overall_response_score - expected).abs() < 1e-12);
}

// ====================================================================
// Invariants
// ====================================================================

#[test]
fn test_gaps_complement_effectiveness() {
    let engine = EmergencyResponseEngine::new();
    for hazard in HazardType::KNOWN {
        let impacts = DisasterImpacts {
            deaths: Some(10.0),
            ..DisasterImpacts::new(hazard, RegionCategory::Coastal)
        };
        let outcome = engine.simulate_response(&impacts, &AvailableResources::default());
        for op in Operation::ALL {
            assert_unit(op.name(), outcome.effectiveness(op));
            assert!((outcome.effectiveness(op) + outcome.gap(op) - 1.0).abs() < 1e-12);
        }
        assert_unit("overall", outcome.overall_response_score);
    }
}

#[test]
fn test_shelter_ratio_scales_with_capacity() {
    let engine = EmergencyResponseEngine::new();
    let small = engine.simulate_response(&haor_flood(), &stocks(250.0, 3000.0, 100.0));
    let large = engine.simulate_response(&haor_flood(), &stocks(500.0, 3000.0, 100.0));
    assert!((large.shelter_access_ratio - 2.0 * small.shelter_access_ratio).abs() < 1e-12);
    // Stocks do not feed the effectiveness scores.
    assert_eq!(small.response_effectiveness, large.response_effectiveness);
}

#[test]
fn test_repeated_calls_are_identical() {
    let engine = EmergencyResponseEngine::new();
    let resources = stocks(800.0, 3000.0, 100.0);
    let first = engine.simulate_response(&haor_flood(), &resources);
    let second = engine.simulate_response(&haor_flood(), &resources);
    assert_eq!(first, second);
}

#[test]
fn test_negative_inputs_are_clamped() {
    let engine = EmergencyResponseEngine::new();
    let impacts = DisasterImpacts {
        deaths: Some(-20.0),
        displaced: Some(-1000.0),
        injuries: Some(-5.0),
        affected: Some(-10.0),
        ..DisasterImpacts::new(HazardType::Cyclone, RegionCategory::Coastal)
    };
    let outcome = engine.simulate_response(&impacts, &stocks(-5.0, -5.0, -5.0));

    assert_eq!(outcome.additional_lives_saved, 0);
    assert_eq!(outcome.shelter_access_ratio, 0.0);
    assert_eq!(outcome.relief_provision_ratio, 0.0);
    assert_eq!(outcome.medical_service_ratio, 0.0);
    assert_eq!(outcome.resource_consumption, ResourceConsumption::default());
    assert_unit("overall", outcome.overall_response_score);
}

#[test]
fn test_zero_demand_counts_as_one_person() {
    let engine = EmergencyResponseEngine::new();
    let impacts = DisasterImpacts::new(HazardType::Drought, RegionCategory::BarindTract);
    let outcome = engine.simulate_response(&impacts, &stocks(3.0, 0.0, 0.0));
    assert_eq!(outcome.shelter_access_ratio, 3.0);
}

// ====================================================================
// Fallbacks
// ====================================================================

#[test]
fn test_unknown_hazard_and_region_use_defaults() {
    let engine = EmergencyResponseEngine::new();
    let impacts = DisasterImpacts {
        deaths: Some(5.0),
        ..DisasterImpacts::new(HazardType::from_name("tsunami"), RegionCategory::Generic)
    };
    let outcome = engine.simulate_response(&impacts, &AvailableResources::default());

    assert!((outcome.regional_capacity - 0.6).abs() < 1e-12);
    assert_eq!(outcome.transport_disruption, 0.5);
    assert!((outcome.coordination_effectiveness - 0.58).abs() < 1e-12);
    assert_eq!(outcome.hazard_type, HazardType::Other("tsunami".into()));
    for op in Operation::ALL {
        assert!(outcome.effectiveness(op) > 0.0);
    }
}

#[test]
fn test_slow_mobilization_saves_fewer_lives() {
    let engine = EmergencyResponseEngine::new();
    let impacts = DisasterImpacts {
        deaths: Some(200.0),
        ..haor_flood()
    };
    let fast = engine.simulate_response(&impacts, &AvailableResources::default());
    let slow = engine.simulate_response(
        &impacts,
        &AvailableResources {
            mobilization_time_hours: Some(96.0),
            ..Default::default()
        },
    );
    assert_eq!(fast.response_timeliness, 1.0);
    assert!((slow.response_timeliness - 0.5).abs() < 1e-12);
    assert!(slow.additional_lives_saved < fast.additional_lives_saved);
}

#[test]
fn test_better_resources_raise_effectiveness() {
    let engine = EmergencyResponseEngine::new();
    let poor = AvailableResources {
        rescue_adequacy: Some(0.2),
        ..Default::default()
    };
    let rich = AvailableResources {
        rescue_adequacy: Some(1.0),
        ..Default::default()
    };
    let low = engine.simulate_response(&haor_flood(), &poor);
    let high = engine.simulate_response(&haor_flood(), &rich);
    assert!(high.effectiveness(Operation::Rescue) > low.effectiveness(Operation::Rescue));
    assert_eq!(
        high.effectiveness(Operation::Relief),
        low.effectiveness(Operation::Relief)
    );
    assert!(high.additional_lives_saved >= low.additional_lives_saved);
}

#[test]
fn test_national_lead_beats_union_lead() {
    let engine = EmergencyResponseEngine::new();
    let national = DisasterImpacts {
        admin_level: Some(AdminLevel::National),
        ..haor_flood()
    };
    let union = DisasterImpacts {
        admin_level: Some(AdminLevel::Union),
        ..haor_flood()
    };
    let resources = AvailableResources::default();
    let high = engine.simulate_response(&national, &resources);
    let low = engine.simulate_response(&union, &resources);
    assert!(high.effectiveness(Operation::Evacuation) > low.effectiveness(Operation::Evacuation));
    assert_eq!(high.effectiveness(Operation::Medical), low.effectiveness(Operation::Medical));
}

// ====================================================================
// Parameters
// ====================================================================

#[test]
fn test_with_params_rejects_invalid_tables() {
    let mut params = ResponseParams::default();
    params.default_adequacy = 1.5;
    assert!(matches!(
        EmergencyResponseEngine::with_params(params),
        Err(ParamsError::OutOfRange { .. })
    ));
}

#[test]
fn test_custom_params_change_outcome() {
    let params = ResponseParams::from_json_str(r#"{"transport": {"penalty_scale": 0.0}}"#)
        .expect("valid override");
    let custom = EmergencyResponseEngine::with_params(params).expect("valid");
    let default = EmergencyResponseEngine::new();
    let resources = AvailableResources::default();
    let unpenalized = custom.simulate_response(&haor_flood(), &resources);
    let penalized = default.simulate_response(&haor_flood(), &resources);
    assert!(
        unpenalized.effectiveness(Operation::Rescue) > penalized.effectiveness(Operation::Rescue)
    );
}

#[test]
fn test_inputs_parse_from_json_with_extra_keys() {
    let impacts: DisasterImpacts = serde_json::from_str(
        r#"{"hazard_type": "cyclone", "region": "coastal", "deaths": 40,
            "displaced": 12000, "economic_loss": 1.5e9}"#,
    )
    .expect("impacts");
    let resources: AvailableResources =
        serde_json::from_str(r#"{"shelter_capacity": 6000, "fuel_liters": 100}"#)
            .expect("resources");

    let outcome = EmergencyResponseEngine::new().simulate_response(&impacts, &resources);
    assert_eq!(outcome.hazard_type, HazardType::Cyclone);
    assert!((outcome.shelter_access_ratio - 0.5).abs() < 1e-12);
}
