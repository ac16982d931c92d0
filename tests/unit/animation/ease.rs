use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn curve_values_match_definitions() {
    let eps = 1e-12;
    assert!((Ease::Linear.apply(0.3) - 0.3).abs() < eps);
    assert!((Ease::EaseIn.apply(0.75) - 0.28125).abs() < eps);
    assert!((Ease::EaseOut.apply(0.25) - 0.4375).abs() < eps);
    assert!((Ease::EaseInOut.apply(0.25) - 0.125).abs() < eps);
    assert!((Ease::EaseInOut.apply(0.75) - 0.875).abs() < eps);
}

#[test]
fn ease_in_clamps_its_negative_lobe() {
    for t in [0.05, 0.2, 0.35, 0.49] {
        assert_eq!(Ease::EaseIn.apply(t), 0.0);
    }
    assert!(Ease::EaseIn.apply(0.6) > 0.0);
}

#[test]
fn monotonic_spot_check() {
    for ease in [Ease::Linear, Ease::EaseOut, Ease::EaseInOut] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
    let b = Ease::EaseIn.apply(0.5);
    let c = Ease::EaseIn.apply(0.75);
    assert!(b < c);
}

#[test]
fn input_outside_unit_interval_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn list_easings_is_fixed() {
    assert_eq!(
        list_easings(),
        &["linear", "easeIn", "easeOut", "easeInOut"]
    );
    assert_eq!(list_easings(), list_easings());
}

#[test]
fn ids_round_trip_through_from_str() {
    for ease in Ease::ALL {
        assert_eq!(ease.id().parse::<Ease>().unwrap(), ease);
        assert_eq!(ease.to_string(), ease.id());
    }
    let err = "bounce".parse::<Ease>().unwrap_err();
    assert!(matches!(err, BlurError::InvalidConfig(_)));
}

#[test]
fn serde_uses_camel_case_ids() {
    let json = serde_json::to_string(&Ease::EaseInOut).unwrap();
    assert_eq!(json, "\"easeInOut\"");
    let back: Ease = serde_json::from_str("\"easeIn\"").unwrap();
    assert_eq!(back, Ease::EaseIn);
}
