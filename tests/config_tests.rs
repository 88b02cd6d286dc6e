use idasolve::{SearchConfig, MAX_COST};

#[test]
fn json_round_trip() {
    let config = SearchConfig {
        tt_capacity: 11,
        perimeter_depth: 5,
        use_lookahead: true,
        ..SearchConfig::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: SearchConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config: SearchConfig = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(config, SearchConfig::default());

    let config: SearchConfig =
        serde_json::from_str(r#"{"use_tt": false, "perimeter_depth": 4}"#).expect("deserialize");
    assert!(!config.use_tt);
    assert_eq!(config.perimeter_depth, 4);
    assert_eq!(config.tt_capacity, SearchConfig::default().tt_capacity);
}

#[test]
fn bound_cap_is_clamped() {
    let mut config = SearchConfig::default();
    assert_eq!(config.bound_cap(), MAX_COST);

    config.max_cost = 0;
    assert_eq!(config.bound_cap(), 1);

    config.max_cost = 10_000;
    assert_eq!(config.bound_cap(), MAX_COST);

    config.max_cost = 17;
    assert_eq!(config.bound_cap(), 17);
}
