use tokensmith::{LookupTree, TokenValue};

fn tree(entries: &[(&str, &str)]) -> LookupTree {
    let mut tree = LookupTree::new();
    for (path, value) in entries {
        let segments: Vec<&str> = path.split('.').collect();
        tree.insert(&segments, value.to_string()).unwrap();
    }
    tree
}

fn sample() -> LookupTree {
    tree(&[
        ("spacing.mode.1.space.l", "16px"),
        ("spacing.mode.1.space.half", "1.5px"),
        ("spacing.mode.1.space.neg", "-4px"),
        ("size.rem", "2rem"),
        ("color.light.text.header", "#18181b"),
        ("type.family.body", "\"Open Sans\""),
        ("type.family.count", "\"12\""),
        ("empty", ""),
    ])
}

// ============================================================================
// get_token
// ============================================================================

#[test]
fn test_pixel_values_become_integers() {
    let t = sample();
    assert_eq!(t.get_token("spacing.mode.1.space.l", None), TokenValue::Number(16));
    assert_eq!(t.get_token("spacing.mode.1.space.half", None), TokenValue::Number(1));
    assert_eq!(t.get_token("spacing.mode.1.space.neg", None), TokenValue::Number(-4));
}

#[test]
fn test_quoted_values_are_unquoted() {
    let t = sample();
    assert_eq!(t.get_token("type.family.body", None), TokenValue::Text("Open Sans".into()));
    assert_eq!(t.get_token("type.family.count", None), TokenValue::Text("12".into()));
}

#[test]
fn test_other_values_pass_through() {
    let t = sample();
    assert_eq!(t.get_token("color.light.text.header", None), TokenValue::Text("#18181b".into()));
    assert_eq!(t.get_token("size.rem", None), TokenValue::Text("2rem".into()));
}

#[test]
fn test_missing_paths_return_fallback() {
    let t = sample();
    assert_eq!(t.get_token("spacing.mode.1.space.xxl", Some(TokenValue::Number(8))), TokenValue::Number(8));
    assert_eq!(t.get_token("nothing.here", Some("auto".into())), TokenValue::Text("auto".into()));
    assert_eq!(t.get_token("nothing.here", None), TokenValue::Text(String::new()));
}

#[test]
fn test_group_and_empty_values_return_fallback() {
    let t = sample();
    assert_eq!(t.get_token("spacing.mode", Some(TokenValue::Number(0))), TokenValue::Number(0));
    assert_eq!(t.get_token("empty", Some("x".into())), TokenValue::Text("x".into()));
}

#[test]
fn test_walking_past_a_leaf_returns_fallback() {
    let t = sample();
    assert_eq!(t.get_token("size.rem.deeper", None), TokenValue::default());
    assert_eq!(t.get_token("", None), TokenValue::default());
}

// ============================================================================
// Typed accessors
// ============================================================================

#[test]
fn test_get_string_keeps_units() {
    let t = sample();
    assert_eq!(t.get_string("spacing.mode.1.space.l", ""), "16px");
    assert_eq!(t.get_string("type.family.body", ""), "Open Sans");
    assert_eq!(t.get_string("missing", "fallback"), "fallback");
    assert_eq!(t.get_string("spacing", "group"), "group");
}

#[test]
fn test_get_number_strips_units_and_quotes() {
    let t = sample();
    assert_eq!(t.get_number("spacing.mode.1.space.l", 0.0), 16.0);
    assert_eq!(t.get_number("spacing.mode.1.space.half", 0.0), 1.5);
    assert_eq!(t.get_number("type.family.count", 0.0), 12.0);
}

#[test]
fn test_get_number_falls_back_on_non_numbers() {
    let t = sample();
    assert_eq!(t.get_number("size.rem", 1.0), 1.0);
    assert_eq!(t.get_number("color.light.text.header", -1.0), -1.0);
    assert_eq!(t.get_number("empty", 3.0), 3.0);
    assert_eq!(t.get_number("missing", 2.5), 2.5);
}

#[test]
fn test_token_value_accessors() {
    assert_eq!(TokenValue::Number(4).as_number(), Some(4));
    assert_eq!(TokenValue::from("4px").as_text(), Some("4px"));
    assert_eq!(TokenValue::Number(4).to_string(), "4");
}
