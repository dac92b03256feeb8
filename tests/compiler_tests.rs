use tokensmith::{
    CompileError, CompileOptions, Compiled, LookupTree, TokenValue, Warning,
    compile_str,
    config::SectionSpec,
    diagnostics::Provenance,
    index::MatchKind,
    naming::split_name,
    output::{parse_module, render_module},
};

const SOURCE: &str = r##"{
    "$metadata": { "tokenSetOrder": ["Color/Light", "Spacing/Mode 1", "Type"] },
    "Color/Light": {
        "Brand": {
            "Primary 1": { "type": "color", "value": "#18181b" },
            "White": { "type": "color", "value": "#ffffff" }
        },
        "Text": {
            "Header": { "type": "color", "value": "{Brand.Primary 1}" },
            "Danger": { "type": "color", "value": "{Semantic.Error Red}" },
            "Unknown": { "type": "color", "value": "{Totally.Unknown.Alias}" }
        }
    },
    "Spacing/Mode 1": {
        "Space": {
            "L": { "type": "dimension", "value": "16" }
        }
    },
    "Type": {
        "Family": {
            "Body": { "type": "fontFamilies", "value": "Open Sans" }
        },
        "Weight": {
            "Bold": { "type": "fontWeights", "value": "Bold" }
        }
    }
}"##;

fn compile(source: &str) -> Compiled {
    compile_str(source, &CompileOptions::default()).unwrap()
}

fn compile_with(source: &str, options: &CompileOptions) -> Compiled {
    compile_str(source, options).unwrap()
}

fn has_warning(compiled: &Compiled, pred: impl Fn(&Warning) -> bool) -> bool {
    compiled.report.warnings.iter().any(pred)
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn test_unitless_dimension_gets_pixels() {
    let compiled = compile(SOURCE);

    assert_eq!(compiled.sheet.get("--spacing-mode-1-space-l"), Some("16px"));
    assert_eq!(
        compiled.tree.get_token("spacing.mode.1.space.l", Some(TokenValue::Number(0))),
        TokenValue::Number(16)
    );
}

#[test]
fn test_reference_resolves_in_both_artifacts() {
    let compiled = compile(SOURCE);

    assert_eq!(compiled.sheet.get("color-light-text-header"), Some("#18181b"));
    assert_eq!(compiled.tree.lookup("color.light.text.header"), Some("#18181b"));
}

#[test]
fn test_font_family_is_quoted_and_read_back_unquoted() {
    let compiled = compile(SOURCE);

    assert_eq!(compiled.sheet.get("type-family-body"), Some("\"Open Sans\""));
    assert_eq!(
        compiled.tree.get_token("type.family.body", None),
        TokenValue::Text("Open Sans".to_string())
    );
}

#[test]
fn test_unknown_alias_still_emits_token() {
    let compiled = compile(SOURCE);

    assert_eq!(compiled.sheet.get("color-light-text-unknown"), Some("#000000"));
    assert!(has_warning(&compiled, |w| matches!(
        w,
        Warning::UnresolvedReference { alias, .. } if alias == "Totally.Unknown.Alias"
    )));
}

#[test]
fn test_keyword_fallback_for_colors() {
    let compiled = compile(SOURCE);

    assert_eq!(compiled.sheet.get("color-light-text-danger"), Some("#dc2626"));
    let record = compiled
        .report
        .resolutions
        .iter()
        .find(|r| r.token == "color-light-text-danger")
        .unwrap();
    assert_eq!(record.provenance, Provenance::Keyword("error".to_string()));
}

#[test]
fn test_font_weight_mapped() {
    let compiled = compile(SOURCE);
    assert_eq!(compiled.sheet.get("type-weight-bold"), Some("700"));
}

#[test]
fn test_only_the_unknown_alias_warns() {
    let compiled = compile(SOURCE);
    assert_eq!(compiled.report.warnings.len(), 1);
    assert_eq!(compiled.sheet.len(), 8);
}

// ============================================================================
// Output properties
// ============================================================================

#[test]
fn test_compile_is_deterministic() {
    assert_eq!(compile(SOURCE), compile(SOURCE));
}

#[test]
fn test_sheet_order_follows_document() {
    let compiled = compile(SOURCE);
    let names: Vec<&str> = compiled.sheet.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "color-light-brand-primary-1",
            "color-light-brand-white",
            "color-light-text-header",
            "color-light-text-danger",
            "color-light-text-unknown",
            "spacing-mode-1-space-l",
            "type-family-body",
            "type-weight-bold",
        ]
    );
}

#[test]
fn test_every_variable_is_reachable_in_tree() {
    let compiled = compile(SOURCE);
    for entry in &compiled.sheet {
        assert_eq!(
            compiled.tree.lookup_segments(&split_name(&entry.name)),
            Some(entry.value.as_str()),
            "{} not reachable",
            entry.name
        );
    }
}

#[test]
fn test_generated_module_reads_back() {
    let compiled = compile(SOURCE);
    let module = render_module(&compiled.tree, "tokens");
    assert_eq!(parse_module(&module).unwrap(), compiled.tree);
}

#[test]
fn test_no_braces_survive() {
    let source = r##"{
        "Primitives": {
            "Opacity": { "Half": { "type": "opacity", "value": "0.5" } }
        },
        "Overlay": {
            "Scrim": { "type": "color", "value": "rgba(0, 0, 0, {Opacity.Half})" },
            "Broken": { "type": "text", "value": "{Opacity.Half" },
            "Missing": { "type": "text", "value": "{Nowhere} and {Nothing}" }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("overlay-scrim"), Some("rgba(0, 0, 0, 0.5)"));
    assert_eq!(compiled.sheet.get("overlay-broken"), Some("Opacity.Half"));
    assert_eq!(compiled.sheet.get("overlay-missing"), Some("none and none"));
    for entry in &compiled.sheet {
        assert!(!entry.value.contains(['{', '}']), "{} kept a brace", entry.name);
    }
}

// ============================================================================
// Normalization through the compiler
// ============================================================================

#[test]
fn test_dimension_units() {
    let source = r##"{
        "Sizes": {
            "A": { "type": "dimension", "value": "1.50" },
            "B": { "type": "dimension", "value": "2rem" },
            "C": { "type": "spacing", "value": 4 },
            "D": { "type": "sizing", "value": "auto" },
            "E": { "type": "borderRadius", "value": "50%" }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("sizes-a"), Some("1.5px"));
    assert_eq!(compiled.sheet.get("sizes-b"), Some("2rem"));
    assert_eq!(compiled.sheet.get("sizes-c"), Some("4px"));
    assert_eq!(compiled.sheet.get("sizes-d"), Some("auto"));
    assert_eq!(compiled.sheet.get("sizes-e"), Some("50%"));
    assert!(has_warning(&compiled, |w| matches!(
        w,
        Warning::NonNumericDimension { token, .. } if token == "sizes-d"
    )));
}

#[test]
fn test_invalid_color_falls_back() {
    let source = r##"{ "C": { "Odd": { "type": "color", "value": "blue-ish" } } }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("c-odd"), Some("#000000"));
    assert!(matches!(compiled.report.warnings[0], Warning::InvalidColor { .. }));
}

#[test]
fn test_unresolved_dimension_gets_zero_not_keyword() {
    let source = r##"{ "Gap": { "M": { "type": "spacing", "value": "{Error Gap}" } } }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("gap-m"), Some("0px"));
    assert!(has_warning(&compiled, |w| matches!(
        w,
        Warning::UnresolvedReference { substitute, .. } if substitute == "0"
    )));
}

#[test]
fn test_box_shadow_layers() {
    let source = r##"{
        "Primitives": { "Shadow": { "type": "color", "value": "#0000001a" } },
        "Effects": {
            "Card": {
                "type": "boxShadow",
                "value": [
                    { "x": 0, "y": 2, "blur": 4, "spread": 0, "color": "{Shadow}", "type": "dropShadow" },
                    { "x": "1", "y": "1", "blur": "2", "color": "#fff", "type": "innerShadow" }
                ]
            }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(
        compiled.sheet.get("effects-card"),
        Some("0px 2px 4px 0px #0000001a, inset 1px 1px 2px 0px #fff")
    );
}

#[test]
fn test_token_without_usable_value_is_dropped() {
    let source = r##"{ "X": { "Nil": { "type": "color", "value": null } } }"##;
    let compiled = compile(source);

    assert!(compiled.sheet.is_empty());
    assert!(matches!(compiled.report.warnings[0], Warning::MissingValue { .. }));
}

// ============================================================================
// Reference chains
// ============================================================================

const CHAIN: &str = r##"{
    "Palette": { "Blue 500": { "type": "color", "value": "#1d4ed8" } },
    "Alias": {
        "Link": { "type": "color", "value": "{Blue 500}" },
        "Button": { "type": "color", "value": "{Link}" }
    }
}"##;

#[test]
fn test_chained_reference_is_followed() {
    let compiled = compile(CHAIN);

    assert_eq!(compiled.sheet.get("alias-link"), Some("#1d4ed8"));
    assert_eq!(compiled.sheet.get("alias-button"), Some("#1d4ed8"));
    assert!(compiled.report.resolutions.iter().any(|r| {
        r.token == "alias-button" && r.alias == "Link" && r.provenance == Provenance::Chained { hops: 2 }
    }));
    assert!(!compiled.report.has_warnings());
}

#[test]
fn test_depth_one_disables_chaining() {
    let options = CompileOptions {
        max_reference_depth: 1,
        ..CompileOptions::default()
    };
    let compiled = compile_with(CHAIN, &options);

    assert_eq!(compiled.sheet.get("alias-link"), Some("#1d4ed8"));
    assert_eq!(compiled.sheet.get("alias-button"), Some("#000000"));
    assert!(has_warning(&compiled, |w| matches!(w, Warning::ReferenceTooDeep { limit: 1, .. })));
}

#[test]
fn test_reference_cycle_terminates() {
    let source = r##"{
        "Loop": {
            "A": { "type": "color", "value": "{B}" },
            "B": { "type": "color", "value": "{A}" }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("loop-a"), Some("#000000"));
    assert_eq!(compiled.sheet.get("loop-b"), Some("#000000"));
    assert!(has_warning(&compiled, |w| matches!(w, Warning::ReferenceCycle { .. })));
}

#[test]
fn test_fuzzy_tie_goes_to_document_order() {
    let source = r##"{
        "Palette": {
            "Gray 100": { "type": "color", "value": "#f4f4f5" },
            "Gray 900": { "type": "color", "value": "#18181b" }
        },
        "Alias": { "Muted": { "type": "color", "value": "{Gray}" } }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("alias-muted"), Some("#f4f4f5"));
    let record = &compiled.report.resolutions[0];
    assert_eq!(record.provenance, Provenance::Primitive(MatchKind::Substring));
    assert_eq!(record.matched.as_deref(), Some("Gray 100"));
}

#[test]
fn test_exact_reference_beats_primitive_containment() {
    let source = r##"{
        "Color": {
            "Brand": { "Blue": { "type": "color", "value": "#0000ff" } },
            "Link": {
                "PrimaryHover": { "type": "color", "value": "#ff0000" },
                "Primary": { "type": "color", "value": "{Brand.Blue}" }
            },
            "Button": { "Bg": { "type": "color", "value": "{Link.Primary}" } }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("color-button-bg"), Some("#0000ff"));
    let record = compiled
        .report
        .resolutions
        .iter()
        .find(|r| r.token == "color-button-bg" && r.alias == "Link.Primary")
        .unwrap();
    assert_eq!(record.provenance, Provenance::Chained { hops: 2 });
    assert_eq!(record.matched.as_deref(), Some("Link.Primary"));
    assert!(!compiled.report.has_warnings());
}

#[test]
fn test_two_letter_key_matches_by_containment() {
    let source = r##"{
        "Spacing": { "Space": { "XS": { "type": "dimension", "value": "4" } } },
        "Layout": { "Gap": { "type": "dimension", "value": "{Sizes.XS}" } }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("layout-gap"), Some("4px"));
    assert_eq!(
        compiled.report.resolutions[0].provenance,
        Provenance::Primitive(MatchKind::Substring)
    );
    assert!(!compiled.report.has_warnings());
}

#[test]
fn test_reference_to_composite_shadow() {
    let source = r##"{
        "Base": { "Shade": { "type": "color", "value": "#0000001a" } },
        "Elevation": {
            "1": {
                "type": "boxShadow",
                "value": [{ "x": 0, "y": 1, "blur": 3, "spread": 0, "color": "{Shade}" }]
            }
        },
        "Effects": {
            "Card": { "Shadow": { "type": "boxShadow", "value": "{Elevation.1}" } },
            "Modal": { "Shadow": { "type": "boxShadow", "value": "{Elevation.9}" } }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("elevation-1"), Some("0px 1px 3px 0px #0000001a"));
    assert_eq!(compiled.sheet.get("effects-card-shadow"), Some("0px 1px 3px 0px #0000001a"));
    assert_eq!(compiled.sheet.get("effects-modal-shadow"), Some("none"));
    assert!(matches!(
        &compiled.report.warnings[..],
        [Warning::UnresolvedReference { alias, substitute, .. }]
            if alias == "Elevation.9" && substitute == "none"
    ));
}

#[test]
fn test_shadow_never_stands_in_for_a_color() {
    let source = r##"{
        "Effects": {
            "Ring": {
                "type": "boxShadow",
                "value": [{ "x": 0, "y": 0, "blur": 0, "spread": 2, "color": "{Effects.Ring}" }]
            },
            "Focus": { "type": "boxShadow", "value": "{Effects.Ring}" }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.get("effects-ring"), Some("0px 0px 0px 2px #000000"));
    assert_eq!(compiled.sheet.get("effects-focus"), Some("0px 0px 0px 2px #000000"));
    assert_eq!(compiled.report.warnings.len(), 2);
    assert!(compiled.report.warnings.iter().all(|w| matches!(
        w,
        Warning::UnresolvedReference { alias, substitute, .. }
            if alias == "Effects.Ring" && substitute == "#000000"
    )));
}

#[test]
fn test_reference_into_unemitted_section() {
    let options = CompileOptions {
        sections: vec![SectionSpec {
            source: "Alias".to_string(),
            name: None,
        }],
        ..CompileOptions::default()
    };
    let compiled = compile_with(CHAIN, &options);

    assert_eq!(compiled.sheet.len(), 2);
    assert_eq!(compiled.sheet.get("alias-button"), Some("#1d4ed8"));
    assert_eq!(compiled.sheet.get("palette-blue-500"), None);
}

// ============================================================================
// Name clashes
// ============================================================================

#[test]
fn test_longer_path_wins_collision() {
    for source in [
        r##"{ "Size": {
            "Radius": { "type": "borderRadius", "value": "4" },
            "Radius Large": { "type": "borderRadius", "value": "8" }
        } }"##,
        r##"{ "Size": {
            "Radius Large": { "type": "borderRadius", "value": "8" },
            "Radius": { "type": "borderRadius", "value": "4" }
        } }"##,
    ] {
        let compiled = compile(source);

        assert_eq!(compiled.sheet.get("size-radius"), None);
        assert_eq!(compiled.sheet.get("size-radius-large"), Some("8px"));
        assert_eq!(compiled.tree.lookup("size.radius.large"), Some("8px"));
        assert_eq!(compiled.tree.lookup("size.radius"), None);
        assert!(compiled.report.warnings.contains(&Warning::PathCollision {
            dropped: "size-radius".to_string(),
            kept: "size-radius-large".to_string(),
        }));
    }
}

#[test]
fn test_first_duplicate_name_wins() {
    let source = r##"{ "Grid": {
        "Gap M": { "type": "spacing", "value": "8" },
        "Gap-M": { "type": "spacing", "value": "12" }
    } }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.len(), 1);
    assert_eq!(compiled.sheet.get("grid-gap-m"), Some("8px"));
    assert!(compiled.report.warnings.contains(&Warning::DuplicateName {
        name: "grid-gap-m".to_string()
    }));
}

// ============================================================================
// Sections and metadata
// ============================================================================

#[test]
fn test_configured_sections_are_renamed_and_reported() {
    let options = CompileOptions {
        sections: vec![
            SectionSpec {
                source: "Spacing/Mode 1".to_string(),
                name: Some("Space".to_string()),
            },
            SectionSpec {
                source: "Nope".to_string(),
                name: None,
            },
        ],
        ..CompileOptions::default()
    };
    let compiled = compile_with(SOURCE, &options);

    assert_eq!(compiled.sheet.len(), 1);
    assert_eq!(compiled.sheet.get("space-space-l"), Some("16px"));
    assert!(compiled.report.warnings.contains(&Warning::MissingSection {
        section: "Nope".to_string()
    }));
}

#[test]
fn test_metadata_keys_are_skipped() {
    let source = r##"{
        "$themes": [],
        "$metadata": { "Red": { "type": "color", "value": "#f00" } },
        "Color": {
            "$description": "brand colors",
            "Red": { "$type": "color", "$value": "#f00", "$extensions": { "x": 1 } }
        }
    }"##;
    let compiled = compile(source);

    assert_eq!(compiled.sheet.len(), 1);
    assert_eq!(compiled.sheet.get("color-red"), Some("#f00"));
}

#[test]
fn test_empty_source_compiles_to_nothing() {
    let compiled = compile("{}");
    assert!(compiled.sheet.is_empty());
    assert_eq!(compiled.tree, LookupTree::new());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_json_is_an_error() {
    let result = compile_str("{ \"Color\": ", &CompileOptions::default());
    assert!(matches!(result, Err(CompileError::Json(_))));
}

#[test]
fn test_non_object_root_is_an_error() {
    let result = compile_str("[1, 2]", &CompileOptions::default());
    assert!(matches!(result, Err(CompileError::NotAnObject("array"))));
}
