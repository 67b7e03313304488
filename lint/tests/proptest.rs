//! Property tests over generated documents.

use manolint::symbols::is_valid_label;
use manolint::{analyze, Analysis, Settings};
use proptest::prelude::*;

// ----------------------------------------------------------------------------
// Strategies

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('\0', '\x7f'), 0..256)
        .prop_map(|v| v.into_iter().collect())
}

fn arb_label() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec!["A", "B", "C", "X1", "LDA", "LONG"]))
}

fn arb_body() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "",
        "CLA",
        "CMA",
        "HLT",
        "SZA",
        "INP",
        "DEC 5",
        "DEC -7",
        "HEX 1F",
        "LDA A",
        "ADD B I",
        "STA X1",
        "BUN C",
        "ISZ 10",
        "LDA",
        "FOO",
        "CLA CMA",
    ])
}

/// Straight-line program: at most one ORG, at the top, and no END.
fn arb_program() -> impl Strategy<Value = String> {
    (
        prop::option::of(0usize..0xF00),
        prop::collection::vec((arb_label(), arb_body()), 0..48),
    )
        .prop_map(|(org, body)| {
            let mut lines = vec![];
            if let Some(org) = org {
                lines.push(format!("ORG {:X}", org));
            }
            for (label, inst) in body {
                match label {
                    Some(label) => lines.push(format!("{}, {}", label, inst)),
                    None => lines.push(format!("     {}", inst)),
                }
            }
            lines.join("\n")
        })
}

// ----------------------------------------------------------------------------
// Properties

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn never_panics(text in arb_text()) {
        let _ = analyze(&text, &Settings::default());
    }

    #[test]
    fn same_text_same_result(text in arb_text()) {
        prop_assert_eq!(
            analyze(&text, &Settings::default()),
            analyze(&text, &Settings::default())
        );
    }

    #[test]
    fn budget_bounds_gated_diagnostics(text in arb_program(), limit in 0usize..8) {
        let settings = Settings { max_number_of_problems: limit };
        let analysis = Analysis::run(&text, &settings);
        let r = &analysis.resolved;
        let ungated = r.duplicates.len() + r.unused.len() + r.invalid.len();
        prop_assert!(analysis.diagnostics.len() <= limit + ungated);
    }

    #[test]
    fn both_passes_agree_on_addresses(text in arb_program()) {
        let analysis = Analysis::run(&text, &Settings::default());
        for (name, symbol) in analysis.resolved.symbols.iter() {
            prop_assert_eq!(
                analysis.memory.line_of(symbol.address),
                Some(symbol.line + 1),
                "label {}", name
            );
        }
    }

    #[test]
    fn unused_labels_are_declared(text in arb_program()) {
        let analysis = Analysis::run(&text, &Settings::default());
        for label in analysis.resolved.unused.keys() {
            prop_assert!(analysis.resolved.symbols.get(label).is_some());
            prop_assert!(is_valid_label(label));
        }
        for label in analysis.resolved.invalid.keys() {
            prop_assert!(!is_valid_label(label));
        }
    }

    #[test]
    fn labels_are_short_alphanumerics(label in "[A-Z0-9]{0,5}") {
        let expected = (1..=3).contains(&label.len())
            && label.starts_with(|c: char| c.is_ascii_alphabetic())
            && !arch::is_reserved(&label);
        prop_assert_eq!(is_valid_label(&label), expected);
    }
}
