use placematch_engine::{
    MatchOutput, OverrideTable, PlaceMatcher, ReconciliationRegistry, apply, ratio,
};
use placematch_model::{CellValue, Dataset, MatchDecision, MatchOptions, MatchOrigin, NameSet};

fn source() -> NameSet {
    NameSet::from_values(["Tehran Jonub", "Ray", "Mashhad"])
}

fn target() -> NameSet {
    NameSet::from_values(["Tehran", "Rey", "Mashhad"])
}

#[test]
fn default_cutoff_leaves_short_edits_for_review() {
    let report = PlaceMatcher::new(MatchOptions::default())
        .run(&source(), &target())
        .unwrap();

    assert_eq!(
        report.exact_matches.get("Mashhad").map(String::as_str),
        Some("Mashhad")
    );
    // one substitution in a three-letter name scores 4/6
    assert!(ratio("Ray", "Rey") < 0.75);
    assert_eq!(report.decisions.get("Ray"), Some(&MatchDecision::Unmatched));
    assert_eq!(
        report.decisions.get("Tehran Jonub"),
        Some(&MatchDecision::Unmatched)
    );
    assert!(report.auto_matches.is_empty());
    assert_eq!(report.unmatched, vec!["Ray", "Tehran Jonub"]);

    let MatchOutput::Table(rows) = &report.output else {
        panic!("expected table output");
    };
    let ray = rows.iter().find(|r| r.source_name == "Ray").unwrap();
    assert_eq!(ray.name_by_distance, "Rey");
    assert_eq!(ray.name_by_ratio, "Rey");
    assert!(ray.metrics_agree);
    assert_eq!(ray.matched, None);
    // exact matches never reach the table
    assert!(rows.iter().all(|r| r.source_name != "Mashhad"));
}

#[test]
fn relaxed_cutoff_accepts_both() {
    let report = PlaceMatcher::new(MatchOptions::relaxed())
        .run(&source(), &target())
        .unwrap();
    assert_eq!(report.auto_matches.get("Ray").map(String::as_str), Some("Rey"));
    assert_eq!(
        report.auto_matches.get("Tehran Jonub").map(String::as_str),
        Some("Tehran")
    );
    assert!(report.unmatched.is_empty());
}

#[test]
fn manual_override_resolves_the_residual() {
    let source = source();
    let report = PlaceMatcher::default().run(&source, &target()).unwrap();
    let registry =
        ReconciliationRegistry::new().with_overrides(OverrideTable::from_pairs([("Ray", "Rey")]));
    let mapping = report.build_mapping(&registry, &source);

    assert!(mapping.contains("Tehran Jonub"));
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.canonical("Ray"), Some("Rey"));
    assert_eq!(mapping.get("Mashhad").map(|e| e.origin), Some(MatchOrigin::Exact));
    assert_eq!(mapping.unresolved(), vec!["Tehran Jonub"]);

    let mut cases = Dataset::new(vec!["county".to_string(), "cases".to_string()]);
    for (county, count) in [("Ray", "12"), ("Tehran Jonub", "3"), ("Mashhad", "7")] {
        cases
            .push_row(vec![CellValue::from_raw(county), CellValue::from_raw(count)])
            .unwrap();
    }
    let relabeled = apply(&mapping, &cases, "county").unwrap();
    let counties: Vec<&str> = relabeled
        .column_values("county")
        .unwrap()
        .map(CellValue::as_field)
        .collect();
    assert_eq!(counties, vec!["Rey", "Tehran Jonub", "Mashhad"]);
}

#[test]
fn empty_sets_are_not_an_error() {
    let empty = NameSet::new();
    let matcher = PlaceMatcher::default();

    let report = matcher.run(&source(), &empty).unwrap();
    assert!(report.output.is_empty());
    assert_eq!(report.unmatched.len(), 3);

    let report = matcher.run(&empty, &target()).unwrap();
    assert!(report.output.is_empty());
    assert!(report.unmatched.is_empty());
}
