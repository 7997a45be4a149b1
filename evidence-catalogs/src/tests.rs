use evidence_scoring::{Orientation, Polarity, Recommendation, ScanEngine, ScoreKind, SourceDocument};

use super::*;

fn scan(tool: Tool, text: &str) -> evidence_scoring::ScanResult {
    let catalog = tool.catalog().unwrap();
    ScanEngine::new(catalog)
        .scan(&SourceDocument::new("test", text))
        .unwrap()
}

#[test]
fn every_builtin_catalog_compiles() {
    for &tool in Tool::all() {
        let catalog = tool.catalog().unwrap_or_else(|e| panic!("{}: {}", tool, e));
        assert_eq!(catalog.tool(), tool.name());
        assert_eq!(catalog.scoring().is_dual_axis(), tool.is_dual_axis());
        assert!(catalog.rule_count() > 0);
        assert_eq!(Tool::from_name(tool.name()), Some(tool));
    }
}

#[test]
fn catalogs_are_cached() {
    let first = Tool::Bias.catalog().unwrap();
    let second = Tool::Bias.catalog().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn incapable_family_fails_family_involvement() {
    let result = scan(Tool::GuardianshipRisk, "The family is incapable of providing care.");

    let family = result.category("family_involvement").unwrap();
    assert_eq!(family.score.value(), 0.0);
    assert_eq!(family.negative_count, 1);
    assert_eq!(family.positive_count, 0);
    assert_eq!(family.confidence, 0.1);
    assert_eq!(family.supporting_evidence[0].matched_text, "family is incapable");

    assert_eq!(result.overall_score.value(), 4.0);
    assert_eq!(result.classification, "low_compliance");
    assert_eq!(result.compliance_issues, vec!["family_involvement"]);
}

#[test]
fn capable_family_is_not_a_negative_indicator() {
    let result = scan(Tool::GuardianshipRisk, "The family is able to manage, and the family cannot be faulted.");
    let family = result.category("family_involvement").unwrap();
    assert_eq!(family.positive_count, 1);
    assert_eq!(family.negative_count, 1);
    assert_eq!(family.score.value(), 5.0);
}

#[test]
fn bias_scores_by_severity() {
    let result = scan(Tool::Bias, "Those people are always aggressive and suffering from stress.");

    let scores: Vec<_> = result
        .category_scores
        .iter()
        .map(|c| (c.category.as_str(), c.score.value()))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("explicit_racism", 10.0),
            ("implicit_bias", 7.5),
            ("cultural_insensitivity", 5.0),
            ("stigmatizing_language", 3.5),
            ("deficit_language", 5.0),
            ("family_undermining", 5.0),
        ]
    );
    assert_eq!(result.overall_score.kind(), ScoreKind::Severity);
    assert_eq!(result.overall_score.value(), 6.0);
    assert_eq!(result.classification, "moderate_bias");
    assert_eq!(result.compliance_issues, vec!["explicit_racism", "implicit_bias"]);
    assert_eq!(result.risk_factors, vec!["explicit_racism", "implicit_bias"]);

    let catalog = Tool::Bias.catalog().unwrap();
    let guidance = catalog.guidance_for(&result.compliance_issues);
    insta::assert_debug_snapshot!(guidance, @r###"
    [
        (
            "explicit_racism",
            "Remove group generalisations and describe the individual's own circumstances.",
        ),
        (
            "implicit_bias",
            "Replace absolute characterisations with dated, observed behaviour.",
        ),
    ]
    "###);
}

#[test]
fn clean_documents_score_neutral_under_bias() {
    // No evidence is neutral, so one mild match scores below a clean document.
    let clean = scan(Tool::Bias, "She walks to the shops each morning.");
    assert_eq!(clean.total_matches, 0);
    assert_eq!(clean.overall_score.value(), 5.0);
    assert_eq!(clean.classification, "moderate_bias");
    assert!(clean.compliance_issues.is_empty());

    let mild = scan(Tool::Bias, "Her mobility is impaired.");
    assert_eq!(mild.category("deficit_language").unwrap().score.value(), 1.5);
    assert_eq!(mild.category("implicit_bias").unwrap().score.value(), 5.0);
    assert_eq!(mild.overall_score.value(), 4.4);
    assert_eq!(mild.classification, "moderate_bias");
}

#[test]
fn public_guardian_abbreviation_needs_word_boundaries() {
    let catalog = Tool::GoalsAlignment.catalog().unwrap();
    let engine = ScanEngine::new(catalog);

    let result = engine
        .scan_dual(&SourceDocument::new("plan", "The UPG makes decisions for its members."))
        .unwrap();
    assert_eq!(result.total_matches, 0);
}

#[test]
fn goals_alignment_compares_family_and_guardian() {
    let catalog = Tool::GoalsAlignment.catalog().unwrap();
    let document = SourceDocument::new(
        "plan",
        "The family supports choice and the PG makes decisions without consultation.",
    );
    let result = ScanEngine::new(catalog).scan_dual(&document).unwrap();

    let g1 = result.category("G1").unwrap();
    assert_eq!(g1.axis_a_score, 10.0);
    assert_eq!(g1.axis_b_score, 0.0);
    assert_eq!(g1.differential, 10.0);
    assert_eq!(g1.recommendation, Recommendation::StrongA);
    assert_eq!(g1.evidence_for_a.len(), 1);
    assert_eq!(g1.evidence_against_b[0].matched_text, "PG makes");

    assert_eq!(catalog.category("G1").unwrap().title, "More Choice and Control");
    assert_eq!(result.summary.overall_axis_a, 5.7);
    assert_eq!(result.summary.overall_axis_b, 4.3);
    assert_eq!(result.summary.overall_differential, 1.4);
    assert_eq!(result.summary.recommendation_label, "family");
}

#[test]
fn family_support_extracts_specific_evidence() {
    let catalog = Tool::FamilySupport.catalog().unwrap();
    assert_eq!(catalog.orientation(), Orientation::HigherIsBetter);

    let result = scan(
        Tool::FamilySupport,
        "The mother cooks meals every day. Family provides emotional support when she is anxious.",
    );

    assert_eq!(result.category("daily_living").unwrap().score.value(), 1.5);
    assert_eq!(result.category("emotional").unwrap().score.value(), 1.5);
    assert_eq!(result.category("community").unwrap().score.value(), 0.0);
    assert_eq!(result.overall_score.value(), 0.5);
    assert_eq!(result.classification, "limited_support");
    assert_eq!(result.compliance_issue_count, 6);
    assert_eq!(result.compliance_issues.len(), 5);

    for item in &result.evidence {
        assert_eq!(item.polarity, Polarity::Positive);
        assert_eq!(item.specificity_boost, 0.15);
        assert_eq!(item.relevance_score, Some(0.65));
    }
    assert_eq!(result.evidence.len(), 2);
}

#[test]
fn guardian_limitations_flags_delays() {
    let result = scan(
        Tool::GuardianLimitations,
        "Family waited for Public Guardian approval for months. The Public Guardian delays decisions.",
    );

    assert_eq!(result.category("barriers").unwrap().score.value(), 8.0);
    assert_eq!(result.category("delays").unwrap().score.value(), 7.5);
    assert_eq!(result.overall_score.value(), 2.6);
    assert_eq!(result.classification, "few_limitations");
    assert_eq!(result.compliance_issues, vec!["barriers", "delays"]);
    assert!(result
        .evidence
        .iter()
        .all(|item| item.relevance_score == Some(0.7)));
}

#[test]
fn human_rights_carries_statute_references() {
    let catalog = Tool::HumanRights.catalog().unwrap();
    let family = catalog.category("protection_of_families_and_children").unwrap();
    assert_eq!(
        family.reference,
        "Human Rights Act 2019 (Qld) s.26 - Families are entitled to protection"
    );
    assert_eq!(catalog.evidence_policy().context_window, 150);

    let result = scan(Tool::HumanRights, "He was detained and separated from family.");
    assert_eq!(result.category("right_to_liberty").unwrap().score.value(), 7.5);
    assert_eq!(
        result.category("protection_of_families_and_children").unwrap().score.value(),
        7.5
    );
    assert_eq!(result.compliance_issues, vec!["protection_of_families_and_children", "right_to_liberty"]);
}

#[test]
fn directory_catalogs_override_builtins() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("catalogs");
    let loaded = load_catalog(Tool::StateGuardianshipBias, &CatalogSource::Directory(dir)).unwrap();
    assert!(matches!(loaded, LoadedCatalog::Owned(_)));
    assert_eq!(loaded.tool(), "state_guardianship_bias");

    let missing = load_catalog(Tool::Bias, &CatalogSource::Directory("/nonexistent".into()));
    assert!(matches!(missing, Err(evidence_scoring::ConfigurationError::Io { .. })));

    let builtin = load_catalog(Tool::Bias, &CatalogSource::default()).unwrap();
    assert!(matches!(builtin, LoadedCatalog::Builtin(_)));
}
