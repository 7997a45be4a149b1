use crate::{Axis, Evidence, EvidenceDisplay, Polarity};

fn evidence(text: &str, needle: &str, category: &str, polarity: Polarity, axis: Option<Axis>) -> Evidence {
    let start = text.find(needle).unwrap();
    Evidence {
        matched_text: needle.to_string(),
        category: category.to_string(),
        polarity,
        axis,
        start,
        end: start + needle.len(),
        page_number: None,
        context: text.to_string(),
        severity_weight: 1.0,
        specificity_boost: 0.0,
        relevance_score: None,
    }
}

#[test]
fn single_span() {
    let text = "The family is incapable of care";
    let item = evidence(text, "family is incapable", "family_involvement", Polarity::Negative, None);

    let mut display = EvidenceDisplay::new(text);
    display.include(&item);

    insta::assert_snapshot!(display.to_string(), @r###"
    The family is incapable of care
        ╰─────────────────╯family_involvement(Negative)
    "###);
}

#[test]
fn axis_labels() {
    let text = "Family support is strong but the PG lacks capacity.";
    let items = vec![
        evidence(text, "Family support", "G1", Polarity::Positive, Some(Axis::A)),
        evidence(text, "PG lacks capacity", "G1", Polarity::Negative, Some(Axis::B)),
    ];

    let mut display = EvidenceDisplay::new(text);
    display.include_all(&items);

    insta::assert_snapshot!(display.to_string(), @r###"
    Family support is strong but the PG lacks capacity.
    ╰────────────╯G1(A, Positive)
                                     ╰───────────────╯G1(B, Negative)
    "###);
}

#[test]
fn out_of_range_evidence_is_skipped() {
    let mut item = evidence("abc", "b", "c", Polarity::Positive, None);
    item.end = 10;
    let mut display = EvidenceDisplay::new("abc");
    display.include(&item);
    assert_eq!(display.to_string(), "abc");
}
