use super::common::*;
use crate::triage::matcher::{match_rules, SymptomSet};
use crate::triage::rules::RuleTable;

#[test]
fn matcher_reports_every_rule_including_misses() {
    let table = RuleTable::standard();
    let results = match_rules(&table, &SymptomSet::from_reported(&["Fever"]));

    assert_eq!(results.len(), table.len());
    assert!(results.iter().any(|result| result.matched_count() == 0));
    let influenza = results
        .iter()
        .find(|result| result.rule.id == "influenza")
        .expect("influenza rule present");
    assert_eq!(influenza.matched, vec!["Fever"]);
    assert_eq!(influenza.required_count, 5);
}

#[test]
fn empty_input_matches_nothing() {
    let table = RuleTable::standard();
    let empty: [&str; 0] = [];
    let results = match_rules(&table, &SymptomSet::from_reported(&empty));
    assert!(results.iter().all(|result| result.matched_count() == 0));
}

#[test]
fn duplicate_reports_do_not_inflate_match_counts() {
    let table = RuleTable::standard();
    let results = match_rules(
        &table,
        &SymptomSet::from_reported(&["Cough", "cough", " COUGH "]),
    );
    let respiratory = results
        .iter()
        .find(|result| result.rule.id == "respiratory_infection")
        .expect("respiratory rule present");
    assert_eq!(respiratory.matched_count(), 1);
}

#[test]
fn urgency_outranks_confidence() {
    let ids = ranked_ids(&["Dizziness", "Fatigue", "Weakness", "Pale skin"]);
    assert_eq!(
        ids,
        vec!["severe_dehydration", "fatigue_and_weakness", "influenza"]
    );
}

#[test]
fn confidence_orders_rules_within_an_urgency_tier() {
    let ids = ranked_ids(&["Fever", "Cough", "Sore throat"]);
    assert_eq!(ids, vec!["respiratory_infection", "influenza", "common_cold"]);
}

#[test]
fn equal_urgency_and_confidence_keep_table_order() {
    let ids = ranked_ids(&["Nausea"]);
    assert_eq!(ids, vec!["gastroenteritis", "migraine"]);

    let repeated = ranked_ids(&["nausea", "nausea"]);
    assert_eq!(repeated, ids);
}

#[test]
fn unknown_symptoms_rank_nothing() {
    assert!(ranked_ids(&["Unknown symptom", "pain"]).is_empty());
}
