use super::*;

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sample_table() -> OverrideTable {
    OverrideTable::new(
        pairs(&[("awing", "A-Wing"), ("TIE Advanced", "tie-advanced")]),
        pairs(&[("Elite Pilot Talent", "elite")]),
        pairs(&[("bobafettscum", "Boba Fett"), ("R2-D2 (Crew)", "r2-d2")]),
    )
}

#[test]
fn test_lookups_by_normalized_key() {
    let table = sample_table();
    assert_eq!(table.lookup_ship("awing"), Some("A-Wing"));
    assert_eq!(table.lookup_ship("tieadvanced"), Some("tie-advanced"));
    assert_eq!(table.lookup_upgrade_category("elitepilottalent"), Some("elite"));
    assert_eq!(table.lookup_name("r2d2crew"), Some("r2-d2"));
    assert_eq!(table.lookup_name("bobafettscum"), Some("Boba Fett"));
}

#[test]
fn test_absence_falls_through() {
    let table = sample_table();
    assert_eq!(table.lookup_ship("xwing"), None);
    assert_eq!(table.lookup_upgrade_category("torpedo"), None);
    assert_eq!(table.lookup_name("lukeskywalker"), None);
}

#[test]
fn test_categories_are_independent() {
    let table = sample_table();
    // A ship key is not visible through the name lookup
    assert_eq!(table.lookup_name("awing"), None);
    assert_eq!(table.lookup_ship("bobafettscum"), None);
}

#[test]
fn test_raw_keys_are_not_matched_verbatim() {
    let table = sample_table();
    assert_eq!(table.lookup_ship("TIE Advanced"), None);
}

#[test]
fn test_empty_keys_are_dropped() {
    let table = OverrideTable::new(pairs(&[("--", "nothing")]), vec![], vec![]);
    assert!(table.is_empty());
}

#[test]
fn test_len_counts_all_categories() {
    assert_eq!(sample_table().len(), 5);
}

#[test]
fn test_default_variant_ships() {
    let table = OverrideTable::default();
    assert!(!table.is_filed_by_variant("cr90corvette"));

    let table = sample_table();
    assert!(table.is_filed_by_variant("cr90corvette"));
    assert!(!table.is_filed_by_variant("xwing"));
}

#[test]
fn test_custom_variant_ships() {
    let table = sample_table().with_variant_ships(["GR-75 Medium Transport", "Raider"]);
    assert!(table.is_filed_by_variant("gr75mediumtransport"));
    assert!(table.is_filed_by_variant("raider"));
    assert!(!table.is_filed_by_variant("cr90corvette"));
}
