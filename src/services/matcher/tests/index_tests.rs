use super::*;

fn catalog() -> Vec<CanonicalCard> {
    vec![
        CanonicalCard::pilot("rebels", "x-wing", "luke-skywalker", "p/1.png"),
        CanonicalCard::pilot("rebels", "x-wing", "wedge-antilles", "p/2.png"),
        CanonicalCard::pilot("rebels", "a-wing", "tycho-celchu", "p/3.png"),
        CanonicalCard::pilot("imperial", "tie-fighter", "howlrunner", "p/4.png"),
        CanonicalCard::pilot("rebels", "x-wing", "luke-skywalker", "p/5.png"),
        CanonicalCard::upgrade("torpedo", "proton-torpedoes", "u/1.png"),
        CanonicalCard::upgrade("astromech", "r2-d2", "u/2.png"),
        CanonicalCard::upgrade("torpedo", "flechette-torpedoes", "u/3.png"),
    ]
}

#[test]
fn test_ships_deduplicated_in_load_order() {
    let index = CandidateIndex::build(catalog());
    assert_eq!(index.pilot_ships_for("rebels"), ["x-wing", "a-wing"]);
    assert_eq!(index.pilot_ships_for("imperial"), ["tie-fighter"]);
}

#[test]
fn test_unknown_faction_has_no_ships() {
    let index = CandidateIndex::build(catalog());
    assert!(index.pilot_ships_for("scum").is_empty());
}

#[test]
fn test_categories_deduplicated_in_load_order() {
    let index = CandidateIndex::build(catalog());
    assert_eq!(index.upgrade_categories_all(), ["torpedo", "astromech"]);
}

#[test]
fn test_pilots_for_keeps_duplicates_in_order() {
    let index = CandidateIndex::build(catalog());
    let pilots = index.pilots_for("rebels", "x-wing");
    let paths: Vec<&str> = pilots.iter().map(|c| c.image_path.as_str()).collect();
    assert_eq!(paths, ["p/1.png", "p/2.png", "p/5.png"]);
}

#[test]
fn test_pilots_for_is_scoped_by_faction() {
    let index = CandidateIndex::build(catalog());
    assert!(index.pilots_for("imperial", "x-wing").is_empty());
}

#[test]
fn test_upgrades_for() {
    let index = CandidateIndex::build(catalog());
    let torpedoes: Vec<&str> = index
        .upgrades_for("torpedo")
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(torpedoes, ["proton-torpedoes", "flechette-torpedoes"]);
    assert!(index.upgrades_for("cannon").is_empty());
}

#[test]
fn test_empty_index() {
    let index = CandidateIndex::build(Vec::new());
    assert!(index.is_empty());
    assert!(index.upgrade_categories_all().is_empty());
    assert!(index.pilot_ships_for("rebels").is_empty());
}

#[test]
fn test_index_is_shareable_across_threads() {
    fn assert_sync<T: Sync + Send>() {}
    assert_sync::<CandidateIndex>();

    let index = CandidateIndex::build(catalog());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| index.pilots_for("rebels", "x-wing").len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    });
}
