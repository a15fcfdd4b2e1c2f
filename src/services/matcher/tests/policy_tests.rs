use super::*;
use crate::services::matcher::types::{MatchSource, NameMatch, StageOutcome, NO_CANDIDATES};

/// Scripted confirmer that records every prompt.
struct Scripted {
    answer: bool,
    prompts: Vec<String>,
}

impl Confirmer for Scripted {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }
}

fn luke() -> CanonicalCard {
    CanonicalCard::pilot("rebels", "x-wing", "luke-skywalker", "images/pilots/rebels/x-wing/luke-skywalker.png")
}

fn module_card() -> ModuleCard {
    ModuleCard::pilot("Rebel Alliance", "X-Wing", "Luke Skywalker", "Luke.jpg")
}

fn result(matched: Option<CanonicalCard>, score: f64) -> MatchResult {
    MatchResult {
        matched,
        score,
        stages: Vec::new(),
    }
}

#[test]
fn test_certain_match_auto_applies() {
    let decision = decide(&module_card(), &result(Some(luke()), 1.0));
    assert_eq!(decision, Decision::AutoApply(luke()));

    let mut confirmer = Scripted {
        answer: false,
        prompts: Vec::new(),
    };
    let verdict = decision.settle(&mut confirmer);
    assert_eq!(
        verdict,
        Verdict::Apply {
            matched: luke(),
            confirmed: false
        }
    );
    assert!(confirmer.prompts.is_empty());
}

#[test]
fn test_uncertain_match_asks() {
    let decision = decide(&module_card(), &result(Some(luke()), 0.75));
    let Decision::Confirm { prompt, .. } = &decision else {
        panic!("expected Confirm, got {decision:?}");
    };
    assert_eq!(
        prompt,
        "Low match found: 0.750: Rebel Alliance/X-Wing/Luke Skywalker -> rebels/x-wing/luke-skywalker"
    );

    let mut yes = Scripted {
        answer: true,
        prompts: Vec::new(),
    };
    assert_eq!(
        decision.clone().settle(&mut yes),
        Verdict::Apply {
            matched: luke(),
            confirmed: true
        }
    );
    assert_eq!(yes.prompts.len(), 1);

    let mut no = Scripted {
        answer: false,
        prompts: Vec::new(),
    };
    assert_eq!(decision.settle(&mut no), Verdict::Declined(luke()));
}

#[test]
fn test_zero_score_still_asks() {
    let decision = decide(&module_card(), &result(Some(luke()), 0.0));
    assert!(matches!(decision, Decision::Confirm { .. }));
}

#[test]
fn test_no_candidates_skips() {
    let decision = decide(&module_card(), &result(None, NO_CANDIDATES));
    assert_eq!(decision, Decision::Skip(SkipReason::NoCandidates));
}

#[test]
fn test_override_to_missing_card_skips() {
    let mut missing = result(None, 1.0);
    missing.stages.push(StageOutcome::new(
        Stage::Name,
        "ghost",
        &NameMatch::overridden("not-in-catalog"),
    ));

    let decision = decide(&module_card(), &missing);
    assert_eq!(
        decision,
        Decision::Skip(SkipReason::OverrideTargetMissing {
            target: "not-in-catalog".to_string()
        })
    );
    assert_eq!(missing.stages[0].source, MatchSource::Override);
}

#[test]
fn test_upgrade_rendering() {
    let card = ModuleCard::upgrade("Torpedo", "Proton Torpedos", "proton.jpg");
    let matched = CanonicalCard::upgrade("torpedo", "proton-torpedoes", "images/upgrades/torpedo/proton-torpedoes.png");
    assert_eq!(
        render_prompt(&card, &matched, 0.9),
        "Low match found: 0.900: Torpedo/Proton Torpedos -> torpedo/proton-torpedoes"
    );
}

#[test]
fn test_skip_reason_display() {
    assert_eq!(SkipReason::NoCandidates.to_string(), "no candidates");
    assert_eq!(
        SkipReason::UnknownFaction {
            label: "Mandalorians".to_string()
        }
        .to_string(),
        "unknown faction 'Mandalorians'"
    );
}
