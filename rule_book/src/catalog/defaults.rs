//! Built-in rule tables.

use crate::rules::{InvariantRule, TraitRule};

/// Invariant rules in priority order: life/death, legal constraint, commitment.
pub fn invariant_rules() -> Vec<InvariantRule> {
    vec![
        InvariantRule::new("life-death", "death vs. survival")
            .with_explanation(
                "Death established in the hypothesized past precludes the continued \
                 active behavior observed in the narrative.",
            )
            .with_backstory_terms(["died", "dead", "executed"])
            .with_narrative_terms(["alive", "survived", "escaped", "lived"]),
        InvariantRule::new("legal-constraint", "imprisonment vs. escape")
            .with_explanation(
                "Imprisonment established in the backstory is violated by an unresolved \
                 escape in the narrative.",
            )
            .with_backstory_terms(["arrested", "imprisoned", "jailed"])
            .with_narrative_terms(["escaped", "broke out"]),
        InvariantRule::new("commitment", "commitment vs. compliance")
            .with_explanation(
                "A binding commitment in the hypothesized past is violated by subsequent \
                 voluntary action.",
            )
            .with_backstory_terms(["vowed", "promised", "refused", "would never"])
            .with_narrative_terms(["agreed", "accepted", "joined", "complied"]),
    ]
}

/// Trait rules in catalog order.
pub fn trait_rules() -> Vec<TraitRule> {
    vec![
        TraitRule::new("non-violent", "killing")
            .with_signals(["pacifist", "non-violent"])
            .with_violations(["murdered", "killed"]),
        TraitRule::new("impoverished", "wealth")
            .with_signals(["poor", "destitute"])
            .with_violations(["gold", "fortune", "luxury"]),
        TraitRule::new("solitary", "family gathering")
            .with_signals(["hermit", "orphan"])
            .with_violations(["family", "parents", "wedding"]),
    ]
}

/// Narrative-relevant vocabulary counted by the grounding check.
pub fn key_signals() -> Vec<String> {
    const ROLES: &[&str] = &[
        "soldier", "farmer", "merchant", "priest", "knight", "captain", "sailor", "thief",
        "hunter", "servant", "noble", "king", "queen", "prince", "princess", "doctor",
        "teacher", "orphan", "hermit", "widow",
    ];
    const MOTIVATIONS: &[&str] = &[
        "vowed", "promised", "refused", "protect", "revenge", "loyal", "betray", "duty",
        "honor", "seek", "escape", "love", "hate", "fear",
    ];
    const ABSOLUTES: &[&str] = &["always", "never", "forever", "only", "every"];

    ROLES
        .iter()
        .chain(MOTIVATIONS)
        .chain(ABSOLUTES)
        .map(|s| s.to_string())
        .collect()
}
