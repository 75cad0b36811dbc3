//! Pairwise interaction resolution.

use crate::knowledge_base::{InteractionRecord, KnowledgeBase};
use crate::normalize::normalize;

/// An interaction found for a specific pair of caller-supplied drug names.
///
/// `drug1`/`drug2` keep the caller's display form; the record is a copy of the knowledge base
/// entry, whichever direction it was stored under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedInteraction {
    pub drug1: String,
    pub drug2: String,
    pub record: InteractionRecord,
}

/// Find the interaction record for a pair of drugs.
///
/// Checks `drug_a -> drug_b` first, then `drug_b -> drug_a`. The first hit wins.
pub fn resolve<'kb>(
    drug_a: &str,
    drug_b: &str,
    kb: &'kb KnowledgeBase,
) -> Option<&'kb InteractionRecord> {
    let key_a = normalize(drug_a);
    let key_b = normalize(drug_b);

    kb.get(&key_a, &key_b).or_else(|| kb.get(&key_b, &key_a))
}

/// Like [`resolve`], but returns an owned [`ResolvedInteraction`] carrying the display names.
pub fn resolve_pair(drug_a: &str, drug_b: &str, kb: &KnowledgeBase) -> Option<ResolvedInteraction> {
    let record = resolve(drug_a, drug_b, kb)?;
    tracing::debug!(
        "resolved {} + {} ({})",
        normalize(drug_a),
        normalize(drug_b),
        record.severity
    );
    Some(ResolvedInteraction {
        drug1: drug_a.to_string(),
        drug2: drug_b.to_string(),
        record: record.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::InteractionSeverity;

    fn record(severity: InteractionSeverity, note: &str) -> InteractionRecord {
        InteractionRecord::new(severity, [note], Vec::<String>::new())
    }

    #[test]
    fn every_builtin_pair_resolves_in_both_directions() {
        let kb = KnowledgeBase::builtin();
        for (a, b, stored) in kb.pairs() {
            assert_eq!(resolve(a, b, &kb), Some(stored), "{a} -> {b}");
            assert_eq!(resolve(b, a, &kb), Some(stored), "{b} -> {a}");
        }
    }

    #[test]
    fn lookup_is_case_and_padding_insensitive() {
        let kb = KnowledgeBase::builtin();
        let found = resolve("  Warfarin", "ASPIRIN ", &kb).expect("found");
        assert_eq!(found.severity, InteractionSeverity::Major);
    }

    #[test]
    fn forward_direction_takes_precedence() {
        let kb = KnowledgeBase::empty()
            .with_interaction("a", "b", record(InteractionSeverity::Minor, "forward"))
            .and_then(|kb| {
                kb.with_interaction("b", "a", record(InteractionSeverity::Major, "reverse"))
            })
            .expect("build kb");

        assert_eq!(resolve("a", "b", &kb).map(|r| r.side_effects[0].as_str()), Some("forward"));
        assert_eq!(resolve("B", "A", &kb).map(|r| r.side_effects[0].as_str()), Some("reverse"));
    }

    #[test]
    fn unknown_pair_is_absent() {
        let kb = KnowledgeBase::builtin();
        assert!(resolve("ibuprofen", "vitamin c", &kb).is_none());
        assert!(resolve("aspirin", "", &kb).is_none());
        assert!(resolve_pair("ibuprofen", "vitamin c", &kb).is_none());
    }

    #[test]
    fn resolve_pair_keeps_display_names() {
        let kb = KnowledgeBase::builtin();
        let resolved = resolve_pair("Metformin", "Alcohol", &kb).expect("found");
        assert_eq!(resolved.drug1, "Metformin");
        assert_eq!(resolved.drug2, "Alcohol");
        assert_eq!(resolved.record.severity, InteractionSeverity::Moderate);
    }
}
