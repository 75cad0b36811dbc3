//! Drug name normalisation.
//!
//! Two names refer to the same drug for lookup purposes iff their normalised forms are equal.
//! There is deliberately no stemming or synonym expansion.

/// Canonicalise a free-text drug name for knowledge base lookup.
///
/// Trims surrounding whitespace and lower-cases the remainder.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns `true` if both names normalise to the same lookup key.
pub fn same_drug(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Vitamin C\t"), "vitamin c");
        assert_eq!(normalize("WARFARIN"), "warfarin");
    }

    #[test]
    fn is_idempotent() {
        for input in ["Aspirin", "  potassium SUPPLEMENTS ", "", "   ", "Ibuprofen\n", "ÄSPIRIN"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(normalize("vitamin  c"), "vitamin  c");
        assert!(!same_drug("vitamin c", "vitaminc"));
    }

    #[test]
    fn same_drug_ignores_case_and_padding() {
        assert!(same_drug(" Metformin", "metformin "));
        assert!(!same_drug("metformin", "alcohol"));
    }
}
