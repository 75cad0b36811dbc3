//! Interaction analysis service.
//!
//! This module provides the orchestration of a full analysis: validating the candidate drug,
//! resolving it against each current medication and assembling the final result.

use crate::knowledge_base::KnowledgeBase;
use crate::patient::PatientContext;
use crate::report::{no_medications, synthesize, AnalysisResult};
use crate::resolver::{resolve, resolve_pair, ResolvedInteraction};
use crate::validation::{prepare_medications, validate_drug_name};
use crate::RxResult;
use std::sync::Arc;

/// Pure interaction analysis - no API concerns
#[derive(Clone, Debug)]
pub struct InteractionService {
    knowledge_base: Arc<KnowledgeBase>,
}

impl InteractionService {
    /// Creates a new instance of InteractionService over the given knowledge base.
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Analyses a candidate drug against the patient's current medications.
    ///
    /// Each medication is resolved against the candidate in order; every match is collected into
    /// `interactions`, but only the first match drives `severity`, `report` and `reasoning`.
    /// Combined severity across several matches is not computed.
    ///
    /// When nothing matches, the result is the fixed "Low" text for the candidate and the first
    /// medication. With no medications at all the severity is "Unknown".
    ///
    /// The patient context does not affect the outcome.
    ///
    /// # Arguments
    ///
    /// * `candidate_drug` - The drug being considered.
    /// * `current_medications` - Medications the patient already takes, in display order.
    /// * `patient_context` - Informational patient details.
    ///
    /// # Errors
    ///
    /// Returns `RxError::InvalidInput` if the candidate drug is blank, too long or contains
    /// control characters. Blank medication entries are skipped, not rejected.
    pub fn analyze(
        &self,
        candidate_drug: &str,
        current_medications: &[String],
        patient_context: &PatientContext,
    ) -> RxResult<AnalysisResult> {
        let candidate = validate_drug_name("test_drug", candidate_drug)?;
        let medications = prepare_medications(current_medications);

        let Some(first_medication) = medications.first() else {
            tracing::info!("analysis of {} skipped: no current medications", candidate);
            return Ok(no_medications(candidate.as_str()));
        };

        let interactions: Vec<ResolvedInteraction> = medications
            .iter()
            .filter_map(|m| resolve_pair(candidate.as_str(), m.as_str(), &self.knowledge_base))
            .collect();

        let mut result = match interactions.first() {
            Some(headline) => synthesize(&headline.drug1, &headline.drug2, Some(&headline.record)),
            None => synthesize(candidate.as_str(), first_medication.as_str(), None),
        };
        result.interactions = interactions;

        tracing::info!(
            "analysed {} against {} medication(s): severity={}, matches={}, age={:?}",
            candidate,
            medications.len(),
            result.severity,
            result.interactions.len(),
            patient_context.age
        );

        Ok(result)
    }

    /// Checks a single pair of drugs.
    ///
    /// The result's `interactions` holds the pair when a record was found.
    ///
    /// # Errors
    ///
    /// Returns `RxError::InvalidInput` if either name is invalid.
    pub fn check_pair(&self, drug1: &str, drug2: &str) -> RxResult<AnalysisResult> {
        let drug1 = validate_drug_name("drug1", drug1)?;
        let drug2 = validate_drug_name("drug2", drug2)?;

        let record = resolve(drug1.as_str(), drug2.as_str(), &self.knowledge_base);
        let mut result = synthesize(drug1.as_str(), drug2.as_str(), record);
        if let Some(record) = record {
            result.interactions.push(ResolvedInteraction {
                drug1: drug1.into_inner(),
                drug2: drug2.into_inner(),
                record: record.clone(),
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::{InteractionRecord, InteractionSeverity};
    use crate::report::RiskLevel;
    use crate::RxError;

    fn service() -> InteractionService {
        InteractionService::new(Arc::new(KnowledgeBase::builtin()))
    }

    fn meds(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aspirin_with_warfarin_is_high() {
        let result = service()
            .analyze("aspirin", &meds(&["warfarin"]), &PatientContext::default())
            .expect("analysis");

        assert_eq!(result.severity, RiskLevel::High);
        assert!(result.report.contains("bleeding"));
        assert!(result.reasoning.contains("major"));
        assert!(result.reasoning.ends_with("high"));
        assert_eq!(result.interactions.len(), 1);
        assert_eq!(result.interactions[0].drug1, "aspirin");
        assert_eq!(result.interactions[0].drug2, "warfarin");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let svc = service();
        let ctx = PatientContext::default();
        let lower = svc.analyze("aspirin", &meds(&["warfarin"]), &ctx).expect("lower");
        let mixed = svc.analyze("Aspirin", &meds(&["WARFARIN"]), &ctx).expect("mixed");

        assert_eq!(lower.severity, mixed.severity);
        assert_eq!(lower.report, mixed.report);
        assert_eq!(mixed.interactions[0].drug1, "Aspirin");
        assert_eq!(mixed.interactions[0].drug2, "WARFARIN");
    }

    #[test]
    fn metformin_with_alcohol_is_moderate() {
        let result = service()
            .analyze("metformin", &meds(&["alcohol"]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::Moderate);
    }

    #[test]
    fn reverse_stored_pair_is_found() {
        let result = service()
            .analyze("warfarin", &meds(&["aspirin"]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::High);
    }

    #[test]
    fn unknown_pair_falls_back_to_low() {
        let result = service()
            .analyze("ibuprofen", &meds(&["vitamin c"]), &PatientContext::default())
            .expect("analysis");

        assert_eq!(result.severity, RiskLevel::Low);
        assert!(result.report.contains("ibuprofen"));
        assert!(result.report.contains("vitamin c"));
        assert!(result.interactions.is_empty());
    }

    #[test]
    fn fallback_references_first_medication() {
        let result = service()
            .analyze("ibuprofen", &meds(&["vitamin c", "zinc"]), &PatientContext::default())
            .expect("analysis");
        assert!(result.report.contains("vitamin c"));
        assert!(!result.report.contains("zinc"));
    }

    #[test]
    fn no_medications_is_unknown() {
        let result = service()
            .analyze("aspirin", &[], &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::Unknown);
        assert!(result.interactions.is_empty());
    }

    #[test]
    fn blank_candidate_fails_fast() {
        for candidate in ["", "   ", "\t\n"] {
            let err = service()
                .analyze(candidate, &meds(&["warfarin"]), &PatientContext::default())
                .expect_err("blank candidate");
            assert!(matches!(err, RxError::InvalidInput(_)));
        }
    }

    #[test]
    fn blank_medication_entries_are_skipped() {
        let result = service()
            .analyze("aspirin", &meds(&["warfarin", "  ", ""]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::High);
        assert_eq!(result.interactions.len(), 1);

        let result = service()
            .analyze("aspirin", &meds(&["", " "]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::Unknown);
    }

    #[test]
    fn long_medication_list_is_analysed() {
        let mut current: Vec<String> = (0..100).map(|n| format!("vitamin {n}")).collect();
        current.push("warfarin".into());

        let result = service()
            .analyze("aspirin", &current, &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::High);
        assert_eq!(result.interactions[0].drug2, "warfarin");
    }

    #[test]
    fn first_match_drives_headline_and_all_matches_are_listed() {
        let result = service()
            .analyze(
                "aspirin",
                &meds(&["lisinopril", "vitamin d", "warfarin", "lisinopril"]),
                &PatientContext::default(),
            )
            .expect("analysis");

        // lisinopril is moderate; warfarin (major) does not raise the headline
        assert_eq!(result.severity, RiskLevel::Moderate);
        let partners: Vec<&str> = result.interactions.iter().map(|i| i.drug2.as_str()).collect();
        assert_eq!(partners, vec!["lisinopril", "warfarin", "lisinopril"]);
    }

    #[test]
    fn patient_context_does_not_change_outcome() {
        let svc = service();
        let ctx = PatientContext {
            age: Some(80),
            disease: Some("Atrial fibrillation".into()),
            allergies: vec!["penicillin".into()],
            ..PatientContext::default()
        };
        let with_ctx = svc.analyze("aspirin", &meds(&["warfarin"]), &ctx).expect("ctx");
        let without = svc
            .analyze("aspirin", &meds(&["warfarin"]), &PatientContext::default())
            .expect("no ctx");
        assert_eq!(with_ctx, without);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let svc = service();
        let ctx = PatientContext::default();
        let inputs = meds(&["warfarin", "lisinopril", "vitamin c"]);
        let first = svc.analyze("Aspirin", &inputs, &ctx).expect("first");
        for _ in 0..10 {
            assert_eq!(svc.analyze("Aspirin", &inputs, &ctx).expect("again"), first);
        }
    }

    #[test]
    fn custom_knowledge_base_is_used() {
        let kb = KnowledgeBase::empty()
            .with_interaction(
                "sertraline",
                "tramadol",
                InteractionRecord::new(
                    InteractionSeverity::Major,
                    ["Serotonin syndrome"],
                    ["Avoid combination"],
                ),
            )
            .expect("custom kb");
        let svc = InteractionService::new(Arc::new(kb));

        let result = svc
            .analyze("Tramadol", &meds(&["sertraline"]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::High);
        assert!(result.report.contains("Serotonin syndrome"));

        // the built-in pairs are not present
        let result = svc
            .analyze("aspirin", &meds(&["warfarin"]), &PatientContext::default())
            .expect("analysis");
        assert_eq!(result.severity, RiskLevel::Low);
    }

    #[test]
    fn check_pair_reports_match() {
        let result = service().check_pair("Lisinopril", "spironolactone").expect("pair");
        assert_eq!(result.severity, RiskLevel::Moderate);
        assert_eq!(result.interactions.len(), 1);
        assert_eq!(result.interactions[0].drug1, "Lisinopril");
    }

    #[test]
    fn check_pair_without_match_is_low() {
        let result = service().check_pair("ibuprofen", "vitamin c").expect("pair");
        assert_eq!(result.severity, RiskLevel::Low);
        assert!(result.interactions.is_empty());
    }

    #[test]
    fn check_pair_rejects_blank_names() {
        let err = service().check_pair("aspirin", " ").expect_err("blank");
        match err {
            RxError::InvalidInput(msg) => assert!(msg.starts_with("drug2")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
