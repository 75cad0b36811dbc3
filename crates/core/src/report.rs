//! Report synthesis.
//!
//! Turns a resolved interaction record (or its absence) into the user-facing result: a risk
//! level, a narrative report and a narrative reasoning. All text comes from fixed templates, so
//! the output is fully determined by the inputs.

use crate::knowledge_base::{InteractionRecord, InteractionSeverity};
use crate::resolver::ResolvedInteraction;

/// Risk level shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&InteractionSeverity> for RiskLevel {
    fn from(severity: &InteractionSeverity) -> Self {
        match severity {
            InteractionSeverity::Minor => RiskLevel::Low,
            InteractionSeverity::Moderate => RiskLevel::Moderate,
            InteractionSeverity::Major => RiskLevel::High,
            InteractionSeverity::Unrecognised(_) => RiskLevel::Unknown,
        }
    }
}

/// Result of an interaction analysis.
///
/// `severity`, `report` and `reasoning` describe the headline pair only. `interactions` lists
/// every pair that matched, in medication order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    pub severity: RiskLevel,
    pub report: String,
    pub reasoning: String,
    pub interactions: Vec<ResolvedInteraction>,
}

/// Render the headline result for a drug pair.
///
/// The returned result has no `interactions`; the orchestrator attaches them.
pub fn synthesize(drug_a: &str, drug_b: &str, record: Option<&InteractionRecord>) -> AnalysisResult {
    match record {
        None => no_interaction(drug_a, drug_b),
        Some(record) => {
            let severity = RiskLevel::from(&record.severity);
            AnalysisResult {
                severity,
                report: interaction_report(severity, record),
                reasoning: interaction_reasoning(drug_a, drug_b, severity, &record.severity),
                interactions: Vec::new(),
            }
        }
    }
}

/// Result used when no current medications were supplied.
pub fn no_medications(candidate: &str) -> AnalysisResult {
    AnalysisResult {
        severity: RiskLevel::Unknown,
        report: format!(
            "No current medications were provided, so {candidate} could not be checked for interactions."
        ),
        reasoning: "An interaction check needs at least one current medication to compare against."
            .to_string(),
        interactions: Vec::new(),
    }
}

fn no_interaction(drug_a: &str, drug_b: &str) -> AnalysisResult {
    AnalysisResult {
        severity: RiskLevel::Low,
        report: format!(
            "No significant interaction was found between {drug_a} and {drug_b}. \
             Always consult a healthcare professional before combining medications."
        ),
        reasoning: format!(
            "There is no known significant interaction between {drug_a} and {drug_b} in the interaction reference."
        ),
        interactions: Vec::new(),
    }
}

// Drug names are left out of the report so that differently-cased inputs for the same pair
// produce the same text.
fn interaction_report(severity: RiskLevel, record: &InteractionRecord) -> String {
    let opening = if severity == RiskLevel::Low {
        "A minor interaction was found between these medications."
    } else {
        "A potentially significant interaction was found between these medications."
    };
    let side_effects = record.side_effects.join(", ");
    let recommendations = record.recommendations.join(". ");

    format!(
        "{opening} Possible side effects include: {side_effects}. Recommendations: {recommendations}."
    )
}

fn interaction_reasoning(
    drug_a: &str,
    drug_b: &str,
    severity: RiskLevel,
    recorded: &InteractionSeverity,
) -> String {
    let classification = if *recorded == InteractionSeverity::Major {
        format!("The combination of {drug_a} and {drug_b} is recorded as a major interaction")
    } else {
        format!("The combination of {drug_a} and {drug_b} is recorded with {recorded} severity")
    };
    let guidance = if severity == RiskLevel::High {
        "so it should be avoided or only used under close supervision"
    } else {
        "so it can be used with appropriate monitoring"
    };
    let level = severity.as_str().to_lowercase();

    format!("{classification}, {guidance}. The overall risk is {level}")
}
