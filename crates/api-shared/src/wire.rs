//! JSON wire types for the AurumRx APIs.
//!
//! Responsibilities:
//! - Define the request and response bodies exchanged with front ends
//! - Provide OpenAPI schemas for them
//! - Translate between wire bodies and `aurum-core` domain types
//!
//! Request bodies use the snake_case field names the patient history form submits. Interaction
//! entries in responses use camelCase (`sideEffects`), which is what the result views read.

use aurum_core::{
    AgeInput, AnalysisResult, InteractionRecord, KnowledgeBase, RawPatientContext,
    ResolvedInteraction,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Requests
// ============================================================================

/// Analysis request: the patient's profile plus the drug being considered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Drug being considered.
    pub test_drug: String,

    /// Age in years, as a number or numeric text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub age: Option<AgeValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,

    /// Primary disease or condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,

    #[serde(default)]
    pub past_medications: Vec<String>,

    #[serde(default)]
    pub current_medications: Vec<String>,

    #[serde(default)]
    pub supplements: Vec<String>,

    #[serde(default)]
    pub allergies: Vec<String>,

    #[serde(default)]
    pub adverse_events: Vec<String>,

    #[serde(default)]
    pub family_history: Vec<String>,
}

/// Age as it may appear on the wire.
///
/// Any other JSON value lands in `Other` so that it is reported as a malformed patient context
/// rather than a body rejection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<AgeValue> for AgeInput {
    fn from(value: AgeValue) -> Self {
        match value {
            AgeValue::Integer(n) => AgeInput::Integer(n),
            AgeValue::Decimal(f) => AgeInput::Decimal(f),
            AgeValue::Text(s) => AgeInput::Text(s),
            AgeValue::Other(v) => AgeInput::Unsupported(v.to_string()),
        }
    }
}

impl AnalyzeReq {
    /// Split the request into the candidate drug and the raw patient context.
    pub fn into_parts(self) -> (String, RawPatientContext) {
        let raw = RawPatientContext {
            age: self.age.map(AgeInput::from),
            sex: self.sex,
            disease: self.disease,
            ethnicity: self.ethnicity,
            past_medications: self.past_medications,
            current_medications: self.current_medications,
            supplements: self.supplements,
            allergies: self.allergies,
            adverse_events: self.adverse_events,
            family_history: self.family_history,
        };
        (self.test_drug, raw)
    }
}

/// Single pair check request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckPairReq {
    pub drug1: String,
    pub drug2: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Result of an analysis or pair check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisRes {
    /// One of `Low`, `Moderate`, `High`, `Unknown`.
    pub severity: String,
    pub report: String,
    pub reasoning: String,
    /// Every matched pair, in medication order.
    pub interactions: Vec<InteractionRes>,
}

/// A drug pair with its recorded interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRes {
    pub drug1: String,
    pub drug2: String,
    /// Severity as recorded (`minor`, `moderate`, `major`, or a custom word).
    pub severity: String,
    pub side_effects: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Every pair stored in the knowledge base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeBaseRes {
    pub interactions: Vec<InteractionRes>,
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

impl InteractionRes {
    fn from_record(drug1: &str, drug2: &str, record: &InteractionRecord) -> Self {
        Self {
            drug1: drug1.to_string(),
            drug2: drug2.to_string(),
            severity: record.severity.to_string(),
            side_effects: record.side_effects.clone(),
            recommendations: record.recommendations.clone(),
        }
    }
}

impl From<ResolvedInteraction> for InteractionRes {
    fn from(resolved: ResolvedInteraction) -> Self {
        Self {
            drug1: resolved.drug1,
            drug2: resolved.drug2,
            severity: resolved.record.severity.to_string(),
            side_effects: resolved.record.side_effects,
            recommendations: resolved.record.recommendations,
        }
    }
}

impl From<AnalysisResult> for AnalysisRes {
    fn from(result: AnalysisResult) -> Self {
        Self {
            severity: result.severity.to_string(),
            report: result.report,
            reasoning: result.reasoning,
            interactions: result
                .interactions
                .into_iter()
                .map(InteractionRes::from)
                .collect(),
        }
    }
}

impl From<&KnowledgeBase> for KnowledgeBaseRes {
    fn from(kb: &KnowledgeBase) -> Self {
        Self {
            interactions: kb
                .pairs()
                .map(|(drug, other, record)| InteractionRes::from_record(drug, other, record))
                .collect(),
        }
    }
}
