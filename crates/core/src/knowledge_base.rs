//! Interaction knowledge base.
//!
//! A two-level table: normalised drug name -> normalised interacting drug name -> record.
//! Storage is asymmetric; a pair may be recorded under either direction, so lookups must go
//! through [`crate::resolver::resolve`], which checks both.
//!
//! The table is built once at startup (either the built-in table or a YAML file) and is
//! read-only afterwards.

use crate::normalize::{normalize, same_drug};
use crate::{RxError, RxResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Severity as recorded in the knowledge base.
///
/// Custom tables may carry words outside the three known levels; those are kept verbatim in
/// `Unrecognised` so that reporting can surface them as "Unknown" instead of guessing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionSeverity {
    Minor,
    Moderate,
    Major,
    Unrecognised(String),
}

impl InteractionSeverity {
    /// Parse a severity word. Matching is case-insensitive and ignores padding.
    pub fn from_wire(s: &str) -> Self {
        match normalize(s).as_str() {
            "minor" => InteractionSeverity::Minor,
            "moderate" => InteractionSeverity::Moderate,
            "major" => InteractionSeverity::Major,
            _ => InteractionSeverity::Unrecognised(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InteractionSeverity::Minor => "minor",
            InteractionSeverity::Moderate => "moderate",
            InteractionSeverity::Major => "major",
            InteractionSeverity::Unrecognised(word) => word,
        }
    }
}

impl std::fmt::Display for InteractionSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known interaction between two drugs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionRecord {
    pub severity: InteractionSeverity,
    pub side_effects: Vec<String>,
    pub recommendations: Vec<String>,
}

impl InteractionRecord {
    pub fn new(
        severity: InteractionSeverity,
        side_effects: impl IntoIterator<Item = impl Into<String>>,
        recommendations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            severity,
            side_effects: side_effects.into_iter().map(Into::into).collect(),
            recommendations: recommendations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable table of interaction records keyed by normalised drug names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    table: BTreeMap<String, BTreeMap<String, InteractionRecord>>,
}

impl KnowledgeBase {
    /// An empty table. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the service.
    pub fn builtin() -> Self {
        let mut table: BTreeMap<String, BTreeMap<String, InteractionRecord>> = BTreeMap::new();
        for entry in BUILTIN_INTERACTIONS {
            table.entry(normalize(entry.drug)).or_default().insert(
                normalize(entry.interacting),
                InteractionRecord::new(
                    InteractionSeverity::from_wire(entry.severity),
                    entry.side_effects.iter().copied(),
                    entry.recommendations.iter().copied(),
                ),
            );
        }
        Self { table }
    }

    /// Add a record under `drug -> interacting`.
    ///
    /// Both names are normalised before storage.
    ///
    /// # Errors
    ///
    /// Returns `RxError::InvalidKnowledgeBase` if:
    /// - either name is blank,
    /// - both names refer to the same drug,
    /// - a record already exists for this direction.
    pub fn insert(
        &mut self,
        drug: &str,
        interacting: &str,
        record: InteractionRecord,
    ) -> RxResult<()> {
        let drug_key = normalize(drug);
        let interacting_key = normalize(interacting);

        if drug_key.is_empty() || interacting_key.is_empty() {
            return Err(RxError::InvalidKnowledgeBase(format!(
                "drug names cannot be blank (got {drug:?} -> {interacting:?})"
            )));
        }
        if same_drug(&drug_key, &interacting_key) {
            return Err(RxError::InvalidKnowledgeBase(format!(
                "{drug_key} cannot interact with itself"
            )));
        }

        let row = self.table.entry(drug_key.clone()).or_default();
        if row.contains_key(&interacting_key) {
            return Err(RxError::InvalidKnowledgeBase(format!(
                "duplicate entry for {drug_key} -> {interacting_key}"
            )));
        }
        row.insert(interacting_key, record);
        Ok(())
    }

    /// Builder-style variant of [`KnowledgeBase::insert`].
    pub fn with_interaction(
        mut self,
        drug: &str,
        interacting: &str,
        record: InteractionRecord,
    ) -> RxResult<Self> {
        self.insert(drug, interacting, record)?;
        Ok(self)
    }

    /// Look up a single direction. Keys must already be normalised.
    pub fn get(&self, drug_key: &str, interacting_key: &str) -> Option<&InteractionRecord> {
        self.table.get(drug_key)?.get(interacting_key)
    }

    /// Every stored `(drug, interacting, record)` triple, ordered by drug then interacting drug.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, &InteractionRecord)> + '_ {
        self.table.iter().flat_map(|(drug, row)| {
            row.iter()
                .map(move |(other, record)| (drug.as_str(), other.as_str(), record))
        })
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a knowledge base from YAML text.
    ///
    /// The expected shape is:
    ///
    /// ```yaml
    /// aspirin:
    ///   warfarin:
    ///     severity: major
    ///     side_effects: [Increased risk of bleeding]
    ///     recommendations: [Avoid this combination if possible]
    /// ```
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `aspirin.warfarin.severity`)
    /// to the failing field when the YAML does not match the schema.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `RxError::KnowledgeBaseSchema` if the YAML does not match the table schema or contains
    ///   unknown keys,
    /// - `RxError::InvalidKnowledgeBase` if names are blank, self-referencing, or collide after
    ///   normalisation.
    pub fn from_yaml_str(yaml_text: &str) -> RxResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, TableWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(RxError::KnowledgeBaseSchema(format!(
                    "schema mismatch at {path}: {source}"
                )));
            }
        };

        let mut kb = Self::empty();
        for (drug, row) in wire {
            for (interacting, record) in row {
                kb.insert(
                    &drug,
                    &interacting,
                    InteractionRecord {
                        severity: InteractionSeverity::from_wire(&record.severity),
                        side_effects: record.side_effects,
                        recommendations: record.recommendations,
                    },
                )?;
            }
        }
        Ok(kb)
    }

    /// Read and parse a YAML knowledge base file.
    ///
    /// # Errors
    ///
    /// Returns `RxError::FileRead` if the file cannot be read, otherwise the errors of
    /// [`KnowledgeBase::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> RxResult<Self> {
        let text = std::fs::read_to_string(path).map_err(RxError::FileRead)?;
        let kb = Self::from_yaml_str(&text)?;
        tracing::info!(
            "loaded knowledge base from {} ({} records)",
            path.display(),
            kb.len()
        );
        Ok(kb)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

type TableWire = BTreeMap<String, BTreeMap<String, RecordWire>>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordWire {
    severity: String,
    #[serde(default)]
    side_effects: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

// ============================================================================
// Built-in table
// ============================================================================

struct BuiltinEntry {
    drug: &'static str,
    interacting: &'static str,
    severity: &'static str,
    side_effects: &'static [&'static str],
    recommendations: &'static [&'static str],
}

const BUILTIN_INTERACTIONS: &[BuiltinEntry] = &[
    BuiltinEntry {
        drug: "aspirin",
        interacting: "lisinopril",
        severity: "moderate",
        side_effects: &[
            "Decreased blood pressure",
            "Reduced effectiveness of lisinopril",
            "Possible kidney function impairment",
        ],
        recommendations: &[
            "Monitor blood pressure regularly",
            "Consider alternative pain relievers",
            "Consult with your healthcare provider before combining these medications",
        ],
    },
    BuiltinEntry {
        drug: "aspirin",
        interacting: "warfarin",
        severity: "major",
        side_effects: &[
            "Increased risk of bleeding",
            "Gastrointestinal bleeding",
            "Prolonged bleeding time",
        ],
        recommendations: &[
            "Avoid this combination if possible",
            "If necessary, use the lowest effective dose of aspirin",
            "Regular monitoring of INR levels is essential",
            "Watch for signs of bleeding",
        ],
    },
    BuiltinEntry {
        drug: "aspirin",
        interacting: "ibuprofen",
        severity: "moderate",
        side_effects: &[
            "Increased risk of gastrointestinal bleeding",
            "Reduced cardioprotective effects of aspirin",
            "Potential kidney damage",
        ],
        recommendations: &[
            "Take ibuprofen at least 8 hours before or 30 minutes after aspirin",
            "Consider alternative pain relievers like acetaminophen",
            "Monitor for signs of stomach irritation or bleeding",
        ],
    },
    BuiltinEntry {
        drug: "lisinopril",
        interacting: "potassium supplements",
        severity: "moderate",
        side_effects: &[
            "Hyperkalemia (high potassium levels)",
            "Irregular heartbeat",
            "Muscle weakness",
        ],
        recommendations: &[
            "Monitor potassium levels regularly",
            "Avoid potassium-rich foods when taking this medication",
            "Consult with your doctor before taking potassium supplements",
        ],
    },
    BuiltinEntry {
        drug: "lisinopril",
        interacting: "spironolactone",
        severity: "moderate",
        side_effects: &[
            "Hyperkalemia (high potassium levels)",
            "Acute kidney injury",
            "Hypotension (low blood pressure)",
        ],
        recommendations: &[
            "Regular monitoring of kidney function and potassium levels",
            "Start with lower doses of both medications",
            "Stay well-hydrated",
        ],
    },
    BuiltinEntry {
        drug: "metformin",
        interacting: "alcohol",
        severity: "moderate",
        side_effects: &[
            "Lactic acidosis",
            "Hypoglycemia (low blood sugar)",
            "Impaired liver function",
        ],
        recommendations: &[
            "Limit alcohol consumption",
            "Never drink alcohol on an empty stomach while taking metformin",
            "Monitor blood glucose levels more frequently when consuming alcohol",
        ],
    },
];
