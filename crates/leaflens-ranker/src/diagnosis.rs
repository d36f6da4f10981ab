//! Diagnosis pipeline: normalise a response, resolve every candidate against
//! the knowledge base and assess risk on the top-1.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use leaflens_common::confidence::{format_percent, ConfidenceTier};
use leaflens_common::{CandidatePrediction, DiagnosisResult, InferenceSource};
use leaflens_kb::{DiseaseRecord, KnowledgeBase, MatchKind, HEALTHY_KEY};

use crate::normaliser::ResultNormalizer;

/// Tunables for [`DiagnosisPipeline`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisOptions {
    /// How many alternatives to surface.
    pub top_n_alternatives: usize,
    /// Top-1 probability above which a non-healthy diagnosis is high risk.
    pub high_risk_threshold: f64,
    /// Canonical key of the healthy record.
    pub healthy_key: String,
}

impl Default for DiagnosisOptions {
    fn default() -> Self {
        Self {
            top_n_alternatives: 3,
            high_risk_threshold: 0.7,
            healthy_key: HEALTHY_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Clear,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Clear => "clear",
        }
    }
}

/// A candidate together with its curated record, if one matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCandidate<'kb> {
    #[serde(flatten)]
    pub candidate: CandidatePrediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'kb DiseaseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<MatchKind>,
}

impl<'kb> EnrichedCandidate<'kb> {
    /// Curated display name, or the raw label when unresolved.
    pub fn display_name(&self) -> &str {
        self.record.map(|r| r.name.as_str()).unwrap_or(&self.candidate.label)
    }

    pub fn is_resolved(&self) -> bool {
        self.record.is_some()
    }

    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_probability(self.candidate.probability)
    }

    pub fn percent(&self) -> String {
        format_percent(self.candidate.probability)
    }
}

/// A normalised result with records attached and risk assessed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDiagnosis<'kb> {
    pub top1: EnrichedCandidate<'kb>,
    #[serde(rename = "topK")]
    pub top_k: Vec<EnrichedCandidate<'kb>>,
    pub risk: RiskLevel,
    #[serde(skip)]
    top_n: usize,
}

impl<'kb> EnrichedDiagnosis<'kb> {
    /// The first `top_n` ranked candidates, shown only when there is more
    /// than one candidate to compare.
    pub fn alternatives(&self) -> &[EnrichedCandidate<'kb>] {
        if self.top_k.len() > 1 {
            &self.top_k[..self.top_n.min(self.top_k.len())]
        } else {
            &[]
        }
    }

    /// The plain result this diagnosis was built from.
    pub fn to_result(&self) -> DiagnosisResult {
        DiagnosisResult {
            top1: self.top1.candidate.clone(),
            top_k: self.top_k.iter().map(|c| c.candidate.clone()).collect(),
        }
    }
}

pub struct DiagnosisPipeline<'kb> {
    kb: &'kb KnowledgeBase,
    normalizer: ResultNormalizer,
    options: DiagnosisOptions,
}

impl DiagnosisPipeline<'static> {
    /// Pipeline over the built-in knowledge base with default options.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin(), ResultNormalizer::default(), DiagnosisOptions::default())
    }
}

impl<'kb> DiagnosisPipeline<'kb> {
    pub fn new(kb: &'kb KnowledgeBase, normalizer: ResultNormalizer, options: DiagnosisOptions) -> Self {
        Self { kb, normalizer, options }
    }

    pub fn knowledge_base(&self) -> &'kb KnowledgeBase {
        self.kb
    }

    pub fn options(&self) -> &DiagnosisOptions {
        &self.options
    }

    pub fn diagnose(&self, response: &Value) -> EnrichedDiagnosis<'kb> {
        self.enrich(self.normalizer.normalize(response))
    }

    /// Fetch a response from `source` and diagnose it. Transport errors
    /// propagate; shape problems never do.
    pub async fn diagnose_source(
        &self,
        source: &dyn InferenceSource,
        image_ref: &str,
    ) -> leaflens_common::Result<EnrichedDiagnosis<'kb>> {
        debug!("Requesting inference from {} for {}", source.name(), image_ref);
        let response = source.infer(image_ref).await?;
        let diagnosis = self.diagnose(&response);
        info!(
            "Diagnosed {} as {} ({}, risk {})",
            image_ref,
            diagnosis.top1.display_name(),
            diagnosis.top1.percent(),
            diagnosis.risk.as_str()
        );
        Ok(diagnosis)
    }

    pub fn enrich(&self, result: DiagnosisResult) -> EnrichedDiagnosis<'kb> {
        let top1 = self.enrich_candidate(result.top1);
        let top_k: Vec<_> = result.top_k.into_iter().map(|c| self.enrich_candidate(c)).collect();
        let risk = self.assess_risk(&top1);
        EnrichedDiagnosis { top1, top_k, risk, top_n: self.options.top_n_alternatives }
    }

    pub fn enrich_candidate(&self, candidate: CandidatePrediction) -> EnrichedCandidate<'kb> {
        let resolved = self.kb.resolve_match(&candidate.label);
        EnrichedCandidate {
            candidate,
            record: resolved.map(|r| r.record),
            matched_by: resolved.map(|r| r.matched_by),
        }
    }

    /// `High` when the top-1 is confident and not the healthy record.
    pub fn assess_risk(&self, top1: &EnrichedCandidate<'_>) -> RiskLevel {
        let healthy = top1.record.is_some_and(|r| r.key == self.options.healthy_key);
        if top1.candidate.probability > self.options.high_risk_threshold && !healthy {
            RiskLevel::High
        } else {
            RiskLevel::Clear
        }
    }
}
