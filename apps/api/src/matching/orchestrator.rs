//! Fallback Orchestrator — layers an optional AI assessment over the
//! deterministic result.
//!
//! Two states: `Deterministic` (always reachable) and `AiEnriched` (only after
//! the collaborator answers within the timeout with a response that passes
//! every validation check). Any other outcome falls back silently, so scoring
//! never surfaces an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};
use crate::matching::composite;
use crate::matching::engine::MatchEngine;
use crate::matching::models::{
    CandidateProfile, HireRecommendation, JobRequirements, MatchResult, MatchSource,
};
use crate::matching::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::matching::recommendations::recommend;
use crate::matching::skills::normalize;

const MAX_AI_NARRATIVE_ITEMS: usize = 4;

/// Why an enrichment attempt fell back. Never leaves this module as an error.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("AI enrichment is not configured")]
    Unavailable,

    #[error("collaborator did not answer within {0:?}")]
    Timeout(Duration),

    #[error("collaborator failed: {0}")]
    Collaborator(#[from] LlmError),

    #[error("could not build prompt: {0}")]
    Prompt(String),

    #[error("response is not well-formed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("overall_score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),

    #[error("matched_skills and missing_skills are both empty")]
    EmptySkillLists,

    #[error("field '{0}' contains a blank entry")]
    BlankEntry(&'static str),
}

/// Shape the collaborator is asked to return. Every field is optional here so
/// absence is reported as `MissingField` rather than a generic parse error.
#[derive(Debug, Deserialize)]
struct RawAssessment {
    overall_score: Option<f64>,
    matched_skills: Option<Vec<String>>,
    missing_skills: Option<Vec<String>>,
    rationale: Option<String>,
    strengths: Option<Vec<String>>,
    weaknesses: Option<Vec<String>>,
}

/// A collaborator response that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AiAssessment {
    pub overall_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub rationale: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Parses and validates collaborator output. Nothing is clamped: an
/// out-of-range score is a failure, not something to repair.
pub fn parse_assessment(text: &str) -> Result<AiAssessment, EnrichmentError> {
    let raw: RawAssessment = serde_json::from_str(strip_json_fences(text))?;

    let score = raw
        .overall_score
        .ok_or(EnrichmentError::MissingField("overall_score"))?;
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(EnrichmentError::ScoreOutOfRange(score));
    }

    let matched = raw
        .matched_skills
        .ok_or(EnrichmentError::MissingField("matched_skills"))?;
    let missing = raw
        .missing_skills
        .ok_or(EnrichmentError::MissingField("missing_skills"))?;
    if matched.iter().any(|s| s.trim().is_empty()) {
        return Err(EnrichmentError::BlankEntry("matched_skills"));
    }
    if missing.iter().any(|s| s.trim().is_empty()) {
        return Err(EnrichmentError::BlankEntry("missing_skills"));
    }
    if matched.is_empty() && missing.is_empty() {
        return Err(EnrichmentError::EmptySkillLists);
    }

    let rationale = raw
        .rationale
        .ok_or(EnrichmentError::MissingField("rationale"))?;
    if rationale.trim().is_empty() {
        return Err(EnrichmentError::BlankEntry("rationale"));
    }

    Ok(AiAssessment {
        overall_score: score.round() as u32,
        matched_skills: normalize(&matched),
        missing_skills: normalize(&missing),
        rationale: rationale.trim().to_string(),
        strengths: clean_items(raw.strengths),
        weaknesses: clean_items(raw.weaknesses),
    })
}

fn clean_items(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_AI_NARRATIVE_ITEMS)
        .collect()
}

pub fn build_prompt(
    candidate: &CandidateProfile,
    job: &JobRequirements,
) -> Result<String, EnrichmentError> {
    let candidate_json = serde_json::to_string_pretty(candidate)
        .map_err(|e| EnrichmentError::Prompt(e.to_string()))?;
    let job_json =
        serde_json::to_string_pretty(job).map_err(|e| EnrichmentError::Prompt(e.to_string()))?;

    Ok(MATCH_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{candidate_json}", &candidate_json)
        .replace("{job_json}", &job_json))
}

/// Replaces the headline numbers and skill split with the AI assessment.
/// Sub-scores and the market factor stay deterministic.
pub fn overlay(engine: &MatchEngine, baseline: MatchResult, ai: AiAssessment) -> MatchResult {
    let composite = composite::from_overall(engine.config(), ai.overall_score);
    let narrative = recommend(&ai.missing_skills, &baseline.sub_scores);

    // Fallback narrative follows the AI skill split, not the baseline's.
    let strengths = if ai.strengths.is_empty() {
        narrative.strengths
    } else {
        ai.strengths
    };
    let weaknesses = if ai.weaknesses.is_empty() {
        narrative.weaknesses
    } else {
        ai.weaknesses
    };

    MatchResult {
        overall_score: composite.overall_score,
        grade: composite.grade,
        confidence: composite.confidence,
        hire_recommendation: HireRecommendation::from_score(composite.overall_score),
        matched_skills: ai.matched_skills,
        missing_skills: ai.missing_skills,
        recommendations: narrative.recommendations,
        strengths,
        weaknesses,
        rationale: Some(ai.rationale),
        source: MatchSource::AiEnriched,
        ..baseline
    }
}

#[derive(Clone)]
pub struct FallbackOrchestrator {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl FallbackOrchestrator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// An orchestrator that never leaves the deterministic state.
    pub fn deterministic_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn ai_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Always returns a usable result, tagged with the path that produced it.
    ///
    /// The deterministic baseline is computed first. Dropping the returned
    /// future cancels any in-flight collaborator call.
    pub async fn evaluate(
        &self,
        engine: &MatchEngine,
        candidate: &CandidateProfile,
        job: &JobRequirements,
    ) -> MatchResult {
        let baseline = engine.evaluate(candidate, job);

        match self.enrich(candidate, job).await {
            Ok(ai) => {
                info!(
                    "AI-enriched match: deterministic={} ai={} profile={}",
                    baseline.overall_score,
                    ai.overall_score,
                    engine.profile().as_str()
                );
                overlay(engine, baseline, ai)
            }
            Err(EnrichmentError::Unavailable) => {
                debug!("AI enrichment disabled, serving deterministic result");
                baseline
            }
            Err(e) => {
                warn!("AI enrichment failed, falling back to deterministic result: {e}");
                baseline
            }
        }
    }

    async fn enrich(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements,
    ) -> Result<AiAssessment, EnrichmentError> {
        let generator = self.generator.as_ref().ok_or(EnrichmentError::Unavailable)?;
        let prompt = build_prompt(candidate, job)?;

        let text = tokio::time::timeout(self.timeout, generator.generate(&prompt, MATCH_SYSTEM))
            .await
            .map_err(|_| EnrichmentError::Timeout(self.timeout))??;

        parse_assessment(&text)
    }
}
