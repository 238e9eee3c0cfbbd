//! Axum route handlers for the Match API.

use std::collections::HashSet;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::composite::{ConfidenceBand, ScoringWeights, WeightProfile};
use crate::matching::engine::{rank_candidates, RankedCandidate, RankingEntry};
use crate::matching::models::{CandidateProfile, Grade, JobRequirements, MatchResult};
use crate::state::AppState;

pub const MAX_RANKED_CANDIDATES: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: CandidateProfile,
    pub job: JobRequirements,
    /// Defaults to the configured profile.
    #[serde(default)]
    pub profile: Option<WeightProfile>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub request_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub profile: WeightProfile,
    pub result: MatchResult,
}

#[derive(Debug, Deserialize)]
pub struct RankingRequest {
    pub job: JobRequirements,
    pub candidates: Vec<RankingEntry>,
    /// Defaults to `candidate_ranking`.
    #[serde(default)]
    pub profile: Option<WeightProfile>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub request_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub profile: WeightProfile,
    pub rankings: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct GradeBand {
    pub min_score: u32,
    pub grade: Grade,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub profile: WeightProfile,
    pub weights: ScoringWeights,
    pub grade_bands: Vec<GradeBand>,
    pub confidence: ConfidenceBand,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores a candidate against a job, overlaying an AI assessment when the
/// collaborator is available. Always succeeds for a well-formed body.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let profile = request.profile.unwrap_or(state.config.default_profile);
    let engine = state.engines.get(profile);

    let result = state
        .orchestrator
        .evaluate(engine, &request.candidate, &request.job)
        .await;

    info!(
        "Match scored {}/100 ({}) via {:?} for '{}'",
        result.overall_score,
        result.grade.as_str(),
        result.source,
        request.job.title
    );

    Json(MatchResponse {
        request_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        profile,
        result,
    })
}

/// POST /api/v1/match/deterministic
///
/// Same as `/match` but never consults the collaborator.
pub async fn handle_match_deterministic(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let profile = request.profile.unwrap_or(state.config.default_profile);
    let result = state
        .engines
        .get(profile)
        .evaluate(&request.candidate, &request.job);

    Json(MatchResponse {
        request_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        profile,
        result,
    })
}

/// POST /api/v1/rankings
///
/// Ranks candidates for one job using the deterministic path.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(request): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "candidates cannot be empty".to_string(),
        ));
    }
    if request.candidates.len() > MAX_RANKED_CANDIDATES {
        return Err(AppError::Validation(format!(
            "at most {MAX_RANKED_CANDIDATES} candidates can be ranked per request"
        )));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = request
        .candidates
        .iter()
        .find(|c| !seen.insert(c.candidate_id.as_str()))
    {
        return Err(AppError::UnprocessableEntity(format!(
            "duplicate candidate_id '{}'",
            dup.candidate_id
        )));
    }

    let profile = request.profile.unwrap_or(WeightProfile::CandidateRanking);
    let rankings = rank_candidates(state.engines.get(profile), &request.job, &request.candidates);

    info!(
        "Ranked {} candidates for '{}' ({})",
        rankings.len(),
        request.job.title,
        profile.as_str()
    );

    Ok(Json(RankingResponse {
        request_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        profile,
        rankings,
    }))
}

/// GET /api/v1/match/profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<ProfileSummary>> {
    let summaries = state
        .engines
        .iter()
        .map(|engine| {
            let config = engine.config();
            ProfileSummary {
                profile: config.profile,
                weights: config.weights,
                grade_bands: config
                    .grade_bands
                    .iter()
                    .map(|(min_score, grade)| GradeBand {
                        min_score: *min_score,
                        grade: *grade,
                    })
                    .collect(),
                confidence: config.confidence,
            }
        })
        .collect();

    Json(summaries)
}
