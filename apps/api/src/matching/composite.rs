//! Composite Scorer — weighted sum of sub-scores plus profile completeness,
//! followed by grade banding and a confidence heuristic.
//!
//! Weight tables are named per call site (`WeightProfile`) so job matching,
//! recruiter ranking and hire screening share one pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::models::{sub_score_value, Grade, SubScoreName, SubScores};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub experience_fit: f64,
    pub narrative_relevance: f64,
    pub career_alignment: f64,
    pub market_demand: f64,
    pub profile_completeness: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill_match
            + self.experience_fit
            + self.narrative_relevance
            + self.career_alignment
            + self.market_demand
            + self.profile_completeness
    }

    pub fn for_sub_score(&self, name: SubScoreName) -> f64 {
        match name {
            SubScoreName::SkillMatch => self.skill_match,
            SubScoreName::ExperienceFit => self.experience_fit,
            SubScoreName::NarrativeRelevance => self.narrative_relevance,
            SubScoreName::CareerAlignment => self.career_alignment,
            SubScoreName::MarketDemand => self.market_demand,
        }
    }

    fn all(&self) -> [f64; 6] {
        [
            self.skill_match,
            self.experience_fit,
            self.narrative_relevance,
            self.career_alignment,
            self.market_demand,
            self.profile_completeness,
        ]
    }
}

/// Candidate-facing job matching.
pub const JOB_MATCH_WEIGHTS: ScoringWeights = ScoringWeights {
    skill_match: 0.35,
    experience_fit: 0.25,
    narrative_relevance: 0.20,
    career_alignment: 0.10,
    market_demand: 0.05,
    profile_completeness: 0.05,
};

/// Recruiter-side ranking of many candidates for one job.
pub const CANDIDATE_RANKING_WEIGHTS: ScoringWeights = ScoringWeights {
    skill_match: 0.40,
    experience_fit: 0.25,
    narrative_relevance: 0.15,
    career_alignment: 0.05,
    market_demand: 0.05,
    profile_completeness: 0.10,
};

/// Hire screening. Market demand says nothing about the candidate here.
pub const SCREENING_WEIGHTS: ScoringWeights = ScoringWeights {
    skill_match: 0.35,
    experience_fit: 0.30,
    narrative_relevance: 0.20,
    career_alignment: 0.10,
    market_demand: 0.0,
    profile_completeness: 0.05,
};

/// Minimum score (inclusive) for each grade, highest first.
pub const DEFAULT_GRADE_BANDS: &[(u32, Grade)] = &[
    (90, Grade::APlus),
    (80, Grade::A),
    (70, Grade::BPlus),
    (60, Grade::B),
    (50, Grade::CPlus),
    (40, Grade::C),
    (0, Grade::D),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub offset: i32,
    pub min: u32,
    pub max: u32,
}

pub const DEFAULT_CONFIDENCE_BAND: ConfidenceBand = ConfidenceBand {
    offset: 10,
    min: 50,
    max: 95,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    #[default]
    JobMatch,
    CandidateRanking,
    Screening,
}

impl WeightProfile {
    pub const ALL: [WeightProfile; 3] = [
        WeightProfile::JobMatch,
        WeightProfile::CandidateRanking,
        WeightProfile::Screening,
    ];

    pub fn weights(self) -> ScoringWeights {
        match self {
            WeightProfile::JobMatch => JOB_MATCH_WEIGHTS,
            WeightProfile::CandidateRanking => CANDIDATE_RANKING_WEIGHTS,
            WeightProfile::Screening => SCREENING_WEIGHTS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightProfile::JobMatch => "job_match",
            WeightProfile::CandidateRanking => "candidate_ranking",
            WeightProfile::Screening => "screening",
        }
    }
}

impl std::str::FromStr for WeightProfile {
    type Err = ScoringConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| ScoringConfigError::UnknownProfile(s.to_string()))
    }
}

/// Full scoring table for one profile. Validated once, when a `MatchEngine`
/// is built, never per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub profile: WeightProfile,
    pub weights: ScoringWeights,
    pub grade_bands: Vec<(u32, Grade)>,
    pub confidence: ConfidenceBand,
}

impl ScoringConfig {
    pub fn for_profile(profile: WeightProfile) -> Self {
        Self {
            profile,
            weights: profile.weights(),
            grade_bands: DEFAULT_GRADE_BANDS.to_vec(),
            confidence: DEFAULT_CONFIDENCE_BAND,
        }
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.weights.all().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoringConfigError::InvalidWeight);
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum(sum));
        }

        if self.grade_bands.is_empty() {
            return Err(ScoringConfigError::GradeBands("no bands defined".to_string()));
        }
        for pair in self.grade_bands.windows(2) {
            if pair[0].0 <= pair[1].0 {
                return Err(ScoringConfigError::GradeBands(format!(
                    "{} (min {}) must be above {} (min {})",
                    pair[0].1.as_str(),
                    pair[0].0,
                    pair[1].1.as_str(),
                    pair[1].0
                )));
            }
        }
        if self.grade_bands[0].0 > 100 {
            return Err(ScoringConfigError::GradeBands(
                "highest band starts above 100".to_string(),
            ));
        }
        if self.grade_bands.last().map(|b| b.0) != Some(0) {
            return Err(ScoringConfigError::GradeBands(
                "lowest band must start at 0".to_string(),
            ));
        }

        let band = &self.confidence;
        if band.min > band.max || band.max > 100 {
            return Err(ScoringConfigError::ConfidenceBand {
                min: band.min,
                max: band.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoringConfigError {
    #[error("Scoring weights must sum to 1.0 (got {0})")]
    WeightSum(f64),

    #[error("Scoring weights must be finite and non-negative")]
    InvalidWeight,

    #[error("Grade bands must be strictly descending and cover 0..=100: {0}")]
    GradeBands(String),

    #[error("Confidence band [{min}, {max}] is not within 0..=100")]
    ConfidenceBand { min: u32, max: u32 },

    #[error("Unknown weight profile '{0}'")]
    UnknownProfile(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScore {
    pub overall_score: u32,
    pub grade: Grade,
    pub confidence: u32,
}

/// round(Σ weight × sub-score + w_pc × completeness), clamped to 0..=100.
pub fn score(
    config: &ScoringConfig,
    sub_scores: &SubScores,
    profile_completeness: u32,
) -> CompositeScore {
    let weighted: f64 = SubScoreName::ALL
        .iter()
        .map(|name| config.weights.for_sub_score(*name) * sub_score_value(sub_scores, *name) as f64)
        .sum::<f64>()
        + config.weights.profile_completeness * profile_completeness.min(100) as f64;

    let overall_score = weighted.round().clamp(0.0, 100.0) as u32;
    from_overall(config, overall_score)
}

/// Grade and confidence for an already-computed overall score.
pub fn from_overall(config: &ScoringConfig, overall_score: u32) -> CompositeScore {
    let overall_score = overall_score.min(100);
    CompositeScore {
        overall_score,
        grade: grade_for(&config.grade_bands, overall_score),
        confidence: confidence_for(&config.confidence, overall_score),
    }
}

pub fn grade_for(bands: &[(u32, Grade)], overall_score: u32) -> Grade {
    bands
        .iter()
        .find(|(min, _)| overall_score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::D)
}

pub fn confidence_for(band: &ConfidenceBand, overall_score: u32) -> u32 {
    let raw = overall_score as i64 + band.offset as i64;
    raw.clamp(band.min as i64, band.max as i64) as u32
}
