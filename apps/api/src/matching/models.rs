//! Input and output data models for the compatibility engine.
//!
//! Inputs are immutable and owned by the caller. Outputs are built fresh per
//! evaluation and never cached across (candidate, job) pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::composite::WeightProfile;

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Seniority ladder shared by candidates and job postings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    /// Ordinal position on the seniority ladder.
    ///
    /// Entry=0, Mid=1, Senior=2, Lead=3. Lead keeps its own rung rather than
    /// collapsing into Senior, so Entry→Lead is a three-step gap.
    pub fn ordinal(self) -> u8 {
        match self {
            ExperienceLevel::Entry => 0,
            ExperienceLevel::Mid => 1,
            ExperienceLevel::Senior => 2,
            ExperienceLevel::Lead => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    /// Resume / portfolio description.
    #[serde(default)]
    pub narrative_text: String,
    #[serde(default)]
    pub career_goal_text: String,
    /// 0 – 100. Larger values are clamped to 100 by the engine.
    #[serde(default)]
    pub profile_completeness: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub salary_range: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreName {
    SkillMatch,
    ExperienceFit,
    NarrativeRelevance,
    CareerAlignment,
    MarketDemand,
}

impl SubScoreName {
    pub const ALL: [SubScoreName; 5] = [
        SubScoreName::SkillMatch,
        SubScoreName::ExperienceFit,
        SubScoreName::NarrativeRelevance,
        SubScoreName::CareerAlignment,
        SubScoreName::MarketDemand,
    ];
}

/// One 0 – 100 measurement of a single compatibility dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub name: SubScoreName,
    pub value: u32,
    /// Matched / missing items and rationale, in a stable order.
    pub evidence: Vec<String>,
}

impl SubScore {
    pub fn new(name: SubScoreName, value: u32, evidence: Vec<String>) -> Self {
        Self {
            name,
            value: value.min(100),
            evidence,
        }
    }
}

pub type SubScores = BTreeMap<SubScoreName, SubScore>;

/// Reads a sub-score value, treating an absent entry as the floor.
pub fn sub_score_value(scores: &SubScores, name: SubScoreName) -> u32 {
    scores.get(&name).map(|s| s.value).unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

/// Screening outcome derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HireRecommendation {
    StrongHire,
    Hire,
    Maybe,
    NoHire,
}

impl HireRecommendation {
    pub fn from_score(overall_score: u32) -> Self {
        match overall_score {
            s if s >= 80 => HireRecommendation::StrongHire,
            s if s >= 65 => HireRecommendation::Hire,
            s if s >= 50 => HireRecommendation::Maybe,
            _ => HireRecommendation::NoHire,
        }
    }
}

/// Which path produced a result. Only `Deterministic` results are a pure
/// function of their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchSource {
    Deterministic,
    AiEnriched,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: u32, // 0 – 100
    pub grade: Grade,
    pub confidence: u32, // 0 – 100
    pub hire_recommendation: HireRecommendation,
    pub sub_scores: SubScores,
    /// 0.0 – 1.0, the market-demand sub-score before ×100 scaling.
    pub market_demand_factor: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>, // ≤ 5
    pub strengths: Vec<String>,       // never empty
    pub weaknesses: Vec<String>,      // never empty
    pub rationale: Option<String>,
    pub profile: WeightProfile,
    pub source: MatchSource,
}
