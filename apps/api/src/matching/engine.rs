//! Deterministic pipeline: normalize → sub-scores → composite → recommendations.
//!
//! Pure and synchronous. Identical inputs always produce an identical
//! `MatchResult`, so it is safe to call concurrently without locking.

use serde::{Deserialize, Serialize};

use crate::matching::composite::{self, ScoringConfig, ScoringConfigError, WeightProfile};
use crate::matching::models::{
    CandidateProfile, HireRecommendation, JobRequirements, MatchResult, MatchSource, SubScores,
};
use crate::matching::recommendations::recommend;
use crate::matching::sub_scores::{
    career_alignment, experience_fit, market_demand, market_demand_factor, narrative_relevance,
    skill_coverage, skill_match,
};

/// A validated scoring table bound to the pipeline. Only constructible
/// through `new`, so an engine never runs with a broken table.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: ScoringConfig,
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn for_profile(profile: WeightProfile) -> Result<Self, ScoringConfigError> {
        Self::new(ScoringConfig::for_profile(profile))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn profile(&self) -> WeightProfile {
        self.config.profile
    }

    pub fn sub_scores(&self, candidate: &CandidateProfile, job: &JobRequirements) -> SubScores {
        [
            skill_match(candidate, job),
            experience_fit(candidate, job),
            narrative_relevance(candidate, job),
            career_alignment(candidate, job),
            market_demand(candidate, job),
        ]
        .into_iter()
        .map(|s| (s.name, s))
        .collect()
    }

    /// Runs the full deterministic path. Never fails.
    pub fn evaluate(&self, candidate: &CandidateProfile, job: &JobRequirements) -> MatchResult {
        let coverage = skill_coverage(candidate, job);
        let sub_scores = self.sub_scores(candidate, job);
        let composite = composite::score(&self.config, &sub_scores, candidate.profile_completeness);
        let narrative = recommend(&coverage.missing, &sub_scores);

        MatchResult {
            overall_score: composite.overall_score,
            grade: composite.grade,
            confidence: composite.confidence,
            hire_recommendation: HireRecommendation::from_score(composite.overall_score),
            sub_scores,
            market_demand_factor: market_demand_factor(job),
            matched_skills: coverage.matched,
            missing_skills: coverage.missing,
            recommendations: narrative.recommendations,
            strengths: narrative.strengths,
            weaknesses: narrative.weaknesses,
            rationale: None,
            profile: self.config.profile,
            source: MatchSource::Deterministic,
        }
    }
}

/// One engine per weight profile, built and validated at startup.
#[derive(Debug, Clone)]
pub struct EngineSet {
    job_match: MatchEngine,
    candidate_ranking: MatchEngine,
    screening: MatchEngine,
}

impl EngineSet {
    pub fn new() -> Result<Self, ScoringConfigError> {
        Ok(Self {
            job_match: MatchEngine::for_profile(WeightProfile::JobMatch)?,
            candidate_ranking: MatchEngine::for_profile(WeightProfile::CandidateRanking)?,
            screening: MatchEngine::for_profile(WeightProfile::Screening)?,
        })
    }

    pub fn get(&self, profile: WeightProfile) -> &MatchEngine {
        match profile {
            WeightProfile::JobMatch => &self.job_match,
            WeightProfile::CandidateRanking => &self.candidate_ranking,
            WeightProfile::Screening => &self.screening,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEngine> {
        [&self.job_match, &self.candidate_ranking, &self.screening].into_iter()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate ranking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RankingEntry {
    pub candidate_id: String,
    pub candidate: CandidateProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate_id: String,
    pub result: MatchResult,
}

/// Scores every candidate against one job and orders them best first.
/// Ties on overall score fall back to candidate id so ordering is stable.
pub fn rank_candidates(
    engine: &MatchEngine,
    job: &JobRequirements,
    entries: &[RankingEntry],
) -> Vec<RankedCandidate> {
    let mut scored: Vec<(String, MatchResult)> = entries
        .iter()
        .map(|e| (e.candidate_id.clone(), engine.evaluate(&e.candidate, job)))
        .collect();

    scored.sort_by(|(id_a, a), (id_b, b)| {
        b.overall_score
            .cmp(&a.overall_score)
            .then_with(|| id_a.cmp(id_b))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (candidate_id, result))| RankedCandidate {
            rank: i + 1,
            candidate_id,
            result,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::models::{ExperienceLevel, SubScoreName};

    fn engine() -> MatchEngine {
        MatchEngine::for_profile(WeightProfile::JobMatch).unwrap()
    }

    fn fullstack_candidate() -> CandidateProfile {
        CandidateProfile {
            skills: vec!["React".into(), "Node.js".into()],
            experience_years: 3,
            experience_level: ExperienceLevel::Mid,
            narrative_text: "Built a React and Node.js marketplace over 3 years".into(),
            career_goal_text: "Grow into a senior full-stack developer".into(),
            profile_completeness: 80,
        }
    }

    fn fullstack_job() -> JobRequirements {
        JobRequirements {
            title: "Full-Stack Developer".into(),
            required_skills: vec!["react".into(), "node.js".into(), "mongodb".into()],
            description: "Ship features across our React frontend and Node.js API".into(),
            experience_level: ExperienceLevel::Mid,
            salary_range: Some("$90k - $120k".into()),
        }
    }

    #[test]
    fn test_end_to_end_skill_split() {
        let result = engine().evaluate(&fullstack_candidate(), &fullstack_job());
        assert_eq!(result.matched_skills, vec!["react", "node.js"]);
        assert_eq!(result.missing_skills, vec!["mongodb"]);
        assert_eq!(result.sub_scores[&SubScoreName::SkillMatch].value, 67);
        assert_eq!(result.source, MatchSource::Deterministic);
        assert!(result.rationale.is_none());
    }

    #[test]
    fn test_every_sub_score_is_present() {
        let result = engine().evaluate(&fullstack_candidate(), &fullstack_job());
        for name in SubScoreName::ALL {
            let s = &result.sub_scores[&name];
            assert_eq!(s.name, name);
            assert!(s.value <= 100);
        }
    }

    #[test]
    fn test_deterministic_path_is_pure() {
        let e = engine();
        let first = e.evaluate(&fullstack_candidate(), &fullstack_job());
        let second = e.evaluate(&fullstack_candidate(), &fullstack_job());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_inputs_do_not_fail() {
        let result = engine().evaluate(&CandidateProfile::default(), &JobRequirements::default());
        assert_eq!(result.sub_scores[&SubScoreName::SkillMatch].value, 0);
        assert!(result.overall_score <= 100);
        assert!(result.confidence <= 100);
        assert!(!result.weaknesses.is_empty());
        assert!(!result.strengths.is_empty());
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_bounds_hold_across_varied_inputs() {
        let e = engine();
        let levels = [
            ExperienceLevel::Entry,
            ExperienceLevel::Mid,
            ExperienceLevel::Senior,
            ExperienceLevel::Lead,
        ];
        for (i, cl) in levels.iter().enumerate() {
            for jl in levels.iter() {
                let mut c = fullstack_candidate();
                c.experience_level = *cl;
                c.profile_completeness = (i as u32) * 60; // includes >100
                let mut j = fullstack_job();
                j.experience_level = *jl;
                let r = e.evaluate(&c, &j);
                assert!(r.overall_score <= 100);
                assert!(r.confidence <= 100);
                assert!(r.recommendations.len() <= 5);
                assert!((0.0..=1.0).contains(&r.market_demand_factor));
            }
        }
    }

    #[test]
    fn test_adding_matched_skill_never_lowers_overall() {
        let e = engine();
        let job = fullstack_job();
        let before = e.evaluate(&fullstack_candidate(), &job);
        let mut c = fullstack_candidate();
        c.skills.push("MongoDB".into());
        let after = e.evaluate(&c, &job);
        assert!(after.overall_score >= before.overall_score);
        assert!(after.missing_skills.is_empty());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut config = ScoringConfig::for_profile(WeightProfile::JobMatch);
        config.weights.career_alignment = 0.9;
        assert!(MatchEngine::new(config).is_err());
    }

    #[test]
    fn test_engine_set_covers_all_profiles() {
        let set = EngineSet::new().unwrap();
        for profile in WeightProfile::ALL {
            assert_eq!(set.get(profile).profile(), profile);
        }
        assert_eq!(set.iter().count(), WeightProfile::ALL.len());
    }

    #[test]
    fn test_profiles_weight_the_same_inputs_differently() {
        let set = EngineSet::new().unwrap();
        let c = fullstack_candidate();
        let j = fullstack_job();
        let job_match = set.get(WeightProfile::JobMatch).evaluate(&c, &j);
        let screening = set.get(WeightProfile::Screening).evaluate(&c, &j);
        assert_eq!(job_match.profile, WeightProfile::JobMatch);
        assert_eq!(screening.profile, WeightProfile::Screening);
        assert_eq!(job_match.sub_scores, screening.sub_scores);
    }

    #[test]
    fn test_ranking_orders_best_first() {
        let weak = CandidateProfile {
            skills: vec!["COBOL".into()],
            experience_level: ExperienceLevel::Lead,
            ..Default::default()
        };
        let entries = vec![
            RankingEntry {
                candidate_id: "weak".into(),
                candidate: weak,
            },
            RankingEntry {
                candidate_id: "strong".into(),
                candidate: fullstack_candidate(),
            },
        ];
        let ranked = rank_candidates(&engine(), &fullstack_job(), &entries);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate_id, "strong");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].candidate_id, "weak");
        assert_eq!(ranked[1].rank, 2);
        assert!(ranked[0].result.overall_score >= ranked[1].result.overall_score);
    }

    #[test]
    fn test_ranking_ties_break_on_id() {
        let entries: Vec<RankingEntry> = ["b", "a", "c"]
            .iter()
            .map(|id| RankingEntry {
                candidate_id: id.to_string(),
                candidate: fullstack_candidate(),
            })
            .collect();
        let ranked = rank_candidates(&engine(), &fullstack_job(), &entries);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
