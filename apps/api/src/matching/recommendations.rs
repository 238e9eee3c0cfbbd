//! Recommendation Generator — deterministic rules that turn missing skills and
//! weak sub-scores into remediation actions plus a strengths/weaknesses narrative.

use serde::{Deserialize, Serialize};

use crate::matching::models::{sub_score_value, SubScoreName, SubScores};
use crate::matching::sub_scores::{
    career_alignment_label, experience_fit_label, narrative_strength, EXPERIENCE_GOOD_FIT,
};

pub const MAX_RECOMMENDATIONS: usize = 5;
const MAX_SKILL_RECOMMENDATIONS: usize = 3;

/// Below this, experience and portfolio suggestions are added.
pub const REMEDIATION_THRESHOLD: u32 = 70;

const SKILL_STRENGTH_THRESHOLD: u32 = 70;
const NARRATIVE_STRENGTH_THRESHOLD: u32 = 60; // "Moderate" or better
const CAREER_STRENGTH_THRESHOLD: u32 = 60; // "Medium" or better
const MARKET_STRENGTH_THRESHOLD: u32 = 60;

pub const POSITIVE_REINFORCEMENT: &str =
    "Excellent match: your profile already covers every requirement, so apply with confidence";

const EXPERIENCE_SUGGESTIONS: [&str; 2] = [
    "Take on stretch assignments that build experience at the role's seniority level",
    "Contribute to open-source or side projects to broaden hands-on experience",
];

const PORTFOLIO_SUGGESTIONS: [&str; 2] = [
    "Add portfolio projects that showcase the role's required skills",
    "Describe concrete achievements in your resume: what you built, developed, or implemented",
];

const GENERAL_SUGGESTIONS: [&str; 2] = [
    "Tailor your resume summary to this role's title and description",
    "Prepare examples of measurable impact to discuss in interviews",
];

pub const NO_STRENGTHS_PLACEHOLDER: &str =
    "Shows potential for growth with targeted upskilling";
pub const NO_WEAKNESSES_PLACEHOLDER: &str =
    "Limited growth opportunities outside core competencies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub recommendations: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Builds the ordered remediation list and the narrative.
///
/// Priority order: learn-skill items (first three missing), experience
/// suggestions, portfolio suggestions, general suggestions; truncated to five.
/// An excellent candidate (no missing skills, every sub-score ≥ 70) gets a
/// positive-reinforcement item first, so the list is never empty.
pub fn recommend(missing_skills: &[String], sub_scores: &SubScores) -> Recommendations {
    let experience = sub_score_value(sub_scores, SubScoreName::ExperienceFit);
    let narrative = sub_score_value(sub_scores, SubScoreName::NarrativeRelevance);

    let mut recommendations: Vec<String> = Vec::new();

    let all_strong = SubScoreName::ALL
        .iter()
        .all(|name| sub_score_value(sub_scores, *name) >= REMEDIATION_THRESHOLD);
    if missing_skills.is_empty() && all_strong {
        recommendations.push(POSITIVE_REINFORCEMENT.to_string());
    }

    recommendations.extend(
        missing_skills
            .iter()
            .take(MAX_SKILL_RECOMMENDATIONS)
            .map(|skill| format!("Learn {skill} to meet a core requirement of this role")),
    );
    if experience < REMEDIATION_THRESHOLD {
        recommendations.extend(EXPERIENCE_SUGGESTIONS.iter().map(|s| s.to_string()));
    }
    if narrative < REMEDIATION_THRESHOLD {
        recommendations.extend(PORTFOLIO_SUGGESTIONS.iter().map(|s| s.to_string()));
    }
    recommendations.extend(GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()));
    recommendations.truncate(MAX_RECOMMENDATIONS);

    let (strengths, weaknesses) = build_narrative(missing_skills, sub_scores);

    Recommendations {
        recommendations,
        strengths,
        weaknesses,
    }
}

/// One templated sentence per component that passes or fails its threshold.
/// Neither list is ever empty.
pub fn build_narrative(
    missing_skills: &[String],
    sub_scores: &SubScores,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    let skill = sub_score_value(sub_scores, SubScoreName::SkillMatch);
    if skill >= SKILL_STRENGTH_THRESHOLD {
        strengths.push(format!("Strong skill alignment ({skill}% of required skills)"));
    } else if missing_skills.is_empty() {
        weaknesses.push(format!("Low skill alignment ({skill}%)"));
    } else {
        weaknesses.push(format!(
            "Skill gaps in {} required skill(s) ({skill}% covered)",
            missing_skills.len()
        ));
    }

    let experience = sub_score_value(sub_scores, SubScoreName::ExperienceFit);
    let label = experience_fit_label(experience);
    if experience >= EXPERIENCE_GOOD_FIT {
        strengths.push(format!("Experience level is a {label} for the role"));
    } else {
        weaknesses.push(format!("Experience level is a {label} for the role"));
    }

    let narrative = sub_score_value(sub_scores, SubScoreName::NarrativeRelevance);
    let label = narrative_strength(narrative);
    if narrative >= NARRATIVE_STRENGTH_THRESHOLD {
        strengths.push(format!("{label} portfolio relevance to the job description"));
    } else {
        weaknesses.push(format!("{label} portfolio relevance to the job description"));
    }

    let career = sub_score_value(sub_scores, SubScoreName::CareerAlignment);
    let label = career_alignment_label(career);
    if career >= CAREER_STRENGTH_THRESHOLD {
        strengths.push(format!("{label} alignment between career goals and this role"));
    } else {
        weaknesses.push(format!("{label} alignment between career goals and this role"));
    }

    // Market demand describes the role, not the candidate: strength only.
    let market = sub_score_value(sub_scores, SubScoreName::MarketDemand);
    if market >= MARKET_STRENGTH_THRESHOLD {
        strengths.push("Role builds skills that are in high market demand".to_string());
    }

    if strengths.is_empty() {
        strengths.push(NO_STRENGTHS_PLACEHOLDER.to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push(NO_WEAKNESSES_PLACEHOLDER.to_string());
    }
    (strengths, weaknesses)
}
