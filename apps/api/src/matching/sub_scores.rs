//! Sub-score calculators — five pure `(candidate, job) -> SubScore` functions.
//!
//! None of them fail. Sparse or empty inputs degrade to the floor value (0).

use crate::matching::models::{CandidateProfile, JobRequirements, SubScore, SubScoreName};
use crate::matching::skills::{normalize, skills_overlap};

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

pub const EXPERIENCE_PERFECT_FIT: u32 = 95;
pub const EXPERIENCE_GOOD_FIT: u32 = 75;
pub const EXPERIENCE_STRETCH: u32 = 40;

pub const NARRATIVE_SKILL_INCREMENT: u32 = 15;
pub const NARRATIVE_ACHIEVEMENT_BONUS: u32 = 20;
pub const NARRATIVE_EXPERIENCE_BONUS: u32 = 10;

const ACHIEVEMENT_KEYWORDS: &[&str] = &["project", "built", "developed", "created", "implemented"];
const EXPERIENCE_KEYWORDS: &[&str] = &["years", "experience", "full-stack"];

pub const CAREER_BASELINE: u32 = 30;
pub const CAREER_ROLE_FAMILY_BLOCK: u32 = 40;
pub const CAREER_TECHNOLOGY_BLOCK: u32 = 30;

const ROLE_FAMILY_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "designer",
    "architect",
    "manager",
    "analyst",
    "scientist",
    "consultant",
];

const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "frontend",
    "backend",
    "full-stack",
    "fullstack",
    "mobile",
    "cloud",
    "devops",
    "data",
    "machine learning",
    "security",
    "web",
];

pub const MARKET_DEMAND_INCREMENT: f64 = 0.2;

const HIGH_DEMAND_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "react",
    "node.js",
    "aws",
    "docker",
    "kubernetes",
    "sql",
    "rust",
    "java",
    "machine learning",
    "graphql",
];

// ────────────────────────────────────────────────────────────────────────────
// Skill-Match
// ────────────────────────────────────────────────────────────────────────────

/// Required skills split by whether any candidate skill overlaps them.
/// Both lists follow the order of `job.required_skills`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillCoverage {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillCoverage {
    pub fn required_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

pub fn skill_coverage(candidate: &CandidateProfile, job: &JobRequirements) -> SkillCoverage {
    let candidate_skills = normalize(&candidate.skills);
    let mut coverage = SkillCoverage::default();

    for required in normalize(&job.required_skills) {
        if candidate_skills.iter().any(|c| skills_overlap(c, &required)) {
            coverage.matched.push(required);
        } else {
            coverage.missing.push(required);
        }
    }
    coverage
}

/// round(100 × matched / required), or 0 when the job lists no required skills.
pub fn skill_match(candidate: &CandidateProfile, job: &JobRequirements) -> SubScore {
    let coverage = skill_coverage(candidate, job);
    let required = coverage.required_count();

    let value = if required == 0 {
        0
    } else {
        (100.0 * coverage.matched.len() as f64 / required as f64).round() as u32
    };

    let mut evidence: Vec<String> = coverage
        .matched
        .iter()
        .map(|s| format!("matched: {s}"))
        .collect();
    evidence.extend(coverage.missing.iter().map(|s| format!("missing: {s}")));
    if required == 0 {
        evidence.push("job lists no required skills".to_string());
    }

    SubScore::new(SubScoreName::SkillMatch, value, evidence)
}

// ────────────────────────────────────────────────────────────────────────────
// Experience-Fit
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_fit_label(value: u32) -> &'static str {
    match value {
        v if v >= EXPERIENCE_PERFECT_FIT => "Perfect Fit",
        v if v >= EXPERIENCE_GOOD_FIT => "Good Fit",
        _ => "Stretch",
    }
}

/// Ordinal distance between seniority levels (see `ExperienceLevel::ordinal`).
pub fn experience_fit(candidate: &CandidateProfile, job: &JobRequirements) -> SubScore {
    let diff = candidate
        .experience_level
        .ordinal()
        .abs_diff(job.experience_level.ordinal());

    let value = match diff {
        0 => EXPERIENCE_PERFECT_FIT,
        1 => EXPERIENCE_GOOD_FIT,
        _ => EXPERIENCE_STRETCH,
    };

    let evidence = vec![
        experience_fit_label(value).to_string(),
        format!(
            "candidate: {} ({} years), role: {}",
            candidate.experience_level.label(),
            candidate.experience_years,
            job.experience_level.label()
        ),
    ];

    SubScore::new(SubScoreName::ExperienceFit, value, evidence)
}

// ────────────────────────────────────────────────────────────────────────────
// Narrative-Relevance
// ────────────────────────────────────────────────────────────────────────────

pub fn narrative_strength(value: u32) -> &'static str {
    match value {
        v if v >= 80 => "Strong",
        v if v >= 60 => "Moderate",
        v if v >= 40 => "Weak",
        _ => "Very Weak",
    }
}

pub fn narrative_relevance(candidate: &CandidateProfile, job: &JobRequirements) -> SubScore {
    let narrative = candidate.narrative_text.to_lowercase();
    let description = job.description.to_lowercase();
    let mut evidence = Vec::new();

    if narrative.trim().is_empty() {
        evidence.push(narrative_strength(0).to_string());
        evidence.push("no narrative text provided".to_string());
        return SubScore::new(SubScoreName::NarrativeRelevance, 0, evidence);
    }

    let mut total: u32 = 0;
    for skill in normalize(&candidate.skills) {
        if description.contains(&skill) && narrative.contains(&skill) {
            total += NARRATIVE_SKILL_INCREMENT;
            evidence.push(format!("mentions {skill}"));
        }
    }
    total = total.min(100);

    if let Some(kw) = first_keyword(&narrative, ACHIEVEMENT_KEYWORDS) {
        total += NARRATIVE_ACHIEVEMENT_BONUS;
        evidence.push(format!("achievement signal: {kw}"));
    }
    if let Some(kw) = first_keyword(&narrative, EXPERIENCE_KEYWORDS) {
        total += NARRATIVE_EXPERIENCE_BONUS;
        evidence.push(format!("experience signal: {kw}"));
    }

    let value = total.min(100);
    evidence.insert(0, narrative_strength(value).to_string());
    SubScore::new(SubScoreName::NarrativeRelevance, value, evidence)
}

// ────────────────────────────────────────────────────────────────────────────
// Career-Alignment
// ────────────────────────────────────────────────────────────────────────────

pub fn career_alignment_label(value: u32) -> &'static str {
    match value {
        v if v >= 80 => "High",
        v if v >= 60 => "Medium",
        v if v >= 40 => "Low",
        _ => "Minimal",
    }
}

/// A keyword block counts when it appears in both the goal text and the
/// job's title + description.
pub fn career_alignment(candidate: &CandidateProfile, job: &JobRequirements) -> SubScore {
    let goal = candidate.career_goal_text.to_lowercase();
    let mut evidence = Vec::new();

    if goal.trim().is_empty() {
        evidence.push(career_alignment_label(0).to_string());
        evidence.push("no career goal provided".to_string());
        return SubScore::new(SubScoreName::CareerAlignment, 0, evidence);
    }

    let job_text = format!("{} {}", job.title, job.description).to_lowercase();
    let mut total = CAREER_BASELINE;

    if let Some(kw) = shared_keyword(&goal, &job_text, ROLE_FAMILY_KEYWORDS) {
        total += CAREER_ROLE_FAMILY_BLOCK;
        evidence.push(format!("role family: {kw}"));
    }
    if let Some(kw) = shared_keyword(&goal, &job_text, TECHNOLOGY_KEYWORDS) {
        total += CAREER_TECHNOLOGY_BLOCK;
        evidence.push(format!("technology focus: {kw}"));
    }

    let value = total.min(100);
    evidence.insert(0, career_alignment_label(value).to_string());
    SubScore::new(SubScoreName::CareerAlignment, value, evidence)
}

// ────────────────────────────────────────────────────────────────────────────
// Market-Demand
// ────────────────────────────────────────────────────────────────────────────

/// A required skill is high-demand when it names a reference entry, e.g.
/// "mysql" contains "sql". Containment only runs this way: a short skill such
/// as "c" must not match "javascript".
pub fn is_high_demand(skill: &str) -> bool {
    !skill.is_empty() && HIGH_DEMAND_SKILLS.iter().any(|h| skill.contains(h))
}

/// 0.0 – 1.0. Each required skill on the high-demand list adds a fixed increment.
pub fn market_demand_factor(job: &JobRequirements) -> f64 {
    let hits = normalize(&job.required_skills)
        .iter()
        .filter(|s| is_high_demand(s))
        .count();
    (hits as f64 * MARKET_DEMAND_INCREMENT).clamp(0.0, 1.0)
}

pub fn market_demand(_candidate: &CandidateProfile, job: &JobRequirements) -> SubScore {
    let factor = market_demand_factor(job);
    let evidence: Vec<String> = normalize(&job.required_skills)
        .into_iter()
        .filter(|s| is_high_demand(s))
        .map(|s| format!("high demand: {s}"))
        .collect();

    SubScore::new(
        SubScoreName::MarketDemand,
        (factor * 100.0).round() as u32,
        evidence,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn first_keyword(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|kw| text.contains(kw))
}

fn shared_keyword(a: &str, b: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords
        .iter()
        .copied()
        .find(|kw| a.contains(kw) && b.contains(kw))
}
