// Prompt constants for AI-enriched match scoring.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for match enrichment. Enforces JSON-only output.
pub const MATCH_SYSTEM: &str = "You are an expert technical recruiter assessing how well \
    a candidate fits a job. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Match prompt template.
/// Replace: {grounding_instruction}, {candidate_json}, {job_json}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

Assess the compatibility of this candidate with this job.

CANDIDATE:
{candidate_json}

JOB:
{job_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "overall_score": 78,
  "matched_skills": ["react", "node.js"],
  "missing_skills": ["mongodb"],
  "rationale": "Two to four sentences explaining the score.",
  "strengths": ["Short strength statement"],
  "weaknesses": ["Short weakness statement"]
}

Rules:
1. `overall_score` is an integer from 0 to 100
2. `matched_skills` and `missing_skills` only contain entries from the job's required_skills
3. `rationale` must not be empty
4. `strengths` and `weaknesses` hold at most 4 entries each"#;
