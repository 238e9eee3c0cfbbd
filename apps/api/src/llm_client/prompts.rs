// Cross-cutting prompt fragments shared by every service that calls the
// text-generation collaborator. Service-specific prompts live alongside
// the service (see matching/prompts.rs).

/// Keeps the model from inventing candidate qualifications.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Base every judgement only on the candidate and job data provided. \
    Do NOT infer skills, experience, or achievements that are not stated. \
    If the data does not support a claim, omit it.";
