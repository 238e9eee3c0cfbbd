//! Skill normalization and permissive containment matching.

/// Lower-cases, trims, and de-duplicates skills. Blank entries are dropped.
///
/// Order of first occurrence is preserved so downstream evidence and
/// missing-skill lists follow the caller's ordering.
pub fn normalize<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let normalized = normalize_one(skill.as_ref());
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

pub fn normalize_one(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// True if either normalized skill contains the other.
///
/// Intentionally permissive: "React" matches "React.js" and "ReactJS".
/// Blank input never matches.
pub fn skills_overlap(a: &str, b: &str) -> bool {
    let a = normalize_one(a);
    let b = normalize_one(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}
