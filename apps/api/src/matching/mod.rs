// Candidate / job compatibility engine.
// Pipeline: skills → sub_scores → composite → recommendations, wrapped by the
// orchestrator which optionally overlays an AI assessment via llm_client.

pub mod composite;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod recommendations;
pub mod skills;
pub mod sub_scores;
