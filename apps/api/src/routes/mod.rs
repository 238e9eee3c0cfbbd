pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match", post(handlers::handle_match))
        .route(
            "/api/v1/match/deterministic",
            post(handlers::handle_match_deterministic),
        )
        .route("/api/v1/match/profiles", get(handlers::handle_list_profiles))
        .route("/api/v1/rankings", post(handlers::handle_rank_candidates))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::engine::EngineSet;
    use crate::matching::orchestrator::FallbackOrchestrator;

    fn app() -> Router {
        build_router(AppState {
            engines: Arc::new(EngineSet::new().unwrap()),
            orchestrator: FallbackOrchestrator::deterministic_only(),
            config: Config::default(),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn match_body() -> Value {
        json!({
            "candidate": {
                "skills": ["React", "Node.js"],
                "experience_years": 1,
                "experience_level": "entry",
                "narrative_text": "Built a todo app",
                "career_goal_text": "frontend developer",
                "profile_completeness": 60
            },
            "job": {
                "title": "Lead Frontend Developer",
                "required_skills": ["react", "node.js", "mongodb"],
                "description": "React and Node.js",
                "experience_level": "lead"
            }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) =
            send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai_enrichment"], false);
    }

    #[tokio::test]
    async fn test_match_without_ai_is_deterministic() {
        let (status, body) = send(post_json("/api/v1/match", match_body())).await;
        assert_eq!(status, StatusCode::OK);

        let result = &body["result"];
        assert_eq!(result["source"], "deterministic");
        assert_eq!(result["matched_skills"], json!(["react", "node.js"]));
        assert_eq!(result["missing_skills"], json!(["mongodb"]));
        assert_eq!(result["sub_scores"]["skill_match"]["value"], 67);
        assert_eq!(result["sub_scores"]["experience_fit"]["value"], 40);
        assert_eq!(result["sub_scores"]["experience_fit"]["evidence"][0], "Stretch");
        assert_eq!(body["profile"], "job_match");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_deterministic_endpoint_honours_profile() {
        let mut req = match_body();
        req["profile"] = json!("screening");
        let (status, body) = send(post_json("/api/v1/match/deterministic", req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"], "screening");
        assert_eq!(body["result"]["profile"], "screening");
    }

    #[tokio::test]
    async fn test_empty_required_skills_scores_zero() {
        let mut req = match_body();
        req["job"]["required_skills"] = json!([]);
        let (status, body) = send(post_json("/api/v1/match", req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["sub_scores"]["skill_match"]["value"], 0);
    }

    #[tokio::test]
    async fn test_rankings_reject_empty_list() {
        let req = json!({ "job": match_body()["job"], "candidates": [] });
        let (status, body) = send(post_json("/api/v1/rankings", req)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rankings_reject_duplicate_ids() {
        let candidate = match_body()["candidate"].clone();
        let req = json!({
            "job": match_body()["job"],
            "candidates": [
                { "candidate_id": "c1", "candidate": candidate },
                { "candidate_id": "c1", "candidate": candidate }
            ]
        });
        let (status, _) = send(post_json("/api/v1/rankings", req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rankings_sorted() {
        let strong = match_body()["candidate"].clone();
        let req = json!({
            "job": match_body()["job"],
            "candidates": [
                { "candidate_id": "weak", "candidate": { "skills": ["cobol"] } },
                { "candidate_id": "strong", "candidate": strong }
            ]
        });
        let (status, body) = send(post_json("/api/v1/rankings", req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"], "candidate_ranking");
        assert_eq!(body["rankings"][0]["candidate_id"], "strong");
        assert_eq!(body["rankings"][0]["rank"], 1);
        assert_eq!(body["rankings"][1]["candidate_id"], "weak");
    }

    #[tokio::test]
    async fn test_profiles_listed() {
        let (status, body) = send(
            Request::get("/api/v1/match/profiles")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let profiles = body.as_array().unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0]["profile"], "job_match");
        assert_eq!(profiles[0]["weights"]["skill_match"], 0.35);
        assert_eq!(profiles[0]["grade_bands"][0]["grade"], "A+");
    }
}
