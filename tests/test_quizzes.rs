//! Quiz draw tests

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{assert_error, get, get_text, post, send, setup};
use serde_json::json;

#[tokio::test]
async fn draw_respects_category_and_previous_questions() {
    let app = setup().await;
    let (status, body) = post(
        &app,
        "/quizzes",
        json!({"previous_question": [2, 14], "category": {"id": 4, "type": "History"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let question = &body["question"];
    assert_eq!(question["category"], 4);
    assert_ne!(question["id"], 2);
    assert_ne!(question["id"], 14);
    assert!(body.get("total_question").is_none());
}

#[tokio::test]
async fn repeated_draws_cover_every_eligible_question() {
    let app = setup().await;
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let (_, body) = post(
            &app,
            "/quizzes",
            json!({"previous_question": [5], "category": {"id": 4, "type": "History"}}),
        )
        .await;
        seen.insert(body["question"]["id"].as_i64().unwrap());
    }
    assert_eq!(seen, HashSet::from([9, 12, 23]));
}

#[tokio::test]
async fn playing_through_a_category_never_repeats() {
    let app = setup().await;
    let mut previous: Vec<i64> = Vec::new();
    loop {
        let (status, body) = post(
            &app,
            "/quizzes",
            json!({"previous_question": previous, "category": {"id": 3, "type": "Geography"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        if body["success"] == false {
            assert_eq!(body["message"], "No matching questions found.");
            assert!(body.get("question").is_none());
            break;
        }
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        previous.push(id);
    }
    previous.sort_unstable();
    assert_eq!(previous, vec![13, 14, 15]);
}

#[tokio::test]
async fn any_category_draws_from_all_questions() {
    let app = setup().await;
    let mut categories = HashSet::new();
    for _ in 0..200 {
        let (_, body) = post(
            &app,
            "/quizzes",
            json!({"previous_question": [], "category": {"id": 0, "type": "click"}}),
        )
        .await;
        assert_eq!(body["success"], true);
        categories.insert(body["question"]["category"].as_i64().unwrap());
    }
    assert_eq!(categories.len(), 6);

    let (status, body) = post(&app, "/quizzes", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn unknown_category_reports_no_match() {
    let app = setup().await;
    let (status, body) = post(
        &app,
        "/quizzes",
        json!({"previous_question": [], "category": {"id": 42, "type": "Cooking"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No matching questions found.");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = setup().await;
    let (status, body) = send(&app, axum::http::Method::POST, "/quizzes", None).await;
    assert_error(status, &body, 400, "bad request");
}

#[tokio::test]
async fn quiz_only_accepts_post() {
    let app = setup().await;
    let (status, body) = get(&app, "/quizzes").await;
    assert_error(status, &body, 405, "method not allowed");
}

fn served_count(metrics: &str, category: &str) -> f64 {
    let prefix = format!("quiz_questions_served_total{{category=\"{category}\"}} ");
    metrics
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|value| value.trim().parse().unwrap())
        .unwrap_or(0.0)
}

#[tokio::test]
async fn served_questions_are_counted() {
    let app = setup().await;
    let (_, before) = get_text(&app, "/metrics").await;
    let before = served_count(&before, "6");

    let (_, body) = post(&app, "/quizzes", json!({"category": {"id": 6}})).await;
    assert_eq!(body["question"]["category"], 6);

    let (status, after) = get_text(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(after.contains("quiz_questions_served_total{category=\"6\"}"));
    assert!(served_count(&after, "6") >= before + 1.0);
}

#[tokio::test]
async fn huge_previous_list_still_draws() {
    let app = setup().await;
    let mut previous: Vec<i64> = (100..40_100).collect();
    previous.extend([5, 9, 5]);

    let (status, body) = post(
        &app,
        "/quizzes",
        json!({"previous_question": previous, "category": {"id": 4}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["question"]["id"].as_i64().unwrap();
    assert!(id == 12 || id == 23, "unexpected question {id}");

    previous.extend([12, 23]);
    let (status, body) = post(
        &app,
        "/quizzes",
        json!({"previous_question": previous, "category": {"id": 4}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}
