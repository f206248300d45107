use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_quiz_candidates, Question},
    error::ApiResult,
    server::{app::AppState, deserializers::deserialize_ids_or_null},
    telemetry::QUIZ_QUESTIONS_SERVED,
    trivia::{QuizFilter, QuizRng},
};

const NO_MATCH_MESSAGE: &str = "No matching questions found.";

#[derive(Debug, Default, Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizBody {
    #[serde(
        default,
        alias = "previous_questions",
        deserialize_with = "deserialize_ids_or_null"
    )]
    previous_question: Vec<i64>,
    #[serde(default, alias = "quiz_category")]
    category: Option<QuizCategory>,
}

impl QuizBody {
    fn into_filter(self) -> QuizFilter {
        QuizFilter::new(self.category.and_then(|c| c.id), self.previous_question)
    }
}

/// An exhausted pool is reported in the body, not through the status code.
#[derive(Debug, Serialize)]
struct QuizResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    State(rng): State<QuizRng>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let Json(body) = body?;
    let filter = body.into_filter();
    let candidates = get_quiz_candidates(&pool, &filter).await?;

    let response = match rng.choose(&candidates) {
        Some(question) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[question.category.to_string().as_str()])
                .inc();
            QuizResponse {
                success: true,
                question: Some(question.clone()),
                message: None,
            }
        }
        None => {
            tracing::info!("No quiz questions left for {filter:?}");
            QuizResponse {
                success: false,
                question: None,
                message: Some(NO_MATCH_MESSAGE),
            }
        }
    };
    Ok(Json(response))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_quiz_question))
}
