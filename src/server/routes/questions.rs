use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    error::{ApiError, ApiResult},
    server::{app::AppState, deserializers::PageQuery},
    trivia::{category_map, paginate},
};

use super::unprocessable;

#[derive(Debug, Default, Deserialize)]
struct QuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    // the web form posts numbers as strings
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl QuestionBody {
    fn validate(self) -> ApiResult<NewQuestion> {
        // blank text is rejected, but stored exactly as sent
        let text = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(ApiError::BadRequest)
        };
        Ok(NewQuestion {
            question: text(self.question)?,
            answer: text(self.answer)?,
            category: self.category.ok_or(ApiError::BadRequest)?,
            difficulty: self.difficulty.ok_or(ApiError::BadRequest)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchBody {
    #[serde(default, rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
    question: Vec<Question>,
    total_question: usize,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResult<Json<QuestionsPage>> {
    let all = questions::get_all_questions(&pool).await?;
    let current = paginate(&all, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: all.len(),
        categories: category_map(get_all_categories(&pool).await?),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResult<Json<DeletedResponse>> {
    let Path(id) = id?;
    if questions::get_question_by_id(&pool, id)
        .await
        .map_err(unprocessable)?
        .is_none()
    {
        tracing::info!("Question {id} does not exist, nothing to delete");
        return Err(ApiError::Unprocessable);
    }

    questions::delete_question(&pool, id)
        .await
        .map_err(unprocessable)?;
    tracing::info!("Deleted question {id}");

    let remaining = questions::get_all_questions(&pool)
        .await
        .map_err(unprocessable)?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        question: paginate(&remaining, page).to_vec(),
        total_question: remaining.len(),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    body: Result<Json<QuestionBody>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(body) = body?;
    let new_question = body.validate()?;

    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(unprocessable)?;
    tracing::info!("Created question {id}");

    let all = questions::get_all_questions(&pool)
        .await
        .map_err(unprocessable)?;
    Ok(Json(CreatedResponse {
        success: true,
        created: id,
        questions: paginate(&all, page).to_vec(),
        total_questions: all.len(),
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(body) = body?;
    let term = body.search_term.unwrap_or_default();
    let matching = questions::search_questions(&pool, &term).await?;
    if matching.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: paginate(&matching, page).to_vec(),
        total_questions: matching.len(),
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
