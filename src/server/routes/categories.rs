use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Question,
    },
    error::ApiResult,
    server::app::AppState,
    trivia::category_map,
};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_category: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = category_map(get_all_categories(&pool).await?);
    Ok(Json(CategoriesResponse {
        success: true,
        total_category: categories.len(),
        categories,
    }))
}

// unknown categories simply have no questions
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let Path(id) = id?;
    let questions = get_questions_for_category(&pool, id).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
