mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::error::ApiError;

// create/delete report every store failure as unprocessable
fn unprocessable(error: sqlx::Error) -> ApiError {
    tracing::error!("Store failure during mutation: {error}");
    ApiError::Unprocessable
}
