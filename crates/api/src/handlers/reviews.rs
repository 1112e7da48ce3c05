//! Handler for public review submission.

use axum::extract::State;
use axum::Json;
use superfix_core::error::CoreError;
use superfix_core::rating::validate_rating;
use superfix_core::validation::{validate_required, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH};
use superfix_db::models::review::CreateReview;
use superfix_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::response::AckResponse;
use crate::state::AppState;

/// POST /api/reviews
///
/// A 5-star review also raises the hero's trust factor, in the same
/// transaction as the insert.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<Json<AckResponse>> {
    validate_rating(input.rating)?;
    validate_required("clientName", &input.client_name, MAX_SHORT_TEXT_LENGTH)?;
    if input.comment.len() > MAX_LONG_TEXT_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "comment must be at most {MAX_LONG_TEXT_LENGTH} characters"
        ))));
    }

    let review = ReviewRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Hero",
            id: input.hero_id,
        }))?;

    tracing::info!(
        review_id = review.id,
        hero_id = review.hero_id,
        rating = review.rating,
        "Review submitted"
    );
    Ok(Json(AckResponse::created(review.id)))
}
