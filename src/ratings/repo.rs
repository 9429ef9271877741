//! Rating submission and the derived reputation fields. The invariant
//! maintained here: `user.rating == mean(ratings where toUserId == user.id)`
//! and `user.total_ratings == count(..)`, recomputed on every submission.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::ratings::dto::{RaterSummary, RatingView, SubmitRatingRequest};
use crate::store::{Database, Rating};

pub fn submit(
    db: &mut Database,
    from_user_id: Uuid,
    req: SubmitRatingRequest,
) -> Result<Rating, ApiError> {
    if db.user_by_id(req.target_user_id).is_none() {
        return Err(ApiError::NotFound("Target user not found".into()));
    }
    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::BadRequest("Rating must be between 1 and 5".into()));
    }

    let rating = Rating {
        id: Uuid::new_v4(),
        from_user_id,
        to_user_id: req.target_user_id,
        rating: req.rating,
        feedback: req.feedback,
        swap_request_id: req.swap_request_id,
        created_at: OffsetDateTime::now_utc(),
    };
    db.ratings.push(rating.clone());
    recompute(db, req.target_user_id);
    Ok(rating)
}

fn recompute(db: &mut Database, target: Uuid) {
    let targeting: Vec<u8> = db
        .ratings
        .iter()
        .filter(|r| r.to_user_id == target)
        .map(|r| r.rating)
        .collect();
    if let Some(user) = db.user_by_id_mut(target) {
        user.total_ratings = targeting.len() as u64;
        user.rating = if targeting.is_empty() {
            0.0
        } else {
            targeting.iter().map(|&r| r as f64).sum::<f64>() / targeting.len() as f64
        };
    }
}

/// All ratings targeting `target`, enriched with each rater's identity.
pub fn list_for(db: &Database, target: Uuid) -> Vec<RatingView> {
    db.ratings
        .iter()
        .filter(|r| r.to_user_id == target)
        .map(|r| RatingView {
            rating: r.clone(),
            from_user: db.user_by_id(r.from_user_id).map(RaterSummary::from),
        })
        .collect()
}
