//! Swap-request lifecycle: `pending` on creation, moved to `accepted` or
//! `rejected` by a participant, deletable by the sender only.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{Database, SwapRequest, SwapStatus};
use crate::swaps::dto::{CreateSwapRequest, SwapRequestView, UserSummary};

pub fn create(
    db: &mut Database,
    from_user_id: Uuid,
    req: CreateSwapRequest,
) -> Result<SwapRequest, ApiError> {
    if db.user_by_id(req.target_user_id).is_none() {
        return Err(ApiError::NotFound("Target user not found".into()));
    }
    let request = SwapRequest {
        id: Uuid::new_v4(),
        from_user_id,
        to_user_id: req.target_user_id,
        offered_skill: req.offered_skill,
        requested_skill: req.requested_skill,
        message: req.message,
        status: SwapStatus::Pending,
        created_at: OffsetDateTime::now_utc(),
        updated_at: None,
    };
    db.swap_requests.push(request.clone());
    Ok(request)
}

/// Every request where `user_id` is either side, enriched with counterpart
/// summaries resolved at read time.
pub fn list_for(db: &Database, user_id: Uuid) -> Vec<SwapRequestView> {
    db.swap_requests
        .iter()
        .filter(|sr| sr.from_user_id == user_id || sr.to_user_id == user_id)
        .map(|sr| SwapRequestView {
            request: sr.clone(),
            from_user: db.user_by_id(sr.from_user_id).map(UserSummary::from),
            to_user: db.user_by_id(sr.to_user_id).map(UserSummary::from),
        })
        .collect()
}

/// Set the status of a request. Only participants may act; with
/// `recipient_only` the acting user must additionally be the recipient.
pub fn set_status(
    db: &mut Database,
    request_id: Uuid,
    status: SwapStatus,
    acting_user_id: Uuid,
    recipient_only: bool,
) -> Result<SwapRequest, ApiError> {
    let sr = db
        .swap_requests
        .iter_mut()
        .find(|sr| sr.id == request_id)
        .ok_or_else(|| ApiError::NotFound("Swap request not found".into()))?;

    if sr.from_user_id != acting_user_id && sr.to_user_id != acting_user_id {
        return Err(ApiError::Forbidden("Not authorized".into()));
    }
    if recipient_only && sr.to_user_id != acting_user_id {
        return Err(ApiError::Forbidden(
            "Only the recipient can update this request".into(),
        ));
    }

    sr.status = status;
    sr.updated_at = Some(OffsetDateTime::now_utc());
    Ok(sr.clone())
}

/// Permanently remove a request; only the sender may do this.
pub fn delete(db: &mut Database, request_id: Uuid, acting_user_id: Uuid) -> Result<(), ApiError> {
    let idx = db
        .swap_requests
        .iter()
        .position(|sr| sr.id == request_id)
        .ok_or_else(|| ApiError::NotFound("Swap request not found".into()))?;

    if db.swap_requests[idx].from_user_id != acting_user_id {
        return Err(ApiError::Forbidden("Not authorized".into()));
    }

    db.swap_requests.remove(idx);
    Ok(())
}
