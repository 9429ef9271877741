use uuid::Uuid;

use crate::admin::dto::{AdminSwapRequestView, ModerationSummary, Report};
use crate::error::ApiError;
use crate::store::{Database, SwapStatus};

pub fn set_banned(db: &mut Database, user_id: Uuid, banned: bool) -> Result<(), ApiError> {
    let user = db
        .user_by_id_mut(user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    user.banned = banned;
    Ok(())
}

pub fn list_swap_requests(db: &Database) -> Vec<AdminSwapRequestView> {
    db.swap_requests
        .iter()
        .map(|sr| AdminSwapRequestView {
            request: sr.clone(),
            from_user: db.user_by_id(sr.from_user_id).map(ModerationSummary::from),
            to_user: db.user_by_id(sr.to_user_id).map(ModerationSummary::from),
        })
        .collect()
}

/// Full-collection scan; fine at this scale.
pub fn report(db: &Database) -> Report {
    let count_status = |s: SwapStatus| db.swap_requests.iter().filter(|sr| sr.status == s).count();
    let average_rating = if db.ratings.is_empty() {
        0.0
    } else {
        db.ratings.iter().map(|r| r.rating as f64).sum::<f64>() / db.ratings.len() as f64
    };
    Report {
        total_users: db.users.len(),
        total_swap_requests: db.swap_requests.len(),
        pending_requests: count_status(SwapStatus::Pending),
        accepted_requests: count_status(SwapStatus::Accepted),
        rejected_requests: count_status(SwapStatus::Rejected),
        total_ratings: db.ratings.len(),
        average_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Rating, SwapRequest, User};
    use axum::http::StatusCode;
    use time::OffsetDateTime;

    fn user(name: &str) -> User {
        User::new(
            Uuid::new_v4(),
            format!("{}@x.y", name.to_lowercase()),
            "h".into(),
            name.into(),
            "".into(),
        )
    }

    fn request(from: Uuid, to: Uuid, status: SwapStatus) -> SwapRequest {
        SwapRequest {
            id: Uuid::new_v4(),
            from_user_id: from,
            to_user_id: to,
            offered_skill: "x".into(),
            requested_skill: "y".into(),
            message: None,
            status,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn set_banned_flips_the_flag() {
        let mut db = Database::default();
        let u = user("A");
        let id = u.id;
        db.users.push(u);

        set_banned(&mut db, id, true).unwrap();
        assert!(db.user_by_id(id).unwrap().banned);
        set_banned(&mut db, id, false).unwrap();
        assert!(!db.user_by_id(id).unwrap().banned);

        let err = set_banned(&mut db, Uuid::new_v4(), true).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn moderation_view_includes_emails() {
        let mut db = Database::default();
        let a = user("A");
        let b = user("B");
        let (ia, ib) = (a.id, b.id);
        db.users.extend([a, b]);
        db.swap_requests.push(request(ia, ib, SwapStatus::Pending));

        let views = list_swap_requests(&db);
        assert_eq!(views[0].from_user.as_ref().unwrap().email, "a@x.y");
        assert_eq!(views[0].to_user.as_ref().unwrap().email, "b@x.y");
    }

    #[test]
    fn report_counts_per_status_and_averages_ratings() {
        let mut db = Database::default();
        let a = user("A");
        let b = user("B");
        let (ia, ib) = (a.id, b.id);
        db.users.extend([a, b]);
        db.swap_requests.push(request(ia, ib, SwapStatus::Pending));
        db.swap_requests.push(request(ia, ib, SwapStatus::Accepted));
        db.swap_requests.push(request(ib, ia, SwapStatus::Accepted));
        for value in [2u8, 4u8] {
            db.ratings.push(Rating {
                id: Uuid::new_v4(),
                from_user_id: ia,
                to_user_id: ib,
                rating: value,
                feedback: None,
                swap_request_id: None,
                created_at: OffsetDateTime::now_utc(),
            });
        }

        let r = report(&db);
        assert_eq!(r.total_users, 2);
        assert_eq!(r.total_swap_requests, 3);
        assert_eq!(r.pending_requests, 1);
        assert_eq!(r.accepted_requests, 2);
        assert_eq!(r.rejected_requests, 0);
        assert_eq!(r.total_ratings, 2);
        assert_eq!(r.average_rating, 3.0);
    }

    #[test]
    fn empty_report_has_zero_average() {
        let r = report(&Database::default());
        assert_eq!(r.average_rating, 0.0);
        assert_eq!(r.total_users, 0);
    }
}
