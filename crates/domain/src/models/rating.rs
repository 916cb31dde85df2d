//! Event rating domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user's 1-5 rating of an event. Unique per (event, user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/ratings`. Resubmitting replaces the rating.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub event_id: Uuid,

    pub user_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i16,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

/// Ratings for one event plus their mean.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRatings {
    pub success: bool,
    pub count: usize,
    pub average_score: Option<f64>,
    pub data: Vec<Rating>,
}

impl EventRatings {
    pub fn new(ratings: Vec<Rating>) -> Self {
        let average_score = if ratings.is_empty() {
            None
        } else {
            let total: i64 = ratings.iter().map(|r| i64::from(r.score)).sum();
            Some(total as f64 / ratings.len() as f64)
        };
        Self {
            success: true,
            count: ratings.len(),
            average_score,
            data: ratings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(score: i16) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            user_id: Uuid::new_v4(),
            score,
            comment: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_submit_rating_range() {
        let mut request = SubmitRatingRequest {
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            score: 5,
            comment: Some("Great".to_string()),
        };
        assert!(request.validate().is_ok());
        request.score = 0;
        assert!(request.validate().is_err());
        request.score = 6;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_event_ratings_average() {
        let summary = EventRatings::new(vec![rating(4), rating(5), rating(3)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average_score, Some(4.0));
    }

    #[test]
    fn test_event_ratings_empty() {
        let summary = EventRatings::new(vec![]);
        assert_eq!(summary.count, 0);
        assert!(summary.average_score.is_none());
    }
}
