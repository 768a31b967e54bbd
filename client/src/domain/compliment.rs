//! Compliment records: peer recognition carrying points.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ComplimentId, TenantId, UserId};

/// A compliment as returned by the backend.
///
/// Compliments are soft-deleted (`deleted_at`) and `viewed_at` stays null
/// until the recipient marks them viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compliment {
    pub id: ComplimentId,
    pub title: String,
    pub description: String,
    pub points: i32,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub tenant_id: TenantId,
    pub created_at: DateTime<Utc>,
    pub created_by_id: UserId,
    pub updated_at: DateTime<Utc>,
    pub updated_by_id: Option<UserId>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub viewed_at: Option<DateTime<Utc>>,
}

impl Compliment {
    /// Whether the recipient has opened this compliment.
    pub fn is_viewed(&self) -> bool {
        self.viewed_at.is_some()
    }
}

/// A compliment joined with its sender's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplimentWithSender {
    #[serde(flatten)]
    pub compliment: Compliment,
    pub from_user_name: Option<String>,
}

/// Validation errors returned by [`NewCompliment::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplimentValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Points must be a positive integer.
    NonPositivePoints { points: i32 },
}

impl fmt::Display for ComplimentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "compliment title must not be empty"),
            Self::NonPositivePoints { points } => {
                write!(f, "compliment points must be positive, got {points}")
            }
        }
    }
}

impl std::error::Error for ComplimentValidationError {}

/// Body of `POST /api/v1/compliments`.
///
/// ## Invariants
/// - `title` is non-blank.
/// - `points > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCompliment {
    title: String,
    description: String,
    points: i32,
    to_user_id: UserId,
}

impl NewCompliment {
    /// Validate and build a compliment for `to_user_id`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        points: i32,
        to_user_id: UserId,
    ) -> Result<Self, ComplimentValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ComplimentValidationError::EmptyTitle);
        }
        if points <= 0 {
            return Err(ComplimentValidationError::NonPositivePoints { points });
        }
        Ok(Self {
            title,
            description: description.into(),
            points,
            to_user_id,
        })
    }

    /// Recipient of the compliment.
    pub fn to_user_id(&self) -> UserId {
        self.to_user_id
    }

    /// Points awarded.
    pub fn points(&self) -> i32 {
        self.points
    }
}

/// Body of `POST /api/v1/compliments/mark-viewed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkViewed {
    pub ids: Vec<ComplimentId>,
}
