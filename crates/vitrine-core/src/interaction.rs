//! Likes and comments — per-item interaction records.
//!
//! Both address their target through an [`ItemRef`]: a typed kind plus an
//! uninterpreted id string. The store never checks the id against an entity
//! table, so interactions may outlive (or predate) the item they point at;
//! the contact board uses the well-known id `"general"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Item addressing ─────────────────────────────────────────────────────────

/// The kind of entity an interaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  Project,
  Experience,
  Achievement,
  Contact,
}

/// Addresses the target of a like or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
  pub item_type: ItemKind,
  pub item_id:   String,
}

impl ItemRef {
  pub fn new(item_type: ItemKind, item_id: impl Into<String>) -> Self {
    Self { item_type, item_id: item_id.into() }
  }

  /// The contact board — a single well-known pseudo-item.
  pub fn contact_board() -> Self { Self::new(ItemKind::Contact, "general") }
}

// ─── Likes ───────────────────────────────────────────────────────────────────

// A like is a bare `(user, item)` row with toggle semantics; no Rust-side
// record type is needed beyond the status read model below.

/// Read model for an item's like state. `count` is always a live count of
/// rows — no denormalized counter exists to drift.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
  pub count:      u64,
  pub user_liked: bool,
}

// ─── Comments ────────────────────────────────────────────────────────────────

/// Who wrote a comment: a signed-in account, or a free-text name/email pair.
/// Exactly one mode — never both, never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAuthor {
  Registered { user_id: Uuid },
  Guest { name: String, email: String },
}

impl CommentAuthor {
  pub fn validate(&self) -> Result<()> {
    match self {
      Self::Registered { .. } => Ok(()),
      Self::Guest { name, email } => {
        if name.trim().is_empty() || email.trim().is_empty() {
          return Err(Error::Validation(
            "anonymous comments require both name and email".to_string(),
          ));
        }
        Ok(())
      }
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id:           Uuid,
  pub user_id:      Option<Uuid>,
  pub author_name:  Option<String>,
  pub author_email: Option<String>,
  #[serde(flatten)]
  pub item:         ItemRef,
  pub content:      String,
  /// Optional threading parent. Accepted and stored without referential
  /// or cycle checks.
  pub parent_id:    Option<Uuid>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::add_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
  pub item:      ItemRef,
  pub content:   String,
  pub author:    CommentAuthor,
  pub parent_id: Option<Uuid>,
}

impl NewComment {
  /// Structural checks applied by the store before insertion.
  pub fn validate(&self) -> Result<()> {
    if self.content.trim().is_empty() {
      return Err(Error::Validation("comment content must not be empty".to_string()));
    }
    self.author.validate()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guest_author_requires_name_and_email() {
    let missing_name = CommentAuthor::Guest {
      name:  "".to_string(),
      email: "x@example.com".to_string(),
    };
    assert!(missing_name.validate().is_err());

    let missing_email = CommentAuthor::Guest {
      name:  "Alice".to_string(),
      email: "   ".to_string(),
    };
    assert!(missing_email.validate().is_err());

    let complete = CommentAuthor::Guest {
      name:  "Alice".to_string(),
      email: "x@example.com".to_string(),
    };
    assert!(complete.validate().is_ok());
  }

  #[test]
  fn registered_author_always_valid() {
    let author = CommentAuthor::Registered { user_id: Uuid::new_v4() };
    assert!(author.validate().is_ok());
  }

  #[test]
  fn empty_content_rejected() {
    let draft = NewComment {
      item:      ItemRef::new(ItemKind::Project, "abc"),
      content:   "  \n".to_string(),
      author:    CommentAuthor::Registered { user_id: Uuid::new_v4() },
      parent_id: None,
    };
    assert!(matches!(draft.validate(), Err(Error::Validation(_))));
  }
}
