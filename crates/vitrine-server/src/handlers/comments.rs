//! Handlers for `/api/comments` and the contact board.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/comments/{itemType}/{itemId}` | Most recent first |
//! | `POST` | `/api/comments` | Session author when signed in, else guest name/email |
//! | `DELETE` | `/api/admin/comments/{id}` | Admin only |
//! | `POST` | `/api/contact` | Stores an anonymous comment on the contact board |
//! | `GET`  | `/api/contact/comments?limit=N` | Recent contact comments, default 5 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use vitrine_core::{
  interaction::{Comment, CommentAuthor, ItemKind, ItemRef, NewComment},
  store::PortfolioStore,
};

use crate::{
  AppState,
  auth::{AdminUser, MaybeUser},
  error::Error,
  handlers::Message,
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/comments`. The author fields are only
/// consulted for signed-out callers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
  pub item_type:    ItemKind,
  pub item_id:      String,
  pub content:      String,
  pub parent_id:    Option<Uuid>,
  pub author_name:  Option<String>,
  pub author_email: Option<String>,
}

/// `POST /api/comments` — returns 201 + the stored comment.
pub async fn create<S>(
  MaybeUser(viewer): MaybeUser,
  State(state): State<AppState<S>>,
  Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let author = match viewer {
    Some(user) => CommentAuthor::Registered { user_id: user.id },
    None => CommentAuthor::Guest {
      name:  body.author_name.unwrap_or_default(),
      email: body.author_email.unwrap_or_default(),
    },
  };

  let draft = NewComment {
    item:      ItemRef::new(body.item_type, body.item_id),
    content:   body.content,
    author,
    parent_id: body.parent_id,
  };
  // Fail structural problems with a 400 here; the store re-checks on insert.
  draft.validate()?;

  let comment = state
    .store
    .add_comment(draft)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(comment)))
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /api/comments/{itemType}/{itemId}`
pub async fn list_for_item<S>(
  State(state): State<AppState<S>>,
  Path((item_type, item_id)): Path<(ItemKind, String)>,
) -> Result<Json<Vec<Comment>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let comments = state
    .store
    .list_comments(ItemRef::new(item_type, item_id), None)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(comments))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
  pub limit: Option<usize>,
}

/// `GET /api/contact/comments?limit=N`
pub async fn recent_contact<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Comment>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let limit = params.limit.unwrap_or(5);
  let comments = state
    .store
    .list_comments(ItemRef::contact_board(), Some(limit))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(comments))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/admin/comments/{id}` — admin only. (Earlier revisions let any
/// signed-in account delete any comment; that was an authorization hole, not
/// a feature.)
pub async fn delete<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Message>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_comment(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if !deleted {
    return Err(Error::NotFound("Comment not found".to_string()));
  }
  Ok(Message::new("Comment deleted successfully"))
}

// ─── Contact form ─────────────────────────────────────────────────────────────

/// All fields optional at the serde layer so absences report as the expected
/// 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  pub name:    Option<String>,
  pub email:   Option<String>,
  pub subject: Option<String>,
  pub message: Option<String>,
}

/// `POST /api/contact` — stores the submission as an anonymous comment on the
/// contact board.
pub async fn contact<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ContactBody>,
) -> Result<Json<Message>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let required = [&body.name, &body.email, &body.subject, &body.message];
  if required
    .iter()
    .any(|f| f.as_deref().map_or(true, |v| v.trim().is_empty()))
  {
    return Err(Error::Validation("All fields are required".to_string()));
  }

  let (name, email) = (body.name.unwrap_or_default(), body.email.unwrap_or_default());
  let (subject, message) =
    (body.subject.unwrap_or_default(), body.message.unwrap_or_default());

  let draft = NewComment {
    item:      ItemRef::contact_board(),
    content:   format!("**Assunto:** {subject}\n\n{message}"),
    author:    CommentAuthor::Guest { name, email },
    parent_id: None,
  };

  state
    .store
    .add_comment(draft)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  Ok(Message::new("Message sent successfully"))
}
