//! The `PortfolioStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `vitrine-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  content::ContentEntry,
  entity::{
    Achievement, Experience, NewAchievement, NewExperience, NewProject,
    Project, ProjectFilter,
  },
  interaction::{Comment, ItemRef, LikeStatus, NewComment},
  session::Session,
  slug::SlugKind,
  upload::{NewStoredFile, StoredFile},
  user::{NewUser, ProfileUpdate, User},
};

/// Abstraction over a Vitrine storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Multi-statement
/// writes (notably [`toggle_like`](Self::toggle_like)) must be atomic.
pub trait PortfolioStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist an account. Fails if the email is taken.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The portfolio owner's account, if one has been bootstrapped.
  fn find_admin(
    &self,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Replace the profile fields of an account. Returns `None` if the
  /// account does not exist.
  fn update_profile(
    &self,
    id: Uuid,
    update: ProfileUpdate,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Persist a login under an opaque caller-generated token.
  fn add_session(
    &self,
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;

  /// Look up a live session. Expired rows are treated as absent (and may be
  /// purged as a side effect).
  fn get_session(
    &self,
    token: String,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// Remove a session (logout). Unknown tokens are a no-op.
  fn delete_session(
    &self,
    token: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Projects ──────────────────────────────────────────────────────────

  /// Persist a project under a pre-computed slug (see [`crate::slug`]).
  fn add_project(
    &self,
    input: NewProject,
    slug: String,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  fn get_project_by_slug(
    &self,
    slug: String,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Newest first.
  fn list_projects(
    &self,
    filter: ProjectFilter,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  /// Full-field replacement. Returns `None` if the project does not exist.
  fn update_project(
    &self,
    id: Uuid,
    input: NewProject,
    slug: String,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Returns `false` if the project did not exist.
  fn delete_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Experiences ───────────────────────────────────────────────────────

  fn add_experience(
    &self,
    input: NewExperience,
  ) -> impl Future<Output = Result<Experience, Self::Error>> + Send + '_;

  fn get_experience(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Experience>, Self::Error>> + Send + '_;

  fn list_experiences(
    &self,
    published_only: bool,
  ) -> impl Future<Output = Result<Vec<Experience>, Self::Error>> + Send + '_;

  fn update_experience(
    &self,
    id: Uuid,
    input: NewExperience,
  ) -> impl Future<Output = Result<Option<Experience>, Self::Error>> + Send + '_;

  fn delete_experience(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Achievements ──────────────────────────────────────────────────────

  fn add_achievement(
    &self,
    input: NewAchievement,
    slug: String,
  ) -> impl Future<Output = Result<Achievement, Self::Error>> + Send + '_;

  fn get_achievement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Achievement>, Self::Error>> + Send + '_;

  fn list_achievements(
    &self,
    published_only: bool,
  ) -> impl Future<Output = Result<Vec<Achievement>, Self::Error>> + Send + '_;

  fn update_achievement(
    &self,
    id: Uuid,
    input: NewAchievement,
    slug: String,
  ) -> impl Future<Output = Result<Option<Achievement>, Self::Error>> + Send + '_;

  fn delete_achievement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Slugs ─────────────────────────────────────────────────────────────

  /// Read-only collision probe for [`crate::slug::make_unique_slug`].
  /// `exclude` skips one record id, so an update does not collide with the
  /// record being updated.
  fn slug_exists(
    &self,
    kind: SlugKind,
    slug: String,
    exclude: Option<Uuid>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Likes ─────────────────────────────────────────────────────────────

  /// Flip the user's like on an item. Returns the new state: `true` if a
  /// like was created, `false` if an existing like was removed. Must run as
  /// a single atomic unit.
  fn toggle_like(
    &self,
    user_id: Uuid,
    item: ItemRef,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Live like count for an item, plus whether the optional viewer has an
  /// active like. Pure read.
  fn like_status(
    &self,
    item: ItemRef,
    user_id: Option<Uuid>,
  ) -> impl Future<Output = Result<LikeStatus, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Validate and persist a comment. `id` and timestamps are set by the
  /// store. The target item is deliberately not checked for existence.
  fn add_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Comments for an item, most recent first, optionally truncated.
  fn list_comments(
    &self,
    item: ItemRef,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Returns `false` if the comment did not exist.
  fn delete_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Site content ──────────────────────────────────────────────────────

  /// Upsert one `(section, field)` fragment and return the stored row.
  fn set_content(
    &self,
    section: String,
    field: String,
    content: String,
  ) -> impl Future<Output = Result<ContentEntry, Self::Error>> + Send + '_;

  fn list_content(
    &self,
  ) -> impl Future<Output = Result<Vec<ContentEntry>, Self::Error>> + Send + '_;

  // ── Uploaded files ────────────────────────────────────────────────────

  fn add_file(
    &self,
    input: NewStoredFile,
  ) -> impl Future<Output = Result<StoredFile, Self::Error>> + Send + '_;

  fn get_file(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StoredFile>, Self::Error>> + Send + '_;
}
