//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use uuid::Uuid;
use vitrine_core::{
  entity::{NewAchievement, NewExperience, NewProject, ProjectFilter},
  interaction::{CommentAuthor, ItemKind, ItemRef, NewComment},
  slug::{make_unique_slug, slugify, SlugKind},
  store::PortfolioStore,
  upload::NewStoredFile,
  user::{NewUser, ProfileUpdate},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn user_draft(email: &str, is_admin: bool) -> NewUser {
  NewUser {
    email:         email.to_string(),
    password_hash: "$argon2id$v=19$not-a-real-hash".to_string(),
    first_name:    Some("Test".to_string()),
    last_name:     Some("User".to_string()),
    is_admin,
  }
}

fn project_draft(title: &str) -> NewProject {
  NewProject {
    title:        title.to_string(),
    description:  "A thing I built".to_string(),
    image_url:    None,
    github_url:   Some("https://github.com/example/thing".to_string()),
    live_url:     None,
    technologies: vec!["rust".to_string(), "axum".to_string()],
    featured:     false,
    published:    true,
  }
}

fn experience_draft(position: &str) -> NewExperience {
  NewExperience {
    position:         position.to_string(),
    company:          "Acme".to_string(),
    start_date:       Some(Utc::now() - Duration::days(400)),
    end_date:         None,
    description:      "Shipped things".to_string(),
    technologies:     vec!["rust".to_string()],
    company_logo_url: None,
    published:        true,
  }
}

fn achievement_draft(title: &str) -> NewAchievement {
  NewAchievement {
    title:           title.to_string(),
    description:     "Earned it".to_string(),
    date:            Some(Utc::now()),
    kind:            Some("certification".to_string()),
    certificate_url: None,
    badge_image_url: None,
    published:       true,
  }
}

fn guest_comment(item: ItemRef, content: &str) -> NewComment {
  NewComment {
    item,
    content: content.to_string(),
    author: CommentAuthor::Guest {
      name:  "Alice".to_string(),
      email: "alice@example.com".to_string(),
    },
    parent_id: None,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user_by_email() {
  let s = store().await;

  let user = s.add_user(user_draft("owner@example.com", true)).await.unwrap();
  assert!(user.is_admin);

  let fetched = s
    .get_user_by_email("owner@example.com".to_string())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.id, user.id);
  assert_eq!(fetched.password_hash, user.password_hash);

  let by_id = s.get_user(user.id).await.unwrap().unwrap();
  assert_eq!(by_id.email, "owner@example.com");
}

#[tokio::test]
async fn find_admin_skips_regular_users() {
  let s = store().await;
  s.add_user(user_draft("visitor@example.com", false)).await.unwrap();
  assert!(s.find_admin().await.unwrap().is_none());

  let admin = s.add_user(user_draft("owner@example.com", true)).await.unwrap();
  let found = s.find_admin().await.unwrap().unwrap();
  assert_eq!(found.id, admin.id);
}

#[tokio::test]
async fn update_profile_replaces_fields() {
  let s = store().await;
  let user = s.add_user(user_draft("owner@example.com", true)).await.unwrap();

  let updated = s
    .update_profile(
      user.id,
      ProfileUpdate {
        first_name:        Some("Nova".to_string()),
        last_name:         None,
        profile_image_url: Some("/uploads/me.png".to_string()),
        hero_image_url:    None,
        linkedin_url:      Some("https://linkedin.com/in/nova".to_string()),
        github_url:        None,
      },
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.first_name.as_deref(), Some("Nova"));
  // ProfileUpdate is a full replacement: None clears the column.
  assert_eq!(updated.last_name, None);
  assert_eq!(updated.profile_image_url.as_deref(), Some("/uploads/me.png"));
}

#[tokio::test]
async fn update_profile_unknown_user_returns_none() {
  let s = store().await;
  let result = s
    .update_profile(Uuid::new_v4(), ProfileUpdate::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_roundtrip_and_logout() {
  let s = store().await;
  let user = s.add_user(user_draft("owner@example.com", true)).await.unwrap();

  let expires = Utc::now() + Duration::hours(12);
  s.add_session("tok-1".to_string(), user.id, expires).await.unwrap();

  let live = s.get_session("tok-1".to_string()).await.unwrap().unwrap();
  assert_eq!(live.user_id, user.id);

  s.delete_session("tok-1".to_string()).await.unwrap();
  assert!(s.get_session("tok-1".to_string()).await.unwrap().is_none());
}

#[tokio::test]
async fn expired_session_is_absent() {
  let s = store().await;
  let user = s.add_user(user_draft("owner@example.com", true)).await.unwrap();

  let expired = Utc::now() - Duration::minutes(1);
  s.add_session("stale".to_string(), user.id, expired).await.unwrap();

  assert!(s.get_session("stale".to_string()).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_session_token_is_absent() {
  let s = store().await;
  assert!(s.get_session("nope".to_string()).await.unwrap().is_none());
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_project() {
  let s = store().await;

  let project = s
    .add_project(project_draft("My Project"), "my-project".to_string())
    .await
    .unwrap();

  let by_id = s.get_project(project.id).await.unwrap().unwrap();
  assert_eq!(by_id.title, "My Project");
  assert_eq!(by_id.technologies, vec!["rust", "axum"]);

  let by_slug = s
    .get_project_by_slug("my-project".to_string())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(by_slug.id, project.id);
}

#[tokio::test]
async fn list_projects_respects_filters() {
  let s = store().await;

  let mut draft = project_draft("Shipped");
  draft.featured = true;
  s.add_project(draft, "shipped".to_string()).await.unwrap();

  let mut unpublished = project_draft("Draft");
  unpublished.published = false;
  s.add_project(unpublished, "draft".to_string()).await.unwrap();

  let all = s.list_projects(ProjectFilter::default()).await.unwrap();
  assert_eq!(all.len(), 2);

  let published = s
    .list_projects(ProjectFilter { published_only: true, ..Default::default() })
    .await
    .unwrap();
  assert_eq!(published.len(), 1);
  assert_eq!(published[0].slug, "shipped");

  let featured = s
    .list_projects(ProjectFilter { published_only: true, featured_only: true })
    .await
    .unwrap();
  assert_eq!(featured.len(), 1);
  assert!(featured[0].featured);
}

#[tokio::test]
async fn update_project_replaces_fields_and_slug() {
  let s = store().await;
  let project = s
    .add_project(project_draft("Old Title"), "old-title".to_string())
    .await
    .unwrap();

  let updated = s
    .update_project(
      project.id,
      project_draft("New Title"),
      "new-title".to_string(),
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.title, "New Title");
  assert_eq!(updated.slug, "new-title");
  assert!(s
    .get_project_by_slug("old-title".to_string())
    .await
    .unwrap()
    .is_none());
}

#[tokio::test]
async fn delete_project_reports_outcome() {
  let s = store().await;
  let project = s
    .add_project(project_draft("Gone"), "gone".to_string())
    .await
    .unwrap();

  assert!(s.delete_project(project.id).await.unwrap());
  assert!(!s.delete_project(project.id).await.unwrap());
  assert!(s.get_project(project.id).await.unwrap().is_none());
}

// ─── Slug uniqueness ─────────────────────────────────────────────────────────

#[tokio::test]
async fn slug_exists_scopes_by_kind() {
  let s = store().await;
  s.add_project(project_draft("Rust Rewrite"), "rust-rewrite".to_string())
    .await
    .unwrap();

  assert!(s
    .slug_exists(SlugKind::Project, "rust-rewrite".to_string(), None)
    .await
    .unwrap());
  // Same slug is free in the achievements collection.
  assert!(!s
    .slug_exists(SlugKind::Achievement, "rust-rewrite".to_string(), None)
    .await
    .unwrap());
}

#[tokio::test]
async fn make_unique_slug_appends_numeric_suffix() {
  let s = store().await;
  s.add_project(project_draft("My Project"), "my-project".to_string())
    .await
    .unwrap();

  let suffixed = make_unique_slug(&s, SlugKind::Project, "my-project", None)
    .await
    .unwrap();
  assert_eq!(suffixed, "my-project-1");

  s.add_project(project_draft("My Project"), "my-project-1".to_string())
    .await
    .unwrap();

  let further = make_unique_slug(&s, SlugKind::Project, "my-project", None)
    .await
    .unwrap();
  assert_eq!(further, "my-project-2");
}

#[tokio::test]
async fn make_unique_slug_excludes_own_record() {
  let s = store().await;
  let project = s
    .add_project(project_draft("My Project"), "my-project".to_string())
    .await
    .unwrap();

  // Updating the record itself must not see its own slug as a collision.
  let unchanged =
    make_unique_slug(&s, SlugKind::Project, "my-project", Some(project.id))
      .await
      .unwrap();
  assert_eq!(unchanged, "my-project");
}

#[tokio::test]
async fn slugify_feeds_make_unique_slug() {
  let s = store().await;
  let slug = slugify("Hello, World!");
  assert_eq!(slug, "hello-world");

  let free = make_unique_slug(&s, SlugKind::Project, &slug, None).await.unwrap();
  assert_eq!(free, "hello-world");
}

// ─── Experiences ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn experience_crud_roundtrip() {
  let s = store().await;
  let exp = s.add_experience(experience_draft("Engineer")).await.unwrap();

  let fetched = s.get_experience(exp.id).await.unwrap().unwrap();
  assert_eq!(fetched.position, "Engineer");
  assert_eq!(fetched.company, "Acme");
  assert!(fetched.end_date.is_none());

  let updated = s
    .update_experience(exp.id, experience_draft("Senior Engineer"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.position, "Senior Engineer");

  assert!(s.delete_experience(exp.id).await.unwrap());
  assert!(s.get_experience(exp.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_experiences_hides_drafts_when_asked() {
  let s = store().await;
  s.add_experience(experience_draft("Public role")).await.unwrap();

  let mut draft = experience_draft("Hidden role");
  draft.published = false;
  s.add_experience(draft).await.unwrap();

  assert_eq!(s.list_experiences(false).await.unwrap().len(), 2);
  let published = s.list_experiences(true).await.unwrap();
  assert_eq!(published.len(), 1);
  assert_eq!(published[0].position, "Public role");
}

// ─── Achievements ────────────────────────────────────────────────────────────

#[tokio::test]
async fn achievement_crud_roundtrip() {
  let s = store().await;
  let ach = s
    .add_achievement(achievement_draft("Cloud Cert"), "cloud-cert".to_string())
    .await
    .unwrap();

  let fetched = s.get_achievement(ach.id).await.unwrap().unwrap();
  assert_eq!(fetched.slug, "cloud-cert");
  assert_eq!(fetched.kind.as_deref(), Some("certification"));

  let updated = s
    .update_achievement(
      ach.id,
      achievement_draft("Cloud Certification"),
      "cloud-certification".to_string(),
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.title, "Cloud Certification");

  assert!(s.delete_achievement(ach.id).await.unwrap());
  assert!(!s.delete_achievement(ach.id).await.unwrap());
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_like_alternates_and_count_follows() {
  let s = store().await;
  let user = s.add_user(user_draft("visitor@example.com", false)).await.unwrap();
  let item = ItemRef::new(ItemKind::Project, "some-project");

  let before = s.like_status(item.clone(), None).await.unwrap();
  assert_eq!(before.count, 0);

  assert!(s.toggle_like(user.id, item.clone()).await.unwrap());
  let liked = s.like_status(item.clone(), Some(user.id)).await.unwrap();
  assert_eq!(liked.count, 1);
  assert!(liked.user_liked);

  assert!(!s.toggle_like(user.id, item.clone()).await.unwrap());
  let unliked = s.like_status(item.clone(), Some(user.id)).await.unwrap();
  assert_eq!(unliked.count, 0);
  assert!(!unliked.user_liked);
}

#[tokio::test]
async fn like_count_equals_actors_currently_liking() {
  let s = store().await;
  let item = ItemRef::new(ItemKind::Achievement, "abc");

  let mut users = Vec::new();
  for i in 0..5 {
    users.push(
      s.add_user(user_draft(&format!("u{i}@example.com"), false))
        .await
        .unwrap(),
    );
  }

  // Everyone likes; two of them immediately un-like; one re-likes.
  for u in &users {
    s.toggle_like(u.id, item.clone()).await.unwrap();
  }
  s.toggle_like(users[0].id, item.clone()).await.unwrap();
  s.toggle_like(users[1].id, item.clone()).await.unwrap();
  s.toggle_like(users[0].id, item.clone()).await.unwrap();

  let status = s.like_status(item.clone(), Some(users[1].id)).await.unwrap();
  assert_eq!(status.count, 4);
  assert!(!status.user_liked);
}

#[tokio::test]
async fn likes_are_scoped_to_their_item() {
  let s = store().await;
  let user = s.add_user(user_draft("visitor@example.com", false)).await.unwrap();

  s.toggle_like(user.id, ItemRef::new(ItemKind::Project, "a")).await.unwrap();

  // Same id under a different kind is a different item.
  let other_kind = s
    .like_status(ItemRef::new(ItemKind::Experience, "a"), Some(user.id))
    .await
    .unwrap();
  assert_eq!(other_kind.count, 0);
  assert!(!other_kind.user_liked);
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn guest_comment_requires_name_and_email() {
  let s = store().await;
  let item = ItemRef::new(ItemKind::Project, "p1");

  let missing_name = NewComment {
    item:      item.clone(),
    content:   "nice work".to_string(),
    author:    CommentAuthor::Guest {
      name:  "".to_string(),
      email: "x@example.com".to_string(),
    },
    parent_id: None,
  };
  let err = s.add_comment(missing_name).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(vitrine_core::Error::Validation(_))
  ));

  // Nothing was persisted.
  assert!(s.list_comments(item, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_comment_content_rejected() {
  let s = store().await;
  let draft = guest_comment(ItemRef::new(ItemKind::Project, "p1"), "   ");
  assert!(s.add_comment(draft).await.is_err());
}

#[tokio::test]
async fn comments_list_most_recent_first() {
  let s = store().await;
  let item = ItemRef::new(ItemKind::Project, "p1");

  s.add_comment(guest_comment(item.clone(), "first")).await.unwrap();
  s.add_comment(guest_comment(item.clone(), "second")).await.unwrap();
  s.add_comment(guest_comment(item.clone(), "third")).await.unwrap();

  let comments = s.list_comments(item.clone(), None).await.unwrap();
  let contents: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
  assert_eq!(contents, ["third", "second", "first"]);

  let limited = s.list_comments(item, Some(2)).await.unwrap();
  assert_eq!(limited.len(), 2);
  assert_eq!(limited[0].content, "third");
}

#[tokio::test]
async fn registered_comment_carries_user_id() {
  let s = store().await;
  let user = s.add_user(user_draft("visitor@example.com", false)).await.unwrap();
  let item = ItemRef::new(ItemKind::Experience, "e1");

  let comment = s
    .add_comment(NewComment {
      item:      item.clone(),
      content:   "I was there".to_string(),
      author:    CommentAuthor::Registered { user_id: user.id },
      parent_id: None,
    })
    .await
    .unwrap();

  assert_eq!(comment.user_id, Some(user.id));
  assert!(comment.author_name.is_none());
  assert!(comment.author_email.is_none());
}

#[tokio::test]
async fn comment_threading_accepts_parent_without_checks() {
  let s = store().await;
  let item = ItemRef::new(ItemKind::Contact, "general");

  let root = s.add_comment(guest_comment(item.clone(), "root")).await.unwrap();

  let mut reply = guest_comment(item.clone(), "reply");
  reply.parent_id = Some(root.id);
  let stored = s.add_comment(reply).await.unwrap();
  assert_eq!(stored.parent_id, Some(root.id));

  // A dangling parent is accepted as-is.
  let mut orphan = guest_comment(item, "orphan");
  orphan.parent_id = Some(Uuid::new_v4());
  assert!(s.add_comment(orphan).await.is_ok());
}

#[tokio::test]
async fn comments_may_target_nonexistent_items() {
  let s = store().await;
  // No project with this id exists; the store accepts the comment anyway.
  let item = ItemRef::new(ItemKind::Project, "ghost-project");
  let stored = s.add_comment(guest_comment(item.clone(), "hello?")).await.unwrap();
  assert_eq!(stored.item, item);
}

#[tokio::test]
async fn delete_comment_reports_outcome() {
  let s = store().await;
  let item = ItemRef::new(ItemKind::Project, "p1");
  let comment = s.add_comment(guest_comment(item.clone(), "bye")).await.unwrap();

  assert!(s.delete_comment(comment.id).await.unwrap());
  assert!(!s.delete_comment(comment.id).await.unwrap());
  assert!(s.list_comments(item, None).await.unwrap().is_empty());
}

// ─── Site content ────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_content_upserts_in_place() {
  let s = store().await;

  let first = s
    .set_content("hero".to_string(), "headline".to_string(), "Hi".to_string())
    .await
    .unwrap();

  let second = s
    .set_content("hero".to_string(), "headline".to_string(), "Hello".to_string())
    .await
    .unwrap();

  // Same row, replaced content.
  assert_eq!(second.id, first.id);
  assert_eq!(second.content, "Hello");

  let all = s.list_content().await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn content_entries_keep_sections_apart() {
  let s = store().await;
  s.set_content("hero".to_string(), "headline".to_string(), "A".to_string())
    .await
    .unwrap();
  s.set_content("about".to_string(), "headline".to_string(), "B".to_string())
    .await
    .unwrap();

  let all = s.list_content().await.unwrap();
  assert_eq!(all.len(), 2);
}

// ─── Uploaded files ──────────────────────────────────────────────────────────

#[tokio::test]
async fn stored_file_roundtrip() {
  let s = store().await;
  let admin = s.add_user(user_draft("owner@example.com", true)).await.unwrap();

  let file = s
    .add_file(NewStoredFile {
      filename:      "a1b2c3.png".to_string(),
      original_name: "screenshot.png".to_string(),
      mime_type:     "image/png".to_string(),
      size_bytes:    1234,
      url:           "/uploads/a1b2c3.png".to_string(),
      uploaded_by:   admin.id,
    })
    .await
    .unwrap();

  let fetched = s.get_file(file.id).await.unwrap().unwrap();
  assert_eq!(fetched.filename, "a1b2c3.png");
  assert_eq!(fetched.size_bytes, 1234);
  assert_eq!(fetched.uploaded_by, admin.id);

  assert!(s.get_file(Uuid::new_v4()).await.unwrap().is_none());
}
