//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, technology lists as compact JSON arrays, and item kinds
//! as their lowercase discriminants.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vitrine_core::{
  content::ContentEntry,
  entity::{Achievement, Experience, Project},
  interaction::{Comment, ItemKind, ItemRef},
  session::Session,
  upload::StoredFile,
  user::User,
};

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ItemKind ────────────────────────────────────────────────────────────────

pub fn encode_item_kind(k: ItemKind) -> &'static str {
  match k {
    ItemKind::Project => "project",
    ItemKind::Experience => "experience",
    ItemKind::Achievement => "achievement",
    ItemKind::Contact => "contact",
  }
}

pub fn decode_item_kind(s: &str) -> Result<ItemKind> {
  match s {
    "project" => Ok(ItemKind::Project),
    "experience" => Ok(ItemKind::Experience),
    "achievement" => Ok(ItemKind::Achievement),
    "contact" => Ok(ItemKind::Contact),
    other => Err(Error::Decode(format!("unknown item kind: {other:?}"))),
  }
}

// ─── Technology lists ────────────────────────────────────────────────────────

pub fn encode_technologies(techs: &[String]) -> Result<String> {
  Ok(serde_json::to_string(techs)?)
}

pub fn decode_technologies(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:           String,
  pub email:             String,
  pub password_hash:     String,
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
  pub is_admin:          bool,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:                decode_uuid(&self.user_id)?,
      email:             self.email,
      password_hash:     self.password_hash,
      first_name:        self.first_name,
      last_name:         self.last_name,
      profile_image_url: self.profile_image_url,
      hero_image_url:    self.hero_image_url,
      linkedin_url:      self.linkedin_url,
      github_url:        self.github_url,
      is_admin:          self.is_admin,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `sessions` row.
pub struct RawSession {
  pub token:      String,
  pub user_id:    String,
  pub created_at: String,
  pub expires_at: String,
}

impl RawSession {
  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      token:      self.token,
      user_id:    decode_uuid(&self.user_id)?,
      created_at: decode_dt(&self.created_at)?,
      expires_at: decode_dt(&self.expires_at)?,
    })
  }
}

/// Raw strings read directly from a `projects` row.
pub struct RawProject {
  pub project_id:   String,
  pub title:        String,
  pub slug:         String,
  pub description:  String,
  pub image_url:    Option<String>,
  pub github_url:   Option<String>,
  pub live_url:     Option<String>,
  pub technologies: String,
  pub featured:     bool,
  pub published:    bool,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawProject {
  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      id:           decode_uuid(&self.project_id)?,
      title:        self.title,
      slug:         self.slug,
      description:  self.description,
      image_url:    self.image_url,
      github_url:   self.github_url,
      live_url:     self.live_url,
      technologies: decode_technologies(&self.technologies)?,
      featured:     self.featured,
      published:    self.published,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `experiences` row.
pub struct RawExperience {
  pub experience_id:    String,
  pub position:         String,
  pub company:          String,
  pub start_date:       Option<String>,
  pub end_date:         Option<String>,
  pub description:      String,
  pub technologies:     String,
  pub company_logo_url: Option<String>,
  pub published:        bool,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawExperience {
  pub fn into_experience(self) -> Result<Experience> {
    Ok(Experience {
      id:               decode_uuid(&self.experience_id)?,
      position:         self.position,
      company:          self.company,
      start_date:       self.start_date.as_deref().map(decode_dt).transpose()?,
      end_date:         self.end_date.as_deref().map(decode_dt).transpose()?,
      description:      self.description,
      technologies:     decode_technologies(&self.technologies)?,
      company_logo_url: self.company_logo_url,
      published:        self.published,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `achievements` row.
pub struct RawAchievement {
  pub achievement_id:  String,
  pub title:           String,
  pub slug:            String,
  pub description:     String,
  pub date:            Option<String>,
  pub kind:            Option<String>,
  pub certificate_url: Option<String>,
  pub badge_image_url: Option<String>,
  pub published:       bool,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawAchievement {
  pub fn into_achievement(self) -> Result<Achievement> {
    Ok(Achievement {
      id:              decode_uuid(&self.achievement_id)?,
      title:           self.title,
      slug:            self.slug,
      description:     self.description,
      date:            self.date.as_deref().map(decode_dt).transpose()?,
      kind:            self.kind,
      certificate_url: self.certificate_url,
      badge_image_url: self.badge_image_url,
      published:       self.published,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `comments` row.
pub struct RawComment {
  pub comment_id:   String,
  pub user_id:      Option<String>,
  pub author_name:  Option<String>,
  pub author_email: Option<String>,
  pub item_type:    String,
  pub item_id:      String,
  pub content:      String,
  pub parent_id:    Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:           decode_uuid(&self.comment_id)?,
      user_id:      self.user_id.as_deref().map(decode_uuid).transpose()?,
      author_name:  self.author_name,
      author_email: self.author_email,
      item:         ItemRef {
        item_type: decode_item_kind(&self.item_type)?,
        item_id:   self.item_id,
      },
      content:      self.content,
      parent_id:    self.parent_id.as_deref().map(decode_uuid).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `site_content` row.
pub struct RawContentEntry {
  pub content_id: String,
  pub section:    String,
  pub field:      String,
  pub content:    String,
  pub updated_at: String,
}

impl RawContentEntry {
  pub fn into_entry(self) -> Result<ContentEntry> {
    Ok(ContentEntry {
      id:         decode_uuid(&self.content_id)?,
      section:    self.section,
      field:      self.field,
      content:    self.content,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `files` row.
pub struct RawStoredFile {
  pub file_id:       String,
  pub filename:      String,
  pub original_name: String,
  pub mime_type:     String,
  pub size_bytes:    i64,
  pub url:           String,
  pub uploaded_by:   String,
  pub created_at:    String,
}

impl RawStoredFile {
  pub fn into_file(self) -> Result<StoredFile> {
    Ok(StoredFile {
      id:            decode_uuid(&self.file_id)?,
      filename:      self.filename,
      original_name: self.original_name,
      mime_type:     self.mime_type,
      size_bytes:    self.size_bytes.max(0) as u64,
      url:           self.url,
      uploaded_by:   decode_uuid(&self.uploaded_by)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
