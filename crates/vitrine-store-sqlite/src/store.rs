//! [`SqliteStore`] — the SQLite implementation of [`PortfolioStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use vitrine_core::{
  content::ContentEntry,
  entity::{
    Achievement, Experience, NewAchievement, NewExperience, NewProject,
    Project, ProjectFilter,
  },
  interaction::{Comment, CommentAuthor, ItemRef, LikeStatus, NewComment},
  session::Session,
  slug::SlugKind,
  store::PortfolioStore,
  upload::{NewStoredFile, StoredFile},
  user::{NewUser, ProfileUpdate, User},
};

use crate::{
  encode::{
    encode_dt, encode_item_kind, encode_technologies, encode_uuid, RawAchievement,
    RawComment, RawContentEntry, RawExperience, RawProject, RawSession,
    RawStoredFile, RawUser,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

const USER_COLUMNS: &str = "user_id, email, password_hash, first_name, last_name, \
   profile_image_url, hero_image_url, linkedin_url, github_url, is_admin, \
   created_at, updated_at";

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:           row.get(0)?,
    email:             row.get(1)?,
    password_hash:     row.get(2)?,
    first_name:        row.get(3)?,
    last_name:         row.get(4)?,
    profile_image_url: row.get(5)?,
    hero_image_url:    row.get(6)?,
    linkedin_url:      row.get(7)?,
    github_url:        row.get(8)?,
    is_admin:          row.get(9)?,
    created_at:        row.get(10)?,
    updated_at:        row.get(11)?,
  })
}

const PROJECT_COLUMNS: &str = "project_id, title, slug, description, image_url, \
   github_url, live_url, technologies, featured, published, created_at, updated_at";

fn project_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProject> {
  Ok(RawProject {
    project_id:   row.get(0)?,
    title:        row.get(1)?,
    slug:         row.get(2)?,
    description:  row.get(3)?,
    image_url:    row.get(4)?,
    github_url:   row.get(5)?,
    live_url:     row.get(6)?,
    technologies: row.get(7)?,
    featured:     row.get(8)?,
    published:    row.get(9)?,
    created_at:   row.get(10)?,
    updated_at:   row.get(11)?,
  })
}

const EXPERIENCE_COLUMNS: &str = "experience_id, position, company, start_date, \
   end_date, description, technologies, company_logo_url, published, \
   created_at, updated_at";

fn experience_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawExperience> {
  Ok(RawExperience {
    experience_id:    row.get(0)?,
    position:         row.get(1)?,
    company:          row.get(2)?,
    start_date:       row.get(3)?,
    end_date:         row.get(4)?,
    description:      row.get(5)?,
    technologies:     row.get(6)?,
    company_logo_url: row.get(7)?,
    published:        row.get(8)?,
    created_at:       row.get(9)?,
    updated_at:       row.get(10)?,
  })
}

const ACHIEVEMENT_COLUMNS: &str = "achievement_id, title, slug, description, \
   date, kind, certificate_url, badge_image_url, published, created_at, updated_at";

fn achievement_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAchievement> {
  Ok(RawAchievement {
    achievement_id:  row.get(0)?,
    title:           row.get(1)?,
    slug:            row.get(2)?,
    description:     row.get(3)?,
    date:            row.get(4)?,
    kind:            row.get(5)?,
    certificate_url: row.get(6)?,
    badge_image_url: row.get(7)?,
    published:       row.get(8)?,
    created_at:      row.get(9)?,
    updated_at:      row.get(10)?,
  })
}

const COMMENT_COLUMNS: &str = "comment_id, user_id, author_name, author_email, \
   item_type, item_id, content, parent_id, created_at, updated_at";

fn comment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawComment> {
  Ok(RawComment {
    comment_id:   row.get(0)?,
    user_id:      row.get(1)?,
    author_name:  row.get(2)?,
    author_email: row.get(3)?,
    item_type:    row.get(4)?,
    item_id:      row.get(5)?,
    content:      row.get(6)?,
    parent_id:    row.get(7)?,
    created_at:   row.get(8)?,
    updated_at:   row.get(9)?,
  })
}

fn slug_table(kind: SlugKind) -> (&'static str, &'static str) {
  match kind {
    SlugKind::Project => ("projects", "project_id"),
    SlugKind::Achievement => ("achievements", "achievement_id"),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Vitrine portfolio store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run on the connection's dedicated thread, so multi-statement
/// operations serialize naturally; `toggle_like` additionally wraps its
/// check-then-act pair in an explicit transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_project(&self, id_str: String) -> Result<Option<Project>> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1");
    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], project_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawProject::into_project).transpose()
  }

  async fn fetch_experience(&self, id_str: String) -> Result<Option<Experience>> {
    let sql =
      format!("SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE experience_id = ?1");
    let raw: Option<RawExperience> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], experience_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawExperience::into_experience).transpose()
  }

  async fn fetch_achievement(&self, id_str: String) -> Result<Option<Achievement>> {
    let sql =
      format!("SELECT {ACHIEVEMENT_COLUMNS} FROM achievements WHERE achievement_id = ?1");
    let raw: Option<RawAchievement> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], achievement_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawAchievement::into_achievement).transpose()
  }

  async fn fetch_user(&self, sql: String, key: String) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![key], user_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawUser::into_user).transpose()
  }
}

// ─── PortfolioStore impl ─────────────────────────────────────────────────────

impl PortfolioStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let now = Utc::now();
    let user = User {
      id:                Uuid::new_v4(),
      email:             input.email,
      password_hash:     input.password_hash,
      first_name:        input.first_name,
      last_name:         input.last_name,
      profile_image_url: None,
      hero_image_url:    None,
      linkedin_url:      None,
      github_url:        None,
      is_admin:          input.is_admin,
      created_at:        now,
      updated_at:        now,
    };

    let id_str = encode_uuid(user.id);
    let at_str = encode_dt(now);
    let email = user.email.clone();
    let hash = user.password_hash.clone();
    let first = user.first_name.clone();
    let last = user.last_name.clone();
    let is_admin = user.is_admin;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, email, password_hash, first_name, last_name,
             is_admin, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![id_str, email, hash, first, last, is_admin, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1");
    self.fetch_user(sql, encode_uuid(id)).await
  }

  async fn get_user_by_email(&self, email: String) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
    self.fetch_user(sql, email).await
  }

  async fn find_admin(&self) -> Result<Option<User>> {
    let sql = format!(
      "SELECT {USER_COLUMNS} FROM users WHERE is_admin = ?1 ORDER BY created_at LIMIT 1"
    );
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![true], user_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawUser::into_user).transpose()
  }

  async fn update_profile(
    &self,
    id: Uuid,
    update: ProfileUpdate,
  ) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());

    let affected = {
      let id_str = id_str.clone();
      self
        .conn
        .call(move |conn| {
          Ok(conn.execute(
            "UPDATE users SET
               first_name = ?2, last_name = ?3, profile_image_url = ?4,
               hero_image_url = ?5, linkedin_url = ?6, github_url = ?7,
               updated_at = ?8
             WHERE user_id = ?1",
            rusqlite::params![
              id_str,
              update.first_name,
              update.last_name,
              update.profile_image_url,
              update.hero_image_url,
              update.linkedin_url,
              update.github_url,
              at_str,
            ],
          )?)
        })
        .await?
    };

    if affected == 0 {
      return Ok(None);
    }
    self.get_user(id).await
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn add_session(
    &self,
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
  ) -> Result<Session> {
    let session = Session {
      token,
      user_id,
      created_at: Utc::now(),
      expires_at,
    };

    let token_str = session.token.clone();
    let user_str = encode_uuid(user_id);
    let created_str = encode_dt(session.created_at);
    let expires_str = encode_dt(session.expires_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token, user_id, created_at, expires_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![token_str, user_str, created_str, expires_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(session)
  }

  async fn get_session(&self, token: String) -> Result<Option<Session>> {
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            "SELECT token, user_id, created_at, expires_at
             FROM sessions WHERE token = ?1",
            rusqlite::params![token],
            |row| {
              Ok(RawSession {
                token:      row.get(0)?,
                user_id:    row.get(1)?,
                created_at: row.get(2)?,
                expires_at: row.get(3)?,
              })
            },
          )
          .optional()?;

        // Lazy purge: an expired row is deleted and reported absent.
        if let Some(ref r) = raw
          && r.expires_at.as_str() <= now_str.as_str()
        {
          conn.execute(
            "DELETE FROM sessions WHERE token = ?1",
            rusqlite::params![r.token],
          )?;
          return Ok(None);
        }

        Ok(raw)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn delete_session(&self, token: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM sessions WHERE token = ?1", rusqlite::params![token])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn add_project(&self, input: NewProject, slug: String) -> Result<Project> {
    let now = Utc::now();
    let project = Project {
      id: Uuid::new_v4(),
      title: input.title,
      slug,
      description: input.description,
      image_url: input.image_url,
      github_url: input.github_url,
      live_url: input.live_url,
      technologies: input.technologies,
      featured: input.featured,
      published: input.published,
      created_at: now,
      updated_at: now,
    };

    let id_str = encode_uuid(project.id);
    let at_str = encode_dt(now);
    let techs_str = encode_technologies(&project.technologies)?;
    let p = project.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO projects (
             project_id, title, slug, description, image_url, github_url,
             live_url, technologies, featured, published, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
          rusqlite::params![
            id_str,
            p.title,
            p.slug,
            p.description,
            p.image_url,
            p.github_url,
            p.live_url,
            techs_str,
            p.featured,
            p.published,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(project)
  }

  async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
    self.fetch_project(encode_uuid(id)).await
  }

  async fn get_project_by_slug(&self, slug: String) -> Result<Option<Project>> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = ?1");
    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![slug], project_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawProject::into_project).transpose()
  }

  async fn list_projects(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        if filter.published_only {
          conds.push("published = 1");
        }
        if filter.featured_only {
          conds.push("featured = 1");
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {PROJECT_COLUMNS} FROM projects {where_clause}
           ORDER BY created_at DESC"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], project_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn update_project(
    &self,
    id: Uuid,
    input: NewProject,
    slug: String,
  ) -> Result<Option<Project>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());
    let techs_str = encode_technologies(&input.technologies)?;

    let affected = {
      let id_str = id_str.clone();
      self
        .conn
        .call(move |conn| {
          Ok(conn.execute(
            "UPDATE projects SET
               title = ?2, slug = ?3, description = ?4, image_url = ?5,
               github_url = ?6, live_url = ?7, technologies = ?8,
               featured = ?9, published = ?10, updated_at = ?11
             WHERE project_id = ?1",
            rusqlite::params![
              id_str,
              input.title,
              slug,
              input.description,
              input.image_url,
              input.github_url,
              input.live_url,
              techs_str,
              input.featured,
              input.published,
              at_str,
            ],
          )?)
        })
        .await?
    };

    if affected == 0 {
      return Ok(None);
    }
    self.fetch_project(id_str).await
  }

  async fn delete_project(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM projects WHERE project_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  // ── Experiences ───────────────────────────────────────────────────────────

  async fn add_experience(&self, input: NewExperience) -> Result<Experience> {
    let now = Utc::now();
    let experience = Experience {
      id: Uuid::new_v4(),
      position: input.position,
      company: input.company,
      start_date: input.start_date,
      end_date: input.end_date,
      description: input.description,
      technologies: input.technologies,
      company_logo_url: input.company_logo_url,
      published: input.published,
      created_at: now,
      updated_at: now,
    };

    let id_str = encode_uuid(experience.id);
    let at_str = encode_dt(now);
    let techs_str = encode_technologies(&experience.technologies)?;
    let e = experience.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO experiences (
             experience_id, position, company, start_date, end_date,
             description, technologies, company_logo_url, published,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            e.position,
            e.company,
            e.start_date.map(encode_dt),
            e.end_date.map(encode_dt),
            e.description,
            techs_str,
            e.company_logo_url,
            e.published,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(experience)
  }

  async fn get_experience(&self, id: Uuid) -> Result<Option<Experience>> {
    self.fetch_experience(encode_uuid(id)).await
  }

  async fn list_experiences(&self, published_only: bool) -> Result<Vec<Experience>> {
    let raws: Vec<RawExperience> = self
      .conn
      .call(move |conn| {
        let where_clause = if published_only { "WHERE published = 1" } else { "" };
        let sql = format!(
          "SELECT {EXPERIENCE_COLUMNS} FROM experiences {where_clause}
           ORDER BY created_at DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], experience_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExperience::into_experience).collect()
  }

  async fn update_experience(
    &self,
    id: Uuid,
    input: NewExperience,
  ) -> Result<Option<Experience>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());
    let techs_str = encode_technologies(&input.technologies)?;

    let affected = {
      let id_str = id_str.clone();
      self
        .conn
        .call(move |conn| {
          Ok(conn.execute(
            "UPDATE experiences SET
               position = ?2, company = ?3, start_date = ?4, end_date = ?5,
               description = ?6, technologies = ?7, company_logo_url = ?8,
               published = ?9, updated_at = ?10
             WHERE experience_id = ?1",
            rusqlite::params![
              id_str,
              input.position,
              input.company,
              input.start_date.map(encode_dt),
              input.end_date.map(encode_dt),
              input.description,
              techs_str,
              input.company_logo_url,
              input.published,
              at_str,
            ],
          )?)
        })
        .await?
    };

    if affected == 0 {
      return Ok(None);
    }
    self.fetch_experience(id_str).await
  }

  async fn delete_experience(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM experiences WHERE experience_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  // ── Achievements ──────────────────────────────────────────────────────────

  async fn add_achievement(
    &self,
    input: NewAchievement,
    slug: String,
  ) -> Result<Achievement> {
    let now = Utc::now();
    let achievement = Achievement {
      id: Uuid::new_v4(),
      title: input.title,
      slug,
      description: input.description,
      date: input.date,
      kind: input.kind,
      certificate_url: input.certificate_url,
      badge_image_url: input.badge_image_url,
      published: input.published,
      created_at: now,
      updated_at: now,
    };

    let id_str = encode_uuid(achievement.id);
    let at_str = encode_dt(now);
    let a = achievement.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO achievements (
             achievement_id, title, slug, description, date, kind,
             certificate_url, badge_image_url, published, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            a.title,
            a.slug,
            a.description,
            a.date.map(encode_dt),
            a.kind,
            a.certificate_url,
            a.badge_image_url,
            a.published,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(achievement)
  }

  async fn get_achievement(&self, id: Uuid) -> Result<Option<Achievement>> {
    self.fetch_achievement(encode_uuid(id)).await
  }

  async fn list_achievements(&self, published_only: bool) -> Result<Vec<Achievement>> {
    let raws: Vec<RawAchievement> = self
      .conn
      .call(move |conn| {
        let where_clause = if published_only { "WHERE published = 1" } else { "" };
        let sql = format!(
          "SELECT {ACHIEVEMENT_COLUMNS} FROM achievements {where_clause}
           ORDER BY created_at DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], achievement_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawAchievement::into_achievement)
      .collect()
  }

  async fn update_achievement(
    &self,
    id: Uuid,
    input: NewAchievement,
    slug: String,
  ) -> Result<Option<Achievement>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());

    let affected = {
      let id_str = id_str.clone();
      self
        .conn
        .call(move |conn| {
          Ok(conn.execute(
            "UPDATE achievements SET
               title = ?2, slug = ?3, description = ?4, date = ?5, kind = ?6,
               certificate_url = ?7, badge_image_url = ?8, published = ?9,
               updated_at = ?10
             WHERE achievement_id = ?1",
            rusqlite::params![
              id_str,
              input.title,
              slug,
              input.description,
              input.date.map(encode_dt),
              input.kind,
              input.certificate_url,
              input.badge_image_url,
              input.published,
              at_str,
            ],
          )?)
        })
        .await?
    };

    if affected == 0 {
      return Ok(None);
    }
    self.fetch_achievement(id_str).await
  }

  async fn delete_achievement(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM achievements WHERE achievement_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  // ── Slugs ─────────────────────────────────────────────────────────────────

  async fn slug_exists(
    &self,
    kind: SlugKind,
    slug: String,
    exclude: Option<Uuid>,
  ) -> Result<bool> {
    let (table, id_column) = slug_table(kind);
    let exclude_str = exclude.map(encode_uuid);

    let exists = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT 1 FROM {table}
           WHERE slug = ?1 AND (?2 IS NULL OR {id_column} != ?2)"
        );
        let hit: Option<bool> = conn
          .query_row(&sql, rusqlite::params![slug, exclude_str], |_| Ok(true))
          .optional()?;
        Ok(hit.unwrap_or(false))
      })
      .await?;

    Ok(exists)
  }

  // ── Likes ─────────────────────────────────────────────────────────────────

  async fn toggle_like(&self, user_id: Uuid, item: ItemRef) -> Result<bool> {
    let user_str = encode_uuid(user_id);
    let kind_str = encode_item_kind(item.item_type).to_owned();
    let item_id = item.item_id;
    let like_id_str = encode_uuid(Uuid::new_v4());
    let at_str = encode_dt(Utc::now());

    // Delete-first toggle inside one transaction: either an existing row is
    // removed, or none was there and a fresh one is inserted.
    let liked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let removed = tx.execute(
          "DELETE FROM likes
           WHERE user_id = ?1 AND item_type = ?2 AND item_id = ?3",
          rusqlite::params![user_str, kind_str, item_id],
        )?;

        let liked = if removed == 0 {
          tx.execute(
            "INSERT INTO likes (like_id, user_id, item_type, item_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![like_id_str, user_str, kind_str, item_id, at_str],
          )?;
          true
        } else {
          false
        };

        tx.commit()?;
        Ok(liked)
      })
      .await?;

    Ok(liked)
  }

  async fn like_status(
    &self,
    item: ItemRef,
    user_id: Option<Uuid>,
  ) -> Result<LikeStatus> {
    let kind_str = encode_item_kind(item.item_type).to_owned();
    let item_id = item.item_id;
    let user_str = user_id.map(encode_uuid);

    let (count, user_liked) = self
      .conn
      .call(move |conn| {
        let count: i64 = conn.query_row(
          "SELECT COUNT(*) FROM likes WHERE item_type = ?1 AND item_id = ?2",
          rusqlite::params![kind_str, item_id],
          |row| row.get(0),
        )?;

        let user_liked = match user_str {
          Some(u) => conn
            .query_row(
              "SELECT 1 FROM likes
               WHERE user_id = ?1 AND item_type = ?2 AND item_id = ?3",
              rusqlite::params![u, kind_str, item_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
          None => false,
        };

        Ok((count, user_liked))
      })
      .await?;

    Ok(LikeStatus { count: count.max(0) as u64, user_liked })
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(&self, input: NewComment) -> Result<Comment> {
    input.validate()?;

    let now = Utc::now();
    let (user_id, author_name, author_email) = match input.author {
      CommentAuthor::Registered { user_id } => (Some(user_id), None, None),
      CommentAuthor::Guest { name, email } => (None, Some(name), Some(email)),
    };

    let comment = Comment {
      id: Uuid::new_v4(),
      user_id,
      author_name,
      author_email,
      item: input.item,
      content: input.content,
      parent_id: input.parent_id,
      created_at: now,
      updated_at: now,
    };

    let id_str = encode_uuid(comment.id);
    let user_str = comment.user_id.map(encode_uuid);
    let kind_str = encode_item_kind(comment.item.item_type).to_owned();
    let parent_str = comment.parent_id.map(encode_uuid);
    let at_str = encode_dt(now);
    let c = comment.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (
             comment_id, user_id, author_name, author_email, item_type,
             item_id, content, parent_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
          rusqlite::params![
            id_str,
            user_str,
            c.author_name,
            c.author_email,
            kind_str,
            c.item.item_id,
            c.content,
            parent_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(comment)
  }

  async fn list_comments(
    &self,
    item: ItemRef,
    limit: Option<usize>,
  ) -> Result<Vec<Comment>> {
    let kind_str = encode_item_kind(item.item_type).to_owned();
    let item_id = item.item_id;
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = limit.map(|l| l as i64).unwrap_or(-1);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {COMMENT_COLUMNS} FROM comments
           WHERE item_type = ?1 AND item_id = ?2
           ORDER BY created_at DESC
           LIMIT ?3"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![kind_str, item_id, limit_val], comment_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn delete_comment(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM comments WHERE comment_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(affected > 0)
  }

  // ── Site content ──────────────────────────────────────────────────────────

  async fn set_content(
    &self,
    section: String,
    field: String,
    content: String,
  ) -> Result<ContentEntry> {
    let fresh_id_str = encode_uuid(Uuid::new_v4());
    let at_str = encode_dt(Utc::now());

    let raw: RawContentEntry = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO site_content (content_id, section, field, content, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (section, field)
           DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at",
          rusqlite::params![fresh_id_str, section, field, content, at_str],
        )?;

        let raw = conn.query_row(
          "SELECT content_id, section, field, content, updated_at
           FROM site_content WHERE section = ?1 AND field = ?2",
          rusqlite::params![section, field],
          |row| {
            Ok(RawContentEntry {
              content_id: row.get(0)?,
              section:    row.get(1)?,
              field:      row.get(2)?,
              content:    row.get(3)?,
              updated_at: row.get(4)?,
            })
          },
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_entry()
  }

  async fn list_content(&self) -> Result<Vec<ContentEntry>> {
    let raws: Vec<RawContentEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT content_id, section, field, content, updated_at
           FROM site_content ORDER BY section, field",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawContentEntry {
              content_id: row.get(0)?,
              section:    row.get(1)?,
              field:      row.get(2)?,
              content:    row.get(3)?,
              updated_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContentEntry::into_entry).collect()
  }

  // ── Uploaded files ────────────────────────────────────────────────────────

  async fn add_file(&self, input: NewStoredFile) -> Result<StoredFile> {
    let file = StoredFile {
      id:            Uuid::new_v4(),
      filename:      input.filename,
      original_name: input.original_name,
      mime_type:     input.mime_type,
      size_bytes:    input.size_bytes,
      url:           input.url,
      uploaded_by:   input.uploaded_by,
      created_at:    Utc::now(),
    };

    let id_str = encode_uuid(file.id);
    let by_str = encode_uuid(file.uploaded_by);
    let at_str = encode_dt(file.created_at);
    let size = file.size_bytes as i64;
    let f = file.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO files (
             file_id, filename, original_name, mime_type, size_bytes, url,
             uploaded_by, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            f.filename,
            f.original_name,
            f.mime_type,
            size,
            f.url,
            by_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(file)
  }

  async fn get_file(&self, id: Uuid) -> Result<Option<StoredFile>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStoredFile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT file_id, filename, original_name, mime_type, size_bytes,
                      url, uploaded_by, created_at
               FROM files WHERE file_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawStoredFile {
                  file_id:       row.get(0)?,
                  filename:      row.get(1)?,
                  original_name: row.get(2)?,
                  mime_type:     row.get(3)?,
                  size_bytes:    row.get(4)?,
                  url:           row.get(5)?,
                  uploaded_by:   row.get(6)?,
                  created_at:    row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStoredFile::into_file).transpose()
  }
}
