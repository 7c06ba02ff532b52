//! SQL schema for the Vitrine SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id           TEXT PRIMARY KEY,
    email             TEXT NOT NULL UNIQUE,
    password_hash     TEXT NOT NULL,      -- argon2 PHC string
    first_name        TEXT,
    last_name         TEXT,
    profile_image_url TEXT,
    hero_image_url    TEXT,
    linkedin_url      TEXT,
    github_url        TEXT,
    is_admin          INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL,      -- ISO 8601 UTC; server-assigned
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,          -- opaque random hex
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    project_id   TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    slug         TEXT NOT NULL UNIQUE,
    description  TEXT NOT NULL,
    image_url    TEXT,
    github_url   TEXT,
    live_url     TEXT,
    technologies TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    featured     INTEGER NOT NULL DEFAULT 0,
    published    INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS experiences (
    experience_id    TEXT PRIMARY KEY,
    position         TEXT NOT NULL,
    company          TEXT NOT NULL,
    start_date       TEXT,
    end_date         TEXT,
    description      TEXT NOT NULL,
    technologies     TEXT NOT NULL DEFAULT '[]',
    company_logo_url TEXT,
    published        INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS achievements (
    achievement_id  TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    slug            TEXT NOT NULL UNIQUE,
    description     TEXT NOT NULL,
    date            TEXT,
    kind            TEXT,
    certificate_url TEXT,
    badge_image_url TEXT,
    published       INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- At most one like per (user, item). Un-liking deletes the row; the table
-- is the only source of truth for counts.
CREATE TABLE IF NOT EXISTS likes (
    like_id    TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    item_type  TEXT NOT NULL,   -- 'project' | 'experience' | 'achievement' | 'contact'
    item_id    TEXT NOT NULL,   -- uninterpreted; not a foreign key
    created_at TEXT NOT NULL,
    UNIQUE (user_id, item_type, item_id)
);

-- Exactly one authorship mode per comment: a user_id, or a name/email pair.
CREATE TABLE IF NOT EXISTS comments (
    comment_id   TEXT PRIMARY KEY,
    user_id      TEXT REFERENCES users(user_id),
    author_name  TEXT,
    author_email TEXT,
    item_type    TEXT NOT NULL,
    item_id      TEXT NOT NULL,   -- uninterpreted; not a foreign key
    content      TEXT NOT NULL,
    parent_id    TEXT,            -- threading; not enforced referentially
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL,
    CHECK (
      (user_id IS NOT NULL AND author_name IS NULL AND author_email IS NULL)
      OR
      (user_id IS NULL AND author_name IS NOT NULL AND author_email IS NOT NULL)
    )
);

CREATE TABLE IF NOT EXISTS site_content (
    content_id TEXT PRIMARY KEY,
    section    TEXT NOT NULL,
    field      TEXT NOT NULL,
    content    TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (section, field)
);

CREATE TABLE IF NOT EXISTS files (
    file_id       TEXT PRIMARY KEY,
    filename      TEXT NOT NULL UNIQUE,
    original_name TEXT NOT NULL,
    mime_type     TEXT NOT NULL,
    size_bytes    INTEGER NOT NULL,
    url           TEXT NOT NULL,
    uploaded_by   TEXT NOT NULL REFERENCES users(user_id),
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS likes_item_idx       ON likes(item_type, item_id);
CREATE INDEX IF NOT EXISTS comments_item_idx    ON comments(item_type, item_id);
CREATE INDEX IF NOT EXISTS comments_created_idx ON comments(created_at);
CREATE INDEX IF NOT EXISTS sessions_expiry_idx  ON sessions(expires_at);

PRAGMA user_version = 1;
";
