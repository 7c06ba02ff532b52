//! URL-safe slug derivation and per-collection uniqueness.
//!
//! [`slugify`] is a pure transform; [`make_unique_slug`] is a read-only
//! collision probe against the store. The caller persists the returned slug
//! alongside the record.

use uuid::Uuid;

use crate::store::PortfolioStore;

/// Which slugged table a uniqueness probe targets. Uniqueness is scoped per
/// kind — a project and an achievement may share a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugKind {
  Project,
  Achievement,
}

/// Derive a URL-safe slug from free text.
///
/// Lowercases, strips everything outside letters/digits/underscore, and
/// collapses any run of whitespace and hyphens into a single interior
/// hyphen. Total over any input; text with no usable characters yields the
/// empty string, which callers must reject before persisting.
pub fn slugify(text: &str) -> String {
  let lowered = text.to_lowercase();
  let mut slug = String::with_capacity(lowered.len());
  let mut pending_hyphen = false;

  for c in lowered.chars() {
    if c.is_alphanumeric() || c == '_' {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      slug.push(c);
    } else if c.is_whitespace() || c == '-' {
      pending_hyphen = true;
    }
    // Remaining punctuation is dropped without acting as a separator.
  }

  slug
}

/// Ensure `candidate` is free in its collection, appending `-1`, `-2`, … on
/// collision until an unused slug is found.
///
/// `exclude` skips one record id when probing — on update, a record must not
/// collide with itself. No retry ceiling is imposed; the loop terminates
/// because the collection is finite.
pub async fn make_unique_slug<S>(
  store:     &S,
  kind:      SlugKind,
  candidate: &str,
  exclude:   Option<Uuid>,
) -> Result<String, S::Error>
where
  S: PortfolioStore + ?Sized,
{
  if !store.slug_exists(kind, candidate.to_string(), exclude).await? {
    return Ok(candidate.to_string());
  }

  let mut counter: u64 = 1;
  loop {
    let next = format!("{candidate}-{counter}");
    if !store.slug_exists(kind, next.clone(), exclude).await? {
      return Ok(next);
    }
    counter += 1;
  }
}

#[cfg(test)]
mod tests {
  use super::slugify;

  #[test]
  fn punctuation_is_stripped() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
  }

  #[test]
  fn runs_of_separators_collapse() {
    assert_eq!(
      slugify("  multiple   spaces--and--dashes "),
      "multiple-spaces-and-dashes"
    );
  }

  #[test]
  fn idempotent() {
    for text in ["Hello, World!", "  a -- b ", "Ação & Reação", "2024: A Review"] {
      let once = slugify(text);
      assert_eq!(slugify(&once), once);
    }
  }

  #[test]
  fn interior_punctuation_is_not_a_separator() {
    assert_eq!(slugify("don't panic"), "dont-panic");
  }

  #[test]
  fn underscores_survive() {
    assert_eq!(slugify("my_project name"), "my_project-name");
  }

  #[test]
  fn unicode_letters_survive_lowercased() {
    assert_eq!(slugify("Portfólio Açaí"), "portfólio-açaí");
  }

  #[test]
  fn hopeless_input_yields_empty() {
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("!!! ???"), "");
    assert_eq!(slugify("---"), "");
  }

  #[test]
  fn leading_and_trailing_separators_trimmed() {
    assert_eq!(slugify("-- Chapter 1: Introduction --"), "chapter-1-introduction");
  }
}
