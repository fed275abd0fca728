//! Seed the data file with testimonials from YAML.
//!
//! The file is a list of entries shaped like the public submission form:
//!
//! ```yaml
//! - name: Ana
//!   rating: 5
//!   message: Lovely stay, spotless rooms.
//! ```
//!
//! Every entry is validated before anything is written, so a bad file leaves
//! the data file unchanged.

use std::path::Path;

use tracing::{error, info};

use harborview_server::models::{NewTestimonial, TestimonialForm};
use harborview_server::store::{JsonStore, TestimonialRepository};

/// Parse and validate a seed file.
///
/// Returns the accepted entries, or one message per invalid entry.
pub fn parse_testimonials(content: &str) -> Result<Vec<NewTestimonial>, SeedError> {
    let forms: Vec<TestimonialForm> = serde_yaml::from_str(content)?;

    let mut accepted = Vec::with_capacity(forms.len());
    let mut problems = Vec::new();

    for (index, form) in forms.into_iter().enumerate() {
        match form.validate() {
            Ok(new) => accepted.push(new),
            Err(errors) => problems.push(format!("entry {}: {errors}", index + 1)),
        }
    }

    if problems.is_empty() {
        Ok(accepted)
    } else {
        Err(SeedError::Invalid(problems))
    }
}

/// Errors from reading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{} invalid entries", .0.len())]
    Invalid(Vec<String>),
}

/// Seed testimonials from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, any entry fails validation,
/// or the data file cannot be written.
pub async fn testimonials(
    file: &Path,
    data_file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if !tokio::fs::try_exists(file).await? {
        return Err(format!("File not found: {}", file.display()).into());
    }

    info!(path = %file.display(), "Loading testimonials from file");
    let content = tokio::fs::read_to_string(file).await?;

    let entries = match parse_testimonials(&content) {
        Ok(entries) => entries,
        Err(SeedError::Invalid(problems)) => {
            error!("Seed file validation failed:");
            for problem in &problems {
                error!("  - {problem}");
            }
            return Err(SeedError::Invalid(problems).into());
        }
        Err(e) => return Err(e.into()),
    };

    let store = JsonStore::open(data_file).await?;
    let repo = TestimonialRepository::new(&store);

    let count = entries.len();
    for entry in entries {
        repo.create(entry).await?;
    }

    info!(inserted = count, path = %store.path().display(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID: &str = "
- name: Ana
  rating: 5
  message: Lovely stay, spotless rooms.
- name: Ben
  rating: 4
  message: Great breakfast.
";

    #[test]
    fn test_parse_valid_file() {
        let entries = parse_testimonials(VALID).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Ana");
        assert_eq!(entries[1].rating.stars(), 4);
    }

    #[test]
    fn test_parse_reports_each_invalid_entry() {
        let content = "
- name: Ana
  rating: 9
  message: Too many stars.
- name: Ben
  rating: 4
  message: Fine.
- name: \"\"
  rating: 3
  message: No name.
";
        let Err(SeedError::Invalid(problems)) = parse_testimonials(content) else {
            panic!("expected validation failure");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("entry 1:"));
        assert!(problems[1].starts_with("entry 3:"));
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(matches!(
            parse_testimonials("name: [unclosed"),
            Err(SeedError::Yaml(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_writes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.yaml");
        let data = dir.path().join("db.json");
        std::fs::write(&seed, VALID).unwrap();

        testimonials(&seed, &data).await.unwrap();

        let store = JsonStore::open(&data).await.unwrap();
        let all = TestimonialRepository::new(&store).list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.is_approved));
    }

    #[tokio::test]
    async fn test_seed_leaves_store_untouched_on_invalid_entry() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.yaml");
        let data = dir.path().join("db.json");
        std::fs::write(&seed, "- name: Ana\n  rating: 0\n  message: Hm.\n").unwrap();

        assert!(testimonials(&seed, &data).await.is_err());
        assert!(!data.exists());
    }
}
