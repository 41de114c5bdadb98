use serde::{Deserialize, Serialize};

/// One row of the education block. Every leaf is a plain string so the
/// server-side template can render whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub year: String,
    pub score: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub class10: EducationEntry,
    pub inter: EducationEntry,
    pub degree: EducationEntry,
}

/// Snapshot of the builder form, sent to `/preview`, `/suggest` and `/generate`.
///
/// `skills` and `experience` never hold empty entries; see [`split_skills`]
/// and [`split_experience`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Education,
}

/// Splits a comma-separated skills field, trimming each token and dropping empties.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits the experience field on runs of newlines. Segments are kept as typed.
pub fn split_experience(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_drop_blank_tokens() {
        assert_eq!(split_skills("A, , B"), vec!["A", "B"]);
    }

    #[test]
    fn test_skills_preserve_order() {
        assert_eq!(
            split_skills("Rust,  SQL ,Go,"),
            vec!["Rust", "SQL", "Go"]
        );
    }

    #[test]
    fn test_skills_empty_input() {
        assert!(split_skills("").is_empty());
        assert!(split_skills(" , ,").is_empty());
    }

    #[test]
    fn test_experience_collapses_newline_runs() {
        assert_eq!(split_experience("a\n\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_experience_single_line() {
        assert_eq!(split_experience("Intern"), vec!["Intern"]);
        assert!(split_experience("\n\n").is_empty());
    }

    #[test]
    fn test_record_serializes_with_education_keys() {
        let record = ResumeRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "");
        assert_eq!(json["skills"], serde_json::json!([]));
        assert_eq!(json["education"]["class10"]["school"], "");
        assert_eq!(json["education"]["inter"]["year"], "");
        assert_eq!(json["education"]["degree"]["score"], "");
    }
}
