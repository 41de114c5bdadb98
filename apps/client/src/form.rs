//! Builder form: a fixed field description, the values typed into it, and the
//! action bindings.
//!
//! The description ([`FORM_FIELDS`]) is pure data. Values live in [`FormState`],
//! keyed by the same stable ids, and are only read back through
//! [`FormState::read_record`].

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::warn;

use crate::models::resume::{
    split_experience, split_skills, Education, EducationEntry, ResumeRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    TextArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn input(id: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::Input,
        required,
    }
}

const fn text_area(id: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::TextArea,
        required: false,
    }
}

/// Every field of the builder form, in display order.
pub static FORM_FIELDS: [FieldSpec; 16] = [
    input("name", "Full Name", true),
    input("title", "Professional Title", false),
    input("email", "Email", true),
    input("phone", "Phone", true),
    text_area("summary", "Professional summary"),
    input("edu_10_school", "Class 10 School", false),
    input("edu_10_year", "Year", false),
    input("edu_10_score", "Score", false),
    input("edu_12_school", "Intermediate College", false),
    input("edu_12_year", "Year", false),
    input("edu_12_score", "Score", false),
    input("edu_inst", "Degree College", false),
    input("edu_year", "Year", false),
    input("edu_score", "CGPA", false),
    text_area("experience", "Experience details"),
    input("skills", "Comma-separated skills", false),
];

/// Placeholder values written by the sample-data action.
pub const SAMPLE_DATA: [(&str, &str); 16] = [
    ("name", "John"),
    ("title", "Aspiring Data Scientist"),
    ("email", "email@example.com"),
    ("phone", "+91 9876543210"),
    (
        "summary",
        "Driven data enthusiast with project experience in ML model development.",
    ),
    ("skills", "Python, Pandas, SQL, Scikit-learn, Deep Learning"),
    (
        "experience",
        "Intern - Data Cleaning and Analysis\nML Project - Predictive Model",
    ),
    ("edu_10_school", "School Name"),
    ("edu_10_year", "2022"),
    ("edu_10_score", "95%"),
    ("edu_12_school", "Junior College"),
    ("edu_12_year", "2024"),
    ("edu_12_score", "88%"),
    ("edu_inst", "Engineering  College"),
    ("edu_year", "2028"),
    ("edu_score", "8.6CGPA"),
];

pub fn field_spec(id: &str) -> Option<&'static FieldSpec> {
    FORM_FIELDS.iter().find(|f| f.id == id)
}

/// Current contents of the form. Fields never written read back as `""`.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<&'static str, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field by id. Returns `false` (and changes nothing) for unknown ids.
    pub fn set(&mut self, id: &str, value: impl Into<String>) -> bool {
        match field_spec(id) {
            Some(spec) => {
                self.values.insert(spec.id, value.into());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of a field, as read back into a record.
    fn value(&self, id: &str) -> String {
        self.get(id).trim().to_string()
    }

    pub fn fill_sample(&mut self) {
        for (id, value) in SAMPLE_DATA {
            self.set(id, value);
        }
    }

    /// Loads values from a JSON object keyed by field id. Unknown keys and
    /// non-string values are skipped. Returns the number of fields set.
    pub fn load_json(&mut self, values: &Value) -> usize {
        let Some(map) = values.as_object() else {
            warn!("Form values must be a JSON object; ignoring");
            return 0;
        };

        let mut loaded = 0;
        for (key, value) in map {
            let Some(text) = value.as_str() else {
                warn!("Ignoring non-string value for form field '{key}'");
                continue;
            };
            if self.set(key, text) {
                loaded += 1;
            } else {
                warn!("Ignoring unknown form field '{key}'");
            }
        }
        loaded
    }

    /// Ids of required fields that are currently blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        FORM_FIELDS
            .iter()
            .filter(|f| f.required && self.get(f.id).trim().is_empty())
            .map(|f| f.id)
            .collect()
    }

    /// Snapshot of the form as a [`ResumeRecord`]. Never mutates the fields.
    pub fn read_record(&self) -> ResumeRecord {
        ResumeRecord {
            name: self.value("name"),
            title: self.value("title"),
            email: self.value("email"),
            phone: self.value("phone"),
            summary: self.value("summary"),
            skills: split_skills(&self.value("skills")),
            experience: split_experience(&self.value("experience")),
            education: Education {
                class10: EducationEntry {
                    school: self.value("edu_10_school"),
                    year: self.value("edu_10_year"),
                    score: self.value("edu_10_score"),
                },
                inter: EducationEntry {
                    school: self.value("edu_12_school"),
                    year: self.value("edu_12_year"),
                    score: self.value("edu_12_score"),
                },
                degree: EducationEntry {
                    school: self.value("edu_inst"),
                    year: self.value("edu_year"),
                    score: self.value("edu_score"),
                },
            },
        }
    }
}

/// User-triggerable builder actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    SampleData,
    Preview,
    GenerateSummary,
    EnhanceSummary,
    DownloadPdf,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::SampleData,
        Action::Preview,
        Action::GenerateSummary,
        Action::EnhanceSummary,
        Action::DownloadPdf,
    ];
}

/// Tracks which actions are wired up for the current view activation.
#[derive(Debug, Default)]
pub struct ActionBindings {
    bound: BTreeSet<Action>,
}

impl ActionBindings {
    /// Binds every action not already bound and returns how many were new.
    /// Calling it again is a no-op.
    pub fn bind_all(&mut self) -> usize {
        Action::ALL
            .into_iter()
            .filter(|action| self.bound.insert(*action))
            .count()
    }

    pub fn is_bound(&self, action: Action) -> bool {
        self.bound.contains(&action)
    }
}
