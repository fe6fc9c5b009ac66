//! The resume record fed into the exporter.
//!
//! Resume JSON comes from form state, so every field is optional and several
//! fields have had more than one name over time; the aliases keep older
//! documents loading. `skills` and `languages` show up either as a single
//! comma-separated string or as an array of strings, and [`StringList`] accepts
//! both.

use crate::error::Result;
use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

pub mod sample;

/// Placeholder shown when a resume carries no name at all.
pub const PLACEHOLDER_NAME: &str = "Your Name";

/// Reads `null` the same as a missing field. Form state writes cleared inputs as
/// `null`, which `#[serde(default)]` alone does not accept.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Either a comma-separated string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Joined(String),
    Items(Vec<String>),
}

impl Default for StringList {
    fn default() -> Self {
        StringList::Items(Vec::new())
    }
}

impl StringList {
    /// Trimmed, non-empty entries in their original order.
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            StringList::Joined(s) => s.split(',').collect(),
            StringList::Items(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl From<&str> for StringList {
    fn from(value: &str) -> Self {
        StringList::Joined(value.to_string())
    }
}

impl From<Vec<String>> for StringList {
    fn from(value: Vec<String>) -> Self {
        StringList::Items(value)
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(alias = "position")]
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    #[serde(alias = "school")]
    pub institution: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    #[serde(alias = "issueDate")]
    pub date: Option<String>,
    pub credential_id: Option<String>,
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(alias = "title")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: StringList,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "address")]
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    #[serde(alias = "portfolio")]
    pub website: Option<String>,
    pub professional_summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: StringList,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: StringList,
}

/// Returns the trimmed value if it carries any text.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ResumeData {
    pub fn from_json(json: &str) -> Result<ResumeData> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<ResumeData> {
        let contents = std::fs::read_to_string(path)?;
        ResumeData::from_json(&contents)
    }

    fn name_parts(&self) -> Vec<&str> {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(non_empty)
            .collect()
    }

    /// The name as it appears in the resume header.
    pub fn display_name(&self) -> String {
        let parts = self.name_parts();
        if parts.is_empty() {
            PLACEHOLDER_NAME.to_string()
        } else {
            parts.join(" ")
        }
    }

    /// File name for the exported PDF, e.g. `Ada_Lovelace.pdf`.
    pub fn file_name(&self) -> String {
        let parts: Vec<String> = self
            .name_parts()
            .into_iter()
            .map(|part| {
                part.chars()
                    .map(|c| match c {
                        '/' | '\\' | '\0' => '-',
                        c => c,
                    })
                    .collect()
            })
            .collect();

        if parts.is_empty() {
            "Resume.pdf".to_string()
        } else {
            format!("{}.pdf", parts.join("_"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_valid_resume() {
        let resume = ResumeData::from_json("{}").expect("can parse empty resume");
        assert_eq!(resume, ResumeData::default());
        assert_eq!(resume.display_name(), "Your Name");
        assert_eq!(resume.file_name(), "Resume.pdf");
    }

    #[test]
    fn file_name_joins_non_empty_parts() {
        let resume = ResumeData {
            first_name: Some("Ada".to_string()),
            middle_name: Some("  ".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.file_name(), "Ada_Lovelace.pdf");
        assert_eq!(resume.display_name(), "Ada Lovelace");

        let resume = ResumeData {
            first_name: Some("Grace".to_string()),
            middle_name: Some("Brewster".to_string()),
            last_name: Some("Hopper".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.file_name(), "Grace_Brewster_Hopper.pdf");

        let resume = ResumeData {
            last_name: Some("Turing".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.file_name(), "Turing.pdf");
    }

    #[test]
    fn file_name_never_contains_path_separators() {
        let resume = ResumeData {
            first_name: Some("AC/DC".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.file_name(), "AC-DC.pdf");
    }

    #[test]
    fn skills_accept_both_representations() {
        let joined = ResumeData::from_json(r#"{"skills": "Rust, Go , ,SQL"}"#).unwrap();
        let listed = ResumeData::from_json(r#"{"skills": ["Rust", " Go", "", "SQL"]}"#).unwrap();
        assert_eq!(joined.skills.items(), vec!["Rust", "Go", "SQL"]);
        assert_eq!(joined.skills.items(), listed.skills.items());
        assert!(ResumeData::default().languages.is_empty());
    }

    #[test]
    fn cleared_fields_may_be_null() {
        let json = r#"{
            "firstName": null,
            "skills": null,
            "languages": null,
            "workExperience": null,
            "certifications": null,
            "education": [{"degree": "BSc", "gpa": null}],
            "projects": [{"name": "Note G", "technologies": null}]
        }"#;
        let resume = ResumeData::from_json(json).expect("can parse resume with nulls");
        assert!(resume.skills.is_empty());
        assert!(resume.languages.is_empty());
        assert!(resume.work_experience.is_empty());
        assert!(resume.certifications.is_empty());
        assert_eq!(resume.education[0].gpa, None);
        assert!(resume.projects[0].technologies.is_empty());
        assert_eq!(resume.file_name(), "Resume.pdf");

        let job = ResumeData::from_json(r#"{"workExperience": [{"current": null}]}"#)
            .expect("can parse null flag");
        assert!(!job.work_experience[0].current);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{
            "firstName": "Ada",
            "address": "London",
            "portfolio": "https://example.org",
            "workExperience": [{"position": "Analyst", "company": "Analytical Engines"}],
            "education": [{"school": "Home", "degree": "Mathematics"}],
            "certifications": [{"name": "Difference Engine", "issueDate": "1843-09"}],
            "projects": [{"title": "Note G", "technologies": "Punch cards"}]
        }"#;
        let resume = ResumeData::from_json(json).expect("can parse legacy resume");
        assert_eq!(resume.location.as_deref(), Some("London"));
        assert_eq!(resume.website.as_deref(), Some("https://example.org"));
        assert_eq!(resume.work_experience[0].job_title.as_deref(), Some("Analyst"));
        assert_eq!(resume.education[0].institution.as_deref(), Some("Home"));
        assert_eq!(resume.certifications[0].date.as_deref(), Some("1843-09"));
        assert_eq!(resume.projects[0].name.as_deref(), Some("Note G"));
        assert_eq!(resume.projects[0].technologies.items(), vec!["Punch cards"]);
    }

    #[test]
    fn can_build_entries_with_builder_pattern() {
        let job = WorkExperienceBuilder::default()
            .job_title("Engineer")
            .company("Acme")
            .current(true)
            .build()
            .expect("can build work experience");
        assert_eq!(job.job_title.as_deref(), Some("Engineer"));
        assert!(job.current);
        assert_eq!(job.end_date, None);
    }
}
