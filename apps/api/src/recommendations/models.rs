use std::fmt;

use serde::{Deserialize, Serialize};

/// Which catalog a request targets. Drives prompt selection, the label table
/// used by the parser and the shape of every record in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Job,
    Course,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Job => "job",
            RecommendationKind::Course => "course",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One AI (or catalog) request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub kind: RecommendationKind,
    pub skills: Vec<String>,
    pub location: String,
}

impl RecommendationRequest {
    pub fn new(kind: RecommendationKind, skills: Vec<String>, location: impl Into<String>) -> Self {
        Self {
            kind,
            skills,
            location: location.into(),
        }
    }

    /// Skills as they appear in prompts: `"Rust, SQL"`.
    pub fn skills_display(&self) -> String {
        self.skills.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text, comma or semicolon delimited.
    pub skills: String,
    pub salary: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: String,
    pub provider: String,
    pub location: String,
    pub skills: String,
    pub duration: String,
    pub benefits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single recommendation. The kind tag lives in the enum, never in the JSON:
/// on the wire a job and a course are plain objects with their own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    Job(JobRecord),
    Course(CourseRecord),
}

impl Recommendation {
    pub fn kind(&self) -> RecommendationKind {
        match self {
            Recommendation::Job(_) => RecommendationKind::Job,
            Recommendation::Course(_) => RecommendationKind::Course,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Recommendation::Job(job) => &job.title,
            Recommendation::Course(course) => &course.title,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Recommendation::Job(job) => job.url.as_deref(),
            Recommendation::Course(course) => course.url.as_deref(),
        }
    }

    /// True when every field, `url` included, holds non-blank text.
    pub fn is_complete(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        let url_filled = self.url().map(filled).unwrap_or(false);
        url_filled
            && match self {
                Recommendation::Job(job) => [
                    &job.title,
                    &job.company,
                    &job.location,
                    &job.skills,
                    &job.salary,
                    &job.description,
                ]
                .iter()
                .all(|s| filled(s)),
                Recommendation::Course(course) => [
                    &course.title,
                    &course.provider,
                    &course.location,
                    &course.skills,
                    &course.duration,
                    &course.benefits,
                ]
                .iter()
                .all(|s| filled(s)),
            }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub items: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn new(items: Vec<Recommendation>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
