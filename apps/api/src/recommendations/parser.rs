//! Response Parser: turns a numbered, labelled completion into typed records.
//!
//! The completion is split into blocks on numbered-list markers ("1. ", "2. ").
//! Each block is mapped field by field through the `FieldExtractor` using the
//! label synonym tables below. A block becomes a record only if every field,
//! `url` included, ends up non-empty; otherwise the whole block is dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::recommendations::extractor::FieldExtractor;
use crate::recommendations::links::normalize_url;
use crate::recommendations::models::{
    CourseRecord, JobRecord, Recommendation, RecommendationKind, RecommendationSet,
};

/// A numbered marker at the start of the text or of a line.
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\A|\n)\s*\d+\.\s+").expect("valid numbered marker regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Company,
    Provider,
    Location,
    Skills,
    Salary,
    Duration,
    Description,
    Benefits,
    Url,
}

pub type LabelTable = &'static [(Field, &'static [&'static str])];

pub const JOB_LABELS: LabelTable = &[
    (Field::Title, &["Job title:", "Title:", "Position:", "Job:"]),
    (Field::Company, &["Company:", "Organization:", "Employer:"]),
    (Field::Location, &["Location:", "Place:", "Area:", "City:"]),
    (
        Field::Skills,
        &["Required skills:", "Skills:", "Skills required:", "Competencies:"],
    ),
    (
        Field::Salary,
        &["Estimated salary:", "Salary:", "Salary range:", "Compensation:"],
    ),
    (
        Field::Description,
        &["Description:", "Job description:", "Brief description:", "Details:"],
    ),
    (Field::Url, &["URL:", "Link:", "Website:", "Apply at:"]),
];

pub const COURSE_LABELS: LabelTable = &[
    (Field::Title, &["Course title:", "Title:", "Course:", "Program:"]),
    (
        Field::Provider,
        &["Provider:", "Institution:", "Offered by:", "School:"],
    ),
    (
        Field::Location,
        &["Location:", "Delivery method:", "Mode:", "Place:"],
    ),
    (
        Field::Skills,
        &["Skills gained:", "Skills:", "You will learn:", "Learning outcomes:"],
    ),
    (Field::Duration, &["Duration:", "Length:", "Time:", "Period:"]),
    (
        Field::Benefits,
        &["Benefits:", "Description:", "Brief description:", "Advantages:"],
    ),
    (Field::Url, &["URL:", "Link:", "Website:", "Enroll at:"]),
];

pub fn labels_for(kind: RecommendationKind) -> LabelTable {
    match kind {
        RecommendationKind::Job => JOB_LABELS,
        RecommendationKind::Course => COURSE_LABELS,
    }
}

/// Splits a completion into candidate record blocks. Text without any numbered
/// marker comes back as a single block.
pub fn split_blocks(text: &str) -> Vec<&str> {
    NUMBERED_MARKER
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

#[derive(Default)]
pub struct ResponseParser {
    extractor: FieldExtractor,
}

impl ResponseParser {
    pub fn new(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    /// Every complete record found in `text`, in response order.
    pub fn parse(&self, text: &str, kind: RecommendationKind) -> RecommendationSet {
        let blocks = split_blocks(text);
        debug!("Parsed {} candidate sections", blocks.len());

        let items = blocks
            .into_iter()
            .filter_map(|block| self.parse_block(block, kind))
            .collect();

        RecommendationSet::new(items)
    }

    fn parse_block(&self, block: &str, kind: RecommendationKind) -> Option<Recommendation> {
        let mut values: HashMap<Field, String> = labels_for(kind)
            .iter()
            .map(|(field, labels)| (*field, self.extractor.extract(block, labels, "")))
            .collect();
        let mut take = |field: Field| values.remove(&field).unwrap_or_default();

        let url = normalize_url(Some(take(Field::Url).as_str()));
        let record = match kind {
            RecommendationKind::Job => Recommendation::Job(JobRecord {
                title: take(Field::Title),
                company: take(Field::Company),
                location: take(Field::Location),
                skills: take(Field::Skills),
                salary: take(Field::Salary),
                description: take(Field::Description),
                url,
            }),
            RecommendationKind::Course => Recommendation::Course(CourseRecord {
                title: take(Field::Title),
                provider: take(Field::Provider),
                location: take(Field::Location),
                skills: take(Field::Skills),
                duration: take(Field::Duration),
                benefits: take(Field::Benefits),
                url,
            }),
        };

        if record.is_complete() {
            Some(record)
        } else {
            warn!("Skipping invalid {kind} recommendation due to missing fields: {record:?}");
            None
        }
    }
}
