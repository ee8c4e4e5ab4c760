//! Field extraction from loosely formatted "Label: value" text.
//!
//! A `FieldExtractor` runs an ordered list of strategies, most precise first.
//! The first strategy that yields a non-empty value wins. A label that is
//! present but carries no value marks the field as blank: label-free strategies
//! are skipped so an unrelated line cannot be borrowed to fill it.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;
use tracing::{debug, warn};

/// Outcome of one strategy for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    /// A candidate label is present but its value is empty.
    Blank,
    Missing,
}

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Label-free strategies are skipped once a label has been seen blank.
    fn requires_label(&self) -> bool {
        true
    }

    fn extract(&self, text: &str, labels: &[&str]) -> Extraction;
}

/// `^<label>[ \t]*(.*)$`, case-insensitive, multi-line. Labels are tried in order.
/// Each label's pattern is compiled on first use and reused afterwards.
#[derive(Default)]
pub struct AnchoredLabel {
    patterns: RwLock<HashMap<String, Regex>>,
}

impl AnchoredLabel {
    fn pattern(&self, label: &str) -> Regex {
        if let Some(re) = self
            .patterns
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(label)
        {
            return re.clone();
        }

        let re = Regex::new(&format!(r"(?im)^{}[ \t]*(.*)$", regex::escape(label)))
            .expect("escaped label is a valid pattern");
        self.patterns
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(label.to_string())
            .or_insert(re)
            .clone()
    }

    #[cfg(test)]
    fn compiled_count(&self) -> usize {
        self.patterns.read().unwrap().len()
    }
}

impl ExtractionStrategy for AnchoredLabel {
    fn name(&self) -> &'static str {
        "anchored_label"
    }

    fn extract(&self, text: &str, labels: &[&str]) -> Extraction {
        let mut seen_blank = false;

        for label in labels {
            if let Some(caps) = self.pattern(label).captures(text) {
                let value = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                if !value.is_empty() {
                    return Extraction::Found(value.to_string());
                }
                seen_blank = true;
            }
        }

        if seen_blank {
            Extraction::Blank
        } else {
            Extraction::Missing
        }
    }
}

/// Any line containing a label's text (colon stripped), value after the line's
/// first colon. A line without a colon yields the whole line.
pub struct LineScan;

impl ExtractionStrategy for LineScan {
    fn name(&self) -> &'static str {
        "line_scan"
    }

    fn extract(&self, text: &str, labels: &[&str]) -> Extraction {
        let needles: Vec<String> = labels
            .iter()
            .map(|l| l.replacen(':', "", 1).to_lowercase())
            .filter(|n| !n.trim().is_empty())
            .collect();
        let mut seen_blank = false;

        for line in text.lines() {
            let lower = line.to_lowercase();
            for needle in &needles {
                if !lower.contains(needle.as_str()) {
                    continue;
                }
                let value = match line.split_once(':') {
                    Some((_, rest)) => rest.trim(),
                    None => line.trim(),
                };
                if !value.is_empty() {
                    return Extraction::Found(value.to_string());
                }
                seen_blank = true;
            }
        }

        if seen_blank {
            Extraction::Blank
        } else {
            Extraction::Missing
        }
    }
}

/// Last resort: the value of the first line that has something after a colon.
pub struct AnyColonLine;

impl ExtractionStrategy for AnyColonLine {
    fn name(&self) -> &'static str {
        "any_colon_line"
    }

    fn requires_label(&self) -> bool {
        false
    }

    fn extract(&self, text: &str, _labels: &[&str]) -> Extraction {
        text.lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(_, rest)| rest.trim())
            .find(|value| !value.is_empty())
            .map(|value| Extraction::Found(value.to_string()))
            .unwrap_or(Extraction::Missing)
    }
}

pub struct FieldExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(AnchoredLabel::default()),
            Box::new(LineScan),
            Box::new(AnyColonLine),
        ])
    }
}

impl FieldExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the best value for any of `labels`, or `default` when nothing matches.
    pub fn extract(&self, text: &str, labels: &[&str], default: &str) -> String {
        let mut label_blank = false;

        for strategy in &self.strategies {
            if label_blank && !strategy.requires_label() {
                continue;
            }
            match strategy.extract(text, labels) {
                Extraction::Found(value) => {
                    debug!("Field {:?} extracted by {}", labels.first(), strategy.name());
                    return value;
                }
                Extraction::Blank => label_blank = true,
                Extraction::Missing => {}
            }
        }

        warn!(
            "Failed to extract field for labels: {} (label present but empty: {})",
            labels.join(", "),
            label_blank
        );
        default.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPANY: &[&str] = &["Company:", "Organization:", "Employer:"];

    #[test]
    fn test_anchored_label_at_line_start() {
        let text = "Job title: Data Analyst\nCompany: Equity Bank";
        assert_eq!(
            AnchoredLabel::default().extract(text, COMPANY),
            Extraction::Found("Equity Bank".to_string())
        );
    }

    #[test]
    fn test_anchored_label_is_case_insensitive() {
        let text = "COMPANY:   KCB Group  ";
        assert_eq!(
            AnchoredLabel::default().extract(text, COMPANY),
            Extraction::Found("KCB Group".to_string())
        );
    }

    #[test]
    fn test_anchored_label_does_not_match_indented_line() {
        let text = "Job title: Data Analyst\n   Company: Equity Bank";
        assert_eq!(AnchoredLabel::default().extract(text, COMPANY), Extraction::Missing);
    }

    #[test]
    fn test_anchored_label_does_not_read_next_line() {
        let text = "Company:\nLocation: Nairobi";
        assert_eq!(AnchoredLabel::default().extract(text, COMPANY), Extraction::Blank);
    }

    #[test]
    fn test_anchored_label_tries_synonyms_in_order() {
        let text = "Employer: Twiga Foods\nOrganization: Savannah Holdings";
        assert_eq!(
            AnchoredLabel::default().extract(text, COMPANY),
            Extraction::Found("Savannah Holdings".to_string())
        );
    }

    #[test]
    fn test_line_scan_handles_indentation_and_extra_words() {
        let text = "Job title: Accountant\n   Estimated salary range: KSh 90,000";
        assert_eq!(
            LineScan.extract(text, &["Salary:"]),
            Extraction::Found("KSh 90,000".to_string())
        );
    }

    #[test]
    fn test_line_scan_keeps_colons_in_value() {
        let text = "   URL: https://fuzu.com/kenya/jobs";
        assert_eq!(
            LineScan.extract(text, &["URL:"]),
            Extraction::Found("https://fuzu.com/kenya/jobs".to_string())
        );
    }

    #[test]
    fn test_line_scan_without_colon_returns_whole_line() {
        let text = "Company Acme Ltd";
        assert_eq!(
            LineScan.extract(text, COMPANY),
            Extraction::Found("Company Acme Ltd".to_string())
        );
    }

    #[test]
    fn test_any_colon_line_takes_first_value() {
        let text = "no colon here\nSector:\nIndustry: Fintech\nOther: x";
        assert_eq!(
            AnyColonLine.extract(text, COMPANY),
            Extraction::Found("Fintech".to_string())
        );
    }

    #[test]
    fn test_cascade_falls_through_to_last_resort() {
        let text = "Sector: Agriculture";
        let value = FieldExtractor::default().extract(text, COMPANY, "");
        assert_eq!(value, "Agriculture");
    }

    #[test]
    fn test_cascade_blank_label_does_not_borrow_other_lines() {
        let text = "Job title: Driver\n   Company:\n   Location: Thika";
        let value = FieldExtractor::default().extract(text, COMPANY, "");
        assert_eq!(value, "");
    }

    #[test]
    fn test_blank_anchored_label_still_allows_synonym_line() {
        let text = "Company:\n   Employer: Kenya Power";
        let value = FieldExtractor::default().extract(text, COMPANY, "");
        assert_eq!(value, "Kenya Power");
    }

    #[test]
    fn test_no_colon_anywhere_returns_default() {
        let value = FieldExtractor::default().extract("just prose", &["Duration:"], "n/a");
        assert_eq!(value, "n/a");
    }

    #[test]
    fn test_label_with_regex_metacharacters_is_escaped() {
        let text = "Salary (KSh): 50,000";
        assert_eq!(
            AnchoredLabel::default().extract(text, &["Salary (KSh):"]),
            Extraction::Found("50,000".to_string())
        );
    }

    #[test]
    fn test_anchored_label_compiles_each_label_once() {
        let strategy = AnchoredLabel::default();
        for text in ["Company: Equity Bank", "Employer: Twiga Foods", "nothing here"] {
            strategy.extract(text, COMPANY);
        }
        assert_eq!(strategy.compiled_count(), COMPANY.len());
        assert_eq!(
            strategy.extract("Organization: KenGen", COMPANY),
            Extraction::Found("KenGen".to_string())
        );
        assert_eq!(strategy.compiled_count(), COMPANY.len());
    }
}
