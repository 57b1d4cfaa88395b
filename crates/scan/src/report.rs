//! Categorized issue report.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    pub category: String,
    pub detail: String,
}

impl ScanIssue {
    pub fn new(category: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            detail: detail.into(),
        }
    }
}

/// Issues grouped by category, in the order categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    groups: Vec<(String, Vec<String>)>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: impl Into<String>, detail: impl Into<String>) {
        let category = category.into();
        let detail = detail.into();
        match self.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, details)) => details.push(detail),
            None => self.groups.push((category, vec![detail])),
        }
    }

    pub fn push(&mut self, issue: ScanIssue) {
        self.add(issue.category, issue.detail);
    }

    /// Details reported under `category`.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, d)| d.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(c, d)| (c.as_str(), d.as_slice()))
    }

    /// Total number of reported items.
    pub fn issue_count(&self) -> usize {
        self.groups.iter().map(|(_, d)| d.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Plain-text rendering, one block per category.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (category, details) in &self.groups {
            out.push_str(&format!("--- {category} ({} game(s)) ---\n", details.len()));
            for detail in details {
                out.push_str(&format!("- {detail}\n"));
            }
            out.push('\n');
        }
        out
    }
}

impl Serialize for ScanReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (category, details) in &self.groups {
            map.serialize_entry(category, details)?;
        }
        map.end()
    }
}
