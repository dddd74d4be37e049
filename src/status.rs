use std::collections::BTreeMap;
use std::fmt;

use crate::rows::Rows;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Expected status set for key {0:?} is empty")]
    EmptyStatusSet(String),
}

/// Statuses a PEP may carry given the status letter of its index code.
#[derive(Debug, Clone)]
pub struct ExpectedStatusTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ExpectedStatusTable {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        if let Some((key, _)) = entries.iter().find(|(_, statuses)| statuses.is_empty()) {
            return Err(ConfigError::EmptyStatusSet(key.clone()));
        }
        Ok(Self { entries })
    }

    /// Never fails, keys missing from the table give [`Expected::Unknown`].
    pub fn lookup(&self, key: &str) -> Expected<'_> {
        match self.entries.get(key) {
            Some(statuses) => Expected::Statuses(statuses),
            None => Expected::Unknown,
        }
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'t> {
    Statuses(&'t [String]),
    Unknown,
}

impl Expected<'_> {
    pub fn accepts(&self, status: &str) -> bool {
        match self {
            Self::Statuses(statuses) => statuses.iter().any(|s| s == status),
            Self::Unknown => false,
        }
    }
}

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statuses(statuses) => write!(f, "{}", statuses.join(", ")),
            Self::Unknown => write!(f, "unknown status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord<'t> {
    pub link: String,
    pub observed: String,
    pub expected: Expected<'t>,
}

/// Occurrences per observed status, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn add(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, count)| (s.as_str(), *count))
    }
}

/// Compares the statuses found on detail pages with what the index promised.
pub struct Reconciler<'t> {
    table: &'t ExpectedStatusTable,
    tally: StatusTally,
    mismatches: Vec<MismatchRecord<'t>>,
    seen: usize,
}

impl<'t> Reconciler<'t> {
    pub fn new(table: &'t ExpectedStatusTable) -> Self {
        Self {
            table,
            tally: StatusTally::default(),
            mismatches: Vec::new(),
            seen: 0,
        }
    }

    /// Counts an index row towards the total, whether or not it ends up
    /// classified. Returns what the row's status key allows.
    pub fn row(&mut self, status_key: &str) -> Expected<'t> {
        self.seen += 1;
        self.table.lookup(status_key)
    }

    pub fn record(&mut self, link: &str, expected: Expected<'t>, observed: &str) {
        if !expected.accepts(observed) {
            self.mismatches.push(MismatchRecord {
                link: link.to_string(),
                observed: observed.to_string(),
                expected,
            });
        }
        self.tally.add(observed);
    }

    pub fn finish(self) -> Reconciliation<'t> {
        Reconciliation {
            tally: self.tally,
            mismatches: self.mismatches,
            total: self.seen,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<'t> {
    pub tally: StatusTally,
    pub mismatches: Vec<MismatchRecord<'t>>,
    /// Index rows seen, including those whose detail page was skipped.
    pub total: usize,
}

impl Reconciliation<'_> {
    pub fn log_mismatches(&self) {
        if self.mismatches.is_empty() {
            log::info!("No mismatched statuses");
        } else {
            log::info!("{}", format_mismatches(&self.mismatches));
        }
    }

    pub fn to_rows(&self) -> Rows<2> {
        let mut rows = Rows::new(["Status", "Count"]);
        for (status, count) in self.tally.iter() {
            rows.push([status.to_string(), count.to_string()]);
        }
        rows.push(["Total".to_string(), self.total.to_string()]);
        rows
    }
}

pub fn format_mismatches(mismatches: &[MismatchRecord]) -> String {
    let mut message = String::from("Mismatched statuses:");
    for m in mismatches {
        message.push_str(&format!(
            "\n{}\nStatus on page: {}\nExpected statuses: {}",
            m.link, m.observed, m.expected
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;

    fn table() -> ExpectedStatusTable {
        ExpectedStatusTable::new(ParserConfig::default().expected_status).unwrap()
    }

    #[test]
    fn every_default_key_has_statuses() {
        let table = table();
        for key in table.keys() {
            match table.lookup(key) {
                Expected::Statuses(statuses) => assert!(!statuses.is_empty()),
                Expected::Unknown => panic!("key {key:?} unresolved"),
            }
        }
    }

    #[test]
    fn unmapped_key_is_unknown() {
        let table = table();
        assert_eq!(table.lookup("Z"), Expected::Unknown);
        assert!(!Expected::Unknown.accepts("Final"));
        assert_eq!(Expected::Unknown.to_string(), "unknown status");
    }

    #[test]
    fn empty_set_rejected() {
        let entries = BTreeMap::from([("F".to_string(), vec![])]);
        let err = ExpectedStatusTable::new(entries).unwrap_err();
        assert_eq!(err.to_string(), r#"Expected status set for key "F" is empty"#);
    }

    #[test]
    fn active_matches_a() {
        let table = table();
        let mut reconciler = Reconciler::new(&table);
        let expected = reconciler.row("A");
        reconciler.record("pep-1", expected, "Active");
        let result = reconciler.finish();
        assert!(result.mismatches.is_empty());
        assert_eq!(result.tally.get("Active"), 1);
    }

    #[test]
    fn draft_mismatches_a() {
        let table = table();
        let mut reconciler = Reconciler::new(&table);
        let expected = reconciler.row("A");
        reconciler.record("pep-1", expected, "Draft");
        let result = reconciler.finish();
        let accepted = vec!["Active".to_string(), "Accepted".to_string()];
        assert_eq!(
            result.mismatches,
            vec![MismatchRecord {
                link: "pep-1".into(),
                observed: "Draft".into(),
                expected: Expected::Statuses(&accepted),
            }]
        );
        assert_eq!(result.tally.get("Draft"), 1);
    }

    #[test]
    fn total_counts_unclassified_rows() {
        let table = table();
        let mut reconciler = Reconciler::new(&table);
        let expected = reconciler.row("F");
        reconciler.record("pep-1", expected, "Final");
        reconciler.row("F");
        let expected = reconciler.row("");
        reconciler.record("pep-3", expected, "Draft");
        let expected = reconciler.row("F");
        reconciler.record("pep-4", expected, "Final");

        let rows = reconciler.finish().to_rows();
        let expected_rows: Vec<[String; 2]> = vec![
            ["Final".into(), "2".into()],
            ["Draft".into(), "1".into()],
            ["Total".into(), "4".into()],
        ];
        assert_eq!(rows.data(), expected_rows.as_slice());
    }

    #[test]
    fn smaller_table_can_be_substituted() {
        let entries = BTreeMap::from([("F".to_string(), vec!["Final".to_string()])]);
        let table = ExpectedStatusTable::new(entries).unwrap();
        let mut reconciler = Reconciler::new(&table);
        let expected = reconciler.row("A");
        reconciler.record("pep-9", expected, "Active");
        assert_eq!(reconciler.finish().mismatches.len(), 1);
    }

    #[test]
    fn mismatch_batch_format() {
        let statuses = vec!["Final".to_string()];
        let message = format_mismatches(&[MismatchRecord {
            link: "https://peps.python.org/pep-0008/".into(),
            observed: "Active".into(),
            expected: Expected::Statuses(&statuses),
        }]);
        assert_eq!(
            message,
            "Mismatched statuses:\nhttps://peps.python.org/pep-0008/\n\
             Status on page: Active\nExpected statuses: Final"
        );
    }
}
