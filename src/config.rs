use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    #[serde(default = "default_main_doc_url")]
    pub main_doc_url: String,

    #[serde(default = "default_peps_url")]
    pub peps_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,

    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_log_file_name")]
    pub log_file_name: String,

    /// A log file at least this big is rotated when the parser starts.
    #[serde(default = "default_log_max_bytes")]
    pub log_max_bytes: u64,

    #[serde(default = "default_log_backup_count")]
    pub log_backup_count: usize,

    #[serde(default = "default_on_fetch_error")]
    pub on_fetch_error: OnError,

    #[serde(default = "default_expected_status")]
    pub expected_status: BTreeMap<String, Vec<String>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            main_doc_url: default_main_doc_url(),
            peps_url: default_peps_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            cache_dir: default_cache_dir(),
            downloads_dir: default_downloads_dir(),
            results_dir: default_results_dir(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file_name: default_log_file_name(),
            log_max_bytes: default_log_max_bytes(),
            log_backup_count: default_log_backup_count(),
            on_fetch_error: default_on_fetch_error(),
            expected_status: default_expected_status(),
        }
    }
}

impl ParserConfig {
    /// Reads a YAML config file, missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = fs_err::File::open(path.as_ref())?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("Invalid config file {}", path.as_ref().display()))
    }
}

fn default_main_doc_url() -> String {
    String::from("https://docs.python.org/3/")
}

fn default_peps_url() -> String {
    String::from("https://peps.python.org/")
}

fn default_user_agent() -> String {
    String::from(concat!("docs-parser/", env!("CARGO_PKG_VERSION")))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache/http")
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_file_name() -> String {
    String::from("parser.log")
}

fn default_log_max_bytes() -> u64 {
    1_000_000
}

fn default_log_backup_count() -> usize {
    5
}

fn default_on_fetch_error() -> OnError {
    OnError::SkipAndLog
}

const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

fn default_expected_status() -> BTreeMap<String, Vec<String>> {
    EXPECTED_STATUS
        .iter()
        .map(|(key, statuses)| {
            let statuses = statuses.iter().map(|s| s.to_string()).collect();
            (key.to_string(), statuses)
        })
        .collect()
}

/// What to do when a per-entry page cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnError {
    Fail,
    SkipAndLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let conf: ParserConfig = serde_yaml::from_str(
            "mainDocUrl: http://localhost:8000/\nonFetchError: Fail\n",
        )
        .unwrap();

        assert_eq!(conf.main_doc_url, "http://localhost:8000/");
        assert_eq!(conf.on_fetch_error, OnError::Fail);
        assert_eq!(conf.peps_url, "https://peps.python.org/");
        assert_eq!(conf.downloads_dir, PathBuf::from("downloads"));
        assert_eq!(conf.expected_status.len(), 8);
        assert_eq!(conf.log_dir, PathBuf::from("logs"));
        assert_eq!(conf.log_max_bytes, 1_000_000);
        assert_eq!(conf.log_backup_count, 5);
    }

    #[test]
    fn default_table_has_fallback_key() {
        let conf = ParserConfig::default();
        assert_eq!(conf.expected_status[""], vec!["Draft", "Active"]);
        assert_eq!(conf.expected_status["A"], vec!["Active", "Accepted"]);
    }

    #[test]
    fn expected_status_can_be_overridden() {
        let conf: ParserConfig =
            serde_yaml::from_str("expectedStatus:\n  F: [Final]\n").unwrap();
        assert_eq!(conf.expected_status.len(), 1);
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("nope.yaml"));
    }
}
