use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VERSION_LABEL: Regex =
        Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").unwrap();
}

/// Splits an anchor text like `Python 3.12 (stable)` into version and status.
/// Text that doesn't follow that phrasing is kept whole with an empty status.
pub fn version_label(text: &str) -> (String, String) {
    match VERSION_LABEL.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// The PEP index code is a type letter followed by an optional status letter,
/// e.g. `SF` or `I`; only the status part keys the expectation table.
pub fn status_key(code: &str) -> &str {
    let mut chars = code.chars();
    chars.next();
    chars.as_str()
}

pub fn flatten_lines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Last path segment of a URL, used as the local file name of a download.
pub fn archive_filename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
