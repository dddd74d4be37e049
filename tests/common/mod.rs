#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use docs_parser::anyhow::{anyhow, Result};
use docs_parser::{ParserConfig, Session};

pub const MAIN: &str = "https://docs.test/3/";
pub const PEPS: &str = "https://peps.test/";

/// Serves canned pages, anything else fails like an unreachable host.
#[derive(Default)]
pub struct MemorySession {
    pages: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Session for MemorySession {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {url}"))
    }
}

pub fn config() -> ParserConfig {
    ParserConfig {
        main_doc_url: MAIN.to_string(),
        peps_url: PEPS.to_string(),
        ..Default::default()
    }
}
