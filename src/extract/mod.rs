//! One routine per page shape. Each fetches its index page, asserts the
//! layout it depends on with [`must_find`](crate::finder::must_find) and
//! returns rows, or `None` when the index page itself couldn't be fetched.

mod download;
mod latest_versions;
mod pep;
mod whats_new;

pub use download::download;
pub use latest_versions::latest_versions;
pub use pep::{pep, reconcile_peps};
pub use whats_new::whats_new;

use anyhow::{Context, Result};
use reqwest::Url;

use crate::config::ParserConfig;
use crate::progress::Progress;
use crate::session::Session;

/// Everything one run shares across its fetches.
pub struct RunContext<'a, S: ?Sized> {
    pub session: &'a S,
    pub config: &'a ParserConfig,
    pub show_progress: bool,
}

impl<'a, S: Session + ?Sized> RunContext<'a, S> {
    pub fn new(session: &'a S, config: &'a ParserConfig) -> Self {
        Self {
            session,
            config,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress(&self, total: usize, message: &str) -> Progress {
        Progress::new(total, message, self.show_progress)
    }
}

/// Resolves `href` against `base` the way a browser would.
pub fn resolve(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base).with_context(|| format!("Invalid base URL {base}"))?;
    let url = base
        .join(href)
        .with_context(|| format!("Couldn't resolve {href} against {base}"))?;
    Ok(url.into())
}
