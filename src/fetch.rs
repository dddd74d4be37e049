use anyhow::{anyhow, Error, Result};

use crate::config::OnError;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

#[derive(Debug)]
pub struct Absence {
    pub url: String,
    pub cause: Error,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Page(Page),
    Absent(Absence),
}

impl FetchOutcome {
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Page(page) => Some(page),
            Self::Absent(_) => None,
        }
    }

    /// Applies the caller's policy to an absent page: `SkipAndLog` gives
    /// `Ok(None)`, `Fail` turns the absence back into an error.
    pub fn or_skip(self, policy: OnError) -> Result<Option<Page>> {
        match (self, policy) {
            (Self::Page(page), _) => Ok(Some(page)),
            (Self::Absent(Absence { url, .. }), OnError::SkipAndLog) => {
                log::warn!("Skipping {url}");
                Ok(None)
            }
            (Self::Absent(Absence { url, cause }), OnError::Fail) => {
                Err(anyhow!("Couldn't fetch {url} got: {cause:#}"))
            }
        }
    }
}

/// GETs `url` and decodes the body as text. Failures are logged and reported
/// as [`FetchOutcome::Absent`], they never propagate.
pub fn fetch<S: Session + ?Sized>(session: &S, url: &str) -> FetchOutcome {
    match session.get(url) {
        Ok(body) => FetchOutcome::Page(Page {
            url: url.to_string(),
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
        Err(cause) => {
            log::error!("Couldn't fetch {url} got: {cause:#}");
            FetchOutcome::Absent(Absence {
                url: url.to_string(),
                cause,
            })
        }
    }
}
