use std::hash::Hasher;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use fnv::FnvHasher;
use reqwest::header::USER_AGENT;

use crate::config::ParserConfig;

/// Something that can GET a URL and hand back the raw body.
pub trait Session {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP client whose successful responses are kept on disk, one file
/// per URL, and served from there on later runs. Each entry starts with the
/// URL it was fetched from on its own line, then the raw body.
pub struct CachedSession {
    client: reqwest::blocking::Client,
    user_agent: String,
    cache_dir: PathBuf,
}

impl CachedSession {
    pub fn new(config: &ParserConfig) -> Result<Self> {
        let client = reqwest::blocking::ClientBuilder::new()
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        fs_err::create_dir_all(&config.cache_dir)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            cache_dir: config.cache_dir.clone(),
        })
    }

    #[cfg(test)]
    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }

    /// Drops every cached response.
    pub fn clear(&self) -> Result<()> {
        let mut removed = 0;
        for entry in fs_err::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs_err::remove_file(&path)?;
                removed += 1;
            }
        }
        log::info!(
            "Cleared {removed} cached responses from {}",
            self.cache_dir.display()
        );
        Ok(())
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(cache_key(url))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()?
            .error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

impl Session for CachedSession {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(url);
        match fs_err::read(&path) {
            Ok(entry) => match entry_body(&entry, url) {
                Some(body) => {
                    log::debug!("Cache hit: {url}");
                    return Ok(body.to_vec());
                }
                None => {
                    log::debug!("Cache entry {} belongs to another URL", path.display())
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => (),
            Err(e) => log::warn!("Ignoring unreadable cache entry for {url}: {e}"),
        }

        let body = self.download(url)?;
        let mut entry = Vec::with_capacity(url.len() + 1 + body.len());
        entry.extend_from_slice(url.as_bytes());
        entry.push(b'\n');
        entry.extend_from_slice(&body);
        fs_err::write(&path, &entry)
            .with_context(|| format!("Couldn't cache response for {url}"))?;
        Ok(body)
    }
}

/// Fixed-length file name derived from a 64-bit FNV hash of the URL.
fn cache_key(url: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(url.as_bytes());
    format!("{:016x}.cache", hasher.finish())
}

/// Body of a cache entry, `None` when the entry was stored for another URL.
fn entry_body<'e>(entry: &'e [u8], url: &str) -> Option<&'e [u8]> {
    let split = entry.iter().position(|b| *b == b'\n')?;
    let (stored_url, rest) = entry.split_at(split);
    (stored_url == url.as_bytes()).then(|| &rest[1..])
}
