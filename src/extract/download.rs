use std::path::PathBuf;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use select::document::Document;

use crate::extract::{resolve, RunContext};
use crate::fetch::fetch;
use crate::finder::{must_attr, must_find, TagQuery};
use crate::parse::archive_filename;
use crate::session::Session;

lazy_static! {
    static ref PDF_A4_ZIP: Regex = Regex::new(r".*pdf-a4\.zip").unwrap();
}

/// Saves the A4 PDF documentation archive, returns where it was written.
pub fn download<S: Session + ?Sized>(ctx: &RunContext<S>) -> Result<Option<PathBuf>> {
    let downloads_url = resolve(&ctx.config.main_doc_url, "download.html")?;
    let page = match fetch(ctx.session, &downloads_url).into_page() {
        Some(page) => page,
        None => return Ok(None),
    };

    let document = Document::from(page.body.as_str());
    let table = must_find(&document, &TagQuery::new("table").attr("class", "docutils"))?;
    let pdf_a4 = must_find(table, &TagQuery::new("a").attr_matching("href", &PDF_A4_ZIP))?;
    let archive_url = resolve(&downloads_url, must_attr(pdf_a4, "href")?)?;

    let downloads_dir = &ctx.config.downloads_dir;
    fs_err::create_dir_all(downloads_dir)?;
    let archive_path = downloads_dir.join(archive_filename(&archive_url));

    let archive = ctx
        .session
        .get(&archive_url)
        .with_context(|| format!("Couldn't download {archive_url}"))?;
    fs_err::write(&archive_path, archive)?;
    log::info!("Archive downloaded and saved: {}", archive_path.display());

    Ok(Some(archive_path))
}
