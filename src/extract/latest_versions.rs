use anyhow::Result;
use select::document::Document;

use crate::extract::RunContext;
use crate::fetch::fetch;
use crate::finder::{find_all, must_find, try_find, StructuralParseError, TagQuery};
use crate::parse::version_label;
use crate::rows::Rows;
use crate::session::Session;

const ALL_VERSIONS_MARKER: &str = "All versions";

/// Documentation versions listed in the sidebar of the main page.
pub fn latest_versions<S: Session + ?Sized>(ctx: &RunContext<S>) -> Result<Option<Rows<3>>> {
    let page = match fetch(ctx.session, &ctx.config.main_doc_url).into_page() {
        Some(page) => page,
        None => return Ok(None),
    };

    let document = Document::from(page.body.as_str());
    let sidebar = must_find(
        &document,
        &TagQuery::new("div").attr("class", "sphinxsidebarwrapper"),
    )?;
    let versions = find_all(sidebar, &TagQuery::new("ul"))
        .into_iter()
        .find(|ul| ul.text().contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| {
            StructuralParseError::TagNotFound(format!("<ul> containing {ALL_VERSIONS_MARKER:?}"))
        })?;

    let mut rows = Rows::new(["Link to documentation", "Version", "Status"]);
    for item in find_all(versions, &TagQuery::new("li")) {
        let anchor = match try_find(item, &TagQuery::new("a")) {
            Some(anchor) => anchor,
            None => {
                log::debug!("Skipping version entry without a link: {}", item.text().trim());
                continue;
            }
        };
        let link = anchor.attr("href").unwrap_or_default().to_string();
        let (version, status) = version_label(&anchor.text());
        rows.push([link, version, status]);
    }

    Ok(Some(rows))
}
