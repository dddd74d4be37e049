use anyhow::Result;
use select::document::Document;

use crate::extract::{resolve, RunContext};
use crate::fetch::fetch;
use crate::finder::{find_all, must_attr, must_find, TagQuery};
use crate::parse::flatten_lines;
use crate::rows::Rows;
use crate::session::Session;

/// Title and editors of every "What's New" article.
pub fn whats_new<S: Session + ?Sized>(ctx: &RunContext<S>) -> Result<Option<Rows<3>>> {
    let index_url = resolve(&ctx.config.main_doc_url, "whatsnew/")?;
    let page = match fetch(ctx.session, &index_url).into_page() {
        Some(page) => page,
        None => return Ok(None),
    };

    let document = Document::from(page.body.as_str());
    let main = must_find(
        &document,
        &TagQuery::new("section").attr("id", "what-s-new-in-python"),
    )?;
    let toctree = must_find(main, &TagQuery::new("div").attr("class", "toctree-wrapper"))?;
    let entries = find_all(toctree, &TagQuery::new("li").attr("class", "toctree-l1"));

    let mut rows = Rows::new(["Link to article", "Title", "Editor, author"]);
    let progress = ctx.progress(entries.len(), "whats-new");
    for entry in entries {
        progress.inc();
        let anchor = must_find(entry, &TagQuery::new("a"))?;
        let link = resolve(&index_url, must_attr(anchor, "href")?)?;

        let article = match fetch(ctx.session, &link).or_skip(ctx.config.on_fetch_error)? {
            Some(article) => article,
            None => continue,
        };

        let document = Document::from(article.body.as_str());
        let h1 = must_find(&document, &TagQuery::new("h1"))?;
        let dl = must_find(&document, &TagQuery::new("dl"))?;

        rows.push([link, h1.text(), flatten_lines(&dl.text())]);
    }
    progress.finish();

    Ok(Some(rows))
}
