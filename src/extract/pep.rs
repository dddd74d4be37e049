use anyhow::Result;
use select::document::Document;

use crate::extract::{resolve, RunContext};
use crate::fetch::fetch;
use crate::finder::{find_all, must_attr, must_find, TagQuery};
use crate::parse::status_key;
use crate::rows::Rows;
use crate::session::Session;
use crate::status::{ExpectedStatusTable, Reconciler, Reconciliation};

/// Walks the numerical PEP index and checks every PEP page's status against
/// the status letter the index shows for it.
pub fn reconcile_peps<'t, S: Session + ?Sized>(
    ctx: &RunContext<S>,
    table: &'t ExpectedStatusTable,
) -> Result<Option<Reconciliation<'t>>> {
    let peps_url = &ctx.config.peps_url;
    let page = match fetch(ctx.session, peps_url).into_page() {
        Some(page) => page,
        None => return Ok(None),
    };

    let document = Document::from(page.body.as_str());
    let section = must_find(
        &document,
        &TagQuery::new("section").attr("id", "numerical-index"),
    )?;
    let index = must_find(section, &TagQuery::new("table").attr("class", "pep-zero-table"))?;
    let tbody = must_find(index, &TagQuery::new("tbody"))?;
    let peps = find_all(tbody, &TagQuery::new("tr"));

    let mut reconciler = Reconciler::new(table);
    let progress = ctx.progress(peps.len(), "pep");
    for pep in peps {
        progress.inc();
        let code = must_find(pep, &TagQuery::new("abbr"))?.text();
        let expected = reconciler.row(status_key(&code));
        let anchor = must_find(pep, &TagQuery::new("a"))?;
        let link = resolve(peps_url, must_attr(anchor, "href")?)?;

        let card = match fetch(ctx.session, &link).or_skip(ctx.config.on_fetch_error)? {
            Some(card) => card,
            None => continue,
        };

        let document = Document::from(card.body.as_str());
        let fields = must_find(&document, &TagQuery::new("dl").attr("class", "field-list"))?;
        let status = must_find(fields, &TagQuery::new("abbr"))?.text();

        reconciler.record(&link, expected, &status);
    }
    progress.finish();

    Ok(Some(reconciler.finish()))
}

/// Status counts over the PEP index, mismatches go to the log.
pub fn pep<S: Session + ?Sized>(
    ctx: &RunContext<S>,
    table: &ExpectedStatusTable,
) -> Result<Option<Rows<2>>> {
    Ok(reconcile_peps(ctx, table)?.map(|reconciliation| {
        reconciliation.log_mismatches();
        reconciliation.to_rows()
    }))
}
