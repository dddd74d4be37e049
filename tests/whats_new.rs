mod common;

use common::{config, MemorySession, MAIN};
use docs_parser::extract::{whats_new, RunContext};
use docs_parser::{OnError, StructuralParseError};

const INDEX: &str = r#"<html><body>
<section id="what-s-new-in-python">
  <h1>What's New in Python</h1>
  <div class="toctree-wrapper compound">
    <ul>
      <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a>
        <ul><li class="toctree-l2"><a href="3.12.html#summary">Summary</a></li></ul>
      </li>
      <li class="toctree-l1"><a class="reference internal" href="3.11.html">What's New In Python 3.11</a></li>
      <li class="toctree-l1"><a class="reference internal" href="3.10.html">What's New In Python 3.10</a></li>
    </ul>
  </div>
</section>
</body></html>"#;

fn article(version: &str, editor: &str) -> String {
    format!(
        "<html><body><section><h1>What's New In Python {version}</h1>\
         <dl><dt>Editor:</dt>\n<dd>{editor}</dd></dl></section></body></html>"
    )
}

fn session() -> MemorySession {
    MemorySession::new()
        .page(&format!("{MAIN}whatsnew/"), INDEX)
        .page(&format!("{MAIN}whatsnew/3.12.html"), article("3.12", "Adam Turner"))
        .page(&format!("{MAIN}whatsnew/3.10.html"), article("3.10", "Pablo Galindo Salgado"))
}

#[test]
fn skips_unreachable_articles() {
    let session = session();
    let config = config();
    let ctx = RunContext::new(&session, &config);

    let rows = whats_new(&ctx).unwrap().unwrap();

    assert_eq!(
        rows.header(),
        &["Link to article", "Title", "Editor, author"].map(String::from)
    );
    assert_eq!(
        rows.data(),
        &[
            [
                "https://docs.test/3/whatsnew/3.12.html".to_string(),
                "What's New In Python 3.12".to_string(),
                "Editor: Adam Turner".to_string(),
            ],
            [
                "https://docs.test/3/whatsnew/3.10.html".to_string(),
                "What's New In Python 3.10".to_string(),
                "Editor: Pablo Galindo Salgado".to_string(),
            ],
        ]
    );
    assert!(session
        .requests()
        .contains(&"https://docs.test/3/whatsnew/3.11.html".to_string()));
}

#[test]
fn one_row_per_entry_when_all_reachable() {
    let session = session().page(
        &format!("{MAIN}whatsnew/3.11.html"),
        article("3.11", "Pablo Galindo Salgado"),
    );
    let config = config();
    let rows = whats_new(&RunContext::new(&session, &config)).unwrap().unwrap();
    assert_eq!(rows.data().len(), 3);
}

#[test]
fn unreachable_index_gives_no_result() {
    let session = MemorySession::new();
    let config = config();
    let rows = whats_new(&RunContext::new(&session, &config)).unwrap();
    assert!(rows.is_none());
    assert_eq!(session.requests(), vec!["https://docs.test/3/whatsnew/"]);
}

#[test]
fn fail_policy_aborts_on_unreachable_article() {
    let session = session();
    let config = docs_parser::ParserConfig {
        on_fetch_error: OnError::Fail,
        ..config()
    };
    let err = whats_new(&RunContext::new(&session, &config)).unwrap_err();
    assert!(err.to_string().contains("3.11.html"));
}

#[test]
fn missing_toctree_is_structural() {
    let session = MemorySession::new().page(
        &format!("{MAIN}whatsnew/"),
        r#"<section id="what-s-new-in-python"><p>moved</p></section>"#,
    );
    let config = config();
    let err = whats_new(&RunContext::new(&session, &config)).unwrap_err();
    let err = err.downcast::<StructuralParseError>().unwrap();
    assert_eq!(
        err.to_string(),
        r#"Tag not found: <div class="toctree-wrapper">"#
    );
}
