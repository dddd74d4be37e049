pub mod config;
pub mod extract;
pub mod fetch;
pub mod finder;
pub mod logging;
pub mod output;
pub mod parse;
pub mod progress;
pub mod rows;
pub mod session;
pub mod status;

pub use config::{OnError, ParserConfig};
pub use fetch::{fetch, FetchOutcome};
pub use finder::{must_find, try_find, StructuralParseError, TagQuery};
pub use rows::Rows;
pub use session::{CachedSession, Session};
pub use status::{ExpectedStatusTable, Reconciler};

pub use anyhow;
