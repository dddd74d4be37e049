use std::path::PathBuf;

use clap::Parser;
use docs_parser::extract::{self, RunContext};
use docs_parser::output::{control_output, OutputMode};
use docs_parser::{CachedSession, ExpectedStatusTable, ParserConfig, Rows};

/// Python documentation parser
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Args {
    /// Parser mode
    #[clap(value_enum)]
    pub mode: Mode,
    /// Clear the HTTP cache before fetching
    #[clap(long, short)]
    pub clear_cache: bool,
    /// Alternative ways to output the results
    #[clap(value_enum, long, short)]
    pub output: Option<OutputMode>,
    /// Optional yaml configuration file
    #[clap(env = "DOCS_PARSER_CONFIG", parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Hide the progress bar
    #[clap(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }
}

impl TryFrom<&Args> for ParserConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        match &args.config {
            Some(path) => ParserConfig::from_file(path),
            None => Ok(ParserConfig::default()),
        }
    }
}

fn render<const N: usize>(
    rows: Option<Rows<N>>,
    args: &Args,
    config: &ParserConfig,
) -> anyhow::Result<()> {
    match rows {
        Some(rows) => control_output(&rows, args.output, &config.results_dir, args.mode.name()),
        None => Ok(()),
    }
}

fn run(args: &Args, config: &ParserConfig) -> anyhow::Result<()> {
    let table = ExpectedStatusTable::new(config.expected_status.clone())?;

    let session = CachedSession::new(config)?;
    if args.clear_cache {
        session.clear()?;
    }

    let ctx = RunContext::new(&session, config).with_progress(!args.quiet);
    match args.mode {
        Mode::WhatsNew => render(extract::whats_new(&ctx)?, args, config),
        Mode::LatestVersions => render(extract::latest_versions(&ctx)?, args, config),
        Mode::Download => extract::download(&ctx).map(|_| ()),
        Mode::Pep => render(extract::pep(&ctx, &table)?, args, config),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ParserConfig::try_from(&args)?;

    docs_parser::logging::init(&config)?;

    log::info!("Parser started");
    log::info!("Command line arguments: {args:?}");

    let res = run(&args, &config);
    if let Err(e) = &res {
        log::error!("Parser aborted: {e:#}");
    } else {
        log::info!("Parser finished");
    }
    res
}
