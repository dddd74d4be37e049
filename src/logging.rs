//! Console and file logging.
//!
//! Every record goes to stderr and is appended to `<logDir>/<logFileName>`.
//! The file is rotated once at startup when it has grown past `logMaxBytes`,
//! keeping `logBackupCount` older generations as `parser.log.1`, `.2`, ...

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use env_logger::{Builder, Target};

use crate::config::ParserConfig;

const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Installs the global logger. `RUST_LOG` overrides the configured level.
pub fn init(config: &ParserConfig) -> Result<()> {
    let path = config.log_dir.join(&config.log_file_name);
    let file = open_log_file(&path, config.log_max_bytes, config.log_backup_count)?;
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());

    builder(&filters, Box::new(Tee { file }))
        .try_init()
        .context("Logger already installed")
}

fn builder(filters: &str, sink: Box<dyn Write + Send>) -> Builder {
    let mut builder = Builder::new();
    builder
        .parse_filters(filters)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - [{}] - {}",
                Local::now().format(DATETIME_FORMAT),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(sink));
    builder
}

/// Rotates `path` if needed, then opens it for appending.
pub fn open_log_file(path: &Path, max_bytes: u64, backups: usize) -> Result<fs_err::File> {
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    rotate(path, max_bytes, backups)?;
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Couldn't open log file {}", path.display()))
}

fn rotate(path: &Path, max_bytes: u64, backups: usize) -> Result<()> {
    let size = match fs_err::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if max_bytes == 0 || size < max_bytes {
        return Ok(());
    }

    if backups == 0 {
        fs_err::File::create(path)?;
        return Ok(());
    }

    let oldest = backup_path(path, backups);
    if oldest.exists() {
        fs_err::remove_file(&oldest)?;
    }
    for n in (1..backups).rev() {
        let from = backup_path(path, n);
        if from.exists() {
            fs_err::rename(&from, backup_path(path, n + 1))?;
        }
    }
    fs_err::rename(path, backup_path(path, 1))?;
    Ok(())
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

/// Writes everything to both stderr and the log file.
struct Tee {
    file: fs_err::File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
