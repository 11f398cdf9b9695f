use std::fs;
use std::io;
use std::path::PathBuf;

use console::style;
use provis_fetch::{Fetcher, HttpClient};
use tracing::info;

use crate::config::Config;
use crate::install::{self, CommandRunner};

/// User-visible pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Download,
    Extract,
    Install,
}

impl Stage {
    fn starting(self) -> &'static str {
        match self {
            Stage::Download => "downloading archive ...",
            Stage::Extract => "extracting archive ...",
            Stage::Install => "running installer ...",
        }
    }

    fn finished(self) -> &'static str {
        match self {
            Stage::Download => "archive downloaded",
            Stage::Extract => "archive extracted",
            Stage::Install => "installer finished",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to prepare '{path}': {source}")]
    Workspace { path: PathBuf, source: io::Error },

    #[error("download failed: {0}")]
    Download(#[from] provis_fetch::Error),

    #[error("extraction failed: {0}")]
    Extract(#[from] provis_archive::Error),

    #[error("install failed: {0}")]
    Install(#[from] install::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Sequences download, extraction and install against injected
/// collaborators, and owns the temporary tree.
pub struct Pipeline<C: HttpClient, R: CommandRunner> {
    config: Config,
    fetcher: Fetcher<C>,
    runner: R,
}

impl<C: HttpClient, R: CommandRunner> Pipeline<C, R> {
    pub fn new(config: Config, fetcher: Fetcher<C>, runner: R) -> Self {
        Self {
            config,
            fetcher,
            runner,
        }
    }

    /// Run the stages in order, stopping at the first failure. Cleanup is
    /// not part of the run; the caller invokes it on both outcome paths.
    pub fn run(&self) -> Result<()> {
        let temp_root = self.config.temp_root();
        fs::create_dir_all(&temp_root).map_err(|e| Error::Workspace {
            path: temp_root.clone(),
            source: e,
        })?;

        announce(Stage::Download);
        let bytes = self
            .fetcher
            .fetch(&self.config.source_url, &self.config.archive_path())?;
        info!(bytes, "archive downloaded");
        finish(Stage::Download);

        announce(Stage::Extract);
        let report =
            provis_archive::extract_file(&self.config.archive_path(), &self.config.extract_root())?;
        info!(
            entries = report.entry_count,
            bytes = report.total_bytes,
            "archive extracted"
        );
        finish(Stage::Extract);

        announce(Stage::Install);
        install::install(&self.config.install_spec(), &self.runner)?;
        finish(Stage::Install);

        Ok(())
    }

    /// Remove the temporary tree. A tree that is already gone counts as
    /// removed.
    pub fn cleanup(&self) -> io::Result<()> {
        match fs::remove_dir_all(self.config.temp_root()) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

fn announce(stage: Stage) {
    println!("{}", style(stage.starting()).cyan());
}

fn finish(stage: Stage) {
    println!("{}", style(stage.finished()).green());
}
