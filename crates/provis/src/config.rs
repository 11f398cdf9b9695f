use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::install::InstallSpec;

const TEMP_DIR_NAME: &str = "tempInstaller";
const ARCHIVE_FILE_NAME: &str = "installer.zip";
const EXTRACT_DIR_NAME: &str = "extracted";

/// Run parameters, loaded from a TOML file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// URL of the installer archive.
    pub source_url: String,
    /// Path of the installer package inside the extracted tree.
    pub installer_path: PathBuf,
    /// Transform file handed to the installer (locale/variant selection).
    pub transforms: String,
    /// Base directory for temporary state. Defaults to the directory the
    /// executable lives in.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("installer_path must be a relative path with a file name, got '{path}'")]
    InstallerPath { path: PathBuf },

    #[error("could not determine a working directory: {source}")]
    WorkingDir { source: io::Error },
}

impl Config {
    /// Load and validate a config file, resolving the working directory.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&text, path)?;
        if config.working_dir.is_none() {
            config.working_dir = Some(default_working_dir()?);
        }
        Ok(config)
    }

    fn parse(text: &str, origin: &Path) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Parse {
            path: origin.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        let escapes = self
            .installer_path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if self.installer_path.is_absolute() || escapes || self.installer_path.file_name().is_none()
        {
            return Err(Error::InstallerPath {
                path: self.installer_path.clone(),
            });
        }
        Ok(())
    }

    fn base_dir(&self) -> &Path {
        self.working_dir.as_deref().unwrap_or(Path::new("."))
    }

    /// The temporary tree owned by one pipeline run.
    pub fn temp_root(&self) -> PathBuf {
        self.base_dir().join(TEMP_DIR_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.temp_root().join(ARCHIVE_FILE_NAME)
    }

    pub fn extract_root(&self) -> PathBuf {
        self.temp_root().join(EXTRACT_DIR_NAME)
    }

    /// What to hand the installer once extraction has finished.
    pub fn install_spec(&self) -> InstallSpec {
        let payload = self.extract_root().join(&self.installer_path);
        let dir = payload
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.extract_root());
        let package = payload
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        InstallSpec {
            package,
            transforms: self.transforms.clone(),
            dir,
        }
    }
}

fn default_working_dir() -> Result<PathBuf, Error> {
    let exe = env::current_exe().map_err(|e| Error::WorkingDir { source: e })?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
