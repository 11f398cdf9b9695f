use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use console::style;

/// Bootstrap installer: download an archive, extract it, run the
/// platform installer, clean up.
#[derive(Clone, Debug, Parser)]
#[command(name = "provis", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Path to the run configuration.
    #[arg(short, long, default_value = "provis.toml")]
    pub config: PathBuf,

    /// Override the archive URL from the configuration.
    #[arg(long)]
    pub url: Option<String>,

    /// Keep the temporary directory after the run.
    #[arg(long)]
    pub keep_temp: bool,

    /// Exit immediately instead of waiting for a keypress.
    #[arg(long)]
    pub no_pause: bool,
}

/// Block until one byte arrives on stdin.
///
/// The tool runs in disposable console windows; without this the window
/// closes before the outcome can be read.
pub fn pause() {
    println!("{}", style("press any key to close ...").dim());
    let mut byte = [0u8; 1];
    let _ = std::io::stdin().read(&mut byte);
}
