//! Command line argument parsing

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::QualityTier;
use crate::fetch::FetcherConfig;

/// Thumbgrab - Batch YouTube thumbnail fetcher and downloader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YouTube video or playlist URLs
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Thumbnail quality tier
    #[arg(short, long, value_enum, default_value = "maxres")]
    pub quality: QualityTier,

    /// Output directory for downloaded thumbnails
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Relay prefix for feed requests blocked by cross-origin rules
    #[arg(long, value_name = "URL")]
    pub relay: Option<String>,

    /// Proxy URL (http/https/socks)
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Continue with remaining thumbnails after a failed download
    #[arg(long)]
    pub keep_going: bool,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,

    /// Resolve thumbnails and print results without downloading
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(long)]
    pub quiet: bool,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Collect submitted URLs from positional arguments and --input.
    ///
    /// Blank lines are discarded before parsing.
    pub fn collect_inputs(&self) -> std::io::Result<Vec<String>> {
        let mut inputs = self.urls.clone();

        if let Some(path) = &self.input {
            let text = if path.as_os_str() == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                std::fs::read_to_string(path)?
            };
            inputs.extend(text.lines().map(|line| line.to_string()));
        }

        Ok(inputs
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect())
    }

    /// Build the fetcher configuration from the arguments
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.timeout_duration(),
            user_agent: self.user_agent.clone(),
            proxy_url: self.proxy.clone(),
            relay_url: self.relay.clone(),
            ..Default::default()
        }
    }
}


// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            input: None,
            quality: QualityTier::Maxres,
            output: PathBuf::from("."),
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            relay: None,
            proxy: None,
            user_agent: None,
            keep_going: false,
            no_progress: false,
            dry_run: false,
            verbose: false,
            quiet: false,
        }
    }
}
