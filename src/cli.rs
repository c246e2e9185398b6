use clap::{Args, Parser, Subcommand};
use reel_duper::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "reel-duper")]
#[command(about = "Find media titles stored in more than one version", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile a library snapshot and write the duplicate report
    Process(ProcessArgs),
    /// Print the resolution bucket for a label and/or dimensions
    Classify(ClassifyArgs),
    /// Check whether file paths look like extras (trailers, featurettes, ...)
    CheckExtra {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Library snapshot (JSON) to reconcile
    #[arg(short, long)]
    pub input: Option<String>,
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
    /// Duplicate policy: "plex" or "ignore-4k-1080"
    #[arg(long)]
    pub policy: Option<String>,
    /// Count missing or unreadable parts as ghosts
    #[arg(long, conflicts_with = "no_verify")]
    pub verify: bool,
    /// Do not count ghosts
    #[arg(long)]
    pub no_verify: bool,
    /// Drop versions that look like extras
    #[arg(long)]
    pub ignore_extras: bool,
    /// Comma-separated section keys to reconcile (skips auto-selection)
    #[arg(long, value_delimiter = ',')]
    pub sections: Vec<String>,
    /// Also reconcile show sections
    #[arg(long)]
    pub include_shows: bool,
    /// List titles that fell below two versions in the ignored list
    #[arg(long)]
    pub audit_exclusions: bool,
    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

impl ProcessArgs {
    /// Command-line flags win over configuration values.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(policy) = &self.policy {
            config.policy = policy.clone();
        }
        if self.verify {
            config.verify = true;
        }
        if self.no_verify {
            config.verify = false;
        }
        if self.ignore_extras {
            config.ignore_extras = true;
        }
        if !self.sections.is_empty() {
            config.sections = self.sections.clone();
        }
        if self.include_shows {
            config.include_shows = true;
        }
        if self.audit_exclusions {
            config.audit_variant_exclusions = true;
        }
        if self.compact {
            config.pretty = false;
        }
    }
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Resolution label as reported by the server (e.g. "4k", "1080", "sd")
    #[arg(default_value = "")]
    pub label: String,
    #[arg(long, default_value_t = 0)]
    pub width: u32,
    #[arg(long, default_value_t = 0)]
    pub height: u32,
}
