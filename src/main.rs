use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use imagefix_lib::commands::run_fix;
use imagefix_lib::services::config::{ImageSource, RunConfig};
use imagefix_lib::services::interact::{AssumeYes, LineConfirmer};

#[derive(Parser)]
#[command(name = "imagefix")]
#[command(about = "Replace card images in an X-Wing VASSAL module with canonical scans")]
#[command(version)]
struct Cli {
    /// Module to repair (.vmod)
    module: PathBuf,

    /// Local copy of the card image archive
    #[arg(long, env = "IMAGEFIX_IMAGE_DB", default_value = "image-db")]
    image_db: PathBuf,

    /// Override table (JSON)
    #[arg(long, env = "IMAGEFIX_OVERRIDES", default_value = "overrides.json")]
    overrides: PathBuf,

    /// Output module [default: <MODULE stem>.imagefix.vmod]
    #[arg(long, short = 'o', env = "IMAGEFIX_OUTPUT")]
    output: Option<PathBuf>,

    /// Do not check GitHub for a newer image archive
    #[arg(long, env = "IMAGEFIX_OFFLINE")]
    offline: bool,

    /// Write a JSON report of every card outcome
    #[arg(long, env = "IMAGEFIX_REPORT")]
    report: Option<PathBuf>,

    /// Accept every low-confidence match and overwrite without asking
    #[arg(long, short = 'y')]
    assume_yes: bool,

    /// GitHub repository holding the image archive
    #[arg(long, env = "IMAGEFIX_REPO", default_value = "ajmath/xwing-card-images")]
    repo: String,

    #[arg(long, env = "IMAGEFIX_BRANCH", default_value = "master")]
    branch: String,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        RunConfig {
            image_db: self.image_db,
            overrides_path: self.overrides,
            output: self.output,
            report_path: self.report,
            offline: self.offline,
            assume_yes: self.assume_yes,
            source: ImageSource {
                repo: self.repo,
                branch: self.branch,
            },
            ..RunConfig::new(self.module)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();
    let result = if config.assume_yes {
        run_fix(&config, &mut AssumeYes)
    } else {
        run_fix(&config, &mut LineConfirmer::stdio())
    };

    match result {
        Ok(report) => {
            report.print_summary();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
