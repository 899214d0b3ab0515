use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use weld_inspect::detect::Verdict;
use weld_inspect::{load_gray, ControlLoop, InspectConfig, LineTriggers};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(
    name = "weld-inspect",
    version,
    about = "Inspect weld seams for unwelded lines and porosity"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the station; reads one key per stdin line (l, r, q).
    Run {
        /// Station config (JSON). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Image file polled as camera 1.
        #[arg(long)]
        camera1: Option<PathBuf>,
        /// Image file polled as camera 2.
        #[arg(long)]
        camera2: Option<PathBuf>,
        #[arg(long)]
        log_dir: Option<PathBuf>,
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
    /// Inspect a single image and print `verdict<TAB>cause<TAB>black_percent`.
    ///
    /// Exits with 0 for Good and 2 for Bad.
    Inspect {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default station config.
    InitConfig {
        #[arg(long, default_value = "weld_inspect.json")]
        out: PathBuf,
    },
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        weld_inspect::core::init_tracing(false, level);
    }
    #[cfg(not(feature = "tracing"))]
    weld_inspect::core::init_with_level(level)?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<InspectConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(InspectConfig::load_json(path)?),
        None => Ok(InspectConfig::default()),
    }
}

fn run(
    config: Option<PathBuf>,
    camera1: Option<PathBuf>,
    camera2: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    snapshot_dir: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut cfg = load_config(config.as_ref())?;
    if let Some(path) = camera1 {
        cfg.sources[0].image_path = Some(path);
    }
    if let Some(path) = camera2 {
        cfg.sources[1].image_path = Some(path);
    }
    if let Some(dir) = log_dir {
        cfg.log_dir = dir;
    }
    if let Some(dir) = snapshot_dir {
        cfg.snapshot_dir = dir;
    }

    let session = cfg.build_session()?;
    log::info!(
        "inspecting ROI {} (log: {}, snapshots: {})",
        session.engine().geometry().roi(),
        cfg.log_dir.display(),
        cfg.snapshot_dir.display()
    );

    let triggers = LineTriggers::spawn(io::BufReader::new(io::stdin()))?;
    let mut control = ControlLoop::new(session, triggers).with_poll_interval(cfg.poll_interval());
    let summary = control.run()?;

    println!(
        "inspections={} good={} bad={} undefined={} ignored={} aborted={}",
        summary.inspections,
        summary.good,
        summary.bad,
        summary.undefined,
        summary.ignored,
        summary.aborted
    );
    Ok(ExitCode::SUCCESS)
}

fn inspect(image: PathBuf, config: Option<PathBuf>) -> Result<ExitCode, Box<dyn Error>> {
    let cfg = load_config(config.as_ref())?;
    let engine = cfg.build_engine()?;
    let frame = load_gray(&image)?;
    let res = engine.inspect(&frame.view())?;

    println!("{}\t{}\t{:.2}", res.verdict, res.cause, res.black_percent);
    Ok(match res.verdict {
        Verdict::Good => ExitCode::SUCCESS,
        _ => ExitCode::from(2),
    })
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Run {
            config,
            camera1,
            camera2,
            log_dir,
            snapshot_dir,
        } => run(config, camera1, camera2, log_dir, snapshot_dir),
        Command::Inspect { image, config } => inspect(image, config),
        Command::InitConfig { out } => {
            InspectConfig::default().write_json(&out)?;
            println!("wrote {}", out.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
