//! rawsniff - raw link-layer packet sniffer.
//!
//! Captures frames on a background thread and prints a row per frame,
//! optionally with decoded headers and a hex dump.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rawsniff::{
    export_frames, CaptureEngine, Config, ConsoleReporter, Frame, FrameReporter, FrameSink,
    FrameSource, InterfaceCapture, RawSocket,
};

/// How often the foreground loop polls the sink for new frames.
const RENDER_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "rawsniff")]
#[command(about = "Capture raw link-layer frames and inspect Ethernet/IPv4 headers")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture frames until stopped (requires root or CAP_NET_RAW)
    Capture(CaptureArgs),
    /// List available network interfaces
    Interfaces,
}

#[derive(Args)]
struct CaptureArgs {
    /// Capture on this interface only (default: all interfaces)
    #[arg(short, long)]
    interface: Option<String>,

    /// Stop after this many seconds
    #[arg(short, long)]
    duration: Option<u64>,

    /// Stop after this many frames
    #[arg(short, long)]
    count: Option<usize>,

    /// Print the hex/ASCII dump of every frame
    #[arg(long)]
    hexdump: bool,

    /// Print decoded Ethernet/IPv4 header fields of every frame
    #[arg(long)]
    details: bool,

    /// Write the dump of every captured frame to this file when done
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config, cli.verbose);

    let result = match cli.command {
        Commands::Capture(args) => run_capture(&config, args),
        Commands::Interfaces => {
            for line in InterfaceCapture::list_interfaces() {
                println!("{}", line);
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_source(config: &Config, interface: Option<String>) -> Result<Box<dyn FrameSource>> {
    let poll_interval = config.poll_interval;
    match interface.or_else(|| config.interface.clone()) {
        Some(name) => {
            let capture = InterfaceCapture::open(&name, poll_interval)
                .with_context(|| format!("failed to open interface {}", name))?;
            Ok(Box::new(capture))
        }
        None => {
            let socket = RawSocket::open(poll_interval).context("failed to open raw socket")?;
            Ok(Box::new(socket))
        }
    }
}

fn run_capture(config: &Config, args: CaptureArgs) -> Result<()> {
    let source = open_source(config, args.interface)?;
    let source_name = source.name().to_string();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))
        .context("failed to install Ctrl+C handler")?;

    let reporter = ConsoleReporter::new()
        .with_hexdump(args.hexdump)
        .with_details(args.details);
    let sink = FrameSink::new();
    let mut engine = CaptureEngine::new(source);

    reporter.on_start(&source_name);
    engine.start_capture(&sink)?;

    let deadline = args.duration.map(|secs| Instant::now() + Duration::from_secs(secs));
    let limit = args.count.unwrap_or(usize::MAX);
    let mut reported = 0;

    loop {
        reported = report_pending(&sink, &reporter, reported, limit);

        if reported >= limit {
            info!("Frame limit reached");
            break;
        }
        if !running.load(Ordering::SeqCst) {
            info!("Received Ctrl+C, stopping");
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            info!("Capture duration elapsed");
            break;
        }
        if !engine.is_active() {
            break;
        }

        thread::sleep(RENDER_INTERVAL);
    }

    engine.wait_stopped()?;
    // Frames appended after the last pass, up to the limit.
    reported = report_pending(&sink, &reporter, reported, limit);
    let capture_error = engine.take_error();
    engine.close()?;

    reporter.on_stop(reported);

    if let Some(path) = &args.output {
        let written = export_frames(&reported_frames(&sink, reported), path)?;
        println!("Wrote {} packets to {}", written, path.display());
    }

    match capture_error {
        Some(e) => Err(e).context("capture stopped"),
        None => Ok(()),
    }
}

/// Report frames appended since `reported`, stopping at `limit` in total.
///
/// Returns the new number of reported frames.
fn report_pending(
    sink: &FrameSink,
    reporter: &dyn FrameReporter,
    mut reported: usize,
    limit: usize,
) -> usize {
    for frame in sink.since(reported).iter().take(limit.saturating_sub(reported)) {
        reporter.report(reported, frame);
        reported += 1;
    }
    reported
}

/// The first `reported` frames of the sink, the ones shown on the console.
fn reported_frames(sink: &FrameSink, reported: usize) -> Vec<Arc<Frame>> {
    let mut frames = sink.snapshot();
    frames.truncate(reported);
    frames
}
