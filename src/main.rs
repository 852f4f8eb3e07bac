//! CLI entry point for boxdu

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use boxdu::{BuilderConfig, Destination, ListingSource, RunConfig, Timings};
use clap::{ArgAction, Parser};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boxdu")]
#[command(about = "Show how a Box Backup store is used, by file status, in ncdu")]
#[command(version)]
struct Args {
    /// Listing to read ("-" for stdin); runs the query tool when omitted
    input: Option<PathBuf>,

    /// Write the ncdu export to FILE instead of opening ncdu
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log more (repeat for debug output)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print how long each phase took
    #[arg(short, long)]
    debug: bool,

    /// No progress output, errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Query tool used when no input is given
    #[arg(
        long = "query-bin",
        env = "BOXDU_QUERY",
        default_value = "bbackupquery",
        value_name = "PROGRAM"
    )]
    query_bin: String,

    /// Viewer used when no output file is given
    #[arg(
        long = "visualizer-bin",
        env = "BOXDU_VISUALIZER",
        default_value = "ncdu",
        value_name = "PROGRAM"
    )]
    visualizer_bin: String,

    /// Resolve every path from the bucket root
    #[arg(long = "no-path-cache", hide = true)]
    no_path_cache: bool,
}

/// Pick the log level from -q/-v; RUST_LOG wins when set.
fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boxdu={}", level)));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        // Help and version go to stdout and are not failures.
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    });

    init_logging(&args);

    let config = RunConfig {
        source: ListingSource::from_input(args.input.as_deref(), &args.query_bin),
        destination: match &args.output {
            Some(path) => Destination::File(path.clone()),
            None => Destination::Visualizer(args.visualizer_bin.clone()),
        },
        builder: BuilderConfig {
            path_cache: !args.no_path_cache,
        },
        show_progress: !args.quiet && io::stderr().is_terminal(),
    };

    let mut timings = Timings::new(args.debug);
    if let Err(e) = boxdu::run(&config, &mut timings) {
        eprintln!("boxdu: {}", e);
        process::exit(1);
    }

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    if let Err(e) = timings.report(&mut stderr) {
        eprintln!("boxdu: error writing timings: {}", e);
        process::exit(1);
    }
}
