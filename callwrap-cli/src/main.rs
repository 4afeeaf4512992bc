//! # callwrap
//!
//! Command line front end for the call interception crates.
//!
//! ## Usage
//!
//! ```bash
//! callwrap run <TARGET> [ARGS]... --wrap <TAG>... [--delay-ms N] [--times N]
//! callwrap demo <sandwich|benchmark|shiny>
//! callwrap behaviors
//! ```
//!
//! `run` wraps one of the built-in targets with the requested behaviors, the
//! first `--wrap` being the innermost, and invokes it. Arguments of the form
//! `key=value` are passed as named arguments.
//!
//! Diagnostics go through `tracing`; `RUST_LOG` selects the filter and
//! `RUST_LOG_FORMAT` (`pretty`, `compact` or `json`) the output format.
//! Without `RUST_LOG` the filter is `warn`, raised to `--log-level` for the
//! `callwrap` target when `--sink log` is used.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod demos;
mod targets;

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use callwrap_intercept::{
    sink::{FileLogSink, LogCrateSink, StdoutSink},
    BehaviorKind, Chain, ChainBuilder, CountPolicy, InterceptConfig, Invocable, LogLevel, LogSink,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use crate::{demos::DemoArg, targets::TargetArg};

/// Wrap functions with timing, logging, counting, delay and before/after behaviors
#[derive(Parser, Debug)]
#[command(name = "callwrap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a built-in target through a chain of wrappers
    Run(RunArgs),

    /// Replay one of the classic decorator walkthroughs
    Demo {
        /// Which demo to replay
        #[arg(value_enum)]
        name: DemoArg,
    },

    /// List the available behavior tags
    Behaviors,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Target to invoke
    #[arg(value_enum)]
    target: TargetArg,

    /// Arguments passed to the target; `key=value` becomes a named argument
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,

    /// Behavior tag to add; repeat to stack, first one innermost
    #[arg(short, long = "wrap", value_name = "TAG")]
    wrap: Vec<String>,

    /// Delay applied by `delay` wrappers, in milliseconds
    #[arg(long, env = "CALLWRAP_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Number of times to invoke the chain
    #[arg(short, long, default_value_t = 1)]
    times: u32,

    /// Which calls a `counting` wrapper counts: all or success
    #[arg(long, default_value = "all", value_parser = CountPolicy::from_str)]
    count_policy: CountPolicy,

    /// Message emitted by `pre_post` wrappers before the call
    #[arg(long)]
    before: Option<String>,

    /// Message emitted by `pre_post` wrappers after the call
    #[arg(long)]
    after: Option<String>,

    /// Where wrapper records go: stdout, log or file=PATH
    #[arg(long, default_value = "stdout", value_parser = SinkSpec::parse)]
    sink: SinkSpec,

    /// Minimum level forwarded when `--sink log` is used; also the default
    /// tracing filter for those records unless `RUST_LOG` is set
    #[arg(long, default_value = "info", value_parser = LogLevel::from_str)]
    log_level: LogLevel,
}

/// `log` target of records written through `--sink log`
const SINK_LOG_TARGET: &str = "callwrap";

/// Destination of wrapper records
#[derive(Clone, Debug, PartialEq, Eq)]
enum SinkSpec {
    Stdout,
    Log,
    File(PathBuf),
}

impl SinkSpec {
    fn parse(raw: &str) -> std::result::Result<Self, String> {
        match raw.split_once('=') {
            None if raw.eq_ignore_ascii_case("stdout") => Ok(Self::Stdout),
            None if raw.eq_ignore_ascii_case("log") => Ok(Self::Log),
            Some(("file", path)) if !path.is_empty() => Ok(Self::File(PathBuf::from(path))),
            _ => Err(format!("expected stdout, log or file=PATH, got '{raw}'")),
        }
    }

    fn open(&self, level: LogLevel) -> Result<Arc<dyn LogSink>> {
        let sink: Arc<dyn LogSink> = match self {
            Self::Stdout => Arc::new(StdoutSink),
            Self::Log => Arc::new(LogCrateSink::new(SINK_LOG_TARGET).with_min_level(level)),
            Self::File(path) => Arc::new(
                FileLogSink::open(path)
                    .with_context(|| format!("Failed to open sink file {}", path.display()))?,
            ),
        };
        Ok(sink)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&default_filter(&cli.command));
    debug!(?cli, "parsed command line");

    match cli.command {
        Command::Run(args) => run(&args),
        Command::Demo { name } => {
            for line in demos::run(name).with_context(|| format!("Demo {name:?} failed"))? {
                println!("{line}");
            }
            Ok(())
        },
        Command::Behaviors => {
            list_behaviors();
            Ok(())
        },
    }
}

/// Filter directives used when `RUST_LOG` is not set
fn default_filter(command: &Command) -> String {
    match command {
        Command::Run(args) if args.sink == SinkSpec::Log => {
            let level = match args.log_level {
                LogLevel::Critical => "error",
                level => level.as_str(),
            };
            format!("warn,{SINK_LOG_TARGET}={level}")
        },
        _ => "warn".to_string(),
    }
}

/// Initialize the tracing system for logging
fn initialize_tracing(default_directives: &str) {
    let format = env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    match format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}

fn intercept_config(args: &RunArgs) -> InterceptConfig {
    let mut config = InterceptConfig::default().with_count_policy(args.count_policy);
    if let Some(ms) = args.delay_ms {
        config = config.with_delay(Duration::from_millis(ms));
    }
    if args.before.is_some() || args.after.is_some() {
        let defaults = InterceptConfig::default();
        config = config.with_messages(
            args.before.clone().unwrap_or(defaults.before_message),
            args.after.clone().unwrap_or(defaults.after_message),
        );
    }
    config
}

fn build_chain(args: &RunArgs, sink: Arc<dyn LogSink>) -> Result<Chain> {
    let builder = ChainBuilder::new(args.target.build())
        .config(intercept_config(args))
        .sink(sink)
        .with_tags(args.wrap.iter().map(String::as_str))
        .context("Invalid --wrap tag")?;
    Ok(builder.build())
}

fn run(args: &RunArgs) -> Result<()> {
    let sink = args.sink.open(args.log_level)?;
    let chain = build_chain(args, sink)?;
    let call_args = targets::parse_args(&args.args);

    let span = info_span!("run", function = chain.name(), layers = chain.chain_len());
    let _enter = span.enter();
    info!(signature = %call_args.signature(), "invoking {} time(s)", args.times);

    for _ in 0..args.times {
        match chain.invoke(&call_args) {
            Ok(value) => println!("{} {value}", "=>".green().bold()),
            Err(e) => {
                warn!(error = %e, "call failed");
                return Err(e).with_context(|| format!("Call to {} failed", chain.name()));
            },
        }
    }

    for wrapper in chain.wrappers() {
        if let Some(stats) = wrapper.stats() {
            println!(
                "{} {}: {} counted, {} succeeded, {} failed",
                "counter".cyan(),
                chain.name(),
                stats.count,
                stats.successes,
                stats.failures
            );
        }
    }
    Ok(())
}

fn list_behaviors() {
    for kind in BehaviorKind::ALL {
        println!("{:<10} {}", kind.as_str().bold(), kind.description());
    }
}
