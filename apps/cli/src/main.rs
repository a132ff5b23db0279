mod input;
mod report;

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info};
use serde_json::{Value, json};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use spectrum_core::svg::SvgOptions;
use spectrum_core::{SpectrumError, render};

use crate::report::{Format, Output};

const CLI_VERSION: &str = "1.0";

const EXIT_OK: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_INVALID_COMMAND: i32 = 3;

#[derive(Debug, Parser)]
#[command(name = "spectrum", version, about = "Plot traits on the 5F..5M spectrum")]
struct Cli {
    /// Wrap output in a JSON envelope.
    #[arg(long, global = true)]
    json: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, env = "SPECTRUM_LOG", default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a trait set as SVG, a JSON scene, or a text summary.
    Render(RenderArgs),
    /// List the built-in preset groups.
    Presets,
    /// List the 21 selectable scores.
    Scale,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Render(_) => "render",
            Self::Presets => "presets",
            Self::Scale => "scale",
        }
    }
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// A trait as LABEL=SCORE, e.g. `Stoic=4.5` or `Stoic=4.5M`.
    #[arg(long = "trait", value_name = "LABEL=SCORE")]
    traits: Vec<String>,

    /// A preset group name, `Group: Trait`, or a preset trait name.
    #[arg(long = "preset", value_name = "NAME")]
    presets: Vec<String>,

    /// JSON file of `[{"label": .., "score": ..}]`.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 1400)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Debug)]
struct CliError {
    code: i32,
    command: String,
    kind: String,
    message: String,
}

impl CliError {
    fn from_anyhow(cmd: &str, err: anyhow::Error) -> Self {
        let (code, kind) = if err.downcast_ref::<std::io::Error>().is_some() {
            (EXIT_IO, "IoError")
        } else if matches!(err.downcast_ref::<SpectrumError>(), Some(SpectrumError::Export(_))) {
            (EXIT_IO, "ExportError")
        } else if err.downcast_ref::<SpectrumError>().is_some()
            || err.downcast_ref::<serde_json::Error>().is_some()
        {
            (EXIT_INVALID_INPUT, "InvalidInput")
        } else {
            (EXIT_INVALID_INPUT, "Error")
        };
        Self {
            code,
            command: cmd.to_string(),
            kind: kind.to_string(),
            message: format!("{err:#}"),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_COMMAND,
            command: "unknown".to_string(),
            kind: "InvalidCommand".to_string(),
            message: message.into(),
        }
    }
}

fn main() {
    // --json must be honoured even when argument parsing fails
    let json_mode = std::env::args().skip(1).any(|a| a == "--json");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                err.exit()
            }
            _ => print_error(json_mode, CliError::invalid(err.to_string().trim_end())),
        },
    };

    let name = cli.command.name();
    if let Err(err) = init_logging(&cli) {
        print_error(cli.json, CliError::from_anyhow(name, err));
    }

    match dispatch(cli.command) {
        Ok(output) => {
            print_success(cli.json, name, output);
            std::process::exit(EXIT_OK);
        }
        Err(err) => print_error(cli.json, CliError::from_anyhow(name, err)),
    }
}

/// In JSON mode stderr carries the error envelope, so logs only go to
/// `--log-file` there.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.verbose { LevelFilter::Debug } else { cli.log_level };
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        WriteLogger::init(level, Config::default(), file).context("failed to initialize logger")?;
    } else if !cli.json {
        TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
            .context("failed to initialize logger")?;
    }
    Ok(())
}

fn dispatch(command: Command) -> anyhow::Result<Output> {
    match command {
        Command::Render(args) => run_render(args),
        Command::Presets => Ok(report::presets_output()),
        Command::Scale => Ok(report::scale_output()),
    }
}

fn run_render(args: RenderArgs) -> anyhow::Result<Output> {
    let set = input::collect_traits(args.input.as_deref(), &args.presets, &args.traits)?;
    let scene = render(&set);
    let options = SvgOptions {
        width: args.width,
        height: args.height,
        ..SvgOptions::default()
    };
    let output = report::render_output(&set, &scene, args.format, &options)?;

    let Some(path) = args.output else {
        return Ok(output);
    };
    fs::write(&path, &output.text)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {} bytes to {}", output.text.len(), path.display());
    Ok(Output {
        data: json!({
            "output": path.display().to_string(),
            "count": set.len(),
            "mean": scene.mean_value(),
        }),
        text: format!("Wrote {}", path.display()),
    })
}

fn print_success(json_mode: bool, command: &str, output: Output) {
    if json_mode {
        let response = json!({
            "status": "ok",
            "version": CLI_VERSION,
            "command": command,
            "data": output.data,
            "error": Value::Null,
        });
        println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
    } else {
        println!("{}", output.text);
    }
}

fn print_error(json_mode: bool, err: CliError) -> ! {
    if json_mode {
        let response = json!({
            "status": "error",
            "version": CLI_VERSION,
            "command": err.command,
            "data": Value::Null,
            "error": {
                "code": err.code,
                "type": err.kind,
                "message": err.message,
            }
        });
        eprintln!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
    } else {
        eprintln!("Error: {}", err.message);
    }
    std::process::exit(err.code);
}
