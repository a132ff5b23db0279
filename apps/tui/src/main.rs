mod app;
mod event;
mod model;
mod tui;
mod view;

use crate::app::App;
use crate::event::EventHandler;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use spectrum_core::{MAX_FIXED_ROWS, RowPolicy, SubmitMode};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spectrum-tui", version, about = "Interactive trait form with a live spectrum chart")]
struct Args {
    /// Show exactly this many trait rows instead of a growing list.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_FIXED_ROWS as i64))]
    rows: Option<u8>,

    /// Only redraw the chart when the form is submitted.
    #[arg(long)]
    on_submit: bool,

    #[arg(long, default_value = "spectrum_tui.log")]
    log_file: PathBuf,

    #[arg(long, env = "SPECTRUM_LOG", default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn policy(&self) -> RowPolicy {
        match self.rows {
            Some(n) => RowPolicy::Fixed(usize::from(n)),
            None => RowPolicy::Growable,
        }
    }

    fn mode(&self) -> SubmitMode {
        if self.on_submit {
            SubmitMode::OnSubmit
        } else {
            SubmitMode::Live
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level, Config::default(), log_file).context("initializing logger")?;

    let mut app = App::new(args.policy(), args.mode())?;
    app.init()?;

    let mut tui = Tui::new()?;
    let events = EventHandler::new();
    let outcome = run(&mut app, &mut tui, &events);
    tui.restore()?;
    info!("tui exited");
    outcome
}

fn run(app: &mut App, tui: &mut Tui, events: &EventHandler) -> Result<()> {
    while app.state.is_running {
        tui.draw(app)?;
        let action = events.next(app.state.focus)?;
        app.dispatch(action)?;
    }
    Ok(())
}
