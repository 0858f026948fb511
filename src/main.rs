mod app;
mod command;
mod config;
mod consts;
mod difficulty;
mod game;
mod history;
mod logging;
mod scoreboard;
mod startup;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::history::History;
use crate::util::{report, Globals};
use std::borrow::Cow;
use std::io::{self, ErrorKind};
use std::process::ExitCode;
use tracing::{info, warn};

fn main() -> ExitCode {
    let (config, config_err) = match Config::load_default() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Some(path) = config.log_file() {
        if let Err(e) = logging::init(&path, &config.logging.level) {
            eprintln!("gridsnake: logging disabled: {}", report(e));
        }
    }
    if let Some(e) = config_err {
        warn!(error = %report(e), "using default configuration");
    }
    info!(difficulty = %config.difficulty, "starting up");
    let history = History::load(config.history_file().map(Cow::into_owned));
    let globals = Globals { config, history };
    let terminal = ratatui::init();
    let r = App::new(globals).run(terminal);
    ratatui::restore();
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            warn!(error = %e, "exiting on terminal error");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
