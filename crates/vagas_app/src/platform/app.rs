use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use vagas_core::{update, AppState, BoardConfig, Effect, Msg, Preferences};
use vagas_engine::{DataSource, FetchSettings};
use vagas_logging::{vagas_info, vagas_warn};

use super::config::{load_config, AppConfig, CONFIG_FILENAME};
use super::effects::{write_block, EffectRunner};
use super::logging;
use super::persistence::RonStore;
use super::ui::commands::{parse_command, Command};
use super::ui::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);
const ENGINE_POLL: Duration = Duration::from_millis(25);

pub fn run_app() -> anyhow::Result<()> {
    let loaded = load_config(Path::new(CONFIG_FILENAME));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    logging::initialize(config.log_destination);
    if let Err(err) = &loaded {
        vagas_warn!("Using default settings: {}", err);
    }

    // First argument overrides the configured data source.
    let location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.data_source.clone());
    let source = DataSource::resolve(&location, config.base_url.as_deref())
        .with_context(|| format!("invalid data source {location:?}"))?;
    vagas_info!("Data source: {}", source);

    let runner = EffectRunner::new(
        FetchSettings::default(),
        source,
        RonStore::open(&config.state_dir),
    )
    .context("starting the loader")?;
    let mut app = App::new(config.board, runner);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

    // Background tick for the search debounce and the date window.
    let tick_tx = cmd_tx.clone();
    thread::spawn(move || {
        while tick_tx
            .send(Command::Dispatch(Msg::Tick {
                today: Local::now().date_naive(),
            }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });

    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            };
            if cmd_tx.send(command).is_err() {
                return;
            }
        }
        let _ = cmd_tx.send(Command::Quit);
    });

    app.start();
    loop {
        match cmd_rx.recv_timeout(ENGINE_POLL) {
            Ok(Command::Dispatch(msg)) => app.dispatch(msg),
            Ok(Command::ShowOptions(field)) => {
                app.print(&render::render_options(&app.state.view(), &field));
            }
            Ok(Command::Help) => app.print(render::help()),
            Ok(Command::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
        while let Some(msg) = app.runner.poll() {
            app.dispatch(msg);
        }
    }

    app.runner.shutdown();
    vagas_info!("Exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(board: BoardConfig, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_config(board),
            runner,
        }
    }

    fn start(&mut self) {
        let preferences = Preferences::load(self.runner.visited().store());
        self.dispatch(Msg::PreferencesRestored(preferences));
        self.dispatch(Msg::LoadRequested);
    }

    /// Runs `msg` and every follow-up message it causes through `update`.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            let view = state.view();
            self.state = state;

            let renders_page = effects
                .iter()
                .any(|effect| matches!(effect, Effect::RenderPage { .. }));
            let mut stdout = io::stdout().lock();
            if was_dirty && !renders_page {
                write_block(&mut stdout, &render::render_status(&view));
            }
            queue.extend(self.runner.run(effects, &view, &mut stdout));
        }
    }

    fn print(&self, text: &str) {
        write_block(&mut io::stdout().lock(), text);
    }
}
