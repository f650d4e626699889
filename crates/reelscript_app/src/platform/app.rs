use std::io::{self, BufRead, Stdout};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use reelscript_core::{update, AppState, Msg, UiState};
use reelscript_engine::ReqwestGenerator;

use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::{HELP_TEXT, INPUT_PROMPT};
use super::ui::input::{parse_command, InputCommand};
use super::ui::render::render;
use super::ui::screen::Screen;
use crate::cli::Args;

/// How often the loop wakes up to collect engine results.
const TICK: Duration = Duration::from_millis(50);

pub fn run_app(args: Args) -> anyhow::Result<ExitCode> {
    logging::initialize(args.log);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint.clone() {
        config.endpoint = endpoint;
    }
    engine_info!(
        "reelscript starting endpoint={} timeout={}s",
        config.endpoint,
        config.request_timeout_secs
    );

    if args.check_health {
        return check_health(&config);
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(config.generator_settings(), msg_tx.clone())
        .context("starting request engine")?;
    let mut controller = Controller {
        state: AppState::with_error_display(config.error_display()),
        screen: Screen::new(io::stdout()),
        effects,
        interactive: args.prompt.is_none(),
    };

    match args.prompt {
        Some(prompt) => {
            let form = [
                Msg::PromptChanged(prompt),
                Msg::VideoTypeChanged(args.video_type.unwrap_or_default()),
                Msg::DurationChanged(args.duration.unwrap_or_default()),
                Msg::StoryboardToggled(args.storyboard),
                Msg::SubmitClicked,
            ];
            for msg in form {
                controller.dispatch(msg)?;
            }
            run_once(&mut controller, &msg_rx)
        }
        None => run_interactive(&mut controller, msg_tx, &msg_rx),
    }
}

struct Controller {
    state: AppState,
    screen: Screen<Stdout>,
    effects: EffectRunner,
    interactive: bool,
}

impl Controller {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.effects.enqueue(effects);
        if was_dirty {
            self.screen.apply(render(&view))?;
            if self.interactive {
                self.screen.prompt(INPUT_PROMPT)?;
            }
        }
        Ok(())
    }

    fn pump(&mut self, msg_rx: &mpsc::Receiver<Msg>) -> io::Result<bool> {
        let connected = match msg_rx.recv_timeout(TICK) {
            Ok(msg) => {
                self.dispatch(msg)?;
                true
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                self.dispatch(Msg::Tick)?;
                true
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => false,
        };
        for msg in self.effects.poll() {
            self.dispatch(msg)?;
        }
        Ok(connected)
    }
}

fn run_once(controller: &mut Controller, msg_rx: &mpsc::Receiver<Msg>) -> anyhow::Result<ExitCode> {
    loop {
        match controller.state.ui_state() {
            UiState::Success => return Ok(ExitCode::SUCCESS),
            UiState::Error => return Ok(ExitCode::FAILURE),
            UiState::Idle | UiState::Loading => {}
        }
        if !controller.pump(msg_rx)? {
            return Ok(ExitCode::FAILURE);
        }
    }
}

fn run_interactive(
    controller: &mut Controller,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<ExitCode> {
    controller.screen.note(HELP_TEXT)?;
    controller.screen.prompt(INPUT_PROMPT)?;

    let quit = Arc::new(AtomicBool::new(false));
    let (note_tx, note_rx) = mpsc::channel::<String>();
    spawn_stdin_reader(msg_tx, note_tx, quit.clone());

    while !quit.load(Ordering::Relaxed) {
        if !controller.pump(msg_rx)? {
            break;
        }
        while let Ok(note) = note_rx.try_recv() {
            controller.screen.note(&note)?;
            controller.screen.prompt(INPUT_PROMPT)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn spawn_stdin_reader(
    msg_tx: mpsc::Sender<Msg>,
    note_tx: mpsc::Sender<String>,
    quit: Arc<AtomicBool>,
) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            match parse_command(&line) {
                None => {}
                Some(Ok(InputCommand::Send(msg))) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Some(Ok(InputCommand::Help)) => {
                    let _ = note_tx.send(HELP_TEXT.to_string());
                }
                Some(Ok(InputCommand::Quit)) => break,
                Some(Err(problem)) => {
                    let _ = note_tx.send(problem);
                }
            }
        }
        quit.store(true, Ordering::Relaxed);
    });
}

fn check_health(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let generator =
        ReqwestGenerator::new(config.generator_settings()).context("building HTTP client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    match runtime.block_on(generator.check_health()) {
        Ok(report) => {
            println!(
                "{}: status={} model={} {}",
                config.endpoint,
                report.status,
                report.model.as_deref().unwrap_or("-"),
                report.message.as_deref().unwrap_or("")
            );
            Ok(if report.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(err) => {
            println!("{}: unreachable ({err})", config.endpoint);
            Ok(ExitCode::FAILURE)
        }
    }
}
