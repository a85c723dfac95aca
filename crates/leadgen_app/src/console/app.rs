use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::Local;
use leadgen_core::{update, Effect, Msg, PipelineState};
use pipeline_logging::{pipeline_debug, pipeline_info};

use super::effects::EffectRunner;
use super::settings::AppSettings;
use super::ui::commands::{self, ConsoleCommand};
use super::ui::render;

pub enum ConsoleEvent {
    Line(String),
    Engine(Msg),
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run_console(settings: &AppSettings) -> anyhow::Result<()> {
    let config = settings
        .engine_config()
        .context("configuring the lead-gen backend")?;
    let (event_tx, event_rx) = mpsc::channel::<ConsoleEvent>();
    let runner = EffectRunner::new(config, event_tx.clone()).context("starting engine worker")?;

    thread::Builder::new()
        .name("leadgen-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if event_tx.send(ConsoleEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = event_tx.send(ConsoleEvent::InputClosed);
        })
        .context("starting input reader")?;

    let mut console = Console::new(runner);
    println!("{}", render::HELP);
    console.prompt();
    console.run(&event_rx);
    pipeline_info!("Console session ended");
    Ok(())
}

struct Console {
    state: PipelineState,
    runner: EffectRunner,
    deferred: VecDeque<String>,
    /// CSV imports and export writes submitted but not yet reported back.
    pending_io: usize,
}

impl Console {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: PipelineState::new(),
            runner,
            deferred: VecDeque::new(),
            pending_io: 0,
        }
    }

    /// Processes events until the user quits, or input has closed and all
    /// submitted work has been reported back.
    fn run(&mut self, events: &mpsc::Receiver<ConsoleEvent>) {
        let mut input_closed = false;
        while let Ok(event) = events.recv() {
            let flow = match event {
                ConsoleEvent::Line(line) => self.handle_line(line),
                ConsoleEvent::Engine(msg) => {
                    self.dispatch(msg);
                    self.drain_deferred()
                }
                ConsoleEvent::InputClosed => {
                    input_closed = true;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit || (input_closed && self.is_idle()) {
                break;
            }
        }
    }

    fn is_waiting(&self) -> bool {
        self.state.is_busy() || self.pending_io > 0
    }

    fn is_idle(&self) -> bool {
        !self.is_waiting() && self.deferred.is_empty()
    }

    /// Lines typed while earlier work is outstanding wait until it completes.
    fn handle_line(&mut self, line: String) -> Flow {
        if self.is_waiting() {
            pipeline_debug!("Deferring input while busy: {}", line);
            self.deferred.push_back(line);
            return Flow::Continue;
        }
        let flow = self.execute_line(&line);
        if flow == Flow::Continue && !self.is_waiting() {
            self.prompt();
        }
        flow
    }

    fn drain_deferred(&mut self) -> Flow {
        while !self.is_waiting() {
            let Some(line) = self.deferred.pop_front() else {
                self.prompt();
                break;
            };
            if self.execute_line(&line) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    fn execute_line(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Flow::Continue;
            }
        };
        match command {
            ConsoleCommand::Fetch(query) => self.dispatch(Msg::FetchRequested(query)),
            ConsoleCommand::Filter(criteria) => self.dispatch(Msg::FilterRequested(criteria)),
            ConsoleCommand::Upload { stage, path } => {
                self.dispatch(Msg::CsvUploadRequested { stage, path })
            }
            ConsoleCommand::Extract => self.dispatch(Msg::ExtractRequested),
            ConsoleCommand::Export => self.dispatch(Msg::ExportRequested),
            ConsoleCommand::Show => print!("{}", render::render_view(&self.state.view())),
            ConsoleCommand::Help => println!("{}", render::HELP),
            ConsoleCommand::Quit => return Flow::Quit,
            ConsoleCommand::Empty => {}
        }
        Flow::Continue
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(
            msg,
            Msg::CsvImported { .. } | Msg::CsvImportFailed { .. } | Msg::ExportWritten { .. }
        ) {
            self.pending_io = self.pending_io.saturating_sub(1);
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let now = Local::now();
        for notification in state.take_notifications() {
            println!("{}", render::render_notification(&notification, now));
        }
        if state.consume_dirty() {
            println!("{}", render::render_status(&state.view()));
        }
        self.state = state;
        self.pending_io += effects
            .iter()
            .filter(|effect| {
                matches!(effect, Effect::ImportCsv { .. } | Effect::WriteExport { .. })
            })
            .count();
        self.runner.enqueue(effects);
    }

    fn prompt(&self) {
        print!("leadgen> ");
        let _ = io::stdout().flush();
    }
}
