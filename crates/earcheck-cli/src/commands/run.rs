//! Run command implementation
//!
//! Drives one interactive discrimination session on the terminal. Answers are
//! typed as a line of input; `q` (or Ctrl+C) stops the session at any time,
//! including while stimuli are playing.

use anyhow::{Context, Result};
use colored::Colorize;
use earcheck_backend_audio::{SynthTonePlayer, DEFAULT_SAMPLE_RATE};
use earcheck_backend_stimulus::fresh_seed;
use earcheck_session::{
    MelodyTask, PitchTask, RhythmTask, SequencerPhase, SessionError, SessionEvent, TrialSequencer,
};
use earcheck_spec::{BatteryConfig, SessionReport, TaskKind};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use super::keys::{is_quit, AnswerKeys};
use super::reporting::{print_report, EventPrinter};
use crate::input::load_battery;

/// Run the run command
///
/// # Arguments
/// * `task` - Task to run
/// * `config_path` - Optional battery configuration file
/// * `seed` - Seed override; falls back to the config seed, then a fresh one
/// * `record` - Optional WAV path receiving everything played
/// * `json_output` - Whether to print the final report as JSON
///
/// # Returns
/// Exit code: 0 when the session finished or was stopped
pub fn run(
    task: TaskKind,
    config_path: Option<&str>,
    seed: Option<u32>,
    record: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let config = load_battery(config_path)?;
    let seed = seed.or(config.seed).unwrap_or_else(fresh_seed);
    let player = Rc::new(SynthTonePlayer::new(DEFAULT_SAMPLE_RATE)?);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let report = rt.block_on(session(task, config, Rc::clone(&player), seed, json_output))?;

    if let Some(path) = record {
        let summary = player
            .write_recording(Path::new(path))
            .with_context(|| format!("Failed to write recording: {}", path))?;
        debug!(path, samples = summary.samples, "recording written");
        let line = format!(
            "{} {} ({} samples, {})",
            "Recorded:".dimmed(),
            path,
            summary.samples,
            &summary.pcm_hash[..16]
        );
        if json_output {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    if json_output {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_report(&report);
    }
    Ok(ExitCode::SUCCESS)
}

async fn session(
    task: TaskKind,
    config: BatteryConfig,
    player: Rc<SynthTonePlayer>,
    seed: u32,
    json_output: bool,
) -> Result<SessionReport> {
    match task {
        TaskKind::Pitch => drive(PitchTask::new(config.pitch)?, player, seed, json_output).await,
        TaskKind::Rhythm => drive(RhythmTask::new(config.rhythm)?, player, seed, json_output).await,
        TaskKind::Melody => drive(MelodyTask::new(config.melody)?, player, seed, json_output).await,
    }
}

/// Line reader over stdin that goes quiet once input ends.
struct Input {
    lines: Lines<BufReader<Stdin>>,
    closed: bool,
}

impl Input {
    fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            closed: false,
        }
    }

    /// Next line, or `None` once stdin is closed. Cancel safe.
    async fn next_line(&mut self) -> Option<String> {
        if self.closed {
            return std::future::pending().await;
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line),
            Ok(None) | Err(_) => {
                self.closed = true;
                None
            }
        }
    }
}

/// Output target for events and prompts; JSON mode keeps stdout for the report.
struct Terminal {
    printer: EventPrinter,
    json_output: bool,
}

impl Terminal {
    fn event(&mut self, event: &SessionEvent) {
        if !self.json_output {
            self.printer.print(event);
        }
    }

    fn drain(&mut self, events: &mut UnboundedReceiver<SessionEvent>) {
        while let Ok(event) = events.try_recv() {
            self.event(&event);
        }
    }

    fn prompt(&self, text: &str) {
        if self.json_output {
            eprint!("{} ", text);
            let _ = io::stderr().flush();
        } else {
            print!("{} ", text.bold());
            let _ = io::stdout().flush();
        }
    }

    fn notice(&self, text: &str) {
        eprintln!("  {} {}", "!".yellow(), text);
    }
}

async fn drive<T: AnswerKeys>(
    task: T,
    player: Rc<SynthTonePlayer>,
    seed: u32,
    json_output: bool,
) -> Result<SessionReport> {
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut session = TrialSequencer::new(task, player, seed).with_events(tx);
    let handle = session.handle();
    let mut input = Input::stdin();
    let mut terminal = Terminal {
        printer: EventPrinter::default(),
        json_output,
    };
    let mut answer: Option<T::Answer> = None;

    loop {
        let next = answer.take();
        let result = {
            let step = async {
                match next {
                    None => session.start().await,
                    Some(answer) => session.respond(answer).await.map(|_| ()),
                }
            };
            tokio::pin!(step);
            loop {
                tokio::select! {
                    result = &mut step => break result,
                    Some(event) = events.recv() => terminal.event(&event),
                    line = input.next_line() => {
                        // keys other than quit are ignored while stimuli play
                        if line.as_deref().map_or(true, is_quit) {
                            handle.stop();
                        }
                    }
                    _ = tokio::signal::ctrl_c() => handle.stop(),
                }
            }
        };
        terminal.drain(&mut events);

        match result {
            Ok(()) | Err(SessionError::Stopped) => {}
            Err(SessionError::InvalidAnswer(message)) => terminal.notice(&message),
            Err(e) => return Err(e.into()),
        }

        match session.phase() {
            SequencerPhase::AwaitingResponse { .. } => {
                let choices = session.choices().unwrap_or_default();
                match read_answer::<T>(&mut input, &terminal, choices).await {
                    Some(chosen) => answer = Some(chosen),
                    None => {
                        session.stop();
                        terminal.drain(&mut events);
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    Ok(session.report())
}

/// Prompts until a valid answer is typed; `None` when the participant quits.
async fn read_answer<T: AnswerKeys>(
    input: &mut Input,
    terminal: &Terminal,
    choices: usize,
) -> Option<T::Answer> {
    loop {
        terminal.prompt(&T::prompt(choices));
        let line = tokio::select! {
            line = input.next_line() => line?,
            _ = tokio::signal::ctrl_c() => return None,
        };
        if is_quit(&line) {
            return None;
        }
        match T::parse_answer(&line, choices) {
            Some(answer) => return Some(answer),
            None => terminal.notice(&format!("unrecognised answer: {}", line.trim())),
        }
    }
}
