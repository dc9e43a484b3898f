use colored::Colorize;
use earcheck_spec::{SessionOutcome, SessionReport};
use earcheck_session::SessionEvent;
use std::io::{self, Write};

/// Prints session events as they arrive.
#[derive(Debug, Default)]
pub(crate) struct EventPrinter {
    mid_line: bool,
}

impl EventPrinter {
    pub(crate) fn print(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::NowPlaying(Some(label)) => {
                self.end_line();
                println!("{}", label.cyan());
            }
            SessionEvent::NowPlaying(None) => self.end_line(),
            SessionEvent::NoteHighlight(Some(index)) => {
                print!("{} ", (index + 1).to_string().yellow().bold());
                let _ = io::stdout().flush();
                self.mid_line = true;
            }
            SessionEvent::NoteHighlight(None) => {}
            SessionEvent::LevelChanged { level, difficulty } => {
                self.end_line();
                println!();
                println!(
                    "{} {} ({})",
                    "Level".bold(),
                    level + 1,
                    difficulty.dimmed()
                );
            }
            SessionEvent::AwaitingResponse { .. } => self.end_line(),
            SessionEvent::TrialScored { record, .. } => match &record.detail {
                None => println!("  {} Test {}", "ok".green(), record.number),
                Some(detail) => println!("  {} {}", "x".red(), detail),
            },
            SessionEvent::Finished(_) | SessionEvent::Stopped(_) => self.end_line(),
        }
    }

    fn end_line(&mut self) {
        if self.mid_line {
            println!();
            self.mid_line = false;
        }
    }
}

/// Prints the final scoreboard in human-readable form.
pub(crate) fn print_report(report: &SessionReport) {
    let board = &report.scoreboard;
    println!();
    match report.outcome {
        SessionOutcome::Finished => {
            println!("{} {} session finished", "Done:".green().bold(), report.task)
        }
        SessionOutcome::Stopped => {
            println!("{} {} session stopped", "Stopped:".yellow().bold(), report.task)
        }
    }
    println!("{} {}", "Seed:".dimmed(), report.seed);

    let rate = board
        .pass_rate()
        .map(|r| format!(" ({:.0}%)", r * 100.0))
        .unwrap_or_default();
    println!(
        "{} {} / {}{}",
        "Passed:".bold(),
        board.total_passed,
        board.total_trials,
        rate
    );

    if !board.failure_detail.is_empty() {
        println!("{}", "Failures:".bold());
        for line in &board.failure_detail {
            println!("  {} {}", "x".red(), line);
        }
    }
}
