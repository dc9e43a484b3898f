//! Session events for the user interface.

use earcheck_spec::{Scoreboard, TrialRecord};
use tokio::sync::mpsc::UnboundedSender;

/// Something the interface should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A labelled playback step started (`Some`) or ended (`None`).
    NowPlaying(Option<String>),
    /// Index of the melody note currently sounding, `None` between notes.
    NoteHighlight(Option<usize>),
    /// The first trial of a level is about to be generated.
    LevelChanged {
        /// Level index.
        level: usize,
        /// Display form of the level's difficulty.
        difficulty: String,
    },
    /// Both stimuli have played and an answer is expected.
    AwaitingResponse {
        /// 1-based number of the trial.
        trial: u32,
        /// Options the answer must choose from.
        choices: usize,
    },
    /// A response was judged.
    TrialScored {
        /// The judged trial.
        record: TrialRecord,
        /// Counters after this trial.
        scoreboard: Scoreboard,
    },
    /// Every quota was met.
    Finished(Scoreboard),
    /// The session was stopped.
    Stopped(Scoreboard),
}

/// Optional outlet for [`SessionEvent`]s.
///
/// Sending never fails the session; events for a dropped receiver are lost.
#[derive(Debug, Clone, Default)]
pub struct EventSink(Option<UnboundedSender<SessionEvent>>);

impl EventSink {
    /// Sink that forwards to a channel.
    pub fn new(sender: UnboundedSender<SessionEvent>) -> Self {
        Self(Some(sender))
    }

    /// Sink that drops everything.
    pub fn disabled() -> Self {
        Self(None)
    }

    /// Sends an event if a receiver is attached.
    pub fn emit(&self, event: SessionEvent) {
        if let Some(sender) = &self.0 {
            let _ = sender.send(event);
        }
    }
}
