//! Cancellation-aware playback steps.
//!
//! Every suspension point checks the session's cancellation token before and
//! after it waits. A wait that has started runs to completion; the check
//! afterwards turns a cancelled session into [`SessionError::Stopped`] so the
//! caller unwinds without playing anything further.

use std::time::Duration;

use earcheck_backend_audio::{TonePlayer, ToneRequest};
use tokio_util::sync::CancellationToken;

use crate::error::{SessionError, SessionResult};
use crate::events::{EventSink, SessionEvent};

/// Sleeps for `duration` unless the token is already cancelled.
pub async fn pause(duration: Duration, token: &CancellationToken) -> SessionResult<()> {
    ensure_running(token)?;
    tokio::time::sleep(duration).await;
    ensure_running(token)
}

fn ensure_running(token: &CancellationToken) -> SessionResult<()> {
    if token.is_cancelled() {
        Err(SessionError::Stopped)
    } else {
        Ok(())
    }
}

/// What a task needs to present a stimulus.
#[derive(Debug)]
pub struct Presentation<'a, P> {
    player: &'a P,
    token: &'a CancellationToken,
    events: &'a EventSink,
}

impl<'a, P: TonePlayer> Presentation<'a, P> {
    /// Bundles a player, the session token, and the event sink.
    pub fn new(player: &'a P, token: &'a CancellationToken, events: &'a EventSink) -> Self {
        Self {
            player,
            token,
            events,
        }
    }

    /// Plays a tone and waits for it to end.
    pub async fn play(&self, request: ToneRequest) -> SessionResult<()> {
        ensure_running(self.token)?;
        self.player.play(request).await?;
        ensure_running(self.token)
    }

    /// Waits in silence.
    pub async fn pause_ms(&self, ms: u32) -> SessionResult<()> {
        pause(Duration::from_millis(ms as u64), self.token).await
    }

    /// Announces a labelled playback step.
    pub fn now_playing(&self, label: &str) {
        self.events
            .emit(SessionEvent::NowPlaying(Some(label.to_string())));
    }

    /// Clears the playback label.
    pub fn clear_now_playing(&self) {
        self.events.emit(SessionEvent::NowPlaying(None));
    }

    /// Marks the melody note currently sounding.
    pub fn highlight_note(&self, index: Option<usize>) {
        self.events.emit(SessionEvent::NoteHighlight(index));
    }
}
