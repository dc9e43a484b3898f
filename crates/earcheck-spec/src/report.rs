//! Score bookkeeping and end-of-session reports.

use serde::{Deserialize, Serialize};

use crate::config::TaskKind;

/// Running pass/fail counters shown to the participant after every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Trials answered so far.
    pub total_trials: u32,
    /// Trials answered correctly.
    pub total_passed: u32,
    /// One line per failed trial, in order.
    pub failure_detail: Vec<String>,
}

impl Scoreboard {
    /// Records a correct answer.
    pub fn record_pass(&mut self) {
        self.total_trials += 1;
        self.total_passed += 1;
    }

    /// Records a wrong answer with its explanation.
    pub fn record_failure(&mut self, detail: impl Into<String>) {
        self.total_trials += 1;
        self.failure_detail.push(detail.into());
    }

    /// Trials answered incorrectly.
    pub fn total_failed(&self) -> u32 {
        self.total_trials - self.total_passed
    }

    /// Fraction of trials passed, `None` before the first trial.
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total_trials == 0 {
            None
        } else {
            Some(self.total_passed as f64 / self.total_trials as f64)
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Every level's quota was answered.
    Finished,
    /// The participant or operator stopped the session early.
    Stopped,
}

/// One answered trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based trial number across the whole session.
    pub number: u32,
    /// Index of the level the trial belonged to.
    pub level: usize,
    /// Display form of the level's difficulty.
    pub difficulty: String,
    /// Whether the answer was correct.
    pub correct: bool,
    /// Failure explanation for wrong answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Summary of one task session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Task that was run.
    pub task: TaskKind,
    /// Seed the session's random stream was created from.
    pub seed: u32,
    /// How the session ended.
    pub outcome: SessionOutcome,
    /// Final counters.
    pub scoreboard: Scoreboard,
    /// Every answered trial.
    pub trials: Vec<TrialRecord>,
}

impl SessionReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scoreboard_counts() {
        let mut board = Scoreboard::default();
        assert_eq!(board.pass_rate(), None);

        board.record_pass();
        board.record_failure("Test 2 failed");
        board.record_pass();

        assert_eq!(board.total_trials, 3);
        assert_eq!(board.total_passed, 2);
        assert_eq!(board.total_failed(), 1);
        assert_eq!(board.failure_detail, vec!["Test 2 failed".to_string()]);
        assert!((board.pass_rate().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_serialization() {
        let report = SessionReport {
            task: TaskKind::Pitch,
            seed: 5,
            outcome: SessionOutcome::Stopped,
            scoreboard: Scoreboard::default(),
            trials: vec![TrialRecord {
                number: 1,
                level: 0,
                difficulty: "17 Hz".to_string(),
                correct: true,
                detail: None,
            }],
        };
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"outcome\": \"stopped\""));
        assert!(!json.contains("detail"));
        let parsed: SessionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
