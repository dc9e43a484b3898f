//! Keyboard answers for each task.

use earcheck_session::{MelodyTask, PitchAnswer, PitchTask, RhythmAnswer, RhythmTask, TrialTask};

/// Input that stops a session at any point.
pub(crate) fn is_quit(input: &str) -> bool {
    matches!(input.trim(), "q" | "Q")
}

/// Maps typed input to a task's answers.
pub(crate) trait AnswerKeys: TrialTask {
    /// Prompt listing the accepted keys.
    fn prompt(choices: usize) -> String;

    /// Parses one line of input; `None` for anything unrecognised.
    fn parse_answer(input: &str, choices: usize) -> Option<Self::Answer>;
}

impl AnswerKeys for PitchTask {
    fn prompt(_choices: usize) -> String {
        "Was the second tone [h]igher or [l]ower? (q to quit)".to_string()
    }

    fn parse_answer(input: &str, _choices: usize) -> Option<PitchAnswer> {
        match input.trim() {
            "h" | "H" => Some(PitchAnswer::Higher),
            "l" | "L" => Some(PitchAnswer::Lower),
            _ => None,
        }
    }
}

impl AnswerKeys for RhythmTask {
    fn prompt(_choices: usize) -> String {
        "Were the rhythms [i]dentical or [d]ifferent? (q to quit)".to_string()
    }

    fn parse_answer(input: &str, _choices: usize) -> Option<RhythmAnswer> {
        match input.trim() {
            "i" | "I" => Some(RhythmAnswer::Same),
            "d" | "D" => Some(RhythmAnswer::Different),
            _ => None,
        }
    }
}

impl AnswerKeys for MelodyTask {
    fn prompt(choices: usize) -> String {
        format!("Which note changed? [1-{}] (q to quit)", choices)
    }

    fn parse_answer(input: &str, choices: usize) -> Option<usize> {
        match input.trim().parse::<usize>() {
            Ok(number) if (1..=choices).contains(&number) => Some(number - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_keys() {
        assert_eq!(PitchTask::parse_answer("h\n", 2), Some(PitchAnswer::Higher));
        assert_eq!(PitchTask::parse_answer(" L ", 2), Some(PitchAnswer::Lower));
        assert_eq!(PitchTask::parse_answer("x", 2), None);
    }

    #[test]
    fn test_rhythm_keys() {
        assert_eq!(RhythmTask::parse_answer("i", 2), Some(RhythmAnswer::Same));
        assert_eq!(RhythmTask::parse_answer("d", 2), Some(RhythmAnswer::Different));
        assert_eq!(RhythmTask::parse_answer("s", 2), None);
    }

    #[test]
    fn test_melody_keys_are_one_based() {
        assert_eq!(MelodyTask::parse_answer("1", 5), Some(0));
        assert_eq!(MelodyTask::parse_answer("5", 5), Some(4));
        assert_eq!(MelodyTask::parse_answer("0", 5), None);
        assert_eq!(MelodyTask::parse_answer("6", 5), None);
        assert!(MelodyTask::prompt(5).contains("[1-5]"));
    }

    #[test]
    fn test_quit() {
        assert!(is_quit("q\n"));
        assert!(!is_quit("quit now"));
    }
}
