//! # Joystick replay module
//!
//! This module replays recorded joystick scripts, so that a control session
//! can be repeated without an operator.
//!
//! A script is a sequence of entries of the form
//!
//! ```text
//! 1.5: {"axes": [0.0, 0.5, 1.0, 0.0, 0.0, 1.0], "buttons": []};
//! ```
//!
//! where the number is the session time in seconds at which the state is
//! emitted and the payload is a JSON `JoystickState`.
//!
//! `JoyRecorder` writes scripts in the same format from a live session.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use std::io::{BufWriter, Write};
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::joy::JoystickState;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A joystick state which is scripted to occur at a specific time.
struct Entry {
    /// The time the state is emitted at
    exec_time_s: f64,

    /// The state to emit
    state: JoystickState
}

/// A joystick replay.
///
/// After loading a script use `.get_pending()` to acquire the states which
/// are due.
pub struct JoyReplay {
    script_path: Option<PathBuf>,
    entries: VecDeque<Entry>
}

/// Records joystick states into a replay script.
///
/// Times are written relative to the first recorded state, so the replay
/// starts as soon as it is loaded. Every entry is flushed as it is written.
pub struct JoyRecorder<W: Write> {
    writer: W,
    first_time_s: Option<f64>,
    last_time_s: f64,
    num_states: usize
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid joystick state at {0} s: {1}")]
    InvalidState(f64, serde_json::Error),

    #[error("Script entries must be in time order, found {1} s after {0} s")]
    OutOfOrder(f64, f64),

    #[error("Could not write to the recording: {0}")]
    RecordWriteError(std::io::Error),

    #[error("Could not serialize the joystick state: {0}")]
    RecordSerializeError(serde_json::Error)
}

/// States pending from a replay.
#[derive(Debug)]
pub enum PendingStates {
    None,
    Some(Vec<JoystickState>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl JoyReplay {

    /// Load a replay from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ReplayError> {

        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ReplayError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path)
            .map_err(ReplayError::ScriptLoadError)?;

        let mut replay = Self::from_str(&script)?;
        replay.script_path = Some(path);

        Ok(replay)
    }

    /// Parse a replay from the script text.
    pub fn from_str(script: &str) -> Result<Self, ReplayError> {
        let mut entries: VecDeque<Entry> = VecDeque::new();

        // Each entry is `time: json;`, possibly spread over several lines
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Replay regex is invalid");

        for cap in re.captures_iter(script) {
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ReplayError::InvalidTimestamp(format!("{}", e)))?;

            let state: JoystickState = serde_json::from_str(&cap[3])
                .map_err(|e| ReplayError::InvalidState(exec_time_s, e))?;

            if let Some(last) = entries.back() {
                if exec_time_s < last.exec_time_s {
                    return Err(ReplayError::OutOfOrder(
                        last.exec_time_s, exec_time_s
                    ));
                }
            }

            entries.push_back(Entry {
                exec_time_s,
                state
            });
        }

        if entries.is_empty() {
            return Err(ReplayError::ScriptEmpty)
        }

        Ok(JoyReplay {
            script_path: None,
            entries
        })
    }

    /// Return the states that are due at `current_time_s`.
    pub fn get_pending(&mut self, current_time_s: f64) -> PendingStates {

        // If the queue is empty the script is over
        if self.entries.is_empty() {
            return PendingStates::EndOfScript
        }

        let mut states = vec![];

        while let Some(entry) = self.entries.front() {
            if entry.exec_time_s > current_time_s {
                break;
            }

            if let Some(entry) = self.entries.pop_front() {
                states.push(entry.state);
            }
        }

        if states.is_empty() {
            PendingStates::None
        }
        else {
            PendingStates::Some(states)
        }
    }

    /// Get the number of states remaining in the script
    pub fn get_num_states(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.entries.back() {
            Some(e) => e.exec_time_s,
            None => 0f64
        }
    }

    /// Path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

impl JoyRecorder<BufWriter<fs::File>> {

    /// Create a new recording at the given path, replacing any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = fs::File::create(path.as_ref())
            .map_err(ReplayError::RecordWriteError)?;

        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> JoyRecorder<W> {

    /// Record into any writer.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            first_time_s: None,
            last_time_s: 0.0,
            num_states: 0
        }
    }

    /// Record a state received at `time_s`.
    ///
    /// Times which go backwards are written as the previous time so the
    /// script stays in order.
    pub fn record(
        &mut self,
        time_s: f64,
        state: &JoystickState
    ) -> Result<(), ReplayError> {

        if !time_s.is_finite() {
            return Err(ReplayError::InvalidTimestamp(format!("{}", time_s)))
        }

        let first_time_s = *self.first_time_s.get_or_insert(time_s);
        let rel_time_s = (time_s - first_time_s).max(self.last_time_s);

        let json = serde_json::to_string(state)
            .map_err(ReplayError::RecordSerializeError)?;

        writeln!(self.writer, "{:.3}: {};", rel_time_s, json)
            .and_then(|_| self.writer.flush())
            .map_err(ReplayError::RecordWriteError)?;

        self.last_time_s = rel_time_s;
        self.num_states += 1;

        Ok(())
    }

    /// Get the number of states recorded so far
    pub fn get_num_states(&self) -> usize {
        self.num_states
    }

    /// Consume the recorder, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCRIPT: &str = r#"
        0.0: {"axes": [0.0, 0.5, 1.0, 0.0, 0.0, 1.0]};
        0.5: {"axes": [0.0, -0.5, 1.0, 0.0, 0.0, 1.0]};
        0.5: {"axes": [0.0, 0.0, 1.0, 0.2, 0.0, 1.0], "buttons": [true]};
        2.0: {
            "axes": [0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
        };
    "#;

    #[test]
    fn test_parse() {
        let replay = JoyReplay::from_str(SCRIPT).unwrap();

        assert_eq!(replay.get_num_states(), 4);
        assert_eq!(replay.get_duration(), 2.0);
        assert!(replay.script_path().is_none());
    }

    #[test]
    fn test_pending() {
        let mut replay = JoyReplay::from_str(SCRIPT).unwrap();

        match replay.get_pending(0.1) {
            PendingStates::Some(s) => assert_eq!(s[0].axes[1], 0.5),
            p => panic!("Expected one state, got {:?}", p)
        }

        assert!(matches!(replay.get_pending(0.2), PendingStates::None));

        match replay.get_pending(1.0) {
            PendingStates::Some(s) => {
                assert_eq!(s.len(), 2);
                assert!(s[1].button(0));
            },
            p => panic!("Expected two states, got {:?}", p)
        }

        assert!(matches!(replay.get_pending(5.0), PendingStates::Some(_)));
        assert!(matches!(replay.get_pending(5.0), PendingStates::EndOfScript));
    }

    #[test]
    fn test_demo_replay() {
        let replay = JoyReplay::from_str(include_str!("../../replays/swim_demo.txt")).unwrap();

        assert_eq!(replay.get_num_states(), 9);
        assert_eq!(replay.get_duration(), 8.0);
    }

    #[test]
    fn test_invalid_scripts() {
        assert!(matches!(
            JoyReplay::from_str("nothing here"),
            Err(ReplayError::ScriptEmpty)
        ));
        assert!(matches!(
            JoyReplay::from_str("1.0: {\"axes\": oops};"),
            Err(ReplayError::InvalidState(_, _))
        ));
        assert!(matches!(
            JoyReplay::from_str("2.0: {\"axes\": []};\n1.0: {\"axes\": []};"),
            Err(ReplayError::OutOfOrder(_, _))
        ));
    }

    #[test]
    fn test_recording_replays() {
        let mut recorder = JoyRecorder::from_writer(Vec::new());

        let first = JoystickState::new(vec![0.0, 0.5, 1.0], vec![]);
        let second = JoystickState::new(vec![0.0, -0.5, 1.0], vec![false, true]);

        recorder.record(12.25, &first).unwrap();
        recorder.record(13.0, &second).unwrap();

        // A clock step backwards doesn't break the ordering
        recorder.record(12.5, &first).unwrap();

        assert!(recorder.record(f64::NAN, &first).is_err());
        assert_eq!(recorder.get_num_states(), 3);

        let script = String::from_utf8(recorder.into_inner()).unwrap();
        let mut replay = JoyReplay::from_str(&script).unwrap();

        assert_eq!(replay.get_num_states(), 3);
        assert_eq!(replay.get_duration(), 0.75);

        match replay.get_pending(0.0) {
            PendingStates::Some(s) => assert_eq!(s[0].axes, first.axes),
            p => panic!("Expected the first state, got {:?}", p)
        }
        match replay.get_pending(1.0) {
            PendingStates::Some(s) => {
                assert_eq!(s.len(), 2);
                assert!(s[0].button(1));
            },
            p => panic!("Expected two states, got {:?}", p)
        }
    }
}
