//! Edge detection over successive liveness readings

use serde::{Deserialize, Serialize};

/// Edge in the observed liveness signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Transition {
    /// not running → running (or running at startup)
    Started,
    /// running → not running
    Closed,
}

/// Two-state machine fed with one reading per poll.
///
/// The first reading only produces [`Transition::Started`] when it is `true`
/// and `fire_initial_start` is set; otherwise it is recorded silently.
#[derive(Debug, Clone)]
pub struct LivenessTracker {
    state: Option<bool>,
    fire_initial_start: bool,
}

impl LivenessTracker {
    pub fn new(fire_initial_start: bool) -> Self {
        Self { state: None, fire_initial_start }
    }

    /// Last recorded reading, `None` before the first one.
    pub fn state(&self) -> Option<bool> {
        self.state
    }

    /// Record a reading and report the edge it creates, if any.
    pub fn observe(&mut self, running: bool) -> Option<Transition> {
        match self.state.replace(running) {
            None => (running && self.fire_initial_start).then_some(Transition::Started),
            Some(previous) if previous == running => None,
            Some(_) if running => Some(Transition::Started),
            Some(_) => Some(Transition::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(fire_initial_start: bool, readings: &[bool]) -> Vec<Transition> {
        let mut tracker = LivenessTracker::new(fire_initial_start);
        readings.iter().filter_map(|r| tracker.observe(*r)).collect()
    }

    #[test]
    fn start_then_close_for_a_single_run() {
        let readings = [false, false, true, true, false];
        assert_eq!(run(true, &readings), vec![Transition::Started, Transition::Closed]);
    }

    #[test]
    fn initial_true_fires_only_when_requested() {
        assert_eq!(run(true, &[true, true]), vec![Transition::Started]);
        assert!(run(false, &[true, true]).is_empty());
    }

    #[test]
    fn silent_initial_state_still_reports_the_close() {
        assert_eq!(
            run(false, &[true, false, true]),
            vec![Transition::Closed, Transition::Started]
        );
    }

    #[test]
    fn initial_false_is_silent() {
        assert!(run(true, &[false, false]).is_empty());
        assert_eq!(LivenessTracker::new(true).state(), None);
    }

    proptest! {
        #[test]
        fn transitions_match_edges(
            fire_initial_start in any::<bool>(),
            readings in prop::collection::vec(any::<bool>(), 0..64)
        ) {
            let mut expected = Vec::new();
            for (i, &running) in readings.iter().enumerate() {
                let previous = if i == 0 { None } else { Some(readings[i - 1]) };
                match previous {
                    None if running && fire_initial_start => expected.push(Transition::Started),
                    Some(false) if running => expected.push(Transition::Started),
                    Some(true) if !running => expected.push(Transition::Closed),
                    _ => {}
                }
            }
            prop_assert_eq!(run(fire_initial_start, &readings), expected);
        }

        #[test]
        fn transitions_alternate(readings in prop::collection::vec(any::<bool>(), 0..64)) {
            let transitions = run(true, &readings);
            for pair in transitions.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
            if let Some(first) = transitions.first() {
                prop_assert_eq!(*first, Transition::Started);
            }
        }
    }
}
