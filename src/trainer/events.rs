//! Step results emitted by the trainer

use std::fmt;
use std::time::Duration;

use crate::combo::{KeyEvent, KeyId};

/// How a step attempt resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The required keys were pressed before the deadline
    Success,
    /// The deadline passed; the step will be retried
    Timeout,
}

/// One captured key as shown in step diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedKey {
    pub key: KeyId,
    /// Time since the previous captured key, `None` for the first one
    pub delay: Option<Duration>,
}

/// Report emitted each time a step resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Zero-based index of the step in the sequence
    pub step_index: usize,
    /// One-based attempt number for this step
    pub attempt: u32,
    pub outcome: StepOutcome,
    /// Time from step start to the completing press, or the full window on timeout
    pub elapsed: Duration,
    pub expected_keys: Vec<KeyId>,
    /// Keys captured during the attempt, in arrival order
    pub captured_events: Vec<CapturedKey>,
}

impl StepResult {
    pub fn is_success(&self) -> bool {
        self.outcome == StepOutcome::Success
    }

    /// Render the attempt's input as `a -> b(+0.100s) -> c(+0.020s)`
    pub fn render_input(&self) -> String {
        let mut out = String::new();
        for captured in &self.captured_events {
            match captured.delay {
                Some(delay) => {
                    out.push_str(&format!(" -> {}(+{:.3}s)", captured.key, delay.as_secs_f64()))
                }
                None => out.push_str(captured.key.as_str()),
            }
        }
        out
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.step_index + 1;
        match self.outcome {
            StepOutcome::Success => {
                write!(f, "Step {}: success! ({:.2}s)", step, self.elapsed.as_secs_f64())
            }
            StepOutcome::Timeout => {
                writeln!(f, "Step {}: failed! Timed out or wrong keys", step)?;
                let expected: Vec<&str> = self.expected_keys.iter().map(KeyId::as_str).collect();
                writeln!(f, "Expected keys: {}", expected.join(", "))?;
                if self.captured_events.is_empty() {
                    write!(f, "No key input detected")
                } else {
                    write!(f, "Your input: {}", self.render_input())
                }
            }
        }
    }
}

/// Pair each event with its delay from the previous one
pub fn captured_keys<'a>(events: impl IntoIterator<Item = &'a KeyEvent>) -> Vec<CapturedKey> {
    let mut previous = None;
    events
        .into_iter()
        .map(|event| {
            let delay = previous.map(|prev| event.timestamp.duration_since(prev));
            previous = Some(event.timestamp);
            CapturedKey {
                key: event.key.clone(),
                delay,
            }
        })
        .collect()
}

/// Callback type for step results
pub type StepCallback = Box<dyn Fn(&StepResult) + Send + Sync>;

/// Fans step results out to every registered listener
pub struct EventHandler {
    callbacks: Vec<StepCallback>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Add a listener
    pub fn on_step_result(&mut self, callback: StepCallback) {
        self.callbacks.push(callback);
    }

    /// Deliver a result to every listener
    pub fn emit(&self, result: &StepResult) {
        for callback in &self.callbacks {
            callback(result);
        }
    }

    pub fn has_listeners(&self) -> bool {
        !self.callbacks.is_empty()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn timeout_result(captured: Vec<CapturedKey>) -> StepResult {
        StepResult {
            step_index: 0,
            attempt: 1,
            outcome: StepOutcome::Timeout,
            elapsed: Duration::from_millis(500),
            expected_keys: vec!["i".into(), "o".into()],
            captured_events: captured,
        }
    }

    #[test]
    fn test_captured_keys_delays() {
        let base = Instant::now();
        let events = vec![
            KeyEvent::new("a", base),
            KeyEvent::new("b", base + Duration::from_millis(100)),
            KeyEvent::new("c", base + Duration::from_millis(120)),
        ];

        let captured = captured_keys(&events);

        assert_eq!(captured[0].delay, None);
        assert_eq!(captured[1].delay, Some(Duration::from_millis(100)));
        assert_eq!(captured[2].delay, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_render_input() {
        let result = timeout_result(vec![
            CapturedKey { key: "i".into(), delay: None },
            CapturedKey { key: "o".into(), delay: Some(Duration::from_millis(150)) },
        ]);
        assert_eq!(result.render_input(), "i -> o(+0.150s)");
    }

    #[test]
    fn test_display_timeout() {
        let text = timeout_result(Vec::new()).to_string();
        assert!(text.starts_with("Step 1: failed!"));
        assert!(text.contains("Expected keys: i, o"));
        assert!(text.contains("No key input detected"));
    }

    #[test]
    fn test_display_success() {
        let result = StepResult {
            step_index: 2,
            attempt: 1,
            outcome: StepOutcome::Success,
            elapsed: Duration::from_millis(120),
            expected_keys: vec!["a".into()],
            captured_events: Vec::new(),
        };
        assert!(result.is_success());
        assert_eq!(result.to_string(), "Step 3: success! (0.12s)");
    }

    #[test]
    fn test_event_handler_fans_out() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut handler = EventHandler::new();
        assert!(!handler.has_listeners());

        for _ in 0..2 {
            let count = Arc::clone(&count);
            handler.on_step_result(Box::new(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }
        handler.emit(&timeout_result(Vec::new()));

        assert!(handler.has_listeners());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
