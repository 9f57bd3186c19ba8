use std::collections::VecDeque;

use fux_core::{InputEvent, Size};

/// Where a running app gets its window and its input from.
pub trait EventSource {
    /// Creates the window (or whatever stands in for it).
    fn open(&mut self, title: &str, size: Size) -> anyhow::Result<()>;

    /// Appends the events that arrived since the last call.
    fn poll(&mut self, out: &mut Vec<InputEvent>) -> anyhow::Result<()>;
}

/// Replays fixed per-frame batches, then asks the app to quit.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<InputEvent>>,
    window: Option<(String, Size)>,
    polls: usize,
}

impl ScriptedEvents {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Adds one more frame's worth of events.
    pub fn then(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.batches.push_back(events.into_iter().collect());
        self
    }

    /// Adds `n` frames without input.
    pub fn idle(mut self, n: usize) -> Self {
        self.batches.extend(std::iter::repeat_with(Vec::new).take(n));
        self
    }

    /// Title and size the app opened with.
    pub fn window(&self) -> Option<(&str, Size)> {
        self.window.as_ref().map(|(t, s)| (t.as_str(), *s))
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for ScriptedEvents {
    fn open(&mut self, title: &str, size: Size) -> anyhow::Result<()> {
        self.window = Some((title.to_string(), size));
        Ok(())
    }

    fn poll(&mut self, out: &mut Vec<InputEvent>) -> anyhow::Result<()> {
        self.polls += 1;
        match self.batches.pop_front() {
            Some(batch) => out.extend(batch),
            None => out.push(InputEvent::Quit),
        }
        Ok(())
    }
}
