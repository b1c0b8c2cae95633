//! Event System
//!
//! The level scene reports lifecycle changes (loads, completions, deaths)
//! through a queue instead of calling back into the driver. The driver
//! drains it once per frame.

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Level lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelEvent {
    /// A level finished loading and is now active
    Loaded { level: usize, name: String },
    /// The player reached the goal; fadeout has started
    Complete { level: usize },
    /// The player ran out of health; the level is being reset
    PlayerDied { level: usize },
}
