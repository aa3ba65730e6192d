//! Terminal input collaborator: turns crossterm key events into one
//! [`InputSnapshot`] per frame.
//!
//! Each key remembers the frame of its most recent press or repeat.  A
//! snapshot reports every action whose key is still live, so a direction
//! and Fire can be held at once.
//!
//! When the terminal reports key releases, a key stays live until its
//! release arrives.  Otherwise it stays live for a hold window after its
//! last press/repeat.  Windows are wall-clock durations converted to frames
//! at the configured frame rate.  Fire gets a window longer than the OS
//! key-repeat delay so a held Space never reads as a second press.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::input::{Action, InputSnapshot};

/// How long a movement key counts as held after its last press/repeat.
pub const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Fire's window; covers a typical key-repeat delay (250-600 ms).
pub const FIRE_HOLD_WINDOW: Duration = Duration::from_millis(640);

/// Whole frames spanned by `window` at `fps`, at least one.
pub fn hold_frames(window: Duration, fps: u32) -> u64 {
    ((window.as_secs_f64() * fps as f64).ceil() as u64).max(1)
}

/// Key → logical action.  Letters are matched case-insensitively.
pub fn action_for(code: &KeyCode) -> Option<Action> {
    match normalise(code) {
        KeyCode::Up | KeyCode::Char('w') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn normalise(code: &KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => *other,
    }
}

pub struct TerminalInput {
    rx: Receiver<Event>,
    /// Live keys → frame of their latest press or repeat.
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// Release events are delivered, so keys never expire on their own.
    release_events: bool,
    hold_frames: u64,
    fire_hold_frames: u64,
    close_requested: bool,
}

impl TerminalInput {
    /// Start a reader thread that blocks on terminal events and forwards
    /// them, leaving `poll` free to drain without waiting.
    pub fn spawn(release_events: bool, fps: u32) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // game loop gone
                    }
                }
                Err(e) => {
                    warn!("terminal event read failed: {e}");
                    break;
                }
            }
        });
        Self::from_receiver(rx, release_events, fps)
    }

    pub fn from_receiver(rx: Receiver<Event>, release_events: bool, fps: u32) -> Self {
        TerminalInput {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            release_events,
            hold_frames: hold_frames(HOLD_WINDOW, fps),
            fire_hold_frames: hold_frames(FIRE_HOLD_WINDOW, fps),
            close_requested: false,
        }
    }

    /// Drain pending events and report which actions are held this frame.
    pub fn poll(&mut self) -> InputSnapshot {
        self.frame += 1;

        loop {
            match self.rx.try_recv() {
                Ok(Event::Key(key)) => self.apply(key),
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("input channel closed");
                    self.close_requested = true;
                    break;
                }
            }
        }

        if !self.release_events {
            let frame = self.frame;
            let (hold, fire_hold) = (self.hold_frames, self.fire_hold_frames);
            self.key_frame.retain(|code, &mut last| {
                let window = match action_for(code) {
                    Some(Action::Fire) => fire_hold,
                    _ => hold,
                };
                frame.saturating_sub(last) <= window
            });
        }

        let mut snapshot = InputSnapshot::default();
        for action in self.key_frame.keys().filter_map(action_for) {
            snapshot.set(action, true);
        }
        snapshot
    }

    fn apply(&mut self, key: KeyEvent) {
        let code = normalise(&key.code);
        match key.kind {
            KeyEventKind::Press => {
                if code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.close_requested = true;
                    return;
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    pub fn poll_should_close(&self) -> bool {
        self.close_requested
    }
}
