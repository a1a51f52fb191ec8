//! Keyboard input on a dedicated blocking thread.
//!
//! `crossterm::event::read` blocks, so it runs off the event loop and feeds
//! decoded [`Key`] intents through a channel. The thread dies with the
//! channel when the receiver is dropped.

use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use kubehop_core::session::Key;

/// Keeps raw mode on for exactly as long as the event loop runs.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enable() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub fn spawn_key_thread() -> UnboundedReceiver<Key> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        loop {
            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(_) => break,
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let decoded = match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Key::Up),
                KeyCode::Down | KeyCode::Char('j') => Some(Key::Down),
                KeyCode::Enter => Some(Key::Confirm),
                KeyCode::Char('q') => Some(Key::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Key::Quit)
                }
                _ => None,
            };

            if let Some(key) = decoded {
                if tx.send(key).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
