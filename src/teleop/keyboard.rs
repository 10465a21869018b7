//! Terminal-backed key state
//!
//! Terminals deliver key events, not key levels. Press and repeat events mark
//! a key held; a release event clears it. Terminals that cannot report
//! releases (no keyboard enhancement support) leave the key held for a while
//! after its last event: `repeat_delay` until autorepeat starts, then
//! `hold_window` per repeat. Where releases are reported, a key with no events
//! for `release_timeout` is dropped in case its release was lost.

use std::collections::HashMap;
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};
use tracing::{debug, info, warn};

use super::interrupt::InterruptFlag;
use super::key_state::KeyState;
use crate::config::KeyboardConfig;
use crate::errors::{Result, TeleopError};

/// Outcome of feeding one key event into [`HeldKeys`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUpdate {
    Held(char),
    Released(char),
    Interrupt,
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_event: Instant,
    repeating: bool,
}

/// Held-key bookkeeping, independent of the terminal
#[derive(Debug, Clone)]
pub struct HeldKeys {
    keys: HashMap<char, HeldKey>,
    hold_window: Duration,
    repeat_delay: Duration,
    release_timeout: Duration,
    releases_reported: bool,
}

impl HeldKeys {
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            keys: HashMap::new(),
            hold_window: config.hold_window(),
            repeat_delay: config.repeat_delay(),
            release_timeout: config.release_timeout(),
            releases_reported: false,
        }
    }

    pub fn apply(&mut self, key: &KeyEvent, now: Instant) -> KeyUpdate {
        let KeyCode::Char(c) = key.code else {
            return KeyUpdate::Ignored;
        };

        // raw 模式下 Ctrl+C 不会产生 SIGINT
        if key.modifiers.contains(KeyModifiers::CONTROL) && c.eq_ignore_ascii_case(&'c') {
            return if key.kind == KeyEventKind::Release {
                KeyUpdate::Ignored
            } else {
                KeyUpdate::Interrupt
            };
        }

        let c = c.to_ascii_lowercase();
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // 旧式终端把自动重复报告为 Press，仍按住时再次收到即视为重复
                let repeating = self.is_held(c, now);
                self.keys.insert(
                    c,
                    HeldKey {
                        last_event: now,
                        repeating,
                    },
                );
                KeyUpdate::Held(c)
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.keys.remove(&c);
                KeyUpdate::Released(c)
            }
        }
    }

    pub fn is_held(&self, key: char, now: Instant) -> bool {
        let Some(held) = self.keys.get(&key) else {
            return false;
        };
        let limit = if self.releases_reported {
            self.release_timeout
        } else if held.repeating {
            self.hold_window
        } else {
            self.repeat_delay
        };
        now.saturating_duration_since(held.last_event) <= limit
    }
}

/// Raw mode plus keyboard enhancement, restored on drop
struct TerminalModeGuard {
    enhanced: bool,
}

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        enable_raw_mode()?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            info!("Keyboard enhancement enabled, key releases are reported");
        } else {
            info!("Keyboard enhancement unavailable, using hold window for key releases");
        }
        Ok(Self { enhanced })
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
    }
}

/// [`KeyState`] reading the controlling terminal through crossterm
pub struct TerminalKeyState {
    held: HeldKeys,
    interrupt: InterruptFlag,
    _mode: TerminalModeGuard,
}

impl TerminalKeyState {
    pub fn new(config: &KeyboardConfig, interrupt: InterruptFlag) -> Result<Self> {
        let mode = TerminalModeGuard::new()
            .map_err(|e| TeleopError::terminal(format!("Failed to enter raw mode: {}", e)))?;
        Ok(Self {
            held: HeldKeys::new(config),
            interrupt,
            _mode: mode,
        })
    }
}

impl KeyState for TerminalKeyState {
    fn refresh(&mut self) -> Result<()> {
        let read_err = |e: std::io::Error| TeleopError::terminal(format!("Key read failed: {}", e));

        while event::poll(Duration::ZERO).map_err(read_err)? {
            if let Event::Key(key) = event::read().map_err(read_err)? {
                match self.held.apply(&key, Instant::now()) {
                    KeyUpdate::Interrupt => {
                        debug!("Ctrl+C received from terminal");
                        self.interrupt.raise();
                    }
                    KeyUpdate::Held(c) | KeyUpdate::Released(c) => {
                        debug!(key = %c, kind = ?key.kind, "Key event");
                    }
                    KeyUpdate::Ignored => {}
                }
            }
        }
        Ok(())
    }

    fn is_pressed(&self, key: char) -> bool {
        self.held.is_held(key, Instant::now())
    }
}
