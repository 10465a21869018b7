//! Deterministic doubles for driving `TeleopLoop` in tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use teleop::config::{KeyboardConfig, SerialConfig};
use teleop::errors::{Result, TeleopError};
use teleop::teleop::{
    Clock, Connector, HeldKeys, InterruptFlag, KeyState, LoopEvent, LoopSettings, Reporter,
    Transport,
};

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn settings(poll_delay_ms: u64) -> LoopSettings {
    LoopSettings {
        init_delay: Duration::ZERO,
        poll_delay: ms(poll_delay_ms),
        idle_delay: ms(10),
    }
}

// ============== Clock ==============

/// Clock whose `sleep` advances time instantly
#[derive(Clone)]
pub struct ManualClock {
    base: Instant,
    elapsed: Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
            sleeps: Rc::default(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
        self.sleeps.borrow_mut().push(duration);
    }
}

// ============== Keys ==============

struct Hold {
    key: char,
    from: Duration,
    until: Option<Duration>,
}

/// Key state scripted against the manual clock
pub struct ScriptedKeys {
    clock: ManualClock,
    holds: Vec<Hold>,
    interrupt_at: Option<(Duration, InterruptFlag)>,
    refreshes: Rc<Cell<usize>>,
}

impl ScriptedKeys {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            holds: Vec::new(),
            interrupt_at: None,
            refreshes: Rc::default(),
        }
    }

    /// Hold `key` during `[from, until)`
    pub fn hold(mut self, key: char, from: Duration, until: Duration) -> Self {
        self.holds.push(Hold {
            key,
            from,
            until: Some(until),
        });
        self
    }

    /// Hold `key` from `from` onwards
    pub fn hold_from(mut self, key: char, from: Duration) -> Self {
        self.holds.push(Hold {
            key,
            from,
            until: None,
        });
        self
    }

    /// Raise `flag` at the first refresh at or after `at`
    pub fn interrupt_at(mut self, at: Duration, flag: &InterruptFlag) -> Self {
        self.interrupt_at = Some((at, flag.clone()));
        self
    }

    pub fn refresh_counter(&self) -> Rc<Cell<usize>> {
        self.refreshes.clone()
    }
}

impl KeyState for ScriptedKeys {
    fn refresh(&mut self) -> Result<()> {
        self.refreshes.set(self.refreshes.get() + 1);
        if let Some((at, flag)) = &self.interrupt_at
            && self.clock.elapsed() >= *at
        {
            flag.raise();
        }
        Ok(())
    }

    fn is_pressed(&self, key: char) -> bool {
        let now = self.clock.elapsed();
        self.holds.iter().any(|h| {
            h.key == key && h.from <= now && h.until.is_none_or(|until| now < until)
        })
    }
}

/// Terminal key events replayed through [`HeldKeys`] on the manual clock
pub struct TerminalEvents {
    clock: ManualClock,
    held: HeldKeys,
    pending: VecDeque<(Duration, KeyEvent)>,
}

impl TerminalEvents {
    pub fn new(clock: &ManualClock, config: &KeyboardConfig) -> Self {
        Self {
            clock: clock.clone(),
            held: HeldKeys::new(config),
            pending: VecDeque::new(),
        }
    }

    /// Queue an event; events must be added in time order
    pub fn event(mut self, at: Duration, key: char, kind: KeyEventKind) -> Self {
        let event = KeyEvent::new_with_kind(KeyCode::Char(key), KeyModifiers::NONE, kind);
        self.pending.push_back((at, event));
        self
    }

    /// Autorepeat for `key` every `every` from `from` up to `until`
    pub fn repeats(mut self, key: char, from: Duration, until: Duration, every: Duration) -> Self {
        let mut at = from;
        while at <= until {
            self = self.event(at, key, KeyEventKind::Repeat);
            at += every;
        }
        self
    }
}

impl KeyState for TerminalEvents {
    fn refresh(&mut self) -> Result<()> {
        let elapsed = self.clock.elapsed();
        while let Some((at, event)) = self.pending.front().copied() {
            if at > elapsed {
                break;
            }
            self.pending.pop_front();
            self.held.apply(&event, self.clock.now());
        }
        Ok(())
    }

    fn is_pressed(&self, key: char) -> bool {
        self.held.is_held(key, self.clock.now())
    }
}

// ============== Reporter ==============

#[derive(Clone, Default)]
pub struct RecordingReporter {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn sent_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.starts_with("Sent: "))
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: LoopEvent) {
        self.lines.borrow_mut().push(event.to_string());
    }
}

// ============== Serial ==============

/// What the mock device observed
#[derive(Clone, Default)]
pub struct Wire {
    writes: Rc<RefCell<Vec<(Duration, Vec<u8>)>>>,
    opens: Rc<Cell<usize>>,
    closes: Rc<Cell<usize>>,
}

impl Wire {
    pub fn payloads(&self) -> Vec<String> {
        self.writes
            .borrow()
            .iter()
            .map(|(_, bytes)| String::from_utf8(bytes.clone()).unwrap())
            .collect()
    }

    pub fn write_times(&self) -> Vec<Duration> {
        self.writes.borrow().iter().map(|(at, _)| *at).collect()
    }

    pub fn opens(&self) -> usize {
        self.opens.get()
    }

    pub fn closes(&self) -> usize {
        self.closes.get()
    }
}

pub struct MockConnector {
    pub wire: Wire,
    clock: ManualClock,
    fail_open: bool,
    fail_on_write: Option<usize>,
}

impl MockConnector {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            wire: Wire::default(),
            clock: clock.clone(),
            fail_open: false,
            fail_on_write: None,
        }
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Fail the `n`th write (1-based)
    pub fn failing_write(mut self, n: usize) -> Self {
        self.fail_on_write = Some(n);
        self
    }
}

pub struct MockLink {
    wire: Wire,
    clock: ManualClock,
    fail_on_write: Option<usize>,
    attempts: usize,
}

impl Connector for MockConnector {
    type Link = MockLink;

    fn open(&self, settings: &SerialConfig) -> Result<MockLink> {
        self.wire.opens.set(self.wire.opens.get() + 1);
        if self.fail_open {
            return Err(TeleopError::connection(format!(
                "Failed to open {}: No such file or directory",
                settings.port
            )));
        }
        Ok(MockLink {
            wire: self.wire.clone(),
            clock: self.clock.clone(),
            fail_on_write: self.fail_on_write,
            attempts: 0,
        })
    }
}

impl Transport for MockLink {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.attempts += 1;
        if self.fail_on_write == Some(self.attempts) {
            return Err(TeleopError::transport("device disconnected"));
        }
        self.wire
            .writes
            .borrow_mut()
            .push((self.clock.elapsed(), payload.to_vec()));
        Ok(())
    }
}

impl Drop for MockLink {
    fn drop(&mut self) {
        self.wire.closes.set(self.wire.closes.get() + 1);
    }
}
