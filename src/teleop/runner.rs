//! The teleop loop
//!
//! running -> stopping -> closed. The connection lives in `session`'s scope, so
//! it is dropped (closed) exactly once whichever way the loop ends.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::clock::Clock;
use super::command_table::{CommandTable, QUIT_KEY};
use super::interrupt::InterruptFlag;
use super::key_state::KeyState;
use super::reporter::{LoopEvent, Reporter};
use super::transport::{Connector, Transport};
use crate::config::{SerialConfig, TimingConfig};
use crate::errors::Result;

/// Longest uninterrupted sleep; bounds how late an interrupt is noticed.
pub const PAUSE_SLICE: Duration = Duration::from_millis(10);

/// Loop timing, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    pub init_delay: Duration,
    pub poll_delay: Duration,
    pub idle_delay: Duration,
}

impl From<&TimingConfig> for LoopSettings {
    fn from(timing: &TimingConfig) -> Self {
        Self {
            init_delay: timing.init_delay(),
            poll_delay: timing.poll_delay(),
            idle_delay: timing.idle_delay(),
        }
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self::from(&TimingConfig::default())
    }
}

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub exit: Exit,
    pub commands_sent: u64,
}

enum Flow {
    Continue,
    Interrupted,
}

pub struct TeleopLoop<K, C, R> {
    table: CommandTable,
    keys: K,
    clock: C,
    reporter: R,
    interrupt: InterruptFlag,
    settings: LoopSettings,
    commands_sent: u64,
}

impl<K, C, R> TeleopLoop<K, C, R>
where
    K: KeyState,
    C: Clock,
    R: Reporter,
{
    pub fn new(
        keys: K,
        clock: C,
        reporter: R,
        interrupt: InterruptFlag,
        settings: LoopSettings,
    ) -> Self {
        Self {
            table: CommandTable::standard(),
            keys,
            clock,
            reporter,
            interrupt,
            settings,
            commands_sent: 0,
        }
    }

    /// Open the connection, drive until quit or interrupt, then close it.
    ///
    /// A connector error is returned before any key is read. Transport
    /// errors end the session; the connection is still closed.
    pub fn run<N: Connector>(&mut self, connector: &N, serial: &SerialConfig) -> Result<RunSummary> {
        let link = connector.open(serial)?;
        self.session(link)
    }

    /// Drive an already opened connection, closing it when the session ends.
    pub fn session<T: Transport>(&mut self, mut link: T) -> Result<RunSummary> {
        let result = self.drive(&mut link);

        match &result {
            Ok(summary) => info!(
                "Session ended ({:?}), {} commands sent",
                summary.exit, summary.commands_sent
            ),
            Err(e) => warn!(
                "Session aborted after {} commands: {}",
                self.commands_sent, e
            ),
        }
        drop(link);
        result
    }

    fn drive<T: Transport>(&mut self, link: &mut T) -> Result<RunSummary> {
        debug!("Waiting {:?} for the device to initialize", self.settings.init_delay);
        if let Flow::Interrupted = self.pause(self.settings.init_delay)? {
            return Ok(self.interrupted());
        }
        self.reporter.report(LoopEvent::Started);

        let table = self.table;
        loop {
            self.keys.refresh()?;
            let mut sent_this_pass = false;

            for command in table.iter() {
                if self.interrupt.is_raised() {
                    return Ok(self.interrupted());
                }
                if !self.keys.is_pressed(command.key) {
                    continue;
                }

                link.send(command.bytes())?;
                self.commands_sent += 1;
                sent_this_pass = true;
                debug!(key = %command.key, motion = %command.motion, bytes = command.payload.len(), "Command sent");
                self.reporter.report(LoopEvent::Sent(command));

                if let Flow::Interrupted = self.pause(self.settings.poll_delay)? {
                    return Ok(self.interrupted());
                }
            }

            if self.interrupt.is_raised() {
                return Ok(self.interrupted());
            }
            if self.keys.is_pressed(QUIT_KEY) {
                info!("Quit key pressed");
                self.reporter.report(LoopEvent::Quit);
                return Ok(self.summary(Exit::Quit));
            }

            if !sent_this_pass && let Flow::Interrupted = self.pause(self.settings.idle_delay)? {
                return Ok(self.interrupted());
            }
        }
    }

    /// Sleep in slices, keeping key state fresh and watching for interrupts.
    fn pause(&mut self, duration: Duration) -> Result<Flow> {
        let deadline = self.clock.now() + duration;
        loop {
            self.keys.refresh()?;
            if self.interrupt.is_raised() {
                return Ok(Flow::Interrupted);
            }

            let now = self.clock.now();
            if now >= deadline {
                return Ok(Flow::Continue);
            }
            self.clock.sleep(PAUSE_SLICE.min(deadline - now));
        }
    }

    fn interrupted(&mut self) -> RunSummary {
        info!("Interrupted by user");
        self.reporter.report(LoopEvent::Interrupted);
        self.summary(Exit::Interrupted)
    }

    fn summary(&self, exit: Exit) -> RunSummary {
        RunSummary {
            exit,
            commands_sent: self.commands_sent,
        }
    }
}
