//! Keyboard-to-serial teleoperation core
//!
//! - `command_table`: fixed, ordered key -> payload mapping
//! - `key_state` / `keyboard`: key level queries and the crossterm-backed source
//! - `transport`: serial connection opened per session, closed on drop
//! - `runner`: the polling loop

pub mod clock;
pub mod command_table;
pub mod interrupt;
pub mod key_state;
pub mod keyboard;
pub mod reporter;
pub mod runner;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use command_table::{CommandTable, DriveCommand, Motion, QUIT_KEY};
pub use interrupt::InterruptFlag;
pub use key_state::KeyState;
pub use keyboard::{HeldKeys, KeyUpdate, TerminalKeyState};
pub use reporter::{ConsoleReporter, LoopEvent, Reporter};
pub use runner::{Exit, LoopSettings, PAUSE_SLICE, RunSummary, TeleopLoop};
pub use transport::{Connector, PortSummary, SerialConnector, SerialLink, Transport, available_ports};
