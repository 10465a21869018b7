use std::fmt;
use std::io::Write;

use colored::Colorize;

use super::command_table::DriveCommand;

/// User-visible console events of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    Started,
    Sent(&'static DriveCommand),
    Quit,
    Interrupted,
}

impl fmt::Display for LoopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopEvent::Started => {
                write!(f, "Press W/A/S/D to control the robot. Press 'q' to quit.")
            }
            LoopEvent::Sent(command) => write!(f, "Sent: {}", command.trimmed()),
            LoopEvent::Quit => write!(f, "Exiting..."),
            LoopEvent::Interrupted => write!(f, "Interrupted by user"),
        }
    }
}

pub trait Reporter {
    fn report(&mut self, event: LoopEvent);
}

/// Writes events to stdout
///
/// Lines end in `\r\n` because the terminal is in raw mode while the loop runs.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: LoopEvent) {
        let line = match event {
            LoopEvent::Started => event.to_string().cyan().to_string(),
            LoopEvent::Sent(command) => {
                format!("{} {}", "Sent:".green(), command.trimmed())
            }
            LoopEvent::Quit => event.to_string().bold().to_string(),
            LoopEvent::Interrupted => event.to_string().yellow().bold().to_string(),
        };

        let mut stdout = std::io::stdout().lock();
        // 控制台输出失败不影响串口发送
        let _ = write!(stdout, "{}\r\n", line);
        let _ = stdout.flush();
    }
}
