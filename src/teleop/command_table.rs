//! Fixed key-to-command mapping
//!
//! The table is an ordered sequence: when several mapped keys are held at
//! once, their commands go out in table order within the same pass.

use strum::{AsRefStr, EnumIter, EnumMessage};

/// Key that ends the session. Checked once per pass, after every mapped key.
pub const QUIT_KEY: char = 'q';

/// Robot motion selected by a mapped key
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumMessage)]
pub enum Motion {
    #[strum(message = "Forward")]
    Forward,
    #[strum(message = "Backward")]
    Backward,
    #[strum(message = "Rotate left")]
    RotateLeft,
    #[strum(message = "Rotate right")]
    RotateRight,
}

impl std::fmt::Display for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_message().unwrap_or(self.as_ref()))
    }
}

/// One table entry: a key and the literal line written to the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveCommand {
    pub key: char,
    pub motion: Motion,
    /// Newline-terminated ASCII payload, treated as opaque by this crate
    pub payload: &'static str,
}

impl DriveCommand {
    /// Raw bytes as written to the serial connection
    pub fn bytes(&self) -> &'static [u8] {
        self.payload.as_bytes()
    }

    /// Payload without the line terminator, as echoed to the console
    pub fn trimmed(&self) -> &'static str {
        self.payload.trim()
    }
}

const STANDARD_COMMANDS: [DriveCommand; 4] = [
    DriveCommand {
        key: 'w',
        motion: Motion::Forward,
        payload: "1,1,0,0,1,0,0,0,0,0\n",
    },
    DriveCommand {
        key: 's',
        motion: Motion::Backward,
        payload: "1,1,0,0,0,1,0,0,0,0\n",
    },
    DriveCommand {
        key: 'a',
        motion: Motion::RotateLeft,
        payload: "1,1,0,0,0,0,1,0,0,0\n",
    },
    DriveCommand {
        key: 'd',
        motion: Motion::RotateRight,
        payload: "1,1,0,0,0,0,0,1,0,0\n",
    },
];

/// Immutable, ordered command table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable {
    entries: &'static [DriveCommand],
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandTable {
    /// The W/S/A/D table understood by the robot firmware
    pub const fn standard() -> Self {
        Self {
            entries: &STANDARD_COMMANDS,
        }
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &'static DriveCommand> + use<> {
        let entries: &'static [DriveCommand] = self.entries;
        entries.iter()
    }

    pub fn lookup(&self, key: char) -> Option<&'static DriveCommand> {
        self.entries.iter().find(|c| c.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + use<> {
        self.iter().map(|c| c.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order_is_w_s_a_d() {
        let keys: Vec<char> = CommandTable::standard().keys().collect();
        assert_eq!(keys, vec!['w', 's', 'a', 'd']);
    }

    #[test]
    fn test_quit_key_is_not_mapped() {
        assert!(CommandTable::standard().lookup(QUIT_KEY).is_none());
    }

    #[test]
    fn test_payloads_are_ten_fields_and_newline_terminated() {
        for command in CommandTable::standard().iter() {
            assert!(command.payload.ends_with('\n'));
            assert!(command.payload.is_ascii());
            let fields: Vec<&str> = command.trimmed().split(',').collect();
            assert_eq!(fields.len(), 10, "key {}", command.key);
            assert!(fields.iter().all(|f| f.len() == 1 && f.as_bytes()[0].is_ascii_digit()));
        }
    }

    #[test]
    fn test_motion_display() {
        assert_eq!(Motion::RotateLeft.to_string(), "Rotate left");
        assert_eq!(Motion::Forward.to_string(), "Forward");
    }
}
