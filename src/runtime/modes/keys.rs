use colored::Colorize;

use crate::teleop::{CommandTable, QUIT_KEY};

pub fn show_keys() {
    println!("{}", "Key bindings:".bold());
    for command in CommandTable::standard().iter() {
        println!(
            "  {}  {:<13} {}",
            command.key.to_ascii_uppercase().to_string().cyan().bold(),
            command.motion.to_string(),
            command.trimmed().dimmed()
        );
    }
    println!(
        "  {}  {}",
        QUIT_KEY.to_ascii_uppercase().to_string().cyan().bold(),
        "Quit"
    );
}
