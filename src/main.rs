use std::process::ExitCode;

use clap::Parser;

use teleop::cli::Cli;
use teleop::errors::TeleopError;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match teleop::runtime::run(cli) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<TeleopError>() {
                Some(e) => eprintln!("{}", e.format_colored()),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
