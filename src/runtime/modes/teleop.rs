//! Run mode
//!
//! Wires the real terminal, serial port and clock into the teleop loop.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::RunArgs;
use crate::runtime::lifetime::{shutdown, startup};
use crate::teleop::{
    Connector, ConsoleReporter, LoopSettings, SerialConnector, SystemClock, TeleopLoop,
    TerminalKeyState,
};

/// Run the teleop loop until quit, interrupt or error
pub fn run_teleop(config_path: Option<&Path>, args: &RunArgs) -> Result<ExitCode> {
    let ctx = startup::prepare_teleop_startup(config_path, args)?;
    let config = &ctx.config;

    // 串口先于 raw 模式打开，打开失败时终端保持原样
    let link = match SerialConnector.open(&config.serial) {
        Ok(link) => link,
        Err(e) => return Ok(shutdown::finish_session(Err(e))?),
    };

    let keys = TerminalKeyState::new(&config.keyboard, ctx.interrupt.clone())?;
    let mut teleop = TeleopLoop::new(
        keys,
        SystemClock,
        ConsoleReporter,
        ctx.interrupt.clone(),
        LoopSettings::from(&config.timing),
    );

    let result = teleop.session(link);
    // 先恢复终端，再输出错误信息
    drop(teleop);

    Ok(shutdown::finish_session(result)?)
}
