pub mod logging;
pub mod panic_handler;
pub mod signal;

pub use logging::init_logging;
pub use panic_handler::install_panic_hook;
pub use signal::install_interrupt_handler;
