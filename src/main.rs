//! opsboard main entrypoint.

use opsboard::logging::init_logger;
use opsboard::run;
use opsboard::ui::messages::error;

fn main() {
    let _guard = init_logger();

    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
