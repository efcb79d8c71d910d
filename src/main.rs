//! echampo main entrypoint.

use echampo::run;
use echampo::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
