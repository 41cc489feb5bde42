//! hourledger main entrypoint.

use hourledger::run;
use hourledger::ui::messages::{error, warning};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if e.is_retryable() {
            warning("Nothing was changed; the command can be retried.");
        } else if matches!(e, hourledger::errors::AppError::Forbidden(_)) {
            error("Use --role to act with a different role.");
        }
        std::process::exit(1);
    }
}
