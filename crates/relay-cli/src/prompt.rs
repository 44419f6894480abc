//! Small helpers around dialoguer prompts.

use colored::Colorize;

/// Unwraps a prompt result, treating any prompt error (Escape, Ctrl-C,
/// closed TTY) as a user cancellation. Returns None after printing the
/// cancellation notice; callers bail out quietly with exit code 0.
pub fn or_cancelled<T>(result: dialoguer::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(_) => {
            println!("\n{}", "Operation cancelled".yellow());
            None
        }
    }
}
