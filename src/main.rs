//! attrshift binary entry point.

use std::process::ExitCode;

use attrshift::ui::output;

fn main() -> ExitCode {
    match attrshift::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
