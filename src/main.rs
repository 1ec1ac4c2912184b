use std::process::ExitCode;

use yamlnorm::ui::output;

fn main() -> ExitCode {
    match yamlnorm::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
