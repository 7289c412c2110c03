use std::process::ExitCode;

fn main() -> ExitCode {
    match domtool::run() {
        None => ExitCode::SUCCESS,
        Some(err) => ExitCode::from(err.exit_code()),
    }
}
