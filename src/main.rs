use std::process::ExitCode;

fn main() -> ExitCode {
    match goeval::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
