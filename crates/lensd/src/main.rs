//! stdio host for the lens control daemon.
//!
//! Reads one request document per line from standard input and writes one
//! response line per request to standard output. Logs go to standard error.

use std::io::{self, Write};
use std::process::ExitCode;

use lensd::{SystemConfigLoader, bootstrap_with};

fn main() -> ExitCode {
    let service = match bootstrap_with(&SystemConfigLoader) {
        Ok(service) => service,
        Err(error) => {
            writeln!(io::stderr().lock(), "lensd: {error}").ok();
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match service.line_handler().serve(stdin, stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: "lensd", %error, "request stream failed");
            ExitCode::FAILURE
        }
    }
}
