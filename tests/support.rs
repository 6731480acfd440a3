use std::ffi::OsStr;
use std::process::{Command, Output};

/// Run the `benchkit` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_benchkit<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = benchkit_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("BENCHKIT_LOG")
        .output()
        .map_err(|err| format!("run benchkit failed: {}", err))
}

fn benchkit_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_benchkit").map_or_else(
        || Err("CARGO_BIN_EXE_benchkit missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
