//! Convert command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codec::Format;
use crate::config::HexpalConfig;

use super::{load_input, output_format, save_output};

/// Execute the convert command: read in one layout, write in another
pub fn run_convert(
    config: &HexpalConfig,
    input: &Path,
    output: &Path,
    format: Option<Format>,
) -> ExitCode {
    let container = match load_input(input) {
        Ok(container) => container,
        Err(code) => return code,
    };

    save_output(output, &container, output_format(output, format, config))
}
