//! Stdin / stdout handling.
//!
//! Single-line input loses its trailing newline unless raw mode is on, so
//! `echo secret | laravel_encrypt` encrypts `secret`. Multi-line input is
//! never touched.

use std::io::{IsTerminal, Read, Write};

use zeroize::Zeroizing;

use crate::error::CliError;

/// True when stdin is a pipe or file rather than a terminal.
#[must_use]
pub fn is_input_piped() -> bool {
    !std::io::stdin().is_terminal()
}

/// True when stdout is a pipe or file rather than a terminal.
#[must_use]
pub fn is_output_piped() -> bool {
    !std::io::stdout().is_terminal()
}

/// Strip a trailing `\n` when it is the only newline in `input`.
///
/// `"abc\n"` becomes `"abc"`; `"a\nb\n"`, `"abc"` and `"\n\n"` are unchanged.
pub fn strip_single_line(input: &mut Vec<u8>) {
    let newlines = input.iter().filter(|&&b| b == b'\n').count();
    if newlines == 1 && input.last() == Some(&b'\n') {
        input.pop();
    }
}

/// Read all of `reader`, applying newline stripping unless `raw`.
///
/// # Errors
///
/// Returns `CliError::Read` if the stream fails.
pub fn read_input<R: Read>(reader: &mut R, raw: bool) -> Result<Zeroizing<Vec<u8>>, CliError> {
    let mut buf = Zeroizing::new(Vec::new());
    reader.read_to_end(&mut buf).map_err(CliError::Read)?;
    if !raw {
        strip_single_line(&mut buf);
    }
    Ok(buf)
}

/// Write `bytes`, followed by `\n` when `newline` is set.
///
/// # Errors
///
/// Returns `CliError::Write` if the stream fails.
pub fn write_output<W: Write>(writer: &mut W, bytes: &[u8], newline: bool) -> Result<(), CliError> {
    writer.write_all(bytes).map_err(CliError::Write)?;
    if newline {
        writer.write_all(b"\n").map_err(CliError::Write)?;
    }
    writer.flush().map_err(CliError::Write)
}
