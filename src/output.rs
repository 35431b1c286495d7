//! Output encoding for generated messages
//!
//! The generated message is held internally as UTF-8. Before it reaches
//! stdout it is re-encoded into the configured byte encoding; the GBK
//! option exists for Windows tooling (SourceTree consoles in particular)
//! that expects code page 936 output.

use std::io::{self, Write};

use encoding_rs::GBK;

use crate::config::OutputEncoding;
use crate::error::EncodingError;

/// Encode `message` into the target encoding
///
/// # Errors
///
/// * `EncodingError::Unrepresentable` when the message contains characters
///   outside the GBK repertoire
pub fn encode_message(message: &str, encoding: OutputEncoding) -> Result<Vec<u8>, EncodingError> {
    match encoding {
        OutputEncoding::Utf8 => Ok(message.as_bytes().to_vec()),
        OutputEncoding::Gbk => {
            let (bytes, _, had_errors) = GBK.encode(message);
            if had_errors {
                return Err(EncodingError::Unrepresentable { encoding: "gbk" });
            }
            Ok(bytes.into_owned())
        }
    }
}

/// Write `message` to `out` in the target encoding, with a trailing newline
///
/// Nothing is written when encoding fails, so a failed invocation never
/// produces partial output.
pub fn write_message<W: Write>(
    out: &mut W,
    message: &str,
    encoding: OutputEncoding,
) -> Result<(), EncodingError> {
    let bytes = encode_message(message, encoding)?;
    out.write_all(&bytes)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Write `message` to stdout in the target encoding
pub fn print_message(message: &str, encoding: OutputEncoding) -> Result<(), EncodingError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_message(&mut handle, message, encoding)
}
