//! gofmt adapter
//!
//! The generated text is piped through the host language's canonical
//! formatter before it is written anywhere. The generator already emits
//! well-formed text, so this pass only normalizes spacing the way gofmt
//! would for hand-written code.

use gomust_common::GenError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Run `gofmt` over the generated source. A missing or failing gofmt is a
/// fatal error like any other.
pub fn gofmt(source: &str) -> Result<String, GenError> {
    let mut child = Command::new("gofmt")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| GenError::Io {
            message: format!("failed to run gofmt: {}", err),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(GenError::Io {
            message: format!(
                "gofmt failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| GenError::Io {
        message: "gofmt produced invalid utf-8".to_string(),
    })
}
