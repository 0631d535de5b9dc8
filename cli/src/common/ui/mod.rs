//! # Sitekit UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Console interaction helpers. `confirm_exact` implements the strict
//! confirmation used before destructive or irreversible operations: the user
//! must type the exact token, and anything else (including `y`, a different
//! case, an empty line or EOF) counts as a refusal.
//!
//! The reader and writer are generic so tests can drive the prompt with
//! in-memory buffers instead of a terminal.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};

/// Prints `prompt`, reads one line and returns whether it equals `token` exactly.
///
/// Only the line terminator (`\n` or `\r\n`) is stripped before comparing.
pub fn confirm_exact<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    token: &str,
) -> Result<bool> {
    write!(output, "{} Type '{}' to continue: ", prompt, token)
        .context("Failed to write confirmation prompt")?;
    output.flush().context("Failed to flush confirmation prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read confirmation input")?;
    if read == 0 {
        return Ok(false);
    }

    let answer = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    Ok(answer == token)
}
