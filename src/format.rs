//! Text rendering for the print builtins.
//!
//! Everything here writes into an arbitrary `io::Write`, the exported
//! symbols in `builtin` just point these at stdout.

use std::fmt;
use std::io::{self, Write};

const PREFIX: &str = "Out: ";

/// Float in C `%lf` form: fixed notation, six fractional digits.
///
/// Rust's `{:.6}` already rounds the exact binary value the way glibc does,
/// only the non-finite spellings differ.
#[derive(Clone, Copy, Debug)]
pub struct Fixed(pub f64);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            if x.is_sign_negative() {
                f.write_str("-nan")
            } else {
                f.write_str("nan")
            }
        } else if x.is_infinite() {
            if x < 0.0 {
                f.write_str("-inf")
            } else {
                f.write_str("inf")
            }
        } else {
            write!(f, "{:.6}", x)
        }
    }
}

pub fn write_int<W: Write>(out: &mut W, x: i32) -> io::Result<()> {
    writeln!(out, "{}{}", PREFIX, x)
}

pub fn write_float<W: Write>(out: &mut W, x: f64) -> io::Result<()> {
    writeln!(out, "{}{}", PREFIX, Fixed(x))
}

/// Any nonzero value is true.
pub fn write_bool<W: Write>(out: &mut W, x: i32) -> io::Result<()> {
    let text = if x != 0 { "true" } else { "false" };
    writeln!(out, "{}{}", PREFIX, text)
}

/// Raw byte, no newline. Flushes before returning.
pub fn write_char<W: Write>(out: &mut W, c: u8) -> io::Result<()> {
    out.write_all(&[c])?;
    out.flush()
}
