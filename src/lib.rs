//! Output builtins for native Wabbit programs.
//!
//! Backend output calls `_print_int`, `_print_float`, `_print_bool` and
//! `_print_char` by name; link this crate (as a staticlib, or resolve through
//! [`builtin::BUILTINS`] in a JIT) to provide them. The JIT and assembler
//! modules emit call sequences against those symbols for testing and the
//! `wabbit-rt` driver.

pub mod builtin;
pub mod call;
pub mod disassemble;
pub mod error;
pub mod format;
pub mod jit;
pub mod logging;
#[cfg(target_arch = "x86_64")]
pub mod native;
pub mod profiler;
pub mod types;

pub use error::{Error, Result};
