//! The symbols backend output links against.
//!
//! Write errors are dropped on the floor, same as an unchecked `printf`.
//! Nothing here may panic: these are called from foreign frames.

use std::io;
use std::os::raw::{c_char, c_int};

use crate::format;

#[no_mangle]
pub extern "C" fn _print_int(x: c_int) {
    let _ = format::write_int(&mut io::stdout().lock(), x);
}

#[no_mangle]
pub extern "C" fn _print_float(x: f64) {
    let _ = format::write_float(&mut io::stdout().lock(), x);
}

#[no_mangle]
pub extern "C" fn _print_bool(x: c_int) {
    let _ = format::write_bool(&mut io::stdout().lock(), x);
}

#[no_mangle]
pub extern "C" fn _print_char(c: c_char) {
    let _ = format::write_char(&mut io::stdout().lock(), c as u8);
}
