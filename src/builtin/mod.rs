use std::collections::HashMap;
use std::os::raw::{c_char, c_int};

use crate::error::{Error, Result};
use crate::types::{Signature, Type};

use once_cell::sync::Lazy;

mod builtin;
pub use builtin::*;

/// Symbol name -> (address, signature), for code generators that link by name.
pub static BUILTINS: Lazy<HashMap<&'static str, (usize, Signature)>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for b in Builtin::ALL {
        m.insert(b.name(), (b.address(), b.signature()));
    }
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    PrintInt,
    PrintFloat,
    PrintBool,
    PrintChar,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [
        Builtin::PrintInt,
        Builtin::PrintFloat,
        Builtin::PrintBool,
        Builtin::PrintChar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::PrintInt => "_print_int",
            Builtin::PrintFloat => "_print_float",
            Builtin::PrintBool => "_print_bool",
            Builtin::PrintChar => "_print_char",
        }
    }

    pub fn from_name(name: &str) -> Result<Builtin> {
        Builtin::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| Error::UnknownBuiltin(name.to_owned()))
    }

    pub fn address(self) -> usize {
        match self {
            Builtin::PrintInt => _print_int as extern "C" fn(c_int) as usize,
            Builtin::PrintFloat => _print_float as extern "C" fn(f64) as usize,
            Builtin::PrintBool => _print_bool as extern "C" fn(c_int) as usize,
            Builtin::PrintChar => _print_char as extern "C" fn(c_char) as usize,
        }
    }

    pub fn arg_type(self) -> Type {
        match self {
            Builtin::PrintInt => Type::Int,
            Builtin::PrintFloat => Type::Float,
            Builtin::PrintBool => Type::Bool,
            Builtin::PrintChar => Type::Char,
        }
    }

    pub fn signature(self) -> Signature {
        Signature::new(vec![self.arg_type()], Type::Void)
    }
}

/// Resolve a symbol the way a linker would.
pub fn lookup(name: &str) -> Result<&'static (usize, Signature)> {
    BUILTINS
        .get(name)
        .ok_or_else(|| Error::UnknownBuiltin(name.to_owned()))
}
