//! A straight line of builtin calls with immediate arguments.
//!
//! This is the smallest thing that looks like backend output: enough to drive
//! the exported symbols from real machine code without a compiler around.

use std::io::{self, Write};
use std::str::FromStr;

use crate::builtin::{Builtin, _print_bool, _print_char, _print_float, _print_int};
use crate::error::{Error, Result};
use crate::format;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Int(i32),
    Float(f64),
    Bool(i32),
    Char(u8),
}

impl Call {
    pub fn builtin(&self) -> Builtin {
        match self {
            Call::Int(_) => Builtin::PrintInt,
            Call::Float(_) => Builtin::PrintFloat,
            Call::Bool(_) => Builtin::PrintBool,
            Call::Char(_) => Builtin::PrintChar,
        }
    }

    /// Reference rendering, byte-identical to what the builtin prints.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match *self {
            Call::Int(x) => format::write_int(out, x),
            Call::Float(x) => format::write_float(out, x),
            Call::Bool(x) => format::write_bool(out, x),
            Call::Char(c) => format::write_char(out, c),
        }
    }

    /// Call the exported symbol from Rust.
    pub fn invoke(&self) {
        match *self {
            Call::Int(x) => _print_int(x),
            Call::Float(x) => _print_float(x),
            Call::Bool(x) => _print_bool(x),
            Call::Char(c) => _print_char(c as _),
        }
    }
}

impl FromStr for Call {
    type Err = Error;

    fn from_str(text: &str) -> Result<Call> {
        let (kind, value) = text
            .split_once(':')
            .ok_or_else(|| Error::bad_call(text, "expected `kind:value`"))?;

        let ty = Type::from_str(kind)
            .ok_or_else(|| Error::bad_call(text, format!("unknown kind `{}`", kind)))?;

        match ty {
            Type::Int => value
                .parse()
                .map(Call::Int)
                .map_err(|e| Error::bad_call(text, format!("{}", e))),
            Type::Float => value
                .parse()
                .map(Call::Float)
                .map_err(|e| Error::bad_call(text, format!("{}", e))),
            Type::Bool => match value {
                "true" => Ok(Call::Bool(1)),
                "false" => Ok(Call::Bool(0)),
                _ => value
                    .parse()
                    .map(Call::Bool)
                    .map_err(|e| Error::bad_call(text, format!("{}", e))),
            },
            Type::Char => parse_char(value)
                .map(Call::Char)
                .ok_or_else(|| Error::bad_call(text, "expected one byte, an escape or #NN")),
            Type::Void => Err(Error::bad_call(text, "void takes no value")),
        }
    }
}

fn parse_char(value: &str) -> Option<u8> {
    match value {
        "\\n" => Some(b'\n'),
        "\\t" => Some(b'\t'),
        "\\s" => Some(b' '),
        "\\\\" => Some(b'\\'),
        _ => {
            if let Some(code) = value.strip_prefix('#') {
                if !code.is_empty() {
                    return code.parse().ok();
                }
            }
            match value.as_bytes() {
                [c] => Some(*c),
                _ => None,
            }
        }
    }
}

/// Whitespace separated calls.
pub fn parse_calls(text: &str) -> Result<Vec<Call>> {
    text.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_each_kind() {
        assert_eq!("int:-5".parse::<Call>().unwrap(), Call::Int(-5));
        assert_eq!("float:3.14".parse::<Call>().unwrap(), Call::Float(3.14));
        assert_eq!("bool:0".parse::<Call>().unwrap(), Call::Bool(0));
        assert_eq!("bool:7".parse::<Call>().unwrap(), Call::Bool(7));
        assert_eq!("bool:true".parse::<Call>().unwrap(), Call::Bool(1));
        assert_eq!("char:A".parse::<Call>().unwrap(), Call::Char(b'A'));
    }

    #[test]
    fn parse_char_forms() {
        assert_eq!(parse_char("\\n"), Some(b'\n'));
        assert_eq!(parse_char("\\s"), Some(b' '));
        assert_eq!(parse_char("\\\\"), Some(b'\\'));
        assert_eq!(parse_char("#65"), Some(b'A'));
        assert_eq!(parse_char("#"), Some(b'#'));
        assert_eq!(parse_char("#300"), None);
        assert_eq!(parse_char("ab"), None);
        assert_eq!(parse_char(""), None);
        // multi-byte utf-8 is not a C char
        assert_eq!(parse_char("é"), None);
    }

    #[test]
    fn parse_errors() {
        for bad in ["int", "int:", "int:x", "str:hi", "float:pi", "bool:maybe", "char:xy", "void:1"] {
            assert!(
                matches!(bad.parse::<Call>(), Err(Error::BadCall { .. })),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn parse_list() {
        let calls = parse_calls(" int:1\nfloat:2.5\tbool:0 char:\\n ").unwrap();
        assert_eq!(
            calls,
            vec![Call::Int(1), Call::Float(2.5), Call::Bool(0), Call::Char(b'\n')]
        );
        assert!(parse_calls("").unwrap().is_empty());
        assert!(parse_calls("int:1 nope").is_err());
    }

    #[test]
    fn reference_output() {
        let calls = parse_calls("int:5 float:3.14 bool:0 bool:-3 char:A").unwrap();
        let mut buf = Vec::new();
        for call in &calls {
            call.write_to(&mut buf).unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Out: 5\nOut: 3.140000\nOut: false\nOut: true\nA"
        );
    }

    #[test]
    fn builtins_match_kind() {
        assert_eq!(Call::Int(0).builtin(), Builtin::PrintInt);
        assert_eq!(Call::Float(0.0).builtin(), Builtin::PrintFloat);
        assert_eq!(Call::Bool(0).builtin(), Builtin::PrintBool);
        assert_eq!(Call::Char(0).builtin(), Builtin::PrintChar);
    }
}
