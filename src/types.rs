use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Signature{
    pub inputs: Vec<Type>,
    pub output: Type
}

impl Signature{
    pub fn new(inputs: Vec<Type>, output: Type) -> Self {
        Self{inputs, output}
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, ty) in self.inputs.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, ")")?;
        if self.output != Type::Void {
            write!(f, " -> {}", self.output)?;
        }
        Ok(())
    }
}

/// Types as they cross the C ABI. Bools travel as a full `int`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Type{
    Int,
    Float,
    Bool,
    Char,
    Void
}

impl Type {
    pub fn from_str(name: &str) -> Option<Type> {
        match name {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "bool" => Some(Type::Bool),
            "char" => Some(Type::Char),
            _ => None
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::Char => "char",
            Type::Void => "void"
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for ty in [Type::Int, Type::Float, Type::Bool, Type::Char] {
            assert_eq!(Type::from_str(&ty.to_string()), Some(ty));
        }
        assert_eq!(Type::from_str("void"), None);
        assert_eq!(Type::from_str("i32"), None);
    }

    #[test]
    fn signature_display() {
        let sig = Signature::new(vec!(Type::Float), Type::Void);
        assert_eq!(sig.to_string(), "fn(float)");
        let sig = Signature::new(vec!(Type::Int, Type::Char), Type::Bool);
        assert_eq!(sig.to_string(), "fn(int, char) -> bool");
    }
}
