//! JVM field and method descriptors.
//!
//! Descriptors are parsed into structured values so that the class names they
//! reference can be rewritten without touching array depth, primitive markers
//! or parameter arity. `Display` prints the exact source spelling back.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("empty descriptor")]
    Empty,
    #[error("unexpected '{found}' at position {position} in '{descriptor}'")]
    UnexpectedChar {
        descriptor: String,
        position: usize,
        found: char,
    },
    #[error("unexpected end of '{descriptor}'")]
    UnexpectedEnd { descriptor: String },
    #[error("empty class name in '{descriptor}'")]
    EmptyClassName { descriptor: String },
    #[error("trailing characters after position {position} in '{descriptor}'")]
    Trailing { descriptor: String, position: usize },
}

/// The element type of a descriptor once array dimensions are stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
    /// Internal (`/`-separated) class name.
    Object(String),
}

impl BaseType {
    fn from_primitive(c: char) -> Option<Self> {
        let base = match c {
            'B' => Self::Byte,
            'C' => Self::Char,
            'D' => Self::Double,
            'F' => Self::Float,
            'I' => Self::Int,
            'J' => Self::Long,
            'S' => Self::Short,
            'Z' => Self::Boolean,
            'V' => Self::Void,
            _ => return None,
        };
        Some(base)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Double => 'D',
            Self::Float => 'F',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Short => 'S',
            Self::Boolean => 'Z',
            Self::Void => 'V',
            Self::Object(name) => return write!(f, "L{name};"),
        };
        write!(f, "{c}")
    }
}

/// A field type such as `I`, `[[J` or `Ljava/lang/String;`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    array_depth: usize,
    base: BaseType,
}

impl TypeDescriptor {
    pub fn new(array_depth: usize, base: BaseType) -> Self {
        Self { array_depth, base }
    }

    /// An object type referencing `class_name` (internal form).
    pub fn object(class_name: impl Into<String>) -> Self {
        Self::new(0, BaseType::Object(class_name.into()))
    }

    pub fn parse(descriptor: &str) -> Result<Self, DescriptorError> {
        if descriptor.is_empty() {
            return Err(DescriptorError::Empty);
        }
        let (parsed, end) = parse_type(descriptor, 0)?;
        if end != descriptor.len() {
            return Err(DescriptorError::Trailing {
                descriptor: descriptor.to_owned(),
                position: end,
            });
        }
        Ok(parsed)
    }

    pub fn array_depth(&self) -> usize {
        self.array_depth
    }

    pub fn base(&self) -> &BaseType {
        &self.base
    }

    /// The referenced class name, if the element type is an object.
    pub fn class_name(&self) -> Option<&str> {
        match &self.base {
            BaseType::Object(name) => Some(name),
            _ => None,
        }
    }

    /// Rewrite the referenced class name (if any), keeping the shape.
    #[must_use]
    pub fn remap(&self, mut rename: impl FnMut(&str) -> String) -> Self {
        let base = match &self.base {
            BaseType::Object(name) => BaseType::Object(rename(name)),
            other => other.clone(),
        };
        Self::new(self.array_depth, base)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..self.array_depth {
            f.write_str("[")?;
        }
        write!(f, "{}", self.base)
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A method signature such as `(ILjava/lang/String;)V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodDescriptor {
    params: Vec<TypeDescriptor>,
    return_type: TypeDescriptor,
}

impl MethodDescriptor {
    pub fn new(params: Vec<TypeDescriptor>, return_type: TypeDescriptor) -> Self {
        Self {
            params,
            return_type,
        }
    }

    pub fn parse(descriptor: &str) -> Result<Self, DescriptorError> {
        let mut chars = descriptor.char_indices();
        match chars.next() {
            None => return Err(DescriptorError::Empty),
            Some((_, '(')) => {}
            Some((position, found)) => {
                return Err(DescriptorError::UnexpectedChar {
                    descriptor: descriptor.to_owned(),
                    position,
                    found,
                })
            }
        }

        let mut params = Vec::new();
        let mut pos = 1;
        loop {
            match descriptor[pos..].chars().next() {
                None => {
                    return Err(DescriptorError::UnexpectedEnd {
                        descriptor: descriptor.to_owned(),
                    })
                }
                Some(')') => {
                    pos += 1;
                    break;
                }
                Some(_) => {
                    let (param, end) = parse_type(descriptor, pos)?;
                    params.push(param);
                    pos = end;
                }
            }
        }

        let (return_type, end) = parse_type(descriptor, pos)?;
        if end != descriptor.len() {
            return Err(DescriptorError::Trailing {
                descriptor: descriptor.to_owned(),
                position: end,
            });
        }

        Ok(Self::new(params, return_type))
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    /// Class names referenced by parameters and return type, in order.
    pub fn referenced_classes(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .chain(std::iter::once(&self.return_type))
            .filter_map(TypeDescriptor::class_name)
    }

    /// Rewrite every referenced class name, keeping arity and order.
    #[must_use]
    pub fn remap(&self, mut rename: impl FnMut(&str) -> String) -> Self {
        let params = self.params.iter().map(|p| p.remap(&mut rename)).collect();
        let return_type = self.return_type.remap(&mut rename);
        Self::new(params, return_type)
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            write!(f, "{param}")?;
        }
        write!(f, "){}", self.return_type)
    }
}

impl FromStr for MethodDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse one field type starting at byte offset `start`, returning it and
/// the offset just past it.
fn parse_type(descriptor: &str, start: usize) -> Result<(TypeDescriptor, usize), DescriptorError> {
    let mut array_depth = 0;
    let mut pos = start;

    loop {
        let Some(c) = descriptor[pos..].chars().next() else {
            return Err(DescriptorError::UnexpectedEnd {
                descriptor: descriptor.to_owned(),
            });
        };

        match c {
            '[' => {
                array_depth += 1;
                pos += 1;
            }
            'L' => {
                let name_start = pos + 1;
                let Some(len) = descriptor[name_start..].find(';') else {
                    return Err(DescriptorError::UnexpectedEnd {
                        descriptor: descriptor.to_owned(),
                    });
                };
                if len == 0 {
                    return Err(DescriptorError::EmptyClassName {
                        descriptor: descriptor.to_owned(),
                    });
                }
                let name = &descriptor[name_start..name_start + len];
                let base = BaseType::Object(name.to_owned());
                return Ok((TypeDescriptor::new(array_depth, base), name_start + len + 1));
            }
            other => {
                let Some(base) = BaseType::from_primitive(other) else {
                    return Err(DescriptorError::UnexpectedChar {
                        descriptor: descriptor.to_owned(),
                        position: pos,
                        found: other,
                    });
                };
                return Ok((TypeDescriptor::new(array_depth, base), pos + other.len_utf8()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive() {
        let desc = TypeDescriptor::parse("I").unwrap();
        assert_eq!(desc.base(), &BaseType::Int);
        assert_eq!(desc.array_depth(), 0);
        assert_eq!(desc.class_name(), None);
    }

    #[test]
    fn test_parse_object_array() {
        let desc = TypeDescriptor::parse("[[Ljava/lang/String;").unwrap();
        assert_eq!(desc.array_depth(), 2);
        assert_eq!(desc.class_name(), Some("java/lang/String"));
        assert_eq!(desc.to_string(), "[[Ljava/lang/String;");
    }

    #[test]
    fn test_parse_type_rejects_garbage() {
        assert_eq!(TypeDescriptor::parse(""), Err(DescriptorError::Empty));
        assert!(matches!(
            TypeDescriptor::parse("Q"),
            Err(DescriptorError::UnexpectedChar { found: 'Q', .. })
        ));
        assert!(matches!(
            TypeDescriptor::parse("Ljava/lang/String"),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            TypeDescriptor::parse("L;"),
            Err(DescriptorError::EmptyClassName { .. })
        ));
        assert!(matches!(
            TypeDescriptor::parse("II"),
            Err(DescriptorError::Trailing { position: 1, .. })
        ));
        assert!(matches!(
            TypeDescriptor::parse("[["),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_parse_method() {
        let desc = MethodDescriptor::parse("(I[La/Foo;J)La/Bar;").unwrap();
        assert_eq!(desc.params().len(), 3);
        assert_eq!(desc.params()[1].array_depth(), 1);
        assert_eq!(desc.return_type().class_name(), Some("a/Bar"));
        assert_eq!(
            desc.referenced_classes().collect::<Vec<_>>(),
            vec!["a/Foo", "a/Bar"]
        );
        assert_eq!(desc.to_string(), "(I[La/Foo;J)La/Bar;");
    }

    #[test]
    fn test_parse_method_no_params() {
        let desc = MethodDescriptor::parse("()V").unwrap();
        assert!(desc.params().is_empty());
        assert_eq!(desc.return_type().base(), &BaseType::Void);
    }

    #[test]
    fn test_parse_method_rejects_garbage() {
        assert!(matches!(
            MethodDescriptor::parse("I)V"),
            Err(DescriptorError::UnexpectedChar { found: 'I', .. })
        ));
        assert!(matches!(
            MethodDescriptor::parse("(I"),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            MethodDescriptor::parse("(I)"),
            Err(DescriptorError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            MethodDescriptor::parse("(I)VV"),
            Err(DescriptorError::Trailing { .. })
        ));
    }

    #[test]
    fn test_remap_keeps_shape() {
        let desc = MethodDescriptor::parse("([[La/Foo;ILa/Baz;)[La/Foo;").unwrap();
        let remapped = desc.remap(|name| {
            if name == "a/Foo" {
                "b/Renamed".to_owned()
            } else {
                name.to_owned()
            }
        });
        assert_eq!(remapped.to_string(), "([[Lb/Renamed;ILa/Baz;)[Lb/Renamed;");
        assert_eq!(remapped.params().len(), desc.params().len());
    }
}
