//! JVM class file reader
//!
//! Decodes just enough of a `.class` file to list a class's executables:
//! the constant pool, the class access flags and name, and every
//! `method_info` with its access flags, name and descriptor. Field and
//! attribute payloads are skipped.

use crate::introspect::Executable;
use crate::types::{JavaType, MemberKind, Modifiers, PrimitiveType};
use thiserror::Error;

const MAGIC: u32 = 0xCAFEBABE;
const CONSTRUCTOR_NAME: &str = "<init>";
const STATIC_INITIALIZER_NAME: &str = "<clinit>";

#[derive(Debug, Error)]
pub enum ClassParseError {
    #[error("unexpected end of class file")]
    UnexpectedEof,
    #[error("invalid class file magic header")]
    InvalidMagic,
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant { tag: u8 },
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex { index: u16 },
    #[error("invalid UTF-8 string in constant pool: {0}")]
    Utf8Decode(#[from] std::string::FromUtf8Error),
    #[error("malformed descriptor '{0}'")]
    InvalidDescriptor(String),
}

/// The parts of a class file the extractor needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClass {
    /// Binary name with `.` package separators (`com.acme.Outer$Inner`)
    pub name: String,
    pub access: Modifiers,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub access: Modifiers,
    pub parameters: Vec<JavaType>,
    pub return_type: JavaType,
}

impl ParsedClass {
    pub fn simple_name(&self) -> &str {
        self.name.rsplit(['.', '$']).next().unwrap_or(&self.name)
    }

    /// Constructors and methods as introspected executables.
    ///
    /// Constructors are reported under the class's simple name; the static
    /// initializer is not an executable member and is left out.
    pub fn executables(&self) -> Vec<Executable> {
        self.methods
            .iter()
            .filter(|method| method.name != STATIC_INITIALIZER_NAME)
            .map(|method| {
                if method.name == CONSTRUCTOR_NAME {
                    Executable {
                        kind: MemberKind::Constructor,
                        name: self.simple_name().to_string(),
                        parameter_types: method.parameters.clone(),
                        return_type: None,
                        modifiers: method.access,
                    }
                } else {
                    Executable {
                        kind: MemberKind::Method,
                        name: method.name.clone(),
                        parameter_types: method.parameters.clone(),
                        return_type: Some(method.return_type.clone()),
                        modifiers: method.access,
                    }
                }
            })
            .collect()
    }
}

pub fn parse_class(bytes: &[u8]) -> Result<ParsedClass, ClassParseError> {
    let mut reader = ClassReader::new(bytes);
    reader.expect_magic()?;
    let _minor_version = reader.read_u2()?;
    let _major_version = reader.read_u2()?;
    let constant_pool = ConstantPool::parse(&mut reader)?;

    let access_flags = reader.read_u2()?;
    let this_class = reader.read_u2()?;
    let _super_class = reader.read_u2()?;

    let interfaces_count = reader.read_u2()?;
    reader.skip(interfaces_count as usize * 2)?;

    let fields_count = reader.read_u2()?;
    for _ in 0..fields_count {
        skip_member(&mut reader)?;
    }

    let methods_count = reader.read_u2()?;
    let mut methods = Vec::with_capacity(methods_count as usize);
    for _ in 0..methods_count {
        let access_flags = reader.read_u2()?;
        let name_index = reader.read_u2()?;
        let descriptor_index = reader.read_u2()?;
        let attributes_count = reader.read_u2()?;

        let name = constant_pool.utf8(name_index)?;
        let descriptor = constant_pool.utf8(descriptor_index)?;
        let (parameters, return_type) = parse_method_descriptor(descriptor)?;

        methods.push(MethodInfo {
            name: name.to_string(),
            access: Modifiers::from_bits_truncate(access_flags),
            parameters,
            return_type,
        });

        skip_attributes(&mut reader, attributes_count)?;
    }

    let attributes_count = reader.read_u2()?;
    skip_attributes(&mut reader, attributes_count)?;

    let name = constant_pool.class_name(this_class)?.replace('/', ".");

    Ok(ParsedClass {
        name,
        access: Modifiers::from_bits_truncate(access_flags),
        methods,
    })
}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    Other,
    Unusable,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(reader: &mut ClassReader<'_>) -> Result<Self, ClassParseError> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        entries.push(Constant::Unusable); // index 0 unused

        let mut index = 1;
        while index < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = reader.read_u2()? as usize;
                    let bytes = reader.read_slice(length)?;
                    Constant::Utf8(decode_modified_utf8(bytes)?)
                }
                7 => {
                    let name_index = reader.read_u2()?;
                    Constant::Class { name_index }
                }
                // Integer, Float, Fieldref, Methodref, InterfaceMethodref,
                // NameAndType, Dynamic, InvokeDynamic
                3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                // Long and Double occupy two slots
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    index += 1;
                    Constant::Unusable
                }
                // String, MethodType, Module, Package
                8 | 16 | 19 | 20 => {
                    reader.skip(2)?;
                    Constant::Other
                }
                // MethodHandle
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                other => return Err(ClassParseError::UnsupportedConstant { tag: other }),
            };

            entries.push(entry);
            index += 1;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant, ClassParseError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassParseError::InvalidConstantIndex { index })
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Utf8(value) => Ok(value.as_str()),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, ClassParseError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }
}

/// Class files store strings in modified UTF-8: NUL is written as
/// `0xC0 0x80`. Supplementary characters (surrogate pairs) are rare in
/// identifiers and rejected as invalid UTF-8.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String, ClassParseError> {
    if !bytes.windows(2).any(|pair| pair == [0xC0, 0x80]) {
        return Ok(String::from_utf8(bytes.to_vec())?);
    }

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0xC0 && bytes.get(i + 1) == Some(&0x80) {
            decoded.push(0);
            i += 2;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    Ok(String::from_utf8(decoded)?)
}

struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn expect_magic(&mut self) -> Result<(), ClassParseError> {
        if self.read_u4()? != MAGIC {
            return Err(ClassParseError::InvalidMagic);
        }
        Ok(())
    }

    fn read_u1(&mut self) -> Result<u8, ClassParseError> {
        let slice = self.read_slice(1)?;
        Ok(slice[0])
    }

    fn read_u2(&mut self) -> Result<u16, ClassParseError> {
        let slice = self.read_slice(2)?;
        Ok(u16::from_be_bytes([slice[0], slice[1]]))
    }

    fn read_u4(&mut self) -> Result<u32, ClassParseError> {
        let slice = self.read_slice(4)?;
        Ok(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassParseError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ClassParseError::UnexpectedEof)?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassParseError> {
        self.read_slice(len).map(|_| ())
    }
}

fn skip_attributes(reader: &mut ClassReader<'_>, count: u16) -> Result<(), ClassParseError> {
    for _ in 0..count {
        reader.read_u2()?; // attribute_name_index
        let length = reader.read_u4()? as usize;
        reader.skip(length)?;
    }
    Ok(())
}

fn skip_member(reader: &mut ClassReader<'_>) -> Result<(), ClassParseError> {
    reader.read_u2()?; // access_flags
    reader.read_u2()?; // name_index
    reader.read_u2()?; // descriptor_index
    let attributes_count = reader.read_u2()?;
    skip_attributes(reader, attributes_count)
}

/// Parse `(Ljava/lang/String;[I)V` into parameter types and a return type.
pub fn parse_method_descriptor(
    descriptor: &str,
) -> Result<(Vec<JavaType>, JavaType), ClassParseError> {
    let invalid = || ClassParseError::InvalidDescriptor(descriptor.to_string());
    let mut parser = DescriptorParser::new(descriptor);

    if parser.next() != Some(b'(') {
        return Err(invalid());
    }
    let mut parameters = Vec::new();
    while parser.peek().ok_or_else(invalid)? != b')' {
        parameters.push(parser.parse_type().ok_or_else(invalid)?);
    }
    parser.next();

    let return_type = if parser.peek() == Some(b'V') {
        parser.next();
        JavaType::Void
    } else {
        parser.parse_type().ok_or_else(invalid)?
    };

    if parser.remaining() != 0 {
        return Err(invalid());
    }
    Ok((parameters, return_type))
}

struct DescriptorParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorParser<'a> {
    fn new(descriptor: &'a str) -> Self {
        Self {
            bytes: descriptor.as_bytes(),
            pos: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn parse_type(&mut self) -> Option<JavaType> {
        match self.next()? {
            b'L' => {
                let start = self.pos;
                let end = start + self.bytes[start..].iter().position(|b| *b == b';')?;
                self.pos = end + 1;
                let name = std::str::from_utf8(&self.bytes[start..end]).ok()?;
                if name.is_empty() {
                    return None;
                }
                Some(JavaType::reference(name.replace('/', ".")))
            }
            b'[' => {
                let mut dimensions = 1u8;
                while self.peek() == Some(b'[') {
                    self.pos += 1;
                    dimensions = dimensions.checked_add(1)?;
                }
                let element = self.parse_type()?;
                Some(JavaType::array_of(element, dimensions))
            }
            tag => PrimitiveType::from_descriptor(tag).map(JavaType::Primitive),
        }
    }
}
