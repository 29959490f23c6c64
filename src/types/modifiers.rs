//! JVM access and property flags for classes and executables.

use bitflags::bitflags;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

bitflags! {
    /// Access flags as stored in a class file (`access_flags` of `method_info`).
    ///
    /// Some bits are shared between classes and methods in the JVM
    /// (`SYNCHRONIZED`/`SUPER`, `BRIDGE`/`VOLATILE`, `VARARGS`/`TRANSIENT`);
    /// only the method meaning is named here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC       = 0x0001;
        const PRIVATE      = 0x0002;
        const PROTECTED    = 0x0004;
        const STATIC       = 0x0008;
        const FINAL        = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE       = 0x0040;
        const VARARGS      = 0x0080;
        const NATIVE       = 0x0100;
        const INTERFACE    = 0x0200;
        const ABSTRACT     = 0x0400;
        const STRICT       = 0x0800;
        const SYNTHETIC    = 0x1000;
        const ANNOTATION   = 0x2000;
        const ENUM         = 0x4000;
    }
}

impl Modifiers {
    pub fn is_private(&self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// Compiler-generated members that never appear in source.
    pub fn is_synthetic(&self) -> bool {
        self.intersects(Self::SYNTHETIC | Self::BRIDGE)
    }

    /// Source keywords for the flags that have one, in conventional order.
    pub fn keywords(&self) -> Vec<&'static str> {
        const ORDERED: [(Modifiers, &str); 9] = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::SYNCHRONIZED, "synchronized"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::STRICT, "strictfp"),
        ];

        ORDERED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keywords().join(" "))
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keywords = self.keywords();
        let mut seq = serializer.serialize_seq(Some(keywords.len()))?;
        for keyword in keywords {
            seq.serialize_element(keyword)?;
        }
        seq.end()
    }
}
