use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub const ACCESS_OPERATOR: &str = "::";
pub const SEMICOLON: char = ';';
pub const MAIN_FUNCTION: &str = "main";

pub const RWORD_INCLUDE: &str = "include";
pub const RWORD_IMPORT: &str = "import";
pub const RWORD_EXTERN: &str = "extern";
pub const RWORD_USING: &str = "using";
pub const RWORD_CLASS: &str = "class";
pub const RWORD_NAMESPACE: &str = "namespace";
pub const RWORD_TYPEDEF: &str = "typedef";

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_keyword(word: &str) -> Option<Self> {
                match word {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Storage class; a member carries at most one.
    Storage {
        Static => "static",
        Inline => "inline",
        Volatile => "volatile",
        Auto => "auto",
        Friend => "friend",
    }
}

keyword_enum! {
    NativeType {
        Void => "void",
        Int => "int",
        Long => "long",
        Double => "double",
        Float => "float",
        Char => "char",
        Bool => "bool",
    }
}

keyword_enum! {
    Modifier {
        Virtual => "virtual",
        Const => "const",
        Unsigned => "unsigned",
        Explicit => "explicit",
    }
}

keyword_enum! {
    Visibility {
        Private => "private",
        Protected => "protected",
        Public => "public",
    }
}

/// Names that may never be used as member identifiers.
pub fn is_reserved(word: &str) -> bool {
    Storage::from_keyword(word).is_some()
        || NativeType::from_keyword(word).is_some()
        || Modifier::from_keyword(word).is_some()
}

/// A member's type: one of the native keywords or a free-form user type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeRef {
    Native(NativeType),
    User(String),
}

impl TypeRef {
    pub fn as_str(&self) -> &str {
        match self {
            TypeRef::Native(native) => native.as_str(),
            TypeRef::User(name) => name,
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Native(NativeType::Void)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
