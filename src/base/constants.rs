//! Domain constants: builtin type names and reserved words.

/// Primitive type names. `void` is counted as primitive.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "void", "boolean", "byte", "char", "int", "long", "float", "double",
];

/// Builtin (non-primitive) type names known to every backend.
pub const BUILTIN_TYPES: &[&str] = &[
    "String",
    "List",
    "Map",
    "IBinder",
    "FileDescriptor",
    "CharSequence",
    "ParcelFileDescriptor",
    "ParcelableHolder",
];

pub const STRING: &str = "String";
pub const LIST: &str = "List";
pub const MAP: &str = "Map";
pub const VOID: &str = "void";
pub const IBINDER: &str = "IBinder";
pub const FILE_DESCRIPTOR: &str = "FileDescriptor";
pub const PARCEL_FILE_DESCRIPTOR: &str = "ParcelFileDescriptor";
pub const CHAR_SEQUENCE: &str = "CharSequence";
pub const PARCELABLE_HOLDER: &str = "ParcelableHolder";

/// Backing type of enums without `@Backing`.
pub const DEFAULT_ENUM_BACKING_TYPE: &str = "byte";

/// Element types a builtin `List<T>` accepts.
pub const LIST_BUILTIN_ELEMENTS: &[&str] = &[STRING, IBINDER, PARCEL_FILE_DESCRIPTOR];

/// Types a constant declaration may have.
pub const CONSTANT_TYPES: &[&str] = &["String", "byte", "int", "long"];

/// Argument names that collide with target-language keywords.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Prefix reserved for generated identifiers.
pub const RESERVED_ARGUMENT_PREFIX: &str = "_aidl";

/// Interface-introspection signatures user methods may not redefine.
pub const RESERVED_METHOD_SIGNATURES: &[&str] = &[
    "asBinder()",
    "getInterfaceHash()",
    "getInterfaceVersion()",
    "getTransactionName(int)",
];

/// Conventional first letter of interface names.
pub const INTERFACE_NAME_PREFIX: char = 'I';

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

pub fn is_builtin(name: &str) -> bool {
    is_primitive(name) || BUILTIN_TYPES.contains(&name)
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Whether `comments` carry an `@hide` tag.
pub fn has_hide_comment(comments: &str) -> bool {
    comments.match_indices("@hide").any(|(idx, tag)| {
        comments[idx + tag.len()..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
    })
}
