/// How a raw attribute string is coerced by the attribute parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    /// Passed through unchanged.
    String,
    /// Base-10 integer; malformed values fall back to the caller's default.
    Integer,
    /// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, case-insensitive.
    Boolean,
    /// Stored lower-cased; compared against a symbol set by the evaluator.
    Enum,
    /// A date or number format pattern, passed through unchanged.
    DateTimeFormat,
}

impl AttrType {
    /// Short name shown in diagnostics and the `stl tags` listing.
    pub fn as_str(self) -> &'static str {
        match self {
            AttrType::String => "string",
            AttrType::Integer => "integer",
            AttrType::Boolean => "boolean",
            AttrType::Enum => "enum",
            AttrType::DateTimeFormat => "format",
        }
    }
}

/// Static description of one attribute a tag understands.
///
/// The ordered list of descriptors for a tag is its schema. Names are matched
/// against supplied attribute keys case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub attr_type: AttrType,
}

impl AttrDescriptor {
    pub const fn new(name: &'static str, label: &'static str, attr_type: AttrType) -> Self {
        Self {
            name,
            label,
            attr_type,
        }
    }

    /// A [`AttrType::String`] descriptor.
    pub const fn string(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, AttrType::String)
    }

    /// Whether a supplied key names this attribute.
    pub fn matches(&self, key: &str) -> bool {
        key.trim().eq_ignore_ascii_case(self.name)
    }
}

/// Defaults of a boolean attribute.
///
/// `missing` applies when the attribute is absent, `malformed` when it is
/// present but not a recognized token. Tags deliberately differ here, so each
/// descriptor use names its own pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolDefault {
    pub missing: bool,
    pub malformed: bool,
}

impl BoolDefault {
    /// Off unless explicitly enabled.
    pub const OFF: BoolDefault = BoolDefault {
        missing: false,
        malformed: false,
    };

    /// On unless explicitly disabled.
    pub const ON: BoolDefault = BoolDefault {
        missing: true,
        malformed: true,
    };

    /// Off when absent; mere presence (`isLower` with no usable value) enables it.
    pub const PRESENCE: BoolDefault = BoolDefault {
        missing: false,
        malformed: true,
    };
}
