//! Enumeration capability and reverse-lookup tables.
//!
//! Generated enumerations carry integer codes. Code `0` is the `UNSET`
//! sentinel; declared values start at `1`. The global lookup table emitted
//! alongside the enumerations maps each code back to its schema name and,
//! for identities, to the module that defines it.

/// Code reserved for a value that was never explicitly assigned.
pub const UNSET_CODE: i64 = 0;

/// Display metadata for one enumerated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumDefinition {
    /// Name of the value in the schema.
    pub name: &'static str,
    /// Module defining the value (identities only).
    pub defining_module: Option<&'static str>,
}

impl EnumDefinition {
    /// Creates a definition for an enumeration value.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            defining_module: None,
        }
    }

    /// Creates a definition for an identity defined in `module`.
    #[must_use]
    pub const fn with_module(name: &'static str, module: &'static str) -> Self {
        Self {
            name,
            defining_module: Some(module),
        }
    }
}

/// Code table of one enumeration, sorted by code.
pub type EnumTable = &'static [(i64, EnumDefinition)];

/// Global table keyed by generated enumeration type name, sorted by name.
pub type EnumMap = &'static [(&'static str, EnumTable)];

/// Looks up the definition of `code` in the enumeration named `type_name`.
///
/// Both levels of `map` are expected in ascending order, as emitted by the
/// generator.
#[must_use]
pub fn lookup_enum(map: EnumMap, type_name: &str, code: i64) -> Option<&'static EnumDefinition> {
    let idx = map
        .binary_search_by(|(name, _)| (*name).cmp(type_name))
        .ok()?;
    let table = map[idx].1;
    let entry = table.binary_search_by_key(&code, |(c, _)| *c).ok()?;
    Some(&table[entry].1)
}

/// Capability implemented by every generated enumeration type.
pub trait SchemaEnum: Copy + Into<i64> + 'static {
    /// Generated type name, the key of this enumeration in [`EnumMap`].
    const TYPE_NAME: &'static str;

    /// Returns the global lookup table this enumeration is registered in.
    fn enum_map() -> EnumMap;

    /// Returns the integer code of the value.
    fn code(self) -> i64 {
        self.into()
    }

    /// Returns true if the value is the `UNSET` sentinel.
    fn is_unset(self) -> bool {
        self.code() == UNSET_CODE
    }

    /// Returns the schema metadata of the value, `None` for `UNSET`.
    fn definition(self) -> Option<&'static EnumDefinition> {
        lookup_enum(Self::enum_map(), Self::TYPE_NAME, self.code())
    }
}
