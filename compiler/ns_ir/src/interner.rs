//! String interner for identifiers.
//!
//! One interner serves one compilation pipeline. It takes `&self` for
//! interning so the lexer, parser and resolver can share a plain reference.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Maps identifier text to compact [`Name`] indices.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut table = InternTable::default();
        table.map.insert("", Name::EMPTY);
        table.strings.push("");
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern `text`, returning the existing name when already present.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(text) {
            return name;
        }

        let mut table = self.table.write();
        if let Some(&name) = table.map.get(text) {
            return name;
        }

        // Interned strings live for the rest of the process; names are
        // handed to the IR generator which outlives this front end.
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let raw = u32::try_from(table.strings.len()).unwrap_or(u32::MAX);
        let name = Name::from_raw(raw);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Text of an interned name. Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Look up a name without interning.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.table.read().map.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
