//! Record layout.
//!
//! Structs are laid out in declaration order with no padding. Bitfields
//! pack least-significant bit first into storage words of their declared
//! type; a new word starts when the type changes, when the bits would
//! overflow the word, or at any member without a narrower bit width.
//! Union members all live at offset zero.

use ns_ir::Name;

use crate::TypeId;

/// Placement of one member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberLayout {
    pub name: Name,
    /// Byte offset of the member's storage word.
    pub offset: u32,
    /// First bit inside the storage word, counted from the least
    /// significant bit.
    pub bit_offset: u32,
    /// Explicit bit width, when declared.
    pub bit_width: Option<u32>,
}

/// Size, alignment and member placement of a record.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Layout {
    pub size: u32,
    pub align: u32,
    pub members: Vec<MemberLayout>,
}

impl Layout {
    pub fn member(&self, name: Name) -> Option<&MemberLayout> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// What the layout engine needs to know about a member.
#[derive(Copy, Clone, Debug)]
pub struct FieldShape {
    pub name: Name,
    /// Declared type; bitfields only share a word with the same type.
    pub ty: TypeId,
    pub size: u32,
    pub align: u32,
    pub bits: Option<u32>,
}

/// Storage word currently receiving bitfields.
struct Word {
    ty: TypeId,
    offset: u32,
    used: u32,
    width: u32,
}

pub fn struct_layout(fields: &[FieldShape]) -> Layout {
    let mut offset = 0u32;
    let mut align = 1u32;
    let mut word: Option<Word> = None;
    let mut members = Vec::with_capacity(fields.len());

    for field in fields {
        align = align.max(field.align);
        let width = field.size.saturating_mul(8);

        let placed = match field.bits {
            Some(bits) if bits < width => {
                let fits = word
                    .as_ref()
                    .is_some_and(|w| w.ty == field.ty && w.used + bits <= w.width);
                if !fits {
                    word = Some(Word {
                        ty: field.ty,
                        offset,
                        used: 0,
                        width,
                    });
                    offset = offset.saturating_add(field.size);
                }
                match word.as_mut() {
                    Some(w) => {
                        let bit_offset = w.used;
                        w.used += bits;
                        (w.offset, bit_offset)
                    }
                    None => (offset, 0),
                }
            }
            _ => {
                word = None;
                let at = offset;
                offset = offset.saturating_add(field.size);
                (at, 0)
            }
        };

        members.push(MemberLayout {
            name: field.name,
            offset: placed.0,
            bit_offset: placed.1,
            bit_width: field.bits,
        });
    }

    Layout {
        size: offset,
        align,
        members,
    }
}

pub fn union_layout(fields: &[FieldShape]) -> Layout {
    let size = fields.iter().map(|f| f.size).max().unwrap_or(0);
    let align = fields.iter().map(|f| f.align).max().unwrap_or(1);
    let members = fields
        .iter()
        .map(|f| MemberLayout {
            name: f.name,
            offset: 0,
            bit_offset: 0,
            bit_width: f.bits,
        })
        .collect();
    Layout {
        size,
        align,
        members,
    }
}
