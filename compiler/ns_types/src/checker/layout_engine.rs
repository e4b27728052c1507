//! Lazy record layout.

use ns_diagnostic::{Diagnostic, ErrorCode};

use super::Checker;
use crate::layout::{struct_layout, union_layout, FieldShape};
use crate::pool::{LayoutState, RecordKind, TypeData};
use crate::{RecordId, TypeId};

impl Checker<'_> {
    /// Size and alignment of `ty`, laying out records as needed.
    pub(super) fn size_align_of(&mut self, ty: TypeId) -> Option<(u32, u32)> {
        if let Some(record) = self.pool.record_of(ty) {
            self.ensure_layout(record);
        }
        let sized_array = match self.pool.get(ty) {
            TypeData::Array {
                elem,
                len: Some(len),
            } => Some((*elem, *len)),
            _ => None,
        };
        match sized_array {
            Some((elem, len)) => self
                .size_align_of(elem)
                .map(|(size, align)| (size.saturating_mul(len), align)),
            None => self.pool.size_align(ty),
        }
    }

    /// Compute the layout of `record` unless already known. Returns
    /// whether the record has a layout.
    fn ensure_layout(&mut self, record: RecordId) -> bool {
        match self.pool.record(record).layout {
            LayoutState::Done(_) => return true,
            LayoutState::Failed => return false,
            LayoutState::InProgress => {
                let def = self.pool.record(record);
                let span = def.span;
                let ty_name = match def.name {
                    Some(name) => format!("{} {}", def.kind.keyword(), self.name_str(name)),
                    None => def.kind.keyword().to_owned(),
                };
                self.report(
                    Diagnostic::error(ErrorCode::E3009)
                        .with_message(format!("`{ty_name}` contains itself"))
                        .with_label(span, "recursive without a pointer")
                        .with_note("use a pointer member to refer to the same record"),
                );
                self.pool.record_mut(record).layout = LayoutState::Failed;
                return false;
            }
            LayoutState::Pending => {}
        }

        self.pool.record_mut(record).layout = LayoutState::InProgress;
        let def = self.pool.record(record);
        let kind = def.kind;
        let members = def.members.clone();

        let mut fields = Vec::with_capacity(members.len());
        let mut complete = true;
        for member in &members {
            let (size, align) = if member.ty.is_error() {
                (0, 1)
            } else if let Some(size_align) = self.size_align_of(member.ty) {
                size_align
            } else {
                complete = false;
                continue;
            };
            fields.push(FieldShape {
                name: member.name,
                ty: member.ty,
                size,
                align,
                bits: member.bits,
            });
        }

        // A nested reference may have marked this record as failed.
        if !complete || self.pool.record(record).layout == LayoutState::Failed {
            self.pool.record_mut(record).layout = LayoutState::Failed;
            return false;
        }

        let layout = match kind {
            RecordKind::Struct => struct_layout(&fields),
            RecordKind::Union => union_layout(&fields),
        };
        tracing::trace!(?record, size = layout.size, align = layout.align, "record layout");
        self.pool.record_mut(record).layout = LayoutState::Done(layout);
        true
    }

    pub(super) fn layout_all_records(&mut self) {
        let records: Vec<RecordId> = self.pool.records().map(|(id, _)| id).collect();
        for record in records {
            self.ensure_layout(record);
        }
    }
}
