//! Type formatting for diagnostics.

use ns_ir::StringInterner;

use super::{TypeData, TypePool};
use crate::TypeId;

impl TypePool {
    /// Render a type the way it is spelled in source.
    pub fn format_type(&self, ty: TypeId, interner: &StringInterner) -> String {
        let mut buf = String::new();
        self.format_type_into(ty, interner, &mut buf);
        buf
    }

    pub fn format_type_into(&self, ty: TypeId, interner: &StringInterner, buf: &mut String) {
        match self.get(ty) {
            TypeData::Void => buf.push_str("void"),
            TypeData::Int(width) => buf.push_str(&width.to_string()),
            TypeData::Error => buf.push_str("<error>"),
            TypeData::Array { elem, len: None } => {
                buf.push('*');
                self.format_type_into(*elem, interner, buf);
            }
            TypeData::Array {
                elem,
                len: Some(len),
            } => {
                buf.push('[');
                buf.push_str(&len.to_string());
                buf.push(']');
                self.format_type_into(*elem, interner, buf);
            }
            TypeData::Func {
                ret,
                params,
                variadic,
            } => {
                buf.push_str("fun(");
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(*param, interner, buf);
                }
                if *variadic {
                    if !params.is_empty() {
                        buf.push_str(", ");
                    }
                    buf.push_str("...");
                }
                buf.push_str(") -> ");
                self.format_type_into(*ret, interner, buf);
            }
            TypeData::Record(id) => {
                let def = self.record(*id);
                buf.push_str(def.kind.keyword());
                buf.push(' ');
                match def.name {
                    Some(name) => buf.push_str(interner.lookup(name)),
                    None => buf.push_str("{...}"),
                }
            }
        }
    }
}
