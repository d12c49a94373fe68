/// Intermediate Representation (IR) - compiled tiling-data structs

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub pack_alignment: u32,
    /// Declaration order; this is the memory layout order.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Zero-initialized scalar member.
    Scalar { ty: String, name: String },
    /// Fixed-size array; `len` is emitted verbatim.
    Array { ty: String, len: String, name: String },
    /// Member of another tiling struct, default-constructed by that type.
    Nested { ty: String, name: String },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Scalar { name, .. } | Field::Array { name, .. } | Field::Nested { name, .. } => {
                name
            }
        }
    }
}

/// One piece of emitted output, in source order.
///
/// Well-formed input only produces [`Item::Struct`]. The remaining variants
/// carry the fragments that compatibility mode emits for malformed nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Struct(StructDef),
    /// Struct opening whose matching end never came.
    OpenStruct(StructDef),
    /// Field declared with no struct open.
    LooseField(Field),
    /// Closing text with no struct open.
    StrayEnd,
}
