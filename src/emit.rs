//! C++ struct emitter

use crate::ir::*;

/// Render parsed items as C++ source text, in order.
pub fn render(items: &[Item]) -> String {
    let mut output = String::new();
    for item in items {
        match item {
            Item::Struct(def) => output.push_str(&render_struct(def)),
            Item::OpenStruct(def) => open_struct(&mut output, def),
            Item::LooseField(field) => push_field(&mut output, field),
            Item::StrayEnd => close_struct(&mut output),
        }
    }
    output
}

/// Render one well-formed struct block.
pub fn render_struct(def: &StructDef) -> String {
    let mut output = String::new();
    open_struct(&mut output, def);
    close_struct(&mut output);
    output
}

fn open_struct(output: &mut String, def: &StructDef) {
    output.push_str(&format!("#pragma pack(push, {})\n", def.pack_alignment));
    output.push_str(&format!("struct {} {{\n", def.name));
    for field in &def.fields {
        push_field(output, field);
    }
}

fn close_struct(output: &mut String) {
    output.push_str("};\n");
    output.push_str("#pragma pack(pop)\n");
}

fn push_field(output: &mut String, field: &Field) {
    let line = match field {
        Field::Scalar { ty, name } => format!("    {} {} = 0;\n", ty, name),
        Field::Array { ty, len, name } => format!("    {} {}[{}] = {{}};\n", ty, name, len),
        Field::Nested { ty, name } => format!("    {} {};\n", ty, name),
    };
    output.push_str(&line);
}
