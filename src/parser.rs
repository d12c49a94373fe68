use tracing::warn;

use crate::config::GeneratorConfig;
use crate::error::{StructureError, StructureErrorKind};
use crate::ir::*;
use crate::lexer::{self, Directive, DirectiveKind};

/// Parse description text into output items, in source order.
pub fn parse(source: &str, config: &GeneratorConfig) -> Result<Vec<Item>, StructureError> {
    let directives = lexer::tokenize(source)?;
    build(directives, config)
}

/// Build struct definitions from a directive stream.
///
/// Strict mode yields only [`Item::Struct`]. Compatibility mode passes
/// malformed nesting through as the corresponding fragment items.
pub fn build(directives: Vec<Directive>, config: &GeneratorConfig) -> Result<Vec<Item>, StructureError> {
    let mut items = Vec::new();
    // Open struct and the line of its begin directive.
    let mut current: Option<(usize, StructDef)> = None;

    for directive in directives {
        let line = directive.line;
        let args = check_args(directive, config)?;

        match args.kind {
            DirectiveKind::Begin => {
                let def = StructDef {
                    name: args.values[0].clone(),
                    pack_alignment: config.pack_alignment,
                    fields: Vec::new(),
                };
                if let Some((_, open)) = current.replace((line, def)) {
                    if config.strict {
                        return Err(StructureError::new(
                            line,
                            StructureErrorKind::NestedBegin { open: open.name },
                        ));
                    }
                    warn!("line {}: struct begins inside `{}`", line, open.name);
                    items.push(Item::OpenStruct(open));
                }
            }
            DirectiveKind::End => match current.take() {
                Some((_, def)) => items.push(Item::Struct(def)),
                None if config.strict => {
                    return Err(StructureError::new(line, StructureErrorKind::UnmatchedEnd))
                }
                None => {
                    warn!("line {}: struct end without a matching begin", line);
                    items.push(Item::StrayEnd);
                }
            },
            kind => {
                let field = make_field(kind, args.values);
                match current.as_mut() {
                    Some((_, def)) => def.fields.push(field),
                    None if config.strict => {
                        return Err(StructureError::new(
                            line,
                            StructureErrorKind::FieldOutsideStruct {
                                field: field.name().to_string(),
                            },
                        ))
                    }
                    None => {
                        warn!("line {}: field `{}` outside of a struct", line, field.name());
                        items.push(Item::LooseField(field));
                    }
                }
            }
        }
    }

    if let Some((line, open)) = current {
        if config.strict {
            return Err(StructureError::new(
                line,
                StructureErrorKind::Unterminated { open: open.name },
            ));
        }
        warn!("struct `{}` is never closed", open.name);
        items.push(Item::OpenStruct(open));
    }

    Ok(items)
}

struct CheckedArgs {
    kind: DirectiveKind,
    values: Vec<String>,
}

fn check_args(directive: Directive, config: &GeneratorConfig) -> Result<CheckedArgs, StructureError> {
    let Directive {
        line,
        kind,
        word,
        mut args,
    } = directive;

    if word != kind.keyword() {
        if config.strict {
            return Err(StructureError::new(
                line,
                StructureErrorKind::MisspelledDirective {
                    word,
                    directive: kind.keyword(),
                },
            ));
        }
        warn!("line {}: treating `{}` as {}", line, word, kind.keyword());
    }

    let Some(expected) = kind.arity() else {
        return Ok(CheckedArgs { kind, values: args });
    };

    let found = args.len();
    let too_many = found > expected;
    if found < expected || (too_many && config.strict) {
        return Err(StructureError::new(
            line,
            StructureErrorKind::ArityMismatch {
                directive: kind.keyword(),
                expected,
                found,
            },
        ));
    }
    if too_many {
        warn!(
            "line {}: {} takes {} argument(s), ignoring {} extra",
            line,
            kind.keyword(),
            expected,
            found - expected
        );
        args.truncate(expected);
    }

    if config.strict {
        if let Some(index) = args.iter().position(|a| a.is_empty()) {
            return Err(StructureError::new(
                line,
                StructureErrorKind::EmptyArgument {
                    directive: kind.keyword(),
                    index: index + 1,
                },
            ));
        }
    }

    Ok(CheckedArgs { kind, values: args })
}

fn make_field(kind: DirectiveKind, values: Vec<String>) -> Field {
    let mut it = values.into_iter();
    let mut next = || it.next().unwrap_or_default();
    match kind {
        DirectiveKind::FieldArr => {
            let ty = next();
            let len = next();
            let name = next();
            Field::Array { ty, len, name }
        }
        DirectiveKind::FieldStruct => {
            let ty = next();
            let name = next();
            Field::Nested { ty, name }
        }
        _ => {
            let ty = next();
            let name = next();
            Field::Scalar { ty, name }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    fn lenient() -> GeneratorConfig {
        GeneratorConfig {
            strict: false,
            ..Default::default()
        }
    }

    #[test]
    fn keeps_field_order() {
        let src = "\
BEGIN_TILING_DATA_DEF(Foo)
TILING_DATA_FIELD_DEF(uint32_t, a)
TILING_DATA_FIELD_DEF_ARR(uint8_t, 4, b)
TILING_DATA_FIELD_DEF_STRUCT(Bar, c)
END_TILING_DATA_DEF(Foo)
";
        let items = parse(src, &strict()).unwrap();
        let Item::Struct(def) = &items[0] else {
            panic!("expected struct, got {:?}", items[0]);
        };
        assert_eq!(def.name, "Foo");
        assert_eq!(def.pack_alignment, 8);
        let names: Vec<_> = def.fields.iter().map(Field::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(
            def.fields[1],
            Field::Array {
                ty: "uint8_t".into(),
                len: "4".into(),
                name: "b".into()
            }
        );
    }

    #[test]
    fn strict_rejects_nested_begin() {
        let src = "BEGIN_TILING_DATA_DEF(A)\nBEGIN_TILING_DATA_DEF(B)\n";
        let err = parse(src, &strict()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, StructureErrorKind::NestedBegin { open: "A".into() });
    }

    #[test]
    fn strict_rejects_unmatched_end() {
        let err = parse("END_TILING_DATA_DEF(A)", &strict()).unwrap_err();
        assert_eq!(err.kind, StructureErrorKind::UnmatchedEnd);
    }

    #[test]
    fn strict_rejects_field_outside_struct() {
        let err = parse("TILING_DATA_FIELD_DEF(uint32_t, x)", &strict()).unwrap_err();
        assert_eq!(
            err.kind,
            StructureErrorKind::FieldOutsideStruct { field: "x".into() }
        );
    }

    #[test]
    fn strict_rejects_unterminated_struct() {
        let src = "BEGIN_TILING_DATA_DEF(A)\nTILING_DATA_FIELD_DEF(uint32_t, x)\n";
        let err = parse(src, &strict()).unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, StructureErrorKind::Unterminated { open: "A".into() });
    }

    #[test]
    fn arity_is_checked() {
        let src = "BEGIN_TILING_DATA_DEF(A)\nTILING_DATA_FIELD_DEF_ARR(uint32_t, x)\n";
        let err = parse(src, &strict()).unwrap_err();
        assert_eq!(
            err.kind,
            StructureErrorKind::ArityMismatch {
                directive: lexer::FIELD_ARR,
                expected: 3,
                found: 2
            }
        );
        // too few stays fatal in compatibility mode
        assert!(parse(src, &lenient()).is_err());
    }

    #[test]
    fn strict_rejects_empty_argument() {
        let err = parse("BEGIN_TILING_DATA_DEF()", &strict()).unwrap_err();
        assert_eq!(
            err.kind,
            StructureErrorKind::EmptyArgument {
                directive: lexer::BEGIN,
                index: 1
            }
        );
    }

    #[test]
    fn extended_keyword_by_mode() {
        let src = "\
BEGIN_TILING_DATA_DEF(A)
TILING_DATA_FIELD_DEF_V2(uint32_t, x)
END_TILING_DATA_DEF(A)
";
        let err = parse(src, &strict()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            StructureErrorKind::MisspelledDirective {
                word: "TILING_DATA_FIELD_DEF_V2".into(),
                directive: lexer::FIELD
            }
        );

        let items = parse(src, &lenient()).unwrap();
        let Item::Struct(def) = &items[0] else {
            panic!("expected struct, got {:?}", items[0]);
        };
        assert_eq!(
            def.fields,
            vec![Field::Scalar {
                ty: "uint32_t".into(),
                name: "x".into()
            }]
        );
    }

    #[test]
    fn lenient_ignores_extra_arguments() {
        let src = "\
BEGIN_TILING_DATA_DEF(A)
TILING_DATA_FIELD_DEF(uint32_t, x, 7)
END_TILING_DATA_DEF
";
        let items = parse(src, &lenient()).unwrap();
        assert_eq!(
            items,
            vec![Item::Struct(StructDef {
                name: "A".into(),
                pack_alignment: 8,
                fields: vec![Field::Scalar {
                    ty: "uint32_t".into(),
                    name: "x".into()
                }],
            })]
        );
    }

    #[test]
    fn lenient_passes_malformed_nesting_through() {
        let src = "\
END_TILING_DATA_DEF()
BEGIN_TILING_DATA_DEF(A)
BEGIN_TILING_DATA_DEF(B)
END_TILING_DATA_DEF(B)
TILING_DATA_FIELD_DEF(uint32_t, x)
BEGIN_TILING_DATA_DEF(C)
";
        let items = parse(src, &lenient()).unwrap();
        assert!(matches!(items[0], Item::StrayEnd));
        assert!(matches!(&items[1], Item::OpenStruct(d) if d.name == "A"));
        assert!(matches!(&items[2], Item::Struct(d) if d.name == "B"));
        assert!(matches!(&items[3], Item::LooseField(f) if f.name() == "x"));
        assert!(matches!(&items[4], Item::OpenStruct(d) if d.name == "C"));
    }
}
