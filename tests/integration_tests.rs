//! Integration tests for end-to-end compilation.
//!
//! These tests run source text through tokenization, parsing and IR
//! generation, and check the resulting module and diagnostics.

use std::rc::Rc;

use inkwell::{context::Context, types::AnyTypeEnum};
use pi_lang::{
    ast::{
        ast::{Decl, TypeExpr},
        types::PrimitiveKind,
    },
    compiler::{
        compiler::{compile, Compiler},
        types::{lower_type, type_name},
    },
    errors::errors::{Error, ErrorImpl},
    format_error,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
};

fn parse_decls(source: &str) -> Vec<Decl> {
    let tokens = tokenize(source.to_string(), Some("main.pi".to_string())).unwrap();
    let (_, decls) = parse(tokens, Rc::new("main.pi".to_string()));

    match decls {
        Ok(decls) => decls,
        Err(errors) => panic!("parsing failed: {:?}", errors),
    }
}

fn compile_source<'a>(context: &'a Context, source: &str) -> Result<Compiler<'a>, Error> {
    compile(&parse_decls(source), "main.pi", context)
}

#[test]
fn test_negative_literal_and_binary_minus() {
    let tokens = tokenize("x+y*5.0/-1 - 9".to_string(), None).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Slash,
            TokenKind::Number,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[6].value, "-1");
}

#[test]
fn test_pointer_chain_survives_lowering() {
    let decls = parse_decls("type Node struct {\n    mut i32 id\n}\ntype Link Node***");

    let Decl::Type(link) = &decls[1] else {
        panic!("expected a type declaration");
    };
    assert_eq!(link.ty.pointer_depth(), 3);

    let context = Context::create();
    let compiler = compile(&decls, "main.pi", &context).unwrap();
    let lowered = compiler.named_types["Link"];

    assert_eq!(type_name(lowered), "%Node***");
}

#[test]
fn test_struct_property_expansion() {
    let decls = parse_decls("type Vec3 struct {\n    pub mut i32 x, y, z\n}");

    let Decl::Type(vec3) = &decls[0] else {
        panic!("expected a type declaration");
    };
    let TypeExpr::Struct(structure) = &vec3.ty else {
        panic!("expected a struct type");
    };
    assert_eq!(structure.properties.len(), 1);
    assert!(structure.properties[0].public);
    assert!(structure.properties[0].mutable);
    assert_eq!(structure.field_names(), vec!["x", "y", "z"]);

    let context = Context::create();
    let compiler = compile(&decls, "main.pi", &context).unwrap();
    let Some(AnyTypeEnum::StructType(lowered)) = compiler.named_types.get("Vec3").copied() else {
        panic!("Vec3 should lower to a struct");
    };

    assert_eq!(lowered.count_fields(), 3);
    assert!(lowered
        .get_field_types()
        .into_iter()
        .all(|field| type_name(field) == "i32"));
}

const AREA: &str = r#"
type Area interface {
    area() -> f64
}

type Shape struct {
    mut f64 width, height
}
"#;

#[test]
fn test_interface_conformance() {
    let context = Context::create();
    let compiler = compile_source(
        &context,
        &format!(
            "{}\nfn (s Shape) area() -> f64 {{\n    return s.width * s.height\n}}",
            AREA
        ),
    )
    .unwrap();

    assert!(compiler.module.get_function("Shape_area").is_some());

    let area = compiler.get_interface("Area").unwrap();
    assert_eq!(area.slots.len(), 1);
    assert_eq!(area.vtable_type.count_fields(), 1);
    assert!(compiler.conforms("Shape", "Area"));
}

#[test]
fn test_nonconforming_methods_are_not_registered() {
    let context = Context::create();
    let parameters = compile_source(
        &context,
        &format!(
            "{}\nfn (s Shape) area(f64 scale) -> f64 {{\n    return s.width * scale\n}}",
            AREA
        ),
    )
    .unwrap();

    assert!(parameters.module.get_function("area").is_some());
    assert!(parameters.get_interface("Area").unwrap().slots.is_empty());

    let context = Context::create();
    let return_type = compile_source(
        &context,
        &format!("{}\nfn (s Shape) area() -> i32 {{\n    return 0\n}}", AREA),
    )
    .unwrap();

    assert!(return_type.module.get_function("Shape_area").is_none());
    assert!(return_type.get_interface("Area").unwrap().slots.is_empty());
}

#[test]
fn test_missing_return_detection() {
    let context = Context::create();

    let Err(error) = compile_source(&context, "fn answer() -> i32 {\n    mut i32 a = 42\n}") else {
        panic!("expected a missing return");
    };
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingReturn {
            function: "answer".to_string()
        }
    );

    let context = Context::create();
    let compiler = compile_source(&context, "fn nothing() {\n    mut i32 a = 42\n}").unwrap();
    assert!(compiler.print_ir().contains("ret void"));
}

#[test]
fn test_null_default_expansion() {
    let context = Context::create();
    let compiler = compile_source(&context, "fn defaults() {\n    mut i32 a, b\n}").unwrap();

    let ir = compiler.print_ir();
    assert!(ir.contains("%a = alloca i32"));
    assert!(ir.contains("%b = alloca i32"));
    assert!(ir.contains("store i32 0, i32* %a"));
    assert!(ir.contains("store i32 0, i32* %b"));
}

#[test]
fn test_type_lowering_idempotence() {
    let decls = parse_decls("fn f(i8** a, i8** b) {\n}");
    let Decl::Fn(function) = &decls[0] else {
        panic!("expected a function");
    };

    let context = Context::create();
    let mut compiler = Compiler::new(&context, "main.pi");
    let first = lower_type(&mut compiler, &function.parameters[0].ty).unwrap();
    let second = lower_type(&mut compiler, &function.parameters[1].ty).unwrap();

    assert_eq!(first, second);
    assert_eq!(type_name(first), "i8**");
}

#[test]
fn test_program_with_methods_and_calls() {
    let context = Context::create();
    let compiler = compile_source(
        &context,
        r#"
type Shape interface {
    area() -> i64
}

type Rect struct {
    mut i64 width, height
}

fn (r Rect*) area() -> i64 {
    return r->width * r->height
}

fn (r Rect*) grow(i64 by) {
    r->width = r->width + by
    r->height = r->height + by
}

fn measure(Rect* r) -> i64 {
    r->grow(2)
    return r->area() - 1
}
"#,
    )
    .unwrap();

    let ir = compiler.print_ir();
    assert!(ir.contains("define i64 @Rect_area(%Rect* %r)"));
    assert!(ir.contains("define void @grow(%Rect* %r, i64 %by)"));
    assert!(ir.contains("call i64 @Rect_area(%Rect* %r)"));
    assert!(compiler.conforms("Rect", "Shape"));
}

#[test]
fn test_parse_errors_are_collected_and_rendered() {
    let source = "fn a() {\n    mut i32 x = )\n}\nfn b() {\n    mut i32 y = )\n}";
    let tokens = tokenize(source.to_string(), Some("main.pi".to_string())).unwrap();
    let (_, decls) = parse(tokens, Rc::new("main.pi".to_string()));

    let Err(errors) = decls else {
        panic!("expected parse errors");
    };
    assert_eq!(errors.len(), 2);

    let rendered = format_error(&errors[0], source);
    assert!(rendered.starts_with("Error: UnexpectedToken"));
    assert!(rendered.contains("-> main.pi"));
    assert!(rendered.contains("2 | mut i32 x = )"));
}

#[test]
fn test_unknown_type_is_reported_by_the_parser() {
    let tokens = tokenize("fn f(Missing m) {\n}".to_string(), None).unwrap();
    let (_, decls) = parse(tokens, Rc::new("main.pi".to_string()));

    let Err(errors) = decls else {
        panic!("expected an unknown type");
    };
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::UnknownType {
            type_: "Missing".to_string()
        }
    );
}

#[test]
fn test_primitive_kinds_round_trip_through_display() {
    assert_eq!(PrimitiveKind::U32.to_string(), "u32");
    assert_eq!(PrimitiveKind::Void.to_string(), "void");
}
