//! Unit tests for the code generator.
//!
//! This module contains tests for:
//! - Type lowering and struct layouts
//! - Interface vtables and method conformance
//! - Function bodies, returns and scoping
//! - Expression lowering and argument checking

use std::rc::Rc;

use inkwell::{context::Context, types::AnyTypeEnum};

use super::{
    compiler::{compile, Compiler},
    types::{lower_type, type_name},
};
use crate::{
    ast::{
        ast::TypeExpr,
        types::{PointerTypeExpr, PrimitiveKind, PrimitiveTypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Span,
};

fn compile_source<'a>(context: &'a Context, source: &str) -> Result<Compiler<'a>, Error> {
    let tokens = tokenize(source.to_string(), Some("test.pi".to_string())).unwrap();
    let (_, decls) = parse(tokens, Rc::new("test.pi".to_string()));
    let decls = decls.unwrap_or_else(|errors| panic!("parsing failed: {:?}", errors));

    compile(&decls, "test.pi", context)
}

fn compile_ok<'a>(context: &'a Context, source: &str) -> Compiler<'a> {
    match compile_source(context, source) {
        Ok(compiler) => compiler,
        Err(error) => panic!("compilation failed: {}", error),
    }
}

fn compile_err(source: &str) -> Error {
    let context = Context::create();
    let result = match compile_source(&context, source) {
        Ok(compiler) => panic!("expected an error, got:\n{}", compiler.print_ir()),
        Err(error) => error,
    };
    result
}

fn pointer_to(ty: TypeExpr) -> TypeExpr {
    TypeExpr::Pointer(PointerTypeExpr {
        pointee: Box::new(ty),
        span: Span::null(),
    })
}

fn primitive(kind: PrimitiveKind) -> TypeExpr {
    TypeExpr::Primitive(PrimitiveTypeExpr {
        kind,
        span: Span::null(),
    })
}

const SHAPES: &str = r#"
type Shape interface {
    area() -> i32
}

type Square struct {
    mut i32 side
}

fn (s Square) area() -> i32 {
    return s.side * s.side
}
"#;

#[test]
fn test_conforming_method_is_renamed_and_added_to_vtable() {
    let context = Context::create();
    let compiler = compile_ok(&context, SHAPES);

    assert!(compiler.module.get_function("Square_area").is_some());
    assert!(compiler.module.get_function("area").is_none());

    let shape = compiler.get_interface("Shape").unwrap();
    assert_eq!(shape.slots.len(), 1);
    assert_eq!(shape.vtable_type.count_fields(), 1);
    assert!(compiler.conforms("Square", "Shape"));
}

#[test]
fn test_interface_synthesizes_vtable_globals() {
    let context = Context::create();
    let compiler = compile_ok(&context, SHAPES);

    assert!(compiler.module.get_global("Shape_VTable_Data").is_some());

    let Some(AnyTypeEnum::StructType(instance)) = compiler.named_types.get("Shape").copied()
    else {
        panic!("Shape should lower to a struct");
    };
    assert_eq!(instance.count_fields(), 1);

    let ir = compiler.print_ir();
    assert!(ir.contains("%Shape_VTable_Type = type { i32 (%Square)* }"));
    assert!(ir.contains("@Shape_VTable_Data = constant %Shape_VTable_Type { i32 (%Square)* @Square_area }"));
}

#[test]
fn test_interface_without_implementations_has_empty_vtable() {
    let context = Context::create();
    let compiler = compile_ok(&context, "type Shape interface {\n    area() -> i32\n}");

    let shape = compiler.get_interface("Shape").unwrap();
    assert!(shape.slots.is_empty());
    assert_eq!(shape.vtable_type.count_fields(), 0);
    assert!(!compiler.conforms("Square", "Shape"));
}

#[test]
fn test_method_with_different_parameter_type_does_not_conform() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        r#"
type Shape interface {
    scale(i32 factor) -> i32
}

type Square struct {
    mut i32 side
}

fn (s Square) scale(f64 factor) -> i32 {
    return 1
}
"#,
    );

    assert!(compiler.module.get_function("scale").is_some());
    assert!(compiler.module.get_function("Square_scale").is_none());
    assert!(compiler.get_interface("Shape").unwrap().slots.is_empty());
    assert!(!compiler.conforms("Square", "Shape"));
}

#[test]
fn test_mismatch_in_later_parameter_does_not_conform() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        r#"
type Resizable interface {
    resize(i32 width, i32 height)
}

type Square struct {
    mut i32 side
}

fn (s Square) resize(i32 width, f64 height) {
}
"#,
    );

    assert!(compiler.module.get_function("resize").is_some());
    assert!(compiler.get_interface("Resizable").unwrap().slots.is_empty());
}

#[test]
fn test_method_with_different_return_type_does_not_conform() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        r#"
type Shape interface {
    area() -> i32
}

type Square struct {
    mut i32 side
}

fn (s Square) area() -> i64 {
    return 1
}
"#,
    );

    assert!(compiler.module.get_function("area").is_some());
    assert!(!compiler.conforms("Square", "Shape"));
}

#[test]
fn test_conformance_requires_every_method() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        r#"
type Shape interface {
    area() -> i32
    sides() -> i32
}

type Square struct {
    mut i32 side
}

fn (s Square) area() -> i32 {
    return s.side * s.side
}
"#,
    );

    assert_eq!(compiler.get_interface("Shape").unwrap().slots.len(), 1);
    assert!(!compiler.conforms("Square", "Shape"));
}

#[test]
fn test_method_call_resolves_renamed_method() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        &format!(
            "{}\nfn total(Square s) -> i32 {{\n    return s.area() + 1\n}}",
            SHAPES
        ),
    );

    assert!(compiler
        .print_ir()
        .contains("call i32 @Square_area(%Square %s)"));
}

#[test]
fn test_struct_layout_repeats_co_declared_fields() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        "type Point struct {\n    mut i32 x, y\n    const f64 z\n}",
    );

    assert_eq!(compiler.struct_fields["Point"], vec!["x", "y", "z"]);

    let Some(AnyTypeEnum::StructType(point)) = compiler.named_types.get("Point").copied() else {
        panic!("Point should lower to a struct");
    };
    let fields: Vec<String> = point
        .get_field_types()
        .into_iter()
        .map(type_name)
        .collect();
    assert_eq!(fields, vec!["i32", "i32", "double"]);
}

#[test]
fn test_type_lowering_is_idempotent() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test.pi");

    let ty = pointer_to(pointer_to(primitive(PrimitiveKind::I32)));
    let first = lower_type(&mut compiler, &ty).unwrap();
    let second = lower_type(&mut compiler, &ty).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_nested_pointers_lower_one_level_each() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test.pi");

    let ty = pointer_to(pointer_to(pointer_to(primitive(PrimitiveKind::I32))));
    let lowered = lower_type(&mut compiler, &ty).unwrap();

    assert_eq!(type_name(lowered), "i32***");
}

#[test]
fn test_void_pointer_lowers_to_byte_pointer() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test.pi");

    let lowered = lower_type(&mut compiler, &pointer_to(primitive(PrimitiveKind::Void))).unwrap();

    assert_eq!(type_name(lowered), "i8*");
}

#[test]
fn test_unsigned_types_share_signed_widths() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test.pi");

    let unsigned = lower_type(&mut compiler, &primitive(PrimitiveKind::U16)).unwrap();
    let signed = lower_type(&mut compiler, &primitive(PrimitiveKind::I16)).unwrap();

    assert_eq!(unsigned, signed);
}

#[test]
fn test_missing_return() {
    let error = compile_err("fn value() -> i32 {\n    mut i32 a = 1\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::MissingReturn {
            function: "value".to_string()
        }
    );
    assert!(!error.is_recoverable());
}

#[test]
fn test_void_function_gets_implicit_return() {
    let context = Context::create();
    let compiler = compile_ok(&context, "fn nothing() {\n    mut i32 a = 1\n}");

    assert!(compiler.print_ir().contains("ret void"));
}

#[test]
fn test_declaration_without_initializer_stores_zero() {
    let context = Context::create();
    let compiler = compile_ok(&context, "fn defaults() {\n    mut i32 a, b\n}");

    let ir = compiler.print_ir();
    assert!(ir.contains("store i32 0, i32* %a"));
    assert!(ir.contains("store i32 0, i32* %b"));
}

#[test]
fn test_literal_takes_declared_type() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        "fn literals() {\n    const i64 big = 5000000000\n    const f32 small = 1.5\n}",
    );

    let ir = compiler.print_ir();
    assert!(ir.contains("store i64 5000000000, i64* %big"));
    assert!(ir.contains("store float 1.500000e+00, float* %small"));
}

#[test]
fn test_malformed_literal_for_type() {
    let error = compile_err("fn bad() {\n    mut i32 a = 1.5\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NumberParseError {
            token: "1.5".to_string(),
            type_: "i32".to_string()
        }
    );
}

#[test]
fn test_literal_out_of_range_for_type() {
    let error = compile_err("fn f() -> i8 {\n    return 300\n}");
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NumberParseError {
            token: "300".to_string(),
            type_: "i8".to_string()
        }
    );

    let error = compile_err("fn f() {\n    mut i16 a = -32769\n}");
    assert_eq!(error.get_error_name(), "NumberParseError");

    let error = compile_err("fn f() {\n    mut bool b = 2\n}");
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_literal_at_range_edges() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        "fn f() {\n    mut u8 a = 255\n    mut i8 b = -128\n    mut u64 c = 18446744073709551615\n}",
    );

    let ir = compiler.print_ir();
    assert!(ir.contains("store i8 -1, i8* %a"));
    assert!(ir.contains("store i8 -128, i8* %b"));
    assert!(ir.contains("store i64 -1, i64* %c"));
}

#[test]
fn test_duplicate_variable_in_block() {
    let error = compile_err("fn twice() {\n    mut i32 a = 1\n    const i32 a = 2\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableAlreadyDeclared {
            variable: "a".to_string()
        }
    );
}

#[test]
fn test_unresolved_variable_is_recoverable() {
    let error = compile_err("fn missing() -> i32 {\n    return b\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "b".to_string()
        }
    );
    assert!(error.is_recoverable());
    assert_eq!(error.get_position().row, 2);
}

#[test]
fn test_nested_block_sees_outer_bindings_but_not_the_reverse() {
    let context = Context::create();
    compile_ok(
        &context,
        "fn outer() -> i32 {\n    mut i32 a = 1\n    {\n        const i32 b = a\n    }\n    return a\n}",
    );

    let error = compile_err(
        "fn outer() -> i32 {\n    {\n        const i32 b = 1\n    }\n    return b\n}",
    );
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "b".to_string()
        }
    );
}

#[test]
fn test_assignment_to_mutable_binding() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        "fn bump() -> i32 {\n    mut i32 a = 1\n    a = a + 2\n    return a\n}",
    );

    let ir = compiler.print_ir();
    assert!(ir.contains("add i32"));
    assert!(ir.contains("ret i32"));
}

#[test]
fn test_assignment_to_constant() {
    let error = compile_err("fn fixed() {\n    const i32 a = 1\n    a = 2\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::AssignToConstant {
            variable: "a".to_string()
        }
    );
}

#[test]
fn test_return_type_mismatch() {
    let error = compile_err("fn flag() -> i32 {\n    return true\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::TypeMatchError {
            expected: "i32".to_string(),
            received: "i1".to_string()
        }
    );
}

#[test]
fn test_statement_after_return_is_unreachable() {
    let error = compile_err("fn early() -> i32 {\n    return 1\n    mut i32 a = 2\n}");

    assert_eq!(error.get_internal_error(), &ErrorImpl::UnreachableStatement);
    assert_eq!(error.get_position().row, 3);
}

const ADD: &str = "fn add(i32 a, i32 b) -> i32 {\n    return a + b\n}\n";

#[test]
fn test_call_lowers_arguments_to_parameter_types() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        &format!("{}fn main() -> i32 {{\n    return add(1, 2)\n}}", ADD),
    );

    assert!(compiler.print_ir().contains("call i32 @add(i32 1, i32 2)"));
}

#[test]
fn test_call_arity_errors() {
    let missing = compile_err(&format!("{}fn main() -> i32 {{\n    return add(1)\n}}", ADD));
    assert_eq!(
        missing.get_internal_error(),
        &ErrorImpl::MissingArguments {
            expected: 2,
            received: 1
        }
    );

    let extra = compile_err(&format!(
        "{}fn main() -> i32 {{\n    return add(1, 2, 3)\n}}",
        ADD
    ));
    assert_eq!(
        extra.get_internal_error(),
        &ErrorImpl::UnexpectedArguments {
            expected: 2,
            received: 3
        }
    );
}

#[test]
fn test_call_to_unknown_function() {
    let error = compile_err("fn main() {\n    launch()\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::FunctionNotDeclared {
            function: "launch".to_string()
        }
    );
}

#[test]
fn test_duplicate_function() {
    let error = compile_err("fn main() {\n}\nfn main() {\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::FunctionAlreadyDeclared {
            function: "main".to_string()
        }
    );
}

#[test]
fn test_fields_and_methods_through_pointers() {
    let context = Context::create();
    let compiler = compile_ok(
        &context,
        r#"
type Counter struct {
    mut i32 count
}

fn (c Counter*) get() -> i32 {
    return c->count
}

fn (c Counter*) set(i32 value) {
    c->count = value
}

fn run(Counter* c) -> i32 {
    c->set(5)
    return c->get()
}
"#,
    );

    let ir = compiler.print_ir();
    assert!(ir.contains("getelementptr inbounds %Counter, %Counter* %c, i32 0, i32 0"));
    assert!(ir.contains("call void @set(%Counter* %c, i32 5)"));
    assert!(ir.contains("call i32 @get(%Counter* %c)"));
}

#[test]
fn test_unknown_property() {
    let error = compile_err(
        "type Point struct {\n    mut i32 x\n}\nfn read(Point p) -> i32 {\n    return p.y\n}",
    );

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnknownProperty {
            type_: "Point".to_string(),
            property: "y".to_string()
        }
    );
}

#[test]
fn test_invalid_receiver() {
    let error = compile_err("fn (n i32) double() -> i32 {\n    return n + n\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::InvalidReceiver {
            type_: "i32".to_string()
        }
    );
}

#[test]
fn test_redeclared_type() {
    let error = compile_err("type Id i64\ntype Id i32");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::TypeAlreadyDeclared {
            type_: "Id".to_string()
        }
    );
}

#[test]
fn test_finish_verifies_module() {
    let context = Context::create();
    let mut compiler = compile_ok(&context, SHAPES);

    assert!(compiler.finish().is_ok());
    assert_eq!(compiler.get_interface("Shape").unwrap().slots.len(), 1);
}

#[test]
fn test_self_referential_struct() {
    let context = Context::create();
    let compiler = compile_ok(&context, "type Node struct {\n    mut i32 id\n    mut Node* next\n}");

    let Some(AnyTypeEnum::StructType(node)) = compiler.named_types.get("Node").copied() else {
        panic!("Node should lower to a struct");
    };
    assert_eq!(node.count_fields(), 2);
    assert_eq!(type_name(node.get_field_types()[1]), "%Node*");
}

#[test]
fn test_interface_method_returning_its_own_type() {
    let context = Context::create();
    let compiler = compile_ok(&context, "type Shape interface {\n    clone() -> Shape*\n}");

    let shape = compiler.get_interface("Shape").unwrap();
    assert_eq!(type_name(shape.methods["clone"].return_type), "%Shape*");
}

#[test]
fn test_struct_containing_itself_by_value() {
    let error = compile_err("type Node struct {\n    mut Node inner\n}");

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnsupportedNode {
            node: "struct %Node containing itself".to_string()
        }
    );
}

#[test]
fn test_pointer_suffixed_declaration_names_the_pointer() {
    let context = Context::create();
    let compiler = compile_ok(&context, "type P struct {\n    mut i32 x\n}*");

    let lowered = compiler.named_types["P"];
    assert!(lowered.is_pointer_type());
    assert_eq!(type_name(lowered), "{ i32 }*");
    assert!(!compiler.struct_fields.contains_key("P"));
}
