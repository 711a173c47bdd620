//! Expression lowering.
//!
//! Expressions lower to SSA values. Number literals have no type of their
//! own: they take the declared type attached by the parser, else the type
//! the surrounding expression expects, else `i32` (`f64` with a fraction).

use inkwell::{
    types::{AnyType, AnyTypeEnum, BasicType, BasicTypeEnum, StructType},
    values::{BasicMetadataValueEnum, BasicValueEnum, FunctionValue, PointerValue},
    FloatPredicate, IntPredicate,
};

use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, CallExpr, NullExpr, NumberExpr, SymbolExpr, UnaryExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    compiler::{Compiler, InternalResult},
    types::{lower_basic_type, to_basic_type, type_name},
};

/// Fails with `TypeMatchError` unless both types are the same LLVM type.
pub fn check_type<'a>(
    expected: BasicTypeEnum<'a>,
    received: BasicTypeEnum<'a>,
    position: &Position,
) -> Result<(), Error> {
    if expected == received {
        return Ok(());
    }

    Err(Error::new(
        ErrorImpl::TypeMatchError {
            expected: type_name(expected),
            received: type_name(received),
        },
        position.clone(),
    ))
}

/// Lowers an expression that may produce no value: calls to `void`
/// functions and the empty return value.
pub fn gen_expression_or_void<'a>(
    compiler: &mut Compiler<'a>,
    expression: &Expr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<Option<BasicValueEnum<'a>>, Error> {
    match expression {
        Expr::Void(_) => Ok(None),
        Expr::Call(call) => gen_call_expr(compiler, call),
        Expr::Binary(binary) if is_member_operator(binary.operator.kind) => {
            gen_member_expr(compiler, binary)
        }
        _ => gen_expression(compiler, expression, expected).map(Some),
    }
}

/// Lowers an expression that has to produce a value.
pub fn gen_expression<'a>(
    compiler: &mut Compiler<'a>,
    expression: &Expr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &expression.get_span().start;

    match expression {
        Expr::Number(number) => gen_number_expr(compiler, number, expected),
        Expr::String(string) => Ok(compiler
            .builder
            .build_global_string_ptr(&string.value, "str")
            .or_internal(position)?
            .as_pointer_value()
            .into()),
        Expr::Boolean(boolean) => Ok(compiler
            .context
            .bool_type()
            .const_int(boolean.value as u64, false)
            .into()),
        Expr::Symbol(symbol) => gen_symbol_expr(compiler, symbol),
        Expr::Null(null) => gen_null_expr(compiler, null),
        Expr::Unary(unary) => gen_unary_expr(compiler, unary, expected),
        Expr::Binary(binary) if !is_member_operator(binary.operator.kind) => {
            gen_binary_expr(compiler, binary, expected)
        }
        Expr::Binary(_) | Expr::Call(_) | Expr::Void(_) => {
            gen_expression_or_void(compiler, expression, expected)?.ok_or_else(|| {
                Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from("a value"),
                        received: String::from("void"),
                    },
                    position.clone(),
                )
            })
        }
    }
}

fn is_member_operator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Dot | TokenKind::Arrow)
}

/// A number literal whose type comes from its context.
fn is_untyped_literal(expression: &Expr) -> bool {
    match expression {
        Expr::Number(number) => number.ty.is_none(),
        Expr::Unary(unary) => {
            unary.operator.kind == TokenKind::Dash && is_untyped_literal(&unary.operand)
        }
        _ => false,
    }
}

/// Integer types carry no signedness, so a literal fits a `width`-bit
/// integer when it is in range for either the signed or the unsigned view.
fn int_literal_fits(value: i128, width: u32) -> bool {
    match width {
        1 => (0..=1).contains(&value),
        width if width >= 64 => value >= i64::MIN as i128 && value <= u64::MAX as i128,
        width => value >= -(1i128 << (width - 1)) && value < (1i128 << width),
    }
}

pub fn gen_number_expr<'a>(
    compiler: &mut Compiler<'a>,
    number: &NumberExpr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<BasicValueEnum<'a>, Error> {
    let context = compiler.context;

    let ty = match (&number.ty, expected) {
        (Some(ty), _) => lower_basic_type(compiler, ty)?,
        (None, Some(expected)) => expected,
        (None, None) if number.value.contains('.') => context.f64_type().as_basic_type_enum(),
        (None, None) => context.i32_type().as_basic_type_enum(),
    };

    let parse_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: number.value.clone(),
                type_: type_name(ty),
            },
            number.span.start.clone(),
        )
    };

    match ty {
        BasicTypeEnum::FloatType(float) if float == context.f32_type() => {
            let value: f32 = number.value.parse().map_err(|_| parse_error())?;
            Ok(float.const_float(value as f64).into())
        }
        BasicTypeEnum::FloatType(float) => {
            let value: f64 = number.value.parse().map_err(|_| parse_error())?;
            Ok(float.const_float(value).into())
        }
        BasicTypeEnum::IntType(int) => {
            let value: i128 = number.value.parse().map_err(|_| parse_error())?;

            if !int_literal_fits(value, int.get_bit_width()) {
                return Err(parse_error());
            }

            Ok(int.const_int(value as u64, true).into())
        }
        _ => Err(parse_error()),
    }
}

pub fn gen_symbol_expr<'a>(
    compiler: &mut Compiler<'a>,
    symbol: &SymbolExpr,
) -> Result<BasicValueEnum<'a>, Error> {
    match compiler.lookup_variable(&symbol.value) {
        Some((_, _, binding)) => Ok(binding.value),
        None => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: symbol.value.clone(),
            },
            symbol.span.start.clone(),
        )),
    }
}

/// `null` of a type is that type's zero value.
pub fn gen_null_expr<'a>(
    compiler: &mut Compiler<'a>,
    null: &NullExpr,
) -> Result<BasicValueEnum<'a>, Error> {
    let value: BasicValueEnum = match lower_basic_type(compiler, &null.ty)? {
        BasicTypeEnum::ArrayType(ty) => ty.const_zero().into(),
        BasicTypeEnum::FloatType(ty) => ty.const_zero().into(),
        BasicTypeEnum::IntType(ty) => ty.const_zero().into(),
        BasicTypeEnum::PointerType(ty) => ty.const_zero().into(),
        BasicTypeEnum::StructType(ty) => ty.const_zero().into(),
        BasicTypeEnum::VectorType(ty) => ty.const_zero().into(),
    };

    Ok(value)
}

pub fn gen_unary_expr<'a>(
    compiler: &mut Compiler<'a>,
    unary: &UnaryExpr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &unary.span.start;

    if unary.operator.kind != TokenKind::Dash {
        return Err(Error::new(
            ErrorImpl::UnsupportedExpression {
                expression: format!("prefix `{}`", unary.operator.value),
            },
            position.clone(),
        ));
    }

    let operand = gen_expression(compiler, &unary.operand, expected)?;

    match operand {
        BasicValueEnum::IntValue(value) => Ok(compiler
            .builder
            .build_int_neg(value, "neg")
            .or_internal(position)?
            .into()),
        BasicValueEnum::FloatValue(value) => Ok(compiler
            .builder
            .build_float_neg(value, "neg")
            .or_internal(position)?
            .into()),
        other => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("a number"),
                received: type_name(other.get_type()),
            },
            position.clone(),
        )),
    }
}

pub fn gen_binary_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<BasicValueEnum<'a>, Error> {
    match binary.operator.kind {
        TokenKind::Assignment => gen_assignment_expr(compiler, binary),
        TokenKind::And | TokenKind::Or => gen_logical_expr(compiler, binary),
        TokenKind::Equals
        | TokenKind::NotEquals
        | TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals => gen_comparison_expr(compiler, binary),
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
            gen_arithmetic_expr(compiler, binary, expected)
        }
        _ => Err(Error::new(
            ErrorImpl::UnsupportedExpression {
                expression: format!("binary `{}`", binary.operator.value),
            },
            binary.span.start.clone(),
        )),
    }
}

/// Lowers both operands of a binary expression. An untyped literal on the
/// left takes the type of the right operand, so the right one goes first.
fn gen_operands<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<(BasicValueEnum<'a>, BasicValueEnum<'a>), Error> {
    let (left, right) = if is_untyped_literal(&binary.left) && !is_untyped_literal(&binary.right)
    {
        let right = gen_expression(compiler, &binary.right, expected)?;
        let left = gen_expression(compiler, &binary.left, Some(right.get_type()))?;
        (left, right)
    } else {
        let left = gen_expression(compiler, &binary.left, expected)?;
        let right = gen_expression(compiler, &binary.right, Some(left.get_type()))?;
        (left, right)
    };

    check_type(left.get_type(), right.get_type(), &binary.span.start)?;
    Ok((left, right))
}

fn gen_arithmetic_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
    expected: Option<BasicTypeEnum<'a>>,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &binary.span.start;
    let (left, right) = gen_operands(compiler, binary, expected)?;
    let builder = &compiler.builder;

    let value: BasicValueEnum = match (left, right) {
        (BasicValueEnum::IntValue(lhs), BasicValueEnum::IntValue(rhs)) => {
            match binary.operator.kind {
                TokenKind::Plus => builder.build_int_add(lhs, rhs, "add"),
                TokenKind::Dash => builder.build_int_sub(lhs, rhs, "sub"),
                TokenKind::Star => builder.build_int_mul(lhs, rhs, "mul"),
                _ => builder.build_int_signed_div(lhs, rhs, "div"),
            }
            .or_internal(position)?
            .into()
        }
        (BasicValueEnum::FloatValue(lhs), BasicValueEnum::FloatValue(rhs)) => {
            match binary.operator.kind {
                TokenKind::Plus => builder.build_float_add(lhs, rhs, "add"),
                TokenKind::Dash => builder.build_float_sub(lhs, rhs, "sub"),
                TokenKind::Star => builder.build_float_mul(lhs, rhs, "mul"),
                _ => builder.build_float_div(lhs, rhs, "div"),
            }
            .or_internal(position)?
            .into()
        }
        (other, _) => {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from("a number"),
                    received: type_name(other.get_type()),
                },
                position.clone(),
            ))
        }
    };

    Ok(value)
}

fn gen_comparison_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &binary.span.start;
    let (left, right) = gen_operands(compiler, binary, None)?;
    let kind = binary.operator.kind;

    match (left, right) {
        (BasicValueEnum::IntValue(lhs), BasicValueEnum::IntValue(rhs)) => {
            let predicate = match kind {
                TokenKind::Equals => IntPredicate::EQ,
                TokenKind::NotEquals => IntPredicate::NE,
                TokenKind::Less => IntPredicate::SLT,
                TokenKind::LessEquals => IntPredicate::SLE,
                TokenKind::Greater => IntPredicate::SGT,
                _ => IntPredicate::SGE,
            };

            Ok(compiler
                .builder
                .build_int_compare(predicate, lhs, rhs, "cmp")
                .or_internal(position)?
                .into())
        }
        (BasicValueEnum::FloatValue(lhs), BasicValueEnum::FloatValue(rhs)) => {
            let predicate = match kind {
                TokenKind::Equals => FloatPredicate::OEQ,
                TokenKind::NotEquals => FloatPredicate::ONE,
                TokenKind::Less => FloatPredicate::OLT,
                TokenKind::LessEquals => FloatPredicate::OLE,
                TokenKind::Greater => FloatPredicate::OGT,
                _ => FloatPredicate::OGE,
            };

            Ok(compiler
                .builder
                .build_float_compare(predicate, lhs, rhs, "cmp")
                .or_internal(position)?
                .into())
        }
        (other, _) => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("a number"),
                received: type_name(other.get_type()),
            },
            position.clone(),
        )),
    }
}

fn gen_logical_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &binary.span.start;
    let bool_type = compiler.context.bool_type();

    let left = gen_expression(compiler, &binary.left, Some(bool_type.into()))?;
    check_type(bool_type.into(), left.get_type(), &binary.left.get_span().start)?;
    let right = gen_expression(compiler, &binary.right, Some(bool_type.into()))?;
    check_type(bool_type.into(), right.get_type(), &binary.right.get_span().start)?;

    let (lhs, rhs) = (left.into_int_value(), right.into_int_value());
    let value = match binary.operator.kind {
        TokenKind::And => compiler.builder.build_and(lhs, rhs, "and"),
        _ => compiler.builder.build_or(lhs, rhs, "or"),
    }
    .or_internal(position)?;

    Ok(value.into())
}

/// Stack slot of a mutable binding, with its scope and type.
fn mutable_slot<'a>(
    compiler: &Compiler<'a>,
    symbol: &SymbolExpr,
) -> Result<(i32, PointerValue<'a>, BasicTypeEnum<'a>), Error> {
    let position = &symbol.span.start;

    let Some((scope_id, mutable, binding)) = compiler.lookup_variable(&symbol.value) else {
        return Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: symbol.value.clone(),
            },
            position.clone(),
        ));
    };

    match (mutable, binding.ptr) {
        (true, Some(ptr)) => Ok((scope_id, ptr, binding.ty)),
        _ => Err(Error::new(
            ErrorImpl::AssignToConstant {
                variable: symbol.value.clone(),
            },
            position.clone(),
        )),
    }
}

/// `x = v`, `s.field = v` and `p->field = v`. Evaluates to the stored value.
fn gen_assignment_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<BasicValueEnum<'a>, Error> {
    let position = &binary.span.start;

    match binary.left.as_ref() {
        Expr::Symbol(symbol) => {
            let (scope_id, ptr, ty) = mutable_slot(compiler, symbol)?;

            let value = gen_expression(compiler, &binary.right, Some(ty))?;
            check_type(ty, value.get_type(), position)?;

            compiler.builder.build_store(ptr, value).or_internal(position)?;
            let loaded = compiler
                .builder
                .build_load(ptr, &symbol.value)
                .or_internal(position)?;
            compiler.rebind_variable(scope_id, &symbol.value, loaded);

            Ok(loaded)
        }
        Expr::Binary(member) if is_member_operator(member.operator.kind) => {
            let Expr::Symbol(field) = member.right.as_ref() else {
                return Err(unsupported(member.right.as_ref()));
            };

            // `s.field` writes through the slot of `s` and reloads `s`
            let (base, reload) = match (member.operator.kind, member.left.as_ref()) {
                (TokenKind::Arrow, left) => {
                    let base = gen_expression(compiler, left, None)?;
                    (as_pointer(base, &member.span.start)?, None)
                }
                (_, Expr::Symbol(symbol)) => {
                    let (scope_id, ptr, _) = mutable_slot(compiler, symbol)?;
                    (ptr, Some((scope_id, symbol.value.as_str())))
                }
                (_, other) => return Err(unsupported(other)),
            };

            let field_ptr = gen_field_ptr(compiler, base, &field.value, &field.span.start)?;
            let field_type = to_basic_type(field_ptr.get_type().get_element_type(), position)?;

            let value = gen_expression(compiler, &binary.right, Some(field_type))?;
            check_type(field_type, value.get_type(), position)?;
            compiler
                .builder
                .build_store(field_ptr, value)
                .or_internal(position)?;

            if let Some((scope_id, name)) = reload {
                let reloaded = compiler.builder.build_load(base, name).or_internal(position)?;
                compiler.rebind_variable(scope_id, name, reloaded);
            }

            Ok(value)
        }
        other => Err(unsupported(other)),
    }
}

fn unsupported(expression: &Expr) -> Error {
    Error::new(
        ErrorImpl::UnsupportedExpression {
            expression: expression.get_expr_type().to_string(),
        },
        expression.get_span().start.clone(),
    )
}

fn as_pointer<'a>(
    value: BasicValueEnum<'a>,
    position: &Position,
) -> Result<PointerValue<'a>, Error> {
    match value {
        BasicValueEnum::PointerValue(ptr) => Ok(ptr),
        other => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("a pointer"),
                received: type_name(other.get_type()),
            },
            position.clone(),
        )),
    }
}

fn struct_name(struct_type: StructType) -> Option<String> {
    struct_type
        .get_name()
        .and_then(|name| name.to_str().ok())
        .map(String::from)
}

/// Name of the struct a receiver value is, or points to.
fn receiver_type_name<'a>(
    value: BasicValueEnum<'a>,
    arrow: bool,
    position: &Position,
) -> Result<String, Error> {
    let ty = match value {
        BasicValueEnum::PointerValue(ptr) if arrow => ptr.get_type().get_element_type(),
        other => other.get_type().as_any_type_enum(),
    };

    match ty {
        AnyTypeEnum::StructType(struct_type) => {
            struct_name(struct_type).ok_or_else(|| invalid_receiver(ty, position))
        }
        _ => Err(invalid_receiver(ty, position)),
    }
}

fn invalid_receiver(ty: AnyTypeEnum, position: &Position) -> Error {
    Error::new(
        ErrorImpl::InvalidReceiver {
            type_: type_name(ty),
        },
        position.clone(),
    )
}

/// Index of `field` in a named struct.
fn field_index<'a>(
    compiler: &Compiler<'a>,
    struct_type: StructType<'a>,
    field: &str,
    position: &Position,
) -> Result<u32, Error> {
    let name = struct_name(struct_type).unwrap_or_else(|| type_name(struct_type));

    compiler
        .struct_fields
        .get(&name)
        .and_then(|fields| fields.iter().position(|candidate| candidate == field))
        .map(|index| index as u32)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownProperty {
                    type_: name,
                    property: String::from(field),
                },
                position.clone(),
            )
        })
}

fn gen_field_ptr<'a>(
    compiler: &mut Compiler<'a>,
    ptr: PointerValue<'a>,
    field: &str,
    position: &Position,
) -> Result<PointerValue<'a>, Error> {
    let AnyTypeEnum::StructType(struct_type) = ptr.get_type().get_element_type() else {
        return Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("a pointer to a struct"),
                received: type_name(ptr.get_type()),
            },
            position.clone(),
        ));
    };

    let index = field_index(compiler, struct_type, field, position)?;
    compiler
        .builder
        .build_struct_gep(ptr, index, field)
        .or_internal(position)
}

/// `s.field`, `p->field`, `s.method(...)` and `p->method(...)`.
pub fn gen_member_expr<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<Option<BasicValueEnum<'a>>, Error> {
    let arrow = binary.operator.kind == TokenKind::Arrow;

    match binary.right.as_ref() {
        Expr::Symbol(field) => {
            let position = &field.span.start;
            let base = gen_expression(compiler, &binary.left, None)?;

            if arrow {
                let ptr = as_pointer(base, &binary.span.start)?;
                let field_ptr = gen_field_ptr(compiler, ptr, &field.value, position)?;
                let value = compiler
                    .builder
                    .build_load(field_ptr, &field.value)
                    .or_internal(position)?;
                return Ok(Some(value));
            }

            let BasicValueEnum::StructValue(structure) = base else {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from("a struct"),
                        received: type_name(base.get_type()),
                    },
                    binary.span.start.clone(),
                ));
            };

            let index = field_index(compiler, structure.get_type(), &field.value, position)?;
            let value = compiler
                .builder
                .build_extract_value(structure, index, &field.value)
                .or_internal(position)?;

            Ok(Some(value))
        }
        Expr::Call(call) => gen_method_call(compiler, binary, call, arrow),
        other => Err(unsupported(other)),
    }
}

/// Resolves `<Type>_<method>`, then `<method>`, and calls it with the
/// receiver as the first argument.
fn gen_method_call<'a>(
    compiler: &mut Compiler<'a>,
    binary: &BinaryExpr,
    call: &CallExpr,
    arrow: bool,
) -> Result<Option<BasicValueEnum<'a>>, Error> {
    let Expr::Symbol(method) = call.callee.as_ref() else {
        return Err(unsupported(call.callee.as_ref()));
    };

    let receiver = gen_expression(compiler, &binary.left, None)?;
    let type_name = receiver_type_name(receiver, arrow, &binary.left.get_span().start)?;

    let function = compiler
        .module
        .get_function(&format!("{}_{}", type_name, method.value))
        .or_else(|| compiler.module.get_function(&method.value))
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::FunctionNotDeclared {
                    function: method.value.clone(),
                },
                method.span.start.clone(),
            )
        })?;

    build_call(compiler, function, Some(receiver), call)
}

pub fn gen_call_expr<'a>(
    compiler: &mut Compiler<'a>,
    call: &CallExpr,
) -> Result<Option<BasicValueEnum<'a>>, Error> {
    let Expr::Symbol(callee) = call.callee.as_ref() else {
        return Err(unsupported(call.callee.as_ref()));
    };

    let Some(function) = compiler.module.get_function(&callee.value) else {
        return Err(Error::new(
            ErrorImpl::FunctionNotDeclared {
                function: callee.value.clone(),
            },
            callee.span.start.clone(),
        ));
    };

    build_call(compiler, function, None, call)
}

/// Checks the arguments against the parameters of `function` and emits the
/// call. A `receiver` fills the first parameter.
fn build_call<'a>(
    compiler: &mut Compiler<'a>,
    function: FunctionValue<'a>,
    receiver: Option<BasicValueEnum<'a>>,
    call: &CallExpr,
) -> Result<Option<BasicValueEnum<'a>>, Error> {
    let position = &call.span.start;

    let parameters: Vec<BasicTypeEnum> = function
        .get_params()
        .iter()
        .map(|param| param.get_type())
        .collect();
    let provided = call.arguments.len() + usize::from(receiver.is_some());

    if provided > parameters.len() {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments {
                expected: parameters.len(),
                received: provided,
            },
            position.clone(),
        ));
    }
    if provided < parameters.len() {
        return Err(Error::new(
            ErrorImpl::MissingArguments {
                expected: parameters.len(),
                received: provided,
            },
            position.clone(),
        ));
    }

    let mut arguments: Vec<BasicMetadataValueEnum> = Vec::with_capacity(parameters.len());
    let mut expected_types = parameters.iter().copied();

    if let Some(receiver) = receiver {
        if let Some(expected) = expected_types.next() {
            check_type(expected, receiver.get_type(), position)?;
        }
        arguments.push(receiver.into());
    }

    for (argument, expected) in call.arguments.iter().zip(expected_types) {
        let value = gen_expression(compiler, argument, Some(expected))?;
        check_type(expected, value.get_type(), &argument.get_span().start)?;
        arguments.push(value.into());
    }

    let value = compiler
        .builder
        .build_call(function, &arguments, "")
        .or_internal(position)?
        .try_as_basic_value()
        .left();

    Ok(value)
}
