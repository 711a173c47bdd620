use inkwell::{
    types::{AnyTypeEnum, BasicTypeEnum},
    values::{BasicValue, BasicValueEnum},
};

use crate::{
    ast::{
        ast::{Decl, Expr, Stmt, TypeExpr},
        statements::{BlockStmt, FnDecl, Receiver, ReturnStmt, TypeDecl, VarDecl},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    compiler::{Binding, Compiler, FunctionContext, InternalResult},
    expr::{check_type, gen_expression, gen_expression_or_void},
    types::{function_type, lower_basic_type, lower_signature, lower_type, type_name},
};

pub fn gen_decl<'a>(compiler: &mut Compiler<'a>, decl: &Decl) -> Result<(), Error> {
    match decl {
        Decl::Type(decl) => gen_type_decl(compiler, decl),
        Decl::Fn(decl) => gen_fn_decl(compiler, decl),
        Decl::Var(decl) => Err(Error::new(
            ErrorImpl::UnsupportedNode {
                node: String::from("top-level variable declaration"),
            },
            decl.span.start.clone(),
        )),
    }
}

pub fn gen_statement<'a>(compiler: &mut Compiler<'a>, statement: &Stmt) -> Result<(), Error> {
    match statement {
        Stmt::Expression(stmt) => {
            gen_expression_or_void(compiler, &stmt.expression, None)?;
            Ok(())
        }
        Stmt::Decl(stmt) => match stmt.decl.as_ref() {
            Decl::Var(decl) => gen_var_decl(compiler, decl),
            other => Err(Error::new(
                ErrorImpl::UnsupportedNode {
                    node: format!("nested {:?}", other.get_decl_type()),
                },
                stmt.span.start.clone(),
            )),
        },
        Stmt::Empty(_) => Ok(()),
        Stmt::Block(block) => {
            let previous = compiler.enter_scope(block.id);
            let result = gen_block(compiler, block);
            compiler.exit_scope(previous);
            result
        }
        Stmt::Return(stmt) => gen_return_stmt(compiler, stmt),
    }
}

/// Lowers the statements of `block` into the current scope.
pub fn gen_block<'a>(compiler: &mut Compiler<'a>, block: &BlockStmt) -> Result<(), Error> {
    for statement in block.iter() {
        if compiler.is_terminated() {
            if let Stmt::Empty(_) = statement {
                continue;
            }

            return Err(Error::new(
                ErrorImpl::UnreachableStatement,
                statement.get_span().start.clone(),
            ));
        }

        gen_statement(compiler, statement)?;
    }

    Ok(())
}

/// Each name gets its own stack slot; the stored value is loaded straight
/// back and bound as the current value of the name.
pub fn gen_var_decl<'a>(compiler: &mut Compiler<'a>, decl: &VarDecl) -> Result<(), Error> {
    let ty = lower_basic_type(compiler, &decl.ty)?;

    for (name, value) in decl.names.iter().zip(&decl.values) {
        let position = &value.get_span().start;

        let ptr = compiler.builder.build_alloca(ty, name).or_internal(position)?;
        let value = gen_expression(compiler, value, Some(ty))?;
        check_type(ty, value.get_type(), position)?;

        compiler.builder.build_store(ptr, value).or_internal(position)?;
        let loaded = compiler.builder.build_load(ptr, name).or_internal(position)?;

        let binding = Binding {
            value: loaded,
            ptr: Some(ptr),
            ty,
        };
        compiler.declare_variable(name, decl.mutable, binding, &decl.span.start)?;
    }

    Ok(())
}

pub fn gen_return_stmt<'a>(compiler: &mut Compiler<'a>, stmt: &ReturnStmt) -> Result<(), Error> {
    let position = &stmt.span.start;

    let Some(function) = compiler.current_function else {
        return Err(Error::new(
            ErrorImpl::UnsupportedNode {
                node: String::from("return outside of a function"),
            },
            position.clone(),
        ));
    };

    match (function.return_type, &stmt.value) {
        (AnyTypeEnum::VoidType(_), Expr::Void(_)) => {
            compiler.builder.build_return(None).or_internal(position)?;
        }
        (AnyTypeEnum::VoidType(_), value) => {
            let value = gen_expression(compiler, value, None)?;
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: String::from("void"),
                    received: type_name(value.get_type()),
                },
                position.clone(),
            ));
        }
        (return_type, value) => {
            let expected = BasicTypeEnum::try_from(return_type).ok();
            let value = gen_expression(compiler, value, expected)?;

            if let Some(expected) = expected {
                check_type(expected, value.get_type(), position)?;
            }

            compiler
                .builder
                .build_return(Some(&value))
                .or_internal(position)?;
        }
    }

    Ok(())
}

/// Struct and interface types register themselves under the declared
/// name while being lowered; anything else is an alias.
pub fn gen_type_decl<'a>(compiler: &mut Compiler<'a>, decl: &TypeDecl) -> Result<(), Error> {
    if compiler.named_types.contains_key(&decl.name) {
        return Err(Error::new(
            ErrorImpl::TypeAlreadyDeclared {
                type_: decl.name.clone(),
            },
            decl.span.start.clone(),
        ));
    }

    compiler.current_type_name = Some(decl.name.clone());
    let lowered = lower_type(compiler, &decl.ty);
    compiler.current_type_name = None;

    let lowered = lowered?;
    compiler.named_types.insert(decl.name.clone(), lowered);

    Ok(())
}

/// Name of the receiver's type and the type passed for it.
fn lower_receiver<'a>(
    compiler: &mut Compiler<'a>,
    receiver: &Receiver,
) -> Result<(String, BasicTypeEnum<'a>), Error> {
    let type_name = match &receiver.ty {
        TypeExpr::Named(named) => named.name.clone(),
        TypeExpr::Pointer(pointer) => match pointer.pointee.as_ref() {
            TypeExpr::Named(named) => named.name.clone(),
            other => return Err(invalid_receiver(other, &receiver.span.start)),
        },
        other => return Err(invalid_receiver(other, &receiver.span.start)),
    };

    let ty = lower_basic_type(compiler, &receiver.ty)?;
    Ok((type_name, ty))
}

fn invalid_receiver(ty: &TypeExpr, position: &Position) -> Error {
    Error::new(
        ErrorImpl::InvalidReceiver {
            type_: ty.to_string(),
        },
        position.clone(),
    )
}

/// Lowers a function or method.
///
/// A method whose name and signature match a method of a known interface
/// is emitted as `<Receiver>_<name>` and appended to the vtable of every
/// interface it matches.
pub fn gen_fn_decl<'a>(compiler: &mut Compiler<'a>, decl: &FnDecl) -> Result<(), Error> {
    let position = &decl.span.start;

    let signature = lower_signature(compiler, &decl.parameters, &decl.return_type)?;
    let receiver = match &decl.receiver {
        Some(receiver) => Some(lower_receiver(compiler, receiver)?),
        None => None,
    };

    let conforming = match &receiver {
        Some(_) => compiler.conforming_interfaces(&decl.name, &signature),
        None => vec![],
    };

    let name = match &receiver {
        Some((type_name, _)) if !conforming.is_empty() => format!("{}_{}", type_name, decl.name),
        _ => decl.name.clone(),
    };

    if compiler.module.get_function(&name).is_some() {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared { function: name },
            position.clone(),
        ));
    }

    let mut parameter_types = Vec::with_capacity(signature.parameters.len() + 1);
    if let Some((_, ty)) = &receiver {
        parameter_types.push(*ty);
    }
    parameter_types.extend(signature.parameters.iter().copied());

    let fn_type = function_type(signature.return_type, &parameter_types, position)?;
    let function = compiler.module.add_function(&name, fn_type, None);

    if let Some((type_name, _)) = &receiver {
        for index in conforming {
            compiler.interfaces[index].add_slot(type_name, &decl.name, function);
        }
    }

    let entry = compiler.context.append_basic_block(function, &decl.body.name);
    compiler.builder.position_at_end(entry);

    let previous_scope = compiler.enter_scope(decl.body.id);
    compiler.current_function = Some(FunctionContext {
        value: function,
        return_type: signature.return_type,
    });

    let result = bind_parameters(compiler, decl)
        .and_then(|_| gen_block(compiler, &decl.body))
        .and_then(|_| close_function(compiler, decl, signature.return_type));

    compiler.current_function = None;
    compiler.exit_scope(previous_scope);

    result
}

/// Binds the receiver and the parameters in the body scope. `mut`
/// parameters are copied to a stack slot so they can be assigned.
fn bind_parameters<'a>(compiler: &mut Compiler<'a>, decl: &FnDecl) -> Result<(), Error> {
    let Some(function) = compiler.current_function.map(|function| function.value) else {
        return Ok(());
    };

    let mut names: Vec<(&str, bool, &Position)> = vec![];
    if let Some(receiver) = &decl.receiver {
        names.push((&receiver.name, false, &receiver.span.start));
    }
    for param in &decl.parameters {
        names.push((&param.name, param.mutable, &param.span.start));
    }

    for ((name, mutable, position), value) in names.into_iter().zip(function.get_params()) {
        value.set_name(name);
        let binding = bind_parameter(compiler, name, mutable, value, position)?;
        compiler.declare_variable(name, mutable, binding, position)?;
    }

    Ok(())
}

fn bind_parameter<'a>(
    compiler: &mut Compiler<'a>,
    name: &str,
    mutable: bool,
    value: BasicValueEnum<'a>,
    position: &Position,
) -> Result<Binding<'a>, Error> {
    let ty = value.get_type();

    if !mutable {
        return Ok(Binding {
            value,
            ptr: None,
            ty,
        });
    }

    let ptr = compiler.builder.build_alloca(ty, name).or_internal(position)?;
    compiler.builder.build_store(ptr, value).or_internal(position)?;
    let value = compiler.builder.build_load(ptr, name).or_internal(position)?;

    Ok(Binding {
        value,
        ptr: Some(ptr),
        ty,
    })
}

/// Adds the implicit `ret void`, or reports the missing return.
fn close_function<'a>(
    compiler: &mut Compiler<'a>,
    decl: &FnDecl,
    return_type: AnyTypeEnum<'a>,
) -> Result<(), Error> {
    if compiler.is_terminated() {
        return Ok(());
    }

    match return_type {
        AnyTypeEnum::VoidType(_) => {
            compiler
                .builder
                .build_return(None)
                .or_internal(&decl.span.start)?;
            Ok(())
        }
        _ => Err(Error::new(
            ErrorImpl::MissingReturn {
                function: decl.name.clone(),
            },
            decl.span.start.clone(),
        )),
    }
}
