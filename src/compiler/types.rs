//! Lowering of type expressions to LLVM types, and the interface tables
//! built while doing so.

use std::collections::{HashMap, HashSet};

use inkwell::{
    types::{
        AnyType, AnyTypeEnum, BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FunctionType,
        StructType,
    },
    values::{BasicValueEnum, FunctionValue, GlobalValue},
    AddressSpace,
};

use crate::{
    ast::{
        ast::TypeExpr,
        types::{InterfaceTypeExpr, Param, PrimitiveKind, StructTypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::compiler::Compiler;

/// Return type and parameter types of a method, receiver excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature<'a> {
    pub return_type: AnyTypeEnum<'a>,
    pub parameters: Vec<BasicTypeEnum<'a>>,
}

/// An interface declaration and its synthesized vtable.
///
/// There is one vtable per interface; every conforming method of every
/// receiver type is appended to it as the next slot.
#[derive(Debug)]
pub struct Interface<'a> {
    pub name: String,
    pub methods: HashMap<String, Signature<'a>>,
    /// `<Name>_VTable_Type`, opaque until the compiler is finished
    pub vtable_type: StructType<'a>,
    /// `<Name>_VTable_Data`
    pub vtable_data: GlobalValue<'a>,
    pub slots: Vec<FunctionValue<'a>>,
    implementors: HashMap<String, HashSet<String>>,
}

impl<'a> Interface<'a> {
    pub fn add_slot(&mut self, type_name: &str, method: &str, function: FunctionValue<'a>) {
        self.slots.push(function);
        self.implementors
            .entry(String::from(type_name))
            .or_default()
            .insert(String::from(method));
    }

    pub fn is_implemented_by(&self, type_name: &str) -> bool {
        self.implementors
            .get(type_name)
            .map(|implemented| self.methods.keys().all(|name| implemented.contains(name)))
            .unwrap_or(false)
    }

    /// Sets the vtable body to one function pointer per slot and fills the
    /// data global with the slot functions.
    pub fn close_vtable(&self) {
        let slot_types: Vec<BasicTypeEnum> = self
            .slots
            .iter()
            .map(|function| function.get_type().ptr_type(AddressSpace::default()).into())
            .collect();
        self.vtable_type.set_body(&slot_types, false);

        let slot_values: Vec<BasicValueEnum> = self
            .slots
            .iter()
            .map(|function| function.as_global_value().as_pointer_value().into())
            .collect();
        self.vtable_data
            .set_initializer(&self.vtable_type.const_named_struct(&slot_values));
    }
}

pub fn type_name<'a>(ty: impl AnyType<'a>) -> String {
    ty.print_to_string().to_string()
}

/// Lowers a type expression. Struct and interface bodies are registered
/// under `compiler.current_type_name` when one is set.
pub fn lower_type<'a>(
    compiler: &mut Compiler<'a>,
    ty: &TypeExpr,
) -> Result<AnyTypeEnum<'a>, Error> {
    let context = compiler.context;

    match ty {
        TypeExpr::Primitive(primitive) => Ok(match primitive.kind {
            PrimitiveKind::I64 | PrimitiveKind::U64 => context.i64_type().into(),
            PrimitiveKind::I32 | PrimitiveKind::U32 => context.i32_type().into(),
            PrimitiveKind::I16 | PrimitiveKind::U16 => context.i16_type().into(),
            PrimitiveKind::I8 | PrimitiveKind::U8 => context.i8_type().into(),
            PrimitiveKind::F64 => context.f64_type().into(),
            PrimitiveKind::F32 => context.f32_type().into(),
            PrimitiveKind::Bool => context.bool_type().into(),
            PrimitiveKind::Void => context.void_type().into(),
        }),
        TypeExpr::Pointer(pointer) => {
            // `type P struct {...}*` names the pointer, not the pointee
            compiler.current_type_name = None;
            let pointee = lower_type(compiler, &pointer.pointee)?;

            // LLVM has no void*
            let pointee = match pointee {
                AnyTypeEnum::VoidType(_) => context.i8_type().as_basic_type_enum(),
                other => to_basic_type(other, &pointer.span.start)?,
            };

            Ok(pointee.ptr_type(AddressSpace::default()).into())
        }
        TypeExpr::Named(named) => compiler
            .named_types
            .get(&named.name)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownType {
                        type_: named.name.clone(),
                    },
                    named.span.start.clone(),
                )
            }),
        TypeExpr::Struct(structure) => lower_struct_type(compiler, structure),
        TypeExpr::Interface(interface) => lower_interface_type(compiler, interface),
    }
}

/// Like [`lower_type`] but rejects `void`.
pub fn lower_basic_type<'a>(
    compiler: &mut Compiler<'a>,
    ty: &TypeExpr,
) -> Result<BasicTypeEnum<'a>, Error> {
    let lowered = lower_type(compiler, ty)?;
    to_basic_type(lowered, &ty.get_span().start)
}

pub fn to_basic_type<'a>(
    ty: AnyTypeEnum<'a>,
    position: &Position,
) -> Result<BasicTypeEnum<'a>, Error> {
    match ty {
        AnyTypeEnum::VoidType(_) => Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: String::from("a value type"),
                received: String::from("void"),
            },
            position.clone(),
        )),
        other => BasicTypeEnum::try_from(other).map_err(|_| {
            Error::new(
                ErrorImpl::InternalError {
                    message: format!("`{}` is not a first-class type", type_name(other)),
                },
                position.clone(),
            )
        }),
    }
}

/// Builds `return_type (parameters...)`.
pub fn function_type<'a>(
    return_type: AnyTypeEnum<'a>,
    parameters: &[BasicTypeEnum<'a>],
    position: &Position,
) -> Result<FunctionType<'a>, Error> {
    let parameters: Vec<BasicMetadataTypeEnum> =
        parameters.iter().map(|ty| (*ty).into()).collect();

    match return_type {
        AnyTypeEnum::VoidType(void) => Ok(void.fn_type(&parameters, false)),
        other => Ok(to_basic_type(other, position)?.fn_type(&parameters, false)),
    }
}

pub fn lower_signature<'a>(
    compiler: &mut Compiler<'a>,
    parameters: &[Param],
    return_type: &TypeExpr,
) -> Result<Signature<'a>, Error> {
    let return_type = lower_type(compiler, return_type)?;

    let mut lowered = Vec::with_capacity(parameters.len());
    for param in parameters {
        lowered.push(lower_basic_type(compiler, &param.ty)?);
    }

    Ok(Signature {
        return_type,
        parameters: lowered,
    })
}

fn lower_struct_fields<'a>(
    compiler: &mut Compiler<'a>,
    structure: &StructTypeExpr,
) -> Result<Vec<BasicTypeEnum<'a>>, Error> {
    let mut fields = vec![];

    for property in &structure.properties {
        let ty = lower_basic_type(compiler, &property.ty)?;

        // Only a struct still being lowered is opaque here
        if let BasicTypeEnum::StructType(inner) = ty {
            if inner.is_opaque() {
                return Err(Error::new(
                    ErrorImpl::UnsupportedNode {
                        node: format!("struct {} containing itself", type_name(inner)),
                    },
                    property.span.start.clone(),
                ));
            }
        }

        fields.extend(property.names.iter().map(|_| ty));
    }

    Ok(fields)
}

fn lower_struct_type<'a>(
    compiler: &mut Compiler<'a>,
    structure: &StructTypeExpr,
) -> Result<AnyTypeEnum<'a>, Error> {
    let Some(name) = compiler.current_type_name.take() else {
        let fields = lower_struct_fields(compiler, structure)?;
        return Ok(compiler.context.struct_type(&fields, false).into());
    };

    // Registered before the fields are lowered
    let struct_type = compiler.context.opaque_struct_type(&name);
    compiler
        .named_types
        .insert(name.clone(), struct_type.into());
    compiler.struct_fields.insert(
        name,
        structure
            .field_names()
            .into_iter()
            .map(String::from)
            .collect(),
    );

    let fields = lower_struct_fields(compiler, structure)?;
    struct_type.set_body(&fields, false);

    Ok(struct_type.into())
}

/// `type N interface {...}` yields the opaque `N_VTable_Type`, the global
/// `N_VTable_Data` and the instance struct `N { N_VTable_Type* }`.
fn lower_interface_type<'a>(
    compiler: &mut Compiler<'a>,
    interface: &InterfaceTypeExpr,
) -> Result<AnyTypeEnum<'a>, Error> {
    let Some(name) = compiler.current_type_name.take() else {
        return Err(Error::new(
            ErrorImpl::UnsupportedNode {
                node: String::from("anonymous interface"),
            },
            interface.span.start.clone(),
        ));
    };

    let context = compiler.context;

    let vtable_type = context.opaque_struct_type(&format!("{}_VTable_Type", name));
    let vtable_data = compiler
        .module
        .add_global(vtable_type, None, &format!("{}_VTable_Data", name));
    vtable_data.set_constant(true);

    let instance = context.opaque_struct_type(&name);
    instance.set_body(
        &[vtable_type.ptr_type(AddressSpace::default()).into()],
        false,
    );
    compiler.named_types.insert(name.clone(), instance.into());

    let mut methods = HashMap::new();
    for method in &interface.methods {
        let signature = lower_signature(compiler, &method.parameters, &method.return_type)?;
        methods.insert(method.name.clone(), signature);
    }

    compiler.interfaces.push(Interface {
        name,
        methods,
        vtable_type,
        vtable_data,
        slots: vec![],
        implementors: HashMap::new(),
    });

    Ok(instance.into())
}
