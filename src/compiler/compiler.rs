//! Main compiler module.
//!
//! This module contains the core Compiler structure and drives the
//! single pass from top-level declarations to an LLVM module. It owns the
//! LLVM context handles, the type registries, the interface vtables and the
//! block scopes used for name lookup.

use std::{collections::HashMap, fmt::Display, path::Path, rc::Rc};

use inkwell::{
    builder::Builder,
    context::Context,
    module::Module,
    types::{AnyTypeEnum, BasicTypeEnum},
    values::{BasicValueEnum, FunctionValue, PointerValue},
};

use crate::{
    ast::ast::Decl,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    stmt::gen_decl,
    types::{Interface, Signature},
};

/// Maps any displayable failure (LLVM builder errors, verifier messages)
/// onto an `InternalError` at the given position.
pub trait InternalResult<T> {
    fn or_internal(self, position: &Position) -> Result<T, Error>;
}

impl<T, E: Display> InternalResult<T> for Result<T, E> {
    fn or_internal(self, position: &Position) -> Result<T, Error> {
        self.map_err(|error| {
            Error::new(
                ErrorImpl::InternalError {
                    message: error.to_string(),
                },
                position.clone(),
            )
        })
    }
}

/// A name bound in a block.
///
/// `value` is the most recent SSA value of the binding. Mutable bindings
/// also carry the stack slot they were loaded from.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub value: BasicValueEnum<'a>,
    pub ptr: Option<PointerValue<'a>>,
    pub ty: BasicTypeEnum<'a>,
}

/// Names declared directly inside one block statement.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    pub constants: HashMap<String, Binding<'a>>,
    pub mutables: HashMap<String, Binding<'a>>,
    pub parent: Option<i32>,
}

/// The function whose body is being lowered.
#[derive(Debug, Clone, Copy)]
pub struct FunctionContext<'a> {
    pub value: FunctionValue<'a>,
    pub return_type: AnyTypeEnum<'a>,
}

/// The main compiler structure that holds the state of the compilation process.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct Compiler<'a> {
    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,

    /// Declared type names and what they lowered to
    pub named_types: HashMap<String, AnyTypeEnum<'a>>,
    /// Property names of each named struct, in field order
    pub struct_fields: HashMap<String, Vec<String>>,
    /// Interfaces in declaration order
    pub interfaces: Vec<Interface<'a>>,
    /// Name of the `type` declaration currently being lowered
    pub current_type_name: Option<String>,

    /// Scopes by block statement id
    pub scopes: HashMap<i32, Scope<'a>>,
    pub current_scope: Option<i32>,
    pub current_function: Option<FunctionContext<'a>>,

    file: Rc<String>,
    finished: bool,
}

impl<'a> Compiler<'a> {
    /// Creates a new Compiler instance with an empty module named after
    /// `file_name`.
    pub fn new(context: &'a Context, file_name: &str) -> Self {
        Compiler {
            context,
            module: context.create_module(file_name),
            builder: context.create_builder(),
            named_types: HashMap::new(),
            struct_fields: HashMap::new(),
            interfaces: Vec::new(),
            current_type_name: None,
            scopes: HashMap::new(),
            current_scope: None,
            current_function: None,
            file: Rc::new(String::from(file_name)),
            finished: false,
        }
    }

    /// Lowers every declaration in order. Types must be declared before use,
    /// so the order of `decls` is significant.
    pub fn lower_decls(&mut self, decls: &[Decl]) -> Result<(), Error> {
        for decl in decls {
            gen_decl(self, decl)?;
        }

        Ok(())
    }

    /// Closes every interface vtable and verifies the module.
    ///
    /// The vtable bodies are only known once every method has been lowered,
    /// and LLVM only lets a named struct body be set once, so the slots are
    /// materialized here.
    pub fn finish(&mut self) -> Result<(), Error> {
        if !self.finished {
            for interface in &self.interfaces {
                interface.close_vtable();
            }
            self.finished = true;
        }

        self.module
            .verify()
            .or_internal(&Position::new(0, 0, self.file.clone()))
    }

    /// Whether `type_name` has a conforming method for every method of
    /// `interface_name`.
    pub fn conforms(&self, type_name: &str, interface_name: &str) -> bool {
        self.get_interface(interface_name)
            .map(|interface| interface.is_implemented_by(type_name))
            .unwrap_or(false)
    }

    pub fn get_interface(&self, name: &str) -> Option<&Interface<'a>> {
        self.interfaces
            .iter()
            .find(|interface| interface.name == name)
    }

    /// Indices of the interfaces declaring a method `name` with exactly this
    /// signature.
    pub fn conforming_interfaces(&self, name: &str, signature: &Signature<'a>) -> Vec<usize> {
        self.interfaces
            .iter()
            .enumerate()
            .filter(|(_, interface)| interface.methods.get(name) == Some(signature))
            .map(|(index, _)| index)
            .collect()
    }

    /// Opens the scope of block `id` as a child of the current one and
    /// returns the scope to restore afterwards.
    pub fn enter_scope(&mut self, id: i32) -> Option<i32> {
        let parent = self.current_scope;
        self.scopes.insert(
            id,
            Scope {
                parent,
                ..Scope::default()
            },
        );
        self.current_scope = Some(id);
        parent
    }

    pub fn exit_scope(&mut self, previous: Option<i32>) {
        self.current_scope = previous;
    }

    pub fn declare_variable(
        &mut self,
        name: &str,
        mutable: bool,
        binding: Binding<'a>,
        position: &Position,
    ) -> Result<(), Error> {
        let Some(scope) = self
            .current_scope
            .and_then(|id| self.scopes.get_mut(&id))
        else {
            return Err(Error::new(
                ErrorImpl::InternalError {
                    message: format!("no open scope to declare `{}` in", name),
                },
                position.clone(),
            ));
        };

        if scope.constants.contains_key(name) || scope.mutables.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: String::from(name),
                },
                position.clone(),
            ));
        }

        let map = if mutable {
            &mut scope.mutables
        } else {
            &mut scope.constants
        };
        map.insert(String::from(name), binding);

        Ok(())
    }

    /// Resolves `name` from the current block outwards. Returns the id of
    /// the declaring scope, whether the binding is mutable, and the binding.
    pub fn lookup_variable(&self, name: &str) -> Option<(i32, bool, Binding<'a>)> {
        let mut current = self.current_scope;

        while let Some(id) = current {
            let scope = self.scopes.get(&id)?;

            if let Some(binding) = scope.constants.get(name) {
                return Some((id, false, *binding));
            }
            if let Some(binding) = scope.mutables.get(name) {
                return Some((id, true, *binding));
            }

            current = scope.parent;
        }

        None
    }

    /// Replaces the SSA value of a mutable binding after a store.
    pub fn rebind_variable(&mut self, scope_id: i32, name: &str, value: BasicValueEnum<'a>) {
        if let Some(binding) = self
            .scopes
            .get_mut(&scope_id)
            .and_then(|scope| scope.mutables.get_mut(name))
        {
            binding.value = value;
        }
    }

    /// Whether the block being appended to already ends in a terminator.
    pub fn is_terminated(&self) -> bool {
        self.builder
            .get_insert_block()
            .and_then(|block| block.get_terminator())
            .is_some()
    }

    /// Textual IR of the module.
    pub fn print_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Saves the current LLVM module to a file.
    pub fn save_module_to_file(&self, output_file: &Path) -> Result<(), String> {
        self.module
            .print_to_file(output_file)
            .map_err(|error| error.to_string())
    }
}

/// Lowers `decls` into a fresh module named `file_name` and verifies it.
pub fn compile<'a>(
    decls: &[Decl],
    file_name: &str,
    context: &'a Context,
) -> Result<Compiler<'a>, Error> {
    let mut compiler = Compiler::new(context, file_name);

    compiler.lower_decls(decls)?;
    compiler.finish()?;

    Ok(compiler)
}
