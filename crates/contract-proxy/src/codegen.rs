//! Code generation module
//!
//! Renders compiled member bodies as C# and wraps them in a sealed proxy
//! class that forwards to the wrapped implementation. Also renders the
//! abstract contract class stub the clauses are written in.

use contract_clauses::{Clause, CompiledMember, MemberBodyAssembler, MemberContext, Naming, ReturnType, Statement};
use std::fmt::Write as _;

use crate::error::Result;
use crate::interface::{to_clauses, InterfaceDecl, MemberDecl, MethodDecl, PropertyDecl};
use crate::naming::{contract_class_name, proxy_class_name};

const CHECKS_PLACEHOLDER: &str = "// Code contract checks here";

/// Which part of a member a compiled body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Method,
    Getter,
    Setter,
}

/// A member body produced during generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedBody {
    pub member: String,
    pub kind: BodyKind,
    pub compiled: CompiledMember,
}

/// C# proxy class generator
pub struct CodeGenerator {
    /// Indentation level for pretty-printing
    indent: usize,
    /// Output buffer
    output: String,
    assembler: MemberBodyAssembler,
    /// Bodies compiled so far, in member order
    bodies: Vec<GeneratedBody>,
}

impl CodeGenerator {
    pub fn new(naming: Naming) -> Self {
        Self {
            indent: 0,
            output: String::new(),
            assembler: MemberBodyAssembler::new(naming),
            bodies: Vec::new(),
        }
    }

    fn naming(&self) -> &Naming {
        self.assembler.naming()
    }

    /// Member bodies compiled by the last [`generate`](Self::generate) call
    pub fn bodies(&self) -> &[GeneratedBody] {
        &self.bodies
    }

    /// Generate the proxy class for an interface
    pub fn generate(&mut self, decl: &InterfaceDecl) -> Result<String> {
        self.reset();
        let class_name = proxy_class_name(&decl.interface, decl.contract_class.as_deref());

        self.open_namespace(decl)?;
        self.generate_class(&class_name, decl)?;
        self.close_namespace(decl);

        Ok(std::mem::take(&mut self.output))
    }

    /// Generate the abstract contract class stub for an interface.
    ///
    /// Members carry their clauses (or a placeholder comment) and non-void
    /// members return `default(T)`. No bodies are compiled.
    pub fn generate_contract_class(&mut self, decl: &InterfaceDecl) -> Result<String> {
        self.reset();
        let class_name = decl
            .contract_class
            .clone()
            .unwrap_or_else(|| contract_class_name(&decl.interface));

        self.open_namespace(decl)?;
        self.write_indent();
        writeln!(self.output, "internal abstract class {} : {}", class_name, decl.interface)?;
        self.open_block();

        for (i, member) in decl.members.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            match member {
                MemberDecl::Method(method) => {
                    let return_type = ReturnType::parse(&method.return_type);
                    self.write_indent();
                    writeln!(
                        self.output,
                        "public {} {}({})",
                        return_type,
                        method.name,
                        parameter_list(method)
                    )?;
                    self.generate_stub_body(&method.clauses, &return_type)?;
                }
                MemberDecl::Property(property) => self.generate_stub_property(property)?,
            }
        }

        self.close_block();
        self.close_namespace(decl);

        Ok(std::mem::take(&mut self.output))
    }

    /// Clear state left behind by an earlier (possibly failed) generation
    fn reset(&mut self) {
        self.output.clear();
        self.indent = 0;
        self.bodies.clear();
    }

    fn open_namespace(&mut self, decl: &InterfaceDecl) -> Result<()> {
        if let Some(namespace) = &decl.namespace {
            writeln!(self.output, "namespace {}", namespace)?;
            self.output.push_str("{\n");
            self.indent += 1;
        }
        Ok(())
    }

    fn close_namespace(&mut self, decl: &InterfaceDecl) {
        if decl.namespace.is_some() {
            self.indent -= 1;
            self.output.push_str("}\n");
        }
    }

    fn generate_class(&mut self, class_name: &str, decl: &InterfaceDecl) -> Result<()> {
        self.write_indent();
        writeln!(self.output, "public sealed class {} : {}", class_name, decl.interface)?;
        self.open_block();

        self.generate_constructor(class_name, &decl.interface)?;

        for member in &decl.members {
            self.output.push('\n');
            match member {
                MemberDecl::Method(method) => self.generate_method(method)?,
                MemberDecl::Property(property) => self.generate_property(property)?,
            }
        }

        self.close_block();
        Ok(())
    }

    /// Delegate field plus a constructor that receives the implementation
    fn generate_constructor(&mut self, class_name: &str, interface: &str) -> Result<()> {
        let field = self.naming().delegate_field.clone();
        let parameter = match field.trim_start_matches('_') {
            "" => "implementation".to_string(),
            trimmed => trimmed.to_string(),
        };

        self.write_indent();
        writeln!(self.output, "private readonly {} {};", interface, field)?;
        self.output.push('\n');

        self.write_indent();
        writeln!(self.output, "public {}({} {})", class_name, interface, parameter)?;
        self.open_block();
        self.write_indent();
        if parameter == field {
            writeln!(self.output, "this.{} = {};", field, parameter)?;
        } else {
            writeln!(self.output, "{} = {};", field, parameter)?;
        }
        self.close_block();
        Ok(())
    }

    fn generate_method(&mut self, method: &MethodDecl) -> Result<()> {
        let context = method.context(self.naming());
        let compiled = self.assembler.assemble(&context, &method.clauses())?;

        self.write_indent();
        writeln!(
            self.output,
            "public {} {}({})",
            context.return_type,
            method.name,
            parameter_list(method)
        )?;
        self.generate_body(&compiled)?;

        self.bodies.push(GeneratedBody {
            member: method.name.clone(),
            kind: BodyKind::Method,
            compiled,
        });
        Ok(())
    }

    fn generate_property(&mut self, property: &PropertyDecl) -> Result<()> {
        self.write_indent();
        writeln!(self.output, "public {} {}", property.type_name, property.name)?;
        self.open_block();

        if let Some(clauses) = &property.getter {
            let context = property.getter_context(self.naming());
            self.generate_accessor("get", BodyKind::Getter, &context, clauses)?;
        }
        if let Some(clauses) = &property.setter {
            let context = property.setter_context(self.naming());
            self.generate_accessor("set", BodyKind::Setter, &context, clauses)?;
        }

        self.close_block();
        Ok(())
    }

    fn generate_accessor(
        &mut self,
        keyword: &str,
        kind: BodyKind,
        context: &MemberContext,
        clauses: &[String],
    ) -> Result<()> {
        let compiled = self.assembler.assemble(context, &to_clauses(clauses))?;

        self.write_indent();
        writeln!(self.output, "{}", keyword)?;
        self.generate_body(&compiled)?;

        self.bodies.push(GeneratedBody {
            member: context.name.clone(),
            kind,
            compiled,
        });
        Ok(())
    }

    /// Generate a braced block holding the compiled statements
    fn generate_body(&mut self, compiled: &CompiledMember) -> Result<()> {
        self.open_block();
        for statement in compiled.statements() {
            self.generate_statement(statement)?;
        }
        self.close_block();
        Ok(())
    }

    fn generate_stub_property(&mut self, property: &PropertyDecl) -> Result<()> {
        self.write_indent();
        writeln!(self.output, "public {} {}", property.type_name, property.name)?;
        self.open_block();

        if let Some(clauses) = &property.getter {
            self.write_indent();
            self.output.push_str("get\n");
            self.generate_stub_body(clauses, &ReturnType::parse(&property.type_name))?;
        }
        if let Some(clauses) = &property.setter {
            self.write_indent();
            self.output.push_str("set\n");
            self.generate_stub_body(clauses, &ReturnType::Void)?;
        }

        self.close_block();
        Ok(())
    }

    /// Clause statements as written, then `return default(T);` when needed
    fn generate_stub_body(&mut self, clauses: &[String], return_type: &ReturnType) -> Result<()> {
        self.open_block();
        if clauses.is_empty() {
            self.write_indent();
            writeln!(self.output, "{}", CHECKS_PLACEHOLDER)?;
        }
        for clause in clauses {
            self.write_indent();
            writeln!(self.output, "{};", Clause::new(clause.as_str()).text())?;
        }
        if !return_type.is_void() {
            self.write_indent();
            writeln!(self.output, "return default({});", return_type)?;
        }
        self.close_block();
        Ok(())
    }

    fn generate_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Guard(guard) => {
                self.write_indent();
                writeln!(self.output, "if (!({}))", guard.condition)?;
                self.open_block();
                self.write_indent();
                writeln!(self.output, "throw new {}({});", guard.exception_type, guard.message)?;
                self.close_block();
            }
            // single-line statements share their Display form
            other => {
                self.write_indent();
                writeln!(self.output, "{}", other)?;
            }
        }
        Ok(())
    }

    fn open_block(&mut self) {
        self.write_indent();
        self.output.push_str("{\n");
        self.indent += 1;
    }

    fn close_block(&mut self) {
        self.indent -= 1;
        self.write_indent();
        self.output.push_str("}\n");
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }
}

fn parameter_list(method: &MethodDecl) -> String {
    method
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.type_name, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(Naming::default())
    }
}
