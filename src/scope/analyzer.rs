//! The built-in binding analyzer.
//!
//! One pre-order walk declares every binding in the scope that owns it and
//! records every identifier read or write as a reference. References are
//! resolved after the walk, so hoisted declarations are visible before
//! their position in the text.

use super::manager::{Definition, DefinitionKind, ReferenceFlag, ScopeId, ScopeKind, ScopeManager};
use super::{Fallback, ScopeAnalyzer, ScopeError, ScopeOptions};
use crate::convert::{ElementKind, element_kind};
use crate::estree::{Node, VisitorKeys};

/// Declares bindings and resolves references over an ESTree `Program`
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingAnalyzer;

impl ScopeAnalyzer for BindingAnalyzer {
    type Output = ScopeManager;

    fn analyze(&self, program: &Node, options: &ScopeOptions) -> Result<ScopeManager, ScopeError> {
        if !program.is("Program") {
            return Err(ScopeError::InvalidTree(format!(
                "expected a `Program`, found `{}`",
                program.kind
            )));
        }

        let builtin;
        let keys = match &options.visitor_keys {
            Some(keys) => keys,
            None => {
                builtin = VisitorKeys::estree();
                &builtin
            }
        };

        let mut walker = Walker {
            keys,
            options,
            manager: ScopeManager::default(),
            current: None,
        };
        walker.program(program)?;

        let mut manager = walker.manager;
        manager.resolve_references();
        tracing::debug!(
            scopes = manager.scopes().count(),
            through = manager.through().count(),
            "scope analysis finished"
        );
        Ok(manager)
    }
}

struct Walker<'k> {
    keys: &'k VisitorKeys,
    options: &'k ScopeOptions,
    manager: ScopeManager,
    current: Option<ScopeId>,
}

/// Whether a statement list opens with a `"use strict"` directive
fn has_use_strict<'n>(body: impl Iterator<Item = &'n Node>) -> bool {
    body.map_while(|statement| statement.str_field("directive"))
        .any(|directive| directive == "use strict")
}

impl<'k> Walker<'k> {
    // =========================================================================
    // Scope stack
    // =========================================================================

    fn scope(&self) -> Result<ScopeId, ScopeError> {
        self.current
            .ok_or_else(|| ScopeError::InvalidTree("node visited outside any scope".to_string()))
    }

    fn is_strict(&self) -> bool {
        self.current
            .is_some_and(|id| self.manager.scope(id).is_strict)
    }

    fn enter(&mut self, kind: ScopeKind, block: &Node, strict: bool) {
        let strict = strict || self.is_strict() || self.options.implied_strict;
        let id = self.manager.push_scope(kind, block, self.current, strict);
        tracing::trace!(kind = kind.as_str(), block = %block.kind, "enter scope");
        self.current = Some(id);
    }

    fn leave(&mut self) {
        self.current = self
            .current
            .and_then(|id| self.manager.scope(id).parent);
    }

    /// The scope `var` declarations land in
    fn variable_scope(&self) -> Result<ScopeId, ScopeError> {
        let mut id = self.scope()?;
        loop {
            let scope = self.manager.scope(id);
            if scope.kind.is_variable_scope() {
                return Ok(id);
            }
            match scope.parent {
                Some(parent) => id = parent,
                None => return Ok(id),
            }
        }
    }

    /// Run `body` inside a block-level scope; before ES2015 it runs in the
    /// enclosing scope instead
    fn in_block(
        &mut self,
        kind: ScopeKind,
        block: &Node,
        body: impl FnOnce(&mut Self) -> Result<(), ScopeError>,
    ) -> Result<(), ScopeError> {
        if !self.options.is_es6() {
            return body(self);
        }
        self.enter(kind, block, false);
        let result = body(self);
        self.leave();
        result
    }

    // =========================================================================
    // Declarations and references
    // =========================================================================

    fn declare(
        &mut self,
        scope: ScopeId,
        name: &Node,
        kind: DefinitionKind,
        declaration_kind: Option<&str>,
    ) {
        if let Some(text) = name.str_field("name") {
            self.manager.declare(
                scope,
                text,
                Definition {
                    kind,
                    name_range: name.range,
                    declaration_kind: declaration_kind.map(Into::into),
                },
            );
        }
    }

    fn reference(&mut self, identifier: &Node, flag: ReferenceFlag) -> Result<(), ScopeError> {
        let scope = self.scope()?;
        if let Some(name) = identifier.str_field("name") {
            self.manager.add_reference(scope, name, identifier.range, flag);
        }
        Ok(())
    }

    /// Declare every identifier bound by a pattern, visiting defaults and
    /// computed keys as expressions
    fn bind_pattern(
        &mut self,
        pattern: &Node,
        scope: ScopeId,
        kind: DefinitionKind,
        declaration_kind: Option<&str>,
    ) -> Result<(), ScopeError> {
        match pattern.kind.as_str() {
            "Identifier" => self.declare(scope, pattern, kind, declaration_kind),
            "ObjectPattern" => {
                for property in pattern.children("properties") {
                    if property.is("RestElement") {
                        self.bind_pattern(property, scope, kind, declaration_kind)?;
                        continue;
                    }
                    if property.bool_field("computed") {
                        self.visit_child(property, "key")?;
                    }
                    if let Some(value) = property.child("value") {
                        self.bind_pattern(value, scope, kind, declaration_kind)?;
                    }
                }
            }
            "ArrayPattern" => {
                for element in pattern.children("elements") {
                    self.bind_pattern(element, scope, kind, declaration_kind)?;
                }
            }
            "RestElement" => {
                if let Some(argument) = pattern.child("argument") {
                    self.bind_pattern(argument, scope, kind, declaration_kind)?;
                }
            }
            "AssignmentPattern" => {
                if let Some(left) = pattern.child("left") {
                    self.bind_pattern(left, scope, kind, declaration_kind)?;
                }
                self.visit_child(pattern, "right")?;
            }
            _ => self.visit(pattern)?,
        }
        Ok(())
    }

    /// Record writes to every identifier an assignment target names
    fn assign_pattern(&mut self, pattern: &Node, flag: ReferenceFlag) -> Result<(), ScopeError> {
        match pattern.kind.as_str() {
            "Identifier" => self.reference(pattern, flag)?,
            "ObjectPattern" => {
                for property in pattern.children("properties") {
                    if property.is("RestElement") {
                        self.assign_pattern(property, flag)?;
                        continue;
                    }
                    if property.bool_field("computed") {
                        self.visit_child(property, "key")?;
                    }
                    if let Some(value) = property.child("value") {
                        self.assign_pattern(value, flag)?;
                    }
                }
            }
            "ArrayPattern" => {
                for element in pattern.children("elements") {
                    self.assign_pattern(element, flag)?;
                }
            }
            "RestElement" => {
                if let Some(argument) = pattern.child("argument") {
                    self.assign_pattern(argument, flag)?;
                }
            }
            "AssignmentPattern" => {
                if let Some(left) = pattern.child("left") {
                    self.assign_pattern(left, flag)?;
                }
                self.visit_child(pattern, "right")?;
            }
            _ => self.visit(pattern)?,
        }
        Ok(())
    }

    /// Record writes to the identifiers a declaration binds.
    ///
    /// Defaults and computed keys are left to [`Self::bind_pattern`], which
    /// has already visited them.
    fn write_bindings(&mut self, pattern: &Node) -> Result<(), ScopeError> {
        match pattern.kind.as_str() {
            "Identifier" => self.reference(pattern, ReferenceFlag::Write),
            "ObjectPattern" => {
                for property in pattern.children("properties") {
                    let target = if property.is("RestElement") {
                        Some(property)
                    } else {
                        property.child("value")
                    };
                    if let Some(target) = target {
                        self.write_bindings(target)?;
                    }
                }
                Ok(())
            }
            "ArrayPattern" => {
                for element in pattern.children("elements") {
                    self.write_bindings(element)?;
                }
                Ok(())
            }
            "RestElement" => match pattern.child("argument") {
                Some(argument) => self.write_bindings(argument),
                None => Ok(()),
            },
            "AssignmentPattern" => match pattern.child("left") {
                Some(left) => self.write_bindings(left),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    fn program(&mut self, program: &Node) -> Result<(), ScopeError> {
        let strict = has_use_strict(program.children("body"));
        self.enter(ScopeKind::Global, program, false);
        if self.options.nodejs_scope {
            self.enter(ScopeKind::Function, program, strict);
        } else if self.options.source_type.is_module() && self.options.is_es6() {
            self.enter(ScopeKind::Module, program, true);
        } else if strict {
            if let Some(global) = self.current {
                self.manager.scope_mut(global).is_strict = true;
            }
        }
        self.visit_all(program, "body")
    }

    fn visit_child(&mut self, node: &Node, field: &str) -> Result<(), ScopeError> {
        match node.child(field) {
            Some(child) => self.visit(child),
            None => Ok(()),
        }
    }

    fn visit_all(&mut self, node: &Node, field: &str) -> Result<(), ScopeError> {
        for child in node.children(field) {
            self.visit(child)?;
        }
        Ok(())
    }

    /// Visit the children named by the visitor keys
    fn visit_children(&mut self, node: &Node) -> Result<(), ScopeError> {
        match self.keys.get(&node.kind) {
            Some(fields) => {
                for field in fields {
                    if let Some(value) = node.get(field) {
                        for child in value.nodes() {
                            self.visit(child)?;
                        }
                    }
                }
                Ok(())
            }
            None => match self.options.fallback {
                Fallback::Iteration => {
                    for child in node.child_nodes() {
                        self.visit(child)?;
                    }
                    Ok(())
                }
                Fallback::None => Err(ScopeError::unknown(&node.kind)),
            },
        }
    }

    fn visit(&mut self, node: &Node) -> Result<(), ScopeError> {
        match node.kind.as_str() {
            "Identifier" => self.reference(node, ReferenceFlag::Read),

            "FunctionDeclaration" => {
                if let Some(id) = node.child("id") {
                    let scope = self.scope()?;
                    self.declare(scope, id, DefinitionKind::FunctionName, None);
                }
                self.function(node)
            }
            "FunctionExpression" => match node.child("id") {
                Some(id) => {
                    self.enter(ScopeKind::FunctionExpressionName, node, false);
                    let scope = self.scope()?;
                    self.declare(scope, id, DefinitionKind::FunctionName, None);
                    let result = self.function(node);
                    self.leave();
                    result
                }
                None => self.function(node),
            },
            "ArrowFunctionExpression" => self.function(node),

            "ClassDeclaration" => {
                if let Some(id) = node.child("id") {
                    let scope = self.scope()?;
                    self.declare(scope, id, DefinitionKind::ClassName, None);
                }
                self.class(node)
            }
            "ClassExpression" => self.class(node),
            "MethodDefinition" | "Property" => {
                if node.bool_field("computed") {
                    self.visit_child(node, "key")?;
                }
                self.visit_child(node, "value")
            }
            "PropertyDefinition" | "AccessorProperty" => {
                if node.bool_field("computed") {
                    self.visit_child(node, "key")?;
                }
                match node.child("value") {
                    Some(value) => {
                        self.enter(ScopeKind::ClassFieldInitializer, value, true);
                        let result = self.visit(value);
                        self.leave();
                        result
                    }
                    None => Ok(()),
                }
            }
            "StaticBlock" => {
                self.enter(ScopeKind::ClassStaticBlock, node, true);
                let result = self.visit_all(node, "body");
                self.leave();
                result
            }

            "VariableDeclaration" => self.variable_declaration(node),
            "BlockStatement" => {
                self.in_block(ScopeKind::Block, node, |walker| walker.visit_all(node, "body"))
            }
            "ForStatement" => {
                let scoped = node.child("init").is_some_and(is_lexical_declaration);
                self.maybe_block(scoped, ScopeKind::For, node, |walker| {
                    walker.visit_child(node, "init")?;
                    walker.visit_child(node, "test")?;
                    walker.visit_child(node, "update")?;
                    walker.visit_child(node, "body")
                })
            }
            "ForInStatement" | "ForOfStatement" => {
                let scoped = node.child("left").is_some_and(is_lexical_declaration);
                self.maybe_block(scoped, ScopeKind::For, node, |walker| {
                    if let Some(left) = node.child("left") {
                        if left.is("VariableDeclaration") {
                            walker.variable_declaration(left)?;
                            for declarator in left.children("declarations") {
                                if let Some(id) = declarator.child("id") {
                                    walker.write_bindings(id)?;
                                }
                            }
                        } else {
                            walker.assign_pattern(left, ReferenceFlag::Write)?;
                        }
                    }
                    walker.visit_child(node, "right")?;
                    walker.visit_child(node, "body")
                })
            }
            "SwitchStatement" => {
                self.visit_child(node, "discriminant")?;
                self.in_block(ScopeKind::Switch, node, |walker| walker.visit_all(node, "cases"))
            }
            "CatchClause" => {
                self.enter(ScopeKind::Catch, node, false);
                let result = self.catch_clause(node);
                self.leave();
                result
            }
            "WithStatement" => {
                self.visit_child(node, "object")?;
                self.enter(ScopeKind::With, node, false);
                let result = self.visit_child(node, "body");
                self.leave();
                result
            }

            "ImportDeclaration" => {
                let scope = self.scope()?;
                for specifier in node.children("specifiers") {
                    if let Some(local) = specifier.child("local") {
                        self.declare(scope, local, DefinitionKind::ImportBinding, None);
                    }
                }
                Ok(())
            }
            "ExportNamedDeclaration" => {
                if let Some(declaration) = node.child("declaration") {
                    return self.visit(declaration);
                }
                if node.child("source").is_none() {
                    for specifier in node.children("specifiers") {
                        if let Some(local) = specifier.child("local") {
                            self.visit(local)?;
                        }
                    }
                }
                Ok(())
            }
            "ExportAllDeclaration" => Ok(()),

            "AssignmentExpression" => {
                if let Some(left) = node.child("left") {
                    let flag = if node.str_field("operator") == Some("=") {
                        ReferenceFlag::Write
                    } else {
                        ReferenceFlag::ReadWrite
                    };
                    self.assign_pattern(left, flag)?;
                }
                self.visit_child(node, "right")
            }
            "UpdateExpression" => match node.child("argument") {
                Some(argument) if argument.is("Identifier") => {
                    self.reference(argument, ReferenceFlag::ReadWrite)
                }
                _ => self.visit_child(node, "argument"),
            },
            "CallExpression" => {
                let direct_eval = node
                    .child("callee")
                    .is_some_and(|callee| callee.is("Identifier") && callee.str_field("name") == Some("eval"));
                if direct_eval && !self.options.ignore_eval {
                    self.mark_dynamic()?;
                }
                self.visit_children(node)
            }
            "MemberExpression" => {
                self.visit_child(node, "object")?;
                if node.bool_field("computed") {
                    self.visit_child(node, "property")?;
                }
                Ok(())
            }
            "LabeledStatement" => self.visit_child(node, "body"),
            "BreakStatement" | "ContinueStatement" | "MetaProperty" | "PrivateIdentifier" => Ok(()),

            "JSXOpeningElement" => {
                if let Some(name) = node.child("name") {
                    self.jsx_name(name)?;
                }
                self.visit_all(node, "attributes")
            }
            "JSXClosingElement" => Ok(()),
            "JSXAttribute" => self.visit_child(node, "value"),

            _ => self.visit_children(node),
        }
    }

    fn maybe_block(
        &mut self,
        scoped: bool,
        kind: ScopeKind,
        block: &Node,
        body: impl FnOnce(&mut Self) -> Result<(), ScopeError>,
    ) -> Result<(), ScopeError> {
        if scoped {
            self.in_block(kind, block, body)
        } else {
            body(self)
        }
    }

    fn function(&mut self, node: &Node) -> Result<(), ScopeError> {
        let body = node.child("body");
        let strict = body.is_some_and(|body| {
            body.is("BlockStatement") && has_use_strict(body.children("body"))
        });
        self.enter(ScopeKind::Function, node, strict);
        let result = self.function_contents(node, body);
        self.leave();
        result
    }

    fn function_contents(&mut self, node: &Node, body: Option<&Node>) -> Result<(), ScopeError> {
        let scope = self.scope()?;
        for param in node.children("params") {
            self.bind_pattern(param, scope, DefinitionKind::Parameter, None)?;
        }
        match body {
            // The body block shares the function scope
            Some(body) if body.is("BlockStatement") => self.visit_all(body, "body"),
            Some(body) => self.visit(body),
            None => Ok(()),
        }
    }

    fn class(&mut self, node: &Node) -> Result<(), ScopeError> {
        self.visit_child(node, "superClass")?;
        self.enter(ScopeKind::Class, node, true);
        let result = self.class_contents(node);
        self.leave();
        result
    }

    fn class_contents(&mut self, node: &Node) -> Result<(), ScopeError> {
        if let Some(id) = node.child("id") {
            let scope = self.scope()?;
            self.declare(scope, id, DefinitionKind::ClassName, None);
        }
        match node.child("body") {
            Some(body) => self.visit_all(body, "body"),
            None => Ok(()),
        }
    }

    fn catch_clause(&mut self, node: &Node) -> Result<(), ScopeError> {
        if let Some(param) = node.child("param") {
            let scope = self.scope()?;
            self.bind_pattern(param, scope, DefinitionKind::CatchClause, None)?;
        }
        self.visit_child(node, "body")
    }

    fn variable_declaration(&mut self, node: &Node) -> Result<(), ScopeError> {
        let kind = node.str_field("kind").unwrap_or("var");
        let scope = if kind == "var" {
            self.variable_scope()?
        } else {
            self.scope()?
        };
        for declarator in node.children("declarations") {
            let Some(id) = declarator.child("id") else {
                continue;
            };
            self.bind_pattern(id, scope, DefinitionKind::Variable, Some(kind))?;
            if let Some(init) = declarator.child("init") {
                self.write_bindings(id)?;
                self.visit(init)?;
            }
        }
        Ok(())
    }

    /// `<Foo>` and `<ui.Button>` read a binding; `<div>` does not
    fn jsx_name(&mut self, name: &Node) -> Result<(), ScopeError> {
        match name.kind.as_str() {
            "JSXIdentifier" if element_kind(name) == ElementKind::Component => {
                self.reference(name, ReferenceFlag::Read)
            }
            "JSXMemberExpression" => match name.child("object") {
                Some(object) if object.is("JSXIdentifier") => {
                    self.reference(object, ReferenceFlag::Read)
                }
                Some(object) => self.jsx_name(object),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// A direct `eval` can declare into every enclosing scope
    fn mark_dynamic(&mut self) -> Result<(), ScopeError> {
        let mut current = Some(self.scope()?);
        while let Some(id) = current {
            let scope = self.manager.scope_mut(id);
            scope.dynamic = true;
            current = scope.parent;
        }
        Ok(())
    }
}

fn is_lexical_declaration(node: &Node) -> bool {
    node.is("VariableDeclaration") && node.str_field("kind") != Some("var")
}
