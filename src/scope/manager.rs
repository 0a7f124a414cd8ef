//! Scope analysis results: scopes, the variables they declare, and the
//! references that resolve to them.

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::estree::Node;

/// Index of a scope in its [`ScopeManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a reference in its [`ScopeManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(u32);

impl ReferenceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Module,
    Function,
    FunctionExpressionName,
    Block,
    For,
    Switch,
    Catch,
    With,
    Class,
    ClassFieldInitializer,
    ClassStaticBlock,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Module => "module",
            Self::Function => "function",
            Self::FunctionExpressionName => "function-expression-name",
            Self::Block => "block",
            Self::For => "for",
            Self::Switch => "switch",
            Self::Catch => "catch",
            Self::With => "with",
            Self::Class => "class",
            Self::ClassFieldInitializer => "class-field-initializer",
            Self::ClassStaticBlock => "class-static-block",
        }
    }

    /// Scopes `var` declarations hoist to
    pub fn is_variable_scope(&self) -> bool {
        matches!(
            self,
            Self::Global
                | Self::Module
                | Self::Function
                | Self::ClassFieldInitializer
                | Self::ClassStaticBlock
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// `var`, `let`, `const` or `using` declarator
    Variable,
    Parameter,
    FunctionName,
    ClassName,
    ImportBinding,
    CatchClause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// Range of the declaring identifier
    pub name_range: TextRange,
    /// `var`/`let`/`const`/`using` for variable definitions
    pub declaration_kind: Option<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    pub defs: Vec<Definition>,
    pub references: Vec<ReferenceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFlag {
    Read,
    Write,
    ReadWrite,
}

impl ReferenceFlag {
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: SmolStr,
    pub range: TextRange,
    pub flag: ReferenceFlag,
    /// Scope the reference occurs in
    pub from: ScopeId,
    /// Scope declaring the variable it resolves to
    pub resolved: Option<ScopeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    /// Type of the node that opened the scope
    pub block_kind: SmolStr,
    pub block_range: TextRange,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub variables: IndexMap<SmolStr, Variable>,
    pub references: Vec<ReferenceId>,
    pub is_strict: bool,
    /// Whether `eval` or `with` can introduce bindings at run time
    pub dynamic: bool,
}

impl Scope {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }
}

/// Every scope of one program, root first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    references: Vec<Reference>,
    through: Vec<ReferenceId>,
}

impl ScopeManager {
    // =========================================================================
    // Queries
    // =========================================================================

    /// The root scope; `None` only for a manager nothing was analyzed into
    pub fn global_scope(&self) -> Option<&Scope> {
        self.scopes.first()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }

    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter()
    }

    /// References that resolve to no declaration
    pub fn through(&self) -> impl Iterator<Item = &Reference> {
        self.through.iter().map(|id| self.reference(*id))
    }

    /// The innermost scope opened by `node`
    pub fn acquire(&self, node: &Node) -> Option<&Scope> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.block_range == node.range && scope.block_kind == node.kind)
    }

    /// The variable a reference resolves to
    pub fn resolve(&self, reference: &Reference) -> Option<&Variable> {
        self.scope(reference.resolved?).variable(&reference.name)
    }

    /// Look `name` up from `scope` outwards
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<(&Scope, &Variable)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(variable) = scope.variable(name) {
                return Some((scope, variable));
            }
            current = scope.parent;
        }
        None
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub(super) fn push_scope(
        &mut self,
        kind: ScopeKind,
        block: &Node,
        parent: Option<ScopeId>,
        is_strict: bool,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            kind,
            block_kind: block.kind.clone(),
            block_range: block.range,
            parent,
            children: Vec::new(),
            variables: IndexMap::new(),
            references: Vec::new(),
            is_strict,
            dynamic: kind == ScopeKind::Global || kind == ScopeKind::With,
        });
        if let Some(parent) = parent {
            self.scopes[parent.index()].children.push(id);
        }
        id
    }

    pub(super) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub(super) fn declare(&mut self, scope: ScopeId, name: &str, definition: Definition) {
        let variable = self
            .scope_mut(scope)
            .variables
            .entry(SmolStr::new(name))
            .or_insert_with(|| Variable {
                name: SmolStr::new(name),
                defs: Vec::new(),
                references: Vec::new(),
            });
        variable.defs.push(definition);
    }

    pub(super) fn add_reference(
        &mut self,
        from: ScopeId,
        name: &str,
        range: TextRange,
        flag: ReferenceFlag,
    ) -> ReferenceId {
        let id = ReferenceId(self.references.len() as u32);
        self.references.push(Reference {
            name: SmolStr::new(name),
            range,
            flag,
            from,
            resolved: None,
        });
        self.scope_mut(from).references.push(id);
        id
    }

    /// Resolve every reference once all declarations are known
    pub(super) fn resolve_references(&mut self) {
        for index in 0..self.references.len() {
            let id = ReferenceId(index as u32);
            let (from, name) = {
                let reference = &self.references[index];
                (reference.from, reference.name.clone())
            };
            let declaring = self.lookup(from, &name).map(|(scope, _)| scope.id);
            match declaring {
                Some(scope) => {
                    self.references[index].resolved = Some(scope);
                    if let Some(variable) = self.scope_mut(scope).variables.get_mut(name.as_str()) {
                        variable.references.push(id);
                    }
                }
                None => self.through.push(id),
            }
        }
    }
}
