//! In-memory project model.
//!
//! Parsing extracts everything later phases need into owned data, so the
//! oxc arena of each file can be dropped right after that file is parsed.

use std::path::PathBuf;

use crate::common::Visibility;

/// Method flavour as far as eligibility is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Constructor,
}

/// A method declared in a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name; `#name` for ECMAScript private names
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub kind: MethodKind,
    /// 1-based line of the name token
    pub line: usize,
    /// Byte offset of the name token
    pub offset: u32,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor || self.name == "constructor"
    }

    /// Public or protected, instance-level, and not a constructor.
    pub fn is_eligible(&self) -> bool {
        !self.visibility.is_private() && !self.is_static && !self.is_constructor()
    }
}

/// A top-level class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// `None` for `export default class { … }`
    pub name: Option<String>,
    /// Superclass as written (`extends Base` / `extends ns.Base` → `Base`)
    pub superclass: Option<String>,
    /// Methods in declaration order, overloads collapsed
    pub methods: Vec<MethodDecl>,
    /// 1-based line of the `class` keyword
    pub line: usize,
}

/// How a member reference site uses the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// The method's own declaration
    Declaration,
    /// `a.name`, `a?.name`, `super.name`, `a["name"]`, `this.#name`
    Access,
    /// `{ name } = a`
    Destructure,
    /// `T["name"]`, `typeof a.name`
    TypeQuery,
    /// Same-named method in a superclass or subclass
    Override,
}

/// A syntactic occurrence of a member name outside of declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberReference {
    pub name: String,
    pub kind: ReferenceKind,
    /// 1-based line
    pub line: usize,
    pub offset: u32,
}

/// Export name that a default import binds.
pub const DEFAULT_EXPORT: &str = "default";

/// `import { imported as local } from "source"`, or `import local from "source"`
/// with `imported` set to [`DEFAULT_EXPORT`].
///
/// Once the project is loaded, default imports of a relative module that
/// default-exports a named class carry that class name instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub imported: String,
    /// Module specifier as written
    pub source: String,
}

/// One parsed file of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path
    pub path: PathBuf,
    pub classes: Vec<ClassDecl>,
    pub member_refs: Vec<MemberReference>,
    pub imports: Vec<ImportBinding>,
    /// Module specifiers of import/export-from statements and `import()`
    pub module_requests: Vec<String>,
    /// Local name exported as `default`, if any
    pub default_export: Option<String>,
    /// Whether the method scanner walks this file
    pub is_scan_target: bool,
}

impl SourceFile {
    /// Name a local identifier was imported under, if it is an import.
    pub fn imported_name<'s>(&'s self, local: &str) -> Option<&'s str> {
        self.imports
            .iter()
            .find(|binding| binding.local == local)
            .map(|binding| binding.imported.as_str())
    }
}
