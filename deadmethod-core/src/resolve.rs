//! Reference resolution for class methods.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DeadmethodError, DeadmethodResult};
use crate::hierarchy::ClassHierarchy;
use crate::model::{ClassDecl, MemberReference, MethodDecl, MethodKind, ReferenceKind};
use crate::project::ProjectModel;

/// A method addressed by its position in the project model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    pub file: usize,
    pub class: usize,
    pub method: usize,
}

/// Where a method's name occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLocation {
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
    pub offset: u32,
    pub kind: ReferenceKind,
}

impl ReferenceLocation {
    fn at(file: &Path, line: usize, offset: u32, kind: ReferenceKind) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            offset,
            kind,
        }
    }

    pub fn is_declaration(&self) -> bool {
        self.kind == ReferenceKind::Declaration
    }
}

/// Finds every location that refers to a method, its declaration included.
pub trait ReferenceResolver {
    fn find_references(&self, method: MethodId) -> DeadmethodResult<Vec<ReferenceLocation>>;
}

/// Resolves references by member name over every loaded file.
///
/// Any access to a member with the method's name counts, whatever the
/// receiver type. Methods are never reported as unused while some access
/// with the same name exists.
pub struct NameIndexResolver<'m> {
    model: &'m ProjectModel,
    hierarchy: ClassHierarchy,
    by_name: HashMap<&'m str, Vec<(usize, &'m MemberReference)>>,
}

impl<'m> NameIndexResolver<'m> {
    pub fn new(model: &'m ProjectModel) -> Self {
        let mut by_name: HashMap<&'m str, Vec<(usize, &'m MemberReference)>> = HashMap::new();
        for (file_idx, file) in model.files.iter().enumerate() {
            for reference in &file.member_refs {
                by_name
                    .entry(reference.name.as_str())
                    .or_default()
                    .push((file_idx, reference));
            }
        }

        tracing::debug!(
            names = by_name.len(),
            files = model.files.len(),
            "Built member name index"
        );

        Self {
            model,
            hierarchy: ClassHierarchy::build(&model.files),
            by_name,
        }
    }

    fn lookup(&self, id: MethodId) -> DeadmethodResult<(&'m Path, &'m ClassDecl, &'m MethodDecl)> {
        let missing = |what: &str| {
            DeadmethodError::resolve(
                "<unknown>",
                "<unknown>",
                format!("no {what} at {}:{}:{}", id.file, id.class, id.method),
            )
        };
        let file = self.model.files.get(id.file).ok_or_else(|| missing("file"))?;
        let class = file.classes.get(id.class).ok_or_else(|| missing("class"))?;
        let method = class.methods.get(id.method).ok_or_else(|| missing("method"))?;
        Ok((file.path.as_path(), class, method))
    }

    /// Same-named instance methods declared in superclasses or subclasses.
    fn overrides(&self, class: &ClassDecl, method: &MethodDecl) -> Vec<ReferenceLocation> {
        let Some(class_name) = &class.name else {
            return Vec::new();
        };
        if method.is_static {
            return Vec::new();
        }

        let mut found = Vec::new();
        for location in self.hierarchy.related_classes(class_name) {
            let Some(file) = self.model.files.get(location.file) else {
                continue;
            };
            let Some(related) = file.classes.get(location.class) else {
                continue;
            };
            found.extend(
                related
                    .methods
                    .iter()
                    .filter(|m| m.name == method.name && !m.is_static && m.kind == MethodKind::Method)
                    .map(|m| ReferenceLocation::at(&file.path, m.line, m.offset, ReferenceKind::Override)),
            );
        }
        found
    }
}

impl ReferenceResolver for NameIndexResolver<'_> {
    fn find_references(&self, id: MethodId) -> DeadmethodResult<Vec<ReferenceLocation>> {
        let (path, class, method) = self.lookup(id)?;

        let mut references = vec![ReferenceLocation::at(
            path,
            method.line,
            method.offset,
            ReferenceKind::Declaration,
        )];

        if let Some(sites) = self.by_name.get(method.name.as_str()) {
            references.extend(sites.iter().filter_map(|(file_idx, site)| {
                let file = self.model.files.get(*file_idx)?;
                Some(ReferenceLocation::at(&file.path, site.line, site.offset, site.kind))
            }));
        }

        references.extend(self.overrides(class, method));
        Ok(references)
    }
}
