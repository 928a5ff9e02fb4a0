//! Class inheritance across the whole project.
//!
//! Classes are identified by name. A superclass written under an import
//! alias (`import { Base as B }`, `extends B`) is recorded under the name it
//! was exported with; a default import of a project class is recorded under
//! that class's name once the project loader has linked it. Name collisions merge into one node, which can only
//! make more methods count as used.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::common::GraphTraversal;
use crate::model::{SourceFile, DEFAULT_EXPORT};

/// Position of a class in the project model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassLocation {
    pub file: usize,
    pub class: usize,
}

#[derive(Debug, Default)]
pub struct ClassHierarchy {
    /// Subclass → superclasses
    parents: HashMap<String, Vec<String>>,
    /// Superclass → subclasses
    children: HashMap<String, Vec<String>>,
    /// Declarations of each named class
    locations: HashMap<String, Vec<ClassLocation>>,
    /// Every class name that appears as a node
    known: HashSet<String>,
}

impl ClassHierarchy {
    pub fn build(files: &[SourceFile]) -> Self {
        let mut hierarchy = Self::default();

        for (file_idx, file) in files.iter().enumerate() {
            for (class_idx, class) in file.classes.iter().enumerate() {
                let Some(name) = &class.name else {
                    continue;
                };
                hierarchy.known.insert(name.clone());
                hierarchy
                    .locations
                    .entry(name.clone())
                    .or_default()
                    .push(ClassLocation {
                        file: file_idx,
                        class: class_idx,
                    });

                if let Some(superclass) = &class.superclass {
                    // An unlinked default import stays under its local name
                    let parent = match file.imported_name(superclass) {
                        Some(imported) if imported != DEFAULT_EXPORT => imported,
                        _ => superclass.as_str(),
                    };
                    hierarchy.add_edge(name, parent);
                }
            }
        }

        hierarchy
    }

    fn add_edge(&mut self, child: &str, parent: &str) {
        self.known.insert(child.to_string());
        self.known.insert(parent.to_string());
        self.parents
            .entry(child.to_string())
            .or_default()
            .push(parent.to_string());
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Transitive superclasses, not including `name` itself.
    pub fn ancestors(&self, name: &str) -> HashSet<String> {
        let mut reachable = Superclasses(self).reachable_from_single(name.to_string());
        reachable.remove(name);
        reachable
    }

    /// Transitive subclasses, not including `name` itself.
    pub fn descendants(&self, name: &str) -> HashSet<String> {
        let mut reachable = Subclasses(self).reachable_from_single(name.to_string());
        reachable.remove(name);
        reachable
    }

    /// Declarations of every ancestor and descendant of `name`, in project
    /// order.
    pub fn related_classes(&self, name: &str) -> Vec<ClassLocation> {
        let mut names = self.ancestors(name);
        names.extend(self.descendants(name));

        let related: BTreeSet<ClassLocation> = names
            .iter()
            .filter_map(|n| self.locations.get(n))
            .flatten()
            .copied()
            .collect();
        related.into_iter().collect()
    }
}

/// Walks subclass → superclass edges.
struct Superclasses<'h>(&'h ClassHierarchy);

impl GraphTraversal for Superclasses<'_> {
    type Node = String;

    fn neighbors(&self, node: &String) -> Vec<String> {
        self.0.parents.get(node).cloned().unwrap_or_default()
    }

    fn contains_node(&self, node: &String) -> bool {
        self.0.contains(node)
    }
}

/// Walks superclass → subclass edges.
struct Subclasses<'h>(&'h ClassHierarchy);

impl GraphTraversal for Subclasses<'_> {
    type Node = String;

    fn neighbors(&self, node: &String) -> Vec<String> {
        self.0.children.get(node).cloned().unwrap_or_default()
    }

    fn contains_node(&self, node: &String) -> bool {
        self.0.contains(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassDecl, ImportBinding};
    use std::path::PathBuf;

    fn class(name: &str, superclass: Option<&str>) -> ClassDecl {
        ClassDecl {
            name: Some(name.to_string()),
            superclass: superclass.map(str::to_string),
            methods: Vec::new(),
            line: 1,
        }
    }

    fn file(path: &str, classes: Vec<ClassDecl>, imports: Vec<ImportBinding>) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            classes,
            member_refs: Vec::new(),
            imports,
            module_requests: Vec::new(),
            default_export: None,
            is_scan_target: true,
        }
    }

    #[test]
    fn test_chain_both_directions() {
        let files = vec![file(
            "/p/src/a.ts",
            vec![
                class("Base", None),
                class("Mid", Some("Base")),
                class("Leaf", Some("Mid")),
            ],
            Vec::new(),
        )];
        let hierarchy = ClassHierarchy::build(&files);

        let ancestors = hierarchy.ancestors("Leaf");
        assert!(ancestors.contains("Mid"));
        assert!(ancestors.contains("Base"));
        assert!(!ancestors.contains("Leaf"));

        let descendants = hierarchy.descendants("Base");
        assert_eq!(descendants.len(), 2);
    }

    #[test]
    fn test_aliased_superclass() {
        let files = vec![
            file("/p/src/base.ts", vec![class("Base", None)], Vec::new()),
            file(
                "/p/src/child.ts",
                vec![class("Child", Some("B"))],
                vec![ImportBinding {
                    local: "B".to_string(),
                    imported: "Base".to_string(),
                    source: "./base".to_string(),
                }],
            ),
        ];
        let hierarchy = ClassHierarchy::build(&files);

        assert_eq!(
            hierarchy.related_classes("Base"),
            vec![ClassLocation { file: 1, class: 0 }]
        );
        assert_eq!(
            hierarchy.related_classes("Child"),
            vec![ClassLocation { file: 0, class: 0 }]
        );
    }

    #[test]
    fn test_unlinked_default_import_keeps_local_name() {
        let files = vec![file(
            "/p/src/child.ts",
            vec![class("Child", Some("Widget"))],
            vec![ImportBinding {
                local: "Widget".to_string(),
                imported: DEFAULT_EXPORT.to_string(),
                source: "some-package".to_string(),
            }],
        )];
        let hierarchy = ClassHierarchy::build(&files);

        assert!(hierarchy.ancestors("Child").contains("Widget"));
        assert!(!hierarchy.contains(DEFAULT_EXPORT));
    }

    #[test]
    fn test_siblings_unrelated() {
        let files = vec![file(
            "/p/src/a.ts",
            vec![
                class("Animal", None),
                class("Cat", Some("Animal")),
                class("Dog", Some("Animal")),
            ],
            Vec::new(),
        )];
        let hierarchy = ClassHierarchy::build(&files);

        let related = hierarchy.related_classes("Cat");
        assert_eq!(related, vec![ClassLocation { file: 0, class: 0 }]);
    }

    #[test]
    fn test_external_superclass_has_no_location() {
        let files = vec![file(
            "/p/src/a.ts",
            vec![class("Widget", Some("HTMLElement"))],
            Vec::new(),
        )];
        let hierarchy = ClassHierarchy::build(&files);

        assert!(hierarchy.contains("HTMLElement"));
        assert!(hierarchy.related_classes("Widget").is_empty());
    }
}
