//! Source parsing.
//!
//! Every file is parsed with oxc and run through the semantic checker; any
//! diagnostic from either makes the file a parse failure. The AST is then
//! reduced to the owned model in [`crate::model`]:
//! - top-level classes with their methods (overload signatures collapsed)
//! - member reference sites (property access, destructuring, type queries)
//! - import bindings and module requests, used for superclass lookup and
//!   for following relative imports

use std::{borrow::Cow, fs, path::Path};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    AssignmentTargetPropertyIdentifier, AssignmentTargetPropertyProperty, BindingProperty, Class,
    ClassElement, ComputedMemberExpression, Declaration, ExportAllDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, ImportDeclaration,
    ImportDeclarationSpecifier, ImportExpression, MethodDefinition, MethodDefinitionKind,
    PrivateFieldExpression, PrivateInExpression, Program, PropertyKey, Statement, StaticMemberExpression, TSIndexedAccessType, TSLiteral,
    TSQualifiedName, TSType, TSTypeQuery,
};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::{Parser, ParserReturn};
use oxc_semantic::SemanticBuilder;
use oxc_span::{GetSpan, SourceType, Span};

use crate::common::{LineIndex, Visibility};
use crate::error::{DeadmethodError, DeadmethodResult, IoResultExt};
use crate::model::{
    ClassDecl, ImportBinding, MemberReference, MethodDecl, MethodKind, ReferenceKind, SourceFile,
    DEFAULT_EXPORT,
};

/// Maximum file size to parse (10 MB).
const MAX_FILE_SIZE: usize = 10_000_000;

/// Read and parse one file.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD before parsing.
pub fn parse_file(path: &Path) -> DeadmethodResult<SourceFile> {
    let bytes = fs::read(path).with_path(path)?;
    if bytes.len() > MAX_FILE_SIZE {
        return Err(DeadmethodError::parse(
            path,
            format!("file too large ({} bytes, max {MAX_FILE_SIZE})", bytes.len()),
        ));
    }
    let source = String::from_utf8_lossy(&bytes);
    if matches!(source, Cow::Owned(_)) {
        tracing::debug!(file = %path.display(), "Decoded file with invalid UTF-8 lossily");
    }
    parse_source(path, &source)
}

/// Parse `source` as the contents of `path`.
///
/// The extension of `path` selects the dialect (`.ts`, `.tsx`, `.d.ts`,
/// `.mts`, `.js`, …). The returned file is not marked as a scan target.
pub fn parse_source(path: &Path, source: &str) -> DeadmethodResult<SourceFile> {
    let source_type = SourceType::from_path(path)
        .map_err(|_| DeadmethodError::parse(path, "unsupported file extension"))?;

    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, source_type).parse();

    let index = LineIndex::new(source);

    if let Some(error) = errors.first() {
        let offset = error
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset());
        return Err(located_error(path, source, &index, &error.message, offset));
    }
    if panicked {
        return Err(DeadmethodError::parse(path, "parser aborted"));
    }

    let semantic_ret = SemanticBuilder::new()
        .with_check_syntax_error(true)
        .build(&program);
    if let Some(error) = semantic_ret.errors.first() {
        let offset = error
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset());
        return Err(located_error(path, source, &index, &error.message, offset));
    }

    let classes = collect_classes(&program, &index);
    let default_export = default_export_name(&program);

    let mut collector = ReferenceCollector::new(&index);
    collector.visit_program(&program);

    Ok(SourceFile {
        path: path.to_path_buf(),
        classes,
        member_refs: collector.member_refs,
        imports: collector.imports,
        module_requests: collector.module_requests,
        default_export,
        is_scan_target: false,
    })
}

fn located_error(
    path: &Path,
    source: &str,
    index: &LineIndex,
    message: &str,
    offset: Option<usize>,
) -> DeadmethodError {
    match offset {
        Some(offset) => {
            let (line, column) = index.line_column(offset as u32, source);
            DeadmethodError::parse_at(path, message, line, column)
        }
        None => DeadmethodError::parse(path, message),
    }
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// Classes declared at module top level, including exported ones.
fn collect_classes(program: &Program, index: &LineIndex) -> Vec<ClassDecl> {
    let mut classes = Vec::new();
    for stmt in &program.body {
        let class: Option<&Class> = match stmt {
            Statement::ClassDeclaration(class) => Some(&**class),
            Statement::ExportNamedDeclaration(decl) => match &decl.declaration {
                Some(Declaration::ClassDeclaration(class)) => Some(&**class),
                _ => None,
            },
            Statement::ExportDefaultDeclaration(decl) => match &decl.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => Some(&**class),
                _ => None,
            },
            _ => None,
        };
        if let Some(class) = class {
            classes.push(class_decl(class, index));
        }
    }
    classes
}

/// Local name behind `export default`, when it names a class or binding.
fn default_export_name(program: &Program) -> Option<String> {
    program.body.iter().find_map(|stmt| {
        let Statement::ExportDefaultDeclaration(decl) = stmt else {
            return None;
        };
        match &decl.declaration {
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                class.id.as_ref().map(|id| id.name.to_string())
            }
            ExportDefaultDeclarationKind::Identifier(ident) => Some(ident.name.to_string()),
            _ => None,
        }
    })
}

fn class_decl(class: &Class, index: &LineIndex) -> ClassDecl {
    let superclass = class.super_class.as_ref().and_then(|expr| match expr {
        Expression::Identifier(ident) => Some(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.to_string()),
        _ => None,
    });

    // Parallel to `methods`: whether the kept declaration has a body
    let mut has_body: Vec<bool> = Vec::new();
    let mut methods: Vec<MethodDecl> = Vec::new();

    for element in &class.body.body {
        let ClassElement::MethodDefinition(method) = element else {
            continue;
        };
        let Some(decl) = method_decl(method, index) else {
            continue;
        };
        let body = method.value.body.is_some();

        // Overload signatures precede the implementation with the same name
        if let Some(last) = methods.last_mut() {
            let prev_has_body = has_body.last().copied().unwrap_or(true);
            if last.name == decl.name && last.is_static == decl.is_static && !prev_has_body {
                *last = decl;
                if let Some(flag) = has_body.last_mut() {
                    *flag = body;
                }
                continue;
            }
        }
        methods.push(decl);
        has_body.push(body);
    }

    ClassDecl {
        name: class.id.as_ref().map(|id| id.name.to_string()),
        superclass,
        methods,
        line: index.line(class.span.start),
    }
}

/// `None` for accessors and for computed keys that are not literals.
fn method_decl(method: &MethodDefinition, index: &LineIndex) -> Option<MethodDecl> {
    let kind = match method.kind {
        MethodDefinitionKind::Method => MethodKind::Method,
        MethodDefinitionKind::Constructor => MethodKind::Constructor,
        MethodDefinitionKind::Get | MethodDefinitionKind::Set => return None,
    };
    let name = member_key_name(&method.key)?;
    let offset = method.key.span().start;

    Some(MethodDecl {
        name,
        visibility: Visibility::from_accessibility(method.accessibility),
        is_static: method.r#static,
        kind,
        line: index.line(offset),
        offset,
    })
}

fn member_key_name(key: &PropertyKey) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::PrivateIdentifier(ident) => Some(format!("#{}", ident.name)),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        PropertyKey::NumericLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// References and imports
// ---------------------------------------------------------------------------

struct ReferenceCollector<'i> {
    index: &'i LineIndex,
    member_refs: Vec<MemberReference>,
    imports: Vec<ImportBinding>,
    module_requests: Vec<String>,
    /// Depth of enclosing `typeof` type queries
    type_query_depth: usize,
}

impl<'i> ReferenceCollector<'i> {
    fn new(index: &'i LineIndex) -> Self {
        Self {
            index,
            member_refs: Vec::new(),
            imports: Vec::new(),
            module_requests: Vec::new(),
            type_query_depth: 0,
        }
    }

    fn push(&mut self, name: &str, span: Span, kind: ReferenceKind) {
        self.member_refs.push(MemberReference {
            name: name.to_string(),
            kind,
            line: self.index.line(span.start),
            offset: span.start,
        });
    }

    fn push_key(&mut self, key: &PropertyKey, kind: ReferenceKind) {
        if let PropertyKey::PrivateIdentifier(_) = key {
            return;
        }
        if let Some(name) = member_key_name(key) {
            self.push(&name, key.span(), kind);
        }
    }
}

impl<'a> Visit<'a> for ReferenceCollector<'_> {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        self.push(&it.property.name, it.property.span, ReferenceKind::Access);
        walk::walk_static_member_expression(self, it);
    }

    fn visit_private_field_expression(&mut self, it: &PrivateFieldExpression<'a>) {
        self.push(&format!("#{}", it.field.name), it.field.span, ReferenceKind::Access);
        walk::walk_private_field_expression(self, it);
    }

    // `#name in obj`
    fn visit_private_in_expression(&mut self, it: &PrivateInExpression<'a>) {
        self.push(&format!("#{}", it.left.name), it.left.span, ReferenceKind::Access);
        walk::walk_private_in_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &ComputedMemberExpression<'a>) {
        if let Expression::StringLiteral(lit) = &it.expression {
            self.push(&lit.value, lit.span, ReferenceKind::Access);
        }
        walk::walk_computed_member_expression(self, it);
    }

    fn visit_binding_property(&mut self, it: &BindingProperty<'a>) {
        self.push_key(&it.key, ReferenceKind::Destructure);
        walk::walk_binding_property(self, it);
    }

    fn visit_assignment_target_property_identifier(
        &mut self,
        it: &AssignmentTargetPropertyIdentifier<'a>,
    ) {
        self.push(&it.binding.name, it.binding.span, ReferenceKind::Destructure);
        walk::walk_assignment_target_property_identifier(self, it);
    }

    fn visit_assignment_target_property_property(
        &mut self,
        it: &AssignmentTargetPropertyProperty<'a>,
    ) {
        self.push_key(&it.name, ReferenceKind::Destructure);
        walk::walk_assignment_target_property_property(self, it);
    }

    fn visit_ts_indexed_access_type(&mut self, it: &TSIndexedAccessType<'a>) {
        if let TSType::TSLiteralType(lit) = &it.index_type {
            if let TSLiteral::StringLiteral(name) = &lit.literal {
                self.push(&name.value, name.span, ReferenceKind::TypeQuery);
            }
        }
        walk::walk_ts_indexed_access_type(self, it);
    }

    fn visit_ts_type_query(&mut self, it: &TSTypeQuery<'a>) {
        self.type_query_depth += 1;
        walk::walk_ts_type_query(self, it);
        self.type_query_depth -= 1;
    }

    fn visit_ts_qualified_name(&mut self, it: &TSQualifiedName<'a>) {
        if self.type_query_depth > 0 {
            self.push(&it.right.name, it.right.span, ReferenceKind::TypeQuery);
        }
        walk::walk_ts_qualified_name(self, it);
    }

    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        let source = it.source.value.to_string();
        if let Some(specifiers) = &it.specifiers {
            for specifier in specifiers {
                let (local, imported) = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                        (spec.local.name.to_string(), spec.imported.name().to_string())
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                        (spec.local.name.to_string(), DEFAULT_EXPORT.to_string())
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => continue,
                };
                self.imports.push(ImportBinding {
                    local,
                    imported,
                    source: source.clone(),
                });
            }
        }
        self.module_requests.push(source);
        walk::walk_import_declaration(self, it);
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &it.source {
            self.module_requests.push(source.value.to_string());
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.module_requests.push(it.source.value.to_string());
        walk::walk_export_all_declaration(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &it.source {
            self.module_requests.push(lit.value.to_string());
        }
        walk::walk_import_expression(self, it);
    }
}
