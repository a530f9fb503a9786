use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser as OxcParser;

use crate::error::ParseError;
use crate::types::{ImportKind, ImportRecord, Lang, Specifier, SpecifierKind};

/// Classify every non-local import/require/dynamic-import site in `snippet`
/// into an [`ImportRecord`], in document order.
///
/// Local (relative) static imports and local single-string-literal requires
/// are filtered out here; type-only TypeScript imports are skipped since they
/// have zero runtime cost. Any classification failure aborts the whole
/// snippet rather than producing a partial result.
pub fn classify_imports(snippet: &str, lang: Lang) -> Result<Vec<ImportRecord>, ParseError> {
    trace!("Classifying snippet under {:?} dialect", lang);
    let allocator = Allocator::default();
    let ret = OxcParser::new(&allocator, snippet, lang.source_type()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|err| {
                let offset =
                    err.labels.as_ref().and_then(|labels| labels.first()).map(|l| l.offset());
                match offset {
                    Some(off) => format!("{err} (byte {off})"),
                    None => err.to_string(),
                }
            })
            .unwrap_or_else(|| "parser panicked".to_string());
        debug!("Snippet failed to parse: {}", message);
        return Err(ParseError::Syntax { message });
    }

    let mut collector = ImportCollector::default();
    collector.visit_program(&ret.program);

    if let Some(err) = collector.error {
        return Err(err);
    }
    debug!("Classified {} import record(s)", collector.records.len());
    Ok(collector.records)
}

/// Relative-path check matching `^(\.+/)`: one or more dots followed by `/`.
fn is_local_path(path: &str) -> bool {
    let rest = path.trim_start_matches('.');
    rest.len() < path.len() && rest.starts_with('/')
}

/// A require is local only in its exact single-argument string-literal form;
/// any other shape is still classified (and may then fail name extraction).
fn is_local_require(call: &CallExpression) -> bool {
    call.arguments.len() == 1
        && matches!(
            call.arguments[0].as_expression(),
            Some(Expression::StringLiteral(lit)) if is_local_path(&lit.value)
        )
}

fn specifier_of(spec: &ImportDeclarationSpecifier) -> Specifier {
    match spec {
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
            Specifier { name: s.local.name.to_string(), kind: SpecifierKind::Default }
        }
        // Named specifiers keep the imported name, not the local alias.
        ImportDeclarationSpecifier::ImportSpecifier(s) => {
            Specifier { name: s.imported.name().to_string(), kind: SpecifierKind::Named }
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
            Specifier { name: s.local.name.to_string(), kind: SpecifierKind::Namespace }
        }
    }
}

/// Extract the package name from a `require(...)` argument list: a plain
/// string literal's value, or the raw text of a template literal's first
/// chunk. Anything else is a hard failure.
fn require_package_name(call: &CallExpression) -> Result<String, ParseError> {
    let arg = call.arguments.first().and_then(|a| a.as_expression());
    source_package_name(arg)
}

fn source_package_name(expr: Option<&Expression>) -> Result<String, ParseError> {
    let name = match expr {
        Some(Expression::StringLiteral(lit)) => lit.value.to_string(),
        Some(Expression::TemplateLiteral(tpl)) => {
            tpl.quasis.first().map(|q| q.value.raw.to_string()).unwrap_or_default()
        }
        _ => return Err(ParseError::UnsupportedArgument),
    };
    if name.is_empty() {
        return Err(ParseError::UnsupportedArgument);
    }
    Ok(name)
}

#[derive(Default)]
struct ImportCollector {
    records: Vec<ImportRecord>,
    error: Option<ParseError>,
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if self.error.is_some() {
            return;
        }
        if is_local_path(&it.source.value) {
            trace!("Skipping local import: '{}'", it.source.value);
            return;
        }
        // Type-only imports (import type { Foo } from 'bar') have zero
        // runtime cost.
        if it.import_kind.is_type() {
            trace!("Skipping type-only import: '{}'", it.source.value);
            return;
        }

        let specifiers: Vec<Specifier> = it
            .specifiers
            .as_ref()
            .map(|specs| specs.iter().map(specifier_of).collect())
            .unwrap_or_default();

        trace!("Found static import: '{}'", it.source.value);
        self.records.push(ImportRecord {
            package: it.source.value.to_string(),
            specifiers,
            kind: ImportKind::StaticImport,
        });
        walk::walk_import_declaration(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if self.error.is_some() {
            return;
        }
        if let Expression::Identifier(ident) = &it.callee
            && ident.name.as_str() == "require"
            && !is_local_require(it)
        {
            match require_package_name(it) {
                Ok(name) => {
                    trace!("Found require() call: '{}'", name);
                    self.records.push(ImportRecord {
                        package: name,
                        specifiers: Vec::new(),
                        kind: ImportKind::Require,
                    });
                }
                Err(err) => {
                    self.error = Some(err);
                    return;
                }
            }
        }
        walk::walk_call_expression(self, it);
    }

    // Dynamic imports are recorded regardless of how their result is consumed
    // and regardless of a relative source path.
    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if self.error.is_some() {
            return;
        }
        match source_package_name(Some(&it.source)) {
            Ok(name) => {
                trace!("Found dynamic import(): '{}'", name);
                self.records.push(ImportRecord {
                    package: name,
                    specifiers: Vec::new(),
                    kind: ImportKind::DynamicImport,
                });
            }
            Err(err) => {
                self.error = Some(err);
                return;
            }
        }
        walk::walk_import_expression(self, it);
    }
}
