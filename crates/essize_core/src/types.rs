use oxc_span::SourceType;

/// Source dialect of the snippet being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// Plain JS/JSX. The underlying parser has no flow support, so
    /// flow-annotated snippets fail with a syntax error.
    JavaScript,
    TypeScript,
}

impl Lang {
    pub(crate) fn source_type(self) -> SourceType {
        match self {
            // Default oxc source type is an ES module; JSX is enabled for both
            // dialects since import snippets may come from .jsx/.tsx files.
            Lang::JavaScript => SourceType::default().with_jsx(true),
            Lang::TypeScript => SourceType::default().with_typescript(true).with_jsx(true),
        }
    }

    pub fn loader(self) -> &'static str {
        match self {
            Lang::JavaScript => "js",
            Lang::TypeScript => "ts",
        }
    }
}

/// Which syntactic form produced an [`ImportRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    StaticImport,
    Require,
    DynamicImport,
}

/// How a single bound name was introduced by a static import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Bound name: the local name for default/namespace specifiers, the
    /// imported (not aliased) name for named specifiers.
    pub name: String,
    pub kind: SpecifierKind,
}

/// One discovered import/require/dynamic-import site, in source order.
/// Created by the classifier in a single parse pass and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Never empty; local (relative) static imports are filtered before a
    /// record is materialized.
    pub package: String,
    /// Only meaningful for `StaticImport`; empty for bare `import 'pkg'`.
    pub specifiers: Vec<Specifier>,
    pub kind: ImportKind,
}
