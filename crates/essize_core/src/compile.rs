use crate::types::{ImportKind, ImportRecord, Specifier, SpecifierKind};

/// Canonical display ordering for a static import's specifiers.
///
/// ECMA-262 fixes the relative position of a default/namespace binding, but
/// the order inside a named-imports block is free. Two statements differing
/// only in named-specifier order are semantically identical, so named
/// specifiers are sorted by name among themselves to keep the compiled probe
/// text stable for cache keys. The sorted names are written back into the
/// positions the named specifiers already occupied, so default/namespace
/// specifiers never move.
pub fn sort_specifiers(specifiers: &[Specifier]) -> Vec<Specifier> {
    let mut sorted = specifiers.to_vec();

    let named_positions: Vec<usize> = sorted
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SpecifierKind::Named)
        .map(|(i, _)| i)
        .collect();

    let mut named: Vec<Specifier> =
        named_positions.iter().map(|&i| sorted[i].clone()).collect();
    named.sort_by(|a, b| a.name.cmp(&b.name));

    for (position, spec) in named_positions.into_iter().zip(named) {
        sorted[position] = spec;
    }
    sorted
}

/// Render one [`ImportRecord`] into a minimal bundler-ready snippet that
/// forces the package to be included and references every bound name, so
/// tree-shaking cannot strip it before measurement. Pure string rendering.
pub fn compile_probe(record: &ImportRecord) -> String {
    match record.kind {
        ImportKind::StaticImport => compile_static_import(record),
        // The call expression itself is the forcing reference.
        ImportKind::Require => format!("require('{}')", record.package),
        // The original call's resolution handling (await, chained then, bare)
        // is discarded; a fresh promise chain forces consumption.
        ImportKind::DynamicImport => {
            format!("import('{}').then(res => console.log(res));", record.package)
        }
    }
}

fn compile_static_import(record: &ImportRecord) -> String {
    // A bare `import 'pkg'` still needs a forcing reference, so it is probed
    // as a namespace import bound to a placeholder.
    if record.specifiers.is_empty() {
        return format!("import * as tmp from '{}';\nconsole.log(tmp);", record.package);
    }

    let sorted = sort_specifiers(&record.specifiers);

    // Two-step render: consecutive named specifiers collapse into one braced
    // block, default/namespace specifiers keep their original positions.
    let mut clause: Vec<String> = Vec::new();
    let mut reference: Vec<String> = Vec::new();
    let mut named: Vec<&str> = Vec::new();

    for (i, spec) in sorted.iter().enumerate() {
        match spec.kind {
            SpecifierKind::Named => {
                named.push(&spec.name);
                let next_is_named =
                    sorted.get(i + 1).is_some_and(|s| s.kind == SpecifierKind::Named);
                if !next_is_named {
                    let block = format!("{{{}}}", named.join(", "));
                    clause.push(block.clone());
                    reference.push(block);
                    named.clear();
                }
            }
            SpecifierKind::Default => {
                clause.push(spec.name.clone());
                reference.push(spec.name.clone());
            }
            SpecifierKind::Namespace => {
                clause.push(format!("* as {}", spec.name));
                reference.push(spec.name.clone());
            }
        }
    }

    format!(
        "import {} from '{}';\nconsole.log({});",
        clause.join(", "),
        record.package,
        reference.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_imports;
    use crate::types::Lang;

    fn probe_for(snippet: &str) -> String {
        let records = classify_imports(snippet, Lang::TypeScript).expect("should classify");
        assert_eq!(records.len(), 1, "expected exactly one record for {snippet:?}");
        compile_probe(&records[0])
    }

    #[test]
    fn test_one_named_import() {
        assert_eq!(
            probe_for("import { parse } from 'pkg'"),
            "import {parse} from 'pkg';\nconsole.log({parse});"
        );
    }

    #[test]
    fn test_named_imports_are_sorted() {
        assert_eq!(
            probe_for("import { parse, getPackageInfoFromString } from 'pkg'"),
            "import {getPackageInfoFromString, parse} from 'pkg';\nconsole.log({getPackageInfoFromString, parse});"
        );
    }

    #[test]
    fn test_named_order_independence() {
        assert_eq!(
            probe_for("import { b, a } from 'pkg'"),
            probe_for("import { a, b } from 'pkg'")
        );
    }

    #[test]
    fn test_default_import() {
        assert_eq!(
            probe_for("import pkg from 'pkg'"),
            "import pkg from 'pkg';\nconsole.log(pkg);"
        );
    }

    #[test]
    fn test_namespace_import() {
        assert_eq!(
            probe_for("import * as pkg from 'pkg'"),
            "import * as pkg from 'pkg';\nconsole.log(pkg);"
        );
    }

    #[test]
    fn test_default_plus_named() {
        assert_eq!(
            probe_for("import pkg, { parse } from 'pkg'"),
            "import pkg, {parse} from 'pkg';\nconsole.log(pkg, {parse});"
        );
    }

    #[test]
    fn test_default_plus_namespace() {
        assert_eq!(
            probe_for("import pkg, * as ns from 'pkg'"),
            "import pkg, * as ns from 'pkg';\nconsole.log(pkg, ns);"
        );
    }

    #[test]
    fn test_bare_import_uses_placeholder() {
        assert_eq!(
            probe_for("import 'pkg'"),
            "import * as tmp from 'pkg';\nconsole.log(tmp);"
        );
    }

    #[test]
    fn test_require_probe() {
        assert_eq!(probe_for("const pkg = require('pkg');"), "require('pkg')");
        assert_eq!(probe_for("const { parse } = require('pkg');"), "require('pkg')");
    }

    #[test]
    fn test_dynamic_import_probe() {
        let expected = "import('pkg').then(res => console.log(res));";
        assert_eq!(probe_for("import('pkg')"), expected);
        assert_eq!(probe_for("() => import('pkg')"), expected);
        assert_eq!(probe_for("import('pkg').then(res => {})"), expected);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let records =
            classify_imports("import pkg, { b, a } from 'pkg'", Lang::TypeScript).unwrap();
        assert_eq!(compile_probe(&records[0]), compile_probe(&records[0]));
    }

    #[test]
    fn test_default_stays_first_with_many_named() {
        // Large named blocks must sort without displacing the default
        // binding from its leading position.
        let reversed: Vec<String> = (0..200).rev().map(|i| format!("x{i:03}")).collect();
        let snippet = format!("import pkg, {{ {} }} from 'pkg'", reversed.join(", "));
        let records = classify_imports(&snippet, Lang::TypeScript).unwrap();

        let sorted_block: Vec<String> = (0..200).map(|i| format!("x{i:03}")).collect();
        let expected = format!(
            "import pkg, {{{0}}} from 'pkg';\nconsole.log(pkg, {{{0}}});",
            sorted_block.join(", ")
        );
        assert_eq!(compile_probe(&records[0]), expected);
    }

    #[test]
    fn test_sort_keeps_default_position_with_large_named_block() {
        let mut specifiers =
            vec![Specifier { name: "pkg".to_string(), kind: SpecifierKind::Default }];
        specifiers.extend(
            (0..200).rev().map(|i| Specifier {
                name: format!("x{i:03}"),
                kind: SpecifierKind::Named,
            }),
        );

        let sorted = sort_specifiers(&specifiers);
        assert_eq!(sorted[0].kind, SpecifierKind::Default);
        assert_eq!(sorted[1].name, "x000");
        assert_eq!(sorted[200].name, "x199");
    }

    #[test]
    fn test_sort_keeps_default_position() {
        let specifiers = vec![
            Specifier { name: "pkg".to_string(), kind: SpecifierKind::Default },
            Specifier { name: "b".to_string(), kind: SpecifierKind::Named },
            Specifier { name: "a".to_string(), kind: SpecifierKind::Named },
        ];
        let sorted = sort_specifiers(&specifiers);
        assert_eq!(sorted[0].kind, SpecifierKind::Default);
        assert_eq!(sorted[1].name, "a");
        assert_eq!(sorted[2].name, "b");
    }
}
