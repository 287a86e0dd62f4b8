//! Cross-module literal option resolution
//!
//! A two-pass static analysis over every module in the context. Phase 1
//! collects the string-literal value sets of type aliases and interface
//! properties; Phase 2 resolves each class method parameter against those
//! sets. Phase 1 must complete over all modules before Phase 2 starts,
//! since a method in one module may reference an alias declared in another.
//!
//! When two methods share a name, their option sets are never merged; the
//! winner is chosen by [`MergePolicy`].

use crate::context::AnalysisContext;
use crate::swc::{entity_name_to_string, prop_name_to_string};
use deno_ast::swc::ast as swc_ast;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resolved literal option sets, keyed by method name and by alias name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralOptionTable {
    /// Method name to its resolved option set
    pub method_options: IndexMap<String, Vec<String>>,
    /// Type alias name to its literal value set
    pub type_aliases: IndexMap<String, Vec<String>>,
}

/// Conflict policy for methods sharing a name across classes.
///
/// The analyzed SDK reuses method names across unrelated builders, and a
/// same-length-but-different union can make the size heuristic pick the
/// wrong set; the policy is therefore explicit rather than a hidden
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Keep whichever set has more values; ties keep the first seen
    #[default]
    PreferLonger,
    /// The first resolved set wins outright
    KeepFirst,
}

/// Phase-1 collection results
#[derive(Debug, Default)]
struct CollectedTypes {
    aliases: IndexMap<String, Vec<String>>,
    interface_props: IndexMap<String, IndexMap<String, Vec<String>>>,
}

/// Resolve literal option sets across all modules in the context
pub fn resolve_literal_options(ctx: &AnalysisContext, policy: MergePolicy) -> LiteralOptionTable {
    // Phase 1: collect alias and interface-property literal sets globally
    let mut collected = CollectedTypes::default();
    for (_, parsed) in ctx.modules() {
        collect_module_types(&parsed.module().body, &mut collected);
    }

    // Phase 2: resolve every class method parameter
    let mut method_options = IndexMap::new();
    for (_, parsed) in ctx.modules() {
        resolve_module_methods(&parsed.module().body, &collected, policy, &mut method_options);
    }

    LiteralOptionTable {
        method_options,
        type_aliases: collected.aliases,
    }
}

/// Phase 1: walk a module's items for type aliases and interfaces
fn collect_module_types(items: &[swc_ast::ModuleItem], collected: &mut CollectedTypes) {
    for item in items {
        match item {
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDecl(export)) => {
                collect_decl_types(&export.decl, collected);
            }
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDefaultDecl(export)) => {
                if let swc_ast::DefaultDecl::TsInterfaceDecl(iface) = &export.decl {
                    collect_interface(iface, collected);
                }
            }
            swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => {
                collect_decl_types(decl, collected);
            }
            _ => {}
        }
    }
}

fn collect_decl_types(decl: &swc_ast::Decl, collected: &mut CollectedTypes) {
    match decl {
        swc_ast::Decl::TsTypeAlias(alias) => {
            let literals = literals_from_type(&alias.type_ann);
            if !literals.is_empty() {
                collected.aliases.insert(alias.id.sym.to_string(), literals);
            }
        }
        swc_ast::Decl::TsInterface(iface) => {
            collect_interface(iface, collected);
        }
        swc_ast::Decl::TsModule(module) => {
            if let Some(swc_ast::TsNamespaceBody::TsModuleBlock(block)) = &module.body {
                collect_module_types(&block.body, collected);
            }
        }
        _ => {}
    }
}

fn collect_interface(iface: &swc_ast::TsInterfaceDecl, collected: &mut CollectedTypes) {
    let interface_name = iface.id.sym.to_string();
    let props = collected.interface_props.entry(interface_name).or_default();

    for member in &iface.body.body {
        if let swc_ast::TsTypeElement::TsPropertySignature(prop) = member {
            let swc_ast::Expr::Ident(key) = prop.key.as_ref() else {
                continue;
            };
            let Some(type_ann) = &prop.type_ann else {
                continue;
            };
            let literals = literals_from_type(&type_ann.type_ann);
            if !literals.is_empty() {
                props.insert(key.sym.to_string(), literals);
            }
        }
    }
}

/// Phase 2: walk a module's items for class methods
fn resolve_module_methods(
    items: &[swc_ast::ModuleItem],
    collected: &CollectedTypes,
    policy: MergePolicy,
    method_options: &mut IndexMap<String, Vec<String>>,
) {
    for item in items {
        match item {
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDecl(export)) => {
                match &export.decl {
                    swc_ast::Decl::Class(class_decl) => {
                        resolve_class(&class_decl.class, collected, policy, method_options);
                    }
                    swc_ast::Decl::TsModule(module) => {
                        if let Some(swc_ast::TsNamespaceBody::TsModuleBlock(block)) = &module.body {
                            resolve_module_methods(&block.body, collected, policy, method_options);
                        }
                    }
                    _ => {}
                }
            }
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDefaultDecl(export)) => {
                if let swc_ast::DefaultDecl::Class(class_expr) = &export.decl {
                    resolve_class(&class_expr.class, collected, policy, method_options);
                }
            }
            swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(decl)) => match decl {
                swc_ast::Decl::Class(class_decl) => {
                    resolve_class(&class_decl.class, collected, policy, method_options);
                }
                swc_ast::Decl::TsModule(module) => {
                    if let Some(swc_ast::TsNamespaceBody::TsModuleBlock(block)) = &module.body {
                        resolve_module_methods(&block.body, collected, policy, method_options);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

fn resolve_class(
    class: &swc_ast::Class,
    collected: &CollectedTypes,
    policy: MergePolicy,
    method_options: &mut IndexMap<String, Vec<String>>,
) {
    for member in &class.body {
        let swc_ast::ClassMember::Method(method) = member else {
            continue;
        };
        let method_name = prop_name_to_string(&method.key);

        for param in &method.function.params {
            let Some(ty) = param_type(&param.pat) else {
                continue;
            };
            let literals = resolve_param_type(ty, collected);
            if literals.is_empty() {
                continue;
            }
            let unique = dedup_preserving_order(literals);
            merge_options(method_options, method_name.clone(), unique, policy);
        }
    }
}

/// The declared type of a parameter binding, if any
fn param_type(pat: &swc_ast::Pat) -> Option<&swc_ast::TsType> {
    match pat {
        swc_ast::Pat::Ident(i) => i.type_ann.as_deref().map(|t| t.type_ann.as_ref()),
        swc_ast::Pat::Assign(assign) => param_type(&assign.left),
        swc_ast::Pat::Rest(rest) => param_type(&rest.arg),
        swc_ast::Pat::Array(arr) => arr.type_ann.as_deref().map(|t| t.type_ann.as_ref()),
        swc_ast::Pat::Object(obj) => obj.type_ann.as_deref().map(|t| t.type_ann.as_ref()),
        _ => None,
    }
}

/// Apply the four resolution strategies in order; the first one yielding a
/// non-empty result wins.
fn resolve_param_type(ty: &swc_ast::TsType, collected: &CollectedTypes) -> Vec<String> {
    // 1. Direct literal union on the parameter's own type
    let mut literals = literals_from_type(ty);

    // 2. Bare reference to a collected alias
    if literals.is_empty() {
        if let swc_ast::TsType::TsTypeRef(ref_type) = ty {
            let name = entity_name_to_string(&ref_type.type_name);
            if let Some(known) = collected.aliases.get(&name) {
                literals = known.clone();
            }
        }
    }

    // 3. Indexed access with a string-literal index: Interface['prop']
    if literals.is_empty() {
        if let swc_ast::TsType::TsIndexedAccessType(indexed) = ty {
            if let (
                swc_ast::TsType::TsTypeRef(obj_type),
                swc_ast::TsType::TsLitType(index_type),
            ) = (indexed.obj_type.as_ref(), indexed.index_type.as_ref())
            {
                if let swc_ast::TsLit::Str(prop) = &index_type.lit {
                    let interface_name = entity_name_to_string(&obj_type.type_name);
                    let prop_name = String::from_utf8_lossy(prop.value.as_bytes()).to_string();
                    if let Some(known) = collected
                        .interface_props
                        .get(&interface_name)
                        .and_then(|props| props.get(&prop_name))
                    {
                        literals = known.clone();
                    }
                }
            }
        }
    }

    // 4. Union whose members are themselves type references; members that
    // resolve to nothing contribute nothing
    if literals.is_empty() {
        if let swc_ast::TsType::TsUnionOrIntersectionType(
            swc_ast::TsUnionOrIntersectionType::TsUnionType(union),
        ) = ty
        {
            for member in &union.types {
                if let swc_ast::TsType::TsTypeRef(ref_type) = member.as_ref() {
                    let name = entity_name_to_string(&ref_type.type_name);
                    if let Some(known) = collected.aliases.get(&name) {
                        literals.extend(known.iter().cloned());
                    }
                }
            }
        }
    }

    literals
}

/// Collect every string literal reachable through (possibly nested) unions,
/// discarding non-literal branches silently
fn literals_from_type(ty: &swc_ast::TsType) -> Vec<String> {
    let mut literals = Vec::new();
    collect_literals(ty, &mut literals);
    literals
}

fn collect_literals(ty: &swc_ast::TsType, out: &mut Vec<String>) {
    match unwrap_parens(ty) {
        swc_ast::TsType::TsUnionOrIntersectionType(
            swc_ast::TsUnionOrIntersectionType::TsUnionType(union),
        ) => {
            for member in &union.types {
                collect_literals(member, out);
            }
        }
        swc_ast::TsType::TsLitType(lit) => {
            if let swc_ast::TsLit::Str(s) = &lit.lit {
                out.push(String::from_utf8_lossy(s.value.as_bytes()).to_string());
            }
        }
        _ => {}
    }
}

fn unwrap_parens(mut ty: &swc_ast::TsType) -> &swc_ast::TsType {
    while let swc_ast::TsType::TsParenthesizedType(paren) = ty {
        ty = &paren.type_ann;
    }
    ty
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

/// Merge a resolved set into the method table under the conflict policy
fn merge_options(
    map: &mut IndexMap<String, Vec<String>>,
    name: String,
    values: Vec<String>,
    policy: MergePolicy,
) {
    match policy {
        MergePolicy::PreferLonger => match map.get(&name) {
            Some(existing) if existing.len() >= values.len() => {}
            _ => {
                map.insert(name, values);
            }
        },
        MergePolicy::KeepFirst => {
            if !map.contains_key(&name) {
                map.insert(name, values);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swc::parse_typescript_source;

    fn context_of(sources: &[(&str, &str)]) -> AnalysisContext {
        let modules = sources
            .iter()
            .map(|(name, source)| {
                let path = format!("/tmp/{}.ts", name.replace('/', "_"));
                (
                    name.to_string(),
                    parse_typescript_source(path, *source).unwrap(),
                )
            })
            .collect();
        AnalysisContext::from_modules(modules)
    }

    fn resolve(sources: &[(&str, &str)]) -> LiteralOptionTable {
        resolve_literal_options(&context_of(sources), MergePolicy::PreferLonger)
    }

    #[test]
    fn test_alias_reference_resolution() {
        let table = resolve(&[(
            "runner",
            r#"
export type Mode = 'fast' | 'slow';
export class Runner {
    run(mode: Mode): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("run"),
            Some(&vec!["fast".to_string(), "slow".to_string()])
        );
        assert_eq!(
            table.type_aliases.get("Mode"),
            Some(&vec!["fast".to_string(), "slow".to_string()])
        );
    }

    #[test]
    fn test_indexed_access_resolution() {
        let table = resolve(&[(
            "config",
            r#"
interface Config {
    feel: 'calm' | 'wild';
}
export class Tuner {
    set(x: Config['feel']): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("set"),
            Some(&vec!["calm".to_string(), "wild".to_string()])
        );
    }

    #[test]
    fn test_direct_union_dedup_keeps_declaration_order() {
        let table = resolve(&[(
            "direct",
            r#"
export class Painter {
    palette(p: 'warm' | 'cool' | 'warm'): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("palette"),
            Some(&vec!["warm".to_string(), "cool".to_string()])
        );
    }

    #[test]
    fn test_nested_union_is_flattened() {
        let table = resolve(&[(
            "nested",
            "export type Tone = 'soft' | ('loud' | 'sharp');\n",
        )]);

        assert_eq!(
            table.type_aliases.get("Tone"),
            Some(&vec![
                "soft".to_string(),
                "loud".to_string(),
                "sharp".to_string()
            ])
        );
    }

    #[test]
    fn test_union_of_references() {
        let table = resolve(&[(
            "refs",
            r#"
type MusicGenre = 'jazz' | 'rock';
type AudioGenre = 'podcast' | 'audiobook';
export class AudioBuilder {
    genre(g: MusicGenre | AudioGenre | UnknownRef): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("genre"),
            Some(&vec![
                "jazz".to_string(),
                "rock".to_string(),
                "podcast".to_string(),
                "audiobook".to_string()
            ])
        );
    }

    #[test]
    fn test_unresolvable_parameter_contributes_nothing() {
        let table = resolve(&[(
            "plain",
            r#"
export class Plain {
    label(text: string): void {}
}
"#,
        )]);

        assert!(table.method_options.is_empty());
    }

    #[test]
    fn test_cross_module_resolution() {
        let table = resolve(&[
            ("types", "export type Pacing = 'slow' | 'medium' | 'fast';\n"),
            (
                "video",
                r#"
export class VideoBuilder {
    pacing(p: Pacing): void {}
}
"#,
            ),
        ]);

        assert_eq!(
            table.method_options.get("pacing"),
            Some(&vec![
                "slow".to_string(),
                "medium".to_string(),
                "fast".to_string()
            ])
        );
    }

    #[test]
    fn test_conflict_prefers_longer_set() {
        let table = resolve(&[(
            "conflict",
            r#"
export class A {
    set(x: 'one'): void {}
}
export class B {
    set(x: 'a' | 'b' | 'c'): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("set"),
            Some(&vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_conflict_tie_keeps_first_seen() {
        let table = resolve(&[(
            "tie",
            r#"
export class A {
    set(x: 'first' | 'second'): void {}
}
export class B {
    set(x: 'third' | 'fourth'): void {}
}
"#,
        )]);

        assert_eq!(
            table.method_options.get("set"),
            Some(&vec!["first".to_string(), "second".to_string()])
        );
    }

    #[test]
    fn test_keep_first_policy() {
        let ctx = context_of(&[(
            "policy",
            r#"
export class A {
    set(x: 'one'): void {}
}
export class B {
    set(x: 'a' | 'b' | 'c'): void {}
}
"#,
        )]);

        let table = resolve_literal_options(&ctx, MergePolicy::KeepFirst);
        assert_eq!(
            table.method_options.get("set"),
            Some(&vec!["one".to_string()])
        );
    }
}
