//! Declaration extraction
//!
//! Walks a parsed module's top-level statements and produces a [`ModuleDoc`]
//! of exported declarations. Only syntactically exported statements become
//! entries; namespace bodies are still visited so exported declarations
//! nested inside them are found. Class members are filtered by privacy
//! (the `private` keyword, ECMAScript `#` members) and by the leading
//! underscore naming convention, each rule applied independently.

use crate::entry::{DocEntry, DocEntryKind, ModuleDoc};
use crate::js_doc::DocComment;
use crate::params::{render_params, Param, ANY_TYPE};
use crate::swc::{module_item_span, prop_name_to_string, ParsedModule};
use deno_ast::swc::ast as swc_ast;
use deno_ast::swc::common::{Span, Spanned};

/// Initializers at or above this length are left out of variable signatures
const SHORT_INITIALIZER_LIMIT: usize = 100;

/// Extract documentation for one module
pub fn extract_module(parsed: &ParsedModule, name: &str) -> ModuleDoc {
    let items = &parsed.module().body;

    let mut module = ModuleDoc::new(name);
    visit_items(parsed, items, &mut module.exports);
    module.description = module_description(parsed, items);
    module
}

/// Visit module items, collecting exported declarations.
///
/// Namespace blocks are recursed into regardless of their own export
/// status; everything else that is not exported is skipped.
fn visit_items(parsed: &ParsedModule, items: &[swc_ast::ModuleItem], out: &mut Vec<DocEntry>) {
    for item in items {
        match item {
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDecl(export)) => {
                if let swc_ast::Decl::TsModule(module) = &export.decl {
                    visit_namespace(parsed, module, out);
                } else {
                    for mut entry in extract_decl(parsed, &export.decl, export.span) {
                        entry.exported = true;
                        out.push(entry);
                    }
                }
            }
            swc_ast::ModuleItem::ModuleDecl(swc_ast::ModuleDecl::ExportDefaultDecl(export)) => {
                if let Some(mut entry) = extract_default_decl(parsed, &export.decl, export.span) {
                    entry.exported = true;
                    out.push(entry);
                }
            }
            swc_ast::ModuleItem::Stmt(swc_ast::Stmt::Decl(swc_ast::Decl::TsModule(module))) => {
                visit_namespace(parsed, module, out);
            }
            _ => {}
        }
    }
}

/// Recurse into a namespace body
fn visit_namespace(
    parsed: &ParsedModule,
    module: &swc_ast::TsModuleDecl,
    out: &mut Vec<DocEntry>,
) {
    if let Some(swc_ast::TsNamespaceBody::TsModuleBlock(block)) = &module.body {
        visit_items(parsed, &block.body, out);
    }
}

/// Extract entries from an exported declaration.
///
/// `doc_span` is where the doc comment attaches; for exported declarations
/// that is the export statement, not the inner declaration.
fn extract_decl(
    parsed: &ParsedModule,
    decl: &swc_ast::Decl,
    doc_span: Span,
) -> Vec<DocEntry> {
    match decl {
        swc_ast::Decl::Fn(fn_decl) => vec![extract_function(
            parsed,
            fn_decl.ident.sym.to_string(),
            &fn_decl.function,
            doc_at(parsed, doc_span),
            DocEntryKind::Function,
        )],
        swc_ast::Decl::Class(class_decl) => vec![extract_class(
            parsed,
            class_decl.ident.sym.to_string(),
            &class_decl.class,
            doc_at(parsed, doc_span),
        )],
        swc_ast::Decl::TsInterface(iface) => {
            vec![extract_interface(parsed, iface, doc_at(parsed, doc_span))]
        }
        swc_ast::Decl::TsTypeAlias(alias) => {
            vec![extract_type_alias(parsed, alias, doc_at(parsed, doc_span))]
        }
        swc_ast::Decl::Var(var_decl) => {
            extract_variables(parsed, var_decl, doc_at(parsed, doc_span))
        }
        _ => vec![],
    }
}

/// Extract an entry from a default-exported declaration
fn extract_default_decl(
    parsed: &ParsedModule,
    decl: &swc_ast::DefaultDecl,
    doc_span: Span,
) -> Option<DocEntry> {
    match decl {
        swc_ast::DefaultDecl::Fn(fn_expr) => {
            let name = fn_expr
                .ident
                .as_ref()
                .map(|i| i.sym.to_string())
                .unwrap_or_else(|| "default".to_string());
            Some(extract_function(
                parsed,
                name,
                &fn_expr.function,
                doc_at(parsed, doc_span),
                DocEntryKind::Function,
            ))
        }
        swc_ast::DefaultDecl::Class(class_expr) => {
            let name = class_expr
                .ident
                .as_ref()
                .map(|i| i.sym.to_string())
                .unwrap_or_else(|| "default".to_string());
            Some(extract_class(
                parsed,
                name,
                &class_expr.class,
                doc_at(parsed, doc_span),
            ))
        }
        swc_ast::DefaultDecl::TsInterfaceDecl(iface) => {
            Some(extract_interface(parsed, iface, doc_at(parsed, doc_span)))
        }
    }
}

/// Extract a function or method entry
fn extract_function(
    parsed: &ParsedModule,
    name: String,
    function: &swc_ast::Function,
    doc: DocComment,
    kind: DocEntryKind,
) -> DocEntry {
    let parameters: Vec<Param> = function
        .params
        .iter()
        .map(|p| param_from_pat(parsed, &p.pat, &doc))
        .collect();
    let return_type = type_text(parsed, function.return_type.as_deref());

    function_entry(name, parameters, return_type, doc, kind)
}

/// Assemble a function-shaped entry from its parts
fn function_entry(
    name: String,
    parameters: Vec<Param>,
    return_type: String,
    doc: DocComment,
    kind: DocEntryKind,
) -> DocEntry {
    let signature = format!("{}({}): {}", name, render_params(&parameters), return_type);
    let return_description = doc.return_description().map(str::to_string);

    let mut entry = DocEntry::new(name, kind).with_doc(doc);
    entry.signature = Some(signature);
    entry.parameters = parameters;
    entry.return_type = Some(return_type);
    entry.return_description = return_description;
    entry
}

/// Extract an interface entry.
///
/// Property and method signatures land in one list, in source order.
fn extract_interface(
    parsed: &ParsedModule,
    iface: &swc_ast::TsInterfaceDecl,
    doc: DocComment,
) -> DocEntry {
    let name = iface.id.sym.to_string();
    let mut members = Vec::new();

    for member in &iface.body.body {
        match member {
            swc_ast::TsTypeElement::TsPropertySignature(prop) => {
                let Some(prop_name) = key_expr_name(&prop.key) else {
                    continue;
                };
                let ty = type_text(parsed, prop.type_ann.as_deref());
                let member_doc = doc_at(parsed, prop.span);
                let signature = format!(
                    "{}{}: {}",
                    prop_name,
                    if prop.optional { "?" } else { "" },
                    ty
                );

                let mut entry = DocEntry::new(prop_name, DocEntryKind::Property);
                entry.signature = Some(signature);
                entry.description = member_doc.description;
                members.push(entry);
            }
            swc_ast::TsTypeElement::TsMethodSignature(method) => {
                let Some(method_name) = key_expr_name(&method.key) else {
                    continue;
                };
                let member_doc = doc_at(parsed, method.span);
                let parameters: Vec<Param> = method
                    .params
                    .iter()
                    .map(|p| param_from_fn_param(parsed, p))
                    .collect();
                let return_type = type_text(parsed, method.type_ann.as_deref());
                let signature = format!(
                    "{}({}): {}",
                    method_name,
                    render_params(&parameters),
                    return_type
                );

                let mut entry = DocEntry::new(method_name, DocEntryKind::Method);
                entry.signature = Some(signature);
                entry.parameters = parameters;
                entry.return_type = Some(return_type);
                entry.description = member_doc.description;
                members.push(entry);
            }
            _ => {}
        }
    }

    let mut entry = DocEntry::new(name, DocEntryKind::Interface).with_doc(doc);
    entry.properties = members;
    entry
}

/// Extract a class entry, filtering private and underscore-named members
fn extract_class(
    parsed: &ParsedModule,
    name: String,
    class: &swc_ast::Class,
    doc: DocComment,
) -> DocEntry {
    let mut methods = Vec::new();
    let mut properties = Vec::new();

    for member in &class.body {
        match member {
            swc_ast::ClassMember::Method(method) => {
                if matches!(
                    method.accessibility,
                    Some(swc_ast::Accessibility::Private)
                ) {
                    continue;
                }
                if !matches!(method.kind, swc_ast::MethodKind::Method) {
                    continue;
                }
                let method_name = prop_name_to_string(&method.key);
                if method_name.starts_with('_') {
                    continue;
                }
                let member_doc = doc_at(parsed, method.span);
                methods.push(extract_function(
                    parsed,
                    method_name,
                    &method.function,
                    member_doc,
                    DocEntryKind::Method,
                ));
            }
            swc_ast::ClassMember::ClassProp(prop) => {
                if matches!(prop.accessibility, Some(swc_ast::Accessibility::Private)) {
                    continue;
                }
                let prop_name = prop_name_to_string(&prop.key);
                if prop_name.starts_with('_') {
                    continue;
                }
                let member_doc = doc_at(parsed, prop.span);
                let ty = type_text(parsed, prop.type_ann.as_deref());
                let signature = format!("{}: {}", prop_name, ty);

                let mut entry = DocEntry::new(prop_name, DocEntryKind::Property);
                entry.signature = Some(signature);
                entry.description = member_doc.description;
                properties.push(entry);
            }
            // `#name` members are private at the language level
            swc_ast::ClassMember::PrivateMethod(_) | swc_ast::ClassMember::PrivateProp(_) => {}
            _ => {}
        }
    }

    let mut entry = DocEntry::new(name, DocEntryKind::Class).with_doc(doc);
    entry.methods = methods;
    entry.properties = properties;
    entry
}

/// Extract a type alias entry; the right-hand side is rendered verbatim
fn extract_type_alias(
    parsed: &ParsedModule,
    alias: &swc_ast::TsTypeAliasDecl,
    doc: DocComment,
) -> DocEntry {
    let name = alias.id.sym.to_string();
    let rhs = parsed.text_for_span(alias.type_ann.span());
    let signature = format!("type {} = {}", name, rhs);

    DocEntry::new(name, DocEntryKind::TypeAlias)
        .with_signature(signature)
        .with_doc(doc)
}

/// Extract variable entries from one statement.
///
/// Co-declared bindings become independent entries sharing the statement's
/// doc comment. Object-literal initializers contribute nested method
/// entries for their function-valued properties.
fn extract_variables(
    parsed: &ParsedModule,
    var_decl: &swc_ast::VarDecl,
    doc: DocComment,
) -> Vec<DocEntry> {
    let mut entries = Vec::new();

    for declarator in &var_decl.decls {
        let swc_ast::Pat::Ident(ident) = &declarator.name else {
            continue;
        };
        let name = ident.sym.to_string();

        let mut signature = name.clone();
        if let Some(type_ann) = &ident.type_ann {
            signature.push_str(": ");
            signature.push_str(parsed.text_for_span(type_ann.type_ann.span()));
        } else if let Some(init) = &declarator.init {
            let init_text = parsed.text_for_span(init.span());
            if init_text.len() < SHORT_INITIALIZER_LIMIT {
                signature.push_str(" = ");
                signature.push_str(init_text);
            }
        }

        let mut methods = Vec::new();
        if let Some(init) = &declarator.init {
            if let swc_ast::Expr::Object(object) = init.as_ref() {
                methods = extract_object_methods(parsed, object);
            }
        }

        let mut entry = DocEntry::new(name, DocEntryKind::Variable).with_doc(doc.clone());
        entry.signature = Some(signature);
        entry.methods = methods;
        entries.push(entry);
    }

    entries
}

/// Extract method entries from an object literal's function-valued
/// properties; everything else in the literal is ignored.
fn extract_object_methods(
    parsed: &ParsedModule,
    object: &swc_ast::ObjectLit,
) -> Vec<DocEntry> {
    let mut methods = Vec::new();

    for prop in &object.props {
        let swc_ast::PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        match prop.as_ref() {
            swc_ast::Prop::KeyValue(kv) => {
                let name = prop_name_to_string(&kv.key);
                let prop_doc = doc_at(parsed, prop.span());
                match kv.value.as_ref() {
                    swc_ast::Expr::Arrow(arrow) => {
                        let parameters: Vec<Param> = arrow
                            .params
                            .iter()
                            .map(|p| param_from_pat(parsed, p, &prop_doc))
                            .collect();
                        let return_type = type_text(parsed, arrow.return_type.as_deref());
                        methods.push(function_entry(
                            name,
                            parameters,
                            return_type,
                            prop_doc,
                            DocEntryKind::Method,
                        ));
                    }
                    swc_ast::Expr::Fn(fn_expr) => {
                        methods.push(extract_function(
                            parsed,
                            name,
                            &fn_expr.function,
                            prop_doc,
                            DocEntryKind::Method,
                        ));
                    }
                    _ => {}
                }
            }
            swc_ast::Prop::Method(method) => {
                let name = prop_name_to_string(&method.key);
                let prop_doc = doc_at(parsed, prop.span());
                methods.push(extract_function(
                    parsed,
                    name,
                    &method.function,
                    prop_doc,
                    DocEntryKind::Method,
                ));
            }
            _ => {}
        }
    }

    methods
}

/// Recover the module-level description.
///
/// Two strategies: a `module` tag on the first statement's doc comment, and
/// a leading block comment at the very top of the file. The leading block
/// comment always wins when its shape matches.
fn module_description(
    parsed: &ParsedModule,
    items: &[swc_ast::ModuleItem],
) -> Option<String> {
    let mut description = None;

    if let Some(first) = items.first() {
        let doc = doc_at(parsed, module_item_span(first));
        if doc.tags.contains_key("module") {
            description = doc.description;
        }
    }

    if let Some(leading) = leading_block_comment(parsed.source_text()) {
        description = Some(leading);
    }

    description
}

/// Re-derive a description from a file-leading `/**` block comment.
///
/// The comment must open the file and end its first line after `/**` with
/// only whitespace; delimiters and per-line `*` markers are stripped.
fn leading_block_comment(text: &str) -> Option<String> {
    let rest = text.strip_prefix("/**")?;
    let newline = rest.find('\n')?;
    if !rest[..newline].trim().is_empty() {
        return None;
    }
    let end = rest.find("*/")?;
    let comment = &text[..3 + end + 2];

    let lines: Vec<&str> = comment.split('\n').collect();
    if lines.len() < 2 {
        return None;
    }
    let body = lines[1..lines.len() - 1]
        .iter()
        .map(|l| strip_line_marker(l))
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip a line's leading whitespace-and-`*` marker, keeping the line
/// untouched when no marker is present
fn strip_line_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

/// Render an annotation's type text, falling back to the `any` sentinel
fn type_text(parsed: &ParsedModule, ann: Option<&swc_ast::TsTypeAnn>) -> String {
    ann.map(|t| parsed.text_for_span(t.type_ann.span()).to_string())
        .unwrap_or_else(|| ANY_TYPE.to_string())
}

/// Extract a parameter from a binding pattern
fn param_from_pat(parsed: &ParsedModule, pat: &swc_ast::Pat, doc: &DocComment) -> Param {
    let mut param = match pat {
        swc_ast::Pat::Ident(i) => {
            let mut param = Param::new(i.sym.to_string(), type_text(parsed, i.type_ann.as_deref()));
            param.optional = i.optional;
            param
        }
        swc_ast::Pat::Assign(assign) => {
            let mut param = param_from_pat(parsed, &assign.left, doc);
            param.optional = true;
            param.default_value = Some(parsed.text_for_span(assign.right.span()).to_string());
            param
        }
        swc_ast::Pat::Rest(rest) => {
            let mut param = param_from_pat(parsed, &rest.arg, doc);
            param.is_rest = true;
            param
        }
        swc_ast::Pat::Array(arr) => {
            Param::new("destructured", type_text(parsed, arr.type_ann.as_deref()))
        }
        swc_ast::Pat::Object(obj) => {
            Param::new("destructured", type_text(parsed, obj.type_ann.as_deref()))
        }
        swc_ast::Pat::Expr(_) | swc_ast::Pat::Invalid(_) => Param::untyped("unknown"),
    };

    if param.description.is_none() {
        param.description = doc.param_description(&param.name).map(str::to_string);
    }
    param
}

/// Extract a parameter from an interface/type-member function parameter
fn param_from_fn_param(parsed: &ParsedModule, param: &swc_ast::TsFnParam) -> Param {
    match param {
        swc_ast::TsFnParam::Ident(i) => {
            let mut param = Param::new(i.sym.to_string(), type_text(parsed, i.type_ann.as_deref()));
            param.optional = i.optional;
            param
        }
        swc_ast::TsFnParam::Array(arr) => {
            Param::new("destructured", type_text(parsed, arr.type_ann.as_deref()))
        }
        swc_ast::TsFnParam::Object(obj) => {
            Param::new("destructured", type_text(parsed, obj.type_ann.as_deref()))
        }
        swc_ast::TsFnParam::Rest(rest) => {
            let mut param = match rest.arg.as_ref() {
                swc_ast::Pat::Ident(i) => {
                    Param::new(i.sym.to_string(), type_text(parsed, i.type_ann.as_deref()))
                }
                _ => Param::new("rest", type_text(parsed, rest.type_ann.as_deref())),
            };
            param.is_rest = true;
            param
        }
    }
}

/// Name of a member key expression, when statically known
fn key_expr_name(expr: &swc_ast::Expr) -> Option<String> {
    match expr {
        swc_ast::Expr::Ident(i) => Some(i.sym.to_string()),
        swc_ast::Expr::Lit(swc_ast::Lit::Str(s)) => {
            Some(String::from_utf8_lossy(s.value.as_bytes()).to_string())
        }
        _ => None,
    }
}

/// Interpret the doc comment attached at a span
fn doc_at(parsed: &ParsedModule, span: Span) -> DocComment {
    parsed
        .doc_comment_for_span(span)
        .map(|text| DocComment::parse(&text))
        .unwrap_or_default()
}
