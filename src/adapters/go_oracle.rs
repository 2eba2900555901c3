use crate::domain::ports::MethodOracle;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// 以 tree-sitter 解析 Go 原始碼，判斷方法是否已存在
#[derive(Debug, Clone, Copy, Default)]
pub struct GoMethodOracle;

impl GoMethodOracle {
    pub fn new() -> Self {
        Self
    }

    /// Same check as [`MethodOracle::method_exists`] on in-memory source.
    pub fn source_has_method(source: &str, struct_name: &str, method_name: &str) -> bool {
        let Some(tree) = parse_go(source) else {
            return false;
        };
        let bytes = source.as_bytes();
        let root = tree.root_node();
        let mut cursor = root.walk();

        let found = root
            .named_children(&mut cursor)
            .filter(|node| node.kind() == "method_declaration")
            .any(|decl| {
                let name = decl
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(bytes).ok());
                name == Some(method_name) && receiver_type(decl, bytes) == Some(struct_name)
            });
        found
    }
}

impl MethodOracle for GoMethodOracle {
    fn method_exists(&self, path: &Path, struct_name: &str, method_name: &str) -> bool {
        if !path.exists() {
            return false;
        }
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}, treating as absent", path.display(), e);
                return false;
            }
        };
        Self::source_has_method(&source, struct_name, method_name)
    }
}

// 解析失敗或語法樹含錯誤節點時回傳 None
fn parse_go(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_go::LANGUAGE.into()) {
        tracing::warn!("Failed to load Go grammar: {}", e);
        return None;
    }
    let tree = parser.parse(source, None)?;
    if tree.root_node().has_error() {
        tracing::debug!("Go source contains syntax errors, treating as unparsable");
        return None;
    }
    Some(tree)
}

/// Receiver type name of a method declaration: `T` for both `(t T)` and `(t *T)`.
fn receiver_type<'a>(decl: Node<'_>, bytes: &'a [u8]) -> Option<&'a str> {
    let receiver = decl.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|node| node.kind() == "parameter_declaration")?;
    let ty = param.child_by_field_name("type")?;

    let ident = match ty.kind() {
        "type_identifier" => ty,
        "pointer_type" => ty
            .named_child(0)
            .filter(|inner| inner.kind() == "type_identifier")?,
        _ => return None,
    };
    ident.utf8_text(bytes).ok()
}
