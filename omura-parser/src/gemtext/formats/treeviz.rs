//! Treeviz formatter for gemtext documents
//!
//! One line per node, nesting drawn with box connectors:
//!
//!     ⧉ 4 nodes
//!     ├─ § # Omura
//!     ├─ ⇒ gemini://x.example/ Example
//!     ├─ ☰ 2 items
//!     │ ├─ • first
//!     │ └─ • second
//!     └─ ↵
//!
//! Labels are truncated to 30 characters.
//!
//! Icons
//!     Root: ⧉
//!     Heading: §
//!     Link: ⇒
//!     List: ☰
//!     ListItem: •
//!     Pre: 𝒱
//!     Quote: "
//!     Text: ◦
//!     Break: ↵

use crate::gemtext::ast::traits::AstNode;
use crate::gemtext::ast::{Node, Root};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Root" => "⧉",
        "Heading" => "§",
        "Link" => "⇒",
        "List" => "☰",
        "ListItem" => "•",
        "Pre" => "𝒱",
        "Quote" => "\"",
        "Text" => "◦",
        "Break" => "↵",
        _ => "○",
    }
}

fn format_line(node: &dyn AstNode, prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let label = truncate(&node.display_label(), 30);
    format!("{}{} {} {}", prefix, connector, get_icon(node.node_type()), label)
        .trim_end()
        .to_string()
        + "\n"
}

fn format_node(node: &Node, prefix: &str, is_last: bool) -> String {
    let mut output = format_line(node, prefix, is_last);

    if let Node::List(list) = node {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let count = list.items.len();
        for (i, item) in list.items.iter().enumerate() {
            output.push_str(&format_line(item, &child_prefix, i == count - 1));
        }
    }

    output
}

pub fn to_treeviz_str(root: &Root) -> String {
    let mut output = format!("{} {}\n", get_icon(root.node_type()), root.display_label());
    let count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        output.push_str(&format_node(child, "", i == count - 1));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemtext::loader::DocumentLoader;

    #[test]
    fn test_treeviz_document() {
        let root = DocumentLoader::from_string(
            "# Omura\n=> gemini://x.example/ Example\n* first\n* second\n\n```sh\nls\n```\n",
        )
        .parse();
        insta::assert_snapshot!(to_treeviz_str(&root).trim_end(), @r###"
        ⧉ 5 nodes
        ├─ § # Omura
        ├─ ⇒ gemini://x.example/ Example
        ├─ ☰ 2 items
        │ ├─ • first
        │ └─ • second
        ├─ ↵
        └─ 𝒱 sh (1 lines)
        "###);
    }

    #[test]
    fn test_truncates_long_labels() {
        let root = DocumentLoader::from_string("a".repeat(40)).parse();
        let output = to_treeviz_str(&root);
        assert!(output.contains(&format!("◦ {}...", "a".repeat(30))));
    }
}
