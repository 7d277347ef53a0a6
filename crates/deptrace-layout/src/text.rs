//! Box-drawn text trees.

use deptrace_core::tree::TreeNode;

/// Render `root` and all descendants:
///
/// ```text
/// 0x1::AptosFramework
/// ├── 0x1::AptosStdlib
/// │   └── 0x1::MoveStdlib
/// └── 0x1::MoveStdlib
/// ```
pub fn render_text<T: TreeNode>(root: &T) -> String {
    render_text_with_depth(root, None)
}

/// Like [`render_text`], but stops descending below `max_depth` levels.
pub fn render_text_with_depth<T: TreeNode>(root: &T, max_depth: Option<usize>) -> String {
    let mut output = format!("{}\n", root.label());
    if max_depth == Some(0) {
        return output;
    }
    let count = root.children().len();
    for (i, child) in root.children().iter().enumerate() {
        print_subtree(&mut output, child, "", i == count - 1, 1, max_depth);
    }
    output
}

fn print_subtree<T: TreeNode>(
    output: &mut String,
    node: &T,
    prefix: &str,
    is_last: bool,
    depth: usize,
    max_depth: Option<usize>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(&format!("{prefix}{connector}{}\n", node.label()));

    if let Some(max) = max_depth {
        if depth >= max {
            return;
        }
    }

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        print_subtree(output, child, &child_prefix, i == count - 1, depth + 1, max_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptrace_core::tree::{DependencyTreeNode, ModuleTreeNode};

    fn sample() -> DependencyTreeNode {
        DependencyTreeNode::new(
            "A",
            vec![
                DependencyTreeNode::new(
                    "B",
                    vec![DependencyTreeNode::leaf("C"), DependencyTreeNode::leaf("D")],
                ),
                DependencyTreeNode::new("E", vec![DependencyTreeNode::leaf("F")]),
            ],
        )
    }

    #[test]
    fn renders_branches_and_continuations() {
        let expected = "\
A
├── B
│   ├── C
│   └── D
└── E
    └── F
";
        assert_eq!(render_text(&sample()), expected);
    }

    #[test]
    fn single_node_has_no_connectors() {
        assert_eq!(render_text(&DependencyTreeNode::leaf("0x1::MoveStdlib")), "0x1::MoveStdlib\n");
    }

    #[test]
    fn depth_limit_truncates() {
        assert_eq!(render_text_with_depth(&sample(), Some(1)), "A\n├── B\n└── E\n");
        assert_eq!(render_text_with_depth(&sample(), Some(0)), "A\n");
    }

    #[test]
    fn works_for_module_trees() {
        let tree = ModuleTreeNode::new(
            "0x1::MoveStdlib",
            vec![ModuleTreeNode::leaf("0x1::vector"), ModuleTreeNode::leaf("0x1::option")],
        );
        assert_eq!(
            render_text(&tree),
            "0x1::MoveStdlib\n├── 0x1::vector\n└── 0x1::option\n"
        );
    }
}
