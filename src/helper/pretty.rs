use crate::tree::TreeNode;

const FILL: &str = "│  ";
const ITEM: &str = "├─ ";
const LAST: &str = "└─ ";
const EMPTY: &str = "   ";

/// Render the tree as indented text, one node per line.
#[must_use]
pub fn pretty(tree: &[TreeNode]) -> String {
    let mut lines = Vec::new();
    render(tree, "", &mut lines);
    lines.join("\n")
}

fn render(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let branch = if last { LAST } else { ITEM };
        lines.push(format!("{prefix}{branch}{}", node.name()));

        if let TreeNode::Dir(dir) = node {
            let fill = if last { EMPTY } else { FILL };
            render(&dir.nodes, &format!("{prefix}{fill}"), lines);
        }
    }
}
