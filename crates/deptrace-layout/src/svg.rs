//! SVG output for laid-out trees.
//!
//! A [`Diagram`] stacks any number of independently laid-out trees on one
//! canvas; each tree starts at the previous tree's maximum height. The
//! document has a single outer frame sized to the union of all canvases,
//! one `<line>` per edge, and one `<rect>` plus centred `<text>` per node.

use deptrace_core::tree::TreeNode;

use crate::layout::{layout, LayoutConfig, PositionedTree};

const FONT_SIZE: f64 = 12.0;

/// One or more trees stacked vertically on a shared canvas.
#[derive(Debug, Clone)]
pub struct Diagram {
    config: LayoutConfig,
    trees: Vec<PositionedTree>,
}

impl Diagram {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    /// Lay out `tree` below everything already in the diagram.
    pub fn push<T: TreeNode>(&mut self, tree: &T) -> &PositionedTree {
        let offset = self.next_offset();
        self.trees.push(layout(tree, offset, &self.config));
        &self.trees[self.trees.len() - 1]
    }

    /// Vertical offset the next pushed tree will be laid out at.
    pub fn next_offset(&self) -> f64 {
        match self.trees.last() {
            Some(last) => last.height,
            None => 0.0,
        }
    }

    pub fn trees(&self) -> &[PositionedTree] {
        &self.trees
    }

    pub fn width(&self) -> f64 {
        self.trees.iter().map(|t| t.width).fold(0.0, f64::max)
    }

    pub fn height(&self) -> f64 {
        self.trees.last().map(|t| t.height).unwrap_or(0.0)
    }

    /// Serialize the whole diagram as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (width, height) = (self.width(), self.height());
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\" font-family=\"monospace\" font-size=\"{FONT_SIZE}\">\n"
        ));
        out.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>\n"
        ));
        for tree in &self.trees {
            write_edges(&mut out, tree);
        }
        for tree in &self.trees {
            write_nodes(&mut out, tree);
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Render a single laid-out tree as a standalone SVG document.
pub fn render_svg(tree: &PositionedTree) -> String {
    Diagram {
        config: tree.config,
        trees: vec![tree.clone()],
    }
    .to_svg()
}

// Edges are drawn first so node boxes paint over their endpoints.
fn write_edges(out: &mut String, tree: &PositionedTree) {
    for edge in tree.edges() {
        out.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#8c8c8c\" stroke-width=\"1\"/>\n",
            edge.x1, edge.y1, edge.x2, edge.y2
        ));
    }
}

fn write_nodes(out: &mut String, tree: &PositionedTree) {
    let cfg = &tree.config;
    for node in &tree.nodes {
        let (fill, dash) = if node.cycle {
            ("#fdecea", " stroke-dasharray=\"4 2\"")
        } else {
            ("#eef3fb", "")
        };
        out.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" fill=\"{fill}\" stroke=\"#3a5a8c\"{dash}/>\n",
            node.x, node.y, cfg.node_width, cfg.node_height
        ));
        out.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>\n",
            node.x + cfg.node_width / 2.0,
            node.y + cfg.node_height / 2.0,
            escape_xml(&node.label)
        ));
    }
}

/// Escape the five XML-reserved characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
