use crate::geometry::point::{Path64, Paths64};
use crate::geometry::polygon::area;

#[derive(Debug, Clone, Default, PartialEq)]
struct PolyNode {
    polygon: Path64,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Nesting of closed output polygons. Node 0 is the root and carries no
/// polygon; its children are the outermost polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyTree {
    nodes: Vec<PolyNode>,
}

impl PolyTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![PolyNode::default()],
        }
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
    }

    #[inline(always)]
    pub fn root_index(&self) -> usize {
        0
    }

    pub fn root(&self) -> PolyPath<'_> {
        PolyPath {
            tree: self,
            index: 0,
        }
    }

    pub fn add_child(&mut self, parent: usize, polygon: Path64) -> usize {
        let index = self.nodes.len();

        self.nodes.push(PolyNode {
            polygon,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);

        index
    }

    pub fn count(&self) -> usize {
        self.nodes[0].children.len()
    }

    pub fn child(&self, index: usize) -> Option<PolyPath<'_>> {
        self.root().child(index)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.root().area()
    }
}

impl Default for PolyTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PolyPath<'a> {
    tree: &'a PolyTree,
    index: usize,
}

impl<'a> PolyPath<'a> {
    fn node(&self) -> &'a PolyNode {
        &self.tree.nodes[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn polygon(&self) -> &'a Path64 {
        &self.node().polygon
    }

    pub fn parent(&self) -> Option<PolyPath<'a>> {
        self.node().parent.map(|index| PolyPath {
            tree: self.tree,
            index,
        })
    }

    pub fn count(&self) -> usize {
        self.node().children.len()
    }

    pub fn child(&self, index: usize) -> Option<PolyPath<'a>> {
        self.node().children.get(index).map(|&index| PolyPath {
            tree: self.tree,
            index,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = PolyPath<'a>> + 'a {
        let tree = self.tree;

        self.node()
            .children
            .iter()
            .map(move |&index| PolyPath { tree, index })
    }

    /// Depth below the root; top level polygons are at level 1.
    pub fn level(&self) -> u32 {
        let mut result = 0;
        let mut parent = self.node().parent;

        while let Some(index) = parent {
            result += 1;
            parent = self.tree.nodes[index].parent;
        }

        result
    }

    pub fn is_hole(&self) -> bool {
        let level = self.level();

        level != 0 && level % 2 == 0
    }

    /// Signed area of this polygon plus its whole subtree.
    pub fn area(&self) -> f64 {
        self.children()
            .fold(area(self.polygon()), |result, child| result + child.area())
    }
}

fn collect_paths(node: PolyPath<'_>, paths: &mut Paths64) {
    for child in node.children() {
        paths.push(child.polygon().clone());
        collect_paths(child, paths);
    }
}

/// Flattens the tree depth first, parents before their children.
pub fn poly_tree_to_paths(tree: &PolyTree) -> Paths64 {
    let mut result = Paths64::new();

    collect_paths(tree.root(), &mut result);

    result
}
