use std::collections::HashMap;
use std::sync::Arc;

use rowan::{GreenNode, NodeOrToken};
use text_size::{TextRange, TextSize};

use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::ParseError;

/// Index of a node inside its [`SourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    kind: SyntaxKind,
    /// Span of the significant tokens below this node.
    range: TextRange,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Where a node sits in the rowan tree: kind, full range (trivia included) and depth.
type SyntaxKey = (SyntaxKind, TextRange, usize);

/// Immutable parsed compilation unit.
///
/// The lossless rowan green tree is the source of truth. On top of it, every node and every
/// significant token gets a [`NodeId`] in a flat index, so semantic code can hold plain `Copy`
/// handles. Trivia stays in the green tree only, and indexed ranges exclude it.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceTree {
    text: Arc<str>,
    green: GreenNode,
    nodes: Vec<NodeData>,
    by_syntax: HashMap<SyntaxKey, NodeId>,
    root: NodeId,
    errors: Vec<ParseError>,
}

impl SourceTree {
    pub(crate) fn new(text: &str, green: GreenNode, errors: Vec<ParseError>) -> Self {
        let syntax = SyntaxNode::new_root(green.clone());
        debug_assert_eq!(syntax.text_range().len(), TextSize::of(text));

        let mut index = Indexer {
            nodes: Vec::new(),
            by_syntax: HashMap::new(),
        };
        let root = index.node(&syntax, None, 0);
        index.nodes[root.index()].range = TextRange::up_to(TextSize::of(text));

        SourceTree {
            text: Arc::from(text),
            green,
            nodes: index.nodes,
            by_syntax: index.by_syntax,
            root,
            errors,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The lossless rowan tree, trivia included.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.data(node).kind
    }

    pub fn range(&self, node: NodeId) -> TextRange {
        self.data(node).range
    }

    pub fn node_text(&self, node: NodeId) -> &str {
        &self.text[self.range(node)]
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    /// Child nodes and significant tokens, in source order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.data(node).children
    }

    /// Child nodes that are not token leaves.
    pub fn child_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| !self.kind(child).is_token())
    }

    pub fn child_of_kind(&self, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    pub fn children_of_kind(
        &self,
        node: NodeId,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| self.kind(child) == kind)
    }

    /// `node` itself followed by its parent chain up to the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |&n| self.parent(n))
    }

    /// Pre-order walk over `node` and everything below it.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Smallest non-token node whose range contains `range`.
    pub fn covering_node(&self, range: TextRange) -> Option<NodeId> {
        let syntax = self.syntax();
        if !syntax.text_range().contains_range(range) {
            return None;
        }
        let covering = match syntax.covering_element(range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };

        // Rowan ranges include trivia; climb until the significant range covers too.
        let mut current = self.lookup(&covering)?;
        while !self.range(current).contains_range(range) {
            current = self.parent(current)?;
        }
        'descend: loop {
            for &child in self.children(current) {
                if !self.kind(child).is_token() && self.range(child).contains_range(range) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// The node whose range starts exactly at `offset` with the given kind, if any.
    pub fn find_node_at(&self, offset: TextSize, kind: SyntaxKind) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.kind(n) == kind && self.range(n).start() == offset)
    }

    fn lookup(&self, node: &SyntaxNode) -> Option<NodeId> {
        let depth = node.ancestors().count() - 1;
        self.by_syntax
            .get(&(node.kind(), node.text_range(), depth))
            .copied()
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()]
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&debug_dump(self))
    }
}

/// Rowan's indented `Kind@start..end` dump, tokens and trivia included.
pub fn debug_dump(tree: &SourceTree) -> String {
    format!("{:#?}", tree.syntax())
}

struct Indexer {
    nodes: Vec<NodeData>,
    by_syntax: HashMap<SyntaxKey, NodeId>,
}

impl Indexer {
    fn node(&mut self, syntax: &SyntaxNode, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = self.alloc(syntax.kind(), TextRange::empty(syntax.text_range().end()), parent);
        self.by_syntax
            .insert((syntax.kind(), syntax.text_range(), depth), id);

        let mut children = Vec::new();
        for element in syntax.children_with_tokens() {
            match element {
                NodeOrToken::Node(child) => children.push(self.node(&child, Some(id), depth + 1)),
                NodeOrToken::Token(token) if !token.kind().is_trivia() => {
                    children.push(self.alloc(token.kind(), token.text_range(), Some(id)));
                }
                NodeOrToken::Token(_) => {}
            }
        }

        // Nodes without significant tokens sit where the parser was when it closed them.
        let mut spans = children
            .iter()
            .map(|child| self.nodes[child.index()].range)
            .filter(|range| !range.is_empty());
        if let Some(first) = spans.next() {
            let range = spans.fold(first, |acc, range| acc.cover(range));
            self.nodes[id.index()].range = range;
        }
        self.nodes[id.index()].children = children;
        id
    }

    fn alloc(&mut self, kind: SyntaxKind, range: TextRange, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            range,
            parent,
            children: Vec::new(),
        });
        id
    }
}
