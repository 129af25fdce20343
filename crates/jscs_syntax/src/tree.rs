//! The arena-backed syntax tree handed to the style engine.

use crate::node::{Node, NodeId, NodeType};
use crate::token::{Token, TokenId};

/// A fully parsed file: the node arena, the token stream (comments and the
/// EOF marker included), and the token-to-enclosing-node links computed once
/// at construction time.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    tokens: Vec<Token>,
    token_nodes: Vec<NodeId>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn new(mut nodes: Vec<Node>, tokens: Vec<Token>, root: NodeId) -> Self {
        link_parents(&mut nodes, root);
        let token_nodes = link_tokens(&nodes, &tokens, root);
        Self {
            nodes,
            tokens,
            token_nodes,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (TokenId(i as u32), t))
    }

    /// The innermost node whose range covers the token.
    pub fn enclosing_node(&self, token: TokenId) -> NodeId {
        self.token_nodes[token.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).kind.children()
    }

    /// Walks the ancestor chain starting at `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.parent(id);
            Some(id)
        })
    }

    /// Pre-order traversal of the whole tree. The callback may return
    /// `false` to skip the subtree below a node.
    pub fn walk(&self, mut visit: impl FnMut(NodeId, &Node) -> bool) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if !visit(id, node) {
                continue;
            }
            let children = node.kind.children();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
    }

    /// All nodes of the given types in source order.
    pub fn nodes_of_type(&self, types: &[NodeType]) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(|id, node| {
            if types.contains(&node.ty()) {
                out.push(id);
            }
            true
        });
        out
    }

    /// The first token whose range starts at or after the node's start.
    /// The EOF token never belongs to a node.
    pub fn first_token_of(&self, id: NodeId) -> Option<TokenId> {
        let node = self.node(id);
        let idx = self
            .tokens
            .partition_point(|tok| tok.range.start < node.range.start);
        let tok = self.tokens.get(idx)?;
        if tok.is_eof() || tok.range.end > node.range.end {
            None
        } else {
            Some(TokenId(idx as u32))
        }
    }

    /// The last token contained in the node's range. The zero-width EOF
    /// token is never part of a node.
    pub fn last_token_of(&self, id: NodeId) -> Option<TokenId> {
        let node = self.node(id);
        let mut idx = self
            .tokens
            .partition_point(|tok| tok.range.end <= node.range.end);
        if idx > 0 && self.tokens[idx - 1].is_eof() {
            idx -= 1;
        }
        if idx == 0 {
            return None;
        }
        let tok = &self.tokens[idx - 1];
        if tok.range.start >= node.range.start {
            Some(TokenId((idx - 1) as u32))
        } else {
            None
        }
    }
}

fn link_parents(nodes: &mut Vec<Node>, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let children = nodes[id.index()].kind.children();
        for child in children {
            nodes[child.index()].parent = Some(id);
            stack.push(child);
        }
    }
}

/// Assign every token its innermost enclosing node. Parents are visited
/// before children, so a child overwrites its slice of the parent's span and
/// the final assignment is the innermost one.
fn link_tokens(nodes: &[Node], tokens: &[Token], root: NodeId) -> Vec<NodeId> {
    let mut map = vec![root; tokens.len()];
    let mut stack = vec![root];
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(id) = stack.pop() {
        order.push(id);
        let children = nodes[id.index()].kind.children();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    for id in order {
        let node = &nodes[id.index()];
        let start = tokens.partition_point(|tok| tok.range.start < node.range.start);
        let end = tokens.partition_point(|tok| tok.range.start < node.range.end);
        for slot in &mut map[start..end] {
            *slot = id;
        }
    }
    map
}
