use serde::Serialize;

use crate::parsing::{
    blocks::Block,
    rope::span::Span,
    tokens::{Token, TokenKind, tokenize_block},
};

/// Structured view of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapkeyDefinition {
    pub block_id: usize,
    pub name: String,
    pub description: Option<String>,
    pub label: Option<String>,
    pub system_instruction: Option<String>,
    /// Same as the block span.
    pub range: Span,
    /// Nested-call targets in source order, duplicates kept.
    pub called_names: Vec<String>,
    pub terminated: bool,
}

impl MapkeyDefinition {
    pub fn calls(&self, name: &str) -> bool {
        self.called_names.iter().any(|c| c == name)
    }
}

pub fn build_definition(block: &Block) -> MapkeyDefinition {
    from_tokens(block, &tokenize_block(block))
}

/// Builds a definition from already-computed block tokens.
///
/// When a tag kind occurs more than once, the first occurrence wins.
pub fn from_tokens(block: &Block, tokens: &[Token]) -> MapkeyDefinition {
    let first = |kind: TokenKind| {
        tokens
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.value.clone())
    };

    MapkeyDefinition {
        block_id: block.id,
        name: block.name.clone(),
        description: first(TokenKind::Description),
        label: first(TokenKind::Label),
        system_instruction: first(TokenKind::SystemInstruction),
        range: block.span,
        called_names: tokens
            .iter()
            .filter(|t| t.kind == TokenKind::NestedCall)
            .map(|t| t.value.clone())
            .collect(),
        terminated: block.terminated,
    }
}
