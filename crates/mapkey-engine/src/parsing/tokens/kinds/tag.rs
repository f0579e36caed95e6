use serde::Serialize;

use crate::parsing::tokens::types::TokenKind;

/// Metadata tags whose content is flattened into a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    /// `@MAPKEY_NAME`, the record's description.
    Name,
    /// `@MAPKEY_LABEL`, the record's menu label.
    Label,
    /// `@SYSTEM`, an operating-system instruction.
    System,
}

impl Tag {
    pub const ALL: [Tag; 3] = [Tag::Name, Tag::Label, Tag::System];

    pub fn literal(self) -> &'static str {
        match self {
            Tag::Name => "@MAPKEY_NAME",
            Tag::Label => "@MAPKEY_LABEL",
            Tag::System => "@SYSTEM",
        }
    }

    /// Kind of the content token this tag produces.
    pub fn content_kind(self) -> TokenKind {
        match self {
            Tag::Name => TokenKind::Description,
            Tag::Label => TokenKind::Label,
            Tag::System => TokenKind::SystemInstruction,
        }
    }
}
