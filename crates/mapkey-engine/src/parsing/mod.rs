pub mod blocks;
pub mod definition;
pub mod invariants;
pub mod rope;
pub mod tokens;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockBuilder, MapkeyLineClassifier, Segmented};
use rope::lines_with_spans;
use tokens::{Token, sort_tokens, tokenize_block};

pub fn segment(rope: &Rope) -> Segmented {
    let classifier = MapkeyLineClassifier;
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lr, &lc);
    }

    builder.finish()
}

/// Convenience: segment a string without keeping the rope around.
pub fn segment_str(text: &str) -> Segmented {
    segment(&Rope::from(text))
}

/// Every token of a segmented document: each block's tokens plus the
/// document-level ones, globally sorted.
pub fn document_tokens(seg: &Segmented) -> Vec<Token> {
    let mut out = seg.tokens.clone();
    for block in &seg.blocks {
        out.extend(tokenize_block(block));
    }
    sort_tokens(&mut out);
    out
}
