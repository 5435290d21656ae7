//! # Text Spanning

pub mod patterns;
pub mod pretokenizer;
pub mod roberta_lexer;
pub mod span_lexer;

#[doc(inline)]
pub use patterns::ROBERTA_WORD_PATTERN;
#[doc(inline)]
pub use pretokenizer::{Chunk, Pretokenizer, SpanRef};
#[doc(inline)]
pub use roberta_lexer::RobertaLexer;
#[doc(inline)]
pub use span_lexer::SpanLexer;
