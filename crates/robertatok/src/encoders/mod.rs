//! # Encoders
//!
//! The encoding result types, the [`TextEncoder`] trait, and
//! byte -> character offset mapping.

pub mod char_offsets;
pub mod encoding;
pub mod text_encoder;

#[doc(inline)]
pub use char_offsets::{CharOffsets, trim_space_offsets};
#[doc(inline)]
pub use encoding::{BatchEncoding, Encoding};
#[doc(inline)]
pub use text_encoder::{TextEncoder, encode_batch_sequential};
