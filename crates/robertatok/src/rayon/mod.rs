//! # Rayon Batch Encoding

pub mod rayon_encoder;

#[doc(inline)]
pub use rayon_encoder::{ParallelRayonEncoder, par_encode_batch};
