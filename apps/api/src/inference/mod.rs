// Inference: the opaque model seam, the bundled JSON artifact format, and the
// adapter that turns a normalized row into a response payload.
// Inference is CPU-bound; callers on the async runtime go through spawn_blocking.

pub mod adapter;
pub mod linear;
pub mod model;

#[cfg(test)]
pub mod testing;

pub use adapter::{InferenceAdapter, PredictionResult, ResponsePolicy};
pub use model::{InferenceError, Model};
