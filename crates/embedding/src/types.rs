use serde::{Deserialize, Serialize};

/// A semantic embedding for one piece of text.
///
/// Immutable once produced. The core only produces and consumes embeddings
/// transiently; persisting them is the storage layer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The vector itself, dimensionality fixed by the provider.
    pub vector: Vec<f32>,
    /// `vector.len()`, denormalized for response payloads.
    pub dim: usize,
    /// Which model produced the vector.
    pub model: String,
}

impl Embedding {
    pub fn new(vector: Vec<f32>, model: impl Into<String>) -> Self {
        Self {
            dim: vector.len(),
            vector,
            model: model.into(),
        }
    }
}
