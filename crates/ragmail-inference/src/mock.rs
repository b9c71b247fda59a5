//! Mock inference backend for deterministic testing.
//!
//! Implements both backend traits in-process: embeddings are a deterministic
//! bag-of-tokens projection (texts sharing words score higher under cosine
//! similarity, so ranking tests behave like a real embedding model), and
//! generation replies come from a caller-supplied queue with a fixed
//! fallback.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ragmail_core::{EmbeddingBackend, Error, GenerationBackend, Result, Vector};

/// A logged backend call, for assertions on call counts and inputs.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

/// Mock backend implementing both [`EmbeddingBackend`] and
/// [`GenerationBackend`].
#[derive(Clone)]
pub struct MockBackend {
    dimension: usize,
    default_response: String,
    responses: Arc<Mutex<VecDeque<String>>>,
    fail_embedding: bool,
    fail_generation: bool,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            dimension: 384,
            default_response: "Mock response".to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fail_embedding: false,
            fail_generation: false,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the fallback response for generation requests.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Queue responses returned by successive generation requests, in order.
    /// Once the queue is drained, the fixed fallback response is returned.
    pub fn with_response_queue<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut queue = self.responses.lock().unwrap();
            queue.extend(responses.into_iter().map(Into::into));
        }
        self
    }

    /// Make every embedding request fail.
    pub fn with_embedding_failure(mut self) -> Self {
        self.fail_embedding = true;
        self
    }

    /// Make every generation request fail.
    pub fn with_generation_failure(mut self) -> Self {
        self.fail_generation = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of embed calls.
    pub fn embed_call_count(&self) -> usize {
        self.count_calls("embed")
    }

    /// Get number of generation calls.
    pub fn generate_call_count(&self) -> usize {
        self.count_calls("generate")
    }

    fn count_calls(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
        });
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingBackend for MockBackend {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        for text in texts {
            self.log_call("embed", text);
        }

        if self.fail_embedding {
            return Err(Error::Embedding("simulated embedding failure".to_string()));
        }

        Ok(texts
            .iter()
            .map(|t| MockEmbeddingGenerator::generate(t, self.dimension))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embed"
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt);

        if self.fail_generation {
            return Err(Error::Generation(
                "simulated generation failure".to_string(),
            ));
        }

        let queued = self.responses.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| self.default_response.clone()))
    }

    fn model_name(&self) -> &str {
        "mock-gen"
    }
}

/// Deterministic embedding generator used by the mock backend.
pub struct MockEmbeddingGenerator;

impl MockEmbeddingGenerator {
    /// Generate a deterministic embedding from text.
    ///
    /// Each lowercased token is hashed to a dimension index and accumulated,
    /// then the vector is L2-normalized. The same text always produces the
    /// same embedding, and texts with overlapping vocabulary have higher
    /// cosine similarity.
    pub fn generate(text: &str, dimension: usize) -> Vector {
        let mut vec = vec![0.0f32; dimension];

        for token in text.split_whitespace() {
            let token: String = token
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let idx = (hasher.finish() as usize) % dimension;
            vec[idx] += 1.0;
        }

        Self::normalize(&mut vec);
        vec
    }

    /// Calculate cosine similarity between two vectors.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if mag_a > 0.0 && mag_b > 0.0 {
            dot / (mag_a * mag_b)
        } else {
            0.0
        }
    }

    fn normalize(vec: &mut [f32]) {
        let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            vec.iter_mut().for_each(|x| *x /= magnitude);
        }
    }
}
