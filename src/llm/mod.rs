pub mod ollama;
pub mod webhook;
use serde::Serialize;

/// Sampling parameters sent in the daemon's `options` object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl GenerationOptions {
    pub const CHAT: GenerationOptions = GenerationOptions {
        temperature: 0.7,
        top_p: 0.9,
        max_tokens: 1000,
    };

    pub const TASK: GenerationOptions = GenerationOptions {
        temperature: 0.3,
        top_p: 0.9,
        max_tokens: 2000,
    };
}
