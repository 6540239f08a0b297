//! Provider client adapters. Each adapter owns an OpenAI-compatible
//! transport configured for its backend; the resolver picks which one to
//! construct from the validated configuration.

pub mod azure;
pub mod jina;
pub mod ollama;
pub mod openai;
