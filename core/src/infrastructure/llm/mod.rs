pub mod gemini_client;
pub mod ingredient_enricher;

pub use gemini_client::GeminiLLMClient;
pub use ingredient_enricher::LlmIngredientEnricher;
