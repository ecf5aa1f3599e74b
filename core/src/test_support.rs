use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::ingredient::{
    entities::{IngredientAnalysis, ItemizedIngredient, NutritionFacts, ProductAnalysis},
    errors::EnrichmentError,
    ports::IngredientEnricher,
};

/// Enricher with canned answers that counts how often each name is requested.
#[derive(Default)]
pub struct StubEnricher {
    answers: HashMap<String, Result<IngredientAnalysis, EnrichmentError>>,
    batch_answer: Option<Result<Vec<ItemizedIngredient>, EnrichmentError>>,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
    batch_calls: AtomicUsize,
}

impl StubEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, name: &str, analysis: IngredientAnalysis) -> Self {
        self.answers.insert(name.to_string(), Ok(analysis));
        self
    }

    pub fn with_error(mut self, name: &str, error: EnrichmentError) -> Self {
        self.answers.insert(name.to_string(), Err(error));
        self
    }

    pub fn with_batch_items(mut self, items: Vec<ItemizedIngredient>) -> Self {
        self.batch_answer = Some(Ok(items));
        self
    }

    pub fn with_batch_error(mut self, error: EnrichmentError) -> Self {
        self.batch_answer = Some(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or_default()
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

impl IngredientEnricher for StubEnricher {
    async fn analyze(&self, name: &str) -> Result<IngredientAnalysis, EnrichmentError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.answers.get(name).cloned().unwrap_or_else(|| {
            Err(EnrichmentError::Request(format!(
                "no canned analysis for {name}"
            )))
        })
    }

    async fn analyze_batch(
        &self,
        names: Vec<String>,
        _nutrition_facts: Option<NutritionFacts>,
    ) -> Result<ProductAnalysis, EnrichmentError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);

        let items = match &self.batch_answer {
            Some(answer) => answer.clone()?,
            None => names
                .iter()
                .filter_map(|name| match self.answers.get(name) {
                    Some(Ok(analysis)) => Some(ItemizedIngredient {
                        ingredient_name: name.clone(),
                        analysis: analysis.clone(),
                    }),
                    _ => None,
                })
                .collect(),
        };

        Ok(ProductAnalysis {
            items,
            summary: None,
        })
    }
}
