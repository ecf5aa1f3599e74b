use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, instrument, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{
        entities::{IngredientAnalysis, IngredientRecord},
        errors::EnrichmentError,
        ports::{IngredientEnricher, IngredientRepository},
        value_objects::{ResolutionStrategy, ResolvedIngredient, normalize_ingredient_name},
    },
};

const DEFAULT_CONCURRENCY: usize = 8;
const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache-or-fetch resolution of ingredient names into records.
///
/// Each distinct normalized name is looked up once per pass and enriched at
/// most once on a miss. Enrichment failures never fail the pass: the name gets
/// a fallback record that is not written back, so a later pass retries it.
/// Store failures do fail the pass.
pub struct IngredientResolver<'a, IR, EN> {
    repository: &'a IR,
    enricher: &'a EN,
    strategy: ResolutionStrategy,
    concurrency: usize,
    enrichment_timeout: Duration,
}

impl<'a, IR, EN> IngredientResolver<'a, IR, EN>
where
    IR: IngredientRepository,
    EN: IngredientEnricher,
{
    pub fn new(repository: &'a IR, enricher: &'a EN) -> Self {
        Self {
            repository,
            enricher,
            strategy: ResolutionStrategy::PerIngredient,
            concurrency: DEFAULT_CONCURRENCY,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    pub fn with_strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    /// Resolves every name, keeping input order, duplicates and the caller's spelling.
    #[instrument(skip_all, fields(count = names.len(), strategy = %self.strategy))]
    pub async fn resolve(&self, names: &[String]) -> Result<Vec<ResolvedIngredient>, CoreError> {
        let mut seen = HashSet::new();
        let keys: Vec<String> = names
            .iter()
            .map(|name| normalize_ingredient_name(name))
            .filter(|key| seen.insert(key.clone()))
            .collect();

        let records = match self.strategy {
            ResolutionStrategy::PerIngredient => self.resolve_individually(keys).await?,
            ResolutionStrategy::Batched => self.resolve_batched(keys).await?,
        };

        names
            .iter()
            .map(|name| {
                records
                    .get(&normalize_ingredient_name(name))
                    .cloned()
                    .map(|record| ResolvedIngredient::new(name.clone(), record))
                    .ok_or(CoreError::InternalServerError)
            })
            .collect()
    }

    /// Re-enriches one ingredient and overwrites its cached record.
    ///
    /// Unlike `resolve`, enrichment failures are returned to the caller.
    #[instrument(skip(self))]
    pub async fn refresh(&self, name: &str) -> Result<IngredientRecord, CoreError> {
        let key = normalize_ingredient_name(name);
        let analysis = self.enrich(&key).await.map_err(|e| {
            warn!(ingredient = %key, error = %e, "refresh failed");
            CoreError::ExternalServiceError(e.to_string())
        })?;

        self.repository
            .put(IngredientRecord::from_analysis(key, analysis))
            .await
    }

    async fn resolve_individually(
        &self,
        keys: Vec<String>,
    ) -> Result<HashMap<String, IngredientRecord>, CoreError> {
        stream::iter(keys)
            .map(|key| async move {
                let record = self.resolve_one(&key).await?;
                Ok::<_, CoreError>((key, record))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await
    }

    async fn resolve_one(&self, key: &str) -> Result<IngredientRecord, CoreError> {
        if let Some(record) = self.repository.get(key).await? {
            debug!(ingredient = %key, "ingredient cache hit");
            return Ok(record);
        }

        debug!(ingredient = %key, "ingredient cache miss");
        let outcome = self.enrich(key).await;
        self.settle(key, outcome).await
    }

    async fn resolve_batched(
        &self,
        keys: Vec<String>,
    ) -> Result<HashMap<String, IngredientRecord>, CoreError> {
        let lookups: Vec<(String, Option<IngredientRecord>)> = stream::iter(keys)
            .map(|key| async move {
                let hit = self.repository.get(&key).await?;
                Ok::<_, CoreError>((key, hit))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        let mut records = HashMap::with_capacity(lookups.len());
        let mut misses = Vec::new();
        for (key, hit) in lookups {
            match hit {
                Some(record) => {
                    records.insert(key, record);
                }
                None => misses.push(key),
            }
        }

        if misses.is_empty() {
            return Ok(records);
        }

        debug!(misses = misses.len(), "enriching cache misses in one batch");
        let mut batched = self.enrich_batch(misses.clone()).await;

        let settled: Vec<(String, IngredientRecord)> = stream::iter(misses)
            .map(|key| {
                let candidate = batched.remove(&key);
                async move {
                    let outcome = match candidate.map(IngredientAnalysis::validated) {
                        Some(Ok(analysis)) => Ok(analysis),
                        Some(Err(e)) => {
                            debug!(ingredient = %key, error = %e, "batch item rejected, retrying alone");
                            self.enrich(&key).await
                        }
                        None => self.enrich(&key).await,
                    };
                    let record = self.settle(&key, outcome).await?;
                    Ok::<_, CoreError>((key, record))
                }
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        records.extend(settled);
        Ok(records)
    }

    async fn enrich(&self, key: &str) -> Result<IngredientAnalysis, EnrichmentError> {
        match tokio::time::timeout(self.enrichment_timeout, self.enricher.analyze(key)).await {
            Ok(result) => result.and_then(IngredientAnalysis::validated),
            Err(_) => Err(EnrichmentError::Timeout(self.enrichment_timeout)),
        }
    }

    async fn enrich_batch(&self, keys: Vec<String>) -> HashMap<String, IngredientAnalysis> {
        let call = self.enricher.analyze_batch(keys, None);
        match tokio::time::timeout(self.enrichment_timeout, call).await {
            Ok(Ok(product)) => product
                .items
                .into_iter()
                .map(|item| (normalize_ingredient_name(&item.ingredient_name), item.analysis))
                .collect(),
            Ok(Err(e)) => {
                warn!(error = %e, "batch enrichment failed, retrying ingredients one by one");
                HashMap::new()
            }
            Err(_) => {
                warn!(timeout = ?self.enrichment_timeout, "batch enrichment timed out, retrying ingredients one by one");
                HashMap::new()
            }
        }
    }

    /// Turns an enrichment outcome into the record used for this pass,
    /// persisting only successful analyses.
    async fn settle(
        &self,
        key: &str,
        outcome: Result<IngredientAnalysis, EnrichmentError>,
    ) -> Result<IngredientRecord, CoreError> {
        match outcome {
            Ok(analysis) => {
                self.repository
                    .put(IngredientRecord::from_analysis(key, analysis))
                    .await
            }
            Err(e) => {
                warn!(ingredient = %key, error = %e, "enrichment failed, using fallback record");
                Ok(IngredientRecord::fallback(key))
            }
        }
    }
}
