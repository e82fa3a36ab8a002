use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::{watch, Semaphore};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use noesis_core::config::ResearchConfig;
use noesis_core::errors::{NoesisError, NoesisResult, ResearchError, StoreError};
use noesis_core::models::{
    ConsolidationMetrics, KnowledgeGap, QueryLog, ResearchQuery, ResearchResult,
};
use noesis_core::traits::{EmbeddingService, Researcher};
use noesis_store::HybridStore;
use noesis_synthesis::SynthesisEngine;
use noesis_validation::ValidationEngine;

use crate::consolidation::{self, IterationStats};
use crate::gaps::{self, DETECTOR_SAMPLE};
use crate::priority;
use crate::state::{InFlightTopics, IntegrationLedger};

/// Counts consecutive iteration failures; opens past the threshold so a
/// retry-forever loop cannot mask sustained breakage.
#[derive(Debug)]
struct CircuitBreaker {
    threshold: u32,
    consecutive: u32,
}

impl CircuitBreaker {
    fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive: 0,
        }
    }

    /// Record a failure; true when the breaker is now open.
    fn record_failure(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive >= self.threshold
    }

    fn reset(&mut self) {
        self.consecutive = 0;
    }
}

/// Drives the continuous research loop:
/// Detect → Prioritize → Dispatch → Integrate → Consolidate → Sleep.
///
/// Owns the in-flight topic set and the integration ledger. All bounded
/// concurrency lives here: one semaphore for gap tasks, plus whatever
/// the validation/synthesis engines bound internally.
pub struct ResearchCoordinator {
    store: Arc<HybridStore>,
    embedder: Arc<dyn EmbeddingService>,
    validation: Arc<ValidationEngine>,
    synthesis: Arc<SynthesisEngine>,
    researchers: Vec<Arc<dyn Researcher>>,
    config: ResearchConfig,
    query_log: Arc<QueryLog>,
    in_flight: Arc<InFlightTopics>,
    ledger: Arc<IntegrationLedger>,
    task_semaphore: Arc<Semaphore>,
}

impl ResearchCoordinator {
    pub fn new(
        store: Arc<HybridStore>,
        embedder: Arc<dyn EmbeddingService>,
        validation: Arc<ValidationEngine>,
        synthesis: Arc<SynthesisEngine>,
        config: ResearchConfig,
        query_log: Arc<QueryLog>,
    ) -> Self {
        let task_semaphore = Arc::new(Semaphore::new(config.max_concurrent_tasks.max(1)));
        let ledger = Arc::new(IntegrationLedger::new(config.query_log_capacity));
        Self {
            store,
            embedder,
            validation,
            synthesis,
            researchers: Vec::new(),
            config,
            query_log,
            in_flight: Arc::new(InFlightTopics::new()),
            ledger,
            task_semaphore,
        }
    }

    /// Register a research source.
    pub fn with_researcher(mut self, researcher: Arc<dyn Researcher>) -> Self {
        self.researchers.push(researcher);
        self
    }

    /// The in-flight topic set, for observation.
    pub fn in_flight(&self) -> &Arc<InFlightTopics> {
        &self.in_flight
    }

    /// The ledger of integrated knowledge, for observation.
    pub fn ledger(&self) -> &Arc<IntegrationLedger> {
        &self.ledger
    }

    /// Open every registered researcher.
    pub async fn open(&self) -> NoesisResult<()> {
        for researcher in &self.researchers {
            researcher.open().await?;
        }
        Ok(())
    }

    /// Close every registered researcher. Close failures are logged,
    /// not propagated — shutdown always completes.
    pub async fn close(&self) {
        for researcher in &self.researchers {
            if let Err(e) = researcher.close().await {
                warn!(source = researcher.name(), error = %e, "researcher close failed");
            }
        }
    }

    /// Run the loop until `shutdown` flips to true or the circuit
    /// breaker opens. Iteration errors log and back off; they only
    /// terminate the loop once `circuit_breaker_threshold` failures
    /// happen in a row.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> NoesisResult<()> {
        let mut breaker = CircuitBreaker::new(self.config.circuit_breaker_threshold);
        info!("research loop started");
        loop {
            if *shutdown.borrow() {
                info!("research loop shutting down");
                return Ok(());
            }

            let sleep_secs = match self.run_iteration().await {
                Ok(metrics) => {
                    breaker.reset();
                    debug!(
                        loss = metrics.loss,
                        accuracy = metrics.accuracy,
                        coverage = metrics.coverage_improvement,
                        "iteration complete"
                    );
                    self.config.refresh_interval_secs
                }
                Err(e) => {
                    error!(error = %e, "research iteration failed");
                    if breaker.record_failure() {
                        error!(
                            failures = breaker.consecutive,
                            "circuit breaker open; stopping research loop"
                        );
                        return Err(ResearchError::CircuitBreakerOpen {
                            failures: breaker.consecutive,
                        }
                        .into());
                    }
                    self.config.backoff_secs
                }
            };

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("research loop shutting down");
                        return Ok(());
                    }
                }
                _ = tokio::time::sleep(Duration::from_secs(sleep_secs)) => {}
            }
        }
    }

    /// One full pass: detect gaps, rank them, research the top ones,
    /// integrate what survives validation, emit consolidation metrics.
    pub async fn run_iteration(&self) -> NoesisResult<ConsolidationMetrics> {
        let started = Instant::now();
        let mut stats = IterationStats::default();

        let detected = self.detect_gaps().await;
        stats.gaps_detected = detected.len();

        let ranked = priority::prioritize(detected, Utc::now(), self.config.gap_decay_secs);
        let researched = self.dispatch(ranked).await;
        stats.gaps_researched = researched.len();

        self.integrate(researched, &mut stats).await?;

        let metrics = consolidation::metrics(&stats, started.elapsed().as_secs_f64());
        info!(
            gaps = stats.gaps_detected,
            researched = stats.gaps_researched,
            integrated = stats.gaps_integrated,
            entities = stats.entities_stored,
            "iteration consolidated"
        );
        Ok(metrics)
    }

    /// Run every gap detector and concatenate the results.
    async fn detect_gaps(&self) -> Vec<KnowledgeGap> {
        let mut detected = gaps::query_patterns::detect(self.query_log.as_ref(), DETECTOR_SAMPLE);
        detected.extend(
            gaps::coverage::detect(
                self.store.as_ref(),
                self.embedder.as_ref(),
                &self.config.tracked_topics,
                self.config.coverage_min_results,
                self.config.min_confidence,
            )
            .await,
        );
        detected.extend(
            gaps::consistency::detect(self.store.as_ref(), self.ledger.as_ref(), DETECTOR_SAMPLE)
                .await,
        );
        detected.extend(gaps::staleness::detect(
            self.ledger.as_ref(),
            self.config.staleness_max_age_days,
            Utc::now(),
        ));
        debug!(gaps = detected.len(), "gap detection complete");
        detected
    }

    /// Launch research for the top gaps whose topic is not already in
    /// flight. Claims release on completion, success or failure. Failed
    /// or timed-out tasks are excluded from the results, not retried.
    async fn dispatch(&self, ranked: Vec<KnowledgeGap>) -> Vec<(KnowledgeGap, ResearchResult)> {
        let mut claimed = Vec::new();
        for gap in ranked {
            if claimed.len() >= self.config.max_concurrent_tasks {
                break;
            }
            match self.in_flight.claim(&gap.topic) {
                Some(guard) => claimed.push((gap, guard)),
                None => debug!(topic = %gap.topic, "topic already in flight; skipped"),
            }
        }

        let outcomes = join_all(claimed.into_iter().map(|(gap, guard)| async move {
            let _guard = guard;
            let _permit = match self.task_semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return None,
            };
            let budget = Duration::from_secs(self.config.max_research_secs);
            match tokio::time::timeout(budget, self.research_gap(&gap)).await {
                Ok(Ok(result)) => Some((gap, result)),
                Ok(Err(e)) => {
                    warn!(topic = %gap.topic, error = %e, "gap research failed");
                    None
                }
                Err(_) => {
                    warn!(
                        topic = %gap.topic,
                        secs = self.config.max_research_secs,
                        "gap research timed out"
                    );
                    None
                }
            }
        }))
        .await;
        outcomes.into_iter().flatten().collect()
    }

    /// Research one gap across every registered source. Per-source
    /// failures are isolated; the task fails only when every source
    /// fails.
    async fn research_gap(&self, gap: &KnowledgeGap) -> NoesisResult<ResearchResult> {
        let started = Instant::now();
        let mut query = ResearchQuery::new(gap.topic.clone());
        query.modalities = gap.modalities.clone();
        query.max_results = self.config.max_sources_per_gap;
        query.min_confidence = self.config.min_confidence;
        query
            .context
            .insert("description".to_string(), gap.description.clone().into());
        query.context.insert(
            "related_entities".to_string(),
            serde_json::Value::from(gap.related_entities.clone()),
        );

        let mut findings = Vec::new();
        let mut failures = 0usize;
        for researcher in &self.researchers {
            match researcher.research(&query).await {
                Ok(result) => findings.extend(result.findings),
                Err(e) => {
                    failures += 1;
                    warn!(
                        topic = %gap.topic,
                        source = researcher.name(),
                        error = %e,
                        "research source failed; excluded"
                    );
                }
            }
        }
        if !self.researchers.is_empty() && failures == self.researchers.len() {
            return Err(ResearchError::TaskFailed {
                topic: gap.topic.clone(),
                reason: "every research source failed".to_string(),
            }
            .into());
        }

        Ok(ResearchResult {
            query,
            total_findings: findings.len(),
            findings,
            processing_time_secs: started.elapsed().as_secs_f64(),
            metadata: Default::default(),
        })
    }

    /// Validate → synthesize → store each gap's findings.
    ///
    /// Per-gap failures are isolated, with one exception: a dual-write
    /// inconsistency from the store is systemic and escapes to the run
    /// loop, where the circuit breaker accounts for it.
    async fn integrate(
        &self,
        researched: Vec<(KnowledgeGap, ResearchResult)>,
        stats: &mut IterationStats,
    ) -> NoesisResult<()> {
        for (gap, result) in researched {
            stats.findings_total += result.findings.len();

            let validations = self.validation.validate_batch(&result.findings).await;
            for validation in &validations {
                stats.record_validation(validation);
            }

            let synthesis = match self.synthesis.synthesize(&validations).await {
                Ok(synthesis) => synthesis,
                Err(e) => {
                    warn!(topic = %gap.topic, error = %e, "synthesis failed; gap skipped");
                    continue;
                }
            };
            if synthesis.is_empty() {
                debug!(topic = %gap.topic, "nothing to integrate");
                continue;
            }

            let mut stored_any = false;
            for entity in &synthesis.entities {
                match self.store.add(entity).await {
                    Ok(report) => {
                        stats.entities_stored += 1;
                        stats.relation_failures += report.failed_relations.len();
                        stored_any = true;
                        self.ledger
                            .record(&entity.id, &gap.topic, entity.content_type());
                    }
                    Err(e @ NoesisError::Store(StoreError::Inconsistency { .. })) => {
                        return Err(e);
                    }
                    Err(e) => {
                        warn!(entity = %entity.id, error = %e, "entity write failed; skipped");
                    }
                }
            }
            for edge in &synthesis.relations {
                if let Err(e) = self
                    .store
                    .add_relation(&edge.source_id, &edge.relation)
                    .await
                {
                    warn!(
                        source = %edge.source_id,
                        target = %edge.relation.target_id,
                        error = %e,
                        "relation write failed"
                    );
                    stats.relation_failures += 1;
                }
            }
            if stored_any {
                stats.gaps_integrated += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CircuitBreaker;

    #[test]
    fn breaker_opens_at_threshold() {
        let mut breaker = CircuitBreaker::new(3);
        assert!(!breaker.record_failure());
        assert!(!breaker.record_failure());
        assert!(breaker.record_failure());
    }

    #[test]
    fn success_resets_the_count() {
        let mut breaker = CircuitBreaker::new(2);
        assert!(!breaker.record_failure());
        breaker.reset();
        assert!(!breaker.record_failure());
        assert!(breaker.record_failure());
    }
}
