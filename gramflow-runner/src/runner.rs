//! Job runner
//!
//! Drives one actor run from submission to a terminal state: submit, poll on
//! a fixed cadence up to the attempt budget, fetch the dataset, project the
//! caller-selected fields, optionally enrich captions, and hand the outcome
//! to the result sink.
//!
//! One run is a single linear sequence with no internal parallelism; the
//! only suspension points are the poll delay and the outbound calls.

use serde_json::Value;
use tracing::{debug, info, warn};

use gramflow_core::domain::job::{JobRequest, RunStatus};
use gramflow_core::domain::record::{ProjectedRecord, RawRecord};
use gramflow_core::dto::enrich::Progress;
use gramflow_core::dto::platform::{RunHandle, RunInput, RunState};
use gramflow_core::projection::project;

use crate::config::Config;
use crate::error::{Phase, RunError};
use crate::platform::{ActorPlatform, Enricher, ResultSink};

/// Outcome of a completed run
///
/// Degraded side effects are carried as flags rather than errors: a rejected
/// persistence write leaves `persisted` false, and a failed extraction leaves
/// the affected record without an `anime` field.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<ProjectedRecord>,
    /// Suggested download name combining the subject and submission time
    pub name: String,
    pub subject: String,
    pub persisted: bool,
    /// True when at least one record gained an `anime` field
    pub enriched: bool,
}

/// Drives scrape runs to completion against an actor platform
pub struct JobRunner<P> {
    config: Config,
    platform: P,
}

impl<P: ActorPlatform> JobRunner<P> {
    /// Creates a new job runner
    pub fn new(config: Config, platform: P) -> Self {
        Self { config, platform }
    }

    /// Validates the request and starts a run on the platform
    ///
    /// A result cap of 0 means unlimited and is expressed by omitting the
    /// limit field from the submission payload.
    pub async fn submit(&self, request: &JobRequest) -> Result<RunHandle, RunError> {
        if request.subject.trim().is_empty() {
            return Err(RunError::InvalidRequest(
                "subject must be a non-empty string".to_string(),
            ));
        }

        let input = RunInput {
            username: vec![request.subject.clone()],
            results_limit: (request.result_cap > 0).then_some(request.result_cap),
        };

        match input.results_limit {
            Some(limit) => debug!("Setting result limit to {} records", limit),
            None => debug!("No limit set - fetching all records"),
        }

        self.platform
            .start_run(&input)
            .await
            .map_err(|e| RunError::platform(Phase::Submit, e))
    }

    /// Polls run status on a fixed cadence until a terminal state
    ///
    /// A platform error during a poll is fatal immediately: transport failure
    /// is distinguished from "still running". A `Failed` or `Aborted` status
    /// ends the run without further polling. Exhausting the attempt budget
    /// yields [`RunError::Timeout`].
    pub async fn await_completion(&self, run_id: &str) -> Result<RunState, RunError> {
        for attempt in 1..=self.config.max_attempts {
            tokio::time::sleep(self.config.poll_interval).await;

            let state = self
                .platform
                .run_status(run_id)
                .await
                .map_err(|e| RunError::platform(Phase::Poll, e))?;

            debug!(
                "Run status check {}/{}: {:?}",
                attempt, self.config.max_attempts, state.status
            );

            match state.status {
                RunStatus::Succeeded => return Ok(state),
                RunStatus::Failed | RunStatus::Aborted => {
                    return Err(RunError::JobFailed(state.status));
                }
                _ => {}
            }
        }

        Err(RunError::Timeout {
            attempts: self.config.max_attempts,
        })
    }

    /// Fetches the run's dataset items
    ///
    /// An empty dataset is not an error at this layer; the orchestrating
    /// caller decides whether zero records is meaningful.
    pub async fn fetch_results(&self, state: &RunState) -> Result<Vec<RawRecord>, RunError> {
        let dataset_id = state.default_dataset_id.as_deref().ok_or_else(|| {
            RunError::platform(
                Phase::Fetch,
                gramflow_client::ClientError::ParseError(
                    "run state carried no dataset reference".to_string(),
                ),
            )
        })?;

        self.platform
            .dataset_items(dataset_id)
            .await
            .map_err(|e| RunError::platform(Phase::Fetch, e))
    }

    /// Runs the composed operation: submit, poll, fetch, project, enrich,
    /// persist
    ///
    /// Persistence failure is logged and recorded as `persisted: false`;
    /// returning the scraped records is the primary contract.
    pub async fn run<E: Enricher, S: ResultSink>(
        &self,
        request: &JobRequest,
        enricher: &E,
        sink: &S,
    ) -> Result<RunOutcome, RunError> {
        let submitted_at = chrono::Utc::now();

        let handle = self.submit(request).await?;
        info!("Actor run started with id {}", handle.id);

        let state = self.await_completion(&handle.id).await?;
        let raw = self.fetch_results(&state).await?;
        info!("Retrieved {} records for {}", raw.len(), request.subject);

        if raw.is_empty() {
            return Err(RunError::NoData);
        }

        let mut records = project(&raw, &request.fields);

        let mut enriched_count = 0;
        if request.enrich {
            enriched_count = enrich_records(&mut records, enricher).await;
        }

        let persisted = match sink.create(&request.subject, &records).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to persist result set for {}: {:#}",
                    request.subject, e
                );
                false
            }
        };

        let name = format!(
            "instagram_{}_{}.json",
            request.subject,
            submitted_at.timestamp_millis()
        );

        Ok(RunOutcome {
            records,
            name,
            subject: request.subject.clone(),
            persisted,
            enriched: enriched_count > 0,
        })
    }
}

/// Sequentially enriches every record that carries a non-empty caption
///
/// Records without a caption are skipped and do not count toward the
/// progress total. A failed extraction is logged and leaves its record
/// untouched; the pass continues with the next record. Returns the number of
/// records that gained an `anime` field.
pub async fn enrich_records<E: Enricher>(records: &mut [ProjectedRecord], enricher: &E) -> usize {
    let total = records.iter().filter(|r| caption_of(r).is_some()).count();
    if total == 0 {
        return 0;
    }

    info!("Enriching {} captioned records", total);

    let mut current = 0;
    let mut enriched = 0;

    for record in records.iter_mut() {
        let Some(caption) = caption_of(record) else {
            continue;
        };
        current += 1;

        match enricher.extract(&caption, Progress { current, total }).await {
            Ok(label) if !label.is_empty() => {
                debug!("Extracted \"{}\" ({}/{})", label, current, total);
                record.insert("anime".to_string(), Value::String(label));
                enriched += 1;
            }
            Ok(_) => {
                debug!("Empty extraction result ({}/{})", current, total);
            }
            Err(e) => {
                warn!("Failed to enrich record {}/{}: {}", current, total, e);
            }
        }
    }

    enriched
}

fn caption_of(record: &ProjectedRecord) -> Option<String> {
    match record.get("caption") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gramflow_client::ClientError;
    use gramflow_core::domain::job::FieldSelection;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn raw(value: serde_json::Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("raw record fixtures must be objects"),
        }
    }

    fn request(subject: &str) -> JobRequest {
        JobRequest {
            subject: subject.to_string(),
            result_cap: 0,
            fields: FieldSelection {
                image_url: true,
                caption: true,
                ..Default::default()
            },
            enrich: false,
        }
    }

    fn fast_config(max_attempts: u32) -> Config {
        Config::new(Duration::from_millis(2000), max_attempts)
    }

    // =========================================================================
    // Scripted collaborators
    // =========================================================================

    #[derive(Default)]
    struct ScriptedPlatform {
        /// Statuses reported by successive polls; repeats Running when empty
        statuses: Mutex<VecDeque<RunStatus>>,
        items: Vec<RawRecord>,
        fail_status: bool,
        start_calls: AtomicUsize,
        status_calls: AtomicUsize,
        last_input: Mutex<Option<RunInput>>,
    }

    impl ScriptedPlatform {
        fn with_statuses(statuses: &[RunStatus]) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn with_items(statuses: &[RunStatus], items: Vec<RawRecord>) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().copied().collect()),
                items,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ActorPlatform for ScriptedPlatform {
        async fn start_run(&self, input: &RunInput) -> Result<RunHandle, ClientError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_input.lock().unwrap() = Some(input.clone());
            Ok(RunHandle {
                id: "run-1".to_string(),
            })
        }

        async fn run_status(&self, _run_id: &str) -> Result<RunState, ClientError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_status {
                return Err(ClientError::api_error(502, "bad gateway"));
            }
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(RunStatus::Running);
            Ok(RunState {
                status,
                default_dataset_id: Some("ds-1".to_string()),
            })
        }

        async fn dataset_items(&self, _dataset_id: &str) -> Result<Vec<RawRecord>, ClientError> {
            Ok(self.items.clone())
        }
    }

    #[derive(Default)]
    struct ScriptedEnricher {
        /// 1-based progress positions that fail
        fail_on: Vec<usize>,
        calls: Mutex<Vec<Progress>>,
    }

    #[async_trait]
    impl Enricher for ScriptedEnricher {
        async fn extract(&self, _text: &str, progress: Progress) -> Result<String, ClientError> {
            self.calls.lock().unwrap().push(progress);
            if self.fail_on.contains(&progress.current) {
                return Err(ClientError::api_error(500, "completion service down"));
            }
            Ok(format!("label-{}", progress.current))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        fail: bool,
        created: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl ResultSink for RecordingSink {
        async fn create(&self, subject: &str, records: &[ProjectedRecord]) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("insert rejected");
            }
            self.created
                .lock()
                .unwrap()
                .push((subject.to_string(), records.len()));
            Ok(())
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    #[tokio::test]
    async fn test_submit_rejects_empty_subject_without_platform_call() {
        let platform = ScriptedPlatform::default();
        let runner = JobRunner::new(fast_config(30), platform);

        let result = runner.submit(&request("   ")).await;

        assert!(matches!(result, Err(RunError::InvalidRequest(_))));
        assert_eq!(runner.platform.start_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_omits_limit_when_cap_is_zero() {
        let platform = ScriptedPlatform::default();
        let runner = JobRunner::new(fast_config(30), platform);

        runner.submit(&request("alice")).await.unwrap();

        let input = runner.platform.last_input.lock().unwrap().clone().unwrap();
        assert_eq!(input.username, vec!["alice".to_string()]);
        assert_eq!(input.results_limit, None);
    }

    #[tokio::test]
    async fn test_submit_sends_positive_cap() {
        let platform = ScriptedPlatform::default();
        let runner = JobRunner::new(fast_config(30), platform);

        let mut req = request("alice");
        req.result_cap = 2;
        runner.submit(&req).await.unwrap();

        let input = runner.platform.last_input.lock().unwrap().clone().unwrap();
        assert_eq!(input.results_limit, Some(2));
    }

    // =========================================================================
    // Polling
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_completes_after_scripted_polls() {
        let platform = ScriptedPlatform::with_statuses(&[
            RunStatus::Running,
            RunStatus::Running,
            RunStatus::Succeeded,
        ]);
        let runner = JobRunner::new(fast_config(30), platform);

        let state = runner.await_completion("run-1").await.unwrap();

        assert_eq!(state.status, RunStatus::Succeeded);
        assert_eq!(runner.platform.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_ends_run_immediately() {
        let platform = ScriptedPlatform::with_statuses(&[RunStatus::Failed]);
        let runner = JobRunner::new(fast_config(30), platform);

        let result = runner.await_completion("run-1").await;

        assert!(matches!(
            result,
            Err(RunError::JobFailed(RunStatus::Failed))
        ));
        assert_eq!(runner.platform.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_status_is_terminal() {
        let platform =
            ScriptedPlatform::with_statuses(&[RunStatus::Running, RunStatus::Aborted]);
        let runner = JobRunner::new(fast_config(30), platform);

        let result = runner.await_completion("run-1").await;

        assert!(matches!(
            result,
            Err(RunError::JobFailed(RunStatus::Aborted))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_budget_exhausted() {
        let platform = ScriptedPlatform::default();
        let runner = JobRunner::new(fast_config(3), platform);

        let result = runner.await_completion("run-1").await;

        assert!(matches!(result, Err(RunError::Timeout { attempts: 3 })));
        assert_eq!(runner.platform.status_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_transport_error_is_fatal() {
        let platform = ScriptedPlatform {
            fail_status: true,
            ..Default::default()
        };
        let runner = JobRunner::new(fast_config(30), platform);

        let result = runner.await_completion("run-1").await;

        assert!(matches!(
            result,
            Err(RunError::Platform {
                phase: Phase::Poll,
                ..
            })
        ));
        assert_eq!(runner.platform.status_calls.load(Ordering::SeqCst), 1);
    }

    // =========================================================================
    // Composed run
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_no_data_on_empty_dataset() {
        let platform = ScriptedPlatform::with_items(&[RunStatus::Succeeded], Vec::new());
        let runner = JobRunner::new(fast_config(30), platform);
        let sink = RecordingSink::default();

        let result = runner
            .run(&request("alice"), &ScriptedEnricher::default(), &sink)
            .await;

        assert!(matches!(result, Err(RunError::NoData)));
        assert!(sink.created.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_projects_with_alias_resolution() {
        let platform = ScriptedPlatform::with_items(
            &[RunStatus::Succeeded],
            vec![
                raw(json!({"imageUrl": "a.jpg", "text": "hello"})),
                raw(json!({"displayUrl": "b.jpg", "caption": "world"})),
            ],
        );
        let runner = JobRunner::new(fast_config(30), platform);
        let sink = RecordingSink::default();

        let mut req = request("alice");
        req.result_cap = 2;
        let outcome = runner
            .run(&req, &ScriptedEnricher::default(), &sink)
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].get("imageUrl"), Some(&json!("a.jpg")));
        assert_eq!(outcome.records[0].get("caption"), Some(&json!("hello")));
        assert_eq!(outcome.records[1].get("imageUrl"), Some(&json!("b.jpg")));
        assert_eq!(outcome.records[1].get("caption"), Some(&json!("world")));
        assert!(outcome.persisted);
        assert!(!outcome.enriched);
        assert!(outcome.name.starts_with("instagram_alice_"));
        assert!(outcome.name.ends_with(".json"));
        assert_eq!(
            *sink.created.lock().unwrap(),
            vec![("alice".to_string(), 2)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_persistence_failure_degrades_to_flag() {
        let platform = ScriptedPlatform::with_items(
            &[RunStatus::Succeeded],
            vec![raw(json!({"caption": "hello"}))],
        );
        let runner = JobRunner::new(fast_config(30), platform);
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let outcome = runner
            .run(&request("alice"), &ScriptedEnricher::default(), &sink)
            .await
            .unwrap();

        assert!(!outcome.persisted);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].get("caption"), Some(&json!("hello")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_skips_enrichment_when_disabled() {
        let platform = ScriptedPlatform::with_items(
            &[RunStatus::Succeeded],
            vec![raw(json!({"caption": "hello"}))],
        );
        let runner = JobRunner::new(fast_config(30), platform);
        let enricher = ScriptedEnricher::default();

        let outcome = runner
            .run(&request("alice"), &enricher, &RecordingSink::default())
            .await
            .unwrap();

        assert!(!outcome.enriched);
        assert!(enricher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_enrichment_marks_outcome() {
        let platform = ScriptedPlatform::with_items(
            &[RunStatus::Running, RunStatus::Succeeded],
            vec![
                raw(json!({"caption": "first"})),
                raw(json!({"caption": "second"})),
            ],
        );
        let runner = JobRunner::new(fast_config(30), platform);
        let enricher = ScriptedEnricher {
            fail_on: vec![2],
            ..Default::default()
        };

        let mut req = request("alice");
        req.enrich = true;
        let outcome = runner
            .run(&req, &enricher, &RecordingSink::default())
            .await
            .unwrap();

        assert!(outcome.enriched);
        assert_eq!(outcome.records[0].get("anime"), Some(&json!("label-1")));
        assert!(outcome.records[1].get("anime").is_none());
    }

    // =========================================================================
    // Enrichment pass
    // =========================================================================

    #[tokio::test]
    async fn test_enrichment_failure_degrades_single_record() {
        let mut records = vec![
            raw(json!({"caption": "first"})),
            raw(json!({"caption": "second"})),
            raw(json!({"caption": "third"})),
        ];
        let enricher = ScriptedEnricher {
            fail_on: vec![2],
            ..Default::default()
        };

        let enriched = enrich_records(&mut records, &enricher).await;

        assert_eq!(enriched, 2);
        assert_eq!(records[0].get("anime"), Some(&json!("label-1")));
        assert!(records[1].get("anime").is_none());
        assert_eq!(records[2].get("anime"), Some(&json!("label-3")));
    }

    #[tokio::test]
    async fn test_enrichment_counts_only_captioned_records() {
        let mut records = vec![
            raw(json!({"caption": "first"})),
            raw(json!({"imageUrl": "a.jpg"})),
            raw(json!({"caption": ""})),
            raw(json!({"caption": "last"})),
        ];
        let enricher = ScriptedEnricher::default();

        let enriched = enrich_records(&mut records, &enricher).await;

        assert_eq!(enriched, 2);
        let calls = enricher.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                Progress {
                    current: 1,
                    total: 2
                },
                Progress {
                    current: 2,
                    total: 2
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_enrichment_is_sequential_and_ordered() {
        let mut records = vec![
            raw(json!({"caption": "a"})),
            raw(json!({"caption": "b"})),
            raw(json!({"caption": "c"})),
        ];
        let enricher = ScriptedEnricher::default();

        enrich_records(&mut records, &enricher).await;

        let currents: Vec<usize> = enricher
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.current)
            .collect();
        assert_eq!(currents, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_extraction_result_is_not_applied() {
        struct EmptyEnricher;

        #[async_trait]
        impl Enricher for EmptyEnricher {
            async fn extract(&self, _text: &str, _progress: Progress) -> Result<String, ClientError> {
                Ok(String::new())
            }
        }

        let mut records = vec![raw(json!({"caption": "hello"}))];
        let enriched = enrich_records(&mut records, &EmptyEnricher).await;

        assert_eq!(enriched, 0);
        assert!(records[0].get("anime").is_none());
    }
}
