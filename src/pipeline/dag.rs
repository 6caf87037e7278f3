//! Fixed task graph execution
//!
//! start -> extract x3 -> transform x3 -> load x3 -> end
//!
//! Stage groups are hard barriers: every task in a group must succeed
//! before the next group starts. Extract and transform tasks run
//! concurrently; load tasks run one at a time because the warehouse
//! file takes a single writer. Each task gets a bounded number of
//! retries with a fixed delay, and any exhausted task fails the run
//! after a failure notification is logged.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::types::EntityKind;

use super::stages::{Pipeline, StageReport};

/// Outcome of a full DAG run
#[derive(Debug, Clone, Default)]
pub struct DagReport {
    /// Per-task reports, in completion order within each group
    pub tasks: Vec<StageReport>,
    /// Total wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// The concurrently-run stage groups
#[derive(Debug, Clone, Copy)]
enum StageKind {
    Extract,
    Transform,
}

impl StageKind {
    fn name(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Transform => "transform",
        }
    }
}

/// Executes the pipeline's task graph
pub struct DagRunner {
    pipeline: Arc<Pipeline>,
    task_retries: u32,
    retry_delay: Duration,
}

impl DagRunner {
    pub fn new(pipeline: Pipeline) -> Self {
        let dag = &pipeline.config().dag;
        let task_retries = dag.task_retries;
        let retry_delay = Duration::from_secs(dag.retry_delay_secs);
        Self {
            pipeline: Arc::new(pipeline),
            task_retries,
            retry_delay,
        }
    }

    /// Override the retry delay, mainly for tests
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Run the whole graph
    pub async fn run(&self) -> Result<DagReport> {
        let start = Instant::now();
        info!("Pipeline run starting");

        let result = self.run_groups().await;

        match result {
            Ok(tasks) => {
                let report = DagReport {
                    tasks,
                    duration_ms: start.elapsed().as_millis() as u64,
                };
                info!(
                    tasks = report.tasks.len(),
                    duration_ms = report.duration_ms,
                    "Pipeline run finished"
                );
                Ok(report)
            }
            Err(e) => {
                // Failure notification path: one terminal log, then the
                // error propagates to the caller
                error!("Pipeline run failed: {e}");
                Err(e)
            }
        }
    }

    async fn run_groups(&self) -> Result<Vec<StageReport>> {
        let mut tasks = Vec::with_capacity(EntityKind::ALL.len() * 3);

        tasks.extend(self.run_parallel_group(StageKind::Extract).await?);
        tasks.extend(self.run_parallel_group(StageKind::Transform).await?);

        // Load group: sequential, single warehouse writer
        for entity in EntityKind::ALL {
            let pipeline = Arc::clone(&self.pipeline);
            let report = self
                .with_retry(&format!("load_{entity}"), move || {
                    let pipeline = Arc::clone(&pipeline);
                    async move { pipeline.run_load(entity).await }
                })
                .await?;
            tasks.push(report);
        }

        Ok(tasks)
    }

    async fn run_parallel_group(&self, stage: StageKind) -> Result<Vec<StageReport>> {
        let handles: Vec<_> = EntityKind::ALL
            .into_iter()
            .map(|entity| {
                let pipeline = Arc::clone(&self.pipeline);
                let task_name = format!("{}_{entity}", stage.name());
                let retries = self.task_retries;
                let delay = self.retry_delay;
                tokio::spawn(async move {
                    retry_task(&task_name, retries, delay, move || {
                        let pipeline = Arc::clone(&pipeline);
                        async move {
                            match stage {
                                StageKind::Extract => pipeline.run_extract(entity).await,
                                StageKind::Transform => pipeline.run_transform(entity).await,
                            }
                        }
                    })
                    .await
                })
            })
            .collect();

        let mut reports = Vec::with_capacity(handles.len());
        for joined in join_all(handles).await {
            let report =
                joined.map_err(|e| Error::Other(format!("Pipeline task panicked: {e}")))??;
            reports.push(report);
        }
        Ok(reports)
    }

    async fn with_retry<F, Fut>(&self, task_name: &str, task: F) -> Result<StageReport>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<StageReport>>,
    {
        retry_task(task_name, self.task_retries, self.retry_delay, task).await
    }
}

/// Run one task with bounded retries and a fixed delay between attempts
pub(super) async fn retry_task<F, Fut>(
    task_name: &str,
    retries: u32,
    delay: Duration,
    task: F,
) -> Result<StageReport>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<StageReport>>,
{
    let mut attempt = 0u32;
    loop {
        match task().await {
            Ok(report) => return Ok(report),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(
                    task = task_name,
                    attempt,
                    max_attempts = retries + 1,
                    "Task failed, retrying in {}s: {e}",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!(task = task_name, "Task failed permanently: {e}");
                return Err(e);
            }
        }
    }
}
