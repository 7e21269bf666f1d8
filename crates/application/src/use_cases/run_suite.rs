//! Run Suite Use Case
//!
//! Drives every registered case through the HTTP client and the assertion
//! engine, and aggregates the verdicts into a `RunSummary`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use probe_domain::{ErrorKind, RetryBackoff, RunSummary, Verdict};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

use super::RunConfig;
use crate::assertion::{CompiledCase, evaluate};
use crate::ports::{Clock, HttpClient};
use crate::registry::Registry;

/// Retry and timeout settings every case task carries.
#[derive(Debug, Clone, Copy)]
struct AttemptPolicy {
    retry_count: u32,
    backoff: RetryBackoff,
    timeout: Duration,
}

impl From<&RunConfig> for AttemptPolicy {
    fn from(config: &RunConfig) -> Self {
        Self {
            retry_count: config.retry_count,
            backoff: config.retry_backoff,
            timeout: config.request_timeout,
        }
    }
}

/// Use case for executing a registered suite.
///
/// Cases run in registration order, up to `concurrency` at a time. Each case
/// task owns its case, its HTTP call, and its retry state; the only thing
/// shared between tasks is the client. Verdicts are written into a slot per
/// case, so the summary order never depends on completion order.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::new("http://localhost:5000")?;
/// let runner = RunSuite::new(Arc::new(client), SystemClock::new());
///
/// let summary = runner.run(&registry, &RunConfig::default()).await;
/// reporter.render(&summary);
/// ```
pub struct RunSuite<C: HttpClient, K: Clock> {
    client: Arc<C>,
    clock: K,
}

impl<C: HttpClient + 'static, K: Clock> RunSuite<C, K> {
    /// Creates a new `RunSuite` use case.
    pub const fn new(client: Arc<C>, clock: K) -> Self {
        Self { client, clock }
    }

    /// Runs every case of `registry` and returns the summary.
    ///
    /// Produces exactly one verdict per registered case:
    /// - cases never dispatched because of fail-fast are `Skipped`
    /// - cases without a verdict when the run deadline expires are
    ///   `Error(Timeout)`; their in-flight requests are aborted
    pub async fn run(&self, registry: &Registry, config: &RunConfig) -> RunSummary {
        let started_at = self.clock.now();
        let cases = registry.cases();
        let total = cases.len();
        let limit = config.concurrency.max(1);
        let policy = AttemptPolicy::from(config);

        info!(
            suite = registry.name(),
            cases = total,
            concurrency = limit,
            retries = config.retry_count,
            fail_fast = config.fail_fast,
            "starting run"
        );

        let mut slots: Vec<Option<Verdict>> = vec![None; total];
        let mut dispatched = vec![false; total];
        let mut stopped = false;
        let mut tasks: JoinSet<(usize, Verdict)> = JoinSet::new();
        let mut task_index = HashMap::new();

        let schedule = async {
            let mut next = 0;
            loop {
                while !stopped && next < total && tasks.len() < limit {
                    let index = next;
                    let case = Arc::clone(&cases[index]);
                    let client = Arc::clone(&self.client);
                    let span = info_span!("case", id = case.id());
                    debug!(case = case.id(), "dispatching");

                    let handle = tasks.spawn(
                        async move { (index, execute_case(client.as_ref(), &case, policy).await) }
                            .instrument(span),
                    );
                    task_index.insert(handle.id(), index);
                    dispatched[index] = true;
                    next += 1;
                }

                let Some(joined) = tasks.join_next_with_id().await else {
                    break;
                };
                let (index, verdict) = match joined {
                    Ok((_, finished)) => finished,
                    Err(err) => {
                        let Some(&index) = task_index.get(&err.id()) else {
                            continue;
                        };
                        let verdict = Verdict::error(
                            cases[index].id(),
                            ErrorKind::Internal,
                            format!("case task ended without a verdict: {err}"),
                        );
                        (index, verdict)
                    }
                };

                if config.fail_fast && verdict.is_problem() && !stopped {
                    warn!(case = %verdict.case_id, "fail-fast: no further cases will be dispatched");
                    stopped = true;
                }
                slots[index] = Some(verdict);
            }
        };

        let timed_out = match config.deadline {
            Some(deadline) => tokio::time::timeout(deadline, schedule).await.is_err(),
            None => {
                schedule.await;
                false
            }
        };

        if timed_out {
            warn!(
                deadline_ms = config.deadline.map_or(0, millis),
                in_flight = tasks.len(),
                "run deadline exceeded, cancelling in-flight cases"
            );
            tasks.shutdown().await;
        }

        let deadline_ms = config.deadline.map_or(0, millis);
        let verdicts: Vec<Verdict> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let id = cases[index].id();
                    if timed_out && (dispatched[index] || !stopped) {
                        Verdict::error(
                            id,
                            ErrorKind::Timeout,
                            format!("run deadline of {deadline_ms}ms exceeded before the case completed"),
                        )
                    } else {
                        Verdict::skipped(id)
                    }
                })
            })
            .collect();

        let summary = RunSummary::new(registry.name(), verdicts, started_at, self.clock.now());
        info!(
            suite = %summary.suite_name,
            passed = summary.passed,
            failed = summary.failed,
            errors = summary.errors,
            skipped = summary.skipped,
            status = summary.status.label(),
            duration_ms = summary.duration_ms(),
            "run finished"
        );
        summary
    }
}

/// Executes one case, retrying on transport errors only.
async fn execute_case<C: HttpClient>(
    client: &C,
    case: &CompiledCase,
    policy: AttemptPolicy,
) -> Verdict {
    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let result = client.fetch(case.case().request(), policy.timeout).await;
        if let Ok(response) = &result {
            debug!(
                attempt = attempts,
                status = response.status.as_u16(),
                response_ms = millis(response.duration),
                "response received"
            );
        }

        let verdict = evaluate(case, result);
        if verdict.is_transport_error() && attempts <= policy.retry_count {
            let delay = policy.backoff.delay_for(attempts);
            warn!(
                attempt = attempts,
                error = verdict.message.as_deref().unwrap_or_default(),
                delay_ms = millis(delay),
                "transport error, retrying"
            );
            tokio::time::sleep(delay).await;
            continue;
        }

        let verdict = verdict.with_timing(attempts, millis(start.elapsed()));
        debug!(outcome = ?verdict.outcome, attempts, "case finished");
        return verdict;
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
