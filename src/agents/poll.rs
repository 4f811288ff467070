//! Run polling policy
//!
//! Polling a run is a fixed-interval wait/check loop with a hard budget:
//! no adaptive backoff, no jitter. The loop's decisions live in an
//! explicit state machine (`PollState`) so the timeout and failure rules
//! can be tested without real network timing; `AgentsClient::poll_run`
//! only drives it.

use std::time::Duration;

use super::types::RunStatus;

/// Fixed-interval polling policy for run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between consecutive status queries
    pub interval: Duration,

    /// Total budget; the poll gives up once this much time has elapsed
    /// while the run is still in flight
    pub timeout: Duration,
}

impl PollPolicy {
    /// Create a policy with an explicit interval and timeout
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Set the query interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the total budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PollPolicy {
    /// One-second interval, two-minute budget
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Verdict after observing one status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// Run is still in flight and budget remains: wait, then query again
    Wait(Duration),

    /// Run completed successfully
    Finished,

    /// Run reached a non-successful terminal status
    Failed { status: RunStatus },

    /// Budget elapsed while the run was still in flight
    TimedOut { last_status: RunStatus },

    /// The service reported a phase earlier than one already observed,
    /// which the lifecycle forbids
    Regressed { from: RunStatus, to: RunStatus },
}

/// Tracks one poll loop across status observations
///
/// Feed each queried status together with the elapsed time since the loop
/// started; the returned [`PollStep`] tells the driver what to do next.
/// Terminal statuses win over the timeout: a run observed `completed` at
/// the budget boundary still finishes.
#[derive(Debug)]
pub struct PollState {
    policy: PollPolicy,
    last: Option<RunStatus>,
    queries: u32,
}

impl PollState {
    /// Start tracking a poll loop under `policy`
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            last: None,
            queries: 0,
        }
    }

    /// Record one queried status and decide the next step
    pub fn observe(&mut self, status: RunStatus, elapsed: Duration) -> PollStep {
        self.queries += 1;

        if let Some(prev) = self.last {
            if status.phase() < prev.phase() {
                return PollStep::Regressed {
                    from: prev,
                    to: status,
                };
            }
        }
        self.last = Some(status);

        if status == RunStatus::Completed {
            return PollStep::Finished;
        }
        if status.is_terminal() {
            return PollStep::Failed { status };
        }
        if elapsed >= self.policy.timeout {
            return PollStep::TimedOut {
                last_status: status,
            };
        }
        PollStep::Wait(self.policy.interval)
    }

    /// Number of statuses observed so far
    pub fn queries(&self) -> u32 {
        self.queries
    }

    /// Most recently observed status, if any
    pub fn last_status(&self) -> Option<RunStatus> {
        self.last
    }

    /// The policy this loop runs under
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }
}
