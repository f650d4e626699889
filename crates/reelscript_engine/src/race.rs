use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

#[derive(Debug)]
pub enum RaceOutcome<T> {
    /// The task finished before the deadline.
    Settled(Result<T, JoinError>),
    /// The deadline fired first. The task keeps running; its handle is
    /// returned so the caller can still collect the late result.
    TimedOut(JoinHandle<T>),
}

/// Races a spawned task against a timer without aborting the task.
pub async fn race_deadline<T>(mut task: JoinHandle<T>, deadline: Duration) -> RaceOutcome<T> {
    tokio::select! {
        biased;
        joined = &mut task => RaceOutcome::Settled(joined),
        _ = tokio::time::sleep(deadline) => RaceOutcome::TimedOut(task),
    }
}
