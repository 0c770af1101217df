//! Task polling utilities
//!
//! The GUI never awaits. Work is spawned on the tokio runtime and each frame
//! checks, without blocking, whether it has finished.

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll (task was None)
    NoTask,
    /// Task is still running
    Pending,
    /// Task finished; the join error covers panics and aborts
    Complete(Result<T, tokio::task::JoinError>),
}

/// Poll an optional task handle and take its result if finished.
///
/// The handle is taken out of the option only once it has yielded its
/// output, so a `Pending` result leaves it in place for the next frame.
///
/// The frame loop runs inside the runtime's `block_on`, whose cooperative
/// budget is never refilled while the window is open, so the join handle is
/// polled unconstrained.
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = task.as_mut() else {
        return PollResult::NoTask;
    };
    if !handle.is_finished() {
        return PollResult::Pending;
    }

    match tokio::task::unconstrained(handle).now_or_never() {
        Some(result) => {
            *task = None;
            PollResult::Complete(result)
        }
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_no_task() {
        let mut task: Option<JoinHandle<u8>> = None;
        assert!(matches!(poll_task(&mut task), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_pending_keeps_handle() {
        let mut task = Some(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            1u8
        }));
        assert!(matches!(poll_task(&mut task), PollResult::Pending));
        assert!(task.is_some());
        task.unwrap().abort();
    }

    #[tokio::test]
    async fn test_complete_takes_handle() {
        let mut task = Some(tokio::spawn(async { 7u8 }));
        while !task.as_ref().unwrap().is_finished() {
            tokio::task::yield_now().await;
        }
        match poll_task(&mut task) {
            PollResult::Complete(Ok(v)) => assert_eq!(v, 7),
            _ => panic!("expected completion"),
        }
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_aborted_task_reports_cancelled() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        handle.abort();
        let mut task = Some(handle);
        while !task.as_ref().unwrap().is_finished() {
            tokio::task::yield_now().await;
        }
        match poll_task(&mut task) {
            PollResult::Complete(Err(e)) => assert!(e.is_cancelled()),
            _ => panic!("expected cancellation"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_many_polls_without_awaiting() {
        // Mimics the frame loop: never yields back to the runtime
        for round in 0..300u32 {
            let mut task = Some(tokio::spawn(async move { round }));
            let mut value = None;
            for _ in 0..1000 {
                match poll_task(&mut task) {
                    PollResult::Complete(result) => {
                        value = Some(result.unwrap());
                        break;
                    }
                    PollResult::Pending => std::thread::sleep(Duration::from_millis(1)),
                    PollResult::NoTask => panic!("handle lost in round {}", round),
                }
            }
            assert_eq!(value, Some(round), "round {} never completed", round);
            assert!(task.is_none());
        }
    }
}
