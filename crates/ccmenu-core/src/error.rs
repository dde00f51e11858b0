use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    /// Tasks kept rescheduling themselves past the turn limit.
    #[error("event loop still busy after {turns} turns ({pending} tasks pending)")]
    Runaway { turns: usize, pending: usize },
}
