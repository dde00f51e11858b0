//! # UI event loop
//!
//! Everything in ccmenu runs on one thread. The only deferred work is
//! delay-scheduled state mutation (a menu command's blink sequence, a
//! disclosure group's floor clear), queued here instead of run inline.
//!
//! A *turn* is one call to [`EventLoop::pump`]. It runs the tasks that were
//! already due when it started, ordered by due time and then by scheduling
//! order. Anything scheduled while a turn is running waits for a later turn,
//! even with a zero delay, which is what [`EventLoop::next_turn`] relies on.
//!
//! Every task belongs to a [`Scope`]. Once that scope is disposed (its item
//! was unmounted) the task is dropped without running.
//!
//! ```rust
//! use ccmenu_core::*;
//!
//! let clock = ManualClock::new();
//! let ev = EventLoop::with_clock(clock.clone());
//! let scope = Scope::new();
//! let hits = signal(0);
//!
//! let h = hits.clone();
//! ev.schedule_in(&scope, Duration::from_millis(100), move || h.update(|n| *n += 1));
//! ev.advance(&clock, Duration::from_millis(50)).unwrap();
//! assert_eq!(hits.get(), 0);
//! ev.advance(&clock, Duration::from_millis(50)).unwrap();
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use web_time::{Duration, Instant};

use crate::clock::{Clock, ManualClock, SystemClock};
use crate::error::LoopError;
use crate::scope::{Scope, WeakScope};

/// Upper bound on turns for `advance` / `run_until_idle`.
pub const MAX_TURNS: usize = 10_000;

new_key_type! {
    pub struct TaskKey;
}

struct Task {
    due: Instant,
    seq: u64,
    scope: WeakScope,
    run: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct LoopInner {
    tasks: SlotMap<TaskKey, Task>,
    next_seq: u64,
    turn: u64,
}

impl LoopInner {
    fn purge_dead(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| t.scope.is_alive());
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            log::trace!("dropped {dropped} tasks of disposed scopes");
        }
    }
}

#[derive(Clone)]
pub struct EventLoop {
    inner: Rc<RefCell<LoopInner>>,
    clock: Rc<dyn Clock>,
}

/// Handle to one scheduled task.
#[derive(Clone)]
pub struct TaskHandle {
    key: TaskKey,
    owner: Weak<RefCell<LoopInner>>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LoopInner::default())),
            clock: Rc::new(clock),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u64 {
        self.inner.borrow().turn
    }

    /// Runs `f` on the first turn that starts at least `delay` from now.
    pub fn schedule_in(
        &self,
        scope: &Scope,
        delay: Duration,
        f: impl FnOnce() + 'static,
    ) -> TaskHandle {
        let due = self.now() + delay;
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let key = inner.tasks.insert(Task {
            due,
            seq,
            scope: scope.downgrade(),
            run: Box::new(f),
        });
        log::trace!("scheduled task #{seq} in {delay:?}");
        TaskHandle {
            key,
            owner: Rc::downgrade(&self.inner),
        }
    }

    /// Runs `f` on the next turn, never the current one.
    pub fn next_turn(&self, scope: &Scope, f: impl FnOnce() + 'static) -> TaskHandle {
        self.schedule_in(scope, Duration::ZERO, f)
    }

    /// Pending tasks whose scope is still alive.
    pub fn pending(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.purge_dead();
        inner.tasks.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        let mut inner = self.inner.borrow_mut();
        inner.purge_dead();
        inner.tasks.values().map(|t| t.due).min()
    }

    /// One turn. Returns how many tasks ran.
    pub fn pump(&self) -> usize {
        let now = self.now();
        let due: SmallVec<[TaskKey; 8]> = {
            let mut inner = self.inner.borrow_mut();
            inner.purge_dead();
            let cutoff = inner.next_seq;
            let mut due: SmallVec<[(Instant, u64, TaskKey); 8]> = inner
                .tasks
                .iter()
                .filter(|(_, t)| t.due <= now && t.seq < cutoff)
                .map(|(k, t)| (t.due, t.seq, k))
                .collect();
            due.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
            due.into_iter().map(|(_, _, k)| k).collect()
        };

        let mut ran = 0;
        for key in due {
            // An earlier task in this turn may have cancelled this one.
            let Some(task) = self.inner.borrow_mut().tasks.remove(key) else {
                continue;
            };
            if !task.scope.is_alive() {
                continue;
            }
            (task.run)();
            ran += 1;
        }
        self.inner.borrow_mut().turn += 1;
        ran
    }

    /// Moves `clock` forward by `by`, running every turn that falls due on
    /// the way, at the time it falls due.
    pub fn advance(&self, clock: &ManualClock, by: Duration) -> Result<usize, LoopError> {
        let target = clock.now() + by;
        let mut turns = 0;
        while let Some(due) = self.next_due() {
            if due > target {
                break;
            }
            if turns >= MAX_TURNS {
                return Err(LoopError::Runaway {
                    turns,
                    pending: self.pending(),
                });
            }
            if due > clock.now() {
                clock.set(due);
            }
            self.pump();
            turns += 1;
        }
        clock.set(target);
        Ok(turns)
    }

    /// Runs until nothing is pending, jumping `clock` to each due time.
    pub fn run_until_idle(&self, clock: &ManualClock) -> Result<usize, LoopError> {
        let mut turns = 0;
        while let Some(due) = self.next_due() {
            if turns >= MAX_TURNS {
                return Err(LoopError::Runaway {
                    turns,
                    pending: self.pending(),
                });
            }
            if due > clock.now() {
                clock.set(due);
            }
            self.pump();
            turns += 1;
        }
        Ok(turns)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskHandle {
    pub fn cancel(&self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.borrow_mut().tasks.remove(self.key);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.owner
            .upgrade()
            .is_some_and(|o| o.borrow().tasks.get(self.key).is_some_and(|t| t.scope.is_alive()))
    }
}
