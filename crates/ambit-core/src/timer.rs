//! Cancellable, single‑threaded timers.
//!
//! Nothing here spawns threads or tasks: the host loop calls `run_due` (after
//! sleeping until `next_deadline`, or once per frame) and due callbacks run
//! inline on that thread.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::scope::{Scope, ScopeId};

new_key_type! {
    /// Generational handle: a stale handle never cancels a newer timer.
    pub struct TimerHandle;
}

struct Entry {
    deadline: Instant,
    seq: u64,
    owner: Option<ScopeId>,
    callback: Box<dyn FnOnce()>,
}

struct TimersInner {
    clock: Rc<dyn Clock>,
    entries: SlotMap<TimerHandle, Entry>,
    next_seq: u64,
    bound_scopes: HashSet<ScopeId>,
}

#[derive(Clone)]
pub struct Timers(Rc<RefCell<TimersInner>>);

impl Timers {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self(Rc::new(RefCell::new(TimersInner {
            clock,
            entries: SlotMap::with_key(),
            next_seq: 0,
            bound_scopes: HashSet::new(),
        })))
    }

    pub fn now(&self) -> Instant {
        self.0.borrow().clock.now()
    }

    pub fn schedule(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        self.insert(delay, None, Box::new(callback))
    }

    /// Schedules a timer owned by `scope`; disposing the scope cancels it.
    pub fn schedule_in(
        &self,
        scope: &Scope,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) -> TimerHandle {
        let handle = self.insert(delay, Some(scope.id()), Box::new(callback));

        let newly_bound = self.0.borrow_mut().bound_scopes.insert(scope.id());
        if newly_bound {
            let timers = self.clone();
            let id = scope.id();
            scope.add_disposer(move || {
                timers.0.borrow_mut().bound_scopes.remove(&id);
                let n = timers.cancel_owned(id);
                if n > 0 {
                    log::debug!("cancelled {n} pending timer(s) owned by {id}");
                }
            });
        }
        handle
    }

    fn insert(
        &self,
        delay: Duration,
        owner: Option<ScopeId>,
        callback: Box<dyn FnOnce()>,
    ) -> TimerHandle {
        let mut inner = self.0.borrow_mut();
        let deadline = inner.clock.now() + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(Entry {
            deadline,
            seq,
            owner,
            callback,
        })
    }

    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&self, handle: TimerHandle) -> bool {
        // Drop the callback outside the borrow; it may own other handles.
        let removed = self.0.borrow_mut().entries.remove(handle);
        removed.is_some()
    }

    pub fn cancel_owned(&self, owner: ScopeId) -> usize {
        let removed: Vec<Entry> = {
            let mut inner = self.0.borrow_mut();
            let keys: Vec<TimerHandle> = inner
                .entries
                .iter()
                .filter(|(_, e)| e.owner == Some(owner))
                .map(|(k, _)| k)
                .collect();
            keys.into_iter()
                .filter_map(|k| inner.entries.remove(k))
                .collect()
        };
        removed.len()
    }

    pub fn cancel_all(&self) -> usize {
        let drained: Vec<Entry> = {
            let mut inner = self.0.borrow_mut();
            inner.entries.drain().map(|(_, e)| e).collect()
        };
        drained.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.0.borrow().entries.contains_key(handle)
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().entries.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.0.borrow().entries.values().map(|e| e.deadline).min()
    }

    /// Fires every timer due at the current clock time, earliest deadline
    /// first (ties in scheduling order). Timers scheduled by the callbacks
    /// wait for the next call. Returns how many fired.
    pub fn run_due(&self) -> usize {
        let (now, horizon) = {
            let inner = self.0.borrow();
            (inner.clock.now(), inner.next_seq)
        };
        let mut fired = 0;
        loop {
            let entry = {
                let mut inner = self.0.borrow_mut();
                let next = inner
                    .entries
                    .iter()
                    .filter(|(_, e)| e.deadline <= now && e.seq < horizon)
                    .min_by_key(|(_, e)| (e.deadline, e.seq))
                    .map(|(k, _)| k);
                match next {
                    Some(k) => inner.entries.remove(k),
                    None => None,
                }
            };
            let Some(entry) = entry else { break };
            log::trace!("timer {} fired", entry.seq);
            (entry.callback)();
            fired += 1;
        }
        fired
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
