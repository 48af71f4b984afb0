//! # Scoped stores
//!
//! A `Store<S>` is the single authoritative owner of a state value. The value
//! is held as `Rc<S>` and replaced wholesale on every transition, never
//! mutated in place, so consumers detect change with `Rc::ptr_eq`.
//!
//! Consumers never own the store. They hold a `StoreHandle<S>` (weak), and
//! every access through it fails with `ScopeError::NotInScope` once the owning
//! scope has been destroyed.
//!
//! `create_scope` bundles a store with a fixed operations value built by a
//! factory, and `ScopeHandle::run` makes that bundle visible to any code
//! running inside it through `use_scope`.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::effects::{Dispose, attach_to_current_scope};
use crate::provider::{provide, try_use_context};
use crate::scope::{Scope, ScopeId, current_scope};
use crate::signal::{Signal, SubscriptionId};
use crate::ScopeError;

struct StoreInner<S: 'static> {
    state: Signal<Rc<S>>,
    version: Cell<u64>,
    alive: Cell<bool>,
    scope: Scope,
}

impl<S: 'static> StoreInner<S> {
    fn replace(&self, next: Rc<S>) {
        self.version.set(self.version.get() + 1);
        log::debug!(
            "{} state replaced (v{})",
            self.scope.id(),
            self.version.get()
        );
        self.state.set(next);
    }
}

/// Owning handle. Destroying it (or its scope) detaches every consumer.
pub struct Store<S: 'static> {
    inner: Rc<StoreInner<S>>,
}

impl<S: 'static> Store<S> {
    /// Creates a store in a fresh scope, nested under the current scope if
    /// there is one.
    pub fn new(initial: S) -> Self {
        let scope = match current_scope() {
            Some(parent) => parent.child(),
            None => Scope::new(),
        };
        Self::in_scope(initial, scope)
    }

    pub fn in_scope(initial: S, scope: Scope) -> Self {
        let inner = Rc::new(StoreInner {
            state: Signal::new(Rc::new(initial)),
            version: Cell::new(0),
            alive: Cell::new(true),
            scope: scope.clone(),
        });

        let weak = Rc::downgrade(&inner);
        scope.add_disposer(move || {
            if let Some(inner) = weak.upgrade() {
                inner.alive.set(false);
                inner.state.clear_subscribers();
                log::debug!("store in {} destroyed", inner.scope.id());
            }
        });

        Self { inner }
    }

    pub fn state(&self) -> Rc<S> {
        self.inner.state.get()
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Writes go through the same liveness check as a `StoreHandle`, so a
    /// destroyed store rejects them from either side.
    pub fn set_state(&self, next: S) -> Result<(), ScopeError> {
        self.handle().set_state(next)
    }

    pub fn replace_with(&self, f: impl FnOnce(&S) -> S) -> Result<(), ScopeError> {
        self.handle().replace_with(f)
    }

    pub fn subscribe(&self, f: impl Fn(&Rc<S>) + 'static) -> Result<SubscriptionId, ScopeError> {
        self.handle().subscribe(f)
    }

    pub fn scope(&self) -> &Scope {
        &self.inner.scope
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    pub fn handle(&self) -> StoreHandle<S> {
        StoreHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Disposes the owning scope: cancels its timers, drops all subscribers.
    pub fn destroy(&self) {
        self.inner.scope.dispose();
    }
}

/// Consumer handle. Cheap to clone; never keeps the store alive.
pub struct StoreHandle<S: 'static> {
    inner: Weak<StoreInner<S>>,
}

impl<S: 'static> StoreHandle<S> {
    fn live(&self) -> Result<Rc<StoreInner<S>>, ScopeError> {
        self.inner
            .upgrade()
            .filter(|inner| inner.alive.get())
            .ok_or_else(ScopeError::not_in_scope::<Store<S>>)
    }

    pub fn is_alive(&self) -> bool {
        self.live().is_ok()
    }

    pub fn state(&self) -> Result<Rc<S>, ScopeError> {
        Ok(self.live()?.state.get())
    }

    pub fn version(&self) -> Result<u64, ScopeError> {
        Ok(self.live()?.version.get())
    }

    pub fn scope(&self) -> Result<Scope, ScopeError> {
        Ok(self.live()?.scope.clone())
    }

    pub fn set_state(&self, next: S) -> Result<(), ScopeError> {
        self.live()?.replace(Rc::new(next));
        Ok(())
    }

    pub fn replace_with(&self, f: impl FnOnce(&S) -> S) -> Result<(), ScopeError> {
        let inner = self.live()?;
        let current = inner.state.get();
        inner.replace(Rc::new(f(&*current)));
        Ok(())
    }

    /// Replaces the state only when `f` returns `Some`; reports whether it did.
    pub fn try_replace_with(&self, f: impl FnOnce(&S) -> Option<S>) -> Result<bool, ScopeError> {
        let inner = self.live()?;
        let current = inner.state.get();
        match f(&*current) {
            Some(next) => {
                inner.replace(Rc::new(next));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn subscribe(&self, f: impl Fn(&Rc<S>) + 'static) -> Result<SubscriptionId, ScopeError> {
        Ok(self.live()?.state.subscribe(f))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.live() {
            Ok(inner) => inner.state.unsubscribe(id),
            Err(_) => false,
        }
    }

    /// Attaches a consumer. The returned guard detaches it; when called inside
    /// a scope, that scope's teardown detaches it as well.
    pub fn observe(&self, f: impl Fn(&Rc<S>) + 'static) -> Result<Dispose, ScopeError> {
        let id = self.subscribe(f)?;
        let handle = self.clone();
        let d = Dispose::new(move || {
            handle.unsubscribe(id);
        });
        attach_to_current_scope(&d);
        Ok(d)
    }
}

impl<S: 'static> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// What consumers receive from `use_scope`: the store plus its operations.
pub struct Provided<S: 'static, Ops: 'static> {
    pub store: StoreHandle<S>,
    pub ops: Rc<Ops>,
}

impl<S: 'static, Ops: 'static> Clone for Provided<S, Ops> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ops: self.ops.clone(),
        }
    }
}

/// A live provider scope: one store instance and its bound operations.
pub struct ScopeHandle<S: 'static, Ops: 'static> {
    store: Store<S>,
    ops: Rc<Ops>,
}

/// Allocates a store and binds the operations built by `factory` to it.
pub fn create_scope<S: 'static, Ops: 'static>(
    initial: S,
    factory: impl FnOnce(StoreHandle<S>) -> Ops,
) -> ScopeHandle<S, Ops> {
    let store = Store::new(initial);
    let ops = Rc::new(factory(store.handle()));
    log::debug!(
        "created {} for {}",
        store.scope().id(),
        std::any::type_name::<S>()
    );
    ScopeHandle { store, ops }
}

impl<S: 'static, Ops: 'static> ScopeHandle<S, Ops> {
    pub fn id(&self) -> ScopeId {
        self.store.scope().id()
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn operations(&self) -> &Rc<Ops> {
        &self.ops
    }

    pub fn provided(&self) -> Provided<S, Ops> {
        Provided {
            store: self.store.handle(),
            ops: self.ops.clone(),
        }
    }

    /// Runs `f` with this store visible through `use_scope::<S, Ops>()`.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let provided = self.provided();
        self.store.scope().run(|| provide(provided, f))
    }

    pub fn is_alive(&self) -> bool {
        self.store.is_alive()
    }

    pub fn destroy(&self) {
        self.store.destroy();
    }
}

pub fn try_use_scope<S: 'static, Ops: 'static>() -> Option<Provided<S, Ops>> {
    try_use_context::<Provided<S, Ops>>().filter(|p| p.store.is_alive())
}

/// Nearest enclosing live scope for `S`, or `NotInScope`.
pub fn use_scope<S: 'static, Ops: 'static>() -> Result<Provided<S, Ops>, ScopeError> {
    try_use_scope::<S, Ops>().ok_or_else(|| {
        log::warn!("{} used outside of its provider", std::any::type_name::<S>());
        ScopeError::not_in_scope::<S>()
    })
}
