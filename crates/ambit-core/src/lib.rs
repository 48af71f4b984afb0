//! # Scopes, Stores, and Timers
//!
//! Ambit shares state and the operations that change it with arbitrarily
//! nested consumers, without passing either through every call in between.
//! There are four main pieces:
//!
//! - `Store<S>` — the single owner of a state value, replaced wholesale on
//!   every change, with synchronous subscriber notification.
//! - `create_scope` / `use_scope` — bind a fixed operations value to a store
//!   and make both visible to everything running inside the scope.
//! - `Scope` — lifetime boundary; disposing it detaches consumers and runs
//!   cleanups.
//! - `Timers` — cancellable, host‑driven timers owned by scopes.
//!
//! ## Providing and consuming
//!
//! ```rust
//! use ambit_core::*;
//!
//! struct Counter {
//!     store: StoreHandle<u32>,
//! }
//!
//! impl Counter {
//!     fn bump(&self) -> Result<(), ScopeError> {
//!         self.store.replace_with(|n| n + 1)
//!     }
//! }
//!
//! fn button() -> Result<(), ScopeError> {
//!     let counter = use_scope::<u32, Counter>()?;
//!     counter.ops.bump()
//! }
//!
//! let scope = create_scope(0u32, |store| Counter { store });
//! scope.run(|| button()).unwrap();
//! scope.run(|| button()).unwrap();
//! assert_eq!(*scope.store().state(), 2);
//!
//! // Outside the provider the lookup fails loudly.
//! assert!(button().is_err());
//! ```
//!
//! ## Teardown
//!
//! `ScopeHandle::destroy` disposes the scope: timers scheduled with
//! `Timers::schedule_in` are cancelled, subscribers are dropped, and every
//! `StoreHandle` still held by a consumer starts returning
//! `ScopeError::NotInScope`.
//!
//! ## Timers
//!
//! Timers never run on their own. The host loop calls `Timers::run_due`,
//! typically after sleeping until `Timers::next_deadline`. Tests swap the
//! clock for a `ManualClock` and advance it explicitly.

pub mod clock;
pub mod color;
pub mod effects;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod scope;
pub mod signal;
pub mod store;
pub mod timer;

pub use clock::*;
pub use color::*;
pub use effects::*;
pub use error::*;
pub use prelude::*;
pub use provider::*;
pub use scope::*;
pub use signal::*;
pub use store::*;
pub use timer::*;
