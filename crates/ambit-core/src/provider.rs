//! # Provider frames
//!
//! A thread‑local stack of frames makes values visible to everything that runs
//! inside a `provide` call, however deeply nested, without threading them
//! through every function in between:
//!
//! ```rust
//! use ambit_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Locale(&'static str);
//!
//! fn leaf() -> Result<Locale, ScopeError> {
//!     use_context::<Locale>()
//! }
//!
//! assert!(leaf().is_err());
//! let found = provide(Locale("fr"), || provide(7u32, leaf));
//! assert_eq!(found, Ok(Locale("fr")));
//! ```
//!
//! Lookups walk the frames innermost first, so a nested `provide` of the same
//! type shadows the outer one for its subtree only.

use std::any::{Any, TypeId};
use std::cell::RefCell;

use smallvec::SmallVec;

use crate::ScopeError;

type Frame = SmallVec<[(TypeId, Box<dyn Any>); 2]>;

thread_local! {
    static PROVIDER_STACK: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

fn with_provider_frame<R>(frame: Frame, f: impl FnOnce() -> R) -> R {
    // Pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            PROVIDER_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    PROVIDER_STACK.with(|st| st.borrow_mut().push(frame));
    let _guard = Guard;
    f()
}

/// Makes `value` visible to every `use_context::<T>()` within `f`.
pub fn provide<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    let mut frame = Frame::new();
    frame.push((TypeId::of::<T>(), Box::new(value)));
    with_provider_frame(frame, f)
}

pub fn try_use_context<T: Clone + 'static>() -> Option<T> {
    PROVIDER_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            for (t, v) in frame.iter().rev() {
                if *t == TypeId::of::<T>()
                    && let Some(v) = v.downcast_ref::<T>()
                {
                    return Some(v.clone());
                }
            }
        }
        None
    })
}

/// Nearest enclosing value of type `T`, or `NotInScope` when there is none.
pub fn use_context<T: Clone + 'static>() -> Result<T, ScopeError> {
    try_use_context::<T>().ok_or_else(|| {
        log::warn!("{} requested outside of a provider", std::any::type_name::<T>());
        ScopeError::not_in_scope::<T>()
    })
}

/// Like `use_context`, but falls back to `T::default()` outside a provider.
pub fn use_context_or_default<T: Clone + Default + 'static>() -> T {
    try_use_context::<T>().unwrap_or_default()
}

pub fn provider_depth() -> usize {
    PROVIDER_STACK.with(|st| st.borrow().len())
}
