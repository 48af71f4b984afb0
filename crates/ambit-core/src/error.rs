use thiserror::Error;

/// The single failure mode of the store core.
///
/// Returned whenever a consumer reaches for a store that no enclosing
/// provider supplies, or whose owning scope has already been destroyed.
/// Consumers never get a default or no-op store in its place.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("`{kind}` was accessed outside of its provider scope")]
    NotInScope { kind: &'static str },
}

impl ScopeError {
    pub fn not_in_scope<T: ?Sized>() -> Self {
        ScopeError::NotInScope {
            kind: std::any::type_name::<T>(),
        }
    }
}
