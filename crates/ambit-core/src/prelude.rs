pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::color::Color;
pub use crate::effects::Dispose;
pub use crate::error::ScopeError;
pub use crate::provider::{provide, try_use_context, use_context, use_context_or_default};
pub use crate::scope::{Scope, ScopeId, current_scope};
pub use crate::signal::{Signal, SubscriptionId, signal};
pub use crate::store::{
    Provided, ScopeHandle, Store, StoreHandle, create_scope, try_use_scope, use_scope,
};
pub use crate::timer::{TimerHandle, Timers};
pub use web_time::{Duration, Instant};
