//! Command execution helpers
//!
//! The billing service and repository are synchronous, so every command
//! runs its body on the blocking pool and logs the outcome with timing.

use std::sync::Arc;
use std::time::Instant;

use mspdash_domain::{MspDashError, Result as DomainResult};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Run `command_fn` on the blocking thread pool with timing and logging.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &Arc<AppContext>) -> DomainResult<usize> {
///     execute_blocking(ctx, "module::my_command", |ctx| {
///         Ok(ctx.billing.compute_dashboard(Default::default(), Default::default())?.len())
///     })
///     .await
/// }
/// ```
pub async fn execute_blocking<F, T>(
    ctx: &Arc<AppContext>,
    command_name: &'static str,
    command_fn: F,
) -> DomainResult<T>
where
    F: FnOnce(&AppContext) -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    let start = Instant::now();
    let ctx = Arc::clone(ctx);

    let result = tokio::task::spawn_blocking(move || command_fn(&ctx))
        .await
        .map_err(|e| MspDashError::Internal(format!("spawn_blocking failed: {e}")))
        .and_then(|inner| inner);

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());
    result
}
