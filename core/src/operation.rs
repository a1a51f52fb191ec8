//! # Operation Poller
//!
//! Drives a remote long-running operation to a terminal state by polling its
//! status at a fixed interval, bounded by a total time budget.

use tokio::time::Instant;
use tracing::trace;

use kubehop_common::cluster::{OperationHandle, TargetDescriptor};
use kubehop_common::config::PollConfig;
use kubehop_common::error::OperationError;
use kubehop_common::sources::ClusterAdmin;

/// Waits until `handle` reaches a terminal state.
///
/// A terminal status with no error payload is success; a terminal status
/// carrying an error payload fails with [`OperationError::Failed`] holding
/// that exact message. A transport failure on any single fetch aborts
/// immediately without retry. A still-pending operation past
/// `cfg.max_wait` fails with [`OperationError::TimedOut`].
pub async fn await_operation(
    admin: &dyn ClusterAdmin,
    target: &TargetDescriptor,
    handle: &OperationHandle,
    cfg: &PollConfig,
) -> Result<(), OperationError> {
    let started = Instant::now();

    loop {
        let status = admin.operation_status(target, handle).await?;

        if status.terminal {
            return match status.error_message {
                Some(message) => Err(OperationError::Failed(message)),
                None => Ok(()),
            };
        }

        if started.elapsed() >= cfg.max_wait {
            return Err(OperationError::TimedOut(cfg.max_wait));
        }

        trace!("operation {} still pending", handle.0);
        tokio::time::sleep(cfg.interval).await;
    }
}
