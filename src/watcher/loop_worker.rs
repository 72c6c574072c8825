use std::sync::Arc;

use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::DesignApi;

use super::poller::{CycleOutcome, UpdatePoller};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Re-run `poller` every `period` until `cancel_token` fires.
///
/// The startup cycle has already run by the time this is spawned, so the
/// interval's immediate first tick is skipped.
pub async fn watch_loop<A>(poller: Arc<UpdatePoller<A>>, period: Duration, cancel_token: CancellationToken)
where
    A: DesignApi + ?Sized + 'static,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut cycles: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                cycles += 1;
                match poller.check_for_updates().await {
                    CycleOutcome::Written { version, .. } => {
                        log::debug!("watch cycle #{cycles}: wrote tokens for {version}");
                    }
                    CycleOutcome::Unchanged { .. } | CycleOutcome::Busy => {}
                    CycleOutcome::Failed { error, .. } => {
                        log::debug!("watch cycle #{cycles} failed: {error}");
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("watch loop shutting down after {cycles} cycles");
                break;
            }
        }
    }
}
