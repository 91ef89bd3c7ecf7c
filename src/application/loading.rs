// Loading aggregator - one "board still loading" signal for many charts
use crate::application::reactive::PendingFlag;
use futures::future::join_all;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Floor that keeps the board skeleton up long enough for the entrance
/// animation, even when every source resolves instantly.
pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(600);

/// Combined board signal. True until every chart has settled and the
/// minimum display time has passed.
#[derive(Debug, Clone)]
pub struct LoadingSignal {
    rx: watch::Receiver<bool>,
}

impl LoadingSignal {
    pub fn is_loading(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|loading| !*loading).await;
    }
}

/// Per-chart flags plus the combined signal, so the renderer can show a
/// whole-board skeleton and per-chart spinners independently.
#[derive(Debug, Clone)]
pub struct LoadingAggregator {
    flags: Vec<(&'static str, PendingFlag)>,
    combined: LoadingSignal,
}

impl LoadingAggregator {
    /// The display floor is measured from this call. Must run inside a tokio
    /// runtime.
    pub fn new(flags: Vec<(&'static str, PendingFlag)>, min_display: Duration) -> Self {
        let (tx, rx) = watch::channel(true);
        let deadline = Instant::now() + min_display;
        let watched: Vec<PendingFlag> = flags.iter().map(|(_, flag)| flag.clone()).collect();

        tokio::spawn(async move {
            let all_settled = join_all(watched.iter().map(|flag| flag.settled()));
            tokio::join!(tokio::time::sleep_until(deadline), all_settled);
            tx.send_replace(false);
        });

        Self {
            flags,
            combined: LoadingSignal { rx },
        }
    }

    pub fn signal(&self) -> &LoadingSignal {
        &self.combined
    }

    pub fn is_loading(&self) -> bool {
        self.combined.is_loading()
    }

    pub fn pendings(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.flags.iter().map(|(name, flag)| (*name, flag.is_pending()))
    }
}
