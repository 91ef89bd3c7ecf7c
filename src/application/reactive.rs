// Observable single-value containers shared with the presentation layer
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Read-only handle to one chart's data. Starts `None`; written once per
/// fetch attempt by the matching [`CellWriter`].
#[derive(Debug, Clone)]
pub struct ReactiveCell<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> ReactiveCell<T> {
    pub fn get(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.rx.clone()
    }

    /// Current value followed by every later write.
    pub fn stream(&self) -> WatchStream<Option<T>>
    where
        T: Send + Sync + 'static,
    {
        WatchStream::new(self.subscribe())
    }
}

/// Read-only handle to one chart's in-flight flag.
#[derive(Debug, Clone)]
pub struct PendingFlag {
    rx: watch::Receiver<bool>,
}

impl PendingFlag {
    pub fn is_pending(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    /// Resolves once the flag has dropped to false.
    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        // Err means the writer is gone, and it always clears the flag first.
        let _ = rx.wait_for(|pending| !*pending).await;
    }
}

/// Sole writer for a cell and its pending flag. `resolve` consumes it, so a
/// fetch attempt can write at most once. Dropping it unresolved still clears
/// the flag.
#[derive(Debug)]
pub struct CellWriter<T> {
    value: watch::Sender<Option<T>>,
    pending: watch::Sender<bool>,
    resolved: bool,
}

impl<T> CellWriter<T> {
    pub fn resolve(mut self, value: Option<T>) {
        self.value.send_replace(value);
        self.pending.send_replace(false);
        self.resolved = true;
    }
}

impl<T> Drop for CellWriter<T> {
    fn drop(&mut self) {
        if !self.resolved {
            self.pending.send_replace(false);
        }
    }
}

/// Fresh cell in the pending state.
pub fn pending_cell<T>() -> (CellWriter<T>, ReactiveCell<T>, PendingFlag) {
    let (value_tx, value_rx) = watch::channel(None);
    let (pending_tx, pending_rx) = watch::channel(true);
    (
        CellWriter {
            value: value_tx,
            pending: pending_tx,
            resolved: false,
        },
        ReactiveCell { rx: value_rx },
        PendingFlag { rx: pending_rx },
    )
}
