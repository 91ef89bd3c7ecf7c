// Notifier trait - sink for transient board notices
use crate::domain::notice::Notice;

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
