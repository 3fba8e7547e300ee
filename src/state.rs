use crate::blob::FileBlobStore;
use crate::store::EntryStore;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<EntryStore<FileBlobStore>>>,
    pub submit_delay: Duration,
    submitting: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: EntryStore<FileBlobStore>, submit_delay: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            submit_delay,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Marks a submission as in flight. Returns `None` if one already is.
    pub fn begin_submission(&self) -> Option<SubmissionGuard> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard {
                flag: Arc::clone(&self.submitting),
            })
    }
}

/// Clears the busy flag when dropped, including when the request is abandoned.
pub struct SubmissionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
