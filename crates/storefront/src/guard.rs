use std::sync::atomic::{AtomicBool, Ordering};

/// Marks a form as submitting for as long as it is alive.
///
/// The submit control is disabled while this guard exists; a second
/// submit that finds the flag set is rejected instead of issuing a
/// duplicate request.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// `None` if a submission is already running.
    pub(crate) fn begin(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
