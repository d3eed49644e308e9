use super::RecognitionSession;
use log::debug;

/// Handle over a running session with an explicit active flag.
///
/// Events are applied only while `is_active()`; `stop` clears the flag
/// before returning, so a result still in flight is dropped.
pub struct Subscription {
    session: Box<dyn RecognitionSession>,
    active: bool,
}

impl Subscription {
    pub fn new(session: Box<dyn RecognitionSession>) -> Self {
        Self {
            session,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stops the session once. Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.session.stop();
        debug!("event=speech_stop module=speech status=ok");
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::Subscription;
    use crate::speech::RecognitionSession;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingSession(Arc<AtomicU32>);

    impl RecognitionSession for CountingSession {
        fn stop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn stop_reaches_the_session_exactly_once() {
        let stops = Arc::new(AtomicU32::new(0));
        let mut subscription = Subscription::new(Box::new(CountingSession(stops.clone())));
        assert!(subscription.is_active());

        assert!(subscription.stop());
        assert!(!subscription.stop());
        drop(subscription);

        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_an_active_subscription_stops_the_session() {
        let stops = Arc::new(AtomicU32::new(0));
        drop(Subscription::new(Box::new(CountingSession(stops.clone()))));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
