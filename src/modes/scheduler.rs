use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// The single repeating timer that drives game ticks.
///
/// Starting it again replaces the running interval, so the first tick after a
/// speed change comes one full new period later.
pub struct TickScheduler {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl TickScheduler {
    /// A scheduler that is not ticking yet
    pub fn idle() -> Self {
        Self {
            interval: None,
            period: None,
        }
    }

    /// Start ticking every `period`, dropping any previous schedule
    pub fn start(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
        self.period = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick; never completes while cancelled
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_full_period() {
        let mut scheduler = TickScheduler::idle();
        scheduler.start(Duration::from_millis(200));
        let started = Instant::now();

        scheduler.tick().await;
        let first = started.elapsed();
        assert!(first >= Duration::from_millis(200) && first < Duration::from_millis(210));

        scheduler.tick().await;
        let second = started.elapsed();
        assert!(second >= Duration::from_millis(400) && second < Duration::from_millis(410));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_uses_new_period() {
        let mut scheduler = TickScheduler::idle();
        scheduler.start(Duration::from_millis(200));
        scheduler.tick().await;

        scheduler.start(Duration::from_millis(190));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(190)));
        let restarted = Instant::now();

        scheduler.tick().await;
        let waited = restarted.elapsed();
        assert!(waited >= Duration::from_millis(190) && waited < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_scheduler_never_ticks() {
        let mut scheduler = TickScheduler::idle();
        assert!(!scheduler.is_running());
        assert!(timeout(Duration::from_secs(5), scheduler.tick()).await.is_err());

        scheduler.start(Duration::from_millis(100));
        assert!(scheduler.is_running());
        scheduler.cancel();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.period(), None);
        assert!(timeout(Duration::from_secs(5), scheduler.tick()).await.is_err());
    }
}
