//! Rotating progress messages for query-driven fetches.
//!
//! A search can take the backend a while (it may crawl and summarise pages),
//! so while one runs the UI cycles through a fixed set of progress strings.
//! The ticker is a guard: it publishes on a `watch` channel for as long as it
//! is alive and stops the moment it is dropped.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Ticker configuration: which messages to cycle and how fast
#[derive(Debug, Clone)]
pub struct TickerSettings {
    pub messages: Vec<String>,
    pub interval: Duration,
}

impl TickerSettings {
    /// Settings from embedded app data
    pub fn from_app_data() -> Self {
        let search = &crate::app_data::app_data().search;
        Self {
            messages: search.loading_messages.clone(),
            interval: search.ticker_interval(),
        }
    }

    /// Message shown after `tick` interval boundaries have elapsed
    pub fn message_at(&self, tick: usize) -> Option<&str> {
        if self.messages.is_empty() {
            return None;
        }
        Some(self.messages[tick % self.messages.len()].as_str())
    }

    /// Open the channel a ticker will publish on, seeded with the first message
    pub fn channel(&self) -> Option<(watch::Sender<String>, watch::Receiver<String>)> {
        self.message_at(0).map(|first| watch::channel(first.to_string()))
    }
}

/// Running ticker; aborted on drop
pub struct LoadingTicker {
    handle: JoinHandle<()>,
}

impl LoadingTicker {
    /// Start cycling messages on `sender`. Must be called inside a tokio runtime.
    pub fn start(settings: TickerSettings, sender: watch::Sender<String>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(settings.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            let mut tick = 0usize;
            loop {
                interval.tick().await;
                let Some(message) = settings.message_at(tick) else {
                    return;
                };
                if sender.send(message.to_string()).is_err() {
                    // Nobody is watching anymore
                    return;
                }
                tick = tick.wrapping_add(1);
            }
        });

        Self { handle }
    }
}

impl Drop for LoadingTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(interval_ms: u64) -> TickerSettings {
        TickerSettings {
            messages: vec!["one".into(), "two".into(), "three".into()],
            interval: Duration::from_millis(interval_ms),
        }
    }

    #[test]
    fn test_messages_cycle_in_order() {
        let s = settings(10);
        let seen: Vec<&str> = (0..7).filter_map(|t| s.message_at(t)).collect();
        assert_eq!(seen, ["one", "two", "three", "one", "two", "three", "one"]);
    }

    #[test]
    fn test_no_messages_no_channel() {
        let s = TickerSettings {
            messages: Vec::new(),
            interval: Duration::from_millis(10),
        };
        assert!(s.message_at(0).is_none());
        assert!(s.channel().is_none());
    }

    #[tokio::test]
    async fn test_ticker_advances() {
        let s = settings(20);
        let (tx, mut rx) = s.channel().unwrap();
        assert_eq!(*rx.borrow(), "one");

        let _ticker = LoadingTicker::start(s, tx);

        let reached_two = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                rx.changed().await.unwrap();
                if *rx.borrow_and_update() == "two" {
                    break;
                }
            }
        })
        .await;
        assert!(reached_two.is_ok());
    }

    #[tokio::test]
    async fn test_drop_stops_updates() {
        let s = settings(10);
        let (tx, mut rx) = s.channel().unwrap();
        let ticker = LoadingTicker::start(s, tx);

        tokio::time::sleep(Duration::from_millis(30)).await;
        drop(ticker);

        // Once the task is gone its sender is dropped and the channel closes
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok(), "ticker kept publishing after drop");

        let last = rx.borrow().clone();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*rx.borrow(), last);
    }
}
