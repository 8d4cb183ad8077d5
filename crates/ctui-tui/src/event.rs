//! Terminal event handling

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::instrument::WithSubscriber;

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick (spinner and periodic refresh)
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Polls the terminal from a background task
///
/// Polling can be paused while a child process owns the terminal so that
/// its keystrokes are not consumed here.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    paused: Arc<AtomicBool>,
    tick_rate: Duration,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let paused = Arc::new(AtomicBool::new(false));
        let tx_clone = tx.clone();
        let paused_clone = paused.clone();

        tokio::spawn(async move {
            loop {
                if paused_clone.load(Ordering::SeqCst) {
                    tokio::time::sleep(tick_rate).await;
                    continue;
                }

                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    },
                    _ => Some(Event::Tick),
                };

                if let Some(event) = event {
                    if tx_clone.send(event).is_err() {
                        break;
                    }
                }
            }
        }
        .with_current_subscriber());

        Self {
            rx,
            paused,
            tick_rate,
            _tx: tx,
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Stop reading the terminal and drop anything already queued
    pub async fn pause(&mut self) {
        self.paused.store(true, Ordering::SeqCst);
        // Let an in-progress poll finish before the terminal changes hands
        tokio::time::sleep(self.tick_rate + Duration::from_millis(20)).await;
        while self.rx.try_recv().is_ok() {}
    }

    pub fn resume(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
    }
}
