//! Display ticker for the live elapsed-time readout
//!
//! Runs on its own thread and sends a [`Tick`] at a fixed cadence while
//! started. The REPL starts it when a trial opens and stops it when the trial
//! is graded; ticks only refresh the display and never reach grading.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One refresh signal
#[derive(Clone, Debug)]
pub struct Tick {
    /// Ticks sent since the last start (1-based)
    pub count: u64,
    pub timestamp: Instant,
}

/// Commands that can be sent to the ticker thread
#[derive(Debug)]
enum TickerCommand {
    Start,
    Stop,
    Shutdown,
}

pub struct DisplayTicker {
    running: Arc<AtomicBool>,
    command_tx: Sender<TickerCommand>,
    thread: Option<JoinHandle<()>>,
}

impl DisplayTicker {
    /// Spawn a stopped ticker; ticks arrive on the returned receiver
    pub fn spawn(interval: Duration) -> (Self, Receiver<Tick>) {
        let (command_tx, command_rx) = crossbeam_channel::bounded(16);
        let (tick_tx, tick_rx) = unbounded();
        let running = Arc::new(AtomicBool::new(false));

        let running_clone = running.clone();
        let thread = thread::spawn(move || {
            TickerThread {
                interval,
                running: running_clone,
                command_rx,
                tick_tx,
                count: 0,
            }
            .run();
        });

        let ticker = DisplayTicker {
            running,
            command_tx,
            thread: Some(thread),
        };
        (ticker, tick_rx)
    }

    pub fn start(&self) {
        // Set eagerly so is_running reflects the request before the thread sees it
        self.running.store(true, Ordering::Relaxed);
        let _ = self.command_tx.send(TickerCommand::Start);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
        let _ = self.command_tx.send(TickerCommand::Stop);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Drop for DisplayTicker {
    fn drop(&mut self) {
        let _ = self.command_tx.send(TickerCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

struct TickerThread {
    interval: Duration,
    running: Arc<AtomicBool>,
    command_rx: Receiver<TickerCommand>,
    tick_tx: Sender<Tick>,
    count: u64,
}

impl TickerThread {
    fn run(mut self) {
        loop {
            match self.command_rx.recv_timeout(self.interval) {
                Ok(TickerCommand::Start) | Ok(TickerCommand::Stop) => self.count = 0,
                Ok(TickerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    if !self.running.load(Ordering::Relaxed) {
                        continue;
                    }
                    self.count += 1;
                    let tick = Tick {
                        count: self.count,
                        timestamp: Instant::now(),
                    };
                    if self.tick_tx.send(tick).is_err() {
                        break;
                    }
                }
            }
        }
        debug!("display ticker stopped");
    }
}
