// Periodic chart ticks tied to the lifetime of a handle
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::application::dashboard_service::Command;

/// Sends `Command::Tick` every `period` until dropped. Holds only a weak
/// sender so it never keeps the service alive.
pub struct ChartTicker {
    generation: u64,
    task: JoinHandle<()>,
}

impl ChartTicker {
    pub fn spawn(period: Duration, generation: u64, commands: mpsc::WeakSender<Command>) -> Self {
        let task = tokio::spawn(async move {
            // First tick one full period after start, like a browser interval.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let Some(commands) = commands.upgrade() else {
                    break;
                };
                if commands.send(Command::Tick { generation }).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Chart ticker {} exited", generation);
        });

        tracing::debug!("Chart ticker {} started ({:?})", generation, period);
        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ChartTicker {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Chart ticker {} cancelled", self.generation);
    }
}
