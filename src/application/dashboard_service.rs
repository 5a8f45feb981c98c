// Dashboard service - Single owner of dashboard state
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

use crate::application::chart_ticker::ChartTicker;
use crate::domain::dashboard::{
    render_view, Action, Catalog, DashboardSnapshot, DashboardState, MountedPanels,
};
use crate::domain::landing::{InfoMessage, InfoTopic};
use crate::infrastructure::config::DashboardConfig;
use crate::infrastructure::error::DashboardError;

const COMMAND_BUFFER: usize = 64;

pub enum Command {
    Dispatch {
        action: Action,
        reply: oneshot::Sender<Arc<DashboardSnapshot>>,
    },
    Tick {
        generation: u64,
    },
}

/// Owns the controller state, the mounted panels and the RNG. Only reachable
/// through `Command`s; every change is published as a fresh snapshot.
pub struct DashboardService {
    state: DashboardState,
    panels: Option<MountedPanels>,
    catalog: Catalog,
    rng: StdRng,
    tick_interval: Duration,
    ticker: Option<ChartTicker>,
    next_generation: u64,
    revision: u64,
    commands: mpsc::WeakSender<Command>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
}

impl DashboardService {
    fn new(config: &DashboardConfig, commands: mpsc::WeakSender<Command>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let catalog = config.catalog();
        let state = DashboardState::new(config.alerts.initial.clone());
        let view = render_view(&state, None, &catalog, &mut rng);
        let (snapshots, _) = watch::channel(Arc::new(DashboardSnapshot {
            revision: 1,
            generated_at: Utc::now(),
            state: state.clone(),
            view,
        }));

        Self {
            state,
            panels: None,
            catalog,
            rng,
            tick_interval: config.chart.tick_interval(),
            ticker: None,
            next_generation: 0,
            revision: 1,
            commands,
            snapshots,
        }
    }

    /// Starts the owner task and returns a handle to it. The task, and any
    /// ticker it holds, stops once every handle is dropped.
    pub fn spawn(config: &DashboardConfig) -> DashboardHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let service = Self::new(config, tx.downgrade());
        let snapshots = service.snapshots.subscribe();

        tokio::spawn(service.run(rx));
        DashboardHandle {
            commands: tx,
            snapshots,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        tracing::info!("Dashboard service started");
        while let Some(command) = commands.recv().await {
            match command {
                Command::Dispatch { action, reply } => {
                    let snapshot = self.dispatch(action);
                    let _ = reply.send(snapshot);
                }
                Command::Tick { generation } => self.tick(generation),
            }
        }
        tracing::info!("Dashboard service stopped");
    }

    fn current(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    fn dispatch(&mut self, action: Action) -> Arc<DashboardSnapshot> {
        if action.targets_panels() {
            match self.panels.as_mut() {
                Some(panels) => panels.apply(&action, &self.catalog),
                None => {
                    tracing::debug!("Ignoring {} while the landing screen is shown", action.name());
                    return self.current();
                }
            }
        } else {
            self.state = self.state.clone().apply(&action, &self.catalog.trigger_alert);
        }

        self.sync_panels();
        self.sync_ticker();
        let snapshot = self.publish();
        tracing::info!(
            action = action.name(),
            revision = snapshot.revision,
            "Applied action"
        );
        snapshot
    }

    fn tick(&mut self, generation: u64) {
        let live = self.ticker.as_ref().map(ChartTicker::generation) == Some(generation);
        if !live || self.state.toggles.paused {
            tracing::debug!("Dropping stale tick from ticker {}", generation);
            return;
        }
        let Some(panels) = self.panels.as_mut() else {
            return;
        };

        panels.chart.tick(&mut self.rng, &self.catalog.bounds);
        tracing::debug!("Chart ticked: {:?}", panels.chart.series().values());
        let snapshot = self.publish();
        tracing::debug!("Published revision {}", snapshot.revision);
    }

    /// Mounts fresh panels on entering the dashboard and drops them on leaving.
    fn sync_panels(&mut self) {
        match (self.state.landing_visible(), self.panels.is_some()) {
            (false, false) => self.panels = Some(MountedPanels::mount(&self.catalog)),
            (true, true) => self.panels = None,
            _ => {}
        }
    }

    /// Keeps exactly one ticker while the chart is mounted and not paused.
    fn sync_ticker(&mut self) {
        let wanted = self.panels.is_some() && !self.state.toggles.paused;
        match (self.ticker.is_some(), wanted) {
            (false, true) => {
                self.next_generation += 1;
                self.ticker = Some(ChartTicker::spawn(
                    self.tick_interval,
                    self.next_generation,
                    self.commands.clone(),
                ));
                tracing::info!("Live chart updates running");
            }
            (true, false) => {
                if let Some(ticker) = self.ticker.take() {
                    ticker.cancel();
                }
                tracing::info!("Live chart updates stopped");
            }
            _ => {}
        }
    }

    fn publish(&mut self) -> Arc<DashboardSnapshot> {
        self.revision += 1;
        let view = render_view(
            &self.state,
            self.panels.as_ref(),
            &self.catalog,
            &mut self.rng,
        );
        let snapshot = Arc::new(DashboardSnapshot {
            revision: self.revision,
            generated_at: Utc::now(),
            state: self.state.clone(),
            view,
        });
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
}

impl DashboardHandle {
    pub async fn dispatch(&self, action: Action) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(Command::Dispatch { action, reply }).await?;
        Ok(rx.await?)
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// A receiver positioned at the current snapshot; `changed` fires on the next publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        let mut rx = self.snapshots.clone();
        rx.borrow_and_update();
        rx
    }

    pub fn info(&self, slug: &str) -> Result<InfoMessage, DashboardError> {
        InfoTopic::from_slug(slug)
            .map(InfoMessage::from)
            .ok_or_else(|| DashboardError::UnknownTopic(slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::city_map::MapMode;
    use crate::domain::dashboard::{Screen, ScreenView};
    use crate::domain::traffic::ChartKind;

    fn seeded_config() -> DashboardConfig {
        DashboardConfig {
            seed: Some(17),
            ..DashboardConfig::default()
        }
    }

    fn chart_values(snapshot: &DashboardSnapshot) -> Vec<f64> {
        snapshot.chart().expect("dashboard view").series[0]
            .points
            .iter()
            .map(|p| p.value)
            .collect()
    }

    fn local_service() -> (DashboardService, mpsc::Sender<Command>, mpsc::Receiver<Command>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let service = DashboardService::new(&seeded_config(), tx.downgrade());
        (service, tx, rx)
    }

    #[tokio::test]
    async fn test_starts_on_landing_without_ticker() {
        let (service, _tx, _rx) = local_service();
        let snapshot = service.current();
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.state.screen, Screen::Landing);
        assert!(matches!(snapshot.view, ScreenView::Landing(_)));
        assert!(service.ticker.is_none());
        assert!(service.panels.is_none());
    }

    #[tokio::test]
    async fn test_ticker_follows_mount_and_pause() {
        let (mut service, _tx, _rx) = local_service();

        service.dispatch(Action::EnterDashboard);
        assert!(service.panels.is_some());
        let first = service.ticker.as_ref().map(ChartTicker::generation);
        assert_eq!(first, Some(1));

        service.dispatch(Action::TogglePause);
        assert!(service.ticker.is_none());

        service.dispatch(Action::TogglePause);
        assert_eq!(service.ticker.as_ref().map(ChartTicker::generation), Some(2));

        service.dispatch(Action::ShowFrontPage);
        assert!(service.ticker.is_none());
        assert!(service.panels.is_none());
    }

    #[tokio::test]
    async fn test_paused_tick_leaves_series_unchanged() {
        let (mut service, _tx, _rx) = local_service();
        service.dispatch(Action::EnterDashboard);
        let before = service.dispatch(Action::TogglePause);

        service.tick(1);
        service.tick(2);
        let after = service.current();
        assert_eq!(after.revision, before.revision);
        assert_eq!(
            service.panels.as_ref().unwrap().chart.series().values(),
            &[60.0, 90.0, 70.0, 100.0, 85.0, 65.0]
        );
    }

    #[tokio::test]
    async fn test_stale_generation_is_ignored() {
        let (mut service, _tx, _rx) = local_service();
        service.dispatch(Action::EnterDashboard);
        service.dispatch(Action::TogglePause);
        service.dispatch(Action::TogglePause);

        let before = service.current().revision;
        service.tick(1);
        assert_eq!(service.current().revision, before);

        service.tick(2);
        assert_eq!(service.current().revision, before + 1);
    }

    #[tokio::test]
    async fn test_unpaused_tick_moves_within_bounds() {
        let (mut service, _tx, _rx) = local_service();
        let entered = service.dispatch(Action::EnterDashboard);
        let before = chart_values(&entered);
        assert_eq!(before, vec![60.0, 90.0, 70.0, 100.0, 85.0, 65.0]);

        service.tick(1);
        let after = chart_values(&service.current());
        for (old, new) in before.iter().zip(&after) {
            assert!((new - old).abs() <= 10.0);
            assert!((40.0..=120.0).contains(new));
        }
    }

    #[tokio::test]
    async fn test_panel_actions_ignored_on_landing() {
        let (mut service, _tx, _rx) = local_service();
        let before = service.current();
        let after = service.dispatch(Action::SelectChartKind {
            kind: ChartKind::Bar,
        });
        assert_eq!(after.revision, before.revision);
    }

    #[tokio::test]
    async fn test_chart_kind_resets_on_remount() {
        let (mut service, _tx, _rx) = local_service();
        service.dispatch(Action::EnterDashboard);
        service.dispatch(Action::TogglePrediction);
        let bar = service.dispatch(Action::SelectChartKind {
            kind: ChartKind::Bar,
        });
        assert_eq!(bar.chart().unwrap().kind, ChartKind::Bar);
        assert_eq!(bar.chart().unwrap().series.len(), 1);

        service.dispatch(Action::ShowFrontPage);
        let back = service.dispatch(Action::EnterDashboard);
        let chart = back.chart().unwrap();
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 2);
        assert!(back.state.toggles.prediction_mode);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_publishes_live_ticks() {
        let handle = DashboardService::spawn(&seeded_config());
        let entered = handle.dispatch(Action::EnterDashboard).await.unwrap();
        let mut rx = handle.subscribe();

        rx.changed().await.unwrap();
        let ticked = rx.borrow_and_update().clone();
        assert_eq!(ticked.revision, entered.revision + 1);
        for (old, new) in chart_values(&entered).iter().zip(chart_values(&ticked)) {
            assert!((new - old).abs() <= 10.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_round_trip_preserves_toggles() {
        let handle = DashboardService::spawn(&seeded_config());
        handle.dispatch(Action::EnterDashboard).await.unwrap();
        handle.dispatch(Action::ToggleHighlight).await.unwrap();
        handle.dispatch(Action::ToggleMapMode).await.unwrap();
        let landing = handle.dispatch(Action::ShowFrontPage).await.unwrap();
        assert!(matches!(landing.view, ScreenView::Landing(_)));

        let back = handle.dispatch(Action::EnterDashboard).await.unwrap();
        assert!(back.state.toggles.highlighted);
        assert_eq!(back.state.toggles.map_mode, MapMode::Markers);
        assert_eq!(handle.snapshot().revision, back.revision);
    }

    #[tokio::test]
    async fn test_trigger_emergency_through_handle() {
        let handle = DashboardService::spawn(&seeded_config());
        let snapshot = handle.dispatch(Action::TriggerEmergency).await.unwrap();
        assert!(snapshot.state.alert.active);
        assert_eq!(snapshot.state.alert.kind, "Fire Truck Detected");
    }

    #[test]
    fn test_info_topics() {
        let (tx, _rx) = mpsc::channel(1);
        let (_, snapshots) = watch::channel(Arc::new(DashboardSnapshot {
            revision: 0,
            generated_at: Utc::now(),
            state: DashboardState::new(crate::domain::alert::EmergencyAlert::ambulance()),
            view: ScreenView::Landing(Default::default()),
        }));
        let handle = DashboardHandle {
            commands: tx,
            snapshots,
        };
        assert!(handle.info("route-planner").is_ok());
        assert!(matches!(
            handle.info("pricing"),
            Err(DashboardError::UnknownTopic(_))
        ));
    }
}
