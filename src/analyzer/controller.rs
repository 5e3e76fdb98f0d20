use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::detect::FaceDetector;
use crate::frame::FrameSource;
use crate::perf::{PerfMonitor, PerfSnapshot};
use crate::scoring::{ConfidenceScorer, OpticalSignalSource};
use crate::session::{SessionAggregator, SessionSnapshot};

use super::config::AnalyzerConfig;
use super::loop_worker::{analysis_loop, LoopContext};
use super::types::AnalysisUpdate;

/// Owns the analysis lifecycle for one frame source: the background loop,
/// the session aggregate, and the update channel readers subscribe to.
pub struct AnalysisController {
    source: Arc<dyn FrameSource>,
    signal_source: Option<Arc<dyn OpticalSignalSource>>,
    config: AnalyzerConfig,
    aggregator: SessionAggregator,
    perf: PerfMonitor,
    update_tx: watch::Sender<Option<AnalysisUpdate>>,
    update_rx: watch::Receiver<Option<AnalysisUpdate>>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl AnalysisController {
    pub fn new(source: Arc<dyn FrameSource>, config: AnalyzerConfig) -> Self {
        let (update_tx, update_rx) = watch::channel(None);
        Self {
            source,
            signal_source: None,
            config,
            aggregator: SessionAggregator::new(),
            perf: PerfMonitor::new(),
            update_tx,
            update_rx,
            handle: None,
            cancel_token: None,
        }
    }

    /// Plugs in a trained detector that enriches each scored tick with
    /// landmark and expression measurements. Without one, the scorer runs
    /// on its confidence-scaled baselines.
    pub fn with_signal_source(mut self, signal_source: Arc<dyn OpticalSignalSource>) -> Self {
        self.signal_source = Some(signal_source);
        self
    }

    /// Starts a fresh analysis session on this controller's frame source.
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            bail!("analysis already active");
        }
        self.config
            .validate()
            .context("analyzer configuration rejected")?;

        // Each start is a new session: new id, empty history, cleared update.
        self.aggregator.reset();
        self.perf.reset();
        let _ = self.update_tx.send(None);

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let ctx = LoopContext {
            source: Arc::clone(&self.source),
            detector: FaceDetector::new(self.config.detector.clone()),
            signal_source: self.signal_source.clone(),
            scorer: ConfidenceScorer::new(self.config.scorer.clone()),
            aggregator: self.aggregator.clone(),
            perf: self.perf.clone(),
            update_tx: self.update_tx.clone(),
            config: self.config.clone(),
        };

        info!(
            "starting analysis loop (interval: {:?}, min spacing: {:?})",
            self.config.interval, self.config.min_tick_spacing
        );
        let handle = tokio::spawn(analysis_loop(ctx, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Stops the loop and waits for it to exit. No sample lands after this
    /// returns.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("analysis loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Latest per-tick update. Holds `None` until the current session's
    /// first scored tick.
    pub fn subscribe(&self) -> watch::Receiver<Option<AnalysisUpdate>> {
        self.update_rx.clone()
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        self.aggregator.snapshot()
    }

    pub fn perf_snapshot(&self) -> PerfSnapshot {
        self.perf.snapshot()
    }
}
