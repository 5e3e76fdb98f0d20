use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::detect::{FaceDetector, PresenceVerdict};
use crate::frame::{FeedState, FrameSource};
use crate::perf::PerfMonitor;
use crate::scoring::{ConfidenceScorer, OpticalSignalSource};
use crate::session::SessionAggregator;

use super::config::AnalyzerConfig;
use super::freeze::FreezeGuard;
use super::types::AnalysisUpdate;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Everything one analysis session's loop needs, bundled for the spawn.
pub(super) struct LoopContext {
    pub(super) source: Arc<dyn FrameSource>,
    pub(super) detector: FaceDetector,
    pub(super) signal_source: Option<Arc<dyn OpticalSignalSource>>,
    pub(super) scorer: ConfidenceScorer,
    pub(super) aggregator: SessionAggregator,
    pub(super) perf: PerfMonitor,
    pub(super) update_tx: watch::Sender<Option<AnalysisUpdate>>,
    pub(super) config: AnalyzerConfig,
}

pub(super) async fn analysis_loop(mut ctx: LoopContext, cancel_token: CancellationToken) {
    let mut ticker = tokio::time::interval(ctx.config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut freeze_guard = FreezeGuard::new();
    let mut last_tick: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !spacing_elapsed(last_tick.as_ref(), ctx.config.min_tick_spacing) {
                    log_info!("tick arrived under the minimum spacing, skipping");
                    continue;
                }
                last_tick = Some(Instant::now());
                run_tick(&mut ctx, &mut freeze_guard);
            }
            _ = cancel_token.cancelled() => {
                log_info!("analysis loop shutting down");
                break;
            }
        }
    }
}

fn run_tick(ctx: &mut LoopContext, freeze_guard: &mut FreezeGuard) {
    let tick_start = Instant::now();
    match analyze_once(ctx, freeze_guard) {
        Ok(()) => ctx.perf.record_tick(tick_start.elapsed()),
        Err(err) => log_error!("analysis tick failed: {err:?}"),
    }
}

/// One full tick: acquire frame, detect, score, aggregate, publish.
///
/// A paused or ended feed, and a ready feed with no decoded frame yet, both
/// score as a normal no-face tick. Only a frame source contract violation
/// surfaces as an error.
fn analyze_once(ctx: &mut LoopContext, freeze_guard: &mut FreezeGuard) -> Result<()> {
    let mut signals = None;
    let verdict = match ctx.source.feed_state() {
        FeedState::Ready => {
            match ctx
                .source
                .latest_frame()
                .context("frame acquisition failed")?
            {
                Some(frame) => {
                    if ctx.config.skip_frozen_frames && freeze_guard.is_frozen(frame.as_ref()) {
                        log_warn!("frame unchanged since previous tick, skipping analysis");
                        return Ok(());
                    }

                    let detect_start = Instant::now();
                    let verdict = ctx.detector.detect(frame.as_ref());
                    log_info!(
                        "detection finished in {}ms (detected: {}, confidence: {:.2})",
                        detect_start.elapsed().as_millis(),
                        verdict.detected,
                        verdict.confidence
                    );
                    signals = ctx
                        .signal_source
                        .as_ref()
                        .and_then(|source| source.signals_for(frame.as_ref()));
                    verdict
                }
                None => PresenceVerdict::absent(),
            }
        }
        FeedState::Paused | FeedState::Ended => PresenceVerdict::absent(),
    };

    let sample = ctx.scorer.score(&verdict, signals.as_ref());
    ctx.aggregator.append(sample.clone());

    let snapshot = ctx.aggregator.snapshot();
    log_info!(
        "tick scored {} (avg: {}, peak: {}, samples: {})",
        sample.confidence_score,
        snapshot.running_average,
        snapshot.peak_score,
        snapshot.sample_count
    );
    let _ = ctx.update_tx.send(Some(AnalysisUpdate { sample, snapshot }));
    Ok(())
}

fn spacing_elapsed(last_tick: Option<&Instant>, min_spacing: Duration) -> bool {
    last_tick
        .map(|instant| instant.elapsed() >= min_spacing)
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_always_passes_the_spacing_guard() {
        assert!(spacing_elapsed(None, Duration::from_secs(60)));
    }

    #[test]
    fn fresh_tick_is_rejected_until_spacing_passes() {
        let just_now = Instant::now();
        assert!(!spacing_elapsed(Some(&just_now), Duration::from_secs(60)));
        assert!(spacing_elapsed(Some(&just_now), Duration::ZERO));
    }
}
