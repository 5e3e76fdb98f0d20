use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use image::{Rgba, RgbaImage};
use rand::Rng;
use tokio::sync::oneshot;

use poisecam::interview::{SpeakOutcome, SpeechRecognizer, SpeechSynthesizer, Transcript};
use poisecam::{
    AnalysisController, AnalyzerConfig, FeedState, FrameSource, ImageFrame, InterviewFlow,
    VideoFrame,
};

const FRAME_EDGE: u32 = 96;
const SKIN: Rgba<u8> = Rgba([180, 140, 110, 255]);
const BACKDROP: Rgba<u8> = Rgba([50, 50, 55, 255]);

/// Stand-in for a webcam: a lit oval face over a dark backdrop, with a
/// little sensor noise on every pull so consecutive frames differ.
struct SyntheticCamera;

impl FrameSource for SyntheticCamera {
    fn feed_state(&self) -> FeedState {
        FeedState::Ready
    }

    fn latest_frame(&self) -> Result<Option<Box<dyn VideoFrame>>> {
        Ok(Some(Box::new(ImageFrame::new(face_frame()))))
    }
}

fn face_frame() -> RgbaImage {
    let mut rng = rand::thread_rng();
    let mut buffer = RgbaImage::from_pixel(FRAME_EDGE, FRAME_EDGE, BACKDROP);
    let (cx, cy) = (48.0, 48.0);
    let (rx, ry) = (12.0, 15.0);
    for y in 0..FRAME_EDGE {
        for x in 0..FRAME_EDGE {
            let dx = (f64::from(x) - cx) / rx;
            let dy = (f64::from(y) - cy) / ry;
            let base = if dx * dx + dy * dy <= 1.0 {
                SKIN
            } else {
                BACKDROP
            };
            let jitter: i16 = rng.gen_range(-3..=3);
            let pixel = Rgba([
                shift(base[0], jitter),
                shift(base[1], jitter),
                shift(base[2], jitter),
                255,
            ]);
            buffer.put_pixel(x, y, pixel);
        }
    }
    buffer
}

fn shift(channel: u8, jitter: i16) -> u8 {
    (i16::from(channel) + jitter).clamp(0, 255) as u8
}

/// Voice seam that just writes to stdout.
struct ConsoleVoice;

impl SpeechSynthesizer for ConsoleVoice {
    fn speak(&self, text: &str) -> oneshot::Receiver<SpeakOutcome> {
        println!("coach: {text}");
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(SpeakOutcome::Finished);
        rx
    }

    fn cancel(&self) {}
}

/// Candidate that gives the same canned answer to every question.
struct CannedCandidate {
    reply: String,
}

impl SpeechRecognizer for CannedCandidate {
    fn listen(&self) -> oneshot::Receiver<Transcript> {
        println!("candidate: {}", self.reply);
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Transcript {
            text: self.reply.clone(),
            confidence: 0.92,
        });
        rx
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Poisecam demo starting up...");

    let mut controller = AnalysisController::new(
        Arc::new(SyntheticCamera),
        AnalyzerConfig {
            interval: Duration::from_millis(250),
            min_tick_spacing: Duration::from_millis(100),
            ..AnalyzerConfig::default()
        },
    );

    let mut updates = controller.subscribe();
    controller.start()?;

    for _ in 0..10 {
        updates.changed().await?;
        let Some(update) = updates.borrow_and_update().clone() else {
            continue;
        };
        log::info!(
            "confidence {} (eye {}, posture {}, expression {} \"{}\")",
            update.sample.confidence_score,
            update.sample.eye_contact_score,
            update.sample.head_posture_score,
            update.sample.expression_score,
            update.sample.dominant_expression,
        );
    }

    controller.stop().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&controller.session_snapshot())?
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&controller.perf_snapshot())?
    );

    let candidate = CannedCandidate {
        reply: "Our team faced a difficult challenge on a recent project, and I \
                worked out a solution that produced a great result."
            .to_string(),
    };
    let mut interview = InterviewFlow::new();
    let summary = interview.run_with_speech(&ConsoleVoice, &candidate).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
