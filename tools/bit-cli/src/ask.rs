//! Ask command - pose a question and print the Bit's answer

use anyhow::Result;
use bit_core::{BitScene, FrameClock, InputEvent, Presenter};
use clap::Args;
use std::path::PathBuf;

use crate::simulate::NullSink;

/// Frame rate of the headless loop
const FPS: f32 = 60.0;

/// Arguments for the ask command
#[derive(Args)]
pub struct AskArgs {
    /// The question
    pub question: String,

    /// Seed for a reproducible answer
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file (defaults to the platform config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute the ask command
pub fn execute(args: AskArgs) -> Result<()> {
    if args.question.trim().is_empty() {
        anyhow::bail!("Question is empty");
    }

    let mut config = crate::load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.ask.seed = args.seed;
    }

    // Longest possible wait plus a second of slack
    let (_, max_delay_ms) = config.ask.delay_range_ms();
    let limit_seconds = max_delay_ms / 1000.0 + 1.0;

    let mut presenter = Presenter::new(config.ask.clone());
    let mut scene = BitScene::new(config);
    let mut sink = NullSink::default();
    scene.mount(&mut sink);

    presenter.handle(
        InputEvent::Ask {
            question: args.question,
        },
        &mut scene,
    );

    let mut clock = FrameClock::new();
    while clock.elapsed() < limit_seconds {
        let frame = clock.tick(1.0 / FPS);
        if let Some(answer) = presenter.tick(frame.delta, &mut scene) {
            println!("{}", answer.state);
            scene.dispose(&mut sink);
            return Ok(());
        }
        scene.update(frame);
    }

    scene.dispose(&mut sink);
    anyhow::bail!("No answer after {limit_seconds:.1}s")
}
