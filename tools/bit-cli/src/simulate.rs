//! Simulate command - run the frame loop headlessly
//!
//! Events are given as `SECONDS:ACTION` and fire on the first frame at or after
//! their time. The final scene snapshot is printed as JSON.

use anyhow::{Context, Result};
use bit_core::procedural::UnpackedMesh;
use bit_core::{BitScene, FrameClock, MeshHandle, MeshSink, Presenter, ScriptEvent};
use clap::Args;
use std::path::PathBuf;

/// Question used for scripted `ask` actions
const SCRIPTED_QUESTION: &str = "Scripted question";

/// Arguments for the simulate command
#[derive(Args)]
pub struct SimulateArgs {
    /// Frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Length of the run in seconds
    #[arg(long, default_value_t = 3.0)]
    pub seconds: f32,

    /// Scripted input, e.g. `0.5:yes` (actions: yes, no, release, blur, ask)
    #[arg(short, long = "event")]
    pub events: Vec<ScriptEvent>,

    /// Seed for the ask flow
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file (defaults to the platform config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Sink that accepts every upload without drawing anything
#[derive(Default)]
pub(crate) struct NullSink {
    next: u32,
}

impl MeshSink for NullSink {
    fn upload(&mut self, _mesh: &UnpackedMesh) -> Option<MeshHandle> {
        self.next += 1;
        Some(MeshHandle(self.next))
    }

    fn release(&mut self, _handle: MeshHandle) {}
}

/// Execute the simulate command
pub fn execute(args: SimulateArgs) -> Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    if !args.seconds.is_finite() {
        anyhow::bail!("--seconds must be a finite number");
    }

    let mut config = crate::load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.ask.seed = args.seed;
    }

    let mut presenter = Presenter::new(config.ask.clone());
    let mut scene = BitScene::new(config);
    let mut sink = NullSink::default();
    scene.mount(&mut sink);

    let mut events = args.events;
    events.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = events.into_iter().peekable();

    let dt = 1.0 / args.fps as f32;
    let frames = (args.seconds.max(0.0) * args.fps as f32).ceil() as u64;
    let mut clock = FrameClock::new();

    for _ in 0..frames {
        let frame = clock.tick(dt);
        while let Some(event) = pending.next_if(|e| e.at <= frame.elapsed) {
            tracing::debug!(at = event.at, action = ?event.action, "Event");
            presenter.handle(event.action.to_event(SCRIPTED_QUESTION), &mut scene);
        }
        if let Some(answer) = presenter.tick(frame.delta, &mut scene) {
            println!("{answer}");
        }
        scene.update(frame);
    }

    let snapshot = serde_json::to_string_pretty(&scene.snapshot())
        .context("Failed to serialize scene snapshot")?;
    println!("{snapshot}");

    scene.dispose(&mut sink);
    Ok(())
}
