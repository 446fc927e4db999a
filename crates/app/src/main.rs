//! Nodal - headless frame driver.
//!
//! Builds a demo scene and drives it for a configured number of frames:
//! update, activate the camera, render into a recording target.

mod demo;

use anyhow::{Context, Result};
use tracing::{debug, info};

use nodal_core::{FrameConfig, Timer};
use nodal_scene::{NodeId, RecordingTarget, SceneGraph};

const ASPECT: f32 = 16.0 / 9.0;
const REPORT_INTERVAL: u32 = 60;

struct App {
    config: FrameConfig,
    graph: SceneGraph,
    root: NodeId,
    camera: NodeId,
    target: RecordingTarget,
    timer: Timer,
}

impl App {
    fn new(config: FrameConfig) -> Result<Self> {
        let scene = demo::build(ASPECT).context("Failed to build demo scene")?;

        Ok(Self {
            config,
            graph: scene.graph,
            root: scene.root,
            camera: scene.camera,
            target: RecordingTarget::new(),
            timer: Timer::new(),
        })
    }

    fn frame(&mut self) -> Result<usize> {
        let delta = self.config.frame_delta(self.timer.delta_secs());

        self.target.begin_frame();
        self.graph.update(self.root, delta)?;
        self.graph.activate_camera(self.camera, &mut self.target)?;
        let draws = self.graph.render(self.root, &mut self.target)?;

        Ok(draws)
    }

    fn run(&mut self) -> Result<()> {
        let mut total_draws = 0;
        let mut total_triangles = 0;
        let mut total_uploads = 0;

        for frame in 1..=self.config.frames {
            total_draws += self.frame()?;
            total_triangles += self.target.triangle_count();
            total_uploads += self.target.object_uploads();

            if frame % REPORT_INTERVAL == 0 {
                debug!(
                    "Frame {}: {} draws, {} triangles, {:.3}s elapsed",
                    frame,
                    self.target.draws().len(),
                    self.target.triangle_count(),
                    self.timer.elapsed_secs()
                );
            }
        }

        info!(
            "Ran {} frames in {:.3}s: {} draws, {} triangles, {} object uploads",
            self.timer.frame_count(),
            self.timer.elapsed_secs(),
            total_draws,
            total_triangles,
            total_uploads
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    let config = FrameConfig::from_env()?;
    nodal_core::init_logging(&config.log_filter);
    info!(
        "Starting nodal: {} frames, fixed delta {:?}, max delta {}s",
        config.frames, config.fixed_delta, config.max_delta
    );

    let mut app = App::new(config)?;
    app.run()
}
