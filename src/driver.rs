//! Frame driver: owns the live scene and steps it once per frame.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Field, GameConfig};
use crate::display::Canvas;
use crate::input::{Action, InputSnapshot};
use crate::scene::Scene;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    /// Quit was held this frame.
    Exit,
}

pub struct FrameDriver {
    scene: Scene,
    field: Field,
    rng: StdRng,
    current: InputSnapshot,
    previous: InputSnapshot,
    frame: u64,
}

impl FrameDriver {
    /// Start on the title scene, seeding from the config or OS entropy.
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!("rng seed {seed}");
        Self::with_rng(config.field, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(field: Field, rng: StdRng) -> Self {
        FrameDriver {
            scene: Scene::title(),
            field,
            rng,
            current: InputSnapshot::default(),
            previous: InputSnapshot::default(),
            frame: 0,
        }
    }

    /// Run one frame: update and draw the live scene, swapping it for its
    /// successor once it reports finished.
    pub fn frame<C: Canvas>(
        &mut self,
        input: InputSnapshot,
        canvas: &mut C,
    ) -> std::io::Result<FrameStatus> {
        canvas.begin_frame()?;
        self.frame += 1;

        self.previous = self.current;
        self.current = input;

        self.scene.update(&self.current, &self.previous, &mut self.rng);
        self.scene.draw(canvas)?;

        if self.scene.is_finished() {
            let finished = std::mem::replace(&mut self.scene, Scene::title());
            self.scene = finished.next_scene(&self.field, &mut self.rng);
        }

        canvas.end_frame()?;

        if self.current.is_held(Action::Quit) {
            info!("quit requested at frame {}", self.frame);
            return Ok(FrameStatus::Exit);
        }
        Ok(FrameStatus::Running)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
