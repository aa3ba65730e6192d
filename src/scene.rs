//! The scene state machine.
//!
//! ```text
//!   Title ──fire──▶ Game ──score ≥ 5000──▶ Clear ──fire──▶ Title
//!                     └───health ≤ 0────▶ GameOver ──fire──▶ Title
//! ```
//!
//! Exactly one [`Scene`] is live.  A finished scene is consumed by
//! [`Scene::next_scene`], which builds its successor from scratch.

use log::{debug, info};
use rand::Rng;

use crate::compute::is_hit;
use crate::config::{Field, CLEAR_SCORE, DAMAGE_PER_HIT, ENEMY_COUNT, SCORE_PER_KILL};
use crate::display::{Canvas, Paint};
use crate::entities::{Enemy, Player};
use crate::input::{Action, InputSnapshot};

pub enum Scene {
    Title(TitleScene),
    Game(GameScene),
    Clear(ClearScene),
    GameOver(GameOverScene),
}

impl Scene {
    pub fn title() -> Self {
        Scene::Title(TitleScene::default())
    }

    pub fn update(
        &mut self,
        current: &InputSnapshot,
        previous: &InputSnapshot,
        rng: &mut impl Rng,
    ) {
        match self {
            Scene::Title(s) => s.update(current, previous),
            Scene::Game(s) => s.update(current, previous, rng),
            Scene::Clear(s) => s.update(current, previous),
            Scene::GameOver(s) => s.update(current, previous),
        }
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> std::io::Result<()> {
        match self {
            Scene::Title(s) => s.draw(canvas),
            Scene::Game(s) => s.draw(canvas),
            Scene::Clear(s) => s.draw(canvas),
            Scene::GameOver(s) => s.draw(canvas),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Scene::Title(s) => s.finished,
            Scene::Game(s) => s.outcome.is_some(),
            Scene::Clear(s) => s.finished,
            Scene::GameOver(s) => s.finished,
        }
    }

    /// Build the successor scene.  Only meaningful once `is_finished()`.
    pub fn next_scene(self, field: &Field, rng: &mut impl Rng) -> Scene {
        debug_assert!(self.is_finished(), "next_scene called on a live scene");
        let next = match self {
            Scene::Title(_) => Scene::Game(GameScene::new(*field, rng)),
            Scene::Game(game) => match game.outcome {
                Some(Outcome::Clear) => Scene::Clear(ClearScene::default()),
                Some(Outcome::GameOver) | None => Scene::GameOver(GameOverScene::default()),
            },
            Scene::Clear(_) | Scene::GameOver(_) => Scene::title(),
        };
        info!("scene -> {}", next.name());
        next
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scene::Title(_) => "title",
            Scene::Game(_) => "game",
            Scene::Clear(_) => "clear",
            Scene::GameOver(_) => "game over",
        }
    }

    pub fn as_game(&self) -> Option<&GameScene> {
        match self {
            Scene::Game(game) => Some(game),
            _ => None,
        }
    }

    pub fn as_game_mut(&mut self) -> Option<&mut GameScene> {
        match self {
            Scene::Game(game) => Some(game),
            _ => None,
        }
    }
}

// ── Prompt scenes ─────────────────────────────────────────────────────────────

// Title, Clear and GameOver all wait for a single Fire press.

fn fire_pressed(current: &InputSnapshot, previous: &InputSnapshot) -> bool {
    current.pressed_since(previous, Action::Fire)
}

#[derive(Debug, Default)]
pub struct TitleScene {
    finished: bool,
}

impl TitleScene {
    fn update(&mut self, current: &InputSnapshot, previous: &InputSnapshot) {
        if fire_pressed(current, previous) {
            self.finished = true;
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> std::io::Result<()> {
        canvas.text(520.0, 320.0, "SIMPLE_STG")?;
        canvas.text(460.0, 360.0, "PRESS SPACE TO START")
    }
}

#[derive(Debug, Default)]
pub struct ClearScene {
    finished: bool,
}

impl ClearScene {
    fn update(&mut self, current: &InputSnapshot, previous: &InputSnapshot) {
        if fire_pressed(current, previous) {
            self.finished = true;
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> std::io::Result<()> {
        canvas.text(520.0, 320.0, "GAME CLEAR!")?;
        canvas.text(420.0, 360.0, "PRESS SPACE TO TITLE")
    }
}

#[derive(Debug, Default)]
pub struct GameOverScene {
    finished: bool,
}

impl GameOverScene {
    fn update(&mut self, current: &InputSnapshot, previous: &InputSnapshot) {
        if fire_pressed(current, previous) {
            self.finished = true;
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> std::io::Result<()> {
        canvas.text(520.0, 320.0, "GAME OVER")?;
        canvas.text(420.0, 360.0, "PRESS SPACE TO TITLE")
    }
}

// ── Game scene ────────────────────────────────────────────────────────────────

/// How a game ended; decides the successor scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Clear,
    GameOver,
}

pub struct GameScene {
    field: Field,
    player: Player,
    /// Fixed size for the life of the scene; enemies respawn in place.
    enemies: Vec<Enemy>,
    score: u32,
    outcome: Option<Outcome>,
}

impl GameScene {
    pub fn new(field: Field, rng: &mut impl Rng) -> Self {
        let enemies = (0..ENEMY_COUNT).map(|_| Enemy::new(&field, rng)).collect();
        GameScene {
            field,
            player: Player::new(&field),
            enemies,
            score: 0,
            outcome: None,
        }
    }

    /// One simulation step.
    ///
    /// Each enemy moves, then is tested against the player and then against
    /// every active bullet.  An enemy that respawns after touching the player
    /// is tested against the bullets at its new position in the same frame.
    pub fn update(
        &mut self,
        current: &InputSnapshot,
        previous: &InputSnapshot,
        rng: &mut impl Rng,
    ) {
        if self.outcome.is_some() {
            return;
        }

        let field = self.field;
        self.player.update(current, previous, &field);

        for enemy in &mut self.enemies {
            enemy.update(&field, rng);

            if is_hit(
                self.player.position(),
                self.player.radius(),
                enemy.position(),
                enemy.radius(),
            ) {
                self.player.damage(DAMAGE_PER_HIT);
                enemy.respawn(&field, rng);
                debug!("player hit, health {}", self.player.health());
            }

            for bullet in self.player.bullets_mut() {
                if bullet.is_active()
                    && is_hit(bullet.position(), bullet.radius(), enemy.position(), enemy.radius())
                {
                    bullet.deactivate();
                    enemy.respawn(&field, rng);
                    self.score += SCORE_PER_KILL;
                    debug!("enemy destroyed, score {}", self.score);
                }
            }
        }

        // Clear is checked first and wins a same-frame tie.
        if self.score >= CLEAR_SCORE {
            self.outcome = Some(Outcome::Clear);
        } else if self.player.is_dead() {
            self.outcome = Some(Outcome::GameOver);
        }
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> std::io::Result<()> {
        canvas.fill_circle(self.player.position(), self.player.radius(), Paint::Player)?;
        for bullet in self.player.bullets().iter().filter(|b| b.is_active()) {
            canvas.fill_circle(bullet.position(), bullet.radius(), Paint::Bullet)?;
        }
        for enemy in &self.enemies {
            canvas.fill_circle(enemy.position(), enemy.radius(), Paint::Enemy)?;
        }

        canvas.text(20.0, 20.0, &format!("SCORE: {}", self.score))?;
        canvas.text(20.0, 40.0, &format!("HP: {}", self.player.health()))
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}
