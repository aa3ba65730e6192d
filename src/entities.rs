//! Game entities and their per-frame behaviour.
//!
//! Every collection here is long-lived: bullets are pooled inside the
//! player and enemies respawn in place, so a running game allocates only
//! when the bullet pool has to grow.

use log::trace;
use rand::Rng;

use crate::compute::clamp_to_field;
use crate::config::{
    Field, BULLET_RADIUS, BULLET_SPEED, ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_RADIUS,
    ENEMY_SPAWN_JITTER, ENEMY_SPAWN_MARGIN, PLAYER_INITIAL_HEALTH, PLAYER_RADIUS, PLAYER_SPEED,
    PLAYER_START_X,
};
use crate::input::{Action, InputSnapshot};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

/// A pooled projectile travelling right at a fixed speed.
#[derive(Clone, Debug, Default)]
pub struct Bullet {
    position: Vector2,
    active: bool,
}

impl Bullet {
    /// An inactive pool entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the bullet at `origin` and activate it.  Re-firing an active
    /// bullet simply relocates it.
    pub fn fire(&mut self, origin: Vector2) {
        self.position = origin;
        self.active = true;
    }

    pub fn update(&mut self, field: &Field) {
        if !self.active {
            return;
        }
        self.position.x += BULLET_SPEED;
        if self.position.x > field.width {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        BULLET_RADIUS
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    position: Vector2,
    health: i32,
    /// Grows on demand, never shrinks.  Inactive entries are reused first.
    bullets: Vec<Bullet>,
}

impl Player {
    /// Full health at the left of the field, vertically centred.
    pub fn new(field: &Field) -> Self {
        Player {
            position: Vector2::new(PLAYER_START_X, field.height / 2.0),
            health: PLAYER_INITIAL_HEALTH,
            bullets: Vec::new(),
        }
    }

    /// Move, fire on a Fire press, then advance every bullet.
    ///
    /// Axes are applied independently, so diagonal movement covers more
    /// ground than straight movement.
    pub fn update(&mut self, current: &InputSnapshot, previous: &InputSnapshot, field: &Field) {
        if current.is_held(Action::Up) {
            self.position.y -= PLAYER_SPEED;
        }
        if current.is_held(Action::Down) {
            self.position.y += PLAYER_SPEED;
        }
        if current.is_held(Action::Left) {
            self.position.x -= PLAYER_SPEED;
        }
        if current.is_held(Action::Right) {
            self.position.x += PLAYER_SPEED;
        }
        self.position = clamp_to_field(self.position, PLAYER_RADIUS, field);

        if current.pressed_since(previous, Action::Fire) {
            self.shoot();
        }

        for bullet in &mut self.bullets {
            bullet.update(field);
        }
    }

    /// Fire the first inactive bullet, or grow the pool by one.
    fn shoot(&mut self) {
        let origin = self.position;
        match self.bullets.iter_mut().find(|b| !b.is_active()) {
            Some(bullet) => bullet.fire(origin),
            None => {
                let mut bullet = Bullet::new();
                bullet.fire(origin);
                self.bullets.push(bullet);
                trace!("bullet pool grew to {}", self.bullets.len());
            }
        }
    }

    /// No floor: health may go negative.
    pub fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn radius(&self) -> f32 {
        PLAYER_RADIUS
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Drifts left and reappears past the right edge instead of dying.
#[derive(Clone, Debug)]
pub struct Enemy {
    position: Vector2,
    speed: f32,
}

impl Enemy {
    /// A freshly respawned enemy.
    pub fn new(field: &Field, rng: &mut impl Rng) -> Self {
        let mut enemy = Enemy {
            position: Vector2::default(),
            speed: ENEMY_MIN_SPEED,
        };
        enemy.respawn(field, rng);
        enemy
    }

    pub fn update(&mut self, field: &Field, rng: &mut impl Rng) {
        self.position.x -= self.speed;
        if self.position.x < -ENEMY_RADIUS {
            self.respawn(field, rng);
        }
    }

    /// Re-randomise position and speed in place.
    ///
    /// x lands in `[width, width + jitter)`, y in the band leaving a margin
    /// at the top and bottom.
    pub fn respawn(&mut self, field: &Field, rng: &mut impl Rng) {
        let y_max = (field.height - ENEMY_SPAWN_MARGIN).max(ENEMY_SPAWN_MARGIN + f32::EPSILON);
        self.position = Vector2::new(
            rng.gen_range(field.width..field.width + ENEMY_SPAWN_JITTER),
            rng.gen_range(ENEMY_SPAWN_MARGIN..y_max),
        );
        self.speed = rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
        trace!(
            "enemy respawned at ({:.1}, {:.1}) speed {:.2}",
            self.position.x,
            self.position.y,
            self.speed
        );
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn radius(&self) -> f32 {
        ENEMY_RADIUS
    }
}
