use simple_stg::config::*;
use simple_stg::entities::{Enemy, Vector2};
use simple_stg::input::{Action, InputSnapshot};
use simple_stg::scene::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn none() -> InputSnapshot {
    InputSnapshot::new()
}

fn fire() -> InputSnapshot {
    InputSnapshot::with(&[Action::Fire])
}

fn new_game(rng: &mut StdRng) -> GameScene {
    GameScene::new(Field::default(), rng)
}

// ── Prompt scenes ─────────────────────────────────────────────────────────────

#[test]
fn title_waits_for_fire_press() {
    let mut rng = seeded_rng();
    let mut scene = Scene::title();

    scene.update(&none(), &none(), &mut rng);
    assert!(!scene.is_finished());

    // Held since before the scene started: no edge
    scene.update(&fire(), &fire(), &mut rng);
    assert!(!scene.is_finished());

    scene.update(&fire(), &none(), &mut rng);
    assert!(scene.is_finished());
}

#[test]
fn title_leads_to_fresh_game() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut scene = Scene::title();
    scene.update(&fire(), &none(), &mut rng);

    let next = scene.next_scene(&field, &mut rng);
    let game = next.as_game().expect("title should lead to a game");
    assert_eq!(game.score(), 0);
    assert_eq!(game.player().health(), PLAYER_INITIAL_HEALTH);
    assert_eq!(game.player().position(), Vector2::new(200.0, 360.0));
    assert_eq!(game.enemies().len(), ENEMY_COUNT);
    assert_eq!(game.outcome(), None);
    for enemy in game.enemies() {
        let pos = enemy.position();
        assert!(pos.x >= field.width && pos.x < field.width + ENEMY_SPAWN_JITTER);
        assert!(pos.y >= ENEMY_SPAWN_MARGIN && pos.y < field.height - ENEMY_SPAWN_MARGIN);
    }
}

#[test]
fn clear_and_game_over_return_to_title() {
    let field = Field::default();
    let mut rng = seeded_rng();

    for mut scene in [
        Scene::Clear(ClearScene::default()),
        Scene::GameOver(GameOverScene::default()),
    ] {
        scene.update(&none(), &none(), &mut rng);
        assert!(!scene.is_finished());
        scene.update(&fire(), &none(), &mut rng);
        assert!(scene.is_finished());
        let next = scene.next_scene(&field, &mut rng);
        assert!(matches!(next, Scene::Title(_)));
    }
}

// ── Game scene: terminal conditions ───────────────────────────────────────────

#[test]
fn score_threshold_clears() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.set_score(CLEAR_SCORE);

    game.update(&none(), &none(), &mut rng);
    assert_eq!(game.outcome(), Some(Outcome::Clear));

    let next = Scene::Game(game).next_scene(&field, &mut rng);
    assert!(matches!(next, Scene::Clear(_)));
}

#[test]
fn depleted_health_ends_game() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.player_mut().set_health(0);

    game.update(&none(), &none(), &mut rng);
    assert_eq!(game.outcome(), Some(Outcome::GameOver));

    let next = Scene::Game(game).next_scene(&field, &mut rng);
    assert!(matches!(next, Scene::GameOver(_)));
}

#[test]
fn clear_wins_when_both_conditions_hold() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.set_score(CLEAR_SCORE);
    game.player_mut().set_health(0);

    game.update(&none(), &none(), &mut rng);
    assert_eq!(game.outcome(), Some(Outcome::Clear));

    let next = Scene::Game(game).next_scene(&field, &mut rng);
    assert!(matches!(next, Scene::Clear(_)));
}

#[test]
fn live_game_is_not_finished() {
    let mut rng = seeded_rng();
    let mut scene = Scene::Game(new_game(&mut rng));
    for _ in 0..10 {
        scene.update(&none(), &none(), &mut rng);
    }
    assert!(!scene.is_finished());
}

#[test]
fn finished_game_stops_simulating() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.set_score(CLEAR_SCORE);
    game.update(&none(), &none(), &mut rng);

    let before = game.enemies()[0].position();
    game.update(&none(), &none(), &mut rng);
    assert_eq!(game.enemies()[0].position(), before);
}

// ── Game scene: collisions ────────────────────────────────────────────────────

#[test]
fn enemy_touching_player_deals_damage_and_respawns() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let player_pos = game.player().position();
    game.enemies_mut()[0].set_position(player_pos);

    game.update(&none(), &none(), &mut rng);

    assert_eq!(game.player().health(), PLAYER_INITIAL_HEALTH - DAMAGE_PER_HIT);
    assert!(game.enemies()[0].position().x >= field.width);
    assert_eq!(game.outcome(), None);
}

#[test]
fn last_hit_point_ends_game() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.player_mut().set_health(DAMAGE_PER_HIT);
    let player_pos = game.player().position();
    game.enemies_mut()[0].set_position(player_pos);

    game.update(&none(), &none(), &mut rng);

    assert_eq!(game.player().health(), 0);
    assert_eq!(game.outcome(), Some(Outcome::GameOver));
}

#[test]
fn bullet_kill_scores_and_recycles_both() {
    let field = Field::default();
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);

    // Fire once, then relocate the bullet well away from the player
    game.update(&fire(), &none(), &mut rng);
    game.player_mut().bullets_mut()[0].fire(Vector2::new(600.0, 360.0));
    game.enemies_mut()[0].set_position(Vector2::new(615.0, 360.0));

    game.update(&none(), &fire(), &mut rng);

    assert_eq!(game.score(), SCORE_PER_KILL);
    assert!(!game.player().bullets()[0].is_active());
    assert!(game.enemies()[0].position().x >= field.width);
    assert_eq!(game.player().health(), PLAYER_INITIAL_HEALTH);
}

#[test]
fn kills_accumulate_to_clear() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    game.set_score(CLEAR_SCORE - SCORE_PER_KILL);

    game.update(&fire(), &none(), &mut rng);
    game.player_mut().bullets_mut()[0].fire(Vector2::new(600.0, 360.0));
    game.enemies_mut()[0].set_position(Vector2::new(615.0, 360.0));
    game.update(&none(), &fire(), &mut rng);

    assert_eq!(game.score(), CLEAR_SCORE);
    assert_eq!(game.outcome(), Some(Outcome::Clear));
}

#[test]
fn inactive_bullets_never_hit() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);

    game.update(&fire(), &none(), &mut rng);
    game.player_mut().bullets_mut()[0].fire(Vector2::new(600.0, 360.0));
    game.player_mut().bullets_mut()[0].deactivate();
    game.enemies_mut()[0].set_position(Vector2::new(605.0, 360.0));

    game.update(&none(), &fire(), &mut rng);

    assert_eq!(game.score(), 0);
    assert!(game.enemies()[0].position().x < 605.0);
}

#[test]
fn enemy_count_is_constant() {
    let mut rng = seeded_rng();
    let mut game = new_game(&mut rng);
    let mut previous = none();
    for frame in 0..600 {
        let current = if frame % 2 == 0 { fire() } else { none() };
        game.update(&current, &previous, &mut rng);
        previous = current;
        assert_eq!(game.enemies().len(), ENEMY_COUNT);
        if game.outcome().is_some() {
            break;
        }
    }
}

// ── Game scene: same-frame double response ────────────────────────────────────

/// Reach of a bullet parked at the right edge: 1280 plus the two radii, with
/// margin.
const EDGE_REACH_X: f32 = 1300.0;

/// A seeded game that has fired `shots` bullets, and a preview of where the
/// next respawn will land.  Seeds are tried in order until that respawn is
/// close enough to the right edge for a bullet at x = 1280 to reach it.
fn game_with_reachable_respawn(shots: usize) -> (GameScene, StdRng, Vector2) {
    let field = Field::default();
    for seed in 0..10_000 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameScene::new(field, &mut rng);
        for shot in 0..shots {
            if shot > 0 {
                game.update(&none(), &fire(), &mut rng);
            }
            game.update(&fire(), &none(), &mut rng);
        }
        // Respawn draws the same values as a fresh enemy would
        let preview = Enemy::new(&field, &mut rng.clone()).position();
        if preview.x <= EDGE_REACH_X {
            return (game, rng, preview);
        }
    }
    panic!("no seed respawns within reach of the right edge");
}

#[test]
fn enemy_hitting_player_is_still_shot_at_its_respawn_point() {
    let (mut game, mut rng, respawn) = game_with_reachable_respawn(1);
    assert_eq!(game.player().bullets().len(), 1);

    let player_pos = game.player().position();
    game.enemies_mut()[0].set_position(player_pos);
    // Reaches x = 1280 this frame, still inside the field
    game.player_mut().bullets_mut()[0].fire(Vector2::new(1270.0, respawn.y));

    game.update(&none(), &fire(), &mut rng);

    assert_eq!(game.player().health(), PLAYER_INITIAL_HEALTH - DAMAGE_PER_HIT);
    assert_eq!(game.score(), SCORE_PER_KILL);
    assert!(!game.player().bullets()[0].is_active());
    assert!(game.enemies()[0].position().x >= Field::default().width);
}

#[test]
fn one_enemy_can_be_killed_by_two_bullets_in_one_frame() {
    let (mut game, mut rng, respawn) = game_with_reachable_respawn(2);
    assert_eq!(game.player().bullets().len(), 2);

    game.enemies_mut()[0].set_position(Vector2::new(615.0, 360.0));
    game.player_mut().bullets_mut()[0].fire(Vector2::new(600.0, 360.0));
    game.player_mut().bullets_mut()[1].fire(Vector2::new(1270.0, respawn.y));

    game.update(&none(), &fire(), &mut rng);

    assert_eq!(game.score(), 2 * SCORE_PER_KILL);
    assert!(game.player().bullets().iter().all(|b| !b.is_active()));
    assert_eq!(game.player().health(), PLAYER_INITIAL_HEALTH);
}
