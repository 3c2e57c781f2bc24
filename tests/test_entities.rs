use platform_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Facing::Left, Facing::Left);
    assert_ne!(Facing::Left, Facing::Right);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(GameEvent::LevelComplete, GameEvent::LevelComplete);
    assert_ne!(
        GameEvent::LevelComplete,
        GameEvent::GameOver { score: 0 }
    );
    assert_eq!(
        GameEvent::GameOver { score: 100 },
        GameEvent::GameOver { score: 100 }
    );

    // Clone must produce an equal value
    let facing = Facing::Right;
    assert_eq!(facing.clone(), Facing::Right);
}

#[test]
fn input_snapshot_default_is_all_released() {
    let input = InputSnapshot::default();
    assert!(!input.left);
    assert!(!input.right);
    assert!(!input.jump);
    assert!(!input.fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            rect: Rect { x: 50.0, y: 360.0, width: 40.0, height: 40.0 },
            vx: 0.0,
            vy: 0.0,
            grounded: true,
            health: 100,
            facing: Facing::Right,
            last_fire_frame: None,
        },
        obstacles: Vec::new(),
        hostiles: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        level: 1,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.hostiles.push(Hostile {
        rect: Rect { x: 250.0, y: 270.0, width: 30.0, height: 30.0 },
        hp: 2,
    });

    assert_eq!(original.player.rect.x, 50.0);
    assert_eq!(original.score, 0);
    assert!(original.hostiles.is_empty());
}
