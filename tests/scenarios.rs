//! Whole-session scenarios driven through the public API

use flap_run::consts::SIM_DT;
use flap_run::highscores::{HighScoreEntry, RunOutcome};
use flap_run::sim::{FrameClock, GameEvent, GamePhase, GameState, TickInput, autopilot_input, tick};
use flap_run::{ConfigError, Difficulty, GameConfig, HighScores, Variant};

/// Play with the autopilot until the run ends or `seconds` elapse.
/// Returns every event in order.
fn autoplay(state: &mut GameState, seconds: f64) -> Vec<GameEvent> {
    let mut log = Vec::new();
    for _ in 0..(seconds / SIM_DT) as usize {
        let input = autopilot_input(state);
        log.extend(tick(state, &input, SIM_DT));
        if state.phase() != GamePhase::Playing {
            break;
        }
    }
    log
}

#[test]
fn test_menu_to_game_over_to_restart() {
    let mut state = GameState::new(GameConfig::preset(Variant::Classic), 7).unwrap();
    assert_eq!(state.phase(), GamePhase::Menu);

    let pick_hard = TickInput {
        set_difficulty: Some(Difficulty::Hard),
        ..Default::default()
    };
    tick(&mut state, &pick_hard, SIM_DT);
    tick(&mut state, &TickInput::restart(), SIM_DT);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.difficulty(), Difficulty::Hard);

    let mut events = Vec::new();
    while state.phase() == GamePhase::Playing {
        events.extend(tick(&mut state, &TickInput::default(), SIM_DT));
    }
    assert_eq!(events.last(), Some(&GameEvent::GameOver));
    assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);

    tick(&mut state, &TickInput::restart(), SIM_DT);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.runs_started, 2);
    // Difficulty survives restarts
    assert_eq!(state.difficulty(), Difficulty::Hard);
}

#[test]
fn test_restart_replays_identically() {
    let mut state = GameState::new(GameConfig::preset(Variant::Focus), 31337).unwrap();
    tick(&mut state, &TickInput::restart(), SIM_DT);
    let first = autoplay(&mut state, 20.0);
    let first_score = state.score();

    tick(&mut state, &TickInput::return_to_menu(), SIM_DT);
    tick(&mut state, &TickInput::restart(), SIM_DT);
    let second = autoplay(&mut state, 20.0);

    assert_eq!(first, second);
    assert_eq!(state.score(), first_score);
}

#[test]
fn test_reseed_changes_layout() {
    let mut state = GameState::new(GameConfig::preset(Variant::Classic), 1).unwrap();
    tick(&mut state, &TickInput::restart(), SIM_DT);
    let first_gap = state.obstacles.obstacles[0].gap_top;

    tick(&mut state, &TickInput::return_to_menu(), SIM_DT);
    assert!(state.reseed(2));
    tick(&mut state, &TickInput::restart(), SIM_DT);
    assert_ne!(state.obstacles.obstacles[0].gap_top, first_gap);
}

#[test]
fn test_autopilot_can_win_short_game() {
    let mut config = GameConfig::preset(Variant::Classic);
    config.win_score = Some(2);

    let wins = (0..5u64)
        .filter(|&seed| {
            let mut state = GameState::new(config.clone(), seed).unwrap();
            tick(&mut state, &TickInput::restart(), SIM_DT);
            let events = autoplay(&mut state, 30.0);
            state.phase() == GamePhase::Win && events.last() == Some(&GameEvent::Won)
        })
        .count();
    assert!(wins >= 1, "no autopilot wins over 5 seeds");
}

#[test]
fn test_win_is_terminal_until_menu() {
    let mut config = GameConfig::preset(Variant::Focus);
    config.win_score = Some(0);
    let mut state = GameState::new(config, 5).unwrap();
    tick(&mut state, &TickInput::restart(), SIM_DT);
    assert_eq!(
        tick(&mut state, &TickInput::flap(), SIM_DT),
        vec![GameEvent::Flapped, GameEvent::Won]
    );

    let frozen = state.snapshot();
    for _ in 0..30 {
        assert!(tick(&mut state, &TickInput::flap(), SIM_DT).is_empty());
    }
    assert_eq!(state.snapshot(), frozen);

    tick(&mut state, &TickInput::return_to_menu(), SIM_DT);
    assert_eq!(state.phase(), GamePhase::Menu);
    assert!(state.snapshot().obstacles.is_empty());
}

#[test]
fn test_unbounded_mode_never_wins() {
    let mut config = GameConfig::preset(Variant::Classic);
    config.win_score = None;
    let mut state = GameState::new(config, 9).unwrap();
    tick(&mut state, &TickInput::restart(), SIM_DT);
    let events = autoplay(&mut state, 60.0);
    assert!(!events.contains(&GameEvent::Won));
}

#[test]
fn test_frame_clock_drives_fixed_ticks() {
    let mut config = GameConfig::preset(Variant::Classic);
    config.actor.gravity = 0.0;
    let mut state = GameState::new(config, 3).unwrap();
    tick(&mut state, &TickInput::restart(), SIM_DT);

    let mut clock = FrameClock::new();
    clock.frame_delta(0.0);
    let start = state.time_ticks;
    // One second of 24 fps frames
    for frame in 1..=24 {
        for _ in 0..clock.substeps(frame as f64 / 24.0) {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
    }
    let ran = state.time_ticks - start;
    assert!((59..=61).contains(&ran), "ran {ran} ticks");
}

#[test]
fn test_leaderboard_from_sessions() {
    let mut board = HighScores::new();
    for seed in 0..4u64 {
        let mut state = GameState::new(GameConfig::preset(Variant::Classic), seed).unwrap();
        tick(&mut state, &TickInput::restart(), SIM_DT);
        autoplay(&mut state, 15.0);
        let outcome = match state.phase() {
            GamePhase::Win => RunOutcome::Won,
            _ => RunOutcome::Crashed,
        };
        board.add_score(HighScoreEntry {
            score: state.score(),
            difficulty: state.difficulty(),
            outcome,
            run: seed as u32 + 1,
        });
    }
    let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|&s| s > 0));
}

#[test]
fn test_custom_config_json() {
    let mut config = GameConfig::preset(Variant::Focus);
    config.win_score = Some(5);
    config.pickups.interval = 1.0;
    let json = config.to_json().unwrap();

    let loaded = GameConfig::from_json(&json).unwrap();
    assert_eq!(loaded.win_score, Some(5));
    assert_eq!(loaded.pickups.interval, 1.0);

    let broken = json.replace("\"width\": 1200.0", "\"width\": -1.0");
    assert!(matches!(
        GameConfig::from_json(&broken),
        Err(ConfigError::NotPositive { .. })
    ));
    assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
}
