use std::cell::RefCell;
use std::rc::Rc;
use take6::agents::StrategyKind;
use take6::config::{ConfigError, Settings};
use take6::events::GameEvent;
use take6::game::{Game, GameError};
use take6::player::Player;

fn bots(n: usize, base: u64) -> Vec<Player> {
    (0..n).map(|i| Player::seeded(format!("Bot {}", i + 1), base + i as u64)).collect()
}

#[test]
fn game_runs_until_everyone_reaches_the_threshold() {
    let mut game = Game::new(bots(4, 10)).unwrap().with_seed(99);
    let standings = game.start().unwrap();

    assert!(game.is_over());
    assert!(game.rounds_played() >= 1);
    assert_eq!(standings.len(), 4);
    assert!(standings.iter().all(|s| s.score >= 66));
    assert!(standings.windows(2).all(|w| w[0].score <= w[1].score && w[0].rank <= w[1].rank));
    assert_eq!(standings[0].rank, 1);
    let winner = game.winner().unwrap();
    assert_eq!(winner.score(), standings[0].score);
}

#[test]
fn scores_never_decrease_between_rounds() {
    let settings = Settings::default().with_max_score(150);
    let mut game = Game::with_settings(bots(4, 40), settings).unwrap().with_seed(5);
    let mut last: Vec<(u64, u32)> = Vec::new();
    while !game.is_over() {
        game.play_round().unwrap();
        for p in game.players() {
            if let Some((_, prev)) = last.iter().find(|(id, _)| *id == p.id().get()) {
                assert!(p.score() >= *prev);
            }
        }
        last = game.players().iter().map(|p| (p.id().get(), p.score())).collect();
        let scores: Vec<u32> = game.players().iter().map(Player::score).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "players ordered by score");
    }
}

#[test]
fn seeded_games_are_reproducible() {
    let run = |seed: u64| {
        let mut game = Game::new(bots(4, 7)).unwrap().with_seed(seed);
        game.start().unwrap().into_iter().map(|s| (s.name, s.score)).collect::<Vec<_>>()
    };
    assert_eq!(run(123), run(123));
}

#[test]
fn events_cover_the_game_lifecycle() {
    let mut game = Game::new(bots(4, 70)).unwrap().with_seed(8);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    game.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    game.start().unwrap();

    let events = seen.borrow();
    let started = events.iter().filter(|e| matches!(e, GameEvent::RoundStarted { .. })).count();
    let scored = events.iter().filter(|e| matches!(e, GameEvent::RoundScored { .. })).count();
    assert_eq!(started as u32, game.rounds_played());
    assert_eq!(scored as u32, game.rounds_played());
    match events.last() {
        Some(GameEvent::GameFinished { rounds, standings }) => {
            assert_eq!(*rounds, game.rounds_played());
            assert_eq!(standings, &game.standings());
        }
        other => panic!("expected GameFinished, got {other:?}"),
    }
}

#[test]
fn custom_table_sizes_work() {
    let settings = Settings::default().with_rows(3).with_max_hand(6).with_takes(4).with_max_score(30).sized_for(5);
    let mut game = Game::with_settings(bots(5, 300), settings).unwrap().with_seed(1);
    let standings = game.start().unwrap();
    assert!(standings.iter().all(|s| s.score >= 30));
}

#[test]
fn too_many_players_is_a_configuration_error() {
    let err = Game::new(bots(11, 0)).unwrap_err();
    assert_eq!(err, ConfigError::DeckTooSmall { rows: 4, players: 11, max_hand: 10, max_cards: 104 });
}

#[test]
fn external_players_mix_with_bots() {
    let mut players = bots(3, 500);
    players.push(Player::scripted("Highball", |entries| {
        Ok(entries.iter().max_by_key(|e| e.value).map(|e| e.index).unwrap_or(0))
    }));
    assert_eq!(players[3].kind(), StrategyKind::External);
    let mut game = Game::new(players).unwrap().with_seed(77);
    let standings = game.start().unwrap();
    assert!(standings.iter().any(|s| s.name == "Highball"));
}

#[test]
fn round_limit_reports_an_error() {
    let settings = Settings::default().with_max_score(u32::MAX).with_round_limit(Some(3));
    let mut game = Game::with_settings(bots(4, 1), settings).unwrap();
    assert_eq!(game.start(), Err(GameError::RoundLimit(3)));
    assert_eq!(game.rounds_played(), 3);
}
