use holdem_engine::agent::{AgentError, DecisionAgent, TurnView};
use holdem_engine::errors::GameError;
use holdem_engine::game::{GameId, GameStatus, TableConfig};
use holdem_engine::player::{ActionKind, PlayerAction, PlayerId};
use holdem_engine::round::Phase;
use holdem_engine::service::{GameService, NewGame};
use holdem_engine::store::{InMemoryStore, SequentialIdentity};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Plays the same action every turn, or fails when `None`.
struct Scripted(Option<PlayerAction>);

impl DecisionAgent for Scripted {
    fn decide(&self, _: &TurnView<'_>, _: &mut dyn RngCore) -> Result<PlayerAction, AgentError> {
        self.0.ok_or_else(|| AgentError::Internal("scripted failure".into()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn service(script: Option<PlayerAction>) -> GameService<InMemoryStore> {
    GameService::new(InMemoryStore::new(), SequentialIdentity, Box::new(Scripted(script)))
}

fn alice() -> PlayerId {
    PlayerId::new("alice")
}

fn bob() -> PlayerId {
    PlayerId::new("bob")
}

fn create(svc: &mut GameService<InMemoryStore>, config: TableConfig, rng: &mut ChaCha20Rng) -> GameId {
    svc.create_game(NewGame::new("table", config, alice()), rng).unwrap().game.id
}

fn ai_table(svc: &mut GameService<InMemoryStore>, seats: usize, rng: &mut ChaCha20Rng) -> GameId {
    let mut new = NewGame::new("bots", TableConfig::default(), PlayerId::new("host_bot"));
    new.creator_is_ai = true;
    let id = svc.create_game(new, rng).unwrap().game.id;
    for _ in 1..seats {
        svc.add_ai_player(id, rng).unwrap();
    }
    id
}

#[test]
fn creating_a_game_seats_the_creator_on_the_button() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let mut svc = service(None);
    let snap = svc
        .create_game(NewGame::new("  Friday night  ", TableConfig::default(), alice()), &mut rng)
        .unwrap();

    assert_eq!(snap.game.name, "Friday night");
    assert_eq!(snap.game.status, GameStatus::Waiting);
    assert_eq!(snap.game.current_round, 0);
    assert_eq!(snap.game.created_by, alice());
    assert_eq!(snap.players.len(), 1);
    let creator = &snap.players[0];
    assert_eq!(creator.id, alice());
    assert_eq!(creator.chips, 1000);
    assert!(!creator.is_ai);
    assert!(creator.position < 6);
    assert_eq!(snap.game.dealer_position, creator.position);
    assert_eq!(svc.snapshot(snap.game.id).unwrap(), snap);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let mut svc = service(None);
    let err = svc
        .create_game(NewGame::new("   ", TableConfig::default(), alice()), &mut rng)
        .unwrap_err();
    assert_eq!(err, GameError::EmptyName);

    let bad = [
        TableConfig { max_players: 1, ..TableConfig::default() },
        TableConfig { max_players: 9, ..TableConfig::default() },
        TableConfig { small_blind: 0, ..TableConfig::default() },
        TableConfig { small_blind: 20, big_blind: 20, ..TableConfig::default() },
        TableConfig { starting_stack: 0, ..TableConfig::default() },
    ];
    for config in bad {
        let err = svc
            .create_game(NewGame::new("t", config, alice()), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)), "{config:?} gave {err:?}");
    }
    assert_eq!(svc.snapshot(GameId(1)).unwrap_err(), GameError::GameNotFound(GameId(1)));
}

#[test]
fn seats_fill_up_and_duplicates_are_refused() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut svc = service(None);
    let config = TableConfig {
        max_players: 2,
        ..TableConfig::default()
    };
    let id = create(&mut svc, config, &mut rng);

    let err = svc.join_game(id, alice(), &mut rng).unwrap_err();
    assert_eq!(err, GameError::AlreadySeated(alice()));

    let joined = svc.join_game(id, bob(), &mut rng).unwrap();
    let creator_seat = svc.snapshot(id).unwrap().player(&alice()).unwrap().position;
    assert_ne!(joined.position, creator_seat);
    assert_eq!(joined.chips, 1000);

    let err = svc.join_game(id, PlayerId::new("carol"), &mut rng).unwrap_err();
    assert_eq!(err, GameError::GameFull);
    assert_eq!(svc.add_ai_player(id, &mut rng).unwrap_err(), GameError::GameFull);
}

#[test]
fn automated_players_get_sequential_handles() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let mut svc = service(None);
    let id = create(&mut svc, TableConfig::default(), &mut rng);

    let first = svc.add_ai_player(id, &mut rng).unwrap();
    let second = svc.add_ai_player(id, &mut rng).unwrap();
    assert_eq!(first.id, PlayerId::new("AI_Player_1"));
    assert_eq!(second.id, PlayerId::new("AI_Player_2"));
    assert!(first.is_ai && second.is_ai);

    // the next ordinal is taken after a departure, so it is skipped
    svc.leave_game(id, &first.id).unwrap();
    let third = svc.add_ai_player(id, &mut rng).unwrap();
    assert_eq!(third.id, PlayerId::new("AI_Player_3"));
    assert_eq!(svc.snapshot(id).unwrap().players.len(), 3);
}

#[test]
fn a_game_needs_two_players_and_closes_its_doors_once_started() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let mut svc = service(None);
    let id = create(&mut svc, TableConfig::default(), &mut rng);

    let err = svc.start_game(id, &mut rng).unwrap_err();
    assert_eq!(err, GameError::NotEnoughPlayers { needed: 2, actual: 1 });

    svc.join_game(id, bob(), &mut rng).unwrap();
    svc.leave_game(id, &bob()).unwrap();
    assert_eq!(svc.snapshot(id).unwrap().players.len(), 1);
    assert_eq!(svc.leave_game(id, &bob()).unwrap_err(), GameError::NotSeated(bob()));

    svc.join_game(id, bob(), &mut rng).unwrap();
    let snap = svc.start_game(id, &mut rng).unwrap();
    assert_eq!(snap.game.status, GameStatus::InProgress);
    assert_eq!(snap.game.current_round, 1);

    let err = svc.join_game(id, PlayerId::new("carol"), &mut rng).unwrap_err();
    assert_eq!(err, GameError::GameNotWaiting);
    assert_eq!(err.code(), "game_already_started");
    assert_eq!(svc.leave_game(id, &bob()).unwrap_err(), GameError::GameNotWaiting);
    assert_eq!(svc.start_game(id, &mut rng).unwrap_err(), GameError::GameNotWaiting);
}

#[test]
fn rejected_actions_leave_the_stored_game_untouched() {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let mut svc = service(None);
    let id = create(&mut svc, TableConfig::default(), &mut rng);
    svc.join_game(id, bob(), &mut rng).unwrap();
    svc.start_game(id, &mut rng).unwrap();

    let on_turn = svc.current_player(id).unwrap().unwrap();
    assert_eq!(on_turn.id, alice());

    let before = svc.snapshot(id).unwrap();
    let err = svc
        .submit_action(id, &bob(), PlayerAction::Call, &mut rng)
        .unwrap_err();
    assert!(matches!(err, GameError::NotPlayersTurn { .. }));
    assert_eq!(err.code(), "not_your_turn");
    let err = svc
        .submit_action(id, &alice(), PlayerAction::Check, &mut rng)
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(svc.snapshot(id).unwrap(), before);
    assert!(svc.actions(id, 1).unwrap().is_empty());
}

#[test]
fn closed_rounds_and_actions_are_archived() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut svc = service(None);
    let id = create(&mut svc, TableConfig::default(), &mut rng);
    svc.join_game(id, bob(), &mut rng).unwrap();
    svc.start_game(id, &mut rng).unwrap();

    let rec = svc.submit_action(id, &alice(), PlayerAction::Fold, &mut rng).unwrap();
    assert_eq!(rec.kind, ActionKind::Fold);
    assert_eq!(svc.current_player(id).unwrap(), None);
    let err = svc.submit_action(id, &bob(), PlayerAction::Check, &mut rng).unwrap_err();
    assert_eq!(err, GameError::BettingClosed(Phase::Showdown));

    let snap = svc.advance_phase(id, &mut rng).unwrap();
    assert_eq!(snap.game.current_round, 2);
    assert_eq!(snap.round.as_ref().unwrap().phase, Phase::Preflop);

    let closed = svc.round(id, 1).unwrap().unwrap();
    assert_eq!(closed.phase, Phase::Finished);
    assert_eq!(closed.showdown.unwrap().winners, vec![bob()]);
    let actions = svc.actions(id, 1).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].player, alice());
    assert!(svc.actions(id, 2).unwrap().is_empty());
}

#[test]
fn failing_agent_folds_its_seats() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let mut svc = service(None);
    let id = ai_table(&mut svc, 3, &mut rng);
    let snap = svc.start_game(id, &mut rng).unwrap();

    let round = snap.round.as_ref().unwrap();
    assert_eq!(round.phase, Phase::Showdown);
    let info = round.showdown.as_ref().unwrap();
    assert_eq!(info.winners.len(), 1);
    // the big blind is the only seat left
    let winner = snap.player(&info.winners[0]).unwrap();
    assert_eq!(winner.current_bet, 20);
    assert_eq!(winner.chips, 1010);
    assert_eq!(snap.total_chips(), 3000);

    let actions = svc.actions(id, 1).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(actions.iter().all(|a| a.kind == ActionKind::Fold));
}

#[test]
fn illegal_automated_action_becomes_a_fold() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let mut svc = service(Some(PlayerAction::Check));
    let id = ai_table(&mut svc, 2, &mut rng);
    let snap = svc.start_game(id, &mut rng).unwrap();

    // the small blind owes 10 and cannot check
    let round = snap.round.as_ref().unwrap();
    assert_eq!(round.phase, Phase::Showdown);
    let actions = svc.actions(id, 1).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, ActionKind::Fold);
    assert_eq!(actions[0].seat, snap.game.dealer_position);
    let winner = &round.showdown.as_ref().unwrap().winners[0];
    assert_eq!(snap.player(winner).unwrap().chips, 1010);
}

#[test]
fn endless_min_raises_stop_at_the_turn_ceiling() {
    let mut rng = ChaCha20Rng::seed_from_u64(10);
    let mut svc = service(Some(PlayerAction::Raise(1)));
    let id = ai_table(&mut svc, 2, &mut rng);
    let snap = svc.start_game(id, &mut rng).unwrap();
    assert_eq!(snap.round.as_ref().unwrap().phase, Phase::Preflop);
    assert_eq!(svc.actions(id, 1).unwrap().len(), holdem_engine::engine::AI_TURN_CEILING);

    // each pass raises the price by one chip per turn until both stacks are in
    let mut snap = snap;
    for _ in 0..40 {
        if snap.round.as_ref().unwrap().phase == Phase::Showdown {
            break;
        }
        snap = svc.run_ai_turns(id, &mut rng).unwrap();
        assert_eq!(snap.total_chips(), 2000);
    }
    let round = snap.round.as_ref().unwrap();
    assert_eq!(round.phase, Phase::Showdown);
    assert_eq!(round.community.len(), 5);
    assert_eq!(snap.game.pot, 0);
    assert_eq!(snap.total_chips(), 2000);
}
