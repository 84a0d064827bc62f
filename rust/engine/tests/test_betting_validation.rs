use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, GameId, TableConfig};
use holdem_engine::player::{Player, PlayerAction as A, PlayerId};
use holdem_engine::round::{Phase, Round};
use holdem_engine::rules::{
    apply_action, apply_blinds, call_amount, is_round_complete, reset_for_next_phase,
    validate_action, ValidatedAction,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn table(stacks: &[u32], dealer: usize) -> (Game, Round, Vec<Player>) {
    let mut game = Game::new(GameId(1), "t", TableConfig::default(), PlayerId::new("p0"));
    game.dealer_position = dealer;
    let round = Round::new(GameId(1), 1);
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &chips)| Player::new(PlayerId::new(format!("p{i}")), GameId(1), i, chips, false))
        .collect();
    (game, round, players)
}

fn chips_on_table(game: &Game, players: &[Player]) -> u32 {
    players.iter().map(|p| p.chips).sum::<u32>() + game.pot
}

#[test]
fn heads_up_blinds_are_posted_by_dealer_and_other_seat() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000], 1);
    let posted = apply_blinds(&mut g, &mut r, &mut ps);
    assert_eq!(posted.small_blind, Some((1, 10)));
    assert_eq!(posted.big_blind, Some((0, 20)));
    assert_eq!(g.pot, 30);
    assert_eq!(r.highest_bet, 20);
    assert!(ps.iter().all(|p| !p.has_acted));
}

#[test]
fn raise_to_sixty_reopens_only_short_bets() {
    // P1 posted BB 20, P2 raises to 60, P3 already folded
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 1000], 2);
    let posted = apply_blinds(&mut g, &mut r, &mut ps);
    assert_eq!(posted.big_blind, Some((1, 20)));

    apply_action(&mut g, &mut r, &mut ps, 2, A::Fold).unwrap();
    ps[1].has_acted = true;
    apply_action(&mut g, &mut r, &mut ps, 0, A::Raise(40)).unwrap();

    assert_eq!(r.highest_bet, 60);
    assert_eq!(ps[0].current_bet, 60);
    assert!(!ps[1].has_acted, "big blind must act again");
    assert!(ps[2].is_folded && ps[2].has_acted, "folded seat is untouched");
}

#[test]
fn fold_marks_player_inactive() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 1000], 0);
    let rec = apply_action(&mut g, &mut r, &mut ps, 1, A::Fold).unwrap();
    assert_eq!(rec.amount, 0);
    assert!(ps[1].is_folded);
    assert!(!ps[1].is_active);
    assert!(ps[1].has_acted);
}

#[test]
fn all_in_below_highest_bet_does_not_raise() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 40], 0);
    r.highest_bet = 100;
    ps[0].commit(100);
    ps[0].has_acted = true;
    let rec = apply_action(&mut g, &mut r, &mut ps, 2, A::AllIn).unwrap();
    assert_eq!(rec.amount, 40);
    assert_eq!(r.highest_bet, 100);
    assert!(ps[0].has_acted);
}

#[test]
fn all_in_above_highest_bet_raises() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 300], 0);
    r.highest_bet = 100;
    ps[0].commit(100);
    ps[0].has_acted = true;
    apply_action(&mut g, &mut r, &mut ps, 2, A::AllIn).unwrap();
    assert_eq!(r.highest_bet, 300);
    assert!(!ps[0].has_acted);
    assert!(!ps[1].has_acted);
}

#[test]
fn validation_caps_at_stack() {
    let (_, _, mut ps) = table(&[60], 0);
    ps[0].current_bet = 0;
    assert_eq!(validate_action(&ps[0], 100, A::Call), Ok(ValidatedAction::Call(60)));
    assert_eq!(validate_action(&ps[0], 0, A::Raise(500)), Ok(ValidatedAction::Raise(60)));
    assert_eq!(validate_action(&ps[0], 0, A::Check), Ok(ValidatedAction::Check));
    assert_eq!(
        validate_action(&ps[0], 20, A::Check),
        Err(GameError::CannotCheck { to_call: 20 })
    );
    assert_eq!(call_amount(&ps[0], 20), 20);
}

#[test]
fn single_remaining_player_completes_the_round() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 1000], 0);
    apply_blinds(&mut g, &mut r, &mut ps);
    assert!(!is_round_complete(&r, &ps));
    apply_action(&mut g, &mut r, &mut ps, 0, A::Fold).unwrap();
    apply_action(&mut g, &mut r, &mut ps, 1, A::Fold).unwrap();
    assert!(is_round_complete(&r, &ps));
}

#[test]
fn reset_for_next_phase_clears_bets_and_points_at_small_blind() {
    let (mut g, mut r, mut ps) = table(&[1000, 1000, 1000], 0);
    apply_blinds(&mut g, &mut r, &mut ps);
    for p in ps.iter_mut() {
        p.has_acted = true;
    }
    r.phase = Phase::Flop;
    reset_for_next_phase(&g, &mut r, &mut ps);
    assert_eq!(r.highest_bet, 0);
    assert!(ps.iter().all(|p| p.current_bet == 0 && !p.has_acted));
    assert_eq!(r.current_player_position, Some(1));
    assert_eq!(g.pot, 30);
}

#[test]
fn chips_plus_pot_is_conserved_across_random_actions() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..50 {
        let (mut g, mut r, mut ps) = table(&[1000, 500, 250, 40], 0);
        let total = chips_on_table(&g, &ps);
        apply_blinds(&mut g, &mut r, &mut ps);
        assert_eq!(chips_on_table(&g, &ps), total);
        for _ in 0..30 {
            let idx = rng.random_range(0..ps.len());
            if !ps[idx].in_hand() {
                continue;
            }
            let action = match rng.random_range(0..5) {
                0 => A::Fold,
                1 => A::Check,
                2 => A::Call,
                3 => A::Raise(rng.random_range(0..200)),
                _ => A::AllIn,
            };
            let before = ps.clone();
            let pot_before = g.pot;
            match apply_action(&mut g, &mut r, &mut ps, idx, action) {
                Ok(rec) => assert_eq!(g.pot - pot_before, rec.amount),
                Err(e) => {
                    assert!(e.is_rejection());
                    assert_eq!(ps, before);
                    assert_eq!(g.pot, pot_before);
                }
            }
            assert_eq!(chips_on_table(&g, &ps), total);
        }
    }
}
