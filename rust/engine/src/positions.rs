//! Seat arithmetic for the dealer button, blinds and turn order.
//!
//! Every function works on a set of seat numbers sorted ascending. Clockwise
//! means increasing seat number, wrapping from the highest seat back to the
//! lowest. Callers pick the set: seats with chips for the button, seats dealt
//! into the round for the blinds, seats still in the hand for turn order.

use rand::seq::IndexedRandom;
use rand::RngCore;

/// Smallest seat after `current`, wrapping to the smallest seat.
pub fn next_position(active: &[usize], current: usize) -> Option<usize> {
    active
        .iter()
        .copied()
        .find(|&seat| seat > current)
        .or_else(|| active.first().copied())
}

/// Heads-up the dealer posts the small blind; otherwise the seat after the dealer.
pub fn small_blind(active: &[usize], dealer: usize) -> Option<usize> {
    if active.len() < 2 {
        return None;
    }
    let Some(i) = active.iter().position(|&s| s == dealer) else {
        return Some(active[0]);
    };
    if active.len() == 2 {
        Some(dealer)
    } else {
        Some(active[(i + 1) % active.len()])
    }
}

/// Heads-up the non-dealer posts the big blind; otherwise two seats after the dealer.
pub fn big_blind(active: &[usize], dealer: usize) -> Option<usize> {
    if active.len() < 2 {
        return None;
    }
    let Some(i) = active.iter().position(|&s| s == dealer) else {
        return Some(active[1]);
    };
    let offset = if active.len() == 2 { 1 } else { 2 };
    Some(active[(i + offset) % active.len()])
}

/// First seat to act before the flop.
///
/// Heads-up that is the small blind (then the big blind, then the lowest seat
/// if the blinds are gone). With three or more it is the seat after the big
/// blind among the players still in the hand.
pub fn preflop_first_actor(in_hand: &[usize], blind_set: &[usize], dealer: usize) -> Option<usize> {
    if in_hand.len() < 2 {
        return None;
    }
    let bb = big_blind(blind_set, dealer)?;
    if in_hand.len() == 2 {
        let sb = small_blind(blind_set, dealer);
        return match sb {
            Some(sb) if in_hand.contains(&sb) => Some(sb),
            _ if in_hand.contains(&bb) => Some(bb),
            _ => Some(in_hand[0]),
        };
    }
    match in_hand.iter().position(|&s| s == bb) {
        Some(i) => Some(in_hand[(i + 1) % in_hand.len()]),
        None => Some(in_hand[0]),
    }
}

/// First seat to act after the flop: the first seat in the hand at or after the small blind.
pub fn postflop_first_actor(in_hand: &[usize], blind_set: &[usize], dealer: usize) -> Option<usize> {
    if in_hand.is_empty() {
        return None;
    }
    let sb = small_blind(blind_set, dealer)?;
    in_hand
        .iter()
        .copied()
        .find(|&s| s >= sb)
        .or_else(|| in_hand.first().copied())
}

/// Next dealer among seats that still have chips.
pub fn advance_dealer(funded: &[usize], dealer: usize) -> Option<usize> {
    if funded.is_empty() {
        return None;
    }
    if !funded.contains(&dealer) {
        return funded.first().copied();
    }
    next_position(funded, dealer)
}

/// Uniformly chosen free seat in `0..max_players`.
pub fn random_open_seat(occupied: &[usize], max_players: usize, rng: &mut dyn RngCore) -> Option<usize> {
    let open: Vec<usize> = (0..max_players).filter(|s| !occupied.contains(s)).collect();
    open.choose(rng).copied()
}
