//! Terminal output shared by the commands: error lines, the table view and
//! showdown results shown during interactive play.

use std::io::Write;

use holdem_engine::engine::GameSnapshot;
use holdem_engine::logger::ShowdownInfo;
use holdem_engine::player::PlayerId;

use crate::formatters::{format_board, format_card};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Draw the table as `viewer` sees it: the board, the pot, every seat with its
/// stack and bet, and only the viewer's own hole cards.
pub fn render_table(
    out: &mut dyn Write,
    snapshot: &GameSnapshot,
    viewer: &PlayerId,
) -> std::io::Result<()> {
    let game = &snapshot.game;
    match &snapshot.round {
        Some(round) => writeln!(
            out,
            "-- Round {} | {} | Board {} | Pot {} --",
            round.round_number,
            round.phase.as_str(),
            format_board(&round.community),
            game.pot
        )?,
        None => writeln!(out, "-- {} | Pot {} --", game.name, game.pot)?,
    }

    let on_turn = snapshot.current_player().map(|p| p.position);
    for p in &snapshot.players {
        let marker = if Some(p.position) == on_turn { ">" } else { " " };
        let button = if p.position == game.dealer_position { "D" } else { " " };
        let status = if !p.is_active && p.chips == 0 {
            "out"
        } else if p.is_folded {
            "folded"
        } else {
            ""
        };
        let cards = if &p.id == viewer && !p.hand.is_empty() {
            let shown: Vec<String> = p.hand.iter().map(format_card).collect();
            shown.join(" ")
        } else {
            String::new()
        };
        writeln!(
            out,
            "{}{} seat {} {:<14} chips {:>6} bet {:>5} {} {}",
            marker,
            button,
            p.position,
            p.id.as_str(),
            p.chips,
            p.current_bet,
            cards,
            status
        )?;
    }
    Ok(())
}

/// One line per payout plus the winning category, if cards were compared.
pub fn render_showdown(out: &mut dyn Write, info: &ShowdownInfo) -> std::io::Result<()> {
    for payout in &info.payouts {
        match info.category {
            Some(category) => writeln!(
                out,
                "{} wins {} with {}",
                payout.player,
                payout.amount,
                category.name()
            )?,
            None => writeln!(out, "{} wins {}", payout.player, payout.amount)?,
        }
    }
    if let Some(notes) = &info.notes {
        writeln!(out, "({})", notes)?;
    }
    Ok(())
}
