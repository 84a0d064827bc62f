//! `holdem play`: one human seat against automated opponents.
//!
//! The human creates the table and takes the button; the remaining seats get
//! automated players. Actions are read one line at a time from `input`, so
//! piped stdin works as well as a terminal.

use std::io::{BufRead, Write};

use holdem_engine::game::{GameId, GameStatus};
use holdem_engine::player::PlayerId;
use holdem_engine::round::Phase;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use super::{Table, seat_table};
use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_record};
use crate::io_utils::read_stdin_line;
use crate::ui::{render_showdown, render_table, write_error};
use crate::validation::{ParseResult, parse_player_action};

/// Automated service calls allowed per round before the session is abandoned.
const STEPS_PER_ROUND: usize = 256;

pub fn handle_play_command(
    flags: &Overrides,
    rounds: u32,
    name: &str,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("player name must not be empty".into()));
    }
    let cfg = config::load_with_sources(flags)?.config;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let me = PlayerId::new(name);

    let (mut svc, id) = seat_table(&cfg, name, false, &mut rng)?;
    writeln!(
        out,
        "Seed {} | {} players | blinds {}/{} | stack {}",
        seed, cfg.players, cfg.small_blind, cfg.big_blind, cfg.starting_stack
    )?;
    writeln!(out, "Commands: fold, check, call, raise N, all-in, quit")?;

    let mut snap = svc.start_game(id, &mut rng)?;
    let mut log = ActionLog::default();
    let mut played = 0u32;
    let mut steps = 0usize;
    let step_limit = rounds as usize * STEPS_PER_ROUND;

    while snap.game.status == GameStatus::InProgress && played < rounds {
        let Some(round) = snap.round.clone() else {
            break;
        };
        log.flush(&svc, id, round.round_number, out)?;

        if round.phase == Phase::Showdown {
            writeln!(out, "Board: {}", format_board(&round.community))?;
            if let Some(info) = &round.showdown {
                render_showdown(out, info)?;
            }
            played += 1;
            snap = svc.advance_phase(id, &mut rng)?;
            if snap.player(&me).is_some_and(|p| p.chips == 0 && !p.is_active) {
                writeln!(out, "You are out of chips.")?;
                break;
            }
            continue;
        }

        let my_turn = snap.current_player().is_some_and(|p| p.id == me);
        if !my_turn {
            steps += 1;
            if steps > step_limit {
                return Err(CliError::Engine(format!(
                    "table stalled in round {}",
                    snap.game.current_round
                )));
            }
        }
        if my_turn {
            render_table(out, &snap, &me)?;
            write!(out, "{}> ", me)?;
            out.flush()?;
            let Some(line) = read_stdin_line(input) else {
                writeln!(out)?;
                break;
            };
            match parse_player_action(&line) {
                ParseResult::Quit => break,
                ParseResult::Invalid(msg) => write_error(err, &msg)?,
                ParseResult::Action(action) => {
                    debug!(player = %me, action = %format_action(&action), "human action");
                    match svc.submit_action(id, &me, action, &mut rng) {
                        Ok(_) => snap = svc.snapshot(id)?,
                        Err(e) if e.is_rejection() => write_error(err, &e.to_string())?,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        } else if round.is_betting_complete {
            snap = svc.advance_phase(id, &mut rng)?;
        } else {
            snap = svc.run_ai_turns(id, &mut rng)?;
        }
    }

    if let Some(round) = &snap.round {
        log.flush(&svc, id, round.round_number, out)?;
    }
    writeln!(out, "Rounds played: {}", played)?;
    for p in &snap.players {
        writeln!(out, "  {:<14} {:>8}", p.id.as_str(), p.chips)?;
    }
    if snap.game.status == GameStatus::Finished
        && let Some(winner) = snap.players.iter().find(|p| p.chips > 0)
    {
        writeln!(out, "Winner: {}", winner.id)?;
    }
    Ok(())
}

/// Prints actions from the store that the user has not seen yet.
#[derive(Default)]
struct ActionLog {
    round: u32,
    shown: usize,
}

impl ActionLog {
    fn flush(&mut self, svc: &Table, id: GameId, round: u32, out: &mut dyn Write) -> Result<(), CliError> {
        if round != self.round {
            self.round = round;
            self.shown = 0;
            writeln!(out, "== Round {} ==", round)?;
        }
        let actions = svc.actions(id, round)?;
        for record in actions.iter().skip(self.shown) {
            writeln!(out, "  [{}] {}", record.phase.as_str(), format_record(record))?;
        }
        self.shown = actions.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn heads_up(seed: u64) -> Overrides {
        Overrides {
            seed: Some(seed),
            players: Some(2),
            ..Overrides::default()
        }
    }

    fn run(script: &str, rounds: u32) -> (Result<(), CliError>, String, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_play_command(&heads_up(7), rounds, "alice", &mut input, &mut out, &mut err);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn quitting_ends_the_session_cleanly() {
        let (res, out, _) = run("q\n", 3);
        assert!(res.is_ok());
        assert!(out.contains("Rounds played: 0"));
        assert!(out.contains("alice"));
    }

    #[test]
    fn folding_every_hand_plays_the_requested_rounds() {
        let (res, out, _) = run(&"fold\n".repeat(10), 2);
        assert!(res.is_ok());
        assert!(out.contains("Rounds played: 2"));
        assert!(out.contains("alice folds"));
    }

    #[test]
    fn bad_input_is_reported_and_the_prompt_repeats() {
        let (res, _, err) = run("dance\nfold\nq\n", 1);
        assert!(res.is_ok());
        assert!(err.contains("Unrecognized action 'dance'"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_play_command(
            &heads_up(1),
            1,
            "   ",
            &mut Cursor::new(Vec::new()),
            &mut out,
            &mut err,
        );
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
