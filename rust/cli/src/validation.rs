//! Parsing of typed player input for interactive play.

use holdem_engine::player::PlayerAction;

/// Outcome of parsing one line typed at the action prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(PlayerAction),
    /// `q` or `quit`
    Quit,
    /// Unusable input, with a message for the user
    Invalid(String),
}

/// Parse a typed command into a [`PlayerAction`].
///
/// Accepted forms, case-insensitive:
/// - `f`, `fold`
/// - `k`, `check`
/// - `c`, `call`
/// - `r N`, `raise N`, `bet N`: call, then add `N` chips
/// - `a`, `allin`, `all-in`
/// - `q`, `quit`
///
/// Whether the action is legal right now is for the engine to decide; this
/// only checks the shape of the input.
///
/// ```rust
/// # use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(PlayerAction::Fold));
/// assert_eq!(parse_player_action("raise 40"), ParseResult::Action(PlayerAction::Raise(40)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("dance") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" => ParseResult::Action(PlayerAction::Check),
        "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" | "a" => ParseResult::Action(PlayerAction::AllIn),
        "raise" | "r" | "bet" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires an amount (e.g., 'raise 40')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(n) if n > 0 => ParseResult::Action(PlayerAction::Raise(n)),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid(format!("Invalid raise amount '{}'", amount)),
            }
        }
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Try fold, check, call, raise N, all-in or quit",
            other
        )),
    }
}
