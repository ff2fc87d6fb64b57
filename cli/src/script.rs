//! Action scripts
//!
//! A script is a JSON document listing user actions in order. Players are
//! referenced by the position of their `add_player` action (0-based), since
//! ids are only known once the session assigns them.
//!
//! ```json
//! {
//!   "actions": [
//!     { "action": "add_player", "name": "Alice" },
//!     { "action": "buy_in", "player": 0, "amount": 20.0 },
//!     { "action": "buy_in", "player": 0 },
//!     { "action": "cash_out", "player": 0, "amount": 40.0 }
//!   ]
//! }
//! ```

use anyhow::{bail, Context, Result};
use poker_ledger_core::{PlayerId, SessionController, SessionError};
use serde::Deserialize;
use tracing::{debug, warn};

/// One user action; amounts are decimals as typed in the UI
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    AddPlayer {
        name: String,
    },
    /// Missing `amount` means the configured default buy-in
    BuyIn {
        player: usize,
        #[serde(default)]
        amount: Option<f64>,
    },
    CashOut {
        player: usize,
        amount: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Malformed action script")
    }
}

/// An action the session refused
#[derive(Debug)]
pub struct Rejection {
    pub index: usize,
    pub error: SessionError,
}

/// Apply every action of `script` to `session`
///
/// Rejected actions are collected and skipped, or abort the replay when
/// `strict` is set. A reference to a player that was never added is always
/// an error in the script itself.
pub fn replay(
    session: &mut SessionController,
    script: &Script,
    strict: bool,
) -> Result<Vec<Rejection>> {
    let mut players: Vec<Option<PlayerId>> = Vec::new();
    let mut rejections = Vec::new();

    for (index, action) in script.actions.iter().enumerate() {
        debug!(index, ?action, "Applying action");

        let outcome = match action {
            Action::AddPlayer { name } => match session.add_player(name) {
                Ok(id) => {
                    players.push(Some(id));
                    Ok(())
                }
                Err(err) => {
                    // Keep indices aligned with the script
                    players.push(None);
                    Err(err)
                }
            },
            Action::BuyIn { player, amount } => {
                let id = resolve(&players, *player, index)?;
                match amount {
                    Some(amount) => session.record_buy_in_decimal(id, *amount),
                    None => session.record_default_buy_in(id),
                }
            }
            Action::CashOut { player, amount } => {
                let id = resolve(&players, *player, index)?;
                session.record_cash_out_decimal(id, *amount)
            }
        };

        if let Err(error) = outcome {
            if strict {
                return Err(error).with_context(|| format!("Action #{} rejected", index));
            }
            warn!(index, %error, "Skipping rejected action");
            rejections.push(Rejection { index, error });
        }
    }

    Ok(rejections)
}

fn resolve(players: &[Option<PlayerId>], player: usize, index: usize) -> Result<&PlayerId> {
    match players.get(player) {
        Some(Some(id)) => Ok(id),
        Some(None) => bail!("Action #{}: player {} was never added", index, player),
        None => bail!(
            "Action #{}: player {} does not exist ({} added so far)",
            index,
            player,
            players.len()
        ),
    }
}
