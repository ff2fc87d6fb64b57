//! Session event log for auditing and replay.
//!
//! Every user action dispatched through the session controller produces
//! events: accepted mutations, rejected mutations, phase changes and
//! computed settlements. Events enable:
//! - Auditing (who bought in for what, and when)
//! - Debugging (why a mutation was refused)
//! - Rendering an activity feed in the UI
//!
//! Each event carries a `seq`: the index of the user action that caused it.
//! Several events may share a `seq` (a cash-out that completes the session
//! logs the cash-out, the phase change and the settlement).
//!
//! # Example
//!
//! ```rust
//! use poker_ledger_core::models::{Event, EventLog, PlayerId};
//!
//! let mut log = EventLog::new();
//! log.log(Event::BuyIn {
//!     seq: 3,
//!     player_id: PlayerId::from("p1"),
//!     amount: 2000,
//! });
//!
//! assert_eq!(log.events_of_type("BuyIn").len(), 1);
//! assert_eq!(log.events()[0].seq(), 3);
//! ```

use crate::models::player::PlayerId;
use crate::settlement::completion::SessionPhase;
use serde::Serialize;

/// Session event capturing a state change or a refused action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Player joined the table
    PlayerAdded {
        seq: usize,
        player_id: PlayerId,
        name: String,
    },

    /// Buy-in accepted
    BuyIn {
        seq: usize,
        player_id: PlayerId,
        amount: i64,
    },

    /// Cash-out accepted
    CashOut {
        seq: usize,
        player_id: PlayerId,
        amount: i64,
    },

    /// Mutation refused; the ledger is unchanged
    MutationRejected {
        seq: usize,
        player_id: Option<PlayerId>,
        action: String,
        reason: String,
    },

    /// Derived session phase changed after a mutation
    PhaseChanged {
        seq: usize,
        from: SessionPhase,
        to: SessionPhase,
    },

    /// Settlement plan derived for a complete session
    SettlementComputed {
        seq: usize,
        num_transactions: usize,
        total_transferred: i64,
        fingerprint: String,
    },

    /// No plan could be derived (unbalanced or overflowing net balances)
    SettlementFailed { seq: usize, reason: String },
}

impl Event {
    /// Sequence number of the action that produced this event
    pub fn seq(&self) -> usize {
        match self {
            Event::PlayerAdded { seq, .. }
            | Event::BuyIn { seq, .. }
            | Event::CashOut { seq, .. }
            | Event::MutationRejected { seq, .. }
            | Event::PhaseChanged { seq, .. }
            | Event::SettlementComputed { seq, .. }
            | Event::SettlementFailed { seq, .. } => *seq,
        }
    }

    /// Variant name, used for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PlayerAdded { .. } => "PlayerAdded",
            Event::BuyIn { .. } => "BuyIn",
            Event::CashOut { .. } => "CashOut",
            Event::MutationRejected { .. } => "MutationRejected",
            Event::PhaseChanged { .. } => "PhaseChanged",
            Event::SettlementComputed { .. } => "SettlementComputed",
            Event::SettlementFailed { .. } => "SettlementFailed",
        }
    }

    /// Player this event concerns, if any
    pub fn player_id(&self) -> Option<&PlayerId> {
        match self {
            Event::PlayerAdded { player_id, .. }
            | Event::BuyIn { player_id, .. }
            | Event::CashOut { player_id, .. } => Some(player_id),
            Event::MutationRejected { player_id, .. } => player_id.as_ref(),
            _ => None,
        }
    }
}

/// Append-only event log with simple queries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Events produced by one user action
    pub fn events_at_seq(&self, seq: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.seq() == seq).collect()
    }

    /// Events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events concerning one player
    pub fn events_for_player(&self, player_id: &PlayerId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.player_id() == Some(player_id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
