//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList),
//! and maps crate errors onto Python exception classes.

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::ledger::LedgerError;
use crate::session::{SessionConfig, SessionError};
use crate::settlement::{CompletionStatus, PlayerSummary, SettlementPlan};

// ========================================================================
// Error Mapping
// ========================================================================

/// Map a session error onto the matching Python exception
///
/// - validation, config and room-code problems → `ValueError`
/// - unknown (or duplicate) player ids → `KeyError`
/// - settlement invariant violations → `RuntimeError`
pub fn session_error_to_py(err: SessionError) -> PyErr {
    match &err {
        SessionError::Ledger(LedgerError::UnknownPlayer(_))
        | SessionError::Ledger(LedgerError::DuplicatePlayer(_)) => {
            PyKeyError::new_err(err.to_string())
        }
        SessionError::Ledger(LedgerError::Validation(_))
        | SessionError::Config(_)
        | SessionError::RoomCode(_) => PyValueError::new_err(err.to_string()),
        SessionError::Settlement(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

// ========================================================================
// Config Parsing
// ========================================================================

/// Build a session config from an optional Python dict
///
/// The dict is round-tripped through JSON so unknown keys and bad values
/// get the same treatment as a config file.
pub fn parse_session_config(py_config: Option<&Bound<'_, PyDict>>) -> PyResult<SessionConfig> {
    let Some(dict) = py_config else {
        return Ok(SessionConfig::default());
    };

    let json_module = dict.py().import("json")?;
    let json: String = json_module.call_method1("dumps", (dict,))?.extract()?;

    SessionConfig::from_json(&json)
        .map_err(|e| session_error_to_py(SessionError::from(e)))
}

// ========================================================================
// Rust → Python
// ========================================================================

/// `(from, to, amount)` triples in plan order, amounts as decimals
pub fn plan_to_tuples(plan: &SettlementPlan) -> Vec<(String, String, f64)> {
    plan.transactions()
        .iter()
        .map(|tx| {
            (
                tx.from().as_str().to_string(),
                tx.to().as_str().to_string(),
                tx.amount_decimal(),
            )
        })
        .collect()
}

pub fn status_to_py<'py>(
    py: Python<'py>,
    status: &CompletionStatus,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("phase", status.phase.to_string())?;
    dict.set_item("pot", status.pot)?;
    dict.set_item("is_complete", status.is_complete())?;

    let unsettled: Vec<&str> = status.unsettled.iter().map(|id| id.as_str()).collect();
    dict.set_item("unsettled", PyList::new(py, unsettled)?)?;
    Ok(dict)
}

pub fn summaries_to_py<'py>(
    py: Python<'py>,
    summaries: &[PlayerSummary],
) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for summary in summaries {
        let dict = PyDict::new(py);
        dict.set_item("player_id", summary.player_id.as_str())?;
        dict.set_item("name", &summary.name)?;
        dict.set_item("total_buy_in", summary.total_buy_in)?;
        dict.set_item("total_cash_out", summary.total_cash_out)?;
        dict.set_item("net", summary.net)?;
        dict.set_item("outcome", format!("{:?}", summary.outcome).to_lowercase())?;
        list.append(dict)?;
    }
    Ok(list)
}
