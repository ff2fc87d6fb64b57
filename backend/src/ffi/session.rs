//! PyO3 wrapper for SessionController

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    parse_session_config, plan_to_tuples, session_error_to_py, status_to_py, summaries_to_py,
};
use crate::models::player::PlayerId;
use crate::session::SessionController;

/// Python wrapper for one poker session
///
/// # Example (from Python)
///
/// ```python
/// from poker_ledger_core import Session
///
/// s = Session({"room_code_seed": 7})
/// p1 = s.add_player("Alice")
/// p2 = s.add_player("Bob")
/// s.record_buy_in(p1, 20.0)
/// s.record_buy_in(p2, 20.0)
/// s.record_cash_out(p1, 30.0)
/// s.record_cash_out(p2, 10.0)
/// assert s.is_session_complete()
/// print(s.compute_settlement())   # [(p2, p1, 10.0)]
/// ```
#[pyclass(name = "Session")]
pub struct PySession {
    inner: SessionController,
}

#[pymethods]
impl PySession {
    /// Create a session; `config` uses the same keys as a JSON config file
    ///
    /// # Errors
    ///
    /// Raises ValueError for unknown keys or out-of-range values
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = parse_session_config(config)?;
        let inner = SessionController::new(config).map_err(session_error_to_py)?;
        Ok(PySession { inner })
    }

    /// Join an existing room by its code
    #[staticmethod]
    #[pyo3(signature = (room_code, config=None))]
    fn join(room_code: &str, config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = parse_session_config(config)?;
        let inner = SessionController::join(config, room_code).map_err(session_error_to_py)?;
        Ok(PySession { inner })
    }

    /// Add a player and return the new player id
    fn add_player(&mut self, name: &str) -> PyResult<String> {
        let id = self.inner.add_player(name).map_err(session_error_to_py)?;
        Ok(id.as_str().to_string())
    }

    /// Record a buy-in; omit `amount` for the configured default
    #[pyo3(signature = (player_id, amount=None))]
    fn record_buy_in(&mut self, player_id: &str, amount: Option<f64>) -> PyResult<()> {
        let id = PlayerId::from(player_id);
        let result = match amount {
            Some(amount) => self.inner.record_buy_in_decimal(&id, amount),
            None => self.inner.record_default_buy_in(&id),
        };
        result.map_err(session_error_to_py)
    }

    fn record_cash_out(&mut self, player_id: &str, amount: f64) -> PyResult<()> {
        let id = PlayerId::from(player_id);
        self.inner
            .record_cash_out_decimal(&id, amount)
            .map_err(session_error_to_py)
    }

    /// Chips in play as a decimal amount
    fn total_pot(&self) -> f64 {
        self.inner.total_pot_decimal()
    }

    fn is_session_complete(&self) -> bool {
        self.inner.is_session_complete()
    }

    /// Transfer plan as `[(from_id, to_id, amount), ...]`
    ///
    /// # Errors
    ///
    /// Raises RuntimeError if net balances do not sum to zero
    fn compute_settlement(&self) -> PyResult<Vec<(String, String, f64)>> {
        let plan = self.inner.compute_settlement().map_err(session_error_to_py)?;
        Ok(plan_to_tuples(&plan))
    }

    fn phase(&self) -> String {
        self.inner.phase().to_string()
    }

    fn room_code(&self) -> String {
        self.inner.room_code().as_str().to_string()
    }

    /// Dict with `phase`, `pot` (cents), `is_complete` and `unsettled`
    fn status(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        Ok(status_to_py(py, &self.inner.status().completion)?.unbind())
    }

    fn player_summaries(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        Ok(summaries_to_py(py, &self.inner.player_summaries())?.unbind())
    }

    /// Number of entries in the audit log
    fn event_count(&self) -> usize {
        self.inner.events().len()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}
