use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::{
    combi::{decode_sorted_itemsets, dedup_itemsets},
    encoder::TransactionalEncoder,
    error::Error,
    itemsets::{mine_closed, mine_maximal},
};

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
fn maxminer(_: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mafia, m)?)?;
    m.add_function(wrap_pyfunction!(charm, m)?)?;
    Ok(())
}

/// Maximal frequent itemsets (support strictly above `min_support`).
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, /)")]
fn mafia(transactions: Vec<Vec<String>>, min_support: f64) -> PyResult<Vec<Vec<String>>> {
    let mut encoder = TransactionalEncoder::from_transactions(&transactions);
    let encoding = encoder.encode_horizontal_frequent(&transactions, min_support)?;
    let maximal = mine_maximal(&encoding.matrix, min_support)?;
    Ok(decode_sorted_itemsets(&encoder, maximal.iter()))
}

/// Closed itemsets (support at or above `min_support`), deduplicated unless `dedup` is false.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, dedup=True, /)")]
fn charm(
    transactions: Vec<Vec<String>>,
    min_support: f64,
    dedup: Option<bool>,
) -> PyResult<Vec<Vec<String>>> {
    let mut encoder = TransactionalEncoder::from_transactions(&transactions);
    let encoding = encoder.encode_horizontal_frequent(&transactions, min_support)?;
    let mut closed = mine_closed(&encoding.matrix, &encoder, min_support)?;
    if dedup.unwrap_or(true) {
        closed = dedup_itemsets(closed);
    }
    Ok(decode_sorted_itemsets(&encoder, closed.iter()))
}
