//! Maximal and closed frequent itemset mining over a bit-packed transaction matrix.
//!
//! ```
//! use maxminer::{mine_maximal, TransactionalEncoder};
//!
//! let transactions = vec![vec!["bread", "milk"], vec!["bread", "milk"], vec!["eggs"]];
//! let mut encoder = TransactionalEncoder::from_transactions(&transactions);
//! let encoding = encoder.encode_horizontal_frequent(&transactions, 0.3).unwrap();
//! let maximal = mine_maximal(&encoding.matrix, 0.3).unwrap();
//! assert!(maximal.contains(&vec![0, 1]));
//! ```

pub mod combi;
pub mod config;
pub mod encoder;
pub mod error;
pub mod io;
pub mod itemsets;
pub mod matrix;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;

pub use config::{FilterMode, SupportThresholds};
pub use encoder::{Encoding, TransactionalEncoder};
pub use error::{Error, Result};
pub use itemsets::{mine_closed, mine_maximal, ClosedSearch, MaximalSearch, SearchOutcome};
pub use matrix::BitMatrix;
