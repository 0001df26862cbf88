use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// All errors generated at the quote boundary.
///
/// The analysis components themselves are total functions: degenerate inputs
/// map to defined degenerate outputs rather than errors.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Error)]
pub enum QuoteError {
    #[error("no quote available for symbol: {0}")]
    UnknownSymbol(SmolStr),
}
