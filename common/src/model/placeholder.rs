use serde::{Deserialize, Serialize};

/// A template cell whose whole value is a `$TOKEN` placeholder.
///
/// Rows and columns are 1-based, the way spreadsheet applications count them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub row: u32,
    pub column: u32,
    /// The full cell text, including the leading `$`.
    pub token: String,
}
