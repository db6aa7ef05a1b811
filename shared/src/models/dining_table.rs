//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity (餐桌)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub seats: u32,
}

/// Create / update dining table payload (TableInfoInput)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub seats: u32,
}
