use serde::{Deserialize, Serialize};

use crate::cursor::DEFAULT_PAGE_SIZE;
use crate::{Field, QuickFilterTable};

/// Ticks without new input before a search is committed (75 ms ticks).
pub const DEFAULT_DEBOUNCE_TICKS: u32 = 3;

/// Tunables of the board state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub page_size: usize,
    pub debounce_ticks: u32,
    /// Fields offered as multi-select filters, in display order.
    pub filter_fields: Vec<Field>,
    pub quick_filters: QuickFilterTable,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
            filter_fields: vec![
                Field::Company,
                Field::CompanyType,
                Field::Level,
                Field::Category,
                Field::Remote,
                Field::Affirmative,
                Field::Temporary,
            ],
            quick_filters: QuickFilterTable::default(),
        }
    }
}
