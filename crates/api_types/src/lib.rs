use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod entry {
    use super::*;

    /// Request body for a manual create. Amounts travel as raw text; the
    /// engine parses them loosely (blank or unreadable becomes 0).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub name: String,
        #[serde(default)]
        pub place: String,
        pub amount_received: String,
        #[serde(default)]
        pub amount_receivable: String,
    }

    /// Request body for an edit. `created_at` and the import position
    /// are never touched by an edit.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryUpdate {
        pub name: String,
        #[serde(default)]
        pub place: String,
        #[serde(default)]
        pub amount_received: String,
        #[serde(default)]
        pub amount_receivable: String,
    }

    /// Three-way balance classification; display color is derived from
    /// this, never from a sign.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BalanceState {
        Outstanding,
        Overpaid,
        Settled,
    }

    /// One row of the ledger view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        /// Serial number derived from the total order; recomputed on
        /// every read, never stored.
        pub sno: u64,
        pub name: String,
        pub place: String,
        /// Integer cents.
        pub amount_received_minor: i64,
        pub amount_receivable_minor: i64,
        pub balance_minor: i64,
        pub balance_state: BalanceState,
        /// Unsigned balance fixed to two decimals; the sign is carried
        /// by `balance_state`.
        pub balance_display: String,
    }

    /// Query string for the ledger view.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LedgerQuery {
        pub search: Option<String>,
        /// 1-indexed page; clamped server-side.
        pub page: Option<u32>,
    }

    /// One element of the pager button list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum PageMarker {
        Page { number: u32 },
        Ellipsis,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerPageResponse {
        pub entries: Vec<EntryView>,
        pub page: u32,
        pub total_pages: u32,
        pub total_matching: usize,
        pub page_markers: Vec<PageMarker>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DeletedAll {
        pub deleted: u64,
    }
}

pub mod suggestion {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionQuery {
        /// The in-progress name input.
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionView {
        pub name: String,
        pub place: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionsResponse {
        pub suggestions: Vec<SuggestionView>,
    }
}

pub mod import {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ImportResponse {
        pub imported: usize,
        /// Rows skipped for a blank name.
        pub skipped: usize,
    }
}
