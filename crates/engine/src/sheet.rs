//! CSV sheet codec: tolerant import decoding and export encoding.

use crate::{EngineError, order::NumberedEntry};

type ResultSheet<T> = Result<T, EngineError>;

/// Export column order. Import accepts spelling variants of these plus
/// legacy names (see [`decode`]).
pub const EXPORT_HEADER: [&str; 6] = [
    "S.No",
    "Name",
    "Place/Home",
    "Amount Received",
    "Amount Receivable",
    "Balance",
];

/// One decoded import row, fields still raw text. Amounts are parsed
/// loosely later so an unreadable cell becomes 0 instead of an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub name: String,
    pub place: String,
    pub amount_received: String,
    pub amount_receivable: String,
}

/// Collapses header spelling variants into one key by keeping only
/// ASCII letters, lowercased: "Amount Received", "Amount received" and
/// "amountReceived" all coalesce to `amountreceived`.
fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn field(headers: &[String], record: &csv::StringRecord, keys: &[&str]) -> String {
    for key in keys {
        if let Some(position) = headers.iter().position(|header| header == key)
            && let Some(value) = record.get(position)
            && !value.trim().is_empty()
        {
            return value.trim().to_string();
        }
    }
    String::new()
}

/// Decodes an uploaded sheet into raw rows, preserving input order.
///
/// The legacy "Amount Given" header is read as the receivable amount; a
/// legacy "Balance" column is ignored entirely (balances are always
/// recomputed, never trusted from input).
pub fn decode(bytes: &[u8]) -> ResultSheet<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| EngineError::InvalidSheet(err.to_string()))?
        .iter()
        .map(header_key)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| EngineError::InvalidSheet(err.to_string()))?;
        rows.push(SheetRow {
            name: field(&headers, &record, &["name"]),
            place: field(&headers, &record, &["place", "placeoptional", "placehome"]),
            amount_received: field(&headers, &record, &["amountreceived"]),
            amount_receivable: field(&headers, &record, &["amountreceivable", "amountgiven"]),
        });
    }
    Ok(rows)
}

/// Encodes the given ordered, numbered rows for download. The balance
/// column is recomputed from the amounts; all money is rendered with two
/// decimals.
pub fn encode(rows: &[NumberedEntry]) -> ResultSheet<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADER)
        .map_err(|err| EngineError::InvalidSheet(err.to_string()))?;
    for numbered in rows {
        let entry = &numbered.entry;
        writer
            .write_record([
                numbered.sno.to_string(),
                entry.name.clone(),
                entry.place.clone(),
                entry.amount_received.to_string(),
                entry.amount_receivable.to_string(),
                entry.balance().to_string(),
            ])
            .map_err(|err| EngineError::InvalidSheet(err.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::InvalidSheet(err.to_string()))
}
