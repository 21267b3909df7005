//! Ledger entry primitives.
//!
//! An `Entry` is one contribution record. Entries come from two
//! provenances: bulk-imported rows carry an `order_index` (their original
//! position in the import stream), manually entered rows do not.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, money};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub place: String,
    pub amount_received: MoneyCents,
    pub amount_receivable: MoneyCents,
    /// Set once at creation, never mutated afterwards.
    pub created_at: DateTime<Utc>,
    /// Original 0-based position within the import stream. `None` for
    /// manually entered rows. Immutable once set.
    pub order_index: Option<i64>,
}

impl Entry {
    pub fn balance(&self) -> MoneyCents {
        money::balance(self.amount_received, self.amount_receivable)
    }
}

/// Fields accepted for a manual create. Amounts arrive as raw text and
/// are parsed loosely; `name` and `amount_received` must be non-blank.
#[derive(Clone, Debug, Default)]
pub struct NewEntry {
    pub name: String,
    pub place: String,
    pub amount_received: String,
    pub amount_receivable: String,
}

/// Fields accepted for an edit. `created_at` and `order_index` are never
/// touched by an edit.
#[derive(Clone, Debug, Default)]
pub struct EntryUpdate {
    pub name: String,
    pub place: String,
    pub amount_received: String,
    pub amount_receivable: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub place: String,
    pub amount_received_minor: i64,
    pub amount_receivable_minor: i64,
    pub created_at: DateTimeUtc,
    pub order_index: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Entry> for ActiveModel {
    fn from(entry: &Entry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            name: ActiveValue::Set(entry.name.clone()),
            place: ActiveValue::Set(entry.place.clone()),
            amount_received_minor: ActiveValue::Set(entry.amount_received.cents()),
            amount_receivable_minor: ActiveValue::Set(entry.amount_receivable.cents()),
            created_at: ActiveValue::Set(entry.created_at),
            order_index: ActiveValue::Set(entry.order_index),
        }
    }
}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("entry not exists".to_string()))?,
            name: model.name,
            place: model.place,
            amount_received: MoneyCents::new(model.amount_received_minor),
            amount_receivable: MoneyCents::new(model.amount_receivable_minor),
            created_at: model.created_at,
            order_index: model.order_index,
        })
    }
}
