use chrono::{Duration, Utc};
use sea_orm::{
    ActiveValue, DatabaseConnection, DbErr, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use tokio::task::JoinSet;
use uuid::Uuid;

pub use entries::{Entry, EntryUpdate, NewEntry};
pub use error::EngineError;
pub use money::{BalanceState, MoneyCents, balance};
pub use order::{NumberedEntry, total_order};
pub use pagination::{PAGE_SIZE, PageMarker, PageState, page_markers, page_window, total_pages};
pub use search::{SUGGESTION_LIMIT, Suggestion, normalize, suggestions};
pub use sheet::SheetRow;

mod entries;
mod error;
mod money;
mod order;
mod pagination;
mod search;
mod sheet;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Maximum writes per store batch (import inserts, delete-all deletes).
pub const WRITE_BATCH_CAPACITY: usize = 500;

/// One row of the ledger view: an ordered, numbered entry with its
/// derived balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerRow {
    pub sno: u64,
    pub entry: Entry,
    pub balance: MoneyCents,
    pub state: BalanceState,
}

/// One page of the filtered, ordered ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerPage {
    pub rows: Vec<LedgerRow>,
    pub page: u32,
    pub total_pages: u32,
    /// Number of entries matching the search, across all pages.
    pub total_matching: usize,
    pub markers: Vec<PageMarker>,
}

/// Result of a bulk import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows persisted.
    pub imported: usize,
    /// Rows silently skipped for a blank name.
    pub skipped: usize,
    /// Write batches issued.
    pub batches: usize,
}

/// Result of a delete-all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: u64,
    /// Delete batches issued.
    pub batches: usize,
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Fetch-all snapshot in the deterministic fetch order (creation
    /// order, id tie-break). This is also the iteration order for
    /// [`Engine::suggestions`]; the display order is assigned separately
    /// by [`total_order`].
    pub async fn entries(&self) -> ResultEngine<Vec<Entry>> {
        let models = entries::Entity::find()
            .order_by_asc(entries::Column::CreatedAt)
            .order_by_asc(entries::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Entry::try_from).collect()
    }

    /// One page of the ledger view: snapshot, total order, search
    /// filter, then the page window. `page` is 1-indexed and clamped.
    pub async fn list(&self, search: &str, page: u32) -> ResultEngine<LedgerPage> {
        let filtered = self.filtered(search).await?;
        let total_matching = filtered.len();
        let total_pages = pagination::total_pages(total_matching, PAGE_SIZE);
        let page = page.clamp(1, total_pages.max(1));
        let window = pagination::page_window(total_matching, page, PAGE_SIZE);

        let rows = filtered[window]
            .iter()
            .map(|numbered| {
                let balance = numbered.entry.balance();
                LedgerRow {
                    sno: numbered.sno,
                    entry: numbered.entry.clone(),
                    balance,
                    state: BalanceState::classify(balance),
                }
            })
            .collect();

        Ok(LedgerPage {
            rows,
            page,
            total_pages,
            total_matching,
            markers: pagination::page_markers(page, total_pages),
        })
    }

    /// Manual create. `name` and `amount_received` must be non-blank;
    /// the entry carries no `order_index`.
    pub async fn add_entry(&self, new: NewEntry) -> ResultEngine<Uuid> {
        if new.name.trim().is_empty() {
            return Err(EngineError::MissingField("name".to_string()));
        }
        if new.amount_received.trim().is_empty() {
            return Err(EngineError::MissingField("amount_received".to_string()));
        }

        let entry = Entry {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            place: new.place.trim().to_string(),
            amount_received: MoneyCents::parse_loose(&new.amount_received),
            amount_receivable: MoneyCents::parse_loose(&new.amount_receivable),
            created_at: Utc::now(),
            order_index: None,
        };
        entries::ActiveModel::from(&entry).insert(&self.database).await?;
        Ok(entry.id)
    }

    /// Field-by-field edit. `created_at` and `order_index` are left
    /// untouched; `name` stays required.
    pub async fn update_entry(&self, id: Uuid, update: EntryUpdate) -> ResultEngine<()> {
        if update.name.trim().is_empty() {
            return Err(EngineError::MissingField("name".to_string()));
        }

        let existing = entries::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("entry not exists".to_string()))?;

        let model = entries::ActiveModel {
            id: ActiveValue::Set(existing.id),
            name: ActiveValue::Set(update.name.trim().to_string()),
            place: ActiveValue::Set(update.place.trim().to_string()),
            amount_received_minor: ActiveValue::Set(
                MoneyCents::parse_loose(&update.amount_received).cents(),
            ),
            amount_receivable_minor: ActiveValue::Set(
                MoneyCents::parse_loose(&update.amount_receivable).cents(),
            ),
            ..Default::default()
        };
        model.update(&self.database).await?;
        Ok(())
    }

    /// Single delete by id.
    pub async fn delete_entry(&self, id: Uuid) -> ResultEngine<()> {
        let result = entries::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("entry not exists".to_string()));
        }
        Ok(())
    }

    /// Deletes every entry, in concurrent batches of at most
    /// [`WRITE_BATCH_CAPACITY`] ids each.
    pub async fn delete_all(&self) -> ResultEngine<DeleteOutcome> {
        let ids: Vec<String> = entries::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|model| model.id)
            .collect();
        if ids.is_empty() {
            return Ok(DeleteOutcome::default());
        }

        let mut tasks: JoinSet<Result<u64, DbErr>> = JoinSet::new();
        let batches = ids.chunks(WRITE_BATCH_CAPACITY).count();
        for chunk in ids.chunks(WRITE_BATCH_CAPACITY) {
            let database = self.database.clone();
            let batch: Vec<String> = chunk.to_vec();
            tasks.spawn(async move {
                let result = entries::Entity::delete_many()
                    .filter(entries::Column::Id.is_in(batch))
                    .exec(&database)
                    .await?;
                Ok(result.rows_affected)
            });
        }

        let deleted = join_batches(tasks).await?.into_iter().sum();
        Ok(DeleteOutcome { deleted, batches })
    }

    /// Bulk import: assigns each accepted row an `order_index`
    /// continuing after the current maximum, a strictly increasing
    /// synthetic `created_at`, and persists in concurrent batches.
    ///
    /// Rows with a blank name are skipped, not persisted. Repeated
    /// imports never renumber previously imported rows.
    pub async fn import_rows(&self, rows: Vec<SheetRow>) -> ResultEngine<ImportOutcome> {
        let existing = self.entries().await?;
        let next_index = order::max_order_index(&existing) + 1;
        let base = Utc::now();

        let mut models: Vec<entries::ActiveModel> = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for row in rows {
            if row.name.trim().is_empty() {
                skipped += 1;
                continue;
            }
            let offset = models.len() as i64;
            let entry = Entry {
                id: Uuid::new_v4(),
                name: row.name.trim().to_string(),
                place: row.place.trim().to_string(),
                amount_received: MoneyCents::parse_loose(&row.amount_received),
                amount_receivable: MoneyCents::parse_loose(&row.amount_receivable),
                // Synthetic, strictly increasing: keeps a deterministic
                // fallback order even for a reader ignoring order_index.
                created_at: base + Duration::milliseconds(offset),
                order_index: Some(next_index + offset),
            };
            models.push(entries::ActiveModel::from(&entry));
        }

        let imported = models.len();
        if models.is_empty() {
            return Ok(ImportOutcome {
                imported,
                skipped,
                batches: 0,
            });
        }

        let mut tasks: JoinSet<Result<(), DbErr>> = JoinSet::new();
        let batches = models.chunks(WRITE_BATCH_CAPACITY).count();
        for chunk in models.chunks(WRITE_BATCH_CAPACITY) {
            let database = self.database.clone();
            let batch: Vec<entries::ActiveModel> = chunk.to_vec();
            tasks.spawn(async move {
                let transaction = database.begin().await?;
                entries::Entity::insert_many(batch).exec(&transaction).await?;
                transaction.commit().await
            });
        }

        join_batches(tasks).await?;
        Ok(ImportOutcome {
            imported,
            skipped,
            batches,
        })
    }

    /// Decodes an uploaded CSV sheet and imports its rows.
    pub async fn import_csv(&self, bytes: &[u8]) -> ResultEngine<ImportOutcome> {
        let rows = sheet::decode(bytes)?;
        self.import_rows(rows).await
    }

    /// CSV download of the search-filtered (but not paginated) total
    /// order. Balances are recomputed, never read back from anywhere.
    pub async fn export_csv(&self, search: &str) -> ResultEngine<Vec<u8>> {
        let filtered = self.filtered(search).await?;
        sheet::encode(&filtered)
    }

    /// Name suggestions for an in-progress input, over the full record
    /// set in fetch order.
    pub async fn suggestions(&self, input: &str) -> ResultEngine<Vec<Suggestion>> {
        Ok(search::suggestions(input, &self.entries().await?))
    }

    async fn filtered(&self, search: &str) -> ResultEngine<Vec<NumberedEntry>> {
        let ordered = order::total_order(self.entries().await?);
        Ok(ordered
            .into_iter()
            .filter(|numbered| search::matches(search, &numbered.entry))
            .collect())
    }
}

/// Awaits every batch before reporting: a failed batch never blocks the
/// independent ones, but any failure fails the operation as a whole.
async fn join_batches<T: 'static>(mut tasks: JoinSet<Result<T, DbErr>>) -> ResultEngine<Vec<T>> {
    let total = tasks.len();
    let mut done = Vec::with_capacity(total);
    let mut failures: Vec<String> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(value)) => done.push(value),
            Ok(Err(err)) => failures.push(err.to_string()),
            Err(err) => failures.push(err.to_string()),
        }
    }
    if failures.is_empty() {
        Ok(done)
    } else {
        Err(EngineError::Batch(format!(
            "{}/{} batches failed: {}",
            failures.len(),
            total,
            failures.join("; ")
        )))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
