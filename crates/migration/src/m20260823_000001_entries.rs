use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    Name,
    Place,
    AmountReceivedMinor,
    AmountReceivableMinor,
    CreatedAt,
    OrderIndex,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::Name).string().not_null())
                    .col(ColumnDef::new(Entries::Place).string().not_null())
                    .col(
                        ColumnDef::new(Entries::AmountReceivedMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Entries::AmountReceivableMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entries::CreatedAt).timestamp().not_null())
                    // Present only on bulk-imported rows.
                    .col(ColumnDef::new(Entries::OrderIndex).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-created_at")
                    .table(Entries::Table)
                    .col(Entries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // The import reconciler assigns unique indices; sqlite allows
        // multiple NULLs in a unique index, so manual rows are unaffected.
        manager
            .create_index(
                Index::create()
                    .name("idx-entries-order_index")
                    .table(Entries::Table)
                    .col(Entries::OrderIndex)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await
    }
}
