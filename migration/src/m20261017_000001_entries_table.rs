use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 entries 表
        manager
            .create_table(
                Table::create()
                    .table(Entry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entry::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entry::ActiveAt).date().not_null())
                    .col(ColumnDef::new(Entry::Target).text().null())
                    .col(ColumnDef::new(Entry::Comment).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Entry::Visibility)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        // 一天只能有一个条目，并发入队时由唯一索引兜底
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entries_active_at")
                    .table(Entry::Table)
                    .col(Entry::ActiveAt)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_entries_active_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Entry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entry {
    #[sea_orm(iden = "entries")]
    Table,
    Id,
    ActiveAt,
    Target,
    Comment,
    Visibility,
}
