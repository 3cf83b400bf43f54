use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per protocol deployment, keyed by id_protocol ("<project>_<chain>")
        manager
            .create_table(
                Table::create()
                    .table(Staking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staking::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staking::IdProtocol)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staking::AddressToken).string_len(42).not_null())
                    .col(ColumnDef::new(Staking::AddressStaking).string_len(42).not_null())
                    .col(ColumnDef::new(Staking::NameToken).string().not_null())
                    .col(ColumnDef::new(Staking::NameProject).string().not_null())
                    .col(ColumnDef::new(Staking::Chain).string().not_null())
                    .col(ColumnDef::new(Staking::Apy).double().not_null().default(0.0))
                    .col(ColumnDef::new(Staking::Tvl).double().not_null().default(0.0))
                    .col(
                        ColumnDef::new(Staking::Stablecoin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Staking::Categories).json_binary().not_null())
                    .col(ColumnDef::new(Staking::Logo).text().not_null())
                    .col(
                        ColumnDef::new(Staking::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .col(
                        ColumnDef::new(Staking::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staking_chain")
                    .table(Staking::Table)
                    .col(Staking::Chain)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staking::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staking {
    Table,
    Id,
    IdProtocol,
    AddressToken,
    AddressStaking,
    NameToken,
    NameProject,
    Chain,
    Apy,
    Tvl,
    Stablecoin,
    Categories,
    Logo,
    CreatedAt,
    UpdatedAt,
}
