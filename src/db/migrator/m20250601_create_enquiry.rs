use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enquiry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enquiry::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enquiry::Name).string().not_null())
                    .col(ColumnDef::new(Enquiry::Email).string().not_null())
                    .col(ColumnDef::new(Enquiry::Phone).string().null())
                    .col(ColumnDef::new(Enquiry::Company).string().null())
                    .col(ColumnDef::new(Enquiry::Service).string().null())
                    .col(ColumnDef::new(Enquiry::Message).text().not_null())
                    .col(
                        ColumnDef::new(Enquiry::Consent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Enquiry::Source).string().null())
                    .col(
                        ColumnDef::new(Enquiry::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enquiry::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_enquiry_created_at")
                    .table(Enquiry::Table)
                    .col(Enquiry::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Enquiry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Enquiry {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Company,
    Service,
    Message,
    Consent,
    Source,
    CreatedAt,
    UpdatedAt,
}
