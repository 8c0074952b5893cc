use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建教职工账号表
        manager
            .create_table(
                Table::create()
                    .table(StaffAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffAccounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffAccounts::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StaffAccounts::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StaffAccounts::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffAccounts::Role).string().not_null())
                    .col(
                        ColumnDef::new(StaffAccounts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(StaffAccounts::LastLogin).big_integer().null())
                    .col(
                        ColumnDef::new(StaffAccounts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StaffAccounts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建家长账号表
        manager
            .create_table(
                Table::create()
                    .table(ParentAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentAccounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentAccounts::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ParentAccounts::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentAccounts::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParentAccounts::Phone).string().null())
                    .col(
                        ColumnDef::new(ParentAccounts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ParentAccounts::LastLogin).big_integer().null())
                    .col(
                        ColumnDef::new(ParentAccounts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentAccounts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staff_accounts_role")
                    .table(StaffAccounts::Table)
                    .col(StaffAccounts::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParentAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffAccounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum StaffAccounts {
    #[sea_orm(iden = "staff_accounts")]
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    Active,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum ParentAccounts {
    #[sea_orm(iden = "parent_accounts")]
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Phone,
    Active,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
