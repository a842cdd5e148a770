//! 点击事件表迁移
//!
//! 创建 click_events 表，记录每次成功跳转的客户端信息：
//! - 时间戳
//! - IP 地址
//! - 浏览器 / 操作系统 / 设备类型

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClickEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClickEvents::ShortCode)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClickEvents::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClickEvents::IpAddress).string_len(45).null())
                    .col(
                        ColumnDef::new(ClickEvents::Browser)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClickEvents::Os).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ClickEvents::Device)
                            .string_len(16)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // short_code 索引（聚合查询按此过滤）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_short_code")
                    .table(ClickEvents::Table)
                    .col(ClickEvents::ShortCode)
                    .to_owned(),
            )
            .await?;

        // clicked_at 索引（时间范围查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_events_clicked_at")
                    .table(ClickEvents::Table)
                    .col(ClickEvents::ClickedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_events_clicked_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_events_short_code")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ClickEvents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ClickEvents {
    Table,
    Id,
    ShortCode,
    ClickedAt,
    IpAddress,
    Browser,
    Os,
    Device,
}
