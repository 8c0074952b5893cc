use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_accounts::{ParentAccounts, StaffAccounts};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).big_integer().not_null().to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 部门与学科
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(id_col(Departments::Id))
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(timestamp_col(Departments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(id_col(Subjects::Id))
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(timestamp_col(Subjects::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // 教师档案
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(id_col(Teachers::Id))
                    .col(
                        ColumnDef::new(Teachers::EmployeeId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::DisplayName).string().not_null())
                    .col(ColumnDef::new(Teachers::DepartmentId).big_integer().null())
                    .col(ColumnDef::new(Teachers::SubjectId).big_integer().null())
                    .col(ColumnDef::new(Teachers::Status).string().not_null())
                    .col(ColumnDef::new(Teachers::Email).string().null())
                    .col(ColumnDef::new(Teachers::Phone).string().null())
                    .col(ColumnDef::new(Teachers::HireDate).string().null())
                    .col(
                        ColumnDef::new(Teachers::LinkedAccountId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(timestamp_col(Teachers::CreatedAt))
                    .col(timestamp_col(Teachers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::LinkedAccountId)
                            .to(StaffAccounts::Table, StaffAccounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生档案；家长删除时由业务层先解除关联
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id_col(Students::Id))
                    .col(
                        ColumnDef::new(Students::StudentCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::DisplayName).string().not_null())
                    .col(ColumnDef::new(Students::Grade).string().not_null())
                    .col(ColumnDef::new(Students::ParentId).big_integer().null())
                    .col(timestamp_col(Students::CreatedAt))
                    .col(timestamp_col(Students::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ParentId)
                            .to(ParentAccounts::Table, ParentAccounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(id_col(Attendance::Id))
                    .col(ColumnDef::new(Attendance::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).string().not_null())
                    .col(ColumnDef::new(Attendance::CheckIn).string().null())
                    .col(ColumnDef::new(Attendance::CheckOut).string().null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::Notes).text().null())
                    .col(timestamp_col(Attendance::CreatedAt))
                    .col(timestamp_col(Attendance::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每位教师每天至多一条考勤，自助签到依赖该索引做 upsert
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_teacher_date")
                    .table(Attendance::Table)
                    .col(Attendance::TeacherId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 教师评估
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(id_col(Evaluations::Id))
                    .col(ColumnDef::new(Evaluations::TeacherId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Date).string().not_null())
                    .col(ColumnDef::new(Evaluations::TeachingQuality).integer().not_null())
                    .col(ColumnDef::new(Evaluations::Punctuality).integer().not_null())
                    .col(
                        ColumnDef::new(Evaluations::StudentInteraction)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CurriculumAdherence)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::LessonPlanning).integer().not_null())
                    .col(ColumnDef::new(Evaluations::LessonPlanningNote).text().null())
                    .col(ColumnDef::new(Evaluations::LessonExecution).integer().not_null())
                    .col(ColumnDef::new(Evaluations::LessonExecutionNote).text().null())
                    .col(
                        ColumnDef::new(Evaluations::ClassroomManagement)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ClassroomManagementNote)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ProfessionalGrowth)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ProfessionalGrowthNote)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Evaluations::OverallScore).double().not_null())
                    .col(ColumnDef::new(Evaluations::Comments).text().null())
                    .col(timestamp_col(Evaluations::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(StaffAccounts::Table, StaffAccounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 教师备注
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(id_col(Notes::Id))
                    .col(ColumnDef::new(Notes::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::NoteType).string().not_null())
                    .col(ColumnDef::new(Notes::Content).text().not_null())
                    .col(timestamp_col(Notes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::AuthorId)
                            .to(StaffAccounts::Table, StaffAccounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动分类
        manager
            .create_table(
                Table::create()
                    .table(ActivityCategories::Table)
                    .if_not_exists()
                    .col(id_col(ActivityCategories::Id))
                    .col(
                        ColumnDef::new(ActivityCategories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ActivityCategories::Description).text().null())
                    .col(ColumnDef::new(ActivityCategories::Icon).string().null())
                    .col(ColumnDef::new(ActivityCategories::Color).string().null())
                    .col(timestamp_col(ActivityCategories::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // 活动
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(id_col(Activities::Id))
                    .col(ColumnDef::new(Activities::CategoryId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Activities::ResponsibleTeacherId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Activities::Title).string().not_null())
                    .col(ColumnDef::new(Activities::Description).text().null())
                    .col(ColumnDef::new(Activities::Date).string().not_null())
                    .col(ColumnDef::new(Activities::EndDate).string().null())
                    .col(ColumnDef::new(Activities::Time).string().null())
                    .col(ColumnDef::new(Activities::Location).string().null())
                    .col(ColumnDef::new(Activities::Status).string().not_null())
                    .col(ColumnDef::new(Activities::MaxParticipants).integer().null())
                    .col(ColumnDef::new(Activities::CreatedBy).big_integer().null())
                    .col(timestamp_col(Activities::CreatedAt))
                    .col(timestamp_col(Activities::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Activities::Table, Activities::CategoryId)
                            .to(ActivityCategories::Table, ActivityCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Activities::Table, Activities::ResponsibleTeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动参与：学生与教职工二选一
        manager
            .create_table(
                Table::create()
                    .table(Participations::Table)
                    .if_not_exists()
                    .col(id_col(Participations::Id))
                    .col(
                        ColumnDef::new(Participations::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participations::StudentId).big_integer().null())
                    .col(ColumnDef::new(Participations::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Participations::Role).string().not_null())
                    .col(ColumnDef::new(Participations::Status).string().not_null())
                    .col(ColumnDef::new(Participations::Notes).text().null())
                    .col(timestamp_col(Participations::CreatedAt))
                    .col(timestamp_col(Participations::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Participations::Table, Participations::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动表现评价
        manager
            .create_table(
                Table::create()
                    .table(ActivityEvaluations::Table)
                    .if_not_exists()
                    .col(id_col(ActivityEvaluations::Id))
                    .col(
                        ColumnDef::new(ActivityEvaluations::ParticipationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityEvaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityEvaluations::Score).integer().not_null())
                    .col(ColumnDef::new(ActivityEvaluations::Performance).string().null())
                    .col(ColumnDef::new(ActivityEvaluations::Strengths).text().null())
                    .col(ColumnDef::new(ActivityEvaluations::Improvements).text().null())
                    .col(ColumnDef::new(ActivityEvaluations::Comments).text().null())
                    .col(timestamp_col(ActivityEvaluations::CreatedAt))
                    .col(timestamp_col(ActivityEvaluations::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ActivityEvaluations::Table,
                                ActivityEvaluations::ParticipationId,
                            )
                            .to(Participations::Table, Participations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivityEvaluations::Table, ActivityEvaluations::EvaluatorId)
                            .to(StaffAccounts::Table, StaffAccounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 通知
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(id_col(Notifications::Id))
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientKind)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(Notifications::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_teacher_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notes_teacher_id")
                    .table(Notes::Table)
                    .col(Notes::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_parent_id")
                    .table(Students::Table)
                    .col(Students::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participations_activity_id")
                    .table(Participations::Table)
                    .col(Participations::ActivityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_evaluations_participation_id")
                    .table(ActivityEvaluations::Table)
                    .col(ActivityEvaluations::ParticipationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient_id")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Participations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    EmployeeId,
    DisplayName,
    DepartmentId,
    SubjectId,
    Status,
    Email,
    Phone,
    HireDate,
    LinkedAccountId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    StudentCode,
    DisplayName,
    Grade,
    ParentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    TeacherId,
    Date,
    CheckIn,
    CheckOut,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    TeacherId,
    EvaluatorId,
    Date,
    TeachingQuality,
    Punctuality,
    StudentInteraction,
    CurriculumAdherence,
    LessonPlanning,
    LessonPlanningNote,
    LessonExecution,
    LessonExecutionNote,
    ClassroomManagement,
    ClassroomManagementNote,
    ProfessionalGrowth,
    ProfessionalGrowthNote,
    OverallScore,
    Comments,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notes {
    #[sea_orm(iden = "notes")]
    Table,
    Id,
    TeacherId,
    AuthorId,
    NoteType,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ActivityCategories {
    #[sea_orm(iden = "activity_categories")]
    Table,
    Id,
    Name,
    Description,
    Icon,
    Color,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Activities {
    #[sea_orm(iden = "activities")]
    Table,
    Id,
    CategoryId,
    ResponsibleTeacherId,
    Title,
    Description,
    Date,
    EndDate,
    Time,
    Location,
    Status,
    MaxParticipants,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Participations {
    #[sea_orm(iden = "participations")]
    Table,
    Id,
    ActivityId,
    StudentId,
    TeacherId,
    Role,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ActivityEvaluations {
    #[sea_orm(iden = "activity_evaluations")]
    Table,
    Id,
    ParticipationId,
    EvaluatorId,
    Score,
    Performance,
    Strengths,
    Improvements,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    RecipientId,
    RecipientKind,
    Title,
    Message,
    NotificationType,
    IsRead,
    CreatedAt,
}
