//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod accounts;
mod activities;
mod attendance;
mod audit;
mod evaluations;
mod lookups;
mod notes;
mod notifications;
mod parents;
mod participations;
mod reports;
mod students;
mod teacher_accounts;
mod teachers;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::AppConfig;
use crate::errors::{SchoolError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 内存 SQLite，仅用于测试
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        // 内存库随连接销毁，只保留一个长期连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

// Storage trait 实现
use crate::models::{
    accounts::{
        entities::{ParentAccount, StaffAccount},
        requests::{NewStaffAccount, StaffAccountUpdate},
        responses::{TeacherAccountListResponse, TeacherAccountView},
    },
    activities::{
        entities::{Activity, ActivityCategory},
        requests::{
            ActivityListQuery, CreateActivityCategoryRequest, CreateActivityRequest,
            UpdateActivityRequest,
        },
        responses::ActivityListResponse,
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceListQuery, NewAttendance, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
    audit::{
        requests::{AuditLogListQuery, NewAuditLog},
        responses::AuditLogListResponse,
    },
    evaluations::{
        entities::Evaluation,
        requests::{EvaluationListQuery, NewEvaluation},
        responses::EvaluationListResponse,
    },
    lookups::entities::{Department, Subject},
    notes::{
        entities::Note,
        requests::{NewNote, NoteListQuery},
        responses::NoteListResponse,
    },
    notifications::{
        entities::{Notification, RecipientKind},
        requests::NewNotification,
        responses::NotificationListResponse,
    },
    parents::{
        requests::{NewParentAccount, ParentAccountUpdate, ParentListQuery},
        responses::ParentListResponse,
    },
    participations::{
        entities::{ActivityEvaluation, Participation},
        requests::{
            NewActivityEvaluation, NewParticipation, ParticipationListQuery,
            UpdateParticipationRequest,
        },
        responses::ParticipationListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::storage::{AuditSink, ReportFilter, Storage, TeacherStatusCount};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn get_staff_account_by_email(&self, email: &str) -> Result<Option<StaffAccount>> {
        self.get_staff_account_by_email_impl(email).await
    }

    async fn get_staff_account_by_id(&self, id: i64) -> Result<Option<StaffAccount>> {
        self.get_staff_account_by_id_impl(id).await
    }

    async fn create_staff_account(&self, account: NewStaffAccount) -> Result<StaffAccount> {
        self.create_staff_account_impl(account).await
    }

    async fn count_staff_accounts(&self) -> Result<u64> {
        self.count_staff_accounts_impl().await
    }

    async fn update_staff_account(
        &self,
        id: i64,
        update: StaffAccountUpdate,
    ) -> Result<Option<StaffAccount>> {
        self.update_staff_account_impl(id, update).await
    }

    async fn update_staff_last_login(&self, id: i64) -> Result<()> {
        self.update_staff_last_login_impl(id).await
    }

    async fn get_parent_account_by_email(&self, email: &str) -> Result<Option<ParentAccount>> {
        self.get_parent_account_by_email_impl(email).await
    }

    async fn update_parent_last_login(&self, id: i64) -> Result<()> {
        self.update_parent_last_login_impl(id).await
    }

    async fn grant_teacher_account(
        &self,
        teacher_id: i64,
        account: NewStaffAccount,
    ) -> Result<TeacherAccountView> {
        self.grant_teacher_account_impl(teacher_id, account).await
    }

    async fn list_teacher_accounts(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherAccountListResponse> {
        self.list_teacher_accounts_impl(query).await
    }

    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_linked_account(&self, account_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_linked_account_impl(account_id).await
    }

    async fn list_teachers(&self, query: TeacherListQuery) -> Result<TeacherListResponse> {
        self.list_teachers_impl(query).await
    }

    async fn update_teacher(&self, id: i64, req: UpdateTeacherRequest) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, req).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn create_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord> {
        self.create_attendance_impl(record).await
    }

    async fn upsert_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord> {
        self.upsert_attendance_impl(record).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<AttendanceListResponse> {
        self.list_attendance_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_impl(id, update).await
    }

    async fn count_attendance_by_status(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<(AttendanceStatus, i64)>> {
        self.count_attendance_by_status_impl(query).await
    }

    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<Evaluation> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn list_evaluations(&self, query: EvaluationListQuery) -> Result<EvaluationListResponse> {
        self.list_evaluations_impl(query).await
    }

    async fn create_note(&self, note: NewNote) -> Result<Note> {
        self.create_note_impl(note).await
    }

    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        self.get_note_by_id_impl(id).await
    }

    async fn list_notes(&self, query: NoteListQuery) -> Result<NoteListResponse> {
        self.list_notes_impl(query).await
    }

    async fn list_activity_categories(&self) -> Result<Vec<ActivityCategory>> {
        self.list_activity_categories_impl().await
    }

    async fn create_activity_category(
        &self,
        req: CreateActivityCategoryRequest,
    ) -> Result<ActivityCategory> {
        self.create_activity_category_impl(req).await
    }

    async fn create_activity(
        &self,
        created_by: i64,
        req: CreateActivityRequest,
    ) -> Result<Activity> {
        self.create_activity_impl(created_by, req).await
    }

    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>> {
        self.get_activity_by_id_impl(id).await
    }

    async fn list_activities(&self, query: ActivityListQuery) -> Result<ActivityListResponse> {
        self.list_activities_impl(query).await
    }

    async fn list_activities_by_ids(&self, ids: &[i64]) -> Result<Vec<Activity>> {
        self.list_activities_by_ids_impl(ids).await
    }

    async fn update_activity(
        &self,
        id: i64,
        req: UpdateActivityRequest,
    ) -> Result<Option<Activity>> {
        self.update_activity_impl(id, req).await
    }

    async fn delete_activity(&self, id: i64) -> Result<bool> {
        self.delete_activity_impl(id).await
    }

    async fn create_participation(&self, participation: NewParticipation) -> Result<Participation> {
        self.create_participation_impl(participation).await
    }

    async fn get_participation_by_id(&self, id: i64) -> Result<Option<Participation>> {
        self.get_participation_by_id_impl(id).await
    }

    async fn list_participations(
        &self,
        query: ParticipationListQuery,
    ) -> Result<ParticipationListResponse> {
        self.list_participations_impl(query).await
    }

    async fn list_participations_by_student(&self, student_id: i64) -> Result<Vec<Participation>> {
        self.list_participations_by_student_impl(student_id).await
    }

    async fn update_participation(
        &self,
        id: i64,
        req: UpdateParticipationRequest,
    ) -> Result<Option<Participation>> {
        self.update_participation_impl(id, req).await
    }

    async fn delete_participation(&self, id: i64) -> Result<bool> {
        self.delete_participation_impl(id).await
    }

    async fn get_latest_activity_evaluation(
        &self,
        participation_id: i64,
    ) -> Result<Option<ActivityEvaluation>> {
        self.get_latest_activity_evaluation_impl(participation_id).await
    }

    async fn save_activity_evaluation(
        &self,
        evaluation: NewActivityEvaluation,
    ) -> Result<ActivityEvaluation> {
        self.save_activity_evaluation_impl(evaluation).await
    }

    async fn list_activity_evaluations_for(
        &self,
        participation_ids: &[i64],
    ) -> Result<Vec<ActivityEvaluation>> {
        self.list_activity_evaluations_for_impl(participation_ids).await
    }

    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        self.list_students_impl(query).await
    }

    async fn list_students_by_parent(&self, parent_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_parent_impl(parent_id).await
    }

    async fn update_student(&self, id: i64, req: UpdateStudentRequest) -> Result<Option<Student>> {
        self.update_student_impl(id, req).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn create_parent_account(&self, account: NewParentAccount) -> Result<ParentAccount> {
        self.create_parent_account_impl(account).await
    }

    async fn get_parent_account_by_id(&self, id: i64) -> Result<Option<ParentAccount>> {
        self.get_parent_account_by_id_impl(id).await
    }

    async fn list_parent_accounts(&self, query: ParentListQuery) -> Result<ParentListResponse> {
        self.list_parent_accounts_impl(query).await
    }

    async fn update_parent_account(
        &self,
        id: i64,
        update: ParentAccountUpdate,
    ) -> Result<Option<ParentAccount>> {
        self.update_parent_account_impl(id, update).await
    }

    async fn delete_parent_account(&self, id: i64) -> Result<bool> {
        self.delete_parent_account_impl(id).await
    }

    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn list_notifications(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
        unread_only: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_impl(recipient_id, kind, unread_only, page, size).await
    }

    async fn count_unread_notifications(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<i64> {
        self.count_unread_notifications_impl(recipient_id, kind).await
    }

    async fn mark_notification_read(
        &self,
        id: i64,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<bool> {
        self.mark_notification_read_impl(id, recipient_id, kind).await
    }

    async fn mark_all_notifications_read(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<i64> {
        self.mark_all_notifications_read_impl(recipient_id, kind).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn create_department(&self, name: &str) -> Result<Department> {
        self.create_department_impl(name).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn create_subject(&self, name: &str) -> Result<Subject> {
        self.create_subject_impl(name).await
    }

    async fn list_audit_logs(&self, query: AuditLogListQuery) -> Result<AuditLogListResponse> {
        self.list_audit_logs_impl(query).await
    }

    async fn list_teachers_for_report(&self, filter: &ReportFilter) -> Result<Vec<Teacher>> {
        self.list_teachers_for_report_impl(filter).await
    }

    async fn count_attendance_by_teacher(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<TeacherStatusCount>> {
        self.count_attendance_by_teacher_impl(teacher_ids, filter).await
    }

    async fn list_evaluations_for_teachers(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<Evaluation>> {
        self.list_evaluations_for_teachers_impl(teacher_ids, filter).await
    }

    async fn count_notes_by_teacher(&self, teacher_ids: &[i64]) -> Result<Vec<(i64, i64)>> {
        self.count_notes_by_teacher_impl(teacher_ids).await
    }
}

#[async_trait]
impl AuditSink for SeaOrmStorage {
    async fn append_audit_log(&self, entry: NewAuditLog) -> Result<()> {
        self.append_audit_log_impl(entry).await
    }
}
