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

use std::sync::Arc;

use crate::errors::Result;

pub mod sea_orm_storage;

/// 报表统计的筛选条件
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub teacher_id: Option<i64>,
    pub department_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// 最多返回的教师数
    pub limit: u64,
}

/// 每位教师的考勤状态计数
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherStatusCount {
    pub teacher_id: i64,
    pub status: AttendanceStatus,
    pub count: i64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账户方法
    // 通过邮箱获取教职工账户
    async fn get_staff_account_by_email(&self, email: &str) -> Result<Option<StaffAccount>>;
    // 通过ID获取教职工账户
    async fn get_staff_account_by_id(&self, id: i64) -> Result<Option<StaffAccount>>;
    // 创建教职工账户
    async fn create_staff_account(&self, account: NewStaffAccount) -> Result<StaffAccount>;
    // 教职工账户总数
    async fn count_staff_accounts(&self) -> Result<u64>;
    // 更新教职工账户
    async fn update_staff_account(
        &self,
        id: i64,
        update: StaffAccountUpdate,
    ) -> Result<Option<StaffAccount>>;
    // 更新教职工最后登录时间
    async fn update_staff_last_login(&self, id: i64) -> Result<()>;
    // 通过邮箱获取家长账户
    async fn get_parent_account_by_email(&self, email: &str) -> Result<Option<ParentAccount>>;
    // 更新家长最后登录时间
    async fn update_parent_last_login(&self, id: i64) -> Result<()>;

    /// 教师账户方法
    // 为教师开通登录账户（单一事务）
    async fn grant_teacher_account(
        &self,
        teacher_id: i64,
        account: NewStaffAccount,
    ) -> Result<TeacherAccountView>;
    // 列出教师及其账户状态
    async fn list_teacher_accounts(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherAccountListResponse>;

    /// 教师方法
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 通过关联的登录账户获取教师档案
    async fn get_teacher_by_linked_account(&self, account_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self, query: TeacherListQuery) -> Result<TeacherListResponse>;
    async fn update_teacher(&self, id: i64, req: UpdateTeacherRequest) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 考勤方法
    // 插入考勤，同一教师同一天重复时返回 Conflict
    async fn create_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord>;
    // 插入或覆盖同一教师同一天的考勤
    async fn upsert_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    // 按状态分组计数，忽略分页参数
    async fn count_attendance_by_status(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<(AttendanceStatus, i64)>>;

    /// 评估方法
    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<Evaluation>;
    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>>;
    async fn list_evaluations(&self, query: EvaluationListQuery) -> Result<EvaluationListResponse>;

    /// 备注方法
    async fn create_note(&self, note: NewNote) -> Result<Note>;
    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>>;
    async fn list_notes(&self, query: NoteListQuery) -> Result<NoteListResponse>;

    /// 活动分类方法
    async fn list_activity_categories(&self) -> Result<Vec<ActivityCategory>>;
    async fn create_activity_category(
        &self,
        req: CreateActivityCategoryRequest,
    ) -> Result<ActivityCategory>;

    /// 活动方法
    async fn create_activity(&self, created_by: i64, req: CreateActivityRequest)
    -> Result<Activity>;
    async fn get_activity_by_id(&self, id: i64) -> Result<Option<Activity>>;
    async fn list_activities(&self, query: ActivityListQuery) -> Result<ActivityListResponse>;
    async fn list_activities_by_ids(&self, ids: &[i64]) -> Result<Vec<Activity>>;
    async fn update_activity(
        &self,
        id: i64,
        req: UpdateActivityRequest,
    ) -> Result<Option<Activity>>;
    // 删除活动及其参与记录和评价（单一事务）
    async fn delete_activity(&self, id: i64) -> Result<bool>;

    /// 参与方法
    // 校验引用与人数上限后插入
    async fn create_participation(&self, participation: NewParticipation)
    -> Result<Participation>;
    async fn get_participation_by_id(&self, id: i64) -> Result<Option<Participation>>;
    async fn list_participations(
        &self,
        query: ParticipationListQuery,
    ) -> Result<ParticipationListResponse>;
    async fn list_participations_by_student(&self, student_id: i64) -> Result<Vec<Participation>>;
    async fn update_participation(
        &self,
        id: i64,
        req: UpdateParticipationRequest,
    ) -> Result<Option<Participation>>;
    // 删除参与记录及其评价（单一事务）
    async fn delete_participation(&self, id: i64) -> Result<bool>;

    /// 活动表现评价方法
    // 参与记录最新的一条评价
    async fn get_latest_activity_evaluation(
        &self,
        participation_id: i64,
    ) -> Result<Option<ActivityEvaluation>>;
    // 更新最新评价，没有则新建
    async fn save_activity_evaluation(
        &self,
        evaluation: NewActivityEvaluation,
    ) -> Result<ActivityEvaluation>;
    async fn list_activity_evaluations_for(
        &self,
        participation_ids: &[i64],
    ) -> Result<Vec<ActivityEvaluation>>;

    /// 学生方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students(&self, query: StudentListQuery) -> Result<StudentListResponse>;
    async fn list_students_by_parent(&self, parent_id: i64) -> Result<Vec<Student>>;
    async fn update_student(&self, id: i64, req: UpdateStudentRequest) -> Result<Option<Student>>;
    // 删除学生及其参与记录和评价（单一事务）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 家长方法
    async fn create_parent_account(&self, account: NewParentAccount) -> Result<ParentAccount>;
    async fn get_parent_account_by_id(&self, id: i64) -> Result<Option<ParentAccount>>;
    async fn list_parent_accounts(&self, query: ParentListQuery) -> Result<ParentListResponse>;
    async fn update_parent_account(
        &self,
        id: i64,
        update: ParentAccountUpdate,
    ) -> Result<Option<ParentAccount>>;
    // 解除子女关联后删除家长（单一事务）
    async fn delete_parent_account(&self, id: i64) -> Result<bool>;

    /// 通知方法
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications(
        &self,
        recipient_id: i64,
        kind: RecipientKind,
        unread_only: bool,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, recipient_id: i64, kind: RecipientKind)
    -> Result<i64>;
    // 只能标记本人的通知
    async fn mark_notification_read(
        &self,
        id: i64,
        recipient_id: i64,
        kind: RecipientKind,
    ) -> Result<bool>;
    async fn mark_all_notifications_read(&self, recipient_id: i64, kind: RecipientKind)
    -> Result<i64>;

    /// 部门与学科方法
    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn create_department(&self, name: &str) -> Result<Department>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn create_subject(&self, name: &str) -> Result<Subject>;

    /// 审计日志查询
    async fn list_audit_logs(&self, query: AuditLogListQuery) -> Result<AuditLogListResponse>;

    /// 报表方法
    async fn list_teachers_for_report(&self, filter: &ReportFilter) -> Result<Vec<Teacher>>;
    async fn count_attendance_by_teacher(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<TeacherStatusCount>>;
    async fn list_evaluations_for_teachers(
        &self,
        teacher_ids: &[i64],
        filter: &ReportFilter,
    ) -> Result<Vec<Evaluation>>;
    async fn count_notes_by_teacher(&self, teacher_ids: &[i64]) -> Result<Vec<(i64, i64)>>;
}

/// 审计日志写入端
///
/// 与 `Storage` 分开注册，便于在测试中注入失败。
#[async_trait::async_trait]
pub trait AuditSink: Send + Sync {
    async fn append_audit_log(&self, entry: NewAuditLog) -> Result<()>;
}

/// 创建存储后端，同一个实例同时作为审计写入端
pub async fn create_storage() -> Result<(Arc<dyn Storage>, Arc<dyn AuditSink>)> {
    let storage = Arc::new(sea_orm_storage::SeaOrmStorage::new_async().await?);
    Ok((storage.clone(), storage))
}
