//! 业务服务
//!
//! 每个资源一个 `XService`，HTTP 入口只负责取出上下文与主体；
//! 真正的逻辑是各子模块中接收 `Option<&Principal>` 的函数，可脱离 HTTP 单独测试。

pub mod activities;
pub mod attendance;
pub mod audit;
pub mod audit_logs;
pub mod auth;
pub mod categories;
pub mod evaluations;
pub mod lookups;
pub mod notes;
pub mod notifications;
pub mod parent_portal;
pub mod parents;
pub mod participations;
pub mod reports;
pub mod students;
pub mod teacher_accounts;
pub mod teachers;

pub use activities::ActivityService;
pub use attendance::AttendanceService;
pub use audit::AuditRecorder;
pub use audit_logs::AuditLogService;
pub use auth::AuthService;
pub use categories::CategoryService;
pub use evaluations::EvaluationService;
pub use lookups::LookupService;
pub use notes::NoteService;
pub use notifications::NotificationService;
pub use parent_portal::ParentPortalService;
pub use parents::ParentService;
pub use participations::ParticipationService;
pub use reports::ReportService;
pub use students::StudentService;
pub use teacher_accounts::TeacherAccountService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{Result, SchoolError};
use crate::storage::{AuditSink, Storage};

/// 一次请求内服务所需的依赖
#[derive(Clone)]
pub struct ServiceContext {
    pub storage: Arc<dyn Storage>,
    pub audit: AuditRecorder,
}

impl ServiceContext {
    pub fn new(
        storage: Arc<dyn Storage>,
        sink: Arc<dyn AuditSink>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            storage,
            audit: AuditRecorder::new(sink, ip_address),
        }
    }

    /// 从 app_data 中取出存储与审计写入端
    pub fn from_request(request: &HttpRequest) -> Result<Self> {
        let storage = request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .ok_or_else(|| SchoolError::internal("Storage not found in app data"))?
            .get_ref()
            .clone();
        let sink = request
            .app_data::<web::Data<Arc<dyn AuditSink>>>()
            .ok_or_else(|| SchoolError::internal("Audit sink not found in app data"))?
            .get_ref()
            .clone();
        let ip_address = request
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string);
        Ok(Self::new(storage, sink, ip_address))
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}

/// 优先使用预设的上下文，否则从请求中构造
pub(crate) fn resolve_context(
    preset: &Option<ServiceContext>,
    request: &HttpRequest,
) -> Result<ServiceContext> {
    match preset {
        Some(ctx) => Ok(ctx.clone()),
        None => ServiceContext::from_request(request),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::ServiceContext;
    use super::audit::FailingAuditSink;
    use crate::models::accounts::requests::NewStaffAccount;
    use crate::models::auth::entities::{Principal, Role};
    use crate::models::teachers::entities::Teacher;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_staff, seed_teacher};

    /// 内存数据库与共享它的服务上下文
    pub(crate) async fn context() -> (Arc<SeaOrmStorage>, ServiceContext) {
        let storage = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let ctx = ServiceContext::new(storage.clone(), storage.clone(), None);
        (storage, ctx)
    }

    /// 审计写入总是失败的上下文
    pub(crate) async fn context_with_failing_audit() -> (Arc<SeaOrmStorage>, ServiceContext) {
        let storage = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let ctx = ServiceContext::new(storage.clone(), Arc::new(FailingAuditSink), None);
        (storage, ctx)
    }

    /// 建立教职工账户并返回对应主体
    pub(crate) async fn staff_principal(storage: &SeaOrmStorage, email: &str, role: Role) -> Principal {
        let account = seed_staff(storage, email, role).await;
        Principal::new(account.id, account.display_name, role)
    }

    /// 建立教师档案并开通关联账户，返回档案与登录主体
    pub(crate) async fn linked_teacher(
        storage: &SeaOrmStorage,
        employee_id: &str,
        email: &str,
    ) -> (Teacher, Principal) {
        let teacher = seed_teacher(storage, employee_id, employee_id).await;
        let view = storage
            .grant_teacher_account_impl(
                teacher.id,
                NewStaffAccount {
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    display_name: employee_id.to_string(),
                    role: Role::Teacher,
                },
            )
            .await
            .unwrap();
        let account = view.account.unwrap();
        (
            view.teacher,
            Principal::new(account.id, account.display_name, Role::Teacher),
        )
    }
}
