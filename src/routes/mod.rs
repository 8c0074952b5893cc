pub mod activities;

pub mod attendance;

pub mod audit_logs;

pub mod auth;

pub mod evaluations;

pub mod lookups;

pub mod notes;

pub mod notifications;

pub mod parents;

pub mod participations;

pub mod reports;

pub mod students;

pub mod teacher_accounts;

pub mod teachers;

pub use activities::configure_activity_routes;
pub use attendance::configure_attendance_routes;
pub use audit_logs::configure_audit_log_routes;
pub use auth::configure_auth_routes;
pub use evaluations::configure_evaluation_routes;
pub use lookups::configure_lookup_routes;
pub use notes::configure_note_routes;
pub use notifications::configure_notification_routes;
pub use parents::configure_parent_routes;
pub use participations::configure_participation_routes;
pub use reports::configure_report_routes;
pub use students::configure_student_routes;
pub use teacher_accounts::configure_teacher_account_routes;
pub use teachers::configure_teacher_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_teacher_routes(cfg);
    configure_teacher_account_routes(cfg);
    configure_attendance_routes(cfg);
    configure_evaluation_routes(cfg);
    configure_note_routes(cfg);
    configure_activity_routes(cfg);
    configure_participation_routes(cfg);
    configure_student_routes(cfg);
    configure_parent_routes(cfg);
    configure_notification_routes(cfg);
    configure_lookup_routes(cfg);
    configure_audit_log_routes(cfg);
    configure_report_routes(cfg);
}
