//! 预导入模块，方便使用

pub use super::activities::{Entity as Activities, Model as ActivityModel};
pub use super::activity_categories::{Entity as ActivityCategories, Model as ActivityCategoryModel};
pub use super::activity_evaluations::{
    Entity as ActivityEvaluations, Model as ActivityEvaluationModel,
};
pub use super::attendance::{Entity as Attendance, Model as AttendanceModel};
pub use super::audit_logs::{Entity as AuditLogs, Model as AuditLogModel};
pub use super::departments::{Entity as Departments, Model as DepartmentModel};
pub use super::evaluations::{Entity as Evaluations, Model as EvaluationModel};
pub use super::notes::{Entity as Notes, Model as NoteModel};
pub use super::notifications::{Entity as Notifications, Model as NotificationModel};
pub use super::parent_accounts::{Entity as ParentAccounts, Model as ParentAccountModel};
pub use super::participations::{Entity as Participations, Model as ParticipationModel};
pub use super::staff_accounts::{Entity as StaffAccounts, Model as StaffAccountModel};
pub use super::students::{Entity as Students, Model as StudentModel};
pub use super::subjects::{Entity as Subjects, Model as SubjectModel};
pub use super::teachers::{Entity as Teachers, Model as TeacherModel};
