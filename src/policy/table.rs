//! 资源与操作的权限表
//!
//! 每个资源的每种操作对应一个访问要求，所有处理器都从这里取值。

use tracing::info;

use super::tiers::{Tier, authorize};
use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Teacher,
    Attendance,
    Evaluation,
    Note,
    Activity,
    ActivityCategory,
    Participation,
    ActivityEvaluation,
    Student,
    Parent,
    TeacherAccount,
    Report,
    ParentPortal,
    Department,
    Subject,
    Notification,
    AuditLog,
}

impl Resource {
    pub const ALL: &'static [Resource] = &[
        Resource::Teacher,
        Resource::Attendance,
        Resource::Evaluation,
        Resource::Note,
        Resource::Activity,
        Resource::ActivityCategory,
        Resource::Participation,
        Resource::ActivityEvaluation,
        Resource::Student,
        Resource::Parent,
        Resource::TeacherAccount,
        Resource::Report,
        Resource::ParentPortal,
        Resource::Department,
        Resource::Subject,
        Resource::Notification,
        Resource::AuditLog,
    ];

    /// 审计日志与日志输出中使用的实体名
    pub fn tag(&self) -> &'static str {
        match self {
            Resource::Teacher => "teacher",
            Resource::Attendance => "attendance",
            Resource::Evaluation => "evaluation",
            Resource::Note => "note",
            Resource::Activity => "activity",
            Resource::ActivityCategory => "activity_category",
            Resource::Participation => "participation",
            Resource::ActivityEvaluation => "activity_evaluation",
            Resource::Student => "student",
            Resource::Parent => "parent",
            Resource::TeacherAccount => "teacher_account",
            Resource::Report => "report",
            Resource::ParentPortal => "parent_portal",
            Resource::Department => "department",
            Resource::Subject => "subject",
            Resource::Notification => "notification",
            Resource::AuditLog => "audit_log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: &'static [Action] = &[Action::Read, Action::Create, Action::Update, Action::Delete];
}

/// 访问要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 无需登录
    Public,
    /// 需要属于某个层级
    Tier(Tier),
    /// 该操作不存在
    Unavailable,
}

/// 查询资源操作的访问要求
pub const fn required_access(resource: Resource, action: Action) -> Access {
    use Access::{Public, Tier as T, Unavailable};
    use Action::*;
    use Tier::*;

    match (resource, action) {
        (Resource::Teacher, Read) => T(AllStaff),
        (Resource::Teacher, Create | Update | Delete) => T(Management),

        (Resource::Attendance, Read | Create) => T(AllStaff),
        (Resource::Attendance, Update) => T(Management),
        (Resource::Attendance, Delete) => Unavailable,

        (Resource::Evaluation, Read) => T(AllStaff),
        (Resource::Evaluation, Create) => T(Management),
        (Resource::Evaluation, Update | Delete) => Unavailable,

        (Resource::Note, Read) => T(AllStaff),
        (Resource::Note, Create) => T(Management),
        (Resource::Note, Update | Delete) => Unavailable,

        (Resource::Activity, Read | Create | Update) => T(AllStaff),
        (Resource::Activity, Delete) => T(Management),

        (Resource::ActivityCategory, Read) => Public,
        (Resource::ActivityCategory, Create) => T(Management),
        (Resource::ActivityCategory, Update | Delete) => Unavailable,

        (Resource::Participation, _) => T(AllStaff),

        (Resource::ActivityEvaluation, Read | Create | Update) => T(AllStaff),
        (Resource::ActivityEvaluation, Delete) => Unavailable,

        (Resource::Student, Read) => T(AllStaff),
        (Resource::Student, Create | Update | Delete) => T(Management),

        (Resource::Parent, _) => T(Management),

        (Resource::TeacherAccount, Read | Create | Update) => T(AdminOnly),
        (Resource::TeacherAccount, Delete) => Unavailable,

        (Resource::Report, Read) => T(Management),
        (Resource::Report, _) => Unavailable,

        (Resource::ParentPortal, Read) => T(Parent),
        (Resource::ParentPortal, _) => Unavailable,

        (Resource::Department | Resource::Subject, Read) => T(AllStaff),
        (Resource::Department | Resource::Subject, Create) => T(Management),
        (Resource::Department | Resource::Subject, Update | Delete) => Unavailable,

        (Resource::Notification, Read | Update) => T(AnyPrincipal),
        (Resource::Notification, Create | Delete) => Unavailable,

        (Resource::AuditLog, Read) => T(AdminOnly),
        (Resource::AuditLog, _) => Unavailable,
    }
}

/// 权限检查；在任何持久化调用之前执行
pub fn check(principal: Option<&Principal>, resource: Resource, action: Action) -> Result<()> {
    match required_access(resource, action) {
        Access::Public => Ok(()),
        Access::Tier(tier) => {
            let Some(p) = principal else {
                return Err(SchoolError::unauthenticated("Authentication required"));
            };
            if authorize(principal, tier) {
                Ok(())
            } else {
                info!(
                    "拒绝访问: 主体 {} ({}) 对 {} 执行 {:?}",
                    p.id,
                    p.role,
                    resource.tag(),
                    action
                );
                Err(SchoolError::forbidden("Insufficient permissions"))
            }
        }
        Access::Unavailable => match principal {
            None => Err(SchoolError::unauthenticated("Authentication required")),
            Some(_) => Err(SchoolError::forbidden("Operation not permitted")),
        },
    }
}

/// 权限检查并返回已认证主体
pub fn require<'a>(
    principal: Option<&'a Principal>,
    resource: Resource,
    action: Action,
) -> Result<&'a Principal> {
    check(principal, resource, action)?;
    principal.ok_or_else(|| SchoolError::unauthenticated("Authentication required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchoolError;
    use crate::models::auth::entities::Role;
    use proptest::prelude::*;

    fn principal(role: Role) -> Principal {
        Principal::new(7, "p", role)
    }

    fn arb_resource() -> impl Strategy<Value = Resource> {
        proptest::sample::select(Resource::ALL.to_vec())
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        proptest::sample::select(Action::ALL.to_vec())
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        proptest::sample::select(Role::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn admin_covers_manager(resource in arb_resource(), action in arb_action()) {
            let manager = principal(Role::Manager);
            let admin = principal(Role::Admin);
            if check(Some(&manager), resource, action).is_ok() {
                prop_assert!(check(Some(&admin), resource, action).is_ok());
            }
        }

        #[test]
        fn manager_covers_teacher_on_staff_resources(resource in arb_resource(), action in arb_action()) {
            let teacher = principal(Role::Teacher);
            let manager = principal(Role::Manager);
            if check(Some(&teacher), resource, action).is_ok() {
                prop_assert!(check(Some(&manager), resource, action).is_ok());
            }
        }

        #[test]
        fn anonymous_only_passes_public(resource in arb_resource(), action in arb_action()) {
            let result = check(None, resource, action);
            match required_access(resource, action) {
                Access::Public => prop_assert!(result.is_ok()),
                _ => prop_assert!(matches!(result, Err(SchoolError::Unauthenticated(_)))),
            }
        }

        #[test]
        fn unavailable_is_forbidden_for_everyone(resource in arb_resource(), action in arb_action(), role in arb_role()) {
            if required_access(resource, action) == Access::Unavailable {
                let p = principal(role);
                prop_assert!(matches!(check(Some(&p), resource, action), Err(SchoolError::Forbidden(_))));
            }
        }
    }

    #[test]
    fn test_activity_verbs_use_different_tiers() {
        let teacher = principal(Role::Teacher);
        assert!(check(Some(&teacher), Resource::Activity, Action::Create).is_ok());
        assert!(check(Some(&teacher), Resource::Activity, Action::Update).is_ok());
        assert!(matches!(
            check(Some(&teacher), Resource::Activity, Action::Delete),
            Err(SchoolError::Forbidden(_))
        ));
        assert!(matches!(
            check(Some(&teacher), Resource::ActivityCategory, Action::Create),
            Err(SchoolError::Forbidden(_))
        ));
    }

    #[test]
    fn test_categories_are_public_to_read() {
        assert!(check(None, Resource::ActivityCategory, Action::Read).is_ok());
        assert!(require(None, Resource::ActivityCategory, Action::Read).is_err());
    }

    #[test]
    fn test_teacher_accounts_admin_only() {
        let manager = principal(Role::Manager);
        let admin = principal(Role::Admin);
        assert!(check(Some(&manager), Resource::TeacherAccount, Action::Create).is_err());
        assert!(check(Some(&admin), Resource::TeacherAccount, Action::Create).is_ok());
        assert!(check(Some(&admin), Resource::TeacherAccount, Action::Delete).is_err());
    }

    #[test]
    fn test_parent_cannot_reach_staff_resources() {
        let parent = principal(Role::Parent);
        for resource in [Resource::Teacher, Resource::Student, Resource::Attendance] {
            assert!(matches!(
                check(Some(&parent), resource, Action::Read),
                Err(SchoolError::Forbidden(_))
            ));
        }
        assert!(check(Some(&parent), Resource::ParentPortal, Action::Read).is_ok());
        assert!(check(Some(&parent), Resource::Notification, Action::Read).is_ok());
    }

    #[test]
    fn test_require_returns_principal() {
        let manager = principal(Role::Manager);
        let got = require(Some(&manager), Resource::Student, Action::Create).unwrap();
        assert_eq!(got.id, 7);
    }
}
