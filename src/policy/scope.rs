//! 数据作用域
//!
//! 在权限检查通过之后，决定主体能看到哪些行。

use super::table::Resource;
use crate::errors::Result;
use crate::models::auth::entities::{Principal, Role};
use crate::storage::Storage;

/// 主体对某类资源的可见范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataScope {
    /// 不限制
    Unrestricted,
    /// 仅限关联的教师档案；`None` 表示账户尚未关联档案
    Teacher(Option<i64>),
    /// 仅限该家长的子女
    Parent(i64),
}

/// 按教师过滤的查询条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeacherFilter {
    Any,
    Only(i64),
    /// 结果必为空，无需查询
    Nothing,
}

impl TeacherFilter {
    /// 转为存储层的 teacher_id 筛选；`Nothing` 返回 `None`
    pub fn as_query(&self) -> Option<Option<i64>> {
        match self {
            TeacherFilter::Any => Some(None),
            TeacherFilter::Only(id) => Some(Some(*id)),
            TeacherFilter::Nothing => None,
        }
    }
}

impl DataScope {
    /// 合并作用域与请求中的教师筛选；教师本人的作用域优先于请求参数
    pub fn teacher_filter(&self, requested: Option<i64>) -> TeacherFilter {
        match self {
            DataScope::Unrestricted => match requested {
                Some(id) => TeacherFilter::Only(id),
                None => TeacherFilter::Any,
            },
            DataScope::Teacher(Some(own)) => TeacherFilter::Only(*own),
            DataScope::Teacher(None) | DataScope::Parent(_) => TeacherFilter::Nothing,
        }
    }

    /// 记录属于该教师时是否可见
    pub fn permits_teacher(&self, teacher_id: i64) -> bool {
        match self {
            DataScope::Unrestricted => true,
            DataScope::Teacher(own) => *own == Some(teacher_id),
            DataScope::Parent(_) => false,
        }
    }

    /// 学生的家长为 `parent_id` 时是否可见
    pub fn permits_parent_of(&self, parent_id: Option<i64>) -> bool {
        match self {
            DataScope::Unrestricted => true,
            DataScope::Teacher(_) => false,
            DataScope::Parent(own) => parent_id == Some(*own),
        }
    }
}

/// 受教师作用域限制的资源
fn is_teacher_scoped(resource: Resource) -> bool {
    matches!(
        resource,
        Resource::Teacher | Resource::Attendance | Resource::Evaluation | Resource::Note
    )
}

/// 计算主体对资源的数据作用域
///
/// 教师访问档案类资源时查找其关联的教师档案；没有关联不是错误。
pub async fn scope_for(
    storage: &dyn Storage,
    principal: &Principal,
    resource: Resource,
) -> Result<DataScope> {
    match principal.role {
        Role::Admin | Role::Manager => Ok(DataScope::Unrestricted),
        Role::Teacher if is_teacher_scoped(resource) => {
            let profile = storage.get_teacher_by_linked_account(principal.id).await?;
            Ok(DataScope::Teacher(profile.map(|t| t.id)))
        }
        Role::Teacher => Ok(DataScope::Unrestricted),
        Role::Parent => Ok(DataScope::Parent(principal.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::requests::NewStaffAccount;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{seed_staff, seed_teacher};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn teacher_scope_ignores_requested_id(own in 1i64..1000, requested in proptest::option::of(1i64..1000)) {
            let scope = DataScope::Teacher(Some(own));
            prop_assert_eq!(scope.teacher_filter(requested), TeacherFilter::Only(own));
        }

        #[test]
        fn unlinked_teacher_sees_nothing(requested in proptest::option::of(1i64..1000)) {
            prop_assert_eq!(DataScope::Teacher(None).teacher_filter(requested), TeacherFilter::Nothing);
        }

        #[test]
        fn parent_sees_only_own_children(own in 1i64..1000, other in proptest::option::of(1i64..1000)) {
            let scope = DataScope::Parent(own);
            prop_assert_eq!(scope.permits_parent_of(other), other == Some(own));
        }
    }

    #[test]
    fn test_unrestricted_passes_request_through() {
        assert_eq!(
            DataScope::Unrestricted.teacher_filter(Some(3)),
            TeacherFilter::Only(3)
        );
        assert_eq!(DataScope::Unrestricted.teacher_filter(None), TeacherFilter::Any);
        assert_eq!(TeacherFilter::Nothing.as_query(), None);
        assert_eq!(TeacherFilter::Only(4).as_query(), Some(Some(4)));
    }

    #[test]
    fn test_point_lookup_checks() {
        assert!(DataScope::Teacher(Some(1)).permits_teacher(1));
        assert!(!DataScope::Teacher(Some(1)).permits_teacher(2));
        assert!(!DataScope::Teacher(None).permits_teacher(1));
        assert!(!DataScope::Teacher(Some(1)).permits_parent_of(Some(1)));
        assert!(DataScope::Unrestricted.permits_parent_of(None));
    }

    #[tokio::test]
    async fn test_scope_for_roles() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = seed_teacher(&storage, "T-900", "Dana").await;
        let view = storage
            .grant_teacher_account(
                teacher.id,
                NewStaffAccount {
                    email: "dana@school.test".to_string(),
                    password_hash: "hash".to_string(),
                    display_name: "Dana".to_string(),
                    role: Role::Teacher,
                },
            )
            .await
            .unwrap();
        let account = view.account.unwrap();
        let unlinked = seed_staff(&storage, "new@school.test", Role::Teacher).await;

        let linked_principal = Principal::new(account.id, "Dana", Role::Teacher);
        let unlinked_principal = Principal::new(unlinked.id, "New", Role::Teacher);
        let manager = Principal::new(99, "Boss", Role::Manager);
        let parent = Principal::new(7, "Mum", Role::Parent);

        assert_eq!(
            scope_for(&storage, &linked_principal, Resource::Attendance)
                .await
                .unwrap(),
            DataScope::Teacher(Some(teacher.id))
        );
        assert_eq!(
            scope_for(&storage, &unlinked_principal, Resource::Note)
                .await
                .unwrap(),
            DataScope::Teacher(None)
        );
        assert_eq!(
            scope_for(&storage, &linked_principal, Resource::Activity)
                .await
                .unwrap(),
            DataScope::Unrestricted
        );
        assert_eq!(
            scope_for(&storage, &manager, Resource::Attendance)
                .await
                .unwrap(),
            DataScope::Unrestricted
        );
        assert_eq!(
            scope_for(&storage, &parent, Resource::ParentPortal)
                .await
                .unwrap(),
            DataScope::Parent(7)
        );
    }
}
