//! 权限层级

use crate::models::auth::entities::{Principal, Role};

/// 权限层级：一组被允许的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// admin、manager、teacher
    AllStaff,
    /// admin、manager
    Management,
    /// 仅 admin
    AdminOnly,
    /// 仅 parent
    Parent,
    /// 任意已认证主体，用于只访问本人数据的资源
    AnyPrincipal,
}

impl Tier {
    pub const ALL: &'static [Tier] = &[
        Tier::AllStaff,
        Tier::Management,
        Tier::AdminOnly,
        Tier::Parent,
        Tier::AnyPrincipal,
    ];

    pub fn roles(&self) -> &'static [Role] {
        match self {
            Tier::AllStaff => &[Role::Admin, Role::Manager, Role::Teacher],
            Tier::Management => &[Role::Admin, Role::Manager],
            Tier::AdminOnly => &[Role::Admin],
            Tier::Parent => &[Role::Parent],
            Tier::AnyPrincipal => &[Role::Admin, Role::Manager, Role::Teacher, Role::Parent],
        }
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

/// 主体是否属于该层级；未认证主体不属于任何层级
pub fn authorize(principal: Option<&Principal>, tier: Tier) -> bool {
    principal.is_some_and(|p| tier.contains(p.role))
}

/// 是否为管理层（不受数据作用域限制）
pub fn is_management(principal: &Principal) -> bool {
    Tier::Management.contains(principal.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new(1, "p", role)
    }

    #[test]
    fn test_tier_membership() {
        assert!(authorize(Some(&principal(Role::Teacher)), Tier::AllStaff));
        assert!(!authorize(Some(&principal(Role::Teacher)), Tier::Management));
        assert!(authorize(Some(&principal(Role::Manager)), Tier::Management));
        assert!(!authorize(Some(&principal(Role::Manager)), Tier::AdminOnly));
        assert!(!authorize(Some(&principal(Role::Parent)), Tier::AllStaff));
        assert!(authorize(Some(&principal(Role::Parent)), Tier::Parent));
    }

    #[test]
    fn test_none_is_never_authorized() {
        for tier in Tier::ALL {
            assert!(!authorize(None, *tier));
        }
    }

    #[test]
    fn test_tiers_are_nested() {
        for role in Tier::AdminOnly.roles() {
            assert!(Tier::Management.contains(*role));
        }
        for role in Tier::Management.roles() {
            assert!(Tier::AllStaff.contains(*role));
        }
    }
}
