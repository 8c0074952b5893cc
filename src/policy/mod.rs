//! 权限策略
//!
//! - `tiers`：角色层级与 `authorize`
//! - `table`：资源与操作到访问要求的映射
//! - `scope`：按主体计算的数据作用域

pub mod scope;
pub mod table;
pub mod tiers;

pub use scope::{DataScope, TeacherFilter, scope_for};
pub use table::{Access, Action, Resource, check, require, required_access};
pub use tiers::{Tier, authorize, is_management};
