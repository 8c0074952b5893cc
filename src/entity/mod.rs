//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod activities;
pub mod activity_categories;
pub mod activity_evaluations;
pub mod attendance;
pub mod audit_logs;
pub mod departments;
pub mod evaluations;
pub mod notes;
pub mod notifications;
pub mod parent_accounts;
pub mod participations;
pub mod staff_accounts;
pub mod students;
pub mod subjects;
pub mod teachers;
