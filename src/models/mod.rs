//! 数据模型定义
//!
//! 每个资源分为 entities（业务实体）、requests（请求与存储层参数）、responses（响应）。

pub mod accounts;
pub mod activities;
pub mod attendance;
pub mod audit;
pub mod auth;
pub mod common;
pub mod evaluations;
pub mod lookups;
pub mod notes;
pub mod notifications;
pub mod parents;
pub mod participations;
pub mod reports;
pub mod students;
pub mod teachers;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};
