//! 配置管理
//!
//! 加载顺序：内置默认值 → `config.toml` → `config.{APP_ENV}.toml` → `SCHOOL_<SECTION>__<KEY>` 环境变量 → 常用环境变量。

mod r#impl;
mod structs;

pub use structs::*;
