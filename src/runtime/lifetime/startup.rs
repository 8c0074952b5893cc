use crate::errors::Result;
use crate::models::accounts::requests::NewStaffAccount;
use crate::models::auth::entities::Role;
use crate::storage::{AuditSink, Storage};
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 默认管理员登录邮箱
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@school.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub audit: Arc<dyn AuditSink>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何教职工账户，则创建一个 admin 账户
pub async fn seed_admin(storage: &Arc<dyn Storage>, password: Option<String>) {
    match storage.count_staff_accounts().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} staff account(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No staff accounts found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count staff accounts: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先使用传入值，否则生成随机密码
    let password = password.unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let account = NewStaffAccount {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        display_name: "Administrator".to_string(),
        role: Role::Admin,
    };

    match storage.create_staff_account(account).await {
        Ok(admin) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                admin.id, admin.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括加密提供者、存储与审计写入端
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let (storage, audit) = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage, std::env::var("ADMIN_PASSWORD").ok()).await;

    Ok(StartupContext { storage, audit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[test]
    fn test_generated_password_length() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
    }

    #[tokio::test]
    async fn test_seed_admin_runs_once() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());

        seed_admin(&storage, Some("Admin12345".to_string())).await;
        let admin = storage
            .get_staff_account_by_email(DEFAULT_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        seed_admin(&storage, Some("Other12345".to_string())).await;
        assert_eq!(storage.count_staff_accounts().await.unwrap(), 1);
    }
}
