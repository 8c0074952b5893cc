use crate::errors::{Result, SchoolError};
use crate::models::activities::{entities::Activity, requests::CreateActivityRequest};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::utils::validate::{normalize_date_range, normalize_time, require_text};

/// 人数上限必须为正数
pub(super) fn check_capacity(max_participants: Option<i32>) -> Result<()> {
    match max_participants {
        Some(n) if n < 1 => Err(SchoolError::invalid_input(
            "max_participants must be at least 1",
        )),
        _ => Ok(()),
    }
}

pub async fn create_activity(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    mut req: CreateActivityRequest,
) -> Result<Activity> {
    let principal = require(principal, Resource::Activity, Action::Create)?;

    require_text("title", &req.title)?;
    req.title = req.title.trim().to_string();
    let (date, end_date) = normalize_date_range(Some(&req.date), req.end_date.as_deref())?;
    req.date = date.ok_or_else(|| SchoolError::invalid_input("date is required"))?;
    req.end_date = end_date;
    req.time = normalize_time("time", req.time.as_deref())?;
    check_capacity(req.max_participants)?;

    let activity = ctx.storage.create_activity(principal.id, req).await?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Activity,
            Some(activity.id),
            Some(serde_json::json!({ "title": activity.title, "date": activity.date })),
        )
        .await;

    Ok(activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::requests::CreateActivityCategoryRequest;
    use crate::models::auth::entities::Role;
    use crate::services::activities::get::get_activity;
    use crate::services::test_support::{context, staff_principal};

    fn request(category_id: i64) -> CreateActivityRequest {
        CreateActivityRequest {
            category_id,
            responsible_teacher_id: None,
            title: " Chess club ".to_string(),
            description: None,
            date: "2025-04-10".to_string(),
            end_date: None,
            time: Some("14:00".to_string()),
            location: Some("Library".to_string()),
            status: None,
            max_participants: Some(12),
        }
    }

    #[tokio::test]
    async fn test_teacher_can_create_activity() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let category = ctx
            .storage
            .create_activity_category(CreateActivityCategoryRequest {
                name: "Clubs".to_string(),
                description: None,
                icon: None,
                color: None,
            })
            .await
            .unwrap();

        let activity = create_activity(&ctx, Some(&teacher), request(category.id))
            .await
            .unwrap();
        assert_eq!(activity.title, "Chess club");
        assert_eq!(activity.created_by, Some(teacher.id));
        assert_eq!(activity.category_name.as_deref(), Some("Clubs"));

        let fetched = get_activity(&ctx, Some(&teacher), activity.id).await.unwrap();
        assert_eq!(fetched.participant_count, 0);
        assert_eq!(
            get_activity(&ctx, Some(&teacher), activity.id + 1)
                .await
                .unwrap_err(),
            SchoolError::not_found("Activity not found")
        );
    }

    #[tokio::test]
    async fn test_invalid_fields_are_rejected() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;

        let mut bad_date = request(1);
        bad_date.date = "10/04/2025".to_string();
        assert_eq!(
            create_activity(&ctx, Some(&manager), bad_date)
                .await
                .unwrap_err()
                .code(),
            "E007"
        );

        let mut inverted = request(1);
        inverted.end_date = Some("2025-04-01".to_string());
        assert_eq!(
            create_activity(&ctx, Some(&manager), inverted)
                .await
                .unwrap_err()
                .code(),
            "E005"
        );

        let mut empty = request(1);
        empty.max_participants = Some(0);
        assert_eq!(
            create_activity(&ctx, Some(&manager), empty)
                .await
                .unwrap_err()
                .code(),
            "E005"
        );

        // 分类不存在时外键约束转为输入错误
        assert_eq!(
            create_activity(&ctx, Some(&manager), request(999))
                .await
                .unwrap_err()
                .code(),
            "E005"
        );
    }
}
