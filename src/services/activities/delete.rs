use tracing::info;

use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn delete_activity(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<()> {
    let principal = require(principal, Resource::Activity, Action::Delete)?;

    if !ctx.storage.delete_activity(id).await? {
        return Err(SchoolError::not_found("Activity not found"));
    }
    info!("活动 {} 已被 {} 删除", id, principal.id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Delete,
            Resource::Activity,
            Some(id),
            None,
        )
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::models::participations::{
        entities::{ParticipationRole, ParticipationStatus},
        requests::{NewActivityEvaluation, NewParticipation, Participant},
    };
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::{seed_activity, seed_student};

    #[tokio::test]
    async fn test_delete_cascades_participations() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let activity = seed_activity(&storage, "Robotics", None).await;
        let student = seed_student(&storage, "S-1", None).await;
        let participation = ctx
            .storage
            .create_participation(NewParticipation {
                activity_id: activity.id,
                participant: Participant::Student(student.id),
                role: ParticipationRole::Participant,
                status: ParticipationStatus::Registered,
                notes: None,
            })
            .await
            .unwrap();
        ctx.storage
            .save_activity_evaluation(NewActivityEvaluation {
                participation_id: participation.id,
                evaluator_id: manager.id,
                score: 9,
                performance: None,
                strengths: None,
                improvements: None,
                comments: None,
            })
            .await
            .unwrap();

        // 教师不能删除活动
        assert_eq!(
            delete_activity(&ctx, Some(&teacher), activity.id)
                .await
                .unwrap_err()
                .code(),
            "E003"
        );

        delete_activity(&ctx, Some(&manager), activity.id).await.unwrap();
        assert!(ctx.storage.get_activity_by_id(activity.id).await.unwrap().is_none());
        assert!(
            ctx.storage
                .get_participation_by_id(participation.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            ctx.storage
                .list_activity_evaluations_for(&[participation.id])
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            delete_activity(&ctx, Some(&manager), activity.id)
                .await
                .unwrap_err()
                .code(),
            "E004"
        );
    }
}
