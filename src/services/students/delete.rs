use tracing::info;

use super::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

pub async fn delete_student(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    id: i64,
) -> Result<()> {
    let principal = require(principal, Resource::Student, Action::Delete)?;

    if !ctx.storage.delete_student(id).await? {
        return Err(SchoolError::not_found(NOT_FOUND));
    }
    info!("学生 {} 已被 {} 删除", id, principal.id);

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Delete,
            Resource::Student,
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
    async fn test_delete_removes_participations_and_evaluations() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let student = seed_student(&storage, "S-1", None).await;
        let kept = seed_student(&storage, "S-2", None).await;

        let mut participation_ids = Vec::new();
        for title in ["Choir", "Science fair", "Marathon"] {
            let activity = seed_activity(&storage, title, None).await;
            for participant in [student.id, kept.id] {
                let participation = ctx
                    .storage
                    .create_participation(NewParticipation {
                        activity_id: activity.id,
                        participant: Participant::Student(participant),
                        role: ParticipationRole::Participant,
                        status: ParticipationStatus::Completed,
                        notes: None,
                    })
                    .await
                    .unwrap();
                ctx.storage
                    .save_activity_evaluation(NewActivityEvaluation {
                        participation_id: participation.id,
                        evaluator_id: manager.id,
                        score: 6,
                        performance: None,
                        strengths: None,
                        improvements: None,
                        comments: None,
                    })
                    .await
                    .unwrap();
                if participant == student.id {
                    participation_ids.push(participation.id);
                }
            }
        }

        delete_student(&ctx, Some(&manager), student.id).await.unwrap();

        assert!(ctx.storage.get_student_by_id(student.id).await.unwrap().is_none());
        assert!(
            ctx.storage
                .list_participations_by_student(student.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            ctx.storage
                .list_activity_evaluations_for(&participation_ids)
                .await
                .unwrap()
                .is_empty()
        );
        // 其他学生的记录保持不变
        assert_eq!(
            ctx.storage
                .list_participations_by_student(kept.id)
                .await
                .unwrap()
                .len(),
            3
        );
        assert_eq!(
            delete_student(&ctx, Some(&manager), student.id)
                .await
                .unwrap_err()
                .code(),
            "E004"
        );
    }
}
