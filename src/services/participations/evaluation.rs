//! 活动表现评价
//!
//! 每条参与记录对外只呈现最新的一条评价，保存时更新它或新建。

use tracing::{debug, warn};

use super::get::NOT_FOUND;
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::notifications::entities::RecipientKind;
use crate::models::participations::{
    entities::Participation,
    requests::{NewActivityEvaluation, SaveActivityEvaluationRequest},
    responses::ActivityEvaluationResponse,
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::services::notifications::notify;

async fn participation_or_not_found(ctx: &ServiceContext, id: i64) -> Result<Participation> {
    ctx.storage
        .get_participation_by_id(id)
        .await?
        .ok_or_else(|| SchoolError::not_found(NOT_FOUND))
}

pub async fn get_evaluation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    participation_id: i64,
) -> Result<ActivityEvaluationResponse> {
    require(principal, Resource::Participation, Action::Read)?;
    let participation = participation_or_not_found(ctx, participation_id).await?;
    let evaluation = ctx
        .storage
        .get_latest_activity_evaluation(participation_id)
        .await?;
    Ok(ActivityEvaluationResponse {
        participation,
        evaluation,
    })
}

pub async fn save_evaluation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    participation_id: i64,
    req: SaveActivityEvaluationRequest,
) -> Result<ActivityEvaluationResponse> {
    let principal = require(principal, Resource::ActivityEvaluation, Action::Create)?;
    if !(1..=10).contains(&req.score) {
        return Err(SchoolError::invalid_input("score must be between 1 and 10"));
    }

    let participation = participation_or_not_found(ctx, participation_id).await?;
    let existed = ctx
        .storage
        .get_latest_activity_evaluation(participation_id)
        .await?
        .is_some();

    let evaluation = ctx
        .storage
        .save_activity_evaluation(NewActivityEvaluation {
            participation_id,
            evaluator_id: principal.id,
            score: req.score,
            performance: req.performance,
            strengths: req.strengths,
            improvements: req.improvements,
            comments: req.comments,
        })
        .await?;

    if let Some(student_id) = participation.student_id {
        notify_parent(ctx, student_id, &participation, evaluation.score).await;
    }

    ctx.audit
        .record(
            Some(principal),
            if existed {
                AuditAction::Update
            } else {
                AuditAction::Create
            },
            Resource::ActivityEvaluation,
            Some(evaluation.id),
            Some(serde_json::json!({
                "participation_id": participation_id,
                "score": evaluation.score,
            })),
        )
        .await;

    Ok(ActivityEvaluationResponse {
        participation,
        evaluation: Some(evaluation),
    })
}

async fn notify_parent(
    ctx: &ServiceContext,
    student_id: i64,
    participation: &Participation,
    score: i32,
) {
    let student = match ctx.storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return,
        Err(e) => {
            warn!("查询学生 {} 失败，跳过家长通知: {}", student_id, e);
            return;
        }
    };
    let Some(parent_id) = student.parent_id else {
        debug!("学生 {} 没有关联家长，跳过通知", student.id);
        return;
    };

    let activity = participation.activity_title.as_deref().unwrap_or("an activity");
    notify(
        ctx.storage(),
        parent_id,
        RecipientKind::Parent,
        "activity_evaluation",
        "New activity evaluation",
        format!(
            "{} received a score of {}/10 in {}",
            student.display_name, score, activity
        ),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::entities::Role;
    use crate::models::participations::{
        entities::{ParticipationRole, ParticipationStatus},
        requests::{NewParticipation, Participant},
    };
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::{seed_activity, seed_parent, seed_student};

    fn request(score: i32) -> SaveActivityEvaluationRequest {
        SaveActivityEvaluationRequest {
            score,
            performance: Some("excellent".to_string()),
            strengths: None,
            improvements: None,
            comments: None,
        }
    }

    #[tokio::test]
    async fn test_save_updates_and_notifies_parent() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let parent = seed_parent(&storage, "p@home.test").await;
        let student = seed_student(&storage, "S-1", Some(parent.id)).await;
        let activity = seed_activity(&storage, "Art show", None).await;
        let participation = ctx
            .storage
            .create_participation(NewParticipation {
                activity_id: activity.id,
                participant: Participant::Student(student.id),
                role: ParticipationRole::Presenter,
                status: ParticipationStatus::Attended,
                notes: None,
            })
            .await
            .unwrap();

        let empty = get_evaluation(&ctx, Some(&teacher), participation.id)
            .await
            .unwrap();
        assert!(empty.evaluation.is_none());

        let first = save_evaluation(&ctx, Some(&teacher), participation.id, request(8))
            .await
            .unwrap();
        let second = save_evaluation(&ctx, Some(&teacher), participation.id, request(9))
            .await
            .unwrap();
        let first = first.evaluation.unwrap();
        let second = second.evaluation.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 9);
        assert_eq!(second.evaluator_id, teacher.id);

        let unread = ctx
            .storage
            .count_unread_notifications(parent.id, RecipientKind::Parent)
            .await
            .unwrap();
        assert_eq!(unread, 2);
    }

    #[tokio::test]
    async fn test_score_range_and_missing_participation() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;

        for score in [0, 11] {
            assert_eq!(
                save_evaluation(&ctx, Some(&teacher), 1, request(score))
                    .await
                    .unwrap_err()
                    .code(),
                "E005"
            );
        }
        assert_eq!(
            save_evaluation(&ctx, Some(&teacher), 42, request(5))
                .await
                .unwrap_err(),
            SchoolError::not_found(NOT_FOUND)
        );
        let parent = Principal::new(1, "Mum", Role::Parent);
        assert_eq!(
            get_evaluation(&ctx, Some(&parent), 42).await.unwrap_err().code(),
            "E003"
        );
    }
}
