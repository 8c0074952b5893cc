use std::collections::HashMap;

use crate::errors::{Result, SchoolError};
use crate::models::auth::entities::Principal;
use crate::models::participations::entities::ActivityEvaluation;
use crate::models::parents::responses::{ChildOverviewResponse, ChildParticipation};
use crate::policy::{Action, Resource, require, scope_for};
use crate::services::ServiceContext;
use crate::services::students::NOT_FOUND;

/// 子女概览：参与的活动及每次参与的评价
///
/// 其他家长的子女与不存在的学生返回同样的 NotFound。
pub async fn child_overview(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    student_id: i64,
) -> Result<ChildOverviewResponse> {
    let principal = require(principal, Resource::ParentPortal, Action::Read)?;
    let scope = scope_for(ctx.storage(), principal, Resource::ParentPortal).await?;

    let student = match ctx.storage.get_student_by_id(student_id).await? {
        Some(student) if scope.permits_parent_of(student.parent_id) => student,
        _ => return Err(SchoolError::not_found(NOT_FOUND)),
    };

    let participations = ctx.storage.list_participations_by_student(student.id).await?;
    let activity_ids: Vec<i64> = participations.iter().map(|p| p.activity_id).collect();
    let participation_ids: Vec<i64> = participations.iter().map(|p| p.id).collect();

    let activities: HashMap<i64, _> = ctx
        .storage
        .list_activities_by_ids(&activity_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let mut evaluations: HashMap<i64, Vec<ActivityEvaluation>> = HashMap::new();
    for evaluation in ctx
        .storage
        .list_activity_evaluations_for(&participation_ids)
        .await?
    {
        evaluations
            .entry(evaluation.participation_id)
            .or_default()
            .push(evaluation);
    }

    let participations = participations
        .into_iter()
        .map(|participation| ChildParticipation {
            activity: activities.get(&participation.activity_id).cloned(),
            evaluations: evaluations.remove(&participation.id).unwrap_or_default(),
            participation,
        })
        .collect();

    Ok(ChildOverviewResponse {
        student,
        participations,
    })
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
    use crate::storage::sea_orm_storage::test_support::{seed_activity, seed_parent, seed_student};

    #[tokio::test]
    async fn test_overview_includes_activities_and_evaluations() {
        let (storage, ctx) = context().await;
        let coach = staff_principal(&storage, "coach@school.test", Role::Teacher).await;
        let mum = seed_parent(&storage, "mum@home.test").await;
        let child = seed_student(&storage, "S-1", Some(mum.id)).await;
        let rowing = seed_activity(&storage, "Rowing", None).await;
        let drama = seed_activity(&storage, "Drama", None).await;

        for activity in [&rowing, &drama] {
            let participation = ctx
                .storage
                .create_participation(NewParticipation {
                    activity_id: activity.id,
                    participant: Participant::Student(child.id),
                    role: ParticipationRole::Participant,
                    status: ParticipationStatus::Attended,
                    notes: None,
                })
                .await
                .unwrap();
            if activity.id == rowing.id {
                ctx.storage
                    .save_activity_evaluation(NewActivityEvaluation {
                        participation_id: participation.id,
                        evaluator_id: coach.id,
                        score: 10,
                        performance: Some("outstanding".to_string()),
                        strengths: None,
                        improvements: None,
                        comments: None,
                    })
                    .await
                    .unwrap();
            }
        }

        let principal = Principal::new(mum.id, "Parent", Role::Parent);
        let overview = child_overview(&ctx, Some(&principal), child.id).await.unwrap();
        assert_eq!(overview.student.id, child.id);
        assert_eq!(overview.participations.len(), 2);
        for entry in &overview.participations {
            let activity = entry.activity.as_ref().unwrap();
            assert_eq!(activity.id, entry.participation.activity_id);
            if activity.id == rowing.id {
                assert_eq!(entry.evaluations.len(), 1);
                assert_eq!(entry.evaluations[0].score, 10);
            } else {
                assert!(entry.evaluations.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_other_parents_child_looks_missing() {
        let (storage, ctx) = context().await;
        let mum = seed_parent(&storage, "mum@home.test").await;
        let other = seed_parent(&storage, "other@home.test").await;
        let foreign = seed_student(&storage, "S-9", Some(other.id)).await;
        let orphan = seed_student(&storage, "S-10", None).await;

        let principal = Principal::new(mum.id, "Parent", Role::Parent);
        let hidden = child_overview(&ctx, Some(&principal), foreign.id)
            .await
            .unwrap_err();
        let missing = child_overview(&ctx, Some(&principal), foreign.id + 100)
            .await
            .unwrap_err();
        assert_eq!(hidden, missing);
        assert_eq!(hidden, SchoolError::not_found(NOT_FOUND));
        assert_eq!(
            child_overview(&ctx, Some(&principal), orphan.id)
                .await
                .unwrap_err(),
            missing
        );
    }
}
