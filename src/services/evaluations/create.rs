use tracing::info;

use super::score::{compute_overall_score, parse_score};
use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::evaluations::{
    entities::{Evaluation, EvaluationNotes, EvaluationScores},
    requests::{CreateEvaluationRequest, NewEvaluation},
};
use crate::models::notifications::entities::RecipientKind;
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;
use crate::services::notifications::notify;
use crate::utils::validate::normalize_date;

fn scores_from(req: &CreateEvaluationRequest) -> Result<EvaluationScores> {
    Ok(EvaluationScores {
        teaching_quality: parse_score("teaching_quality", req.teaching_quality.as_ref())?,
        punctuality: parse_score("punctuality", req.punctuality.as_ref())?,
        student_interaction: parse_score("student_interaction", req.student_interaction.as_ref())?,
        curriculum_adherence: parse_score(
            "curriculum_adherence",
            req.curriculum_adherence.as_ref(),
        )?,
        lesson_planning: parse_score("lesson_planning", req.lesson_planning.as_ref())?,
        lesson_execution: parse_score("lesson_execution", req.lesson_execution.as_ref())?,
        classroom_management: parse_score(
            "classroom_management",
            req.classroom_management.as_ref(),
        )?,
        professional_growth: parse_score("professional_growth", req.professional_growth.as_ref())?,
    })
}

/// 创建评估；评估人为当前主体，总分在服务端计算
pub async fn create_evaluation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateEvaluationRequest,
) -> Result<Evaluation> {
    let principal = require(principal, Resource::Evaluation, Action::Create)?;

    let scores = scores_from(&req)?;
    let date = normalize_date("date", req.date.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());

    let teacher = ctx
        .storage
        .get_teacher_by_id(req.teacher_id)
        .await?
        .ok_or_else(|| SchoolError::invalid_input("teacher_id: teacher does not exist"))?;

    let overall_score = compute_overall_score(&scores);
    let evaluation = ctx
        .storage
        .create_evaluation(NewEvaluation {
            teacher_id: teacher.id,
            evaluator_id: principal.id,
            date,
            scores,
            notes: EvaluationNotes {
                lesson_planning_note: req.lesson_planning_note,
                lesson_execution_note: req.lesson_execution_note,
                classroom_management_note: req.classroom_management_note,
                professional_growth_note: req.professional_growth_note,
            },
            overall_score,
            comments: req.comments,
        })
        .await?;

    info!(
        "教师 {} 新增评估 {}，总分 {:.2}",
        teacher.id, evaluation.id, overall_score
    );

    if let Some(account_id) = teacher.linked_account_id {
        notify(
            ctx.storage(),
            account_id,
            RecipientKind::Staff,
            "evaluation",
            "New evaluation",
            format!(
                "You received a new evaluation dated {} with an overall score of {:.2}",
                evaluation.date, overall_score
            ),
        )
        .await;
    }

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Evaluation,
            Some(evaluation.id),
            Some(serde_json::json!({
                "teacher_id": teacher.id,
                "overall_score": overall_score,
            })),
        )
        .await;

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::auth::entities::Role;
    use crate::models::evaluations::requests::EvaluationListParams;
    use crate::services::evaluations::list::list_evaluations;
    use crate::services::test_support::{context, linked_teacher, staff_principal};
    use serde_json::json;

    fn request(teacher_id: i64) -> CreateEvaluationRequest {
        CreateEvaluationRequest {
            teacher_id,
            date: Some("2025-04-10".to_string()),
            teaching_quality: Some(json!(8)),
            punctuality: Some(json!("6")),
            student_interaction: Some(json!(10)),
            curriculum_adherence: Some(json!(8)),
            lesson_planning: None,
            lesson_execution: Some(json!("n/a")),
            classroom_management: None,
            professional_growth: None,
            lesson_planning_note: Some("Clear objectives".to_string()),
            lesson_execution_note: None,
            classroom_management_note: None,
            professional_growth_note: None,
            comments: None,
        }
    }

    #[tokio::test]
    async fn test_create_computes_score_and_notifies() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let (teacher, teacher_principal) =
            linked_teacher(&storage, "T-1", "t1@school.test").await;

        let evaluation = create_evaluation(&ctx, Some(&manager), request(teacher.id))
            .await
            .unwrap();
        assert!((evaluation.overall_score - 7.5).abs() < 1e-9);
        assert_eq!(evaluation.evaluator_id, manager.id);
        assert_eq!(
            evaluation.evaluator_name.as_deref(),
            Some(manager.display_name.as_str())
        );
        assert_eq!(evaluation.teacher_name.as_deref(), Some("T-1"));

        let unread = ctx
            .storage
            .count_unread_notifications(teacher_principal.id, RecipientKind::Staff)
            .await
            .unwrap();
        assert_eq!(unread, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_and_missing_teacher() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let (teacher, _) = linked_teacher(&storage, "T-1", "t1@school.test").await;

        let mut req = request(teacher.id);
        req.punctuality = Some(json!(12));
        let err = create_evaluation(&ctx, Some(&manager), req).await.unwrap_err();
        assert_eq!(err.code(), "E005");

        let err = create_evaluation(&ctx, Some(&manager), request(teacher.id + 50))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_teacher_listing_is_scoped() {
        let (storage, ctx) = context().await;
        let manager = staff_principal(&storage, "m@school.test", Role::Manager).await;
        let (own, principal) = linked_teacher(&storage, "T-1", "t1@school.test").await;
        let (other, _) = linked_teacher(&storage, "T-2", "t2@school.test").await;
        let unlinked = staff_principal(&storage, "new@school.test", Role::Teacher).await;
        create_evaluation(&ctx, Some(&manager), request(own.id))
            .await
            .unwrap();
        create_evaluation(&ctx, Some(&manager), request(other.id))
            .await
            .unwrap();

        let params = |teacher_id| EvaluationListParams {
            pagination: PaginationQuery::default(),
            teacher_id,
            start_date: None,
            end_date: None,
        };
        let mine = list_evaluations(&ctx, Some(&principal), params(Some(other.id)))
            .await
            .unwrap();
        assert_eq!(mine.pagination.total, 1);
        assert_eq!(mine.items[0].teacher_id, own.id);

        let empty = list_evaluations(&ctx, Some(&unlinked), params(None))
            .await
            .unwrap();
        assert_eq!(empty.pagination.total, 0);

        let err = create_evaluation(&ctx, Some(&principal), request(own.id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }
}
