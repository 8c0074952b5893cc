use crate::errors::{Result, SchoolError};
use crate::models::audit::entities::AuditAction;
use crate::models::auth::entities::Principal;
use crate::models::participations::{
    entities::{Participation, ParticipationRole, ParticipationStatus},
    requests::{CreateParticipationRequest, NewParticipation, Participant},
};
use crate::policy::{Action, Resource, require};
use crate::services::ServiceContext;

/// 学生与教职工必须恰好指定其一
pub fn participant_of(student_id: Option<i64>, teacher_id: Option<i64>) -> Result<Participant> {
    match (student_id, teacher_id) {
        (Some(student), None) => Ok(Participant::Student(student)),
        (None, Some(teacher)) => Ok(Participant::Teacher(teacher)),
        (Some(_), Some(_)) => Err(SchoolError::invalid_input(
            "A participation cannot reference both a student and a teacher",
        )),
        (None, None) => Err(SchoolError::invalid_input(
            "Either student_id or teacher_id is required",
        )),
    }
}

pub async fn create_participation(
    ctx: &ServiceContext,
    principal: Option<&Principal>,
    req: CreateParticipationRequest,
) -> Result<Participation> {
    let principal = require(principal, Resource::Participation, Action::Create)?;
    let participant = participant_of(req.student_id, req.teacher_id)?;

    let participation = ctx
        .storage
        .create_participation(NewParticipation {
            activity_id: req.activity_id,
            participant,
            role: req.role.unwrap_or(ParticipationRole::Participant),
            status: req.status.unwrap_or(ParticipationStatus::Registered),
            notes: req.notes,
        })
        .await?;

    ctx.audit
        .record(
            Some(principal),
            AuditAction::Create,
            Resource::Participation,
            Some(participation.id),
            Some(serde_json::json!({
                "activity_id": participation.activity_id,
                "student_id": participation.student_id,
                "teacher_id": participation.teacher_id,
            })),
        )
        .await;

    Ok(participation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::auth::entities::Role;
    use crate::models::participations::requests::ParticipationListParams;
    use crate::services::participations::list::list_participations;
    use crate::services::test_support::{context, staff_principal};
    use crate::storage::sea_orm_storage::test_support::{seed_activity, seed_student, seed_teacher};
    use proptest::prelude::*;

    fn request(
        activity_id: i64,
        student_id: Option<i64>,
        teacher_id: Option<i64>,
    ) -> CreateParticipationRequest {
        CreateParticipationRequest {
            activity_id,
            student_id,
            teacher_id,
            role: None,
            status: None,
            notes: None,
        }
    }

    proptest! {
        #[test]
        fn test_exactly_one_participant(student in proptest::option::of(1i64..1000), teacher in proptest::option::of(1i64..1000)) {
            let result = participant_of(student, teacher);
            prop_assert_eq!(result.is_ok(), student.is_some() != teacher.is_some());
        }
    }

    #[tokio::test]
    async fn test_invalid_participant_is_rejected_before_write() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let activity = seed_activity(&storage, "Debate", None).await;
        let student = seed_student(&storage, "S-1", None).await;
        let profile = seed_teacher(&storage, "T-1", "Coach").await;

        let both = create_participation(
            &ctx,
            Some(&teacher),
            request(activity.id, Some(student.id), Some(profile.id)),
        )
        .await
        .unwrap_err();
        assert_eq!(both.code(), "E005");
        let neither = create_participation(&ctx, Some(&teacher), request(activity.id, None, None))
            .await
            .unwrap_err();
        assert_eq!(neither.code(), "E005");

        let listed = list_participations(
            &ctx,
            Some(&teacher),
            ParticipationListParams {
                pagination: PaginationQuery::default(),
                activity_id: Some(activity.id),
                student_id: None,
                teacher_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(listed.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_defaults_and_capacity() {
        let (storage, ctx) = context().await;
        let teacher = staff_principal(&storage, "t@school.test", Role::Teacher).await;
        let activity = seed_activity(&storage, "Trip", Some(1)).await;
        let first = seed_student(&storage, "S-1", None).await;
        let second = seed_student(&storage, "S-2", None).await;

        let participation =
            create_participation(&ctx, Some(&teacher), request(activity.id, Some(first.id), None))
                .await
                .unwrap();
        assert_eq!(participation.role, ParticipationRole::Participant);
        assert_eq!(participation.status, ParticipationStatus::Registered);
        assert_eq!(participation.student_name.as_deref(), Some("Student S-1"));

        let full =
            create_participation(&ctx, Some(&teacher), request(activity.id, Some(second.id), None))
                .await
                .unwrap_err();
        assert_eq!(full, SchoolError::invalid_input("Activity is full"));
    }
}
