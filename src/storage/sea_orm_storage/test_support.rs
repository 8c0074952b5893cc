//! 测试数据构造

use super::SeaOrmStorage;
use crate::models::{
    accounts::{
        entities::{ParentAccount, StaffAccount},
        requests::NewStaffAccount,
    },
    activities::{
        entities::Activity,
        requests::{CreateActivityCategoryRequest, CreateActivityRequest},
    },
    auth::entities::Role,
    parents::requests::NewParentAccount,
    students::{entities::Student, requests::CreateStudentRequest},
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};

pub(crate) async fn seed_staff(storage: &SeaOrmStorage, email: &str, role: Role) -> StaffAccount {
    storage
        .create_staff_account_impl(NewStaffAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: format!("{role} {email}"),
            role,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_teacher(storage: &SeaOrmStorage, employee_id: &str, name: &str) -> Teacher {
    storage
        .create_teacher_impl(CreateTeacherRequest {
            employee_id: employee_id.to_string(),
            display_name: name.to_string(),
            department_id: None,
            subject_id: None,
            status: None,
            email: None,
            phone: None,
            hire_date: None,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_parent(storage: &SeaOrmStorage, email: &str) -> ParentAccount {
    storage
        .create_parent_account_impl(NewParentAccount {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            display_name: "Parent".to_string(),
            phone: None,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_student(
    storage: &SeaOrmStorage,
    code: &str,
    parent_id: Option<i64>,
) -> Student {
    storage
        .create_student_impl(CreateStudentRequest {
            student_code: code.to_string(),
            display_name: format!("Student {code}"),
            grade: "5".to_string(),
            parent_id,
        })
        .await
        .unwrap()
}

/// 每个活动使用独立的分类，分类名唯一
pub(crate) async fn seed_activity(
    storage: &SeaOrmStorage,
    title: &str,
    max_participants: Option<i32>,
) -> Activity {
    let category = storage
        .create_activity_category_impl(CreateActivityCategoryRequest {
            name: format!("{title} category"),
            description: None,
            icon: None,
            color: None,
        })
        .await
        .unwrap();

    storage
        .create_activity_impl(
            1,
            CreateActivityRequest {
                category_id: category.id,
                responsible_teacher_id: None,
                title: title.to_string(),
                description: None,
                date: "2025-05-01".to_string(),
                end_date: None,
                time: None,
                location: None,
                status: None,
                max_participants,
            },
        )
        .await
        .unwrap()
}
