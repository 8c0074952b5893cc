//! 备注存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::notes::{ActiveModel, Column, Entity as Notes, Model};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    notes::{
        entities::Note,
        requests::{NewNote, NoteListQuery},
        responses::NoteListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建备注
    pub async fn create_note_impl(&self, req: NewNote) -> Result<Note> {
        let model = ActiveModel {
            teacher_id: Set(req.teacher_id),
            author_id: Set(req.author_id),
            note_type: Set(req.note_type.to_string()),
            content: Set(req.content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("Note"))?;

        self.attach_note_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::internal("备注转换结果为空"))
    }

    /// 通过 ID 获取备注
    pub async fn get_note_by_id_impl(&self, id: i64) -> Result<Option<Note>> {
        let result = Notes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注失败: {e}")))?;

        match result {
            Some(model) => Ok(self.attach_note_names(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出备注
    pub async fn list_notes_impl(&self, query: NoteListQuery) -> Result<NoteListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Notes::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(note_type) = query.note_type {
            select = select.filter(Column::NoteType.eq(note_type.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询备注列表失败: {e}")))?;

        let items = self.attach_note_names(models).await?;

        Ok(NoteListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    async fn attach_note_names(&self, models: Vec<Model>) -> Result<Vec<Note>> {
        let teacher_ids: Vec<i64> = models
            .iter()
            .map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let author_ids: Vec<i64> = models
            .iter()
            .map(|m| m.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let teachers = self.teacher_names_impl(teacher_ids).await?;
        let authors = self.staff_names_impl(author_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher_name = teachers.get(&m.teacher_id).cloned();
                let author_name = authors.get(&m.author_id).cloned();
                m.into_note(teacher_name, author_name)
            })
            .collect())
    }
}
