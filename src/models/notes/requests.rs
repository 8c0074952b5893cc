use serde::Deserialize;
use ts_rs::TS;

use super::entities::NoteType;
use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub note_type: Option<NoteType>,
}

// 备注列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct NoteListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub note_type: Option<NoteType>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct CreateNoteRequest {
    pub teacher_id: i64,
    pub note_type: NoteType,
    pub content: String,
}

// 写入备注（存储层参数）
#[derive(Debug, Clone)]
pub struct NewNote {
    pub teacher_id: i64,
    pub author_id: i64,
    pub note_type: NoteType,
    pub content: String,
}
