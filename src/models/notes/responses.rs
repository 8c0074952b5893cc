use serde::Serialize;
use ts_rs::TS;

use super::entities::Note;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteListResponse {
    pub items: Vec<Note>,
    pub pagination: PaginationInfo,
}
