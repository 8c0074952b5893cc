use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
    NoteType("note type") {
        Positive => "positive",
        NeedsImprovement => "needs_improvement",
        Warning => "warning",
        Info => "info",
    }
}

// 管理层对教师的备注
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct Note {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: Option<String>,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub note_type: NoteType,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
