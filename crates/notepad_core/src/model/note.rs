//! Note domain model.

use serde::{Deserialize, Serialize};

/// Row identifier assigned by SQLite `AUTOINCREMENT`.
///
/// Always positive for stored rows.
pub type NoteId = i64;

/// One row of the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Serialized as `_id` to match the column name.
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub title: String,
    pub body: String,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn serializes_id_under_column_name() {
        let note = Note::new(7, "Groceries", "Milk, eggs");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["_id"], 7);
        assert_eq!(json["title"], "Groceries");
        assert!(json.get("id").is_none());
    }
}
