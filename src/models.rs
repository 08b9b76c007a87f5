use serde::{Deserialize, Deserializer, Serialize};

/// One spreadsheet record, keyed by `ID`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "ID", default, deserialize_with = "text_cell")]
    pub id: String,
    #[serde(rename = "Avatar_Name", default, deserialize_with = "text_cell")]
    pub avatar_name: String,
    #[serde(rename = "Performance_Score", default, deserialize_with = "text_cell")]
    pub performance_score: String,
}

impl Row {
    pub fn new(
        id: impl Into<String>,
        avatar_name: impl Into<String>,
        performance_score: impl Into<String>,
    ) -> Self {
        Row {
            id: id.into(),
            avatar_name: avatar_name.into(),
            performance_score: performance_score.into(),
        }
    }
}

/// Accepts a string, number or bool cell and keeps its text form.
/// `null` becomes an empty string.
fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("unexpected cell value: {}", other))),
    }
}

/// Editable fields of the entry dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Id,
    AvatarName,
    PerformanceScore,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [
        DraftField::Id,
        DraftField::AvatarName,
        DraftField::PerformanceScore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Id => "ID",
            DraftField::AvatarName => "Avatar Name",
            DraftField::PerformanceScore => "Performance Score",
        }
    }

    pub fn next(&self) -> DraftField {
        match self {
            DraftField::Id => DraftField::AvatarName,
            DraftField::AvatarName => DraftField::PerformanceScore,
            DraftField::PerformanceScore => DraftField::Id,
        }
    }

    pub fn prev(&self) -> DraftField {
        match self {
            DraftField::Id => DraftField::PerformanceScore,
            DraftField::AvatarName => DraftField::Id,
            DraftField::PerformanceScore => DraftField::AvatarName,
        }
    }
}

/// Staging copy of a row while the dialog is open
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub avatar_name: String,
    pub performance_score: String,
}

impl Draft {
    pub fn from_row(row: &Row) -> Self {
        Draft {
            id: row.id.clone(),
            avatar_name: row.avatar_name.clone(),
            performance_score: row.performance_score.clone(),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(
            self.id.clone(),
            self.avatar_name.clone(),
            self.performance_score.clone(),
        )
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Id => &self.id,
            DraftField::AvatarName => &self.avatar_name,
            DraftField::PerformanceScore => &self.performance_score,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Id => &mut self.id,
            DraftField::AvatarName => &mut self.avatar_name,
            DraftField::PerformanceScore => &mut self.performance_score,
        }
    }

    /// True when every field required to create a row is filled in
    pub fn is_complete(&self) -> bool {
        DraftField::ALL.iter().all(|f| !self.field(*f).is_empty())
    }
}

/// What submitting the dialog does, decided when the dialog opens
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryTarget {
    /// Create a new row
    NewEntry,
    /// Update the row that had this id when it was fetched
    ExistingEntry(String),
}

impl EntryTarget {
    pub fn is_new(&self) -> bool {
        matches!(self, EntryTarget::NewEntry)
    }
}

/// Gateway operation, used for logging and failure reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_uses_sheet_column_names() {
        let row = Row::new("1", "Ava", "10");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ID": "1", "Avatar_Name": "Ava", "Performance_Score": "10"})
        );
    }

    #[test]
    fn test_row_tolerates_numbers_and_missing_columns() {
        let rows: Vec<Row> = serde_json::from_str(
            r#"[{"ID": 7, "Performance_Score": 12.5, "Extra": "x"}, {"ID": "8", "Avatar_Name": null}]"#,
        )
        .unwrap();
        assert_eq!(rows[0], Row::new("7", "", "12.5"));
        assert_eq!(rows[1], Row::new("8", "", ""));
    }

    #[test]
    fn test_row_rejects_nested_cells() {
        let result = serde_json::from_str::<Row>(r#"{"ID": {"nested": true}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_completeness() {
        let mut draft = Draft::from_row(&Row::new("1", "Ava", ""));
        assert!(!draft.is_complete());
        draft.field_mut(DraftField::PerformanceScore).push_str("20");
        assert!(draft.is_complete());
        assert_eq!(draft.to_row(), Row::new("1", "Ava", "20"));
    }

    #[test]
    fn test_draft_field_cycle() {
        let mut field = DraftField::Id;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, DraftField::Id);
        assert_eq!(DraftField::Id.prev(), DraftField::PerformanceScore);
    }
}
