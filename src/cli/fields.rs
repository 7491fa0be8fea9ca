//! `key=value` field arguments for `add` and `update`.
//!
//! Recognised keys are `title`, `status`, `tags` and `notes`. Unknown keys and
//! arguments without `=` are ignored; a later occurrence of a key wins.

use crate::task::TaskUpdate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    pub title: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl FieldArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = FieldArgs::default();
        for arg in args {
            let Some((key, value)) = arg.as_ref().split_once('=') else {
                continue;
            };
            match key.trim() {
                "title" => fields.title = Some(strip_quotes(value).to_string()),
                "status" => fields.status = Some(value.to_string()),
                "tags" => fields.tags = Some(split_tags(value)),
                "notes" => fields.notes = Some(strip_quotes(value).to_string()),
                _ => {}
            }
        }
        fields
    }

    pub fn into_update(self) -> TaskUpdate {
        TaskUpdate {
            title: self.title,
            status: self.status,
            tags: self.tags,
            notes: self.notes,
        }
    }
}

/// Remove one pair of matching surrounding quotes.
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Comma-separated tags, trimmed; empty entries dropped so `tags=` clears.
pub fn split_tags(value: &str) -> Vec<String> {
    strip_quotes(value)
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_and_ignores_the_rest() {
        let fields = FieldArgs::parse([
            "title=\"New title\"",
            "status=done",
            "tags=a, b,,c",
            "notes='some notes'",
            "priority=P1",
            "stray",
        ]);
        assert_eq!(
            fields,
            FieldArgs {
                title: Some("New title".to_string()),
                status: Some("done".to_string()),
                tags: Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
                notes: Some("some notes".to_string()),
            }
        );
    }

    #[test]
    fn empty_values_are_still_supplied() {
        let fields = FieldArgs::parse(["tags=", "notes="]);
        assert_eq!(fields.tags, Some(Vec::new()));
        assert_eq!(fields.notes, Some(String::new()));
        assert_eq!(fields.title, None);
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let fields = FieldArgs::parse(["notes=a=b"]);
        assert_eq!(fields.notes.as_deref(), Some("a=b"));
    }

    #[test]
    fn later_occurrence_wins() {
        let fields = FieldArgs::parse(["status=todo", "status=done"]);
        assert_eq!(fields.status.as_deref(), Some("done"));
    }

    #[test]
    fn strip_quotes_handles_short_and_mismatched_input() {
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\"abc'"), "\"abc'");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
