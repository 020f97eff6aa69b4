/// Resolution and write-back policies
use serde::{Deserialize, Serialize};

/// How a multi-author sidecar list becomes the single `author` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorPolicy {
    /// Keep only the first listed author
    #[default]
    #[serde(alias = "first")]
    FirstOnly,

    /// Join every listed author with `", "`
    JoinAll,
}

impl AuthorPolicy {
    /// Collapse a list of author names according to the policy
    ///
    /// Blank names are skipped. Returns `None` when nothing remains.
    pub fn collapse<S: AsRef<str>>(self, authors: &[S]) -> Option<String> {
        let mut names = authors
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty());

        match self {
            AuthorPolicy::FirstOnly => names.next().map(str::to_string),
            AuthorPolicy::JoinAll => {
                let joined = names.collect::<Vec<_>>().join(", ");
                (!joined.is_empty()).then_some(joined)
            }
        }
    }
}

/// What the synchronizer writes into the grouping atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStyle {
    /// Series name only; the index lives in the disk-number atom
    #[default]
    NameOnly,

    /// `"<series> #<index>"` when an index is known
    NameWithIndex,
}

impl GroupingStyle {
    /// Render the grouping atom text for a series target
    pub fn render(self, series: &str, index: Option<&str>) -> String {
        match (self, index) {
            (GroupingStyle::NameWithIndex, Some(index)) => format!("{series} #{index}"),
            _ => series.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_only_keeps_first_non_blank_author() {
        let authors = ["", "Jane Doe", "John Roe"];
        assert_eq!(
            AuthorPolicy::FirstOnly.collapse(&authors),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn join_all_joins_with_comma() {
        let authors = ["Jane Doe", "John Roe"];
        assert_eq!(
            AuthorPolicy::JoinAll.collapse(&authors),
            Some("Jane Doe, John Roe".to_string())
        );
        assert_eq!(AuthorPolicy::JoinAll.collapse::<&str>(&[]), None);
    }

    #[test]
    fn grouping_style_renders_index_only_when_requested() {
        assert_eq!(GroupingStyle::NameOnly.render("Saga", Some("3")), "Saga");
        assert_eq!(GroupingStyle::NameWithIndex.render("Saga", Some("3")), "Saga #3");
        assert_eq!(GroupingStyle::NameWithIndex.render("Saga", None), "Saga");
    }
}
