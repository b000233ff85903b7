/// Tag string handling and list ordering
///
/// Tags travel over the wire as an ordered list of strings, but the UI
/// edits them as one comma-separated line. These helpers are the pure
/// mapping between the two representations, plus the ordering applied
/// to the expression list before rendering.

use crate::api::types::Expression;

/// Parse a comma-separated tag line into an ordered list.
///
/// Each entry is trimmed; empty entries are dropped. An empty or
/// whitespace-only input yields an empty list, never a single empty tag.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a tag list back into the comma-separated editing form
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Sort expressions by title, case-insensitive, empty titles first.
///
/// The sort is stable, so records with equal titles keep the order the
/// backend returned them in.
pub fn sort_by_title(expressions: &mut [Expression]) {
    expressions.sort_by_key(|expression| expression.metadata.title.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ExpressionMetadata;

    fn expression_titled(title: &str) -> Expression {
        Expression {
            id: format!("id-{}", title),
            processed_filename: String::new(),
            metadata: ExpressionMetadata {
                title: title.to_string(),
                description: String::new(),
                tags: Vec::new(),
            },
        }
    }

    #[test]
    fn test_split_trims_and_drops_empties() {
        assert_eq!(
            split_tags(" happy , blink ,, wave "),
            vec!["happy", "blink", "wave"]
        );
    }

    #[test]
    fn test_split_empty_inputs() {
        assert!(split_tags("").is_empty());
        assert!(split_tags("   ").is_empty());
        assert!(split_tags(" , , ").is_empty());
    }

    #[test]
    fn test_split_join_is_idempotent() {
        let raw = "happy ,  blink,wave";
        let once = split_tags(raw);
        let twice = split_tags(&join_tags(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_join_format() {
        let tags = vec!["happy".to_string(), "blink".to_string()];
        assert_eq!(join_tags(&tags), "happy, blink");
        assert_eq!(join_tags(&[]), "");
    }

    #[test]
    fn test_sort_case_insensitive_empty_first() {
        let mut expressions: Vec<Expression> = ["banana", "Apple", "", "cherry"]
            .iter()
            .map(|title| expression_titled(title))
            .collect();

        sort_by_title(&mut expressions);

        let titles: Vec<&str> = expressions
            .iter()
            .map(|expression| expression.metadata.title.as_str())
            .collect();
        assert_eq!(titles, vec!["", "Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_titles() {
        let mut expressions = vec![expression_titled("same"), expression_titled("same")];
        expressions[0].id = "first".to_string();
        expressions[1].id = "second".to_string();

        sort_by_title(&mut expressions);

        assert_eq!(expressions[0].id, "first");
        assert_eq!(expressions[1].id, "second");
    }
}
