use mongodb::bson::{Document, doc};

/// Escape user text for a literal `$regex` match.
pub fn regex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\.+*?()|[]{}^$#&-~".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match on any of `fields`.
pub fn contains_any(fields: &[&str], text: &str) -> Document {
    let pattern = regex_escape(text);
    let clauses: Vec<Document> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": pattern.clone(), "$options": "i" });
            clause
        })
        .collect();
    doc! { "$or": clauses }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_escape() {
        assert_eq!(regex_escape("a.b*(c)"), r"a\.b\*\(c\)");
        assert_eq!(regex_escape("plain"), "plain");
    }

    #[test]
    fn test_contains_any() {
        let filter = contains_any(&["name", "city"], "new york");
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
        let first = clauses[0].as_document().unwrap();
        assert_eq!(
            first.get_document("name").unwrap().get_str("$options").unwrap(),
            "i"
        );
    }
}
