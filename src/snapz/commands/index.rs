use super::{CmdResult, IndexRow};
use crate::catalog::Catalog;
use crate::error::Result;

/// Lists primary-index tag names. With filters, only the named tags
/// are listed and each row also carries the tag's unique live values;
/// filter names with no index entry are silently dropped.
pub fn run(catalog: &Catalog, filters: &[String]) -> Result<CmdResult> {
    let rows = catalog
        .primary_index()
        .keys()
        .filter(|name| filters.is_empty() || filters.iter().any(|f| f == *name))
        .map(|name| {
            let values = if filters.is_empty() {
                Vec::new()
            } else {
                catalog.tag_values(name).into_iter().collect()
            };
            IndexRow {
                name: name.clone(),
                values,
            }
        })
        .collect();

    Ok(CmdResult::default().with_index_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapzConfig;
    use crate::model::{Document, Metadata};

    fn catalog() -> Catalog {
        let mut metadata = Metadata::default();
        let mut d1 = Document::new("24-01-15:143-527", "pics/a.png");
        d1.tags
            .insert("color".into(), ["red".to_string(), "blue".to_string()].into());
        d1.tags.insert("starred".into(), [].into());
        metadata.docs.insert(d1.id.clone(), d1);

        let mut catalog = Catalog::from_metadata(metadata, SnapzConfig::default());
        catalog.rebuild_indexes();
        catalog
    }

    #[test]
    fn test_lists_all_names_without_values() {
        let result = run(&catalog(), &[]).unwrap();
        let names: Vec<_> = result.index_rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["color", "starred"]);
        assert!(result.index_rows.iter().all(|r| r.values.is_empty()));
    }

    #[test]
    fn test_filter_adds_values_and_drops_unknown_names() {
        let result = run(&catalog(), &["color".to_string(), "nope".to_string()]).unwrap();
        assert_eq!(result.index_rows.len(), 1);
        assert_eq!(result.index_rows[0].name, "color");
        assert_eq!(result.index_rows[0].values, ["blue", "red"]);
    }
}
