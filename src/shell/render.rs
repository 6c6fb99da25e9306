//! Plain-text rendering for the shell. Every function returns a `String`
//! so output can be asserted on without a terminal.

use std::fmt::Write;

use crate::catalog::{CatalogItemDetail, CatalogItemSummary, FailureKind};
use crate::core::browse::failure_message;

pub use crate::core::browse::Operation;

pub fn failure(op: Operation, kind: FailureKind) -> String {
    failure_message(op, kind).to_string()
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn summary_line(item: &CatalogItemSummary, favorite: bool) -> String {
    let star = if favorite { "*" } else { " " };
    format!("{star} #{:03} {}", item.id, title_case(&item.name))
}

pub fn summaries<'a>(
    items: impl IntoIterator<Item = &'a CatalogItemSummary>,
    is_favorite: impl Fn(&CatalogItemSummary) -> bool,
) -> String {
    let lines: Vec<String> = items
        .into_iter()
        .map(|item| summary_line(item, is_favorite(item)))
        .collect();
    if lines.is_empty() {
        "(nothing loaded)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Multi-line detail card, wrapped to `width` columns.
pub fn detail(item: &CatalogItemDetail, favorite: bool, width: usize) -> String {
    let mut out = String::new();
    let marker = if favorite { "  [favorite]" } else { "" };
    let _ = writeln!(out, "{} #{}{marker}", title_case(&item.name), item.id);

    let types = item.type_names();
    if !types.is_empty() {
        let _ = writeln!(out, "Types: {}", types.join(" / "));
    }

    if let Some(url) = item.image_url() {
        let _ = writeln!(out, "Image: {url}");
    }

    if !item.stats.is_empty() {
        let _ = writeln!(out, "Stats:");
        for entry in &item.stats {
            let _ = writeln!(out, "  {:<16} {:>3}", entry.stat.name, entry.base_stat);
        }
    }

    let abilities = item.ability_names();
    if !abilities.is_empty() {
        let line = format!("Abilities: {}", abilities.join(", "));
        let options = textwrap::Options::new(width.max(20)).subsequent_indent("  ");
        for wrapped in textwrap::wrap(&line, options) {
            let _ = writeln!(out, "{wrapped}");
        }
    }

    out.trim_end().to_string()
}

pub fn favorites(items: &[CatalogItemDetail]) -> String {
    if items.is_empty() {
        return "No favorites yet.".to_string();
    }
    items
        .iter()
        .map(|item| {
            let types = item.type_names();
            if types.is_empty() {
                format!("#{:03} {}", item.id, title_case(&item.name))
            } else {
                format!(
                    "#{:03} {} ({})",
                    item.id,
                    title_case(&item.name),
                    types.join("/")
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::detail as stub_detail;
    use serde_json::json;

    #[test]
    fn test_failure_copy_differs_by_kind() {
        let offline = failure(Operation::Search, FailureKind::Network);
        let missing = failure(Operation::Search, FailureKind::NotFound);
        assert_ne!(offline, missing);
        assert!(offline.contains("internet"));
        assert!(missing.contains("No entry"));
    }

    #[test]
    fn test_summary_line_marks_favorites() {
        let item = CatalogItemSummary {
            name: "pikachu".into(),
            source_url: "u".into(),
            id: 25,
        };
        assert_eq!(summary_line(&item, true), "* #025 Pikachu");
        assert_eq!(summary_line(&item, false), "  #025 Pikachu");
    }

    #[test]
    fn test_empty_summaries() {
        let none: Vec<CatalogItemSummary> = Vec::new();
        assert_eq!(summaries(&none, |_| false), "(nothing loaded)");
    }

    #[test]
    fn test_detail_card() {
        let item: CatalogItemDetail = serde_json::from_value(json!({
            "id": 6,
            "name": "charizard",
            "types": [
                { "slot": 1, "type": { "name": "fire" } },
                { "slot": 2, "type": { "name": "flying" } }
            ],
            "stats": [ { "base_stat": 78, "stat": { "name": "hp" } } ],
            "abilities": [
                { "ability": { "name": "blaze" } },
                { "ability": { "name": "solar-power" }, "is_hidden": true }
            ]
        }))
        .unwrap();
        let card = detail(&item, true, 80);
        assert!(card.starts_with("Charizard #6  [favorite]"));
        assert!(card.contains("Types: fire / flying"));
        assert!(card.contains("hp"));
        assert!(card.contains("Abilities: blaze, solar-power"));
    }

    #[test]
    fn test_favorites_listing() {
        assert_eq!(favorites(&[]), "No favorites yet.");
        let listing = favorites(&[stub_detail(1, "bulbasaur"), stub_detail(4, "charmander")]);
        assert_eq!(listing, "#001 Bulbasaur\n#004 Charmander");
    }
}
