//! Following foreign keys from one table into another.
//!
//! A foreign key is an integer column value naming a row position in another
//! table. Sentinel values such as `0` meaning "nothing" are a per-table data
//! convention, so callers check for them before resolving; nothing here treats
//! zero specially.

use super::{Row, Table, TableError};
use std::borrow::Cow;

/// Returns the row of `target` named by `source[column]`.
pub fn resolve<'t>(source: &Row, column: &str, target: &'t Table) -> Result<&'t Row, TableError> {
    let id = source.integer(column)?;
    target.at(id)
}

/// Follows a chain of foreign keys, one `(column, table)` hop at a time.
///
/// `resolve_chain(row, &[("Key", &map), ("PlaceName", &place_names)])` reads
/// `row["Key"]` as a row of `map`, then that row's `PlaceName` as a row of
/// `place_names`. An empty chain is a caller bug and returns `source` itself.
pub fn resolve_chain<'a>(source: &'a Row, hops: &[(&str, &'a Table)]) -> Result<&'a Row, TableError> {
    hops.iter().try_fold(source, |row, &(column, table)| resolve(row, column, table))
}

/// Wraps every case-insensitive occurrence of `name` in `text` with a wiki link.
///
/// The link always uses `name`'s own spelling. An empty `name` leaves the text
/// untouched.
#[must_use]
pub fn link_name<'a>(text: &'a str, name: &str) -> Cow<'a, str> {
    if name.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut linked = String::new();
    let mut found = false;
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        if let Some(len) = match_len_ignore_case(rest, name) {
            linked.push_str("[[");
            linked.push_str(name);
            linked.push_str("]]");
            rest = rest.split_at(len).1;
            found = true;
        } else {
            linked.push(first);
            rest = rest.split_at(first.len_utf8()).1;
        }
    }

    if found { Cow::Owned(linked) } else { Cow::Borrowed(text) }
}

/// Byte length of the prefix of `text` that equals `name` ignoring case, if there is one.
fn match_len_ignore_case(text: &str, name: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    for expected in name.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }

    Some(chars.next().map_or(text.len(), |(index, _)| index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, csv: &str) -> Table {
        Table::parse(name, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_resolve_reads_key_as_row_id() {
        let achievements = table("Achievement", "Name,Item\nFirst,2\nSecond,0\n");
        let items = table("Item", "Name\n\"\"\nPotion\nEther\n");

        let first = achievements.at(0).unwrap();
        assert_eq!(resolve(first, "Item", &items).unwrap().get("Name"), Some("Ether"));
    }

    #[test]
    fn test_resolve_zero_is_an_ordinary_row() {
        let achievements = table("Achievement", "Name,Item\nSecond,0\n");
        let items = table("Item", "Name\nPlaceholder\nPotion\n");

        let row = achievements.at(0).unwrap();
        assert_eq!(resolve(row, "Item", &items).unwrap().get("Name"), Some("Placeholder"));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let achievements = table("Achievement", "Name,Item\nFirst,9\n");
        let items = table("Item", "Name\nPotion\n");

        let err = resolve(achievements.at(0).unwrap(), "Item", &items).unwrap_err();
        assert!(matches!(err, TableError::RowNotFound { id: 9, total: 1, ref table } if table == "Item"));
    }

    #[test]
    fn test_resolve_bad_key() {
        let achievements = table("Achievement", "Name,Item\nFirst,potion\n");
        let items = table("Item", "Name\nPotion\n");
        let row = achievements.at(0).unwrap();

        assert!(matches!(resolve(row, "Item", &items), Err(TableError::InvalidInteger { .. })));
        assert!(matches!(resolve(row, "Title", &items), Err(TableError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_resolve_chain_two_hops() {
        let achievements = table("Achievement", "Name,Key\nExplorer,1\n");
        let maps = table("Map", "PlaceName\n0\n2\n");
        let places = table("PlaceName", "Name\n\"\"\nLimsa Lominsa\nMiddle La Noscea\n");

        let row = achievements.at(0).unwrap();
        let place = resolve_chain(row, &[("Key", &maps), ("PlaceName", &places)]).unwrap();
        assert_eq!(place.get("Name"), Some("Middle La Noscea"));
    }

    #[test]
    fn test_resolve_chain_stops_at_first_failure() {
        let achievements = table("Achievement", "Name,Key\nExplorer,5\n");
        let maps = table("Map", "PlaceName\n0\n");
        let places = table("PlaceName", "Name\nLimsa Lominsa\n");

        let err = resolve_chain(achievements.at(0).unwrap(), &[("Key", &maps), ("PlaceName", &places)]).unwrap_err();
        assert!(matches!(err, TableError::RowNotFound { ref table, .. } if table == "Map"));
    }

    #[test]
    fn test_link_name() {
        assert_eq!(link_name("Defeat the Dodo", "Dodo"), "Defeat the [[Dodo]]");
    }

    #[test]
    fn test_link_name_case_insensitive_uses_resolved_spelling() {
        assert_eq!(
            link_name("complete the quest the ultimate weapon. The Ultimate Weapon awaits", "The Ultimate Weapon"),
            "complete the quest [[The Ultimate Weapon]]. [[The Ultimate Weapon]] awaits"
        );
    }

    #[test]
    fn test_link_name_matches_name_literally() {
        assert_eq!(link_name("Earn $5 (maybe)", "$5 (maybe)"), "Earn [[$5 (maybe)]]");
        assert_eq!(link_name("a.c abc", "a.c"), "[[a.c]] abc");
    }

    #[test]
    fn test_link_name_non_ascii_case() {
        assert_eq!(link_name("Défi: ÉCLAT DE CRISTAL", "Éclat de cristal"), "Défi: [[Éclat de cristal]]");
    }

    #[test]
    fn test_link_name_very_long_name() {
        let name = "Sylph ".repeat(20_000);
        let text = format!("Meet the {}today", name.to_uppercase());
        assert_eq!(link_name(&text, &name), format!("Meet the [[{name}]]today"));
    }

    #[test]
    fn test_link_name_empty_or_absent() {
        assert!(matches!(link_name("Defeat the Dodo", ""), Cow::Borrowed("Defeat the Dodo")));
        assert_eq!(link_name("Defeat the Dodo", "Morbol"), "Defeat the Dodo");
    }

    #[test]
    fn test_link_name_applies_on_already_linked_text() {
        // later decorations see earlier ones, in reference order
        let text = link_name("Help the Sylphs and the Sylph Elder", "Sylph Elder");
        let text = link_name(&text, "Sylph");
        assert_eq!(text, "Help the [[Sylph]]s and the [[[[Sylph]] Elder]]");
    }
}
