use crate::enums::ItemKind;

/// A typed store item identifier parsed from a user-supplied token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreItem {
    pub kind: ItemKind,
    pub id: u32,
}

impl StoreItem {
    /// The marker for a token that did not parse or is not permitted for the
    /// calling command.
    pub const ERROR: Self = Self {
        kind: ItemKind::Error,
        id: 0,
    };

    pub fn is_error(&self) -> bool {
        self.kind == ItemKind::Error
    }
}

/// Parses a comma-separated token list into store item identifiers.
///
/// Tokens take the form `digits` or `prefix/digits`, where the prefix is one
/// of `A`/`APP`, `S`/`SUB`, `B`/`BUNDLE` (case-insensitive). A token without
/// a prefix parses as `default_kind`. A zero or non-numeric ID, an unknown
/// prefix, or a kind outside `valid_kinds` yields [`StoreItem::ERROR`] for
/// that token alone; the rest of the batch is unaffected.
///
/// Results preserve token order, paired with the original token for
/// reporting.
pub fn parse_store_items(
    query: &str,
    valid_kinds: &[ItemKind],
    default_kind: ItemKind,
) -> Vec<(String, StoreItem)> {
    query
        .split(',')
        .filter(|token| !token.is_empty())
        .map(|token| (token.to_string(), parse_store_item(token, valid_kinds, default_kind)))
        .collect()
}

fn parse_store_item(
    token: &str,
    valid_kinds: &[ItemKind],
    default_kind: ItemKind,
) -> StoreItem {
    let (kind, id) = if let Some((prefix, digits)) = token.split_once('/') {
        if prefix.is_empty() || digits.is_empty() {
            return StoreItem::ERROR;
        }

        let id = match digits.parse::<u32>() {
            Ok(id) if id > 0 => id,
            _ => return StoreItem::ERROR,
        };
        let kind = match prefix.to_uppercase().as_str() {
            "A" | "APP" => ItemKind::App,
            "S" | "SUB" => ItemKind::Sub,
            "B" | "BUNDLE" => ItemKind::Bundle,
            _ => return StoreItem::ERROR,
        };

        (kind, id)
    } else {
        match token.parse::<u32>() {
            Ok(id) if id > 0 => (default_kind, id),
            _ => return StoreItem::ERROR,
        }
    };

    if valid_kinds.contains(&kind) {
        StoreItem { kind, id }
    } else {
        StoreItem::ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: &[ItemKind] = &[ItemKind::App, ItemKind::Sub, ItemKind::Bundle];

    fn parse(token: &str) -> StoreItem {
        parse_store_item(token, ALL_KINDS, ItemKind::Sub)
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let expected = StoreItem { kind: ItemKind::Sub, id: 5 };

        assert_eq!(parse("sub/5"), expected);
        assert_eq!(parse("SUB/5"), expected);
        assert_eq!(parse("Sub/5"), expected);
        assert_eq!(parse("s/5"), expected);
    }

    #[test]
    fn parses_each_prefix() {
        assert_eq!(parse("a/10").kind, ItemKind::App);
        assert_eq!(parse("app/10").kind, ItemKind::App);
        assert_eq!(parse("b/10").kind, ItemKind::Bundle);
        assert_eq!(parse("bundle/10").kind, ItemKind::Bundle);
    }

    #[test]
    fn zero_id_is_an_error() {
        assert_eq!(parse("sub/0"), StoreItem::ERROR);
        assert_eq!(parse("0"), StoreItem::ERROR);
    }

    #[test]
    fn bare_number_uses_the_default_kind() {
        assert_eq!(parse("730"), StoreItem { kind: ItemKind::Sub, id: 730 });

        let item = parse_store_item("730", ALL_KINDS, ItemKind::App);

        assert_eq!(item, StoreItem { kind: ItemKind::App, id: 730 });
    }

    #[test]
    fn invalid_tokens_are_errors() {
        assert_eq!(parse("abc"), StoreItem::ERROR);
        assert_eq!(parse("x/5"), StoreItem::ERROR);
        assert_eq!(parse("sub/"), StoreItem::ERROR);
        assert_eq!(parse("/5"), StoreItem::ERROR);
        assert_eq!(parse("sub/abc"), StoreItem::ERROR);
    }

    #[test]
    fn kinds_outside_the_permitted_set_are_errors() {
        let item = parse_store_item("a/10", &[ItemKind::Sub, ItemKind::Bundle], ItemKind::Sub);

        assert_eq!(item, StoreItem::ERROR);

        // numerically valid, still rejected
        let item = parse_store_item("10", &[ItemKind::App], ItemKind::Sub);

        assert_eq!(item, StoreItem::ERROR);
    }

    #[test]
    fn batch_preserves_order_and_independence() {
        let items = parse_store_items("sub/5,abc,b/3", ALL_KINDS, ItemKind::Sub);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ("sub/5".into(), StoreItem { kind: ItemKind::Sub, id: 5 }));
        assert_eq!(items[1], ("abc".into(), StoreItem::ERROR));
        assert_eq!(items[2], ("b/3".into(), StoreItem { kind: ItemKind::Bundle, id: 3 }));
    }

    #[test]
    fn empty_entries_are_dropped() {
        let items = parse_store_items("5,,10", ALL_KINDS, ItemKind::Sub);

        assert_eq!(items.len(), 2);
    }
}
