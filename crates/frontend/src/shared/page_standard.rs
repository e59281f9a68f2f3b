//! Page categories declared by every tab page through `PageFrame`.

/// Table of records with search and bulk actions.
pub const PAGE_CAT_LIST: &str = "list";

/// Form of a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// `{entity}--{category}` id of a page.
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{}--{}", entity, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert_eq!(page_id("a001_area", PAGE_CAT_LIST), "a001_area--list");
        assert_eq!(page_id("a016_sale", PAGE_CAT_DETAIL), "a016_sale--detail");
    }
}
