//! Generic list page and dialog for the flat HR/payroll catalogs (a001–a008).
//!
//! Every catalog is `CatalogBase` plus metadata, so one component pair serves
//! all eight; the domain modules only pick the type.

pub mod details;
pub mod list;

pub use details::CatalogDetails;
pub use list::CatalogList;

use contracts::domain::common::CatalogEntity;

use crate::shared::list_utils::{compare_text, normalize_search, MIN_FILTER_LEN};

/// Records matching `filter` on name or description, sorted by name.
pub fn catalog_rows<T: CatalogEntity>(items: &[T], filter: &str, ascending: bool) -> Vec<T> {
    let filter = normalize_search(filter);
    let active_filter = filter.chars().count() >= MIN_FILTER_LEN;

    let mut rows: Vec<T> = items
        .iter()
        .filter(|item| {
            if !active_filter {
                return true;
            }
            let base = item.base();
            normalize_search(&base.name).contains(&filter)
                || base
                    .description
                    .as_deref()
                    .map(|d| normalize_search(d).contains(&filter))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        let cmp = compare_text(&a.base().name, &b.base().name);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_shift::aggregate::Shift;
    use contracts::domain::common::CatalogBase;

    fn shift(name: &str, description: Option<&str>) -> Shift {
        Shift::from_base(CatalogBase::new(name, description.map(str::to_string)))
    }

    #[test]
    fn filters_by_name_or_description() {
        let items = vec![
            shift("Vespertino", None),
            shift("Matutino", Some("Turno de mañana")),
            shift("Nocturno", None),
        ];
        let names = |rows: Vec<Shift>| rows.into_iter().map(|s| s.base.name).collect::<Vec<_>>();

        assert_eq!(names(catalog_rows(&items, "noc", true)), vec!["Nocturno"]);
        assert_eq!(names(catalog_rows(&items, "MANANA", true)), vec!["Matutino"]);
        // A single character does not filter yet.
        assert_eq!(catalog_rows(&items, "v", true).len(), 3);
    }

    #[test]
    fn sorts_by_name_both_ways() {
        let items = vec![shift("Vespertino", None), shift("Matutino", None), shift("Mixto", None)];
        let asc: Vec<String> =
            catalog_rows(&items, "", true).into_iter().map(|s| s.base.name).collect();
        assert_eq!(asc, vec!["Matutino", "Mixto", "Vespertino"]);
        let desc: Vec<String> =
            catalog_rows(&items, "", false).into_iter().map(|s| s.base.name).collect();
        assert_eq!(desc, vec!["Vespertino", "Mixto", "Matutino"]);
    }
}
