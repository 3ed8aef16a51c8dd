use super::load::RowSet;

/// Keeps only rows whose `product` equals `product`, ignoring case and surrounding space.
pub fn retain_product(mut rows: RowSet, product: &str) -> RowSet {
    let Some(index) = rows.column_index("product") else {
        rows.rows.clear();
        return rows;
    };
    let target = normalize_product(product);
    rows.rows.retain(|row| {
        row.values
            .get(index)
            .is_some_and(|value| normalize_product(value) == target)
    });
    rows
}

fn normalize_product(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::retain_product;
    use crate::pipeline::load::{RawRow, RowSet};

    fn rows(products: &[&str]) -> RowSet {
        RowSet {
            columns: vec!["product".to_string(), "region".to_string()],
            rows: products
                .iter()
                .enumerate()
                .map(|(index, product)| RawRow {
                    file: "f.csv".to_string(),
                    line: index as u64 + 2,
                    values: vec![product.to_string(), "north".to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn match_ignores_case_and_surrounding_space() {
        let filtered = retain_product(
            rows(&["Pink Morsel", "PINK MORSEL ", "pink morsels", "gold morsel"]),
            " Pink Morsel",
        );
        let lines = filtered.rows.iter().map(|row| row.line).collect::<Vec<u64>>();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn keeps_only_target_product_in_order() {
        let filtered = retain_product(
            rows(&["Pink Morsel", "Other", "pink morsel", "magenta morsel"]),
            "pink morsel",
        );
        let lines = filtered.rows.iter().map(|row| row.line).collect::<Vec<u64>>();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let once = retain_product(
            rows(&["Pink Morsel", "Other", "pink morsel", "PINK MORSEL"]),
            "Pink Morsel",
        );
        let twice = retain_product(once.clone(), "Pink Morsel");
        assert_eq!(once.rows, twice.rows);
        assert_eq!(once.columns, twice.columns);
    }

    #[test]
    fn missing_product_column_matches_nothing() {
        let set = RowSet {
            columns: vec!["region".to_string()],
            rows: vec![RawRow {
                file: "f.csv".to_string(),
                line: 2,
                values: vec!["north".to_string()],
            }],
        };
        assert!(retain_product(set, "pink morsel").is_empty());
    }
}
