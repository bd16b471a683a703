use proptest::prelude::*;
use sortable_table::{Header, TableConfig, TableController, TableSource};

fn attach(cells: &[String], page_size: usize) -> TableController {
    let body = cells
        .iter()
        .enumerate()
        .map(|(i, c)| vec![c.clone(), i.to_string()])
        .collect();
    let source = TableSource::new(
        "prop",
        vec![Header::sortable("value"), Header::sortable("id")],
        body,
    );
    TableController::attach(source, &TableConfig::default().page_size(page_size as i64))
        .unwrap()
        .unwrap()
}

fn ids(table: &TableController) -> Vec<String> {
    table
        .sorted_rows()
        .iter()
        .map(|r| r.cell(1).to_string())
        .collect()
}

proptest! {
    #[test]
    fn pages_cover_every_row_once(
        cells in proptest::collection::vec("[a-z0-9]{0,4}", 0..60),
        page_size in 1usize..15,
    ) {
        let mut table = attach(&cells, page_size);
        let total_pages = table.total_pages();
        prop_assert_eq!(total_pages, cells.len().div_ceil(page_size));

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            table.set_page(page);
            let view = table.render();
            prop_assert!(view.rows.len() <= page_size);
            prop_assert_eq!(view.pagination.as_ref().map(|p| p.links.len()), Some(total_pages));
            seen.extend(view.rows.iter().map(|r| r.cell(1).to_string()));
        }
        prop_assert_eq!(seen, ids(&table));
    }

    #[test]
    fn operations_keep_row_count(
        cells in proptest::collection::vec("[a-c0-9 ]{0,3}", 0..40),
        ops in proptest::collection::vec(0u8..6, 1..25),
    ) {
        let mut table = attach(&cells, 7);
        for op in ops {
            match op {
                0 => table.sort_by_column(0),
                1 => table.sort_by_column(1),
                2 => table.next_page(),
                3 => table.previous_page(),
                4 => table.toggle_pagination(),
                _ => table.clear_sort(),
            }
            prop_assert_eq!(table.sorted_rows().len(), cells.len());
            let view = table.render();
            prop_assert!(view.current_page >= 1);
            prop_assert!(view.current_page <= view.total_pages.max(1));
            let marked = view.headers.iter().filter(|h| h.class.is_some()).count();
            prop_assert!(marked <= 1);
            for header in &view.headers {
                prop_assert!(!(header.ascending_marker && header.descending_marker));
            }
        }
        let mut sorted = ids(&table);
        sorted.sort_by_key(|id| id.parse::<usize>().unwrap());
        let original: Vec<String> = (0..cells.len()).map(|i| i.to_string()).collect();
        prop_assert_eq!(sorted, original);
    }

    #[test]
    fn second_click_inverts_order(
        values in proptest::collection::btree_set(-1000i32..1000, 1..40),
    ) {
        // Distinct keys, so the two directions are exact mirrors.
        let cells: Vec<String> = values.iter().rev().map(|v| v.to_string()).collect();
        let mut table = attach(&cells, 10);

        table.sort_by_column(0);
        let ascending = ids(&table);
        let view = table.render();
        prop_assert_eq!(view.headers.iter().filter(|h| h.class.is_some()).count(), 1);

        table.sort_by_column(0);
        let mut descending = ids(&table);
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }
}
