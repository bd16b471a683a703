use pretty_assertions::assert_eq;
use sortable_table::{
    ConfigError, Header, PageLink, SortClass, TableConfig, TableController, TableError,
    TableSource, TableView,
};

fn numbered(rows: usize, page_size: i64) -> TableController {
    let body = (1..=rows).map(|i| vec![format!("row {i:02}")]).collect();
    let source = TableSource::new("numbered", vec![Header::sortable("name")], body);
    TableController::attach(source, &TableConfig::default().page_size(page_size))
        .unwrap()
        .unwrap()
}

fn visible(view: &TableView) -> Vec<String> {
    view.rows.iter().map(|r| r.cell(0).to_string()).collect()
}

fn expected(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("row {i:02}")).collect()
}

#[test]
fn basic_sort_round_trip() {
    let source = TableSource::new(
        "letters",
        vec![Header::sortable("letter")],
        vec![vec!["b".into()], vec!["a".into()], vec!["c".into()]],
    );
    let mut table = TableController::attach(source, &TableConfig::default())
        .unwrap()
        .unwrap();

    table.sort_by_column(0);
    let view = table.render();
    assert_eq!(visible(&view), vec!["a", "b", "c"]);
    assert_eq!(view.headers[0].class, Some(SortClass::Asc));

    table.sort_by_column(0);
    let view = table.render();
    assert_eq!(visible(&view), vec!["c", "b", "a"]);
    assert_eq!(view.headers[0].class, Some(SortClass::Desc));
    assert_eq!(view.headers[0].class.map(|c| c.as_str()), Some("desc"));
}

#[test]
fn numeric_and_empty_cells() {
    for (input, sorted) in [(["10", "9"], ["9", "10"]), (["", "9"], ["", "9"])] {
        let body = input.iter().map(|v| vec![v.to_string()]).collect();
        let source = TableSource::new("t", vec![Header::sortable("v")], body);
        let mut table = TableController::attach(source, &TableConfig::default())
            .unwrap()
            .unwrap();
        table.sort_by_column(0);
        assert_eq!(visible(&table.render()), sorted.to_vec());
    }
}

#[test]
fn pagination_window() {
    let mut table = numbered(25, 10);
    let view = table.render();
    assert_eq!(visible(&view), expected(1..=10));
    let strip = view.pagination.unwrap();
    assert!(strip.visible);
    assert_eq!(
        strip.links,
        vec![
            PageLink { page: 1, active: true },
            PageLink { page: 2, active: false },
            PageLink { page: 3, active: false },
        ]
    );

    table.set_page(3);
    let view = table.render();
    assert_eq!(visible(&view), expected(21..=25));
    assert_eq!(view.first_row, 20);
    assert_eq!(view.current_page, 3);
}

#[test]
fn toggle_off_mid_pagination_resumes_page() {
    let mut table = numbered(25, 10);
    table.set_page(2);

    table.toggle_pagination();
    let view = table.render();
    assert_eq!(visible(&view), expected(1..=25));
    let strip = view.pagination.unwrap();
    assert!(!strip.visible);
    assert!(strip.links.is_empty());

    table.toggle_pagination();
    let view = table.render();
    assert_eq!(visible(&view), expected(11..=20));
    assert!(view.pagination.unwrap().visible);
}

#[test]
fn sorting_resets_to_first_page() {
    let mut table = numbered(25, 10);
    table.set_page(3);
    table.sort_by_column(0);
    let view = table.render();
    assert_eq!(view.current_page, 1);
    assert_eq!(visible(&view), expected(1..=10));
}

#[test]
fn out_of_range_pages_are_clamped() {
    let mut table = numbered(25, 10);
    table.set_page(40);
    assert_eq!(table.pagination().current_page(), 3);
    table.set_page(0);
    assert_eq!(table.pagination().current_page(), 1);
    table.previous_page();
    assert_eq!(table.pagination().current_page(), 1);
    table.last_page();
    table.next_page();
    assert_eq!(table.pagination().current_page(), 3);
    table.first_page();
    assert_eq!(table.pagination().current_page(), 1);
}

#[test]
fn empty_body_has_no_links() {
    let source = TableSource::new("empty", vec![Header::sortable("a")], vec![]);
    let mut table = TableController::attach(source, &TableConfig::default())
        .unwrap()
        .unwrap();
    table.sort_by_column(0);
    table.set_page(2);
    let view = table.render();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_pages, 0);
    assert_eq!(view.current_page, 1);
    assert!(view.pagination.unwrap().links.is_empty());
}

#[test]
fn wrapper_attribute_drives_page_size() {
    let config = TableConfig::from_attribute(Some("4"), true).unwrap();
    let body = (1..=10).map(|i| vec![i.to_string()]).collect();
    let source = TableSource::new("t", vec![Header::sortable("n")], body);
    let table = TableController::attach(source, &config).unwrap().unwrap();
    assert_eq!(table.total_pages(), 3);
    assert_eq!(table.render().rows.len(), 4);

    let source = TableSource::new("t", vec![], vec![]);
    let err = TableController::attach(source, &TableConfig::default().page_size(-1)).unwrap_err();
    assert!(matches!(err, TableError::Config(ConfigError::NonPositive(-1))));
}

#[test]
fn only_active_header_is_marked() {
    let source = TableSource::new(
        "two",
        vec![Header::sortable("a"), Header::sortable("b")],
        vec![vec!["1".into(), "y".into()], vec!["2".into(), "x".into()]],
    );
    let mut table = TableController::attach(source, &TableConfig::default())
        .unwrap()
        .unwrap();
    table.sort_by_column(0);
    table.sort_by_column(1);
    let view = table.render();
    assert_eq!(view.headers[0].class, None);
    assert!(!view.headers[0].ascending_marker && !view.headers[0].descending_marker);
    assert_eq!(view.headers[1].class, Some(SortClass::Asc));
    assert_eq!(visible(&view), vec!["2", "1"]);
}
