// Example: filter + sort + window over synthetic records.
use rowscope::{
    Column, DisplayRecord, SortKey, SortOrder, SortState, Status, compute_window, filter_by_name,
    sort_by,
};

fn main() {
    let records: Vec<DisplayRecord> = (0..1000)
        .map(|i| DisplayRecord {
            name: format!("User {i:04}"),
            status: if i % 3 == 0 {
                Status::Inactive
            } else {
                Status::Active
            },
            created_at: format!("20{:02}-01-01", i % 24),
            email: format!("user{i}@example.com"),
            location: format!("City {}, State, Country", i % 50),
        })
        .collect();

    let filtered = filter_by_name(&records, "user 0");
    let sorted = sort_by(&filtered, SortKey::CreatedAt, SortOrder::Desc);
    let window = compute_window(sorted.len(), 600, 56, 1_200, 10);

    let sort = SortState::new(SortKey::CreatedAt, SortOrder::Desc);
    let header: Vec<_> = Column::ALL.iter().map(|c| c.header_text(sort)).collect();
    println!("{}", header.join(" | "));
    println!(
        "rows={} total_size={} render_range={:?}",
        sorted.len(),
        window.total_size,
        window.range
    );
    for item in window.items().take(3) {
        let r = &sorted[item.index];
        println!("@{:>6} {} {}", item.start, r.name, Column::CreatedAt.cell_text(r));
    }
}
