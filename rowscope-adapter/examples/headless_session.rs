// Example: drive a table controller through a simulated session, without a network.
use rowscope::SortKey;
use rowscope_adapter::{Screen, TableConfig, TableController};
use serde_json::json;

fn print_screen(c: &TableController) {
    match c.render() {
        Screen::Loading => println!("[loading]"),
        Screen::Failed { message } => println!("[error] {message}"),
        Screen::Table(frame) => {
            let headers: Vec<&str> = frame.headers.iter().map(|h| h.text.as_ref()).collect();
            println!(
                "rev={} query={:?} rows={} window={:?} | {}",
                c.revision(),
                frame.raw_query,
                frame.row_count,
                frame.window.range,
                headers.join(" | ")
            );
            for row in frame.rows.iter().take(3) {
                println!("  @{:>6} {} <{}>", row.offset, row.record.name, row.key);
            }
        }
    }
}

fn main() {
    let users: Vec<_> = (0..1000)
        .map(|i| {
            json!({
                "name": { "first": format!("User{i:04}"), "last": "Demo" },
                "registered": { "date": format!("20{:02}-06-01T00:00:00Z", i % 24), "age": i % 12 },
                "email": format!("user{i}@example.com"),
                "location": { "city": "Austin", "state": "Texas", "country": "United States" },
            })
        })
        .collect();

    let mut c = TableController::new(TableConfig::default());
    print_screen(&c);

    if let Err(err) = c.finish_loading(Ok(users)) {
        eprintln!("{err}");
        return;
    }
    print_screen(&c);

    // Keystrokes 80ms apart, then a timer loop.
    let mut now_ms = 0;
    for text in ["u", "us", "user01"] {
        let _ = c.on_filter_input(text, now_ms);
        now_ms += 80;
    }
    print_screen(&c);
    while let Some(due) = c.next_deadline_ms() {
        now_ms = due;
        c.tick(now_ms);
    }
    print_screen(&c);

    let _ = c.on_header_click(SortKey::CreatedAt);
    let _ = c.on_scroll(1_000);
    print_screen(&c);
}
