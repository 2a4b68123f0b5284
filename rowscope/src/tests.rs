use crate::*;

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn rec(name: &str, status: Status, created_at: &str, email: &str, location: &str) -> DisplayRecord {
    DisplayRecord {
        name: name.into(),
        status,
        created_at: created_at.into(),
        email: email.into(),
        location: location.into(),
    }
}

fn fixture() -> Vec<DisplayRecord> {
    use Status::{Active, Inactive};
    vec![
        rec("Alice", Active, "2023-01-01", "alice@example.com", "New York, USA"),
        rec("Bob", Inactive, "2023-02-01", "bob@example.com", "London, UK"),
        rec("Carol", Active, "2023-03-01", "carol@example.com", "Paris, France"),
        rec("David", Active, "2023-04-01", "david@example.com", "Berlin, Germany"),
        rec("Eve", Inactive, "2023-05-01", "eve@example.com", "Tokyo, Japan"),
        rec("Frank", Active, "2023-06-01", "frank@example.com", "Sydney, Australia"),
        rec("Grace", Inactive, "2023-07-01", "grace@example.com", "Toronto, Canada"),
        rec("Heidi", Active, "2023-08-01", "heidi@example.com", "Madrid, Spain"),
        rec("Ivan", Inactive, "2023-09-01", "ivan@example.com", "Rome, Italy"),
        rec("Judy", Active, "2023-10-01", "judy@example.com", "Amsterdam, Netherlands"),
    ]
}

fn names<R: AsRef<DisplayRecord>>(records: &[R]) -> Vec<&str> {
    records.iter().map(|r| r.as_ref().name.as_str()).collect()
}

/// Random records with unique values in every sortable column.
fn random_records(rng: &mut Lcg, n: usize) -> Vec<DisplayRecord> {
    (0..n)
        .map(|i| {
            let tag = rng.gen_range_u64(0, 10_000);
            let year = rng.gen_range_u32(2000, 2024);
            let month = rng.gen_range_u32(1, 13);
            let day = rng.gen_range_u32(1, 29);
            let status = if rng.gen_range_u32(0, 2) == 0 {
                Status::Active
            } else {
                Status::Inactive
            };
            DisplayRecord {
                name: format!("User{tag} N{i}"),
                status,
                // Seconds carry the index so timestamps never tie.
                created_at: format!(
                    "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
                    i / 3600 % 24,
                    i / 60 % 60,
                    i % 60
                ),
                email: format!("u{tag}.{i}@example.com"),
                location: format!("City{tag}, State{i}, Country"),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------------------------
// Record transformer

fn raw_json(first: &str, last: &str, age: u32, email: &str) -> serde_json::Value {
    serde_json::json!({
        "gender": "female",
        "name": { "title": "Ms", "first": first, "last": last },
        "location": {
            "street": { "number": 1, "name": "Main St" },
            "city": "Springfield",
            "state": "Oregon",
            "country": "United States",
            "postcode": 97477
        },
        "email": email,
        "registered": { "date": "2012-05-21T17:54:29.612Z", "age": age },
        "picture": { "large": "https://example.com/a.jpg" }
    })
}

#[test]
fn from_raw_builds_display_fields() {
    let raw: RawUserRecord =
        serde_json::from_value(raw_json("Jane", "Doe", 9, "jane@example.com")).unwrap();
    let r = DisplayRecord::from_raw(&raw);
    assert_eq!(r.name, "Jane Doe");
    assert_eq!(r.status, Status::Active);
    assert_eq!(r.created_at, "2012-05-21T17:54:29.612Z");
    assert_eq!(r.email, "jane@example.com");
    assert_eq!(r.location, "Springfield, Oregon, United States");
    assert_eq!(r.key(), "jane@example.com");
}

#[test]
fn status_threshold_is_strictly_greater_than_five() {
    assert_eq!(Status::from_age(0), Status::Inactive);
    assert_eq!(Status::from_age(5), Status::Inactive);
    assert_eq!(Status::from_age(6), Status::Active);
}

#[test]
fn status_round_trips_through_strings() {
    assert_eq!("active".parse::<Status>(), Ok(Status::Active));
    assert_eq!("inactive".parse::<Status>(), Ok(Status::Inactive));
    assert_eq!(
        "archived".parse::<Status>(),
        Err(UnknownStatus("archived".into()))
    );
    assert_eq!(Status::Inactive.to_string(), "inactive");
}

#[test]
fn transform_preserves_order() {
    let raws: Vec<RawUserRecord> = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, n)| {
            serde_json::from_value(raw_json(n, "X", i as u32 * 4, &format!("{n}@x.io")))
                .unwrap()
        })
        .collect();
    let out = transform(&raws);
    assert_eq!(names(&out), ["a X", "b X", "c X"]);
    assert_eq!(out[0].status, Status::Inactive);
    assert_eq!(out[2].status, Status::Active);
}

#[test]
fn transform_values_skips_malformed_records() {
    let mut missing_location = raw_json("Bad", "Record", 3, "bad@example.com");
    missing_location
        .as_object_mut()
        .unwrap()
        .remove("location");
    let values = vec![
        raw_json("Ann", "One", 7, "ann@example.com"),
        missing_location,
        serde_json::json!({ "name": "not an object" }),
        raw_json("Ben", "Two", 2, "ben@example.com"),
    ];

    let out = transform_values(values);
    assert_eq!(names(&out.records), ["Ann One", "Ben Two"]);
    let skipped: Vec<usize> = out.skipped.iter().map(|s| s.index).collect();
    assert_eq!(skipped, [1, 2]);
    assert!(matches!(out.skipped[0].error, RecordError::Malformed(_)));
}

#[test]
fn display_record_serializes_with_camel_case_and_lowercase_status() {
    let r = rec("A B", Status::Inactive, "2020-01-01", "a@b.c", "X, Y, Z");
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["createdAt"], "2020-01-01");
    assert_eq!(v["status"], "inactive");
}

#[test]
fn timestamps_parse_lazily_from_several_forms() {
    assert_eq!(parse_timestamp_ms("2023-01-01"), Some(1_672_531_200_000));
    assert_eq!(
        parse_timestamp_ms("2023-01-01T00:00:00.000Z"),
        Some(1_672_531_200_000)
    );
    assert_eq!(
        parse_timestamp_ms("2023-01-01T00:00:01"),
        Some(1_672_531_201_000)
    );
    assert_eq!(
        parse_timestamp_ms("2023-01-01T02:00:00+02:00"),
        Some(1_672_531_200_000)
    );
    assert_eq!(parse_timestamp_ms("yesterday"), None);
    assert_eq!(parse_timestamp_ms(""), None);

    let r = rec("A", Status::Active, "2012-05-21T17:54:29.612Z", "a@x", "L");
    assert_eq!(
        r.created_date(),
        chrono::NaiveDate::from_ymd_opt(2012, 5, 21)
    );
}

// ---------------------------------------------------------------------------------------------
// Filter engine

#[test]
fn filter_by_status_empty_is_identity() {
    let data = fixture();
    let out = filter_by_status(&data, "");
    match out {
        Cow::Borrowed(s) => {
            assert!(std::ptr::eq(s, data.as_slice()));
            assert_eq!(s.len(), 10);
        }
        Cow::Owned(_) => panic!("empty status must borrow the input"),
    }
}

#[test]
fn filter_by_status_fixture_counts() {
    let data = fixture();
    let active = filter_by_status(&data, "active");
    let inactive = filter_by_status(&data, "inactive");
    assert_eq!(active.len(), 6);
    assert_eq!(inactive.len(), 4);
    assert!(active.iter().all(|r| r.status == Status::Active));
    assert!(inactive.iter().all(|r| r.status == Status::Inactive));
    assert_eq!(filter_by_status(&data, "archived").len(), 0);
    // Exact match only.
    assert_eq!(filter_by_status(&data, "Active").len(), 0);
}

#[test]
fn filter_by_status_partitions_random_data() {
    let mut rng = Lcg::new(7);
    for _ in 0..20 {
        let n = rng.gen_range_usize(0, 200);
        let data = random_records(&mut rng, n);
        let a = filter_by_status(&data, "active").len();
        let i = filter_by_status(&data, "inactive").len();
        assert!(a + i <= data.len());
        assert_eq!(a + i, data.len());
    }
}

#[test]
fn filter_by_name_empty_is_identity() {
    let data = fixture();
    let out = filter_by_name(&data, "");
    assert!(matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, data.as_slice())));
}

#[test]
fn filter_by_name_fixture_scenarios() {
    let data = fixture();

    assert_eq!(names(&filter_by_name(&data, "Alice")), ["Alice"]);
    assert_eq!(names(&filter_by_name(&data, "al")), ["Alice"]);
    assert_eq!(names(&filter_by_name(&data, "AL")), ["Alice"]);
    assert_eq!(
        names(&filter_by_name(&data, "a")),
        ["Alice", "Carol", "David", "Frank", "Grace", "Ivan"]
    );
    assert!(filter_by_name(&data, "Zach").is_empty());
}

#[test]
fn filter_by_name_does_not_trim_whitespace() {
    let mut data = fixture();
    assert!(filter_by_name(&data, " ").is_empty());
    assert!(filter_by_name(&data, " al").is_empty());

    data.push(rec("Al Green", Status::Active, "2023-11-01", "al@example.com", "X"));
    assert_eq!(names(&filter_by_name(&data, " ")), ["Al Green"]);
    assert_eq!(names(&filter_by_name(&data, "l g")), ["Al Green"]);
}

#[test]
fn filter_by_name_result_is_exactly_the_matching_subset() {
    let mut rng = Lcg::new(42);
    let data = random_records(&mut rng, 300);
    for q in ["user1", "N2", "n1", "USER", "9 n", "zz"] {
        let out = filter_by_name(&data, q);
        let lq = q.to_lowercase();
        assert!(out.iter().all(|r| r.name.to_lowercase().contains(&lq)));
        let expected = data
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&lq))
            .count();
        assert_eq!(out.len(), expected);
        // Order-preserving.
        let positions: Vec<usize> = out
            .iter()
            .map(|r| data.iter().position(|d| d.email == r.email).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn filters_accept_shared_handles() {
    let data: Vec<Arc<DisplayRecord>> = fixture().into_iter().map(Arc::new).collect();
    let out = filter_by_name(&data, "ice");
    assert_eq!(out.len(), 1);
    assert!(Arc::ptr_eq(&out[0], &data[0]));

    let owned = fixture();
    let refs: Vec<&DisplayRecord> = owned.iter().collect();
    assert_eq!(filter_by_status(&refs, "inactive").len(), 4);
}

// ---------------------------------------------------------------------------------------------
// Sort engine

#[test]
fn sort_does_not_mutate_input() {
    let data = fixture();
    let before = data.clone();
    let _ = sort_by(&data, SortKey::Name, SortOrder::Desc);
    assert_eq!(data, before);
}

#[test]
fn sort_by_name_and_date() {
    let data = fixture();
    let desc = sort_by(&data, SortKey::Name, SortOrder::Desc);
    assert_eq!(names(&desc)[..3], ["Judy", "Ivan", "Heidi"]);

    let by_date = sort_by(&data, SortKey::CreatedAt, SortOrder::Desc);
    assert_eq!(by_date[0].name, "Judy");
    assert_eq!(by_date[9].name, "Alice");

    let by_location = sort_by(&data, SortKey::Location, SortOrder::Asc);
    assert_eq!(by_location[0].location, "Amsterdam, Netherlands");
}

#[test]
fn text_keys_compare_case_sensitively() {
    let data = vec![
        rec("bob", Status::Active, "2020-01-01", "b@x", "L"),
        rec("Zed", Status::Active, "2020-01-01", "z@x", "L"),
        rec("alice", Status::Active, "2020-01-01", "a@x", "L"),
    ];
    let out = sort_by(&data, SortKey::Name, SortOrder::Asc);
    // Uppercase sorts before lowercase.
    assert_eq!(names(&out), ["Zed", "alice", "bob"]);
}

#[test]
fn dates_compare_chronologically_not_lexically() {
    let data = vec![
        rec("a", Status::Active, "2023-01-01T10:00:00Z", "a@x", "L"),
        rec("b", Status::Active, "2023-01-01T09:00:00+00:00", "b@x", "L"),
        rec("c", Status::Active, "2023-01-01T10:30:00+02:00", "c@x", "L"),
    ];
    let out = sort_by(&data, SortKey::CreatedAt, SortOrder::Asc);
    // c is 08:30Z.
    assert_eq!(names(&out), ["c", "b", "a"]);
}

#[test]
fn unparseable_dates_sort_last_ascending_and_first_descending() {
    let data = vec![
        rec("bad", Status::Active, "not a date", "bad@x", "L"),
        rec("new", Status::Active, "2024-01-01", "new@x", "L"),
        rec("old", Status::Active, "1999-01-01", "old@x", "L"),
    ];
    let asc = sort_by(&data, SortKey::CreatedAt, SortOrder::Asc);
    assert_eq!(names(&asc), ["old", "new", "bad"]);
    let desc = sort_by(&data, SortKey::CreatedAt, SortOrder::Desc);
    assert_eq!(names(&desc), ["bad", "new", "old"]);
}

#[test]
fn desc_is_exact_reverse_of_asc_for_distinct_keys() {
    let mut rng = Lcg::new(2024);
    for _ in 0..10 {
        let n = rng.gen_range_usize(0, 150);
        let data = random_records(&mut rng, n);
        for key in SortKey::ALL {
            let asc = sort_by(&data, key, SortOrder::Asc);
            let desc = sort_by(&asc, key, SortOrder::Desc);
            let mut reversed = asc.clone();
            reversed.reverse();
            assert_eq!(desc, reversed, "key={key:?}");
        }
    }
}

#[test]
fn comparator_dispatch_declares_value_kinds() {
    assert_eq!(SortKey::CreatedAt.comparator().kind(), SortValueKind::Timestamp);
    for key in [SortKey::Name, SortKey::Email, SortKey::Location] {
        assert_eq!(key.comparator().kind(), SortValueKind::Text);
    }
    let data = fixture();
    let cmp = SortKey::Email.comparator();
    assert_eq!(cmp.compare(&data[0], &data[1]), std::cmp::Ordering::Less);
    assert_eq!(
        SortOrder::Desc.apply(cmp.compare(&data[0], &data[1])),
        std::cmp::Ordering::Greater
    );
}

#[test]
fn header_click_toggles_or_resets() {
    let s = SortState::default();
    assert_eq!(s, SortState::new(SortKey::Name, SortOrder::Asc));

    let s = s.on_header_click(SortKey::Name, HeaderClickPolicy::ResetToAscending);
    assert_eq!(s.order, SortOrder::Desc);

    let reset = s.on_header_click(SortKey::Email, HeaderClickPolicy::ResetToAscending);
    assert_eq!(reset, SortState::new(SortKey::Email, SortOrder::Asc));

    let toggled = s.on_header_click(SortKey::Email, HeaderClickPolicy::ToggleAlways);
    assert_eq!(toggled, SortState::new(SortKey::Email, SortOrder::Asc));
    let toggled = toggled.on_header_click(SortKey::Location, HeaderClickPolicy::ToggleAlways);
    assert_eq!(toggled, SortState::new(SortKey::Location, SortOrder::Desc));
}

// ---------------------------------------------------------------------------------------------
// Columns

#[test]
fn header_text_marks_active_sort_column() {
    let sort = SortState::new(SortKey::CreatedAt, SortOrder::Desc);
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|c| c.header_text(sort).into_owned())
        .collect();
    assert_eq!(
        headers,
        ["Name", "Status", "Created At ▼", "Email", "Location"]
    );
    assert_eq!(Column::Name.header_text(SortState::default()), "Name ▲");
    assert_eq!(Column::Status.sort_key(), None);
}

#[test]
fn cell_text_formats_dates() {
    let r = rec("A", Status::Active, "2023-01-09", "a@x", "L");
    assert_eq!(Column::CreatedAt.cell_text(&r), "1/9/2023");
    assert_eq!(Column::Status.cell_text(&r), "active");
    assert_eq!(Column::Location.cell_text(&r), "L");

    let bad = rec("A", Status::Active, "???", "a@x", "L");
    assert_eq!(Column::CreatedAt.cell_text(&bad), "Invalid Date");
}

#[test]
fn column_layout_matches_header_order() {
    let widths: Vec<u32> = Column::ALL.iter().map(|c| c.width()).collect();
    assert_eq!(widths, [160, 120, 140, 220, 220]);
    assert_eq!(Column::Status.align(), CellAlign::Center);
    assert_eq!(Column::CreatedAt.align(), CellAlign::Right);
}

// ---------------------------------------------------------------------------------------------
// Window calculator

#[test]
fn thousand_rows_render_at_most_twenty_one() {
    let w = compute_window(1000, 600, 56, 0, 10);
    assert_eq!(w.total_size, 56_000);
    assert_eq!(w.visible, VirtualRange { start_index: 0, end_index: 11 });
    assert_eq!(w.range, VirtualRange { start_index: 0, end_index: 21 });
    assert!(w.len() <= 600usize.div_ceil(56) + 10);
}

#[test]
fn window_overscans_both_sides_mid_list() {
    let w = compute_window(1000, 600, 56, 5_600, 10);
    assert_eq!(w.visible.first(), Some(100));
    assert_eq!(w.visible.last(), Some(110));
    assert_eq!(w.range, VirtualRange { start_index: 90, end_index: 121 });

    let starts: Vec<u64> = w.items().map(|it| it.start).take(2).collect();
    assert_eq!(starts, [90 * 56, 91 * 56]);
}

#[test]
fn window_clamps_scroll_past_the_end() {
    let w = compute_window(1000, 600, 56, 1_000_000_000, 10);
    assert_eq!(w.scroll_offset, 55_400);
    assert_eq!(w.visible.first(), Some(989));
    assert_eq!(w.visible.last(), Some(999));
    assert_eq!(w.range, VirtualRange { start_index: 979, end_index: 1000 });
}

#[test]
fn short_list_fits_entirely() {
    let w = compute_window(5, 600, 56, 300, 10);
    assert_eq!(w.scroll_offset, 0);
    assert_eq!(w.visible, VirtualRange { start_index: 0, end_index: 5 });
    assert_eq!(w.range, VirtualRange { start_index: 0, end_index: 5 });
    assert_eq!(w.total_size, 280);
}

#[test]
fn empty_inputs_yield_empty_window() {
    let w = compute_window(0, 600, 56, 0, 10);
    assert!(w.is_empty());
    assert_eq!(w.total_size, 0);
    assert_eq!(w.visible.first(), None);

    let w = compute_window(10, 0, 56, 0, 10);
    assert!(w.is_empty());
    assert_eq!(w.total_size, 560);

    let w = compute_window(10, 600, 0, 0, 10);
    assert!(w.is_empty());
}

#[test]
fn window_bounds_hold_for_random_inputs() {
    let mut rng = Lcg::new(99);
    for _ in 0..2_000 {
        let count = rng.gen_range_usize(0, 5_000);
        let viewport = rng.gen_range_u32(0, 2_000);
        let row = rng.gen_range_u32(1, 120);
        let offset = rng.gen_range_u64(0, 700_000);
        let overscan = rng.gen_range_usize(0, 20);

        let w = compute_window(count, viewport, row, offset, overscan);
        assert_eq!(w.total_size, count as u64 * row as u64);

        if count == 0 || viewport == 0 {
            assert!(w.is_empty());
            continue;
        }

        let first = w.visible.first().unwrap();
        let last = w.visible.last().unwrap();
        assert!(first <= last && last < count);

        let range_first = w.range.first().unwrap();
        let range_last = w.range.last().unwrap();
        assert!(range_first <= first && last <= range_last && range_last < count);
        assert_eq!(range_first, first.saturating_sub(overscan));
        assert_eq!(range_last, (last + overscan).min(count - 1));

        // A viewport can straddle at most ceil(viewport / row) + 1 rows.
        let visible_rows = (viewport as usize).div_ceil(row as usize) + 1;
        assert!(w.visible.len() <= visible_rows);
        assert!(w.len() <= w.visible.len() + 2 * overscan);

        // Every visible row really intersects the viewport.
        let top = w.scroll_offset;
        let bottom = top + viewport as u64;
        for it in w.items().filter(|it| w.visible.contains(it.index)) {
            assert_eq!(it.start, it.index as u64 * row as u64);
            assert!(it.end() > top && it.start < bottom);
        }
    }
}

#[test]
fn window_stays_bounded_when_extent_saturates() {
    let w = compute_window(usize::MAX, 600, u32::MAX, u64::MAX, 10);
    assert!(!w.visible.is_empty());
    assert!(w.visible.len() <= 2);
    assert!(w.range.len() <= w.visible.len() + 20);
    assert!(w.range.end_index <= w.count);
    assert_eq!(w.scroll_offset, w.total_size - 600);

    // A huge overscan legitimately widens the range; the visible part does not move.
    let wide = compute_window(usize::MAX, 600, u32::MAX, u64::MAX, usize::MAX);
    assert_eq!(wide.visible, w.visible);
    assert_eq!(wide.range.start_index, 0);
}

// ---------------------------------------------------------------------------------------------
// Virtualizer

#[test]
fn virtualizer_tracks_count_viewport_and_scroll() {
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(1000, 56)
            .with_overscan(10)
            .with_initial_viewport_size(600),
    );
    assert_eq!(v.total_size(), 56_000);
    assert_eq!(v.virtual_range(), VirtualRange { start_index: 0, end_index: 21 });

    v.set_scroll_offset_clamped(5_600);
    assert_eq!(v.visible_range().first(), Some(100));

    // Shrinking the list (e.g. after filtering) pulls the offset back into range.
    v.set_count_clamped(20);
    assert_eq!(v.scroll_offset(), 20 * 56 - 600);
    assert_eq!(v.virtual_range(), VirtualRange { start_index: 0, end_index: 20 });

    assert_eq!(v.item_start(3), Some(168));
    assert_eq!(v.item_start(20), None);
    assert_eq!(v.index_at_offset(169), Some(3));
    assert_eq!(v.index_at_offset(u64::MAX), Some(19));
}

#[test]
fn keyed_iteration_resolves_row_keys() {
    let data = fixture();
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(data.len(), 56)
            .with_overscan(0)
            .with_initial_viewport_size(112),
    );
    v.set_scroll_offset(56);

    let mut keyed = Vec::new();
    v.for_each_virtual_item_keyed(|i| data[i].key(), |it| keyed.push(it));
    let keys: Vec<&str> = keyed.iter().map(|it| it.key).collect();
    assert_eq!(keys, ["bob@example.com", "carol@example.com"]);
    assert_eq!(keyed[1].start, 112);
}

#[test]
fn batch_update_coalesces_on_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(100, 10)
            .with_initial_viewport_size(50)
            .with_on_change(Some({
                let calls = Arc::clone(&calls);
                move |_: &Virtualizer| {
                    calls.fetch_add(1, Ordering::Relaxed);
                }
            })),
    );

    v.set_scroll_offset(30);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    v.batch_update(|v| {
        v.set_count(5);
        v.set_scroll_offset_clamped(900);
        v.set_viewport_size(20);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    // No-op setters do not notify.
    v.set_count(5);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn frame_state_round_trips() {
    let mut v = Virtualizer::new(VirtualizerOptions::new(100, 10));
    v.set_viewport_and_scroll_clamped(40, 120);
    let frame = v.frame_state();
    assert_eq!(frame.viewport.size, 40);
    assert_eq!(frame.scroll.offset, 120);

    let mut other = Virtualizer::new(VirtualizerOptions::new(100, 10));
    other.restore_frame_state(frame);
    assert_eq!(other.window(), v.window());

    let json = serde_json::to_string(&frame).unwrap();
    let back: FrameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn virtualizer_exposes_layout_and_initial_offset() {
    let mut v = Virtualizer::new(
        VirtualizerOptions::new(50, 20)
            .with_overscan(1)
            .with_initial_viewport_size(60)
            .with_initial_offset(100),
    );
    assert_eq!(v.row_size(), 20);
    assert_eq!(v.overscan(), 1);
    assert_eq!(v.scroll_offset(), 100);

    let mut items = Vec::new();
    v.for_each_virtual_item(|it| items.push((it.index, it.start, it.size)));
    assert_eq!(items, [(4, 80, 20), (5, 100, 20), (6, 120, 20), (7, 140, 20), (8, 160, 20)]);

    v.set_count_clamped(0);
    let mut n = 0;
    v.for_each_virtual_item(|_| n += 1);
    assert_eq!(n, 0);
    assert_eq!(v.scroll_offset(), 0);
}
