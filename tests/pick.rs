use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use csvpick::PickError;
use csvpick::pick::{
    PickContext, PickObserver, PickOptions, PickStats, Selection, pick_files, pick_from_path,
    pick_from_reader,
};

fn pick_str(
    input: &str,
    selection: Selection,
    options: &PickOptions,
) -> Result<String, PickError> {
    let mut out = Vec::new();
    pick_from_reader(input.as_bytes(), selection.selector()?, options, &mut out)?;
    Ok(String::from_utf8(out).expect("output is utf-8"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(name)
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl PickObserver for RecordingObserver {
    fn on_success(&self, ctx: &PickContext, stats: PickStats) {
        self.events
            .lock()
            .unwrap()
            .push(format!("ok {} {}", ctx.source, stats.records));
    }

    fn on_failure(&self, ctx: &PickContext, _error: &PickError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("fail {}", ctx.source));
    }
}

#[test]
fn index_selection_end_to_end() {
    let out = pick_str(
        "1,2,3\n4,5,6\n",
        Selection::Indexes("3,1".into()),
        &PickOptions::default(),
    )
    .unwrap();
    assert_eq!(out, "3\t1\n6\t4\n");
}

#[test]
fn header_selection_consumes_the_header_row() {
    let out = pick_str(
        "name,price\nApple,60\n",
        Selection::Headers("price,name".into()),
        &PickOptions::default(),
    )
    .unwrap();
    assert_eq!(out, "60\tApple\n");
}

#[test]
fn pass_through_emits_everything() {
    let out = pick_str("a,b\nc,d\n", Selection::All, &PickOptions::default()).unwrap();
    assert_eq!(out, "a\tb\nc\td\n");

    let out = pick_str("", Selection::All, &PickOptions::default()).unwrap();
    assert_eq!(out, "");
}

#[test]
fn tsv_input_with_custom_output_delimiter() {
    let options = PickOptions {
        delimiter: b'\t',
        output_delimiter: ",".into(),
        ..Default::default()
    };
    let out = pick_str("a\tb\tc\nd\te\tf\n", Selection::Indexes("2-".into()), &options).unwrap();
    assert_eq!(out, "b,c\ne,f\n");
}

#[test]
fn invalid_index_list_surfaces_as_syntax_error() {
    let err = pick_str("1,2\n", Selection::Indexes("foo".into()), &PickOptions::default())
        .unwrap_err();
    assert!(matches!(err, PickError::InvalidList { .. }));
    assert_eq!(err.to_string(), "\"foo\": invalid syntax");
}

#[test]
fn fixture_by_header_names() {
    let mut out = Vec::new();
    let stats = pick_from_path(
        fixture("fruits.csv"),
        &Selection::Headers("price,name".into()),
        &PickOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(stats.records, 4);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "60\tApple\n140\tGrapes\n400\tPineapple\n50\tOrange\n"
    );
}

#[test]
fn missing_header_name_yields_empty_fields() {
    let mut out = Vec::new();
    pick_from_path(
        fixture("fruits.csv"),
        &Selection::Headers("date,name".into()),
        &PickOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\tApple\n\tGrapes\n\tPineapple\n\tOrange\n"
    );
}

#[test]
fn pick_files_resolves_each_header_independently() {
    let paths = [fixture("fruits.csv"), fixture("stock.csv")];
    let mut out = Vec::new();
    let stats = pick_files(
        &paths,
        &Selection::Headers("name,price".into()),
        &PickOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(stats.records, 6);
    // stock.csv has its columns in the opposite order; values must still
    // land under the requested names.
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Apple\t60\nGrapes\t140\nPineapple\t400\nOrange\t50\nBanana\t30\nCherry\t90\n"
    );
}

#[test]
fn pick_files_stops_at_the_first_failing_source() {
    let observer = Arc::new(RecordingObserver::default());
    let options = PickOptions {
        observer: Some(observer.clone()),
        ..Default::default()
    };
    let paths = [fixture("dup_header.csv"), fixture("fruits.csv")];
    let mut out = Vec::new();
    let err = pick_files(
        &paths,
        &Selection::Headers("a".into()),
        &options,
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, PickError::DuplicatedHeader { ref name } if name == "a"));
    assert!(out.is_empty());
    assert_eq!(observer.events(), vec!["fail tests/fixtures/dup_header.csv"]);
}

#[test]
fn observer_reports_success_with_record_counts() {
    let observer = Arc::new(RecordingObserver::default());
    let options = PickOptions {
        observer: Some(observer.clone()),
        ..Default::default()
    };
    let mut out = Vec::new();
    pick_files(
        &[fixture("fruits.csv"), fixture("stock.csv")],
        &Selection::Indexes("1".into()),
        &options,
        &mut out,
    )
    .unwrap();
    assert_eq!(
        observer.events(),
        vec![
            "ok tests/fixtures/fruits.csv 5",
            "ok tests/fixtures/stock.csv 3",
        ]
    );
}

#[test]
fn observer_reports_missing_files_as_failures() {
    let observer = Arc::new(RecordingObserver::default());
    let options = PickOptions {
        observer: Some(observer.clone()),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = pick_from_path(
        fixture("does_not_exist.csv"),
        &Selection::All,
        &options,
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, PickError::Io(_)));
    assert_eq!(
        observer.events(),
        vec!["fail tests/fixtures/does_not_exist.csv"]
    );
}

#[test]
fn index_selection_treats_the_first_fixture_row_as_data() {
    // Index selection has no header concept: the header line of the fixture
    // is just the first record.
    let mut out = Vec::new();
    let stats = pick_from_path(
        fixture("stock.csv"),
        &Selection::Indexes("2".into()),
        &PickOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(stats.records, 3);
    assert_eq!(String::from_utf8(out).unwrap(), "name\nBanana\nCherry\n");
}
