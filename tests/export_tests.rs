use chrono::{Local, TimeZone};
use rsplitwatch::core::{ManualClock, SplitTree};
use rsplitwatch::errors::AppError;
use rsplitwatch::export::{
    ExportFormat, ExportLogic, ExportOptions, ExportOutcome, FileSink, LogSink, MemorySink,
};
use std::env;
use std::fs;
use std::path::PathBuf;

fn clock() -> ManualClock {
    ManualClock::starting_at(Local.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
}

fn temp_log(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_rsplitwatch.org", name));
    fs::remove_file(&path).ok();
    path
}

/// "Write report" → "Draft" → "Intro", all closed, session stopped at 3661s.
fn write_report<'a>(clock: &'a ManualClock) -> SplitTree<&'a ManualClock> {
    let mut t = SplitTree::new(clock, 100);
    t.start_session("Write report");
    clock.set(5.0);
    t.open_subgoal("Draft");
    t.open_nested("Intro");
    clock.set(5.5);
    t.close_active();
    assert_eq!(t.active_node().map(|n| n.name.as_str()), Some("Draft"));
    clock.set(65.0);
    t.close_active();
    assert_eq!(t.active(), None);
    clock.set(3661.0);
    t.stop_session();
    t
}

#[test]
fn test_write_report_scenario() {
    let clock = clock();
    let t = write_report(&clock);
    let mut sink = MemorySink::new();

    let outcome = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Written { entries: 3 });
    assert_eq!(sink.appends, 1);

    let expected = "\
* Write report
  :LOGBOOK:
  CLOCK: [2025-03-01 09:00]--[2025-03-01 10:01] => 01:01:01.000
  :END:

** Draft
  :LOGBOOK:
  CLOCK: [00:00:05.000]--[00:01:05.000] => 00:01:00.000
  :END:

*** Intro
  :LOGBOOK:
  CLOCK: [00:00:05.000]--[00:00:05.500] => 00:00:00.500
  :END:

";
    assert_eq!(sink.contents, expected);
}

#[test]
fn test_entries_depth_is_level_plus_two() {
    let clock = clock();
    let t = write_report(&clock);
    let entries = ExportLogic::build_entries(&t, &ExportOptions::default()).unwrap();

    let depths: Vec<usize> = entries.iter().map(|e| e.depth).collect();
    assert_eq!(depths, vec![1, 2, 3]);
    assert_eq!(entries[2].stars(), "***");
    assert_eq!(entries[2].duration, "00:00:00.500");
}

#[test]
fn test_without_drawer_matches_two_line_shape() {
    let clock = clock();
    let t = write_report(&clock);
    let options = ExportOptions {
        logbook_drawer: false,
        ..ExportOptions::default()
    };
    let mut sink = MemorySink::new();
    ExportLogic::export(&t, &mut sink, &options).unwrap();

    let lines: Vec<&str> = sink.contents.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "* Write report");
    assert_eq!(lines[2], "** Draft");
    assert_eq!(
        lines[5],
        "  CLOCK: [00:00:05.000]--[00:00:05.500] => 00:00:00.500"
    );
}

#[test]
fn test_open_nodes_are_never_exported() {
    let clock = clock();
    let mut t = SplitTree::new(&clock, 100);
    t.start_session("goal");
    t.open_subgoal("closed one");
    clock.advance(1.0);
    t.close_active();
    t.open_subgoal("still open");
    clock.advance(1.0);
    t.stop_session();

    let mut sink = MemorySink::new();
    let outcome = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Written { entries: 2 });
    assert!(sink.contents.contains("** closed one"));
    assert!(!sink.contents.contains("still open"));
}

#[test]
fn test_ascended_node_is_not_exported() {
    let clock = clock();
    let mut t = SplitTree::new(&clock, 100);
    t.start_session("goal");
    t.open_subgoal("parent");
    t.open_nested("abandoned");
    t.ascend();
    clock.advance(2.0);
    t.close_active();
    t.stop_session();

    let entries = ExportLogic::build_entries(&t, &ExportOptions::default()).unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["goal", "parent"]);
}

#[test]
fn test_export_skipped_while_running() {
    let clock = clock();
    let mut t = SplitTree::new(&clock, 100);
    t.start_session("goal");
    let mut sink = MemorySink::new();

    let outcome = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert_eq!(sink.appends, 0);
}

#[test]
fn test_reset_then_export_writes_nothing() {
    let clock = clock();
    let mut t = write_report(&clock);
    t.reset_session();

    let path = temp_log("reset_then_export");
    let mut sink = FileSink::new(&path);
    let outcome = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(!path.exists());
}

#[test]
fn test_empty_goal_is_skipped() {
    let clock = clock();
    let mut t = SplitTree::new(&clock, 100);
    t.start_session("");
    clock.advance(1.0);
    t.stop_session();

    let mut sink = MemorySink::new();
    let outcome = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(sink.contents.is_empty());
}

#[test]
fn test_file_sink_appends_and_never_truncates() {
    let clock = clock();
    let t = write_report(&clock);
    let path = temp_log("append_twice");
    fs::write(&path, "#+TITLE: done\n").unwrap();

    let mut sink = FileSink::new(&path);
    ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();
    ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("#+TITLE: done\n* Write report\n"));
    assert_eq!(content.matches("* Write report").count(), 2);
    assert_eq!(content.matches("*** Intro").count(), 2);
}

#[test]
fn test_unwritable_sink_reports_error() {
    let clock = clock();
    let t = write_report(&clock);
    let mut path = env::temp_dir();
    path.push("rsplitwatch_missing_dir_for_test");
    fs::remove_dir_all(&path).ok();
    path.push("done.org");

    let mut sink = FileSink::new(&path);
    let err = ExportLogic::export(&t, &mut sink, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::Sink { .. }));
    assert!(err.to_string().contains("done.org"));
    assert!(sink.location().ends_with("done.org"));
}

#[test]
fn test_json_lines_format() {
    let clock = clock();
    let t = write_report(&clock);
    let options = ExportOptions {
        format: ExportFormat::Json,
        ..ExportOptions::default()
    };
    let mut sink = MemorySink::new();
    ExportLogic::export(&t, &mut sink, &options).unwrap();

    assert_eq!(sink.contents.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(sink.contents.trim_end()).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "Write report");
    assert_eq!(entries[2]["depth"], 3);
    assert_eq!(entries[2]["duration"], "00:00:00.500");
}

#[test]
fn test_custom_timestamp_format() {
    let clock = clock();
    let t = write_report(&clock);
    let options = ExportOptions {
        timestamp_format: "%Y-%m-%d %a %H:%M".into(),
        ..ExportOptions::default()
    };
    let entries = ExportLogic::build_entries(&t, &options).unwrap();
    assert_eq!(entries[0].start, "2025-03-01 Sat 09:00");
    assert_eq!(entries[0].end, "2025-03-01 Sat 10:01");
}
