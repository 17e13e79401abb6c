use rsplitwatch::config::Config;
use rsplitwatch::core::{App, Command, Flow, Key, ManualClock};
use rsplitwatch::export::{FileSink, MemorySink};
use rsplitwatch::ui::renderer::FIRST_SPLIT_ROW;
use rsplitwatch::ui::{MemorySurface, ScriptedInput};
use std::env;

fn config() -> Config {
    Config {
        max_splits: 3,
        ..Config::default()
    }
}

type TestApp<'a> = App<&'a ManualClock, ScriptedInput, MemorySurface, MemorySink>;

fn app<'a>(clock: &'a ManualClock, input: ScriptedInput) -> TestApp<'a> {
    App::new(
        &config(),
        clock,
        input,
        MemorySurface::new(120, 30),
        MemorySink::new(),
    )
}

#[test]
fn test_key_bindings() {
    assert_eq!(Command::from_key(Key::Char('s')), Some(Command::ToggleSession));
    assert_eq!(Command::from_key(Key::Char('S')), Some(Command::ToggleSession));
    assert_eq!(Command::from_key(Key::Char('g')), Some(Command::OpenSubgoal));
    assert_eq!(Command::from_key(Key::Char('n')), Some(Command::OpenNested));
    assert_eq!(Command::from_key(Key::Char('h')), Some(Command::CloseActive));
    assert_eq!(Command::from_key(Key::Char('u')), Some(Command::Ascend));
    assert_eq!(Command::from_key(Key::Char('t')), Some(Command::SaveLog));
    assert_eq!(Command::from_key(Key::Char('d')), Some(Command::Redraw));
    assert_eq!(Command::from_key(Key::Char('r')), Some(Command::Reset));
    assert_eq!(Command::from_key(Key::Char('q')), Some(Command::Quit));
    assert_eq!(Command::from_key(Key::Esc), Some(Command::Quit));
    assert_eq!(Command::from_key(Key::Interrupt), Some(Command::Quit));
    assert_eq!(Command::from_key(Key::Char('x')), None);
}

#[test]
fn test_scripted_session_is_saved() {
    let clock = ManualClock::new();
    let input = ScriptedInput::new()
        .answer("  Write report  ")
        .answer("Draft")
        .answer("Intro");
    let mut app = app(&clock, input);

    app.handle_key(Key::Char('s')).unwrap();
    clock.advance(5.0);
    app.handle_key(Key::Char('g')).unwrap();
    app.handle_key(Key::Char('n')).unwrap();
    clock.advance(0.5);
    app.handle_key(Key::Char('h')).unwrap();
    clock.advance(1.0);
    app.handle_key(Key::Char('h')).unwrap();
    app.handle_key(Key::Char('s')).unwrap();
    app.handle_key(Key::Char('t')).unwrap();

    assert_eq!(
        app.input().prompts,
        vec!["Enter main goal", "Enter subgoal name", "Enter nested subgoal name"]
    );
    let log = &app.sink().contents;
    assert!(log.starts_with("* Write report\n"));
    assert!(log.contains("** Draft\n"));
    assert!(log.contains("*** Intro\n"));
    assert!(log.contains("CLOCK: [00:00:05.000]--[00:00:05.500] => 00:00:00.500"));
    assert_eq!(
        app.renderer().status(),
        Some("Log saved to <memory> (3 entries)")
    );
}

#[test]
fn test_ignored_commands_do_not_prompt() {
    let clock = ManualClock::new();
    let mut app = app(&clock, ScriptedInput::new());

    // nothing running: no prompt, no node
    app.handle(Command::OpenSubgoal).unwrap();
    app.handle(Command::OpenNested).unwrap();
    app.handle(Command::CloseActive).unwrap();
    app.handle(Command::Ascend).unwrap();
    app.handle(Command::SaveLog).unwrap();

    assert!(app.input().prompts.is_empty());
    assert!(app.tree().is_empty());
    assert_eq!(app.sink().appends, 0);
    assert_eq!(app.renderer().status(), None);
}

#[test]
fn test_capacity_stops_prompting() {
    let clock = ManualClock::new();
    let input = ScriptedInput::new()
        .answer("goal")
        .answer("a")
        .answer("b")
        .answer("c");
    let mut app = app(&clock, input);

    app.handle(Command::ToggleSession).unwrap();
    for _ in 0..5 {
        app.handle(Command::OpenSubgoal).unwrap();
    }
    assert_eq!(app.tree().len(), 3);
    assert_eq!(app.input().prompts.len(), 4);
}

#[test]
fn test_save_while_running_is_silent() {
    let clock = ManualClock::new();
    let mut app = app(&clock, ScriptedInput::new().answer("goal"));
    app.handle(Command::ToggleSession).unwrap();
    app.handle(Command::SaveLog).unwrap();
    assert_eq!(app.sink().appends, 0);
    assert_eq!(app.renderer().status(), None);
}

#[test]
fn test_sink_failure_is_shown_and_session_kept() {
    let clock = ManualClock::new();
    let mut dir = env::temp_dir();
    dir.push("rsplitwatch_app_missing_dir");
    std::fs::remove_dir_all(&dir).ok();

    let mut app = App::new(
        &config(),
        &clock,
        ScriptedInput::new().answer("goal"),
        MemorySurface::new(120, 30),
        FileSink::new(dir.join("done.org")),
    );
    app.handle(Command::ToggleSession).unwrap();
    clock.advance(1.0);
    app.handle(Command::ToggleSession).unwrap();
    app.handle(Command::SaveLog).unwrap();

    let status = app.renderer().status().unwrap();
    assert!(status.starts_with("Save failed: Cannot open log file"));
    assert_eq!(app.tree().goal(), "goal");
    assert_eq!(app.tree().current_elapsed(), 1.0);
    assert!(app.renderer().is_dirty());
}

#[test]
fn test_run_loop_draws_and_quits() {
    let clock = ManualClock::new();
    let input = ScriptedInput::new()
        .keys("s")
        .answer("Focus")
        .keys("g")
        .answer("Inbox")
        .keys("xq");
    let mut app = app(&clock, input);

    app.run().unwrap();

    assert_eq!(app.input().remaining_keys(), 0);
    let screen = app.surface().contents();
    assert!(screen.contains("Goal  : Focus"));
    assert!(screen.contains("Subgoals (1/3):"));
    assert!(app.surface().line(FIRST_SPLIT_ROW).ends_with("Inbox"));
}

#[test]
fn test_step_reports_quit() {
    let clock = ManualClock::new();
    let mut app = app(&clock, ScriptedInput::new().key(Key::Esc));
    assert_eq!(app.step().unwrap(), Flow::Quit);
    assert!(app.step().is_err());
}

#[test]
fn test_reset_clears_tree_and_status() {
    let clock = ManualClock::new();
    let input = ScriptedInput::new().answer("goal").answer("a");
    let mut app = app(&clock, input);

    app.handle(Command::ToggleSession).unwrap();
    app.handle(Command::OpenSubgoal).unwrap();
    app.handle(Command::ToggleSession).unwrap();
    app.handle(Command::SaveLog).unwrap();
    assert!(app.renderer().status().is_some());

    app.handle(Command::Reset).unwrap();
    assert!(app.tree().is_empty());
    assert_eq!(app.tree().goal(), "");
    assert_eq!(app.renderer().status(), None);

    // reset followed by save writes nothing new
    let before = app.sink().appends;
    app.handle(Command::SaveLog).unwrap();
    assert_eq!(app.sink().appends, before);
}
