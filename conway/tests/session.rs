use std::time::{Duration, Instant};

use conway::patterns;
use conway::{Session, Settings, Speed, Status, StopReason};

fn session_with(width: i64, height: i64, history: usize, cells: &[(i64, i64)]) -> Session {
    let mut session = Session::new(Settings { history, ..Settings::default() });
    session.resize(width, height).unwrap();
    session.clear();
    for &(x, y) in cells {
        assert!(session.toggle_cell(x, y).unwrap());
    }
    session
}

#[test]
fn still_life_stops_after_one_repeat() {
    let mut session = session_with(6, 6, 1, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
    assert_eq!(session.play(Instant::now()), None);

    assert_eq!(session.advance(), None);
    assert_eq!(session.advance(), Some(StopReason::Repeating { period: 1 }));
    assert_eq!(session.status(), Status::Pause);
    assert_eq!(session.engine().generation(), 2);
    assert_eq!(session.stopped_by(), Some(StopReason::Repeating { period: 1 }));
}

#[test]
fn dying_pattern_stops_on_extinction() {
    let mut session = session_with(5, 5, 1, &[(0, 0), (4, 4)]);
    session.play(Instant::now());
    assert_eq!(session.advance(), Some(StopReason::Extinct));
    assert!(!session.is_playing());

    // Paused sessions ignore further advances.
    assert_eq!(session.advance(), None);
    assert_eq!(session.engine().generation(), 1);
}

#[test]
fn blinker_keeps_playing_with_default_history() {
    let mut session = session_with(5, 5, 1, &[(1, 2), (2, 2), (3, 2)]);
    session.play(Instant::now());
    for _ in 0..10 {
        assert_eq!(session.advance(), None);
    }
    assert!(session.is_playing());
}

#[test]
fn blinker_stops_with_deeper_history() {
    let mut session = session_with(5, 5, 2, &[(1, 2), (2, 2), (3, 2)]);
    session.play(Instant::now());
    assert_eq!(session.advance(), None);
    assert_eq!(session.advance(), None);
    assert_eq!(session.advance(), Some(StopReason::Repeating { period: 2 }));
}

#[test]
fn resize_and_clear_pause_first() {
    let mut session = Session::default();
    session.resize(20, 10).unwrap();
    session.play(Instant::now());
    session.resize(30, 30).unwrap();
    assert_eq!(session.status(), Status::Pause);

    session.load_pattern(patterns::find("glider").unwrap()).unwrap();
    session.play(Instant::now());
    session.advance();
    session.clear();
    assert_eq!(session.status(), Status::Pause);
    assert_eq!(session.engine().generation(), 0);
    assert!(session.engine().live_cells().is_empty());
}

#[test]
fn cells_can_be_toggled_while_playing() {
    let mut session = Session::default();
    session.resize(10, 10).unwrap();
    session.play(Instant::now());
    let before = session.engine().live_cells().len();
    let now_alive = session.toggle_cell(0, 9).unwrap();
    assert!(session.is_playing());
    assert_eq!(session.engine().live_cells().len(), if now_alive { before + 1 } else { before - 1 });
}

#[test]
fn faster_speed_ticks_more_often() {
    let mut session = session_with(8, 8, 1, &[]);
    session.load_pattern(&patterns::MOBILE).unwrap();
    session.set_speed(Speed::new(5).unwrap()).unwrap();

    let start = Instant::now();
    session.play(start);
    for step in 1..=5u32 {
        session.tick(start + Duration::from_millis(200) * step);
        if !session.is_playing() {
            break;
        }
    }
    assert!(session.engine().generation() >= 1);
    assert!(session.engine().generation() <= 5);
}

#[test]
fn randomize_fills_without_moving_the_grid() {
    let mut session = session_with(12, 12, 1, &[]);
    session.randomize(42).unwrap();
    let size = session.engine().size();
    assert_eq!((size.width, size.height), (12, 12));
    assert!(!session.engine().live_cells().is_empty());
    assert_eq!(session.engine().generation(), 0);
}
