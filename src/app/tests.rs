use super::*;
use crate::library::Track;

fn t(title: &str) -> Track {
    Track {
        path: std::path::PathBuf::new(),
        title: title.into(),
        artist: None,
        duration: None,
        display: title.into(),
    }
}

#[test]
fn cursor_stops_at_list_edges() {
    let mut app = App::new(vec![t("Alpha"), t("Beta"), t("Gamma")]);

    app.select_prev();
    assert_eq!(app.selected, 0);

    app.select_next();
    app.select_next();
    assert_eq!(app.selected, 2);
    app.select_next();
    assert_eq!(app.selected, 2);
}

#[test]
fn first_last_and_set_selected_are_bounds_safe() {
    let mut app = App::new(vec![t("Alpha"), t("Beta")]);

    app.select_last();
    assert_eq!(app.selected, 1);
    app.select_first();
    assert_eq!(app.selected, 0);

    app.set_selected(1);
    assert_eq!(app.selected, 1);
    app.set_selected(99);
    assert_eq!(app.selected, 1);
}

#[test]
fn empty_list_keeps_cursor_at_zero() {
    let mut app = App::new(Vec::new());
    assert!(!app.has_tracks());

    app.select_next();
    app.select_prev();
    app.select_last();
    assert_eq!(app.selected, 0);
}
