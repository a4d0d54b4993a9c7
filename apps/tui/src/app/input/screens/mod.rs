use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod help;
mod map;
mod prompt;
mod search;
mod submit;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Map => map::handle_map_input(app, key),
        AppScreen::Search => search::handle_search_input(app, key),
        AppScreen::IdPrompt => prompt::handle_id_prompt_input(app, key),
        AppScreen::FlyTo => prompt::handle_fly_to_input(app, key),
        AppScreen::Submit => submit::handle_submit_input(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofence_editor::api::InsertPolygon;
    use geofence_editor::domain::{Geometry, LatLng};
    use geofence_editor::session::{Request, Session};

    fn app() -> App {
        App::new(Session::default(), "http://localhost:8080".to_string())
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            dispatch_input(app, *key);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch_input(app, KeyCode::Char(c));
        }
    }

    fn requests(app: &mut App) -> Vec<Request> {
        app.take_outbox()
            .into_iter()
            .map(|ticket| ticket.request)
            .collect()
    }

    #[test]
    fn id_prompt_queues_lookup() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('i')]);
        assert_eq!(app.screen, AppScreen::IdPrompt);
        type_text(&mut app, "42");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen, AppScreen::Map);
        assert_eq!(requests(&mut app), vec![Request::FindById(42)]);
    }

    #[test]
    fn bad_id_stays_on_prompt() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('i')]);
        type_text(&mut app, "4x");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen, AppScreen::IdPrompt);
        assert!(app.status_is_error);
        assert!(requests(&mut app).is_empty());
    }

    #[test]
    fn search_form_queues_filters() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('s')]);
        type_text(&mut app, "12");
        press(&mut app, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        type_text(&mut app, "Austin");
        press(&mut app, &[KeyCode::Enter]);

        let sent = requests(&mut app);
        assert!(matches!(
            sent.as_slice(),
            [Request::Find(filters)] if filters.store_id == 12 && filters.city == "Austin"
        ));
    }

    #[test]
    fn next_and_prev_queue_lookups() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('n'), KeyCode::Char('p')]);
        assert_eq!(
            requests(&mut app),
            vec![Request::FindById(1), Request::FindById(1)]
        );
        assert_eq!(app.in_flight(), 2);
    }

    #[test]
    fn fly_to_moves_marker() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('g')]);
        type_text(&mut app, "40.5,-75.25");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen, AppScreen::Map);
        assert_eq!(
            app.session.selection().marker(),
            Some(LatLng::new(40.5, -75.25))
        );
    }

    #[test]
    fn draw_then_submit() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('d'), KeyCode::Char(' ')]);
        press(&mut app, &[KeyCode::Right, KeyCode::Char(' ')]);
        press(&mut app, &[KeyCode::Up, KeyCode::Char(' ')]);
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.screen, AppScreen::Submit);
        assert_eq!(app.session.drawn().shapes().len(), 1);

        type_text(&mut app, "7");
        press(&mut app, &[KeyCode::Enter]);

        let sent = requests(&mut app);
        let Some(Request::Submit(InsertPolygon { id, polygon })) = sent.first() else {
            panic!("expected a submission, got {sent:?}");
        };
        assert_eq!(*id, 7);
        assert!(matches!(polygon, Geometry::Polygon(rings) if rings[0].len() == 4));
    }

    #[test]
    fn editing_moves_drawn_shape() {
        let mut app = app();
        press(
            &mut app,
            &[
                KeyCode::Char('d'),
                KeyCode::Char(' '),
                KeyCode::Right,
                KeyCode::Char(' '),
                KeyCode::Up,
                KeyCode::Char(' '),
                KeyCode::Enter,
                KeyCode::Esc,
            ],
        );
        assert_eq!(app.screen, AppScreen::Map);
        let before = app.session.drawn().shapes()[0].geometry.clone();

        press(&mut app, &[KeyCode::Char('e'), KeyCode::Right, KeyCode::Enter]);

        assert_eq!(app.screen, AppScreen::Submit);
        let after = app.session.drawn().shapes()[0].geometry.clone();
        assert_ne!(before, after);
        assert_eq!(app.session.selection().selected_geometry(), Some(&after));
    }

    #[test]
    fn delete_removes_focused_shape_only() {
        let mut app = app();
        let triangle = [
            KeyCode::Char('d'),
            KeyCode::Char(' '),
            KeyCode::Right,
            KeyCode::Char(' '),
            KeyCode::Up,
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Esc,
        ];
        press(&mut app, &triangle);
        press(&mut app, &triangle);
        assert_eq!(app.session.drawn().shapes().len(), 2);
        assert_eq!(app.focused_shape, 1);
        let kept = app.session.drawn().shapes()[0].id;
        let captured = app.session.selection().selected_geometry().cloned();

        press(&mut app, &[KeyCode::Char('x')]);

        assert_eq!(app.screen, AppScreen::Map);
        assert_eq!(app.session.drawn().shapes().len(), 1);
        assert_eq!(app.session.drawn().shapes()[0].id, kept);
        assert_eq!(app.focused_shape, 0);
        assert_eq!(app.session.selection().selected_geometry().cloned(), captured);

        press(&mut app, &[KeyCode::Char('x'), KeyCode::Char('x')]);
        assert!(app.session.drawn().shapes().is_empty());
        assert_eq!(app.status_message, "Nothing drawn yet, press d to draw");
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::F(1), KeyCode::Char('n')]);
        assert!(app.show_help);
        assert!(requests(&mut app).is_empty());

        press(&mut app, &[KeyCode::Esc]);
        assert!(!app.show_help);
    }

    #[test]
    fn quit_stops_the_app() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }
}
