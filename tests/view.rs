use axum::http::Uri;
use prayer_board::view::{
    ExamRefresher, HistoryEntry, NavEvent, ViewRouter, ViewState, ViewSurface, EXAM_TITLE, PRAYER_TITLE,
};
use std::sync::{Arc, Mutex};

/// In-memory document. `None` containers model pages missing that element.
#[derive(Debug, Clone, PartialEq)]
struct FakeDocument {
    location: Uri,
    prayer_container: Option<bool>,
    exam_container: Option<bool>,
    prayer_button: bool,
    exam_button: bool,
    title: String,
    history: Vec<HistoryEntry>,
    bound: Vec<ViewState>,
}

impl FakeDocument {
    fn at(location: &str) -> Self {
        Self {
            location: location.parse().unwrap(),
            prayer_container: Some(false),
            exam_container: Some(false),
            prayer_button: false,
            exam_button: false,
            title: String::new(),
            history: Vec::new(),
            bound: Vec::new(),
        }
    }
}

impl ViewSurface for FakeDocument {
    fn location(&self) -> Uri {
        self.location.clone()
    }

    fn set_view_visible(&mut self, view: ViewState, visible: bool) {
        let container = match view {
            ViewState::Prayer => &mut self.prayer_container,
            ViewState::Exam => &mut self.exam_container,
        };
        if let Some(shown) = container.as_mut() {
            *shown = visible;
        }
    }

    fn set_button_active(&mut self, view: ViewState, active: bool) {
        match view {
            ViewState::Prayer => self.prayer_button = active,
            ViewState::Exam => self.exam_button = active,
        }
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.location = entry.url.parse().unwrap();
        self.history.push(entry);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn bind_nav_button(&mut self, view: ViewState) {
        self.bound.push(view);
    }
}

#[derive(Clone, Default)]
struct RecordingExams {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl ExamRefresher for RecordingExams {
    fn load_exams(&mut self) {
        self.calls.lock().unwrap().push("load_exams");
    }

    fn update_all_days_left(&mut self) {
        self.calls.lock().unwrap().push("update_all_days_left");
    }
}

#[test]
fn exam_query_starts_in_exam_view() {
    let mut router = ViewRouter::new(FakeDocument::at("/index.html?view=exam"), "/index.html");

    assert_eq!(router.initialize_view(), ViewState::Exam);
    assert_eq!(router.current(), Some(ViewState::Exam));

    let doc = router.surface();
    assert_eq!(doc.title, EXAM_TITLE);
    assert_eq!(doc.exam_container, Some(true));
    assert_eq!(doc.prayer_container, Some(false));
    assert!(doc.exam_button && !doc.prayer_button);
    assert_eq!(
        doc.history.last(),
        Some(&HistoryEntry {
            label: EXAM_TITLE.to_string(),
            url: "/index.html?view=exam".to_string(),
        })
    );
}

#[test]
fn anything_else_starts_in_prayer_view() {
    for location in ["/", "/?view=prayer", "/?view=EXAM", "/?other=exam", "/?view="] {
        let mut router = ViewRouter::new(FakeDocument::at(location), "/");
        assert_eq!(router.initialize_view(), ViewState::Prayer, "{location}");

        let doc = router.surface();
        assert_eq!(doc.title, PRAYER_TITLE);
        assert_eq!(doc.prayer_container, Some(true));
        assert_eq!(doc.exam_container, Some(false));
        assert!(doc.prayer_button && !doc.exam_button);
        assert_eq!(doc.history.last().unwrap().url, "/");
    }
}

#[test]
fn extra_query_parameters_do_not_hide_the_view() {
    let mut router = ViewRouter::new(FakeDocument::at("/?lang=ar&view=exam"), "/");
    assert_eq!(router.initialize_view(), ViewState::Exam);
}

#[test]
fn repeated_view_key_uses_the_first_value() {
    for location in ["/?view=exam&view=exam", "/?view=exam&view=other"] {
        let mut router = ViewRouter::new(FakeDocument::at(location), "/");
        assert_eq!(router.initialize_view(), ViewState::Exam, "{location}");
    }

    let mut router = ViewRouter::new(FakeDocument::at("/?view=other&view=exam"), "/");
    assert_eq!(router.initialize_view(), ViewState::Prayer);
}

#[test]
fn show_view_twice_matches_showing_once() {
    let mut once = ViewRouter::new(FakeDocument::at("/"), "/");
    once.show_view(ViewState::Exam);

    let mut twice = ViewRouter::new(FakeDocument::at("/"), "/");
    twice.show_view(ViewState::Exam);
    twice.show_view(ViewState::Exam);

    let (a, b) = (once.surface(), twice.surface());
    assert_eq!(a.prayer_container, b.prayer_container);
    assert_eq!(a.exam_container, b.exam_container);
    assert_eq!((a.prayer_button, a.exam_button), (b.prayer_button, b.exam_button));
    assert_eq!(a.title, b.title);
    assert_eq!(a.location, b.location);
    assert_eq!(once.current(), twice.current());
    assert_eq!(b.history.len(), 2);
}

#[test]
fn missing_containers_are_ignored() {
    let mut doc = FakeDocument::at("/?view=exam");
    doc.prayer_container = None;
    doc.exam_container = None;
    let mut router = ViewRouter::new(doc, "/");

    assert_eq!(router.initialize_view(), ViewState::Exam);
    router.show_view(ViewState::Prayer);

    let doc = router.surface();
    assert_eq!(doc.prayer_container, None);
    assert_eq!(doc.exam_container, None);
    assert_eq!(doc.title, PRAYER_TITLE);
    assert!(doc.prayer_button);
}

#[test]
fn entering_exam_view_refreshes_exams() {
    let exams = RecordingExams::default();
    let calls = Arc::clone(&exams.calls);
    let mut router = ViewRouter::new(FakeDocument::at("/"), "/").with_exam_refresher(exams);

    router.initialize_view();
    assert!(calls.lock().unwrap().is_empty());

    router.show_view(ViewState::Exam);
    assert_eq!(*calls.lock().unwrap(), vec!["load_exams", "update_all_days_left"]);
}

#[test]
fn exam_view_works_without_refresher() {
    let mut router = ViewRouter::new(FakeDocument::at("/"), "/");
    router.show_view(ViewState::Exam);
    assert_eq!(router.surface().title, EXAM_TITLE);
}

#[test]
fn buttons_route_only_after_setup() {
    let mut router = ViewRouter::new(FakeDocument::at("/"), "/");
    router.initialize_view();

    router.handle(NavEvent::ButtonActivated(ViewState::Exam));
    assert_eq!(router.current(), Some(ViewState::Prayer));

    router.setup_navigation();
    assert_eq!(router.surface().bound, vec![ViewState::Prayer, ViewState::Exam]);

    router.handle(NavEvent::ButtonActivated(ViewState::Exam));
    assert_eq!(router.current(), Some(ViewState::Exam));
    assert_eq!(router.surface().location.query(), Some("view=exam"));

    router.handle(NavEvent::ButtonActivated(ViewState::Prayer));
    assert_eq!(router.current(), Some(ViewState::Prayer));
    assert_eq!(router.surface().location.query(), None);
}

#[test]
fn history_navigation_rederives_state_from_url() {
    let mut router = ViewRouter::new(FakeDocument::at("/"), "/");
    router.setup_navigation();
    router.initialize_view();
    router.handle(NavEvent::ButtonActivated(ViewState::Exam));

    // Browser "back" restores the previous URL before firing the event.
    let mut doc = router.into_surface();
    doc.location = "/".parse().unwrap();
    let mut router = ViewRouter::new(doc, "/");

    router.handle(NavEvent::HistoryNavigated);
    assert_eq!(router.current(), Some(ViewState::Prayer));
    assert_eq!(router.surface().title, PRAYER_TITLE);
    assert_eq!(router.surface().exam_container, Some(false));

    router.handle(NavEvent::HistoryNavigated);
    assert_eq!(router.current(), Some(ViewState::Prayer));
}

#[test]
fn view_urls_and_titles() {
    assert_eq!(ViewState::Prayer.url("index.html"), "index.html");
    assert_eq!(ViewState::Exam.url("index.html"), "index.html?view=exam");
    assert_eq!(ViewState::Prayer.title(), "Prayer Times Countdown");
    assert_eq!(ViewState::Exam.title(), "Exam Timetable");
    assert_eq!(ViewState::Exam.other(), ViewState::Prayer);
}
