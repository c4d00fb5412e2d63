//! Two-state view router. Which of the prayer and exam views is showing is
//! always derivable from the URL; every transition rewrites visibility, the
//! nav highlight, history and the document title together.

use axum::{extract::Query, http::Uri};
use serde::Serialize;
use tracing::debug;

pub const PRAYER_TITLE: &str = "Prayer Times Countdown";
pub const EXAM_TITLE: &str = "Exam Timetable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Prayer,
    Exam,
}

impl ViewState {
    pub fn title(self) -> &'static str {
        match self {
            ViewState::Prayer => PRAYER_TITLE,
            ViewState::Exam => EXAM_TITLE,
        }
    }

    pub fn other(self) -> Self {
        match self {
            ViewState::Prayer => ViewState::Exam,
            ViewState::Exam => ViewState::Prayer,
        }
    }

    /// URL for this view relative to the page's base path.
    pub fn url(self, base_path: &str) -> String {
        match self {
            ViewState::Prayer => base_path.to_string(),
            ViewState::Exam => format!("{base_path}?view=exam"),
        }
    }

    pub fn from_param(view: Option<&str>) -> Self {
        match view {
            Some("exam") => ViewState::Exam,
            _ => ViewState::Prayer,
        }
    }

    /// Reads the first `view` value, as `URLSearchParams.get` does. Anything
    /// but `exam`, including an unparsable query, is the prayer view.
    pub fn from_uri(uri: &Uri) -> Self {
        let view = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .ok()
            .and_then(|Query(pairs)| pairs.into_iter().find(|(key, _)| key == "view"))
            .map(|(_, value)| value);
        Self::from_param(view.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub label: String,
    pub url: String,
}

/// The page affordances the router drives.
///
/// Implementations treat a missing container as a no-op.
pub trait ViewSurface {
    fn location(&self) -> Uri;
    fn set_view_visible(&mut self, view: ViewState, visible: bool);
    fn set_button_active(&mut self, view: ViewState, active: bool);
    fn push_history(&mut self, entry: HistoryEntry);
    fn set_title(&mut self, title: &str);
    fn bind_nav_button(&mut self, view: ViewState);
}

/// Exam timetable hooks run whenever the exam view is entered.
pub trait ExamRefresher {
    fn load_exams(&mut self);
    fn update_all_days_left(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ButtonActivated(ViewState),
    HistoryNavigated,
}

pub struct ViewRouter<S> {
    surface: S,
    exams: Option<Box<dyn ExamRefresher + Send>>,
    base_path: String,
    current: Option<ViewState>,
    navigation_bound: bool,
}

impl<S: ViewSurface> ViewRouter<S> {
    pub fn new(surface: S, base_path: impl Into<String>) -> Self {
        Self {
            surface,
            exams: None,
            base_path: base_path.into(),
            current: None,
            navigation_bound: false,
        }
    }

    pub fn with_exam_refresher(mut self, exams: impl ExamRefresher + Send + 'static) -> Self {
        self.exams = Some(Box::new(exams));
        self
    }

    /// `None` until the first transition.
    pub fn current(&self) -> Option<ViewState> {
        self.current
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn show_view(&mut self, target: ViewState) {
        self.surface.set_view_visible(target, true);
        self.surface.set_view_visible(target.other(), false);
        self.surface.set_button_active(target, true);
        self.surface.set_button_active(target.other(), false);
        self.surface.push_history(HistoryEntry {
            label: target.title().to_string(),
            url: target.url(&self.base_path),
        });
        self.surface.set_title(target.title());
        self.current = Some(target);

        if target == ViewState::Exam {
            if let Some(exams) = self.exams.as_mut() {
                exams.load_exams();
                exams.update_all_days_left();
            }
        }
    }

    pub fn initialize_view(&mut self) -> ViewState {
        let target = ViewState::from_uri(&self.surface.location());
        self.show_view(target);
        target
    }

    /// Back/forward: re-derive from the URL, never from a stored stack.
    pub fn on_history_navigation(&mut self) -> ViewState {
        self.initialize_view()
    }

    pub fn setup_navigation(&mut self) {
        self.surface.bind_nav_button(ViewState::Prayer);
        self.surface.bind_nav_button(ViewState::Exam);
        self.navigation_bound = true;
    }

    pub fn handle(&mut self, event: NavEvent) {
        match event {
            NavEvent::ButtonActivated(view) if self.navigation_bound => self.show_view(view),
            NavEvent::ButtonActivated(view) => {
                debug!("ignoring {view:?} button activation before navigation setup");
            }
            NavEvent::HistoryNavigated => {
                self.on_history_navigation();
            }
        }
    }
}
