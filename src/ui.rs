use crate::preferences::ThemeSurface;
use crate::view::{HistoryEntry, ViewState, ViewSurface, PRAYER_TITLE};
use axum::http::Uri;

/// Server-side stand-in for the document: the router and the dark-mode
/// preference write into it, then `render_index` turns it into HTML.
#[derive(Debug, Clone)]
pub struct PageModel {
    location: Uri,
    pub prayer_visible: bool,
    pub exam_visible: bool,
    pub prayer_active: bool,
    pub exam_active: bool,
    pub title: String,
    pub history: Vec<HistoryEntry>,
    pub nav_bound: Vec<ViewState>,
    pub dark_mode: bool,
    pub toggle_checked: bool,
}

impl PageModel {
    pub fn new(location: Uri) -> Self {
        Self {
            location,
            prayer_visible: true,
            exam_visible: false,
            prayer_active: false,
            exam_active: false,
            title: PRAYER_TITLE.to_string(),
            history: Vec::new(),
            nav_bound: Vec::new(),
            dark_mode: false,
            toggle_checked: false,
        }
    }
}

impl ViewSurface for PageModel {
    fn location(&self) -> Uri {
        self.location.clone()
    }

    fn set_view_visible(&mut self, view: ViewState, visible: bool) {
        match view {
            ViewState::Prayer => self.prayer_visible = visible,
            ViewState::Exam => self.exam_visible = visible,
        }
    }

    fn set_button_active(&mut self, view: ViewState, active: bool) {
        match view {
            ViewState::Prayer => self.prayer_active = active,
            ViewState::Exam => self.exam_active = active,
        }
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn bind_nav_button(&mut self, view: ViewState) {
        if !self.nav_bound.contains(&view) {
            self.nav_bound.push(view);
        }
    }
}

impl ThemeSurface for PageModel {
    fn set_dark_class(&mut self, on: bool) {
        self.dark_mode = on;
    }

    fn set_toggle_checked(&mut self, checked: bool) {
        self.toggle_checked = checked;
    }
}

pub fn render_index(page: &PageModel) -> String {
    let history = page.history.last().cloned().unwrap_or_else(|| HistoryEntry {
        label: page.title.clone(),
        url: "/".to_string(),
    });

    INDEX_HTML
        .replace("{{TITLE}}", &page.title)
        .replace("{{BODY_CLASS}}", if page.dark_mode { "dark-mode" } else { "" })
        .replace("{{TOGGLE_CHECKED}}", if page.toggle_checked { "checked" } else { "" })
        .replace("{{PRAYER_DISPLAY}}", display(page.prayer_visible))
        .replace("{{EXAM_DISPLAY}}", display(page.exam_visible))
        .replace("{{PRAYER_ACTIVE}}", active(page.prayer_active))
        .replace("{{EXAM_ACTIVE}}", active(page.exam_active))
        .replace("{{HISTORY_LABEL}}", &js_string(&history.label))
        .replace("{{HISTORY_URL}}", &js_string(&history.url))
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

fn active(on: bool) -> &'static str {
    if on { " active" } else { "" }
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f4efe6;
      --card: #ffffff;
      --ink: #1f2a2e;
      --muted: #6b7378;
      --accent: #1b7f5f;
      --track: #e3ddd2;
    }

    body.dark-mode {
      --bg: #12181b;
      --card: #1d2529;
      --ink: #e8ecee;
      --muted: #9aa4a9;
      --accent: #3fbf8f;
      --track: #2c363b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 16px;
      transition: background 200ms ease, color 200ms ease;
    }

    .app {
      width: min(720px, 100%);
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    nav {
      display: flex;
      gap: 8px;
    }

    nav button {
      border: 1px solid var(--accent);
      background: transparent;
      color: var(--accent);
      border-radius: 999px;
      padding: 8px 16px;
      font: inherit;
      cursor: pointer;
    }

    nav button.active {
      background: var(--accent);
      color: var(--card);
    }

    .toggle {
      display: flex;
      align-items: center;
      gap: 6px;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 24px;
      box-shadow: 0 12px 32px rgba(0, 0, 0, 0.08);
    }

    .next-name {
      font-size: 1.4rem;
      margin: 0 0 4px;
    }

    .remaining {
      font-size: 3rem;
      font-variant-numeric: tabular-nums;
      margin: 0;
    }

    .progress-track {
      height: 10px;
      background: var(--track);
      border-radius: 999px;
      overflow: hidden;
      margin-top: 16px;
    }

    #progress {
      height: 100%;
      width: 0%;
      background: var(--accent);
      transition: width 800ms linear;
    }

    .times {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    .times li {
      display: flex;
      justify-content: space-between;
      padding: 10px 0;
      border-bottom: 1px solid var(--track);
    }

    .times li.next {
      color: var(--accent);
      font-weight: 600;
    }

    .source {
      color: var(--muted);
      font-size: 0.85rem;
      margin-top: 12px;
    }
  </style>
</head>
<body class="{{BODY_CLASS}}">
  <main class="app">
    <header>
      <nav>
        <button id="prayer-btn" class="nav-btn{{PRAYER_ACTIVE}}" type="button">Prayer Times</button>
        <button id="exam-btn" class="nav-btn{{EXAM_ACTIVE}}" type="button">Exams</button>
      </nav>
      <label class="toggle">
        <input id="dark-mode-toggle" type="checkbox" {{TOGGLE_CHECKED}} />
        Dark mode
      </label>
    </header>

    <section id="prayer-view" style="display: {{PRAYER_DISPLAY}}">
      <div class="card">
        <p class="next-name" id="next-name">Loading prayer times...</p>
        <p class="remaining" id="remaining">--:--:--</p>
        <div class="progress-track"><div id="progress"></div></div>
      </div>
      <div class="card">
        <ul class="times" id="times"></ul>
        <p class="source" id="source"></p>
      </div>
    </section>

    <section id="exam-view" style="display: {{EXAM_DISPLAY}}">
      <div class="card" id="exam-list">
        <p class="source">No exams loaded.</p>
      </div>
    </section>
  </main>

  <script>
    const views = {
      prayer: { container: 'prayer-view', button: 'prayer-btn', title: 'Prayer Times Countdown', url: '/' },
      exam: { container: 'exam-view', button: 'exam-btn', title: 'Exam Timetable', url: '/?view=exam' }
    };

    const showView = (name) => {
      Object.entries(views).forEach(([key, view]) => {
        const container = document.getElementById(view.container);
        if (container) {
          container.style.display = key === name ? 'block' : 'none';
        }
        const button = document.getElementById(view.button);
        if (button) {
          button.classList.toggle('active', key === name);
        }
      });

      history.pushState(null, views[name].title, views[name].url);
      document.title = views[name].title;

      if (name === 'exam' && typeof loadExams === 'function') {
        loadExams();
        if (typeof updateAllDaysLeft === 'function') {
          updateAllDaysLeft();
        }
      }
    };

    const initializeView = () => {
      const view = new URLSearchParams(window.location.search).get('view');
      showView(view === 'exam' ? 'exam' : 'prayer');
    };

    history.replaceState(null, {{HISTORY_LABEL}}, {{HISTORY_URL}});
    window.addEventListener('popstate', initializeView);
    document.getElementById('prayer-btn').addEventListener('click', () => showView('prayer'));
    document.getElementById('exam-btn').addEventListener('click', () => showView('exam'));

    document.getElementById('dark-mode-toggle').addEventListener('change', (event) => {
      const enabled = event.target.checked;
      document.body.classList.toggle('dark-mode', enabled);
      fetch('/api/dark-mode', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ enabled })
      }).catch((err) => console.error('Failed to save dark mode', err));
    });

    const pad = (value) => value.toString().padStart(2, '0');

    const formatTimeRemaining = (ms) => {
      const total = Math.max(0, Math.floor(ms / 1000));
      return `${pad(Math.floor(total / 3600))}:${pad(Math.floor((total % 3600) / 60))}:${pad(total % 60)}`;
    };

    const playAdhan = () => {
      try {
        new Audio('https://islamcan.com/audio/adhan/azan1.mp3').play()
          .catch(() => console.log('User interaction required to play Adhan'));
        if ('Notification' in window && Notification.permission === 'granted') {
          new Notification('Prayer Time', { body: "It's time to pray" });
        } else if ('Notification' in window && Notification.permission !== 'denied') {
          Notification.requestPermission();
        }
      } catch (err) {
        console.error('Error playing Adhan', err);
      }
    };

    let deadline = null;
    let windowMs = null;

    const render = (payload) => {
      const list = document.getElementById('times');
      list.innerHTML = '';
      Object.entries(payload.display).forEach(([name, label]) => {
        const item = document.createElement('li');
        item.className = name === payload.countdown.next ? 'next' : '';
        item.innerHTML = `<span>${name}</span><span>${label}</span>`;
        list.appendChild(item);
      });

      document.getElementById('next-name').textContent = `Next: ${payload.countdown.next}`;
      const sources = { live: 'Live times', cached: `Cached times from ${payload.date}`, fallback: 'Approximate times' };
      document.getElementById('source').textContent = sources[payload.tier] || '';

      deadline = Date.now() + payload.countdown.remaining_ms;
      const progress = payload.countdown.progress / 100;
      windowMs = progress < 1 ? payload.countdown.remaining_ms / (1 - progress) : null;
    };

    const refresh = async () => {
      const res = await fetch('/api/prayer-times');
      if (!res.ok) {
        throw new Error(await res.text());
      }
      render(await res.json());
    };

    const tick = () => {
      if (deadline === null) {
        return;
      }
      const remaining = deadline - Date.now();
      document.getElementById('remaining').textContent = formatTimeRemaining(remaining);
      if (windowMs) {
        const progress = Math.min(100, Math.max(0, (1 - remaining / windowMs) * 100));
        document.getElementById('progress').style.width = `${progress}%`;
      }
      if (remaining <= 0) {
        deadline = null;
        playAdhan();
        refresh().catch((err) => console.error('Failed to refresh prayer times', err));
      }
    };

    refresh().catch((err) => console.error('Failed to load prayer times', err));
    setInterval(tick, 1000);
  </script>
</body>
</html>
"#;
