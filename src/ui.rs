use crate::models::TodayResponse;

pub fn render_index(today: &TodayResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.date)
        .replace("{{COUNT}}", &today.count.to_string())
        .replace("{{ALL_TIME}}", &today.all_time.to_string())
        .replace("{{GOAL}}", &today.goal.to_string())
        .replace("{{PERCENT}}", &today.percent.to_string())
        .replace("{{THEME}}", &today.theme)
        .replace("{{AUTO_ACTIVE}}", &today.auto_active.to_string())
        .replace("{{AUTO_INTERVAL}}", &today.auto_interval_ms.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Scripture Scroll</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #faf5e8;
      --bg-2: #f0e2c9;
      --ink: #6b4426;
      --ink-soft: #8a6a4f;
      --accent: #e29f36;
      --card: #fff9f0;
      --edge: #efe2c4;
      --shadow: 0 24px 60px rgba(107, 68, 38, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(160deg, var(--bg-1), #fbf7f1 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border: 1px solid var(--edge);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      align-items: center;
      gap: 14px;
    }

    .symbol {
      width: 56px;
      height: 56px;
      border-radius: 50%;
      background: var(--bg-2);
      display: grid;
      place-items: center;
      font-size: 26px;
      color: var(--ink);
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
      margin: 0;
    }

    .subtitle {
      margin: 2px 0 0;
      color: var(--ink-soft);
      font-size: 0.95rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 16px;
      padding: 14px 16px;
      border: 1px solid var(--edge);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--ink-soft);
    }

    .stat .value {
      font-size: 1.4rem;
      font-weight: 600;
    }

    .tap-area {
      border: 1px solid var(--edge);
      border-radius: 18px;
      background: white;
      padding: 36px 20px;
      text-align: center;
      cursor: pointer;
      user-select: none;
      transition: transform 120ms ease;
    }

    .tap-area:active {
      transform: scale(0.99);
    }

    .tap-area .count {
      font-size: 64px;
      font-weight: 300;
      line-height: 1;
    }

    .tap-area.pulse .count {
      animation: pulse 240ms ease;
    }

    .tap-hint {
      margin-top: 8px;
      color: var(--ink-soft);
      font-size: 0.9rem;
    }

    .progress-wrap[hidden] {
      display: none;
    }

    .progress-bar {
      width: 100%;
      height: 12px;
      background: var(--bg-2);
      border-radius: 12px;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      width: 0;
      background: var(--accent);
      transition: width 200ms ease;
    }

    .progress-text {
      margin-top: 6px;
      text-align: center;
      color: var(--ink-soft);
      font-weight: 600;
      font-size: 0.9rem;
    }

    .controls {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    button {
      appearance: none;
      border: 1px solid var(--edge);
      background: white;
      color: var(--ink);
      border-radius: 14px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 120ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    .round {
      width: 64px;
      height: 64px;
      border-radius: 50%;
      font-size: 28px;
      padding: 0;
    }

    .round.plus {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    .row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 12px;
    }

    .goal-row,
    .auto-row {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
    }

    input[type="number"] {
      border: 1px solid var(--edge);
      border-radius: 12px;
      padding: 10px 12px;
      font-size: 1rem;
      color: var(--ink);
      background: white;
      width: 130px;
    }

    .auto-row .state {
      color: var(--ink-soft);
      font-size: 0.9rem;
    }

    .themes {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .swatch {
      width: 30px;
      height: 30px;
      border-radius: 50%;
      border: 2px solid transparent;
      padding: 0;
    }

    .swatch.selected {
      border-color: var(--ink);
    }

    .history {
      border-top: 1px solid var(--edge);
      padding-top: 16px;
      display: grid;
      gap: 12px;
    }

    .history-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
      flex-wrap: wrap;
      gap: 10px;
    }

    .history-head h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .history-metrics {
      display: flex;
      gap: 16px;
      color: var(--ink-soft);
      font-size: 0.9rem;
    }

    .history-list {
      display: grid;
      gap: 8px;
    }

    .history-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: white;
      border: 1px solid var(--edge);
      border-radius: 12px;
      padding: 10px 14px;
      gap: 10px;
    }

    .history-item .meta {
      color: var(--ink-soft);
      font-size: 0.85rem;
    }

    .badge {
      border-radius: 8px;
      padding: 4px 10px;
      font-size: 0.8rem;
      font-weight: 700;
      color: white;
      background: #c8bca8;
    }

    .badge.achieved {
      background: var(--accent);
    }

    .link {
      border: none;
      background: none;
      color: var(--ink-soft);
      font-size: 0.85rem;
      padding: 4px;
      text-decoration: underline;
    }

    .empty {
      text-align: center;
      color: var(--ink-soft);
      padding: 12px 0;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--ink-soft);
      text-align: center;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @keyframes pulse {
      from {
        transform: scale(1.12);
      }
      to {
        transform: scale(1);
      }
    }

    @media (max-width: 520px) {
      .app {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div class="symbol">ॐ</div>
      <div>
        <h1>Scripture Scroll</h1>
        <p class="subtitle">Mindful counter for a daily practice</p>
      </div>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Date</span>
        <span id="date" class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Goal</span>
        <span id="goal" class="value">{{GOAL}}</span>
      </div>
      <div class="stat">
        <span class="label">All-time</span>
        <span id="all-time" class="value">{{ALL_TIME}}</span>
      </div>
    </section>

    <div id="tap-area" class="tap-area" role="button" tabindex="0" aria-label="Add one count">
      <div id="count" class="count">{{COUNT}}</div>
      <div class="tap-hint">Tap to count — each tap is an offering</div>
    </div>

    <div id="progress-wrap" class="progress-wrap" hidden>
      <div class="progress-bar">
        <div id="progress-fill" class="progress-fill" style="width: {{PERCENT}}%"></div>
      </div>
      <div id="progress-text" class="progress-text"></div>
    </div>

    <section class="controls">
      <button id="untap" class="round" type="button" aria-label="Subtract one">−</button>
      <button id="reset" type="button">Reset today</button>
      <button id="reset-total" type="button">Reset all-time</button>
      <button id="tap" class="round plus" type="button" aria-label="Add one">+</button>
    </section>

    <section class="goal-row">
      <label for="goal-input">Daily goal</label>
      <input id="goal-input" type="number" min="0" step="1" placeholder="e.g. 108" />
      <button id="goal-save" type="button">Set goal</button>
      <button id="goal-clear" class="link" type="button">Clear</button>
    </section>

    <section class="auto-row">
      <label for="auto-interval">Auto tally every</label>
      <input id="auto-interval" type="number" min="300" step="100" value="{{AUTO_INTERVAL}}" /> ms
      <button id="auto-toggle" type="button">Start</button>
      <span id="auto-state" class="state"></span>
    </section>

    <section class="themes" aria-label="Theme color">
      <span class="label">Theme</span>
      <!-- swatches are injected from the palette below -->
    </section>

    <section class="history">
      <div class="history-head">
        <h2>Daily history</h2>
        <div class="history-metrics">
          <span>Best day: <strong id="best-day">0</strong></span>
          <span>Streak: <strong id="streak">0</strong></span>
          <button id="history-clear" class="link" type="button">Clear all</button>
        </div>
      </div>
      <div id="history-list" class="history-list">
        <div class="empty">No history yet — begin your practice.</div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const PALETTE = {
      saffron: '#e29f36',
      lotus: '#c96a8a',
      river: '#4a7fa5',
      moss: '#6f8f4f',
      dusk: '#7a6aa5'
    };

    const countEl = document.getElementById('count');
    const dateEl = document.getElementById('date');
    const goalEl = document.getElementById('goal');
    const allTimeEl = document.getElementById('all-time');
    const tapArea = document.getElementById('tap-area');
    const progressWrap = document.getElementById('progress-wrap');
    const progressFill = document.getElementById('progress-fill');
    const progressText = document.getElementById('progress-text');
    const goalInput = document.getElementById('goal-input');
    const autoInterval = document.getElementById('auto-interval');
    const autoToggle = document.getElementById('auto-toggle');
    const autoState = document.getElementById('auto-state');
    const statusEl = document.getElementById('status');
    const historyList = document.getElementById('history-list');
    const bestDayEl = document.getElementById('best-day');
    const streakEl = document.getElementById('streak');
    const themesEl = document.querySelector('.themes');

    let autoActive = {{AUTO_ACTIVE}};
    let currentTheme = '{{THEME}}';
    let autoRefresh = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const applyTheme = (name) => {
      currentTheme = name;
      if (PALETTE[name]) {
        document.documentElement.style.setProperty('--accent', PALETTE[name]);
      }
      document.querySelectorAll('.swatch').forEach((el) => {
        el.classList.toggle('selected', el.dataset.theme === name);
      });
    };

    const updateUI = (data, pulse) => {
      dateEl.textContent = data.date;
      countEl.textContent = data.count;
      allTimeEl.textContent = data.all_time;
      goalEl.textContent = data.goal > 0 ? data.goal : '—';

      if (data.goal > 0) {
        progressWrap.hidden = false;
        progressFill.style.width = data.percent + '%';
        progressText.textContent = `${data.count} / ${data.goal} — ${data.percent}%`;
      } else {
        progressWrap.hidden = true;
      }

      autoActive = data.auto_active;
      autoToggle.textContent = autoActive ? 'Stop' : 'Start';
      autoState.textContent = autoActive ? `running at ${data.auto_interval_ms} ms` : '';
      applyTheme(data.theme);

      if (pulse) {
        tapArea.classList.remove('pulse');
        void tapArea.offsetWidth;
        tapArea.classList.add('pulse');
      }

      if (autoActive && !autoRefresh) {
        autoRefresh = setInterval(() => loadToday().catch(() => {}), 1000);
      }
      if (!autoActive && autoRefresh) {
        clearInterval(autoRefresh);
        autoRefresh = null;
      }
    };

    const request = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) =>
      request(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });

    const loadToday = async () => {
      updateUI(await request('/api/today'));
    };

    const renderHistory = (data) => {
      bestDayEl.textContent = data.best_day_count;
      streakEl.textContent = data.current_streak;

      if (!data.entries.length) {
        historyList.innerHTML = '<div class="empty">No history yet — begin your practice.</div>';
        return;
      }

      historyList.innerHTML = '';
      data.entries.forEach((entry) => {
        const item = document.createElement('div');
        item.className = 'history-item';

        const left = document.createElement('div');
        const dateLine = document.createElement('div');
        dateLine.textContent = formatDate(entry.date);
        const meta = document.createElement('div');
        meta.className = 'meta';
        meta.textContent = entry.goal > 0
          ? `Count: ${entry.count} • Goal: ${entry.goal}`
          : `Count: ${entry.count}`;
        left.append(dateLine, meta);

        const right = document.createElement('div');
        const badge = document.createElement('span');
        badge.className = entry.completed ? 'badge achieved' : 'badge';
        badge.textContent = entry.completed ? '✓ Achieved' : '—';
        const del = document.createElement('button');
        del.className = 'link';
        del.type = 'button';
        del.textContent = 'Delete';
        del.addEventListener('click', () => {
          if (!confirm(`Delete the entry for ${entry.date}?`)) {
            return;
          }
          request(`/api/history/${entry.date}`, { method: 'DELETE' })
            .then(renderHistory)
            .catch((err) => setStatus(err.message, 'error'));
        });
        right.append(badge, del);

        item.append(left, right);
        historyList.append(item);
      });
    };

    const loadHistory = async () => {
      renderHistory(await request('/api/history'));
    };

    const formatDate = (value) => {
      const parsed = new Date(value + 'T00:00:00');
      if (Number.isNaN(parsed.getTime())) {
        return value;
      }
      return parsed.toLocaleDateString(undefined, {
        weekday: 'short',
        year: 'numeric',
        month: 'short',
        day: 'numeric'
      });
    };

    tapArea.addEventListener('click', () => {
      post('/api/tap')
        .then((data) => updateUI(data, true))
        .catch((err) => setStatus(err.message, 'error'));
    });

    tapArea.addEventListener('keydown', (event) => {
      if (event.key === 'Enter' || event.key === ' ') {
        event.preventDefault();
        tapArea.click();
      }
    });

    document.getElementById('tap').addEventListener('click', () => tapArea.click());

    document.getElementById('untap').addEventListener('click', () => {
      post('/api/untap')
        .then((data) => updateUI(data))
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('reset').addEventListener('click', () => {
      if (!confirm("Reset today's count? It will be saved to history first.")) {
        return;
      }
      post('/api/reset')
        .then((data) => {
          updateUI(data);
          return loadHistory();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('reset-total').addEventListener('click', () => {
      if (!confirm('Reset the all-time total?')) {
        return;
      }
      post('/api/reset-total')
        .then((data) => updateUI(data))
        .catch((err) => setStatus(err.message, 'error'));
    });

    const saveGoal = (value) => {
      post('/api/goal', { goal: value })
        .then((data) => {
          updateUI(data);
          goalInput.value = '';
          setStatus('Goal saved', 'ok');
          setTimeout(() => setStatus('', ''), 1200);
        })
        .catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('goal-save').addEventListener('click', () => {
      const value = parseInt(goalInput.value, 10);
      if (Number.isNaN(value) || value < 0) {
        setStatus('Please enter a valid non-negative number', 'error');
        return;
      }
      saveGoal(value);
    });

    document.getElementById('goal-clear').addEventListener('click', () => saveGoal(0));

    autoToggle.addEventListener('click', () => {
      const action = autoActive
        ? post('/api/auto/stop')
        : post('/api/auto/start', { interval_ms: parseInt(autoInterval.value, 10) || 0 });
      action
        .then((data) => updateUI(data))
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('history-clear').addEventListener('click', () => {
      if (!confirm('Remove all history? This cannot be undone.')) {
        return;
      }
      request('/api/history', { method: 'DELETE' })
        .then(renderHistory)
        .catch((err) => setStatus(err.message, 'error'));
    });

    Object.keys(PALETTE).forEach((name) => {
      const swatch = document.createElement('button');
      swatch.className = 'swatch';
      swatch.type = 'button';
      swatch.dataset.theme = name;
      swatch.title = name;
      swatch.style.background = PALETTE[name];
      swatch.addEventListener('click', () => {
        post('/api/theme', { color: name })
          .then((data) => updateUI(data))
          .catch((err) => setStatus(err.message, 'error'));
      });
      themesEl.append(swatch);
    });

    applyTheme(currentTheme);
    loadToday().catch((err) => setStatus(err.message, 'error'));
    loadHistory().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
