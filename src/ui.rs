use crate::models::ReportType;

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{REPORT_PANEL}}", &report_panel(""))
        .replace("{{REPORT_SCRIPT}}", REPORT_SCRIPT)
}

pub fn render_report(embark_id: Option<&str>) -> String {
    let (title, prefill) = match embark_id {
        Some(id) => (escape_html(id), escape_html(id)),
        None => ("No ID Provided".to_string(), String::new()),
    };
    // Fixed fragments first, user-derived text last.
    REPORT_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{REPORT_SCRIPT}}", REPORT_SCRIPT)
        .replace("{{EMBARK_ID_JSON}}", &embark_id_json(embark_id))
        .replace("{{TITLE}}", &title)
        .replace("{{REPORT_PANEL}}", &report_panel(&prefill))
}

fn report_panel(prefill: &str) -> String {
    let buttons: String = ReportType::ALL
        .iter()
        .map(|kind| {
            format!(
                r#"<button class="report-type-btn" type="button" data-type="{kind}">{}</button>"#,
                display_name(*kind)
            )
        })
        .collect();
    REPORT_PANEL
        .replace("{{PREFILL}}", prefill)
        .replace("{{TYPE_BUTTONS}}", &buttons)
}

fn display_name(kind: ReportType) -> &'static str {
    match kind {
        ReportType::Aimbot => "Aimbot",
        ReportType::Wallhack => "Wallhack",
        ReportType::Macro => "Macro",
        ReportType::Glitch => "Glitch abuse",
        ReportType::Goodplayer => "Good player",
    }
}

/// JSON literal safe to drop inside a `<script>` block.
fn embark_id_json(embark_id: Option<&str>) -> String {
    serde_json::to_string(&embark_id)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('{', "\\u007b")
        .replace('}', "\\u007d")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"
    :root {
      --bg: #111111;
      --card: #1b1b1b;
      --ink: #f2f2f2;
      --muted: #b0b0b0;
      --accent: #d32f2f;
      --grid: #2a2a2a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 48px 16px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 2.2rem;
      letter-spacing: 0.04em;
    }

    .subtitle, .hint {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--grid);
      border-radius: 16px;
      padding: 20px;
    }

    .row {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    input {
      flex: 1;
      min-width: 220px;
      background: #0c0c0c;
      color: var(--ink);
      border: 1px solid var(--grid);
      border-radius: 10px;
      padding: 12px 14px;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .report-panel {
      display: none;
      gap: 14px;
    }

    .report-panel.active {
      display: grid;
    }

    .report-type-btn {
      background: transparent;
      border: 1px solid var(--grid);
      color: var(--muted);
    }

    .report-type-btn.selected {
      border-color: var(--accent);
      color: var(--ink);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #ff6b6b;
    }

    .status[data-type="ok"] {
      color: #6bd68a;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 12px;
    }

    .stat .label {
      display: block;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .stat .value {
      font-size: 1.8rem;
      font-weight: 700;
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-line {
      fill: rgba(211, 47, 47, 0.1);
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-point {
      fill: var(--accent);
      stroke: #ffffff;
      stroke-width: 1;
    }

    .chart-grid {
      stroke: var(--grid);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }
"#;

const REPORT_PANEL: &str = r#"
      <section class="card">
        <button id="reportBtn" type="button">Report a player</button>
        <div id="reportPanel" class="report-panel">
          <input id="reportInput" type="text" placeholder="Name#1234" value="{{PREFILL}}" />
          <div class="row">{{TYPE_BUTTONS}}</div>
          <div class="row">
            <button id="submitReportBtn" type="button">Submit</button>
          </div>
          <div class="status" id="reportStatus"></div>
        </div>
      </section>
"#;

const REPORT_SCRIPT: &str = r#"
    const EMBARK_ID_FORMAT = /^[A-Za-z0-9_]{3,16}#[0-9]{4}$/;
    const INVALID_ID = "The ID entered does not follow Embark ID's proper format";

    const setStatus = (el, message, type) => {
      el.textContent = message;
      el.dataset.type = type || '';
    };

    const readJson = async (response, fallback) => {
      let data = null;
      try {
        data = await response.json();
      } catch (err) {
        data = null;
      }
      if (!response.ok) {
        throw new Error((data && data.error) || fallback);
      }
      return data;
    };

    const reportBtn = document.getElementById('reportBtn');
    const reportPanel = document.getElementById('reportPanel');
    const reportInput = document.getElementById('reportInput');
    const submitReportBtn = document.getElementById('submitReportBtn');
    const reportStatus = document.getElementById('reportStatus');
    const typeButtons = Array.from(document.querySelectorAll('.report-type-btn'));
    let selectedType = null;

    reportBtn.addEventListener('click', () => {
      reportPanel.classList.toggle('active');
      if (reportPanel.classList.contains('active')) {
        reportInput.focus();
      }
    });

    typeButtons.forEach((btn) => {
      btn.addEventListener('click', () => {
        typeButtons.forEach((other) => other.classList.remove('selected'));
        btn.classList.add('selected');
        selectedType = btn.dataset.type;
      });
    });

    submitReportBtn.addEventListener('click', async () => {
      const embarkId = reportInput.value.trim();
      if (!EMBARK_ID_FORMAT.test(embarkId)) {
        setStatus(reportStatus, INVALID_ID, 'error');
        return;
      }
      if (!selectedType) {
        setStatus(reportStatus, 'Please select a report type', 'error');
        return;
      }

      submitReportBtn.textContent = 'Submitting...';
      submitReportBtn.disabled = true;
      try {
        const response = await fetch('/api/reports/submit', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ embarkId, reportType: selectedType })
        });
        await readJson(response, 'Failed to submit report');
        setStatus(reportStatus, `Report submitted successfully for ${embarkId}`, 'ok');
        typeButtons.forEach((other) => other.classList.remove('selected'));
        selectedType = null;
        document.dispatchEvent(new CustomEvent('report-submitted', { detail: embarkId }));
      } catch (err) {
        setStatus(reportStatus, err.message || 'Failed to submit report. Please try again.', 'error');
      } finally {
        submitReportBtn.textContent = 'Submit';
        submitReportBtn.disabled = false;
      }
    });
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Topside Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Topside Tracker</h1>
      <p class="subtitle">Look up anonymous player reports by Embark ID.</p>
    </header>
    <section class="card">
      <div class="row">
        <input id="searchInput" type="text" placeholder="Name#1234" autofocus />
        <button id="searchBtn" type="button">Search</button>
      </div>
      <div class="status" id="searchError" data-type="error"></div>
    </section>
{{REPORT_PANEL}}
  </main>
  <script>
{{REPORT_SCRIPT}}
    const searchInput = document.getElementById('searchInput');
    const searchBtn = document.getElementById('searchBtn');
    const searchError = document.getElementById('searchError');

    const handleSearch = async () => {
      const embarkId = searchInput.value.trim();
      searchError.textContent = '';
      if (!EMBARK_ID_FORMAT.test(embarkId)) {
        searchError.textContent = INVALID_ID;
        return;
      }

      searchBtn.textContent = 'Searching...';
      searchBtn.disabled = true;
      try {
        const response = await fetch(`/api/reports/${encodeURIComponent(embarkId)}`);
        await readJson(response, 'Failed to retrieve reports');
        window.location.href = `/report?id=${encodeURIComponent(embarkId)}`;
      } catch (err) {
        searchError.textContent = err.message || 'An error occurred while searching';
      } finally {
        searchBtn.textContent = 'Search';
        searchBtn.disabled = false;
      }
    };

    searchBtn.addEventListener('click', handleSearch);
    searchInput.addEventListener('keydown', (event) => {
      if (event.key === 'Enter') {
        handleSearch();
      }
    });
  </script>
</body>
</html>
"#;

const REPORT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} - Topside Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="embarkId">{{TITLE}}</h1>
      <p class="subtitle"><a href="/" style="color: inherit">Back to search</a></p>
    </header>
    <section class="card stats">
      <div class="stat"><span class="label">Negative reports</span><span class="value" id="totalReports">0</span></div>
      <div class="stat"><span class="label">Aimbot</span><span class="value" id="aimbotCount">0</span></div>
      <div class="stat"><span class="label">Wallhack</span><span class="value" id="wallhackCount">0</span></div>
      <div class="stat"><span class="label">Macro</span><span class="value" id="macroCount">0</span></div>
      <div class="stat"><span class="label">Glitch abuse</span><span class="value" id="glitchCount">0</span></div>
      <div class="stat"><span class="label">Good player</span><span class="value" id="goodplayerCount">0</span></div>
    </section>
    <section class="card">
      <h2 style="margin: 0 0 12px">Reports, last <span id="windowDays">30</span> days</h2>
      <svg id="chart" viewBox="0 0 600 280" aria-label="Report trend" role="img"></svg>
      <p class="hint" id="chartHint"></p>
    </section>
{{REPORT_PANEL}}
  </main>
  <script>
{{REPORT_SCRIPT}}
    const EMBARK_ID = {{EMBARK_ID_JSON}};
    const chartEl = document.getElementById('chart');
    const chartHint = document.getElementById('chartHint');

    const renderMessage = (message) => {
      chartEl.innerHTML = `<text class="chart-label" x="50%" y="50%" text-anchor="middle">${message}</text>`;
    };

    const renderLineChart = (labels, counts) => {
      if (!labels.length) {
        renderMessage('No data yet');
        return;
      }
      const width = 600;
      const height = 280;
      const paddingX = 40;
      const paddingY = 44;
      const top = 16;
      const max = Math.max(1, ...counts);
      const xStep = labels.length > 1 ? (width - paddingX * 2) / (labels.length - 1) : 0;
      const scaleY = (height - top - paddingY) / max;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - value * scaleY;

      const line = counts
        .map((value, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(value).toFixed(2)}`)
        .join(' ');
      const area = `${line} L ${x(counts.length - 1).toFixed(2)} ${y(0)} L ${x(0).toFixed(2)} ${y(0)} Z`;

      const step = Math.max(1, Math.ceil(max / 5));
      let grid = '';
      for (let value = 0; value <= max; value += step) {
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${value}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(labels.length / 15));
      const xLabels = labels
        .map((label, index) => index % labelEvery === 0
          ? `<text class="chart-label" transform="translate(${x(index)} ${height - paddingY + 14}) rotate(45)">${label}</text>`
          : '')
        .join('');
      const points = counts
        .map((value, index) => `<circle class="chart-point" cx="${x(index)}" cy="${y(value)}" r="3"><title>${labels[index]}: ${value === 1 ? '1 report' : `${value} reports`}</title></circle>`)
        .join('');

      chartEl.innerHTML = `${grid}<path class="chart-line" d="${area}" />${points}${xLabels}`;
    };

    const loadTrend = async () => {
      try {
        const response = await fetch(`/api/reports/${encodeURIComponent(EMBARK_ID)}/trend`);
        const trend = await readJson(response, 'Failed to retrieve report history');
        document.getElementById('windowDays').textContent = trend.windowDays;
        chartHint.textContent = `Days are counted in ${trend.timezone}.`;
        renderLineChart(trend.labels, trend.counts);
      } catch (err) {
        renderMessage('Unable to load chart data');
      }
    };

    const loadReportData = async () => {
      if (!EMBARK_ID) {
        return;
      }
      try {
        const response = await fetch(`/api/reports/${encodeURIComponent(EMBARK_ID)}`);
        const result = await readJson(response, 'Failed to retrieve reports');
        document.getElementById('embarkId').textContent = result.embarkId;
        document.getElementById('totalReports').textContent = result.totalNegative;
        ['aimbot', 'wallhack', 'macro', 'glitch', 'goodplayer'].forEach((kind) => {
          document.getElementById(`${kind}Count`).textContent = result.counts[kind];
        });
      } catch (err) {
        document.getElementById('totalReports').textContent = '0';
      }
      await loadTrend();
    };

    document.addEventListener('report-submitted', (event) => {
      if (event.detail === EMBARK_ID) {
        loadReportData();
      }
    });

    loadReportData();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_page_escapes_embark_id() {
        let html = render_report(Some("<b>x</b>#1234"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;#1234"));
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains(r#""\u003cb\u003ex\u003c/b\u003e#1234""#));
    }

    #[test]
    fn report_page_id_cannot_inject_placeholders() {
        let placeholders = ["{{EMBARK_ID_JSON}}", "{{TITLE}}", "{{PREFILL}}", "{{REPORT_PANEL}}"];
        for placeholder in placeholders {
            let id = format!("{placeholder} autofocus onfocus=alert(1) x");
            let html = render_report(Some(&id));
            assert!(!html.contains(r#"value="""#), "{placeholder}");
            assert!(!html.contains(r#"" autofocus onfocus"#), "{placeholder}");
            assert!(html.contains(r#"value="&#123;&#123;"#), "{placeholder}");
            assert!(html.contains(r#"const EMBARK_ID = "\u007b\u007b"#), "{placeholder}");
            assert_eq!(html.matches("const EMBARK_ID =").count(), 1, "{placeholder}");
            assert_eq!(html.matches(r#"id="reportPanel""#).count(), 1, "{placeholder}");
        }
    }

    #[test]
    fn report_page_without_id() {
        let html = render_report(None);
        assert!(html.contains("No ID Provided"));
        assert!(html.contains("const EMBARK_ID = null;"));
    }

    #[test]
    fn index_lists_every_report_type() {
        let html = render_index();
        for kind in ReportType::ALL {
            assert!(html.contains(&format!(r#"data-type="{kind}""#)));
        }
        assert!(!html.contains("{{"));
    }
}
