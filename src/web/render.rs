use crate::domain::model::{FormInput, Outcome, SeriesResult};
use std::fmt::Write;

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang='en'>
<head>
  <meta charset='UTF-8' />
  <meta name='viewport' content='width=device-width, initial-scale=1.0' />
  <title>BLS Data Puller</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; max-width: 900px; }
    form { display: grid; gap: 0.75rem; margin-bottom: 1.5rem; }
    label { display: grid; gap: 0.25rem; }
    input { padding: 0.4rem; font-size: 1rem; }
    button { width: fit-content; padding: 0.5rem 1rem; }
    .error { color: #b30000; margin-bottom: 1rem; }
    table { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }
    th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }
    th { background-color: #f5f5f5; }
    code { background: #f1f1f1; padding: 0.1rem 0.3rem; border-radius: 4px; }
  </style>
</head>
<body>
  <h1>BLS Data Puller</h1>
  <p>Enter one or more BLS series IDs (comma-separated), a year range, and a registration key.</p>
"#;

const PAGE_TAIL: &str = "</body></html>";

/// 跳脫 `& < > " '`，文字節點與單引號屬性共用
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 所有插入頁面的值都必須經過 [`escape_html`]
pub fn render_page(form: &FormInput, outcome: &Outcome) -> String {
    let mut page = String::from(PAGE_HEAD);

    render_form(&mut page, form);

    if let Some(message) = outcome.error_message() {
        let _ = writeln!(
            page,
            "<p class='error'><strong>Error:</strong> {}</p>",
            escape_html(message)
        );
    }

    for series in outcome.series() {
        render_series(&mut page, series);
    }

    page.push_str(PAGE_TAIL);
    page
}

fn render_form(page: &mut String, form: &FormInput) {
    let _ = write!(
        page,
        "  <form method='post'>
    <label>Series IDs <input name='series_ids' value='{}' required /></label>
    <label>Start Year <input name='start_year' type='number' value='{}' required /></label>
    <label>End Year <input name='end_year' type='number' value='{}' required /></label>
    <label>Registration Key <input name='registration_key' value='{}' required /></label>
    <button type='submit'>Fetch Data</button>
  </form>
",
        escape_html(&form.series_ids),
        escape_html(&form.start_year),
        escape_html(&form.end_year),
        escape_html(&form.registration_key),
    );
}

fn render_series(page: &mut String, series: &SeriesResult) {
    let _ = write!(
        page,
        "<h2>Series: <code>{}</code></h2>",
        escape_html(&series.series_id)
    );
    page.push_str(
        "<table><thead><tr><th>Year</th><th>Period</th><th>Value</th></tr></thead><tbody>",
    );
    for row in &series.data {
        let _ = write!(
            page,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.year),
            escape_html(&row.period_name),
            escape_html(&row.value)
        );
    }
    page.push_str("</tbody></table>\n");
}
