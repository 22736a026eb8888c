//! Server-rendered HTML for the agenda pages.
//!
//! No template engine: the pages are small and assembled with `format!`,
//! and the stylesheet is embedded directly in the binary for easy
//! deployment.

use agenda_core::{Category, Event};
use chrono::{Datelike, Months, NaiveDate};

/// Chip color for events without a category.
pub const DEFAULT_EVENT_COLOR: &str = "#3174ad";

const MONTH_NAMES: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = ["ma", "di", "wo", "do", "vr", "za", "zo"];

const STYLE: &str = r#"
* { box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0 auto;
    max-width: 900px;
    padding: 20px;
    color: #1f2937;
}
h1, h2 { text-align: center; }
a { color: #3174ad; }
form.stacked {
    display: flex;
    flex-direction: column;
    gap: 8px;
    max-width: 300px;
    margin: 0 auto 30px;
}
form.stacked input, form.stacked select, form.stacked button { padding: 6px; }
button, .button {
    cursor: pointer;
    border: 1px solid #9ca3af;
    border-radius: 4px;
    background: #f3f4f6;
    padding: 6px 12px;
    text-decoration: none;
    color: inherit;
    display: inline-block;
}
button.danger { background: #ff4d4d; color: white; border-color: #ff4d4d; }
table.calendar { width: 100%; border-collapse: collapse; margin-top: 30px; }
table.calendar th { padding: 6px; text-align: left; }
table.calendar td {
    border: 1px solid #d1d5db;
    vertical-align: top;
    width: 14.28%;
    height: 80px;
    padding: 4px;
}
table.calendar td.empty { background: #f9fafb; }
.month-nav { display: flex; justify-content: space-between; align-items: center; }
.chip {
    display: block;
    border-radius: 5px;
    color: white;
    padding: 2px 5px;
    margin-top: 3px;
    font-size: 0.8em;
    text-decoration: none;
    overflow: hidden;
    white-space: nowrap;
    text-overflow: ellipsis;
}
ul.day-list { list-style: none; padding: 0; }
ul.day-list li { margin-bottom: 10px; }
.actions { display: flex; gap: 10px; justify-content: center; margin-top: 20px; }
"#;

/// Wrap page content in the shared document shell.
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"nl\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <style>{}</style>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A terminal message page (used for "not found" and server errors).
pub fn message_page(message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<a class=\"button\" href=\"/\">Terug naar kalender</a>",
        escape(message)
    );
    layout("Agenda", &body)
}

/// The calendar page: heading, quick-add form, month navigation, grid.
pub fn calendar_page(month: NaiveDate, events: &[Event]) -> String {
    let prev = month
        .checked_sub_months(Months::new(1))
        .unwrap_or(month)
        .format("%Y-%m");
    let next = month
        .checked_add_months(Months::new(1))
        .unwrap_or(month)
        .format("%Y-%m");

    let body = format!(
        "<h1>Mijn Agenda</h1>\n\
         <form class=\"stacked\" method=\"post\" action=\"/\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Titel\" required>\n\
         <input type=\"date\" name=\"date\" required>\n\
         <input type=\"time\" name=\"start_time\" required>\n\
         <input type=\"time\" name=\"end_time\" required>\n\
         {}\n\
         <button type=\"submit\">Afspraak toevoegen</button>\n\
         </form>\n\
         <div class=\"month-nav\">\n\
         <a class=\"button\" href=\"/?month={prev}\">&laquo; vorige</a>\n\
         <h2>{}</h2>\n\
         <a class=\"button\" href=\"/?month={next}\">volgende &raquo;</a>\n\
         </div>\n\
         {}",
        category_select(None),
        month_label(month),
        month_grid(month, events)
    );
    layout("Mijn Agenda", &body)
}

/// The day-detail page: the day's events in collection order.
pub fn day_page(date: NaiveDate, events: &[&Event]) -> String {
    let mut items = String::new();
    if events.is_empty() {
        items.push_str("<li>Geen afspraken op deze dag</li>\n");
    }
    for event in events {
        let color = event
            .category
            .map(Category::color)
            .unwrap_or(DEFAULT_EVENT_COLOR);
        items.push_str(&format!(
            "<li><a href=\"/event/{}\" style=\"color:{color}\">{}</a></li>\n",
            event.id,
            day_line(event)
        ));
    }

    let body = format!(
        "<h2>Afspraak overzicht voor: {date}</h2>\n\
         <ul class=\"day-list\">\n{items}</ul>\n\
         <div class=\"actions\">\n\
         <a class=\"button\" href=\"/\">Terug naar kalender</a>\n\
         <a class=\"button\" href=\"/day/{date}/add\">+ Nieuwe afspraak toevoegen</a>\n\
         </div>",
    );
    layout(&format!("Agenda: {date}"), &body)
}

/// One day-list entry: "<title> van <start> tot <end>".
pub fn day_line(event: &Event) -> String {
    format!(
        "{} van {} tot {}",
        escape(&event.title),
        event.start.time().format("%H:%M:%S"),
        event.end.time().format("%H:%M:%S")
    )
}

/// The add-event form for a given day.
pub fn add_page(date: NaiveDate) -> String {
    let body = format!(
        "<h2>Nieuwe afspraak toevoegen voor {date}</h2>\n\
         <form class=\"stacked\" method=\"post\" action=\"/day/{date}/add\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Titel\" required>\n\
         <input type=\"time\" name=\"start_time\" required>\n\
         <input type=\"time\" name=\"end_time\" required>\n\
         {}\n\
         <button type=\"submit\">Toevoegen</button>\n\
         </form>\n\
         <div class=\"actions\">\n\
         <a class=\"button\" href=\"/day/{date}\">Terug naar afspraken</a>\n\
         </div>",
        category_select(None)
    );
    layout("Nieuwe afspraak", &body)
}

/// The edit form plus the delete button for one event.
pub fn event_page(event: &Event) -> String {
    let day = event.day();
    let body = format!(
        "<h2>Bewerk afspraak</h2>\n\
         <form class=\"stacked\" method=\"post\" action=\"/event/{id}\">\n\
         <input type=\"text\" name=\"title\" value=\"{title}\" required>\n\
         <input type=\"time\" name=\"start_time\" value=\"{start}\" required>\n\
         <input type=\"time\" name=\"end_time\" value=\"{end}\" required>\n\
         {select}\n\
         <button type=\"submit\">Opslaan</button>\n\
         </form>\n\
         <form class=\"stacked\" method=\"post\" action=\"/event/{id}/delete\"\n\
          onsubmit=\"return confirm('Afspraak verwijderen?');\">\n\
         <button type=\"submit\" class=\"danger\">Verwijderen</button>\n\
         </form>\n\
         <div class=\"actions\">\n\
         <a class=\"button\" href=\"/day/{day}\">Annuleren</a>\n\
         </div>",
        id = event.id,
        title = escape(&event.title),
        start = event.start.time().format("%H:%M"),
        end = event.end.time().format("%H:%M"),
        select = category_select(event.category),
    );
    layout("Bewerk afspraak", &body)
}

/// The category select, shared by all three forms. The empty choice maps
/// to "no category".
fn category_select(selected: Option<Category>) -> String {
    let mut options = String::from("<option value=\"\">-- Kies categorie --</option>\n");
    for category in Category::ALL {
        let marker = if selected == Some(category) {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>\n",
            category.as_str(),
            category.label()
        ));
    }
    format!("<select name=\"category\">\n{options}</select>")
}

/// "augustus 2025"
fn month_label(month: NaiveDate) -> String {
    let name = MONTH_NAMES[month.month0() as usize];
    format!("{} {}", name, month.year())
}

/// A Monday-first month grid. `month` must be the first of the month.
fn month_grid(month: NaiveDate, events: &[Event]) -> String {
    let lead = month.weekday().num_days_from_monday();
    let days = days_in_month(month);
    let cells = (lead + days).div_ceil(7) * 7;

    let mut grid = String::from("<table class=\"calendar\">\n<tr>");
    for name in WEEKDAY_NAMES {
        grid.push_str(&format!("<th>{name}</th>"));
    }
    grid.push_str("</tr>\n");

    for cell in 0..cells {
        if cell % 7 == 0 {
            grid.push_str("<tr>");
        }

        if cell < lead || cell >= lead + days {
            grid.push_str("<td class=\"empty\"></td>");
        } else {
            let day = cell - lead + 1;
            match month.with_day(day) {
                Some(date) => grid.push_str(&day_cell(date, events)),
                None => grid.push_str("<td class=\"empty\"></td>"),
            }
        }

        if cell % 7 == 6 {
            grid.push_str("</tr>\n");
        }
    }

    grid.push_str("</table>");
    grid
}

fn day_cell(date: NaiveDate, events: &[Event]) -> String {
    let mut chips = String::new();
    for event in agenda_core::filter::events_on(events, date) {
        let color = event
            .category
            .map(Category::color)
            .unwrap_or(DEFAULT_EVENT_COLOR);
        chips.push_str(&format!(
            "<a class=\"chip\" style=\"background:{color}\" href=\"/event/{}\">{}</a>",
            event.id,
            escape(&event.title)
        ));
    }

    format!(
        "<td><a href=\"/day/{date}\">{}</a>{chips}</td>",
        date.day()
    )
}

fn days_in_month(month: NaiveDate) -> u32 {
    month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::Event;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn meeting() -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Meeting".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 8, 20)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 8, 20)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            category: Some(Category::Normaal),
        }
    }

    #[test]
    fn test_day_line_format() {
        assert_eq!(day_line(&meeting()), "Meeting van 09:00:00 tot 10:00:00");
    }

    #[test]
    fn test_escape_handles_markup() {
        assert_eq!(
            escape("<b>\"a & b\"</b>"),
            "&lt;b&gt;&quot;a &amp; b&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_day_page_lists_entries_or_placeholder() {
        let event = meeting();
        let date = event.day();

        let page = day_page(date, &[&event]);
        assert!(page.contains("Meeting van 09:00:00 tot 10:00:00"));
        assert!(page.contains(&format!("/event/{}", event.id)));

        let empty = day_page(date, &[]);
        assert!(empty.contains("Geen afspraken op deze dag"));
    }

    #[test]
    fn test_calendar_page_links_days_and_events() {
        let event = meeting();
        let month = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

        let page = calendar_page(month, std::slice::from_ref(&event));
        assert!(page.contains("Mijn Agenda"));
        assert!(page.contains("/day/2025-08-20"));
        assert!(page.contains(&format!("/event/{}", event.id)));
        assert!(page.contains(Category::Normaal.color()));
        assert!(page.contains("/?month=2025-07"));
        assert!(page.contains("/?month=2025-09"));
    }

    #[test]
    fn test_month_grid_aligns_first_weekday() {
        // August 2025 starts on a Friday: four leading empty cells.
        let month = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let grid = month_grid(month, &[]);

        let first_row = grid.split("</tr>").nth(1).unwrap();
        assert_eq!(first_row.matches("class=\"empty\"").count(), 4);
        assert!(grid.contains("/day/2025-08-31"));
    }

    #[test]
    fn test_event_without_category_uses_default_color() {
        let mut event = meeting();
        event.category = None;

        let page = day_page(event.day(), &[&event]);
        assert!(page.contains(DEFAULT_EVENT_COLOR));
    }

    #[test]
    fn test_event_page_prefills_the_form() {
        let event = meeting();
        let page = event_page(&event);

        assert!(page.contains("value=\"Meeting\""));
        assert!(page.contains("value=\"09:00\""));
        assert!(page.contains("value=\"10:00\""));
        assert!(page.contains("selected>📅 Normaal"));
        assert!(page.contains(&format!("/event/{}/delete", event.id)));
    }

    #[test]
    fn test_month_label_is_dutch() {
        let month = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(month_label(month), "augustus 2025");
    }
}
