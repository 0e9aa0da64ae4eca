//! HTML rendering of a resolved view.
//!
//! This is the presentation collaborator: it consumes the structured values
//! the core hands over (view state, ordered records, month histogram) and is
//! the only place dates are formatted and text is escaped.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Actor, PollKind, Toot};
use crate::month_index::MonthIndex;
use crate::view::{ResolvedView, ViewState};

const STYLE: &str = include_str!("style.css");

/// Render a complete page for one resolved view.
pub fn page(actor: &Actor, view: &ResolvedView<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>@{}'s archive</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(&actor.username)
    );

    let _ = write!(out, "<div class=\"toot box\"><h1>{}</h1></div>\n", title(view));

    if let Some(months) = view.months.as_deref() {
        months_html(&mut out, months, view.selected_month, search_query(view));
    }

    for toot in &view.records {
        toot_html(&mut out, actor, toot);
    }
    if view.records.is_empty() {
        out.push_str("<div class=\"toot box\"><p>nothing here</p></div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn title(view: &ResolvedView<'_>) -> String {
    match &view.state {
        ViewState::DateView(month) | ViewState::DefaultView(month) => {
            month.format("%B %Y").to_string()
        }
        ViewState::SearchView(query) => {
            format!("search: {} ({} results)", escape(query), view.records.len())
        }
    }
}

fn search_query<'a>(view: &'a ResolvedView<'_>) -> Option<&'a str> {
    match &view.state {
        ViewState::SearchView(query) => Some(query),
        _ => None,
    }
}

/// The month histogram: years descending, a bar per month whose unfilled
/// fraction is the slot's intensity.
fn months_html(
    out: &mut String,
    months: &MonthIndex,
    selected: Option<NaiveDate>,
    query: Option<&str>,
) {
    out.push_str("<div class=\"dates box\">\n");
    for year in months.years() {
        let _ = write!(
            out,
            "<div class=\"year\">\n<span class=\"title\">{}</span>\n<div class=\"months\">\n",
            year.year
        );
        for slot in &year.months {
            let selected_class = if selected == Some(slot.key) { " selected" } else { "" };
            let href = match query {
                // Clicking a month inside a search keeps the query around
                Some(q) => format!("/?search={}&date={}", escape(q), slot.key),
                None => format!("/?date={}", slot.key),
            };
            let _ = write!(
                out,
                "<div class=\"month\">\n<a title=\"{}\" href=\"{href}\" \
                 class=\"monthbar{selected_class}\">\n\
                 <div class=\"fill\" style=\"top:{:.0}%;\"></div>\n</a>\n{}\n</div>\n",
                slot.key.format("%B"),
                slot.intensity * 100.0,
                slot.count
            );
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</div>\n");
}

fn toot_html(out: &mut String, actor: &Actor, toot: &Toot) {
    out.push_str("<div class=\"toot box\">\n");
    if let Some(avatar) = &actor.avatar_url {
        let _ = write!(
            out,
            "<div class=\"avatar\">\n<img class=\"avatar\" src=\"{}\" />\n</div>\n",
            escape(avatar)
        );
    }
    out.push_str("<div class=\"content\">\n");

    if let Some(url) = &toot.url {
        let _ = write!(out, "<a class=\"icon\" href=\"{}\" target=\"_blank\">link</a>\n", escape(url));
    }
    if toot.direct_message {
        out.push_str("<span class=\"icon\" title=\"direct message\">dm</span>\n");
    }
    if toot.in_reply_to.is_some() {
        out.push_str("<span class=\"icon\" title=\"reply\">reply</span>\n");
    }

    let _ = write!(
        out,
        "<b>{}</b> <span class=\"at\">@{}</span><br/>\n\
         <span class=\"postdate\">{}</span>\n",
        escape(&actor.display_name),
        escape(&actor.username),
        toot.published.format("%a, %d %b %Y %I:%M:%S %p")
    );

    let mut body = toot.content.clone();
    attachments_html(&mut body, toot);
    poll_html(&mut body, toot);

    if toot.sensitive {
        // Content warning: collapse the body behind the summary (or behind
        // nothing but the button when there is no summary).
        let summary = toot.summary.clone().unwrap_or_default();
        let _ = write!(
            out,
            "<div class=\"cw\">{summary} <button \
             onclick=\"this.parentNode.nextElementSibling.classList.toggle('hidden');\">\
             show more</button></div>\n<div class=\"collapsible hidden\">\n{body}\n</div>\n"
        );
    } else {
        out.push_str(&body);
        out.push('\n');
    }

    out.push_str("</div>\n</div>\n");
}

fn attachments_html(out: &mut String, toot: &Toot) {
    if toot.attachments.is_empty() {
        return;
    }
    out.push_str("<div class=\"images\">\n");
    for attachment in &toot.attachments {
        let alt = escape(attachment.alt_text.as_deref().unwrap_or_default());
        let url = escape(&attachment.url);
        let media_type = escape(&attachment.media_type);
        if attachment.media_type.starts_with("video") {
            let _ = write!(
                out,
                "<video controls class=\"image\" title=\"{alt}\">\
                 <source src=\"{url}\" type=\"{media_type}\"></video>\n"
            );
        } else if attachment.media_type.starts_with("audio") {
            let _ = write!(
                out,
                "<audio controls class=\"image\" title=\"{alt}\">\
                 <source src=\"{url}\" type=\"{media_type}\"></audio>\n"
            );
        } else {
            let _ = write!(
                out,
                "<a alt=\"{alt}\" title=\"{alt}\" class=\"image\" href=\"{url}\" \
                 target=\"_blank\" style=\"background: url('{url}')\"></a>\n"
            );
        }
    }
    out.push_str("</div>\n");
}

fn poll_html(out: &mut String, toot: &Toot) {
    let Some(poll) = &toot.poll else {
        return;
    };
    let total = poll.total_votes().max(1);

    out.push_str("<div class=\"poll box\">\n");
    for option in &poll.options {
        let percent = option.votes as f64 / total as f64 * 100.0;
        let _ = write!(
            out,
            "<div class=\"pollitem\"><div class=\"pollbar\">\
             <div class=\"fill\" style=\"right:{:.0}%\"></div></div>\
             <span class=\"polltext\">{} <span class=\"pollmeta\">({} votes, {:.0}%)</span>\
             </span></div>\n",
            100.0 - percent,
            escape(&option.label),
            option.votes,
            percent
        );
    }

    let kind = match poll.kind {
        PollKind::SingleChoice => "single choice",
        PollKind::MultipleChoice => "multiple choice",
    };
    let ended = poll
        .end_time
        .map(|end| format!(", ended {}", end.format("%a, %d %b %Y %I:%M:%S %p")))
        .unwrap_or_default();
    let _ = write!(
        out,
        "<div class=\"pollmeta\">{kind} poll. {} votes{ended}</div>\n</div>\n",
        poll.total_votes()
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
