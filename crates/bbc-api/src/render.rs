//! # Review Pages
//!
//! HTML for the moderation console. Every interpolated value is escaped:
//! submissions are untrusted and the page is viewed with admin credentials.

use bbc_moderation::Review;
use bbc_review::DiffRow;

const STYLESHEET: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.4/css/bootstrap.min.css";

/// Escape text for an HTML body or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<html><head><link rel=\"stylesheet\" href=\"{STYLESHEET}\"></head>\
         <body style=\"margin:20px;\"><div class=\"container\">{body}</div></body></html>"
    )
}

fn row_html(row: &DiffRow, with_existing: bool) -> String {
    let class = match row.change() {
        bbc_review::Change::Removed => " class=\"danger\"",
        bbc_review::Change::Modified => " class=\"warning\"",
        bbc_review::Change::Added => "",
    };
    let cell = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());
    if with_existing {
        format!(
            "<tr{class}><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.path),
            cell(&row.existing),
            cell(&row.proposed)
        )
    } else {
        format!("<tr><td>{}</td><td>{}</td></tr>", escape(&row.path), cell(&row.proposed))
    }
}

/// Review table for a pending submission, with approve/reject links built
/// from `action_base` (the review URL up to and including `?action=`).
pub fn review_page(review: &Review, action_base: &str) -> String {
    let with_existing = review.existing.is_some();
    let mut body = String::from("<div class=\"table-responsive\">");
    if with_existing {
        body.push_str("<h4>Here are the differences between the existing data and the proposed changes</h4>");
    }
    body.push_str("<table class=\"table table-striped table-bordered\"><thead><tr><th>attribute</th>");
    if with_existing {
        body.push_str("<th>existing</th>");
    }
    body.push_str("<th>proposed</th></tr></thead><tbody>");
    for row in &review.rows {
        body.push_str(&row_html(row, with_existing));
    }
    body.push_str("</tbody></table></div>");

    if review.rows.is_empty() {
        body.push_str("<p>No differences from the published record.</p>");
    }
    let submitter = &review.pending.submitter;
    if let Some(email) = &submitter.email {
        body.push_str(&format!("<p>Submitted by: {}</p>", escape(email)));
    }
    if let Some(reason) = &submitter.reason {
        body.push_str(&format!("<p>Reason given: {}</p>", escape(reason)));
    }

    let base = escape(action_base);
    body.push_str(&format!(
        "<h4>You can <a class=\"btn btn-info\" href=\"{base}approve\">approve</a> or \
         <a class=\"btn btn-danger\" href=\"{base}reject\">reject</a> these updates.</h4>"
    ));
    page(&body)
}

pub fn approved_page() -> String {
    page("<h2>Approved</h2><p>Changes will show up on the live site within 24 hours.</p>")
}

pub fn rejected_page() -> String {
    page("<h2>Rejected</h2><p>The submission was discarded.</p>")
}
