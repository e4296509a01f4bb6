// SPDX-License-Identifier: MIT

//! CSV and PDF export routes.
//!
//! CSV rows are comma-joined with no quoting: embedded commas in free-text
//! fields shift columns. Kept for parity with the historical export format.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Issue, Ride, User};
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::sync::Arc;

/// Recent-item limit for the PDF summary lists.
const PDF_RECENT_LIMIT: usize = 10;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/export/rides.csv", get(rides_csv))
        .route("/api/export/issues.csv", get(issues_csv))
        .route("/api/export/summary.pdf", get(summary_pdf))
}

fn attachment(content_type: &'static str, filename: &'static str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

async fn rides_csv(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response> {
    let rides: Vec<Ride> = state
        .store
        .read(|doc| {
            doc.rides
                .iter()
                .filter(|r| r.user_id == auth.user_id)
                .cloned()
                .collect()
        })
        .await;

    let mut lines = vec!["name,durationMin,distanceKm,type,safetyScore,createdAt".to_string()];
    lines.extend(rides.iter().map(|r| {
        format!(
            "{},{},{},{},{},{}",
            r.name, r.duration_min, r.distance_km, r.ride_type, r.safety_score, r.created_at
        )
    }));

    Ok(attachment(
        "text/csv",
        "rides.csv",
        lines.join("\n").into_bytes(),
    ))
}

async fn issues_csv(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response> {
    let issues: Vec<Issue> = state
        .store
        .read(|doc| {
            doc.issues
                .iter()
                .filter(|i| i.user_id == auth.user_id)
                .cloned()
                .collect()
        })
        .await;

    let mut lines = vec!["title,priority,status,notes,createdAt".to_string()];
    lines.extend(issues.iter().map(|i| {
        format!(
            "{},{},{},{},{}",
            i.title, i.priority, i.status, i.notes, i.created_at
        )
    }));

    Ok(attachment(
        "text/csv",
        "issues.csv",
        lines.join("\n").into_bytes(),
    ))
}

async fn summary_pdf(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Response> {
    let (user, mut rides, mut issues) = state
        .store
        .read(|doc| {
            let user = doc.users.iter().find(|u| u.id == auth.user_id).cloned();
            let rides: Vec<Ride> = doc
                .rides
                .iter()
                .filter(|r| r.user_id == auth.user_id)
                .cloned()
                .collect();
            let issues: Vec<Issue> = doc
                .issues
                .iter()
                .filter(|i| i.user_id == auth.user_id)
                .cloned()
                .collect();
            (user, rides, issues)
        })
        .await;

    rides.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rides.truncate(PDF_RECENT_LIMIT);
    issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    issues.truncate(PDF_RECENT_LIMIT);

    let body = build_summary_pdf(user.as_ref(), &rides, &issues);

    Ok(attachment("application/pdf", "summary.pdf", body))
}

// A4 portrait, in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const LEADING: f32 = 16.0;

/// Render the one-page summary: profile fields, then recent rides and issues.
fn build_summary_pdf(user: Option<&User>, rides: &[Ride], issues: &[Issue]) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_id = Ref::new(4);
    let content_id = Ref::new(5);
    let font_name = Name(b"F1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);
    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(font_name, font_id);
    }
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    let mut content = Content::new();
    content.begin_text();
    content.set_font(font_name, 18.0);
    content.next_line(MARGIN, PAGE_HEIGHT - 60.0);
    content.show(Str(b"BikeGuard Summary"));

    let line = |content: &mut Content, size: f32, text: &str| {
        content.set_font(font_name, size);
        content.next_line(0.0, -LEADING);
        content.show(Str(&ascii_bytes(text)));
    };

    let field = |value: Option<&str>| value.unwrap_or("").to_string();
    line(&mut content, 12.0, &format!("Name: {}", field(user.map(|u| u.name.as_str()))));
    line(&mut content, 12.0, &format!("Email: {}", field(user.map(|u| u.email.as_str()))));
    line(&mut content, 12.0, &format!("Phone: {}", field(user.map(|u| u.phone.as_str()))));
    line(
        &mut content,
        12.0,
        &format!(
            "Medical Info: {}",
            field(user.map(|u| u.medical_info.as_str()))
        ),
    );

    line(&mut content, 14.0, "");
    line(&mut content, 14.0, "Recent Rides");
    for ride in rides {
        line(
            &mut content,
            11.0,
            &format!(
                "{} - {} min - {} km - {} - Score {}",
                ride.name, ride.duration_min, ride.distance_km, ride.ride_type, ride.safety_score
            ),
        );
    }

    line(&mut content, 14.0, "");
    line(&mut content, 14.0, "Recent Issues");
    for issue in issues {
        line(
            &mut content,
            11.0,
            &format!("{} - {} - {}", issue.title, issue.priority, issue.status),
        );
    }

    content.end_text();
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

/// Helvetica here is unencoded Latin; anything outside ASCII is replaced.
fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pdf_is_valid_header() {
        let bytes = build_summary_pdf(None, &[], &[]);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF") || bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_ascii_bytes_replaces_non_ascii() {
        assert_eq!(ascii_bytes("caf\u{e9}"), b"caf?".to_vec());
        assert_eq!(ascii_bytes("plain"), b"plain".to_vec());
    }
}
