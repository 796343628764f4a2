//! HTML and XML rendering
//!
//! Every page shares [`base_document`]: the stylesheet and favicon from
//! `/static`, then the page body.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::errors::DailyQrError;
use crate::storage::Entry;

const SITE_NAME: &str = "Daily QRCode";
const REPO_URL: &str = "https://github.com/alokmenghrajani/dailyqrcode";

/// `Jan 2, 2006`
fn display_day(entry: &Entry) -> String {
    entry.active_at.format("%b %-d, %Y").to_string()
}

fn base_document(title: Option<&str>, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link href="/static/style.css" rel="stylesheet";
                link rel="icon" type="image/png" href="/static/favicon.png" sizes="32x32";
                @if let Some(title) = title {
                    title { (title) }
                }
                (head_extra)
            }
            body {
                (content)
            }
        }
    }
}

/// Landing page for a live entry, with Open Graph tags pointing at the
/// large image.
pub fn landing_page(entry: &Entry, base_url: &str) -> Markup {
    let title = format!("Daily QR Code #{}", entry.id);
    let head = html! {
        meta property="og:title" content=(title);
        meta property="og:description" content="A fresh surprise every day!";
        meta property="og:type" content="article";
        meta property="og:url" content={ (base_url) "/" (entry.id) };
        meta property="og:image" content={ (base_url) "/large/" (entry.id) };
        meta name="twitter:card" content="summary_large_image";
    };

    base_document(
        Some(&title),
        head,
        html! {
            h1 { (SITE_NAME) }
            div { "Scan with your phone's camera app " (PreEscaped("&#x25A0;")) " Come back tomorrow!" }
            div #d {
                img .tl src="/static/tl.png";
                img .br src="/static/br.png";
                img #i src={ "/img/" (entry.id) } alt={ "QR code #" (entry.id) };
            }
            div {
                @if !entry.comment.is_empty() {
                    (entry.comment)
                }
            }
            div {
                a href="/about" { "About" }
                " " (PreEscaped("&#x25A0;")) " "
                a href="/archive" { "Archive" }
            }
        },
    )
}

pub fn about_page(base_url: &str) -> Markup {
    let site = format!("{}/", base_url);
    base_document(
        Some("About Daily QR Code"),
        html! {},
        html! {
            h1 { (SITE_NAME) }
            ul {
                li { (site) " is nonjudgemental: everyone gets the same content." }
                li { (site) " is a fresh surprise every day. See you tomorrow!" }
                li { (site) " is " a href=(REPO_URL) { "open source" } "." }
            }
        },
    )
}

pub fn archive_page(entries: &[Entry]) -> Markup {
    base_document(
        Some("Daily QR Code Archive"),
        html! {},
        html! {
            h1 { "Archive" }
            @if entries.is_empty() {
                p { "Sorry, archive is empty." }
            } @else {
                ul {
                    @for entry in entries {
                        li { a href={ "/" (entry.id) } { (display_day(entry)) } }
                    }
                }
            }
        },
    )
}

pub fn login_page() -> Markup {
    base_document(
        Some("Admin"),
        html! {},
        html! {
            h1 { "Admin" }
            form action="/admin/login" method="POST" {
                p { "password: " input name="password" type="password"; }
                p { input type="submit" value="log in"; }
            }
        },
    )
}

/// Admin view: today's date, the enqueue form and every entry not yet live.
pub fn admin_page(today: &str, queue: &[Entry]) -> Markup {
    base_document(
        Some("Admin"),
        html! {},
        html! {
            h1 { "Admin" }
            p.now { "Today: " (today) }
            form action="/admin/add" method="POST" {
                p { "url: " input name="url" type="text"; }
                p { "comment: " input name="comment" type="text"; }
                p { "private: " input name="private" type="text"; }
                p { input type="submit" value="add url"; }
            }
            h2 { "Queue" }
            @if queue.is_empty() {
                p { "Nothing queued." }
            }
            ul {
                @for entry in queue {
                    li {
                        @let target = entry.target.as_deref().unwrap_or("");
                        p { a href=(target) { (target) } }
                        p { "Active at: " (display_day(entry)) }
                        p { "Comment: " (entry.comment) }
                        p { "Private: " (entry.visibility) }
                    }
                }
            }
        },
    )
}

/// Generic error page. Store and encoder details stay in the logs.
pub fn error_page(err: &DailyQrError) -> Markup {
    let detail = match err {
        DailyQrError::NotFound(_) => "Not found.",
        DailyQrError::NothingScheduled(msg) | DailyQrError::Validation(msg) => msg.as_str(),
        _ => err.error_type(),
    };

    base_document(
        None,
        html! {},
        html! {
            h1 { "Error" }
            p { (detail) }
        },
    )
}

/// XML sitemap: the fixed pages plus one `<url>` per live entry.
pub fn sitemap(entries: &[Entry], base_url: &str) -> Markup {
    html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            url { loc { (base_url) "/" } changefreq { "daily" } }
            url { loc { (base_url) "/about" } }
            url { loc { (base_url) "/archive" } changefreq { "daily" } }
            @for entry in entries {
                url {
                    loc { (base_url) "/" (entry.id) }
                    lastmod { (entry.active_at.format("%Y-%m-%d").to_string()) }
                }
            }
        }
    }
}

pub fn robots_txt(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n", base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(id: i64, day: u32, comment: &str) -> Entry {
        Entry {
            id,
            active_at: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            target: Some(format!("https://example.com/{}", id)),
            comment: comment.to_string(),
            visibility: "secret note".to_string(),
        }
    }

    #[test]
    fn landing_page_links_images_and_meta() {
        let page = landing_page(&entry(7, 2, "hello <b>"), "https://qr.test").into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Daily QR Code #7</title>"));
        assert!(page.contains(r#"src="/img/7""#));
        assert!(page.contains(r#"content="https://qr.test/large/7""#));
        assert!(page.contains("hello &lt;b&gt;"));
        assert!(!page.contains("secret note"));
    }

    #[test]
    fn archive_lists_entries_with_readable_dates() {
        let page = archive_page(&[entry(1, 2, ""), entry(2, 3, "")]).into_string();
        assert!(page.contains(r#"<a href="/1">Jan 2, 2026</a>"#));
        assert!(page.contains(r#"<a href="/2">Jan 3, 2026</a>"#));
    }

    #[test]
    fn empty_archive_message() {
        let page = archive_page(&[]).into_string();
        assert!(page.contains("Sorry, archive is empty."));
    }

    #[test]
    fn admin_page_shows_private_notes() {
        let page = admin_page("2026-01-01", &[entry(3, 4, "later")]).into_string();
        assert!(page.contains("Private: secret note"));
        assert!(page.contains(r#"action="/admin/add""#));
    }

    #[test]
    fn error_page_hides_store_details() {
        let page = error_page(&DailyQrError::database_operation("syntax error near users"))
            .into_string();
        assert!(page.contains("Database Operation Error"));
        assert!(!page.contains("syntax error"));

        let page = error_page(&DailyQrError::nothing_scheduled(
            "Sorry, the site is broken real bad.",
        ))
        .into_string();
        assert!(page.contains("Sorry, the site is broken real bad."));
    }

    #[test]
    fn sitemap_contains_every_entry() {
        let xml = sitemap(&[entry(1, 2, "")], "https://qr.test").into_string();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://qr.test/1</loc>"));
        assert!(xml.contains("<lastmod>2026-01-02</lastmod>"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        assert_eq!(
            robots_txt("https://qr.test"),
            "User-agent: *\nAllow: /\nSitemap: https://qr.test/sitemap.xml\n"
        );
    }
}
