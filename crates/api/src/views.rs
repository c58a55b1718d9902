//! Server-rendered HTML for the wiki pages.
//!
//! Plain string templates. Every piece of user text goes through
//! [`escape_html`]; page bodies go through [`render_markdown`].

use wikimasters_core::markdown::{escape_html, render_markdown};
use wikimasters_core::pages::UNKNOWN_AUTHOR;
use wikimasters_core::types::Timestamp;
use wikimasters_db::models::page::Page;
use wikimasters_db::models::user::User;
use wikimasters_db::UserDirectory;

const SITE_NAME: &str = "WikiMasters";

/// Display name for a page's author.
///
/// Prefers the name stored with the page, then the directory, then
/// [`UNKNOWN_AUTHOR`].
pub fn author_label<'a>(page: &'a Page, users: &'a UserDirectory) -> &'a str {
    page.author_name
        .as_deref()
        .or_else(|| users.author_name(page.author_id))
        .unwrap_or(UNKNOWN_AUTHOR)
}

fn format_date(ts: &Timestamp) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Wrap `body` in the shared page chrome.
pub fn layout(title: &str, user: Option<&User>, body: &str) -> String {
    let session = match user {
        Some(user) => format!(
            "<span class=\"session\">Signed in as {} ({})</span>",
            escape_html(&user.name),
            user.role
        ),
        None => "<span class=\"session\">Not signed in</span>".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | {SITE_NAME}</title>\n\
         </head>\n\
         <body>\n\
         <header>\n\
         <a href=\"/\">{SITE_NAME}</a>\n\
         <form action=\"/search\" method=\"get\"><input type=\"search\" name=\"q\" placeholder=\"Search pages\"></form>\n\
         {session}\n\
         </header>\n\
         <main>\n{body}\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

fn page_list(pages: &[Page], users: &UserDirectory) -> String {
    if pages.is_empty() {
        return "<p class=\"empty\">No pages found.</p>".to_string();
    }

    let items: String = pages
        .iter()
        .map(|page| {
            format!(
                "<li><a href=\"/wiki/{id}\">{title}</a> \
                 <span class=\"meta\">by {author} on {date}</span></li>\n",
                id = page.id,
                title = escape_html(&page.title),
                author = escape_html(author_label(page, users)),
                date = format_date(&page.created_at),
            )
        })
        .collect();

    format!("<ul class=\"pages\">\n{items}</ul>")
}

/// `GET /`: every page title with its author and date.
pub fn index_page(pages: &[Page], users: &UserDirectory, user: Option<&User>) -> String {
    let body = format!("<h1>All Pages</h1>\n{}", page_list(pages, users));
    layout("All Pages", user, &body)
}

/// `GET /wiki/{id}`: one page with its rendered Markdown.
pub fn article_page(page: &Page, users: &UserDirectory, user: Option<&User>) -> String {
    let body = format!(
        "<article>\n\
         <h1>{title}</h1>\n\
         <p class=\"meta\">By {author} &middot; {date}</p>\n\
         <div class=\"content\">\n{content}</div>\n\
         </article>",
        title = escape_html(&page.title),
        author = escape_html(author_label(page, users)),
        date = format_date(&page.created_at),
        content = render_markdown(&page.content),
    );
    layout(&page.title, user, &body)
}

/// `GET /search?q=`: the hits for a query.
pub fn search_page(
    query: &str,
    pages: &[Page],
    users: &UserDirectory,
    user: Option<&User>,
) -> String {
    let heading = if query.is_empty() {
        "<h1>Search</h1>".to_string()
    } else {
        format!(
            "<h1>Search results for &quot;{}&quot;</h1>\n<p>{} result(s)</p>",
            escape_html(query),
            pages.len()
        )
    };
    let body = format!("{heading}\n{}", page_list(pages, users));
    layout("Search", user, &body)
}

/// Body of the HTML 404 page.
pub fn not_found_page(user: Option<&User>) -> String {
    layout(
        "Page Not Found",
        user,
        "<h1>Page Not Found</h1>\n<p>The page you are looking for does not exist.</p>\n\
         <p><a href=\"/\">Back to all pages</a></p>",
    )
}
