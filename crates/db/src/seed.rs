//! Pages written to a fresh page file.

use chrono::{TimeZone, Utc};
use wikimasters_core::types::{DbId, Timestamp};

use crate::models::page::Page;

const WELCOME: &str = "# Welcome to the Wiki

A small knowledge base for your team.

## Features

- **Create and edit pages** with Markdown
- **Roles**: admins, editors and viewers see different controls
- **Search** across titles and content

## Getting Started

1. Browse the pages listed on the home page
2. Sign in as an editor to create a page
3. Sign in as an admin to delete one
";

const MARKDOWN_GUIDE: &str = "# Markdown Guide

## Text

- **Bold** with double asterisks
- *Italic* with single asterisks
- ~~Strikethrough~~ with double tildes
- `Inline code` with backticks

## Code Blocks

```rust
fn greet(name: &str) -> String {
    format!(\"Hello, {name}!\")
}
```

## Tables

| Feature | Status |
|---------|--------|
| Pages   | Done   |
| Search  | Done   |
";

const ROLES: &str = "# Roles and Permissions

| Role   | Read | Create / Edit | Delete |
|--------|------|---------------|--------|
| viewer | yes  | no            | no     |
| editor | yes  | yes           | no     |
| admin  | yes  | yes           | yes    |

Anyone can read pages, even without signing in.
";

/// The seed collection: three pages by the admin and editor accounts.
pub fn seed_pages() -> Vec<Page> {
    vec![
        seed_page(1, "Welcome to the Wiki", WELCOME, 1, "Admin User"),
        seed_page(2, "Markdown Guide", MARKDOWN_GUIDE, 2, "Editor User"),
        seed_page(3, "Roles and Permissions", ROLES, 1, "Admin User"),
    ]
}

fn seed_page(id: DbId, title: &str, content: &str, author_id: DbId, author: &str) -> Page {
    let at = seed_timestamp(id as u32);
    Page {
        id,
        title: title.to_string(),
        content: content.to_string(),
        author_id,
        author_name: Some(author.to_string()),
        created_at: at,
        updated_at: at,
    }
}

fn seed_timestamp(day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
