//! Announcements feed.

use super::client::ApiClient;
use super::outcome::Outcome;
use super::types::Announcement;

/// GET /announcements, newest first.
pub async fn list(client: &ApiClient) -> Outcome<Vec<Announcement>> {
    let mut items: Vec<Announcement> = client.get("/announcements").await?;
    // ISO dates sort lexicographically
    items.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(items)
}
