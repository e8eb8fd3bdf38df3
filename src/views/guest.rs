use chrono::{DateTime, Utc};
use maud::{html, Markup};
use crate::models::UserContext;
use crate::utils::format::relative_time_or;

pub fn render_guest_page(context: Option<&UserContext>, now: DateTime<Utc>) -> Markup {
    html! {
        section.page.guest-page {
            header.page-header {
                h1 { "Guest context" }
                button.btn.btn-danger type="button" data-action="guest-reset" { "Reset guest identity" }
            }
            @match context {
                None => { p.empty-state { "No guest context for this browser yet." } }
                Some(context) => {
                    dl.kv {
                        dt { "Device" } dd { code { (context.device_id) } }
                        dt { "Session" } dd { code { (context.session_id) } }
                        dt { "Started" } dd { (relative_time_or(Some(context.started_at), now, "—")) }
                    }
                    @match &context.guest {
                        None => { p.muted { "The backend has no profile for this device." } }
                        Some(guest) => {
                            dl.kv {
                                dt { "Name" } dd { (guest.name.as_deref().unwrap_or("Anonymous")) }
                                dt { "Visits" } dd { (guest.visits) }
                                dt { "First seen" } dd { (relative_time_or(guest.first_seen, now, "—")) }
                                dt { "Last seen" } dd { (relative_time_or(guest.last_seen, now, "—")) }
                            }
                            @if !guest.preferences.is_null() {
                                pre.json { (serde_json::to_string_pretty(&guest.preferences).unwrap_or_default()) }
                            }
                        }
                    }
                }
            }
        }
    }
}
