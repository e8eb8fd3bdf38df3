use chrono::{DateTime, Utc};
use maud::{html, Markup};
use crate::models::CalendarSource;
use crate::utils::format::relative_time_or;

pub fn render_calendar_page(sources: &[CalendarSource], now: DateTime<Utc>) -> Markup {
    html! {
        section.page.calendar-page {
            header.page-header {
                h1 { "Calendar sources" }
                button.btn type="button" data-action="calendar-sync-all" { "Sync all" }
            }
            @if sources.is_empty() {
                p.empty-state { "No calendar sources configured." }
            } @else {
                table.data-table {
                    thead {
                        tr { th { "Name" } th { "Provider" } th { "Enabled" } th { "Last sync" } th { "Status" } th { "Events" } th {} }
                    }
                    tbody {
                        @for source in sources {
                            tr data-id=(source.id) class=[source.last_sync_failed().then_some("row-error")] {
                                td { (source.name) }
                                td { (source.provider) }
                                td {
                                    button.toggle type="button" data-action="calendar-toggle" data-id=(source.id)
                                        data-enabled=(source.enabled) {
                                        @if source.enabled { "On" } @else { "Off" }
                                    }
                                }
                                td { (relative_time_or(source.last_sync, now, "never")) }
                                td { (source.status_label()) }
                                td { (source.event_count.map(|c| c.to_string()).unwrap_or_else(|| "—".to_string())) }
                                td.row-actions {
                                    button.btn.btn-small type="button" data-action="calendar-sync" data-id=(source.id) { "Sync" }
                                    button.btn.btn-small type="button" data-action="calendar-test" data-id=(source.id) { "Test" }
                                    button.btn.btn-small.btn-danger type="button" data-action="calendar-delete" data-id=(source.id) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
            form.source-form data-action="calendar-create" {
                h2 { "Add source" }
                label { "Name" input type="text" name="name"; }
                label { "Feed URL" input type="url" name="url"; }
                label {
                    "Provider"
                    select name="provider" {
                        option value="ical" { "iCal" }
                        option value="google" { "Google" }
                        option value="caldav" { "CalDAV" }
                    }
                }
                div.form-actions {
                    button.btn.btn-primary type="submit" { "Add" }
                    button.btn type="button" data-action="calendar-test-url" { "Test URL" }
                }
            }
        }
    }
}
