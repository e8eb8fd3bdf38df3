use chrono::{DateTime, Utc};
use maud::{html, Markup};
use crate::models::KnowledgeEntry;
use crate::utils::format::relative_time_or;

/// Table of entries plus the create/edit form.
pub fn render_knowledge_page(
    entries: &[KnowledgeEntry],
    query: &str,
    editing: Option<&KnowledgeEntry>,
    now: DateTime<Utc>,
) -> Markup {
    let visible: Vec<&KnowledgeEntry> = entries.iter().filter(|e| e.matches(query)).collect();
    html! {
        section.page.knowledge-page {
            header.page-header {
                h1 { "Knowledge base" }
                input.search type="search" name="query" value=(query)
                    placeholder="Search entries" autofocus[!query.is_empty()] data-action="knowledge-search";
            }
            (render_entry_form(editing))
            @if visible.is_empty() {
                p.empty-state {
                    @if entries.is_empty() { "No entries yet." } @else { "No entries match your search." }
                }
            } @else {
                table.data-table {
                    thead { tr { th { "Title" } th { "Category" } th { "Tags" } th { "Updated" } th {} } }
                    tbody {
                        @for entry in &visible {
                            tr data-id=(entry.id) {
                                td { (entry.title) }
                                td { (entry.category.as_deref().unwrap_or("—")) }
                                td {
                                    @for tag in &entry.tags { span.tag { (tag) } }
                                }
                                td { (relative_time_or(entry.updated_at, now, "—")) }
                                td.row-actions {
                                    button.btn.btn-small type="button" data-action="knowledge-edit" data-id=(entry.id) { "Edit" }
                                    button.btn.btn-small.btn-danger type="button" data-action="knowledge-delete" data-id=(entry.id) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
            p.result-count { (visible.len()) " of " (entries.len()) " entries" }
        }
    }
}

fn render_entry_form(editing: Option<&KnowledgeEntry>) -> Markup {
    let (action, title, submit) = match editing {
        Some(_) => ("knowledge-update", "Edit entry", "Save changes"),
        None => ("knowledge-create", "New entry", "Add entry"),
    };
    let id = editing.map(|e| e.id.clone()).unwrap_or_default();
    let tags = editing.map(|e| e.tags.join(", ")).unwrap_or_default();
    html! {
        form.entry-form data-action=(action) data-id=(id) {
            h2 { (title) }
            label { "Title" input type="text" name="title" value=[editing.map(|e| e.title.as_str())]; }
            label { "Category" input type="text" name="category" value=[editing.and_then(|e| e.category.as_deref())]; }
            label { "Tags" input type="text" name="tags" value=(tags) placeholder="comma, separated"; }
            label { "Content" textarea name="content" rows="6" { (editing.map(|e| e.content.as_str()).unwrap_or("")) } }
            div.form-actions {
                button.btn.btn-primary type="submit" { (submit) }
                @if editing.is_some() {
                    button.btn type="button" data-action="knowledge-cancel" { "Cancel" }
                }
            }
        }
    }
}
