// ============================================================================
// KNOWLEDGE VIEWMODEL - Knowledge base CRUD + client-side search
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use chrono::Utc;
use crate::error::DashboardResult;
use crate::models::{KnowledgeDraft, KnowledgeEntry};
use crate::platform::{ActionBindings, ActionEvent};
use crate::services::knowledge_service;
use crate::utils::format::split_list;
use crate::viewmodels::context::PageContext;
use crate::views::render_knowledge_page;

#[derive(Default)]
struct KnowledgeState {
    entries: Vec<KnowledgeEntry>,
    query: String,
    editing: Option<String>,
}

pub struct KnowledgeViewModel {
    ctx: PageContext,
    state: RefCell<KnowledgeState>,
}

fn draft_from(event: &ActionEvent) -> DashboardResult<KnowledgeDraft> {
    Ok(KnowledgeDraft {
        title: event.required_field("title", "Title")?,
        content: event.required_field("content", "Content")?,
        category: event.optional_field("category"),
        tags: split_list(event.field("tags").unwrap_or("")),
    })
}

impl KnowledgeViewModel {
    pub fn new(ctx: PageContext) -> Rc<Self> {
        Rc::new(Self {
            ctx,
            state: RefCell::new(KnowledgeState::default()),
        })
    }

    pub async fn load(self: Rc<Self>) -> DashboardResult<()> {
        self.ctx.require_auth().await?;
        self.ctx.show_loading("knowledge base");
        self.reload().await
    }

    async fn reload(self: &Rc<Self>) -> DashboardResult<()> {
        let entries = knowledge_service::list_entries(&self.ctx.api).await?;
        self.state.borrow_mut().entries = entries;
        self.render();
        Ok(())
    }

    fn render(self: &Rc<Self>) {
        let markup = {
            let state = self.state.borrow();
            let editing = state
                .editing
                .as_ref()
                .and_then(|id| state.entries.iter().find(|e| &e.id == id));
            render_knowledge_page(&state.entries, &state.query, editing, Utc::now())
        };
        self.ctx.render(markup, self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let ctx = &self.ctx;
        let (create, edit, cancel, update, delete, search) =
            (self.clone(), self.clone(), self.clone(), self.clone(), self.clone(), self.clone());
        ActionBindings::new()
            .on("knowledge-create", ctx.guard("knowledge-create", move |e| create.clone().create(e)))
            .on("knowledge-edit", ctx.guard("knowledge-edit", move |e| edit.clone().edit(e)))
            .on("knowledge-cancel", ctx.guard("knowledge-cancel", move |e| cancel.clone().cancel(e)))
            .on("knowledge-update", ctx.guard("knowledge-update", move |e| update.clone().update(e)))
            .on("knowledge-delete", ctx.guard("knowledge-delete", move |e| delete.clone().delete(e)))
            .on("knowledge-search", ctx.guard("knowledge-search", move |e| search.clone().search(e)))
    }

    async fn create(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let draft = draft_from(&event)?;
        knowledge_service::create_entry(&self.ctx.api, &draft).await?;
        self.ctx.success("Entry created");
        self.reload().await
    }

    async fn edit(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        self.state.borrow_mut().editing = Some(id);
        self.render();
        Ok(())
    }

    async fn cancel(self: Rc<Self>, _event: ActionEvent) -> DashboardResult<()> {
        self.state.borrow_mut().editing = None;
        self.render();
        Ok(())
    }

    async fn update(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        let draft = draft_from(&event)?;
        knowledge_service::update_entry(&self.ctx.api, &id, &draft).await?;
        self.state.borrow_mut().editing = None;
        self.ctx.success("Entry updated");
        self.reload().await
    }

    async fn delete(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        let id = event.required_target()?;
        knowledge_service::delete_entry(&self.ctx.api, &id).await?;
        {
            let mut state = self.state.borrow_mut();
            if state.editing.as_deref() == Some(id.as_str()) {
                state.editing = None;
            }
        }
        self.ctx.success("Entry deleted");
        self.reload().await
    }

    async fn search(self: Rc<Self>, event: ActionEvent) -> DashboardResult<()> {
        self.state.borrow_mut().query = event.field("query").unwrap_or("").to_string();
        self.render();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::platform::ToastLevel;
    use crate::services::api_client::HttpMethod;
    use crate::testing::PageHarness;
    use futures::executor::block_on;
    use serde_json::json;

    const LIST: &str = "/api/base-knowledge";

    fn loaded() -> PageHarness {
        let harness = PageHarness::signed_in();
        harness.transport.respond_json(
            HttpMethod::Get,
            LIST,
            json!([
                {"id": 1, "title": "Wifi", "content": "pw is on the fridge", "tags": ["guest"]},
                {"id": 2, "title": "Parking", "content": "Level -2"}
            ]),
        );
        block_on(KnowledgeViewModel::new(harness.ctx.clone()).load()).unwrap();
        harness
    }

    #[test]
    fn load_requires_auth() {
        let harness = PageHarness::new();
        let result = block_on(KnowledgeViewModel::new(harness.ctx.clone()).load());
        assert_eq!(result, Err(DashboardError::Unauthorized));
        assert!(harness.transport.requests().is_empty());
    }

    #[test]
    fn load_renders_entries_and_binds_actions() {
        let harness = loaded();
        assert!(harness.view.html().contains("Wifi"));
        assert!(harness.view.has_action("knowledge-create"));
        assert!(harness.view.has_action("knowledge-search"));
    }

    #[test]
    fn create_validates_before_calling_backend() {
        let harness = loaded();
        harness.dispatch(ActionEvent::new("knowledge-create").with_field("title", "Only title"));
        assert_eq!(
            harness.last_toast(),
            Some((ToastLevel::Error, "Content is required".to_string()))
        );
        assert_eq!(harness.transport.count(HttpMethod::Post, LIST), 0);
    }

    #[test]
    fn create_posts_draft_and_reloads() {
        let harness = loaded();
        harness.transport.respond_json(HttpMethod::Post, LIST, json!({"id": 3}));
        harness.dispatch(
            ActionEvent::new("knowledge-create")
                .with_field("title", " Door code ")
                .with_field("content", "1234")
                .with_field("tags", "access, , doors"),
        );
        let body = harness.transport.requests_to(HttpMethod::Post, LIST)[0].json_body();
        assert_eq!(body, json!({"title": "Door code", "content": "1234", "tags": ["access", "doors"]}));
        assert_eq!(harness.last_toast(), Some((ToastLevel::Success, "Entry created".to_string())));
        assert_eq!(harness.transport.count(HttpMethod::Get, LIST), 2);
    }

    #[test]
    fn edit_then_update_puts_to_entry() {
        let harness = loaded();
        harness.dispatch(ActionEvent::new("knowledge-edit").with_target("2"));
        assert!(harness.view.html().contains(r#"data-action="knowledge-update" data-id="2""#));

        harness.transport.respond_json(HttpMethod::Put, "/api/base-knowledge/2", json!({}));
        harness.dispatch(
            ActionEvent::new("knowledge-update")
                .with_target("2")
                .with_field("title", "Parking")
                .with_field("content", "Level -3"),
        );
        assert_eq!(harness.transport.count(HttpMethod::Put, "/api/base-knowledge/2"), 1);
        assert!(harness.view.html().contains(r#"data-action="knowledge-create""#));
    }

    #[test]
    fn delete_failure_is_toasted() {
        let harness = loaded();
        harness
            .transport
            .respond(HttpMethod::Delete, "/api/base-knowledge/1", 500, r#"{"error":"locked"}"#);
        harness.dispatch(ActionEvent::new("knowledge-delete").with_target("1"));
        assert_eq!(
            harness.last_toast(),
            Some((ToastLevel::Error, "HTTP 500: locked".to_string()))
        );
    }

    #[test]
    fn search_filters_without_backend_call() {
        let harness = loaded();
        harness.dispatch(ActionEvent::new("knowledge-search").with_field("query", "FRIDGE"));
        assert!(harness.view.html().contains("Wifi"));
        assert!(!harness.view.html().contains("Parking"));
        assert_eq!(harness.transport.count(HttpMethod::Get, LIST), 1);
    }
}
