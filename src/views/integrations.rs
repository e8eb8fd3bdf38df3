use chrono::{DateTime, Utc};
use maud::{html, Markup};
use crate::models::integrations::IntegrationOp;
use crate::models::IntegrationCard;
use crate::utils::format::relative_time_or;

pub fn render_integrations_page(cards: &[IntegrationCard], now: DateTime<Utc>) -> Markup {
    html! {
        section.page.integrations-page {
            header.page-header { h1 { "Integrations" } }
            div.integration-grid {
                @for card in cards {
                    div class=(format!("integration-card {}", card.status.css_class())) data-id=(card.descriptor.id) {
                        h3 { (card.descriptor.label) }
                        p.integration-state { (if card.status.state.is_empty() { "unknown" } else { card.status.state.as_str() }) }
                        @if let Some(message) = &card.status.message { p.muted { (message) } }
                        p.muted { "Checked " (relative_time_or(card.status.last_checked, now, "—")) }
                        div.card-actions {
                            @for op in [IntegrationOp::Test, IntegrationOp::Reconnect, IntegrationOp::Disconnect] {
                                button.btn.btn-small type="button" data-action="integration-action"
                                    data-id=(card.descriptor.id) data-op=(op.as_str()) { (op.as_str()) }
                            }
                        }
                    }
                }
            }
        }
    }
}
