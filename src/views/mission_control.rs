// ============================================================================
// MISSION CONTROL - Home dashboard: metrics, services, recent events
// ============================================================================

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use crate::models::DashboardSnapshot;
use crate::utils::format::{compact_number, relative_time_or};
use crate::views::chart::{bar_chart, sparkline, trend};

const SPARK_WIDTH: u32 = 120;
const SPARK_HEIGHT: u32 = 32;
const MAX_EVENTS: usize = 10;

pub fn render_mission_control(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> Markup {
    let unhealthy = snapshot.unhealthy_services();
    let bars: Vec<(String, f64)> = snapshot
        .metrics
        .iter()
        .map(|m| (m.title().to_string(), m.value))
        .collect();

    html! {
        section.page.mission-control {
            header.page-header {
                h1 { "Mission control" }
                span.muted { "Updated " (relative_time_or(snapshot.generated_at, now, "just now")) }
                button.btn type="button" data-action="dashboard-refresh" { "Refresh" }
            }

            div.metric-grid {
                @for metric in &snapshot.metrics {
                    @let direction = trend(&metric.history);
                    div.metric-card data-metric=(metric.key) {
                        span.metric-label { (metric.title()) }
                        span.metric-value {
                            (compact_number(metric.value))
                            @if let Some(unit) = &metric.unit { " " small { (unit) } }
                        }
                        span class=(direction.css_class()) { (direction.arrow()) }
                        (sparkline(&metric.history, SPARK_WIDTH, SPARK_HEIGHT))
                    }
                }
            }

            @if !bars.is_empty() {
                (bar_chart(&bars))
            }

            div.columns {
                div.column {
                    h2 {
                        "Services "
                        @if unhealthy > 0 {
                            span.badge.badge-error { (unhealthy) " down" }
                        } @else {
                            span.badge.badge-ok { "all healthy" }
                        }
                    }
                    ul.service-list {
                        @for service in &snapshot.services {
                            li class=(if service.is_healthy() { "status-ok" } else { "status-error" }) {
                                strong { (service.name) }
                                span { (service.status) }
                                @if let Some(detail) = &service.detail { span.muted { (detail) } }
                            }
                        }
                    }
                }
                div.column {
                    h2 { "Recent events" }
                    ul.event-list {
                        @for event in snapshot.events.iter().take(MAX_EVENTS) {
                            li class=(format!("event-{}", event.level)) {
                                time { (relative_time_or(event.at, now, "")) }
                                " " (event.message)
                            }
                        }
                        @if snapshot.events.is_empty() { li.empty-state { "No recent events" } }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_cards_with_sparklines_and_health() {
        let snapshot: DashboardSnapshot = serde_json::from_str(
            r#"{
                "metrics": [{"key": "rps", "label": "Requests", "value": 1500, "history": [1, 3]}],
                "services": [{"name": "db", "status": "down"}]
            }"#,
        )
        .unwrap();
        let html = render_mission_control(&snapshot, Utc::now()).into_string();
        assert!(html.contains("1.5k"));
        assert!(html.contains("trend-up"));
        assert!(html.contains("polyline"));
        assert!(html.contains("1 down"));
        assert!(html.contains(r#"data-action="dashboard-refresh""#));
    }
}
