use maud::{html, Markup};
use serde_json::Value;
use crate::models::gateway::{flatten, FieldKind, GatewayField};

/// Typed form over whatever keys the gateway config has, grouped by section.
pub fn render_gateway_page(config: &Value) -> Markup {
    let fields = flatten(config);
    let mut sections: Vec<(Option<&str>, Vec<&GatewayField>)> = Vec::new();
    for field in &fields {
        match sections.iter_mut().find(|(name, _)| *name == field.section()) {
            Some((_, group)) => group.push(field),
            None => sections.push((field.section(), vec![field])),
        }
    }

    html! {
        section.page.gateway-page {
            header.page-header {
                h1 { "Gateway configuration" }
                button.btn.btn-danger type="button" data-action="gateway-reset" { "Reset to defaults" }
            }
            @if fields.is_empty() {
                p.empty-state { "The gateway reported no settings." }
            } @else {
                form.settings-form data-action="gateway-save" {
                    @for (section, group) in &sections {
                        fieldset {
                            legend { (section.unwrap_or("General")) }
                            @for field in group {
                                (render_field(field))
                            }
                        }
                    }
                    button.btn.btn-primary type="submit" { "Save changes" }
                }
            }
        }
    }
}

fn render_field(field: &GatewayField) -> Markup {
    html! {
        @match field.kind() {
            FieldKind::Toggle => {
                label.checkbox {
                    input type="checkbox" name=(field.key) checked[field.value.as_bool().unwrap_or(false)];
                    (field.label())
                }
            }
            FieldKind::Number => {
                label { (field.label()) input type="number" step="any" name=(field.key) value=(field.display_value()); }
            }
            FieldKind::Text => {
                label { (field.label()) input type="text" name=(field.key) value=(field.display_value()); }
            }
            FieldKind::Json => {
                label { (field.label()) textarea.json name=(field.key) rows="3" { (field.display_value()) } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_typed_inputs_by_section() {
        let html = render_gateway_page(&json!({"debug": true, "mqtt": {"port": 1883, "host": "broker"}})).into_string();
        assert!(html.contains(r#"type="checkbox" name="debug" checked"#));
        assert!(html.contains(r#"type="number" step="any" name="mqtt.port" value="1883""#));
        assert!(html.contains("<legend>mqtt</legend>"));
        assert!(html.contains("<legend>General</legend>"));
    }
}
