use maud::{html, Markup};
use crate::viewmodels::command_palette::PaletteState;

pub fn render_palette(state: &PaletteState) -> Markup {
    if !state.open {
        return html! { div.palette.palette-closed hidden {} };
    }
    let matches = state.matches();
    html! {
        div.palette.palette-open role="dialog" aria-label="Command palette" {
            div.palette-backdrop data-action="palette-close" {}
            div.palette-panel {
                input.palette-input type="text" name="query" value=(state.query)
                    placeholder="Go to…" autocomplete="off" autofocus data-action="palette-input";
                ul.palette-results role="listbox" {
                    @for (index, command) in matches.iter().enumerate() {
                        li.palette-item.selected[index == state.selected] role="option"
                            aria-selected=(index == state.selected)
                            data-action="palette-select" data-id=(command.route) {
                            span.palette-label { (command.label) }
                            span.palette-route { "#" (command.route) }
                        }
                    }
                    @if matches.is_empty() {
                        li.palette-empty { "No matching pages" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::command_palette::Command;

    #[test]
    fn marks_selected_item() {
        let mut state = PaletteState::new(vec![
            Command::new("knowledge", "Knowledge base"),
            Command::new("gateway", "Gateway"),
        ]);
        state.open();
        state.selected = 1;
        let html = render_palette(&state).into_string();
        assert!(html.contains(r#"class="palette-item selected""#));
        assert!(html.contains(r#"aria-selected="true" data-action="palette-select" data-id="gateway""#));
    }

    #[test]
    fn closed_palette_is_hidden() {
        assert!(render_palette(&PaletteState::default()).into_string().contains("hidden"));
    }
}
