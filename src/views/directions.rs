use maud::{html, Markup};
use crate::models::directions::TRAVEL_MODES;
use crate::models::DirectionsProfile;

pub fn render_directions_page(profiles: &[DirectionsProfile]) -> Markup {
    html! {
        section.page.directions-page {
            header.page-header { h1 { "Directions settings" } }
            @if profiles.is_empty() {
                p.empty-state { "No directions profiles." }
            }
            @for profile in profiles {
                form.settings-form.profile-card data-action="directions-save" data-id=(profile.id) {
                    h2 { (profile.name) }
                    label {
                        "Travel mode"
                        select name="travel_mode" {
                            @for mode in TRAVEL_MODES {
                                option value=(mode) selected[profile.travel_mode == mode] { (mode) }
                            }
                        }
                    }
                    label.checkbox {
                        input type="checkbox" name="avoid_tolls" checked[profile.avoid_tolls];
                        "Avoid tolls"
                    }
                    label.checkbox {
                        input type="checkbox" name="avoid_highways" checked[profile.avoid_highways];
                        "Avoid highways"
                    }
                    label {
                        "Departure buffer (min)"
                        input type="number" min="0" name="departure_buffer_minutes" value=(profile.departure_buffer_minutes);
                    }
                    div.form-actions {
                        button.btn.btn-primary type="submit" { "Save" }
                        button.btn type="button" data-action="directions-reset" data-id=(profile.id) { "Reset" }
                    }
                }
            }
        }
    }
}
