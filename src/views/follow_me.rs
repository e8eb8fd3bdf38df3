use maud::{html, Markup};
use crate::models::FollowMeOverview;

pub fn render_follow_me_page(overview: &FollowMeOverview) -> Markup {
    let config = &overview.config;
    html! {
        section.page.follow-me-page {
            header.page-header { h1 { "Follow-me audio" } }

            form.settings-form data-action="follow-me-save" {
                label.checkbox {
                    input type="checkbox" name="enabled" checked[config.enabled];
                    "Enabled"
                }
                label { "Transfer delay (s)" input type="number" min="0" name="transfer_delay_seconds" value=(config.transfer_delay_seconds); }
                label { "Volume (%)" input type="number" min="0" max="100" name="volume_percent" value=(config.volume_percent); }
                label.checkbox {
                    input type="checkbox" name="resume_playback" checked[config.resume_playback];
                    "Resume playback"
                }
                button.btn.btn-primary type="submit" { "Save" }
            }

            div.columns {
                div.column {
                    h2 { "Rooms" }
                    ul.item-list {
                        @for room in &overview.rooms {
                            li {
                                strong { (room.name) }
                                span.muted { (room.media_player) }
                                button.btn.btn-small.btn-danger type="button" data-action="follow-me-remove-room" data-id=(room.name) { "Remove" }
                            }
                        }
                        @if overview.rooms.is_empty() { li.empty-state { "No rooms" } }
                    }
                    form.inline-form data-action="follow-me-add-room" {
                        input type="text" name="name" placeholder="Room name";
                        input type="text" name="media_player" placeholder="media_player.kitchen";
                        button.btn type="submit" { "Add room" }
                    }
                }
                div.column {
                    h2 { "Excluded devices" }
                    ul.item-list {
                        @for device in &overview.excluded {
                            li {
                                strong { (device.name) }
                                button.btn.btn-small.btn-danger type="button" data-action="follow-me-remove-excluded" data-id=(device.name) { "Remove" }
                            }
                        }
                        @if overview.excluded.is_empty() { li.empty-state { "Nothing excluded" } }
                    }
                    form.inline-form data-action="follow-me-add-excluded" {
                        input type="text" name="name" placeholder="Device name";
                        button.btn type="submit" { "Exclude" }
                    }
                }
            }
        }
    }
}
