use maud::{html, Markup};

pub fn render_login(error: Option<&str>, username: &str) -> Markup {
    html! {
        section.page.login-page {
            form.login-form data-action="login-submit" {
                h1 { "Sign in" }
                @if let Some(error) = error {
                    p.form-error role="alert" { (error) }
                }
                label { "Username" input type="text" name="username" autocomplete="username" value=(username); }
                label { "Password" input type="password" name="password" autocomplete="current-password"; }
                button.btn.btn-primary type="submit" { "Sign in" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_username_and_shows_error() {
        let html = render_login(Some("HTTP 403: locked"), "ops").into_string();
        assert!(html.contains(r#"value="ops""#));
        assert!(html.contains("HTTP 403: locked"));
        assert!(!render_login(None, "").into_string().contains("form-error"));
    }
}
