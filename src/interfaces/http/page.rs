use crate::domain::checkout::PaymentForm;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Renders the redirect form as a page that submits itself on load.
pub fn render_form(form: &PaymentForm) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Redirecting to PayPal" }
            }
            body {
                form id="paypal_form" name="paypal_form" action=(form.action) method=(form.method) {
                    @for field in &form.fields {
                        input type="hidden" name=(field.name) value=(field.value);
                    }
                    noscript {
                        button type="submit" { "Continue to PayPal" }
                    }
                }
                (PreEscaped(r#"<script type="text/javascript">document.getElementById("paypal_form").submit();</script>"#))
            }
        }
    }
}

/// A minimal page with a title and one message line.
pub fn render_message(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                p { (message) }
            }
        }
    }
}
