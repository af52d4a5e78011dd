use serde::{Deserialize, Serialize};
use std::fmt;

/// Production `cgi-bin` endpoint used both for the redirect form and IPN validation.
pub const PAYPAL_PRODUCTION_URL: &str = "https://www.paypal.com/cgi-bin/webscr";
/// Sandbox counterpart of [`PAYPAL_PRODUCTION_URL`].
pub const PAYPAL_SANDBOX_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// The PayPal environment the checkout talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaypalEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl PaypalEnvironment {
    /// Maps the host framework's debug flag: debug means sandbox.
    pub fn from_debug(debug: bool) -> Self {
        if debug { Self::Sandbox } else { Self::Production }
    }

    pub fn webscr_url(&self) -> &'static str {
        match self {
            Self::Sandbox => PAYPAL_SANDBOX_URL,
            Self::Production => PAYPAL_PRODUCTION_URL,
        }
    }
}

impl fmt::Display for PaypalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// A single hidden input of the redirect form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// The redirect form posted by the buyer's browser to PayPal.
///
/// Field order is significant and stable: rendering the same order twice
/// yields the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentForm {
    pub action: String,
    pub method: &'static str,
    pub fields: Vec<FormField>,
}

impl PaymentForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.fields.push(FormField {
            name: name.into(),
            value: value.to_string(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Encodes the fields as an `application/x-www-form-urlencoded` body.
    pub fn to_urlencoded(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter().map(|f| (&f.name, &f.value)))
            .finish()
    }
}
