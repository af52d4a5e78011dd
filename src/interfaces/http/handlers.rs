use super::AppState;
use super::page::{render_form, render_message};
use crate::application::ipn_verifier::IpnOutcome;
use crate::domain::ipn::IpnPayload;
use crate::domain::order::OrderId;
use crate::error::PaymentError;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, info, instrument, warn};

/// Body answered to PayPal once the notification has been handled.
pub const IPN_OK: &str = "OK";
/// Body answered to PayPal when a required parameter was missing.
pub const IPN_FAIL: &str = "FAIL";

fn order_id(state: &AppState, query: Option<&str>) -> Option<OrderId> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == state.routes.order_field.as_str())
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(OrderId::from)
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = match &self {
            PaymentError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::CurrencyNotSupported(_) | PaymentError::CartMismatch { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PaymentError::ParameterNotReceived(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "The payment could not be started.".to_string(),
            _ => self.to_string(),
        };
        (status, Html(render_message("Payment error", &message).into_string())).into_response()
    }
}

/// `GET execute`: renders the self-submitting PayPal form for an order.
#[instrument(skip_all)]
pub async fn execute(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let Some(order_id) = order_id(&state, query.as_deref()) else {
        return PaymentError::ParameterNotReceived(vec![state.routes.order_field.clone()])
            .into_response();
    };

    match state.form_builder.build_form(&order_id).await {
        Ok(form) => Html(render_form(&form).into_string()).into_response(),
        Err(err) => {
            error!(%order_id, error = %err, "[PAYMENT] Paypal form could not be built");
            err.into_response()
        }
    }
}

/// `GET ok`: where PayPal returns the buyer after paying.
#[instrument(skip_all)]
pub async fn success(State(state): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let message = match order_id(&state, query.as_deref()) {
        Some(order_id) => format!("Thank you, your payment for order #{order_id} was received."),
        None => "Thank you, your payment was received.".to_string(),
    };
    Html(render_message("Payment received", &message).into_string())
}

/// `GET ko`: where PayPal returns the buyer after cancelling.
#[instrument(skip_all)]
pub async fn fail(State(state): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let message = match order_id(&state, query.as_deref()) {
        Some(order_id) => format!("The payment for order #{order_id} was not completed."),
        None => "The payment was not completed.".to_string(),
    };
    Html(render_message("Payment not completed", &message).into_string())
}

/// `POST process`: the IPN listener.
///
/// Always answers 200, otherwise PayPal keeps re-delivering the
/// notification. Outcomes are only logged.
#[instrument(skip_all)]
pub async fn process(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(order_id) = order_id(&state, query.as_deref()) else {
        error!(
            parameter = %state.routes.order_field,
            "[PAYMENT] Paypal payment error. Parameter not received"
        );
        return (StatusCode::OK, IPN_FAIL);
    };

    let payload = IpnPayload::from_body(String::from_utf8_lossy(&body));

    match state.ipn_verifier.process(&order_id, &payload).await {
        Ok(IpnOutcome::Completed) => {
            info!(%order_id, "[PAYMENT] Paypal payment success");
        }
        Ok(IpnOutcome::Duplicate) => {
            warn!(%order_id, "[PAYMENT] Paypal payment already processed");
        }
        Err(PaymentError::ParameterNotReceived(keys)) => {
            error!(
                %order_id,
                parameter = %keys.join(", "),
                "[PAYMENT] Paypal payment error. Parameter not received"
            );
            return (StatusCode::OK, IPN_FAIL);
        }
        Err(err) => {
            error!(%order_id, error = %err, "[PAYMENT] Paypal payment error");
        }
    }

    (StatusCode::OK, IPN_OK)
}
