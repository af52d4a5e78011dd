//! HTTP endpoints of the checkout.
//!
//! `execute` starts a payment, `ok`/`ko` are the buyer's landing pages, and
//! `process` is the IPN listener PayPal calls server-to-server. Paths come
//! from [`CheckoutRoutes`].

pub mod handlers;
pub mod page;

use crate::application::form_builder::CheckoutFormBuilder;
use crate::application::ipn_verifier::IpnVerifier;
use crate::config::CheckoutRoutes;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub form_builder: Arc<CheckoutFormBuilder>,
    pub ipn_verifier: Arc<IpnVerifier>,
    pub routes: CheckoutRoutes,
}

pub fn router(state: AppState) -> Router {
    let routes = state.routes.clone();
    Router::new()
        .route(&routes.execute, get(handlers::execute))
        .route(&routes.success, get(handlers::success))
        .route(&routes.fail, get(handlers::fail))
        .route(&routes.process, post(handlers::process))
        .with_state(state)
}
