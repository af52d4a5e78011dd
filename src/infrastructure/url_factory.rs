use crate::config::CheckoutRoutes;
use crate::domain::order::OrderId;
use crate::domain::ports::UrlFactory;
use crate::error::Result;
use url::Url;

/// Builds callback URLs from the public base URL of the shop and the
/// checkout routes, appending the order id as a query parameter.
#[derive(Debug, Clone)]
pub struct RouteUrlFactory {
    base: Url,
    routes: CheckoutRoutes,
}

impl RouteUrlFactory {
    pub fn new(base: &str, routes: CheckoutRoutes) -> Result<Self> {
        let mut base = Url::parse(base)?;
        // A base without trailing slash would lose its last path segment on join
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, routes })
    }

    pub fn with_default_routes(base: &str) -> Result<Self> {
        Self::new(base, CheckoutRoutes::default())
    }

    fn order_url(&self, path: &str, order_id: &OrderId) -> Result<Url> {
        let mut url = self.base.join(path.trim_start_matches('/'))?;
        url.query_pairs_mut()
            .append_pair(&self.routes.order_field, order_id.as_str());
        Ok(url)
    }
}

impl UrlFactory for RouteUrlFactory {
    fn return_url(&self, order_id: &OrderId) -> Result<Url> {
        self.order_url(&self.routes.success, order_id)
    }

    fn cancel_return_url(&self, order_id: &OrderId) -> Result<Url> {
        self.order_url(&self.routes.fail, order_id)
    }

    fn notify_url(&self, order_id: &OrderId) -> Result<Url> {
        self.order_url(&self.routes.process, order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;

    #[test]
    fn test_default_routes() {
        let factory = RouteUrlFactory::with_default_routes("https://shop.example.com").unwrap();
        let id = OrderId::from("42");

        assert_eq!(
            factory.return_url(&id).unwrap().as_str(),
            "https://shop.example.com/payment/paypal_web_checkout/ok?order_id=42"
        );
        assert_eq!(
            factory.cancel_return_url(&id).unwrap().as_str(),
            "https://shop.example.com/payment/paypal_web_checkout/ko?order_id=42"
        );
        assert_eq!(
            factory.notify_url(&id).unwrap().as_str(),
            "https://shop.example.com/payment/paypal_web_checkout/process?order_id=42"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let factory = RouteUrlFactory::with_default_routes("https://example.com/shop").unwrap();
        let url = factory.notify_url(&OrderId::from("a b")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://example.com/shop/payment/paypal_web_checkout/process?order_id=a+b"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(matches!(
            RouteUrlFactory::with_default_routes("not a url"),
            Err(PaymentError::InvalidUrl(_))
        ));
    }
}
