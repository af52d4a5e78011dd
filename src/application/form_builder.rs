use crate::domain::checkout::{PaymentForm, PaypalEnvironment};
use crate::domain::currency::check_currency;
use crate::domain::money::MinorUnits;
use crate::domain::order::{CartLine, Order, OrderId};
use crate::domain::ports::{EventNotifierRef, OrderBridgeRef, UrlFactoryRef};
use crate::error::{PaymentError, Result};
use tracing::{debug, instrument};

/// Merchant-level settings the redirect form carries.
#[derive(Debug, Clone)]
pub struct FormSettings {
    /// Merchant PayPal account (usually its e-mail).
    pub business: String,
    pub environment: PaypalEnvironment,
    /// Value of the `lc` field, e.g. `en_US`.
    pub locale: String,
}

/// Builds the form that sends the buyer to PayPal's hosted checkout.
pub struct CheckoutFormBuilder {
    orders: OrderBridgeRef,
    notifier: EventNotifierRef,
    urls: UrlFactoryRef,
    settings: FormSettings,
}

impl CheckoutFormBuilder {
    pub fn new(
        orders: OrderBridgeRef,
        notifier: EventNotifierRef,
        urls: UrlFactoryRef,
        settings: FormSettings,
    ) -> Self {
        Self {
            orders,
            notifier,
            urls,
            settings,
        }
    }

    /// Resolves the order and assembles its cart-upload form.
    ///
    /// Emits `order_load` before the lookup and `order_created` once the
    /// order is known; nothing else is side-effecting.
    #[instrument(skip(self), fields(environment = %self.settings.environment))]
    pub async fn build_form(&self, order_id: &OrderId) -> Result<PaymentForm> {
        self.notifier.order_load(order_id).await;

        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(order_id.clone()))?;

        self.notifier.order_created(&order).await;

        let currency = check_currency(&order.currency)?;

        let lines = cart_lines(&order);
        let discount = cart_discount(&order);
        let charged = charged_total(&lines, discount);
        if charged != Some(order.amount) {
            return Err(PaymentError::CartMismatch {
                order_id: order.id.clone(),
                expected: order.amount,
                charged,
            });
        }

        let mut form = PaymentForm::new(self.settings.environment.webscr_url());
        form.push("business", &self.settings.business);
        form.push("item_number", &order.id);
        form.push("currency_code", currency);
        form.push("return", self.urls.return_url(&order.id)?);
        form.push("cancel_return", self.urls.cancel_return_url(&order.id)?);
        form.push("notify_url", self.urls.notify_url(&order.id)?);
        form.push("cmd", "_cart");
        form.push("upload", 1);
        form.push("lc", &self.settings.locale);

        for (index, line) in lines.iter().enumerate() {
            let n = index + 1;
            form.push(format!("item_name_{n}"), &line.name);
            form.push(format!("amount_{n}"), line.amount);
            form.push(format!("quantity_{n}"), line.quantity);
        }

        if let Some(discount) = discount {
            form.push("discount_amount_cart", discount);
        }

        debug!(order_id = %order.id, fields = form.fields.len(), "Built PayPal form");
        Ok(form)
    }
}

/// The order's cart, or a single line for the whole total when it has none.
fn cart_lines(order: &Order) -> Vec<CartLine> {
    if order.cart.is_empty() {
        vec![CartLine::new(format!("Order {}", order.id), order.amount, 1)]
    } else {
        order.cart.clone()
    }
}

/// Discount sent along with the cart lines.
///
/// A synthesized single line already carries the discounted total, so the
/// discount only travels with a real cart.
fn cart_discount(order: &Order) -> Option<MinorUnits> {
    if order.cart.is_empty() {
        return None;
    }
    order.discount.filter(|discount| !discount.is_zero())
}

/// What PayPal charges for `lines` less `discount`, or `None` on overflow.
fn charged_total(lines: &[CartLine], discount: Option<MinorUnits>) -> Option<MinorUnits> {
    let gross = lines.iter().try_fold(MinorUnits::ZERO, |total, line| {
        line.amount
            .checked_mul(line.quantity)
            .and_then(|price| total.checked_add(price))
    })?;
    gross.checked_sub(discount.unwrap_or(MinorUnits::ZERO))
}
