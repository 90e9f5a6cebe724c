//! # Checkout
//!
//! Places an order from the cart and a customer form.
//!
//! ## Submission State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Submission Attempt                               │
//! │                                                                         │
//! │   Idle ──► Validating ──┬── invalid form / empty cart ──► Failed ──┐    │
//! │                         │                                          │    │
//! │                         ▼                                          │    │
//! │                    Submitting ──┬── transport error ──► Failed ────┤    │
//! │                                 │   (cart kept)                    │    │
//! │                                 ▼                                  │    │
//! │                             Succeeded ─────────────────────────────┤    │
//! │                             (cart cleared)                         │    │
//! │                                                                    ▼    │
//! │                                                                   Idle  │
//! │                                                                         │
//! │  A second attempt while one is in flight is rejected up front with      │
//! │  AlreadySubmitting. In-flight attempts can't be cancelled.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront_core::order::prepare;
use storefront_core::{CustomerForm, Money, OrderSubmission};
use storefront_store::{CartStore, KeyValueStore};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, TransportError};
use crate::transport::{Params, Transport};

/// Order creation endpoint.
pub const CREATE_ORDER_PATH: &str = "/api/v1/order/createOrder";

/// Shown when the backend gives no reason for a failed order.
pub const ORDER_FAILED_MESSAGE: &str = "Failed to place order.";

/// Shown after an order is accepted.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutPhase::Idle => "idle",
            CheckoutPhase::Validating => "validating",
            CheckoutPhase::Submitting => "submitting",
            CheckoutPhase::Succeeded => "succeeded",
            CheckoutPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What the backend tells us about an accepted order.
///
/// Every field is optional: an accepted order with an unexpected body is
/// still an accepted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub total_price: Option<Money>,

    #[serde(default)]
    pub order_status: Option<String>,
}

// =============================================================================
// Checkout
// =============================================================================

/// Order Assembler bound to a transport.
///
/// One per session. Cheap to share behind an `Arc`; all methods take `&self`.
pub struct Checkout<T: ?Sized> {
    transport: Arc<T>,
    busy: AtomicBool,
    phase: watch::Sender<CheckoutPhase>,
}

/// Clears the busy flag when the attempt ends, however it ends.
struct Attempt<'a> {
    busy: &'a AtomicBool,
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl<T: Transport + ?Sized> Checkout<T> {
    pub fn new(transport: Arc<T>) -> Self {
        let (phase, _) = watch::channel(CheckoutPhase::Idle);
        Checkout {
            transport,
            busy: AtomicBool::new(false),
            phase,
        }
    }

    /// Current phase. `Idle` whenever no attempt is running.
    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.borrow()
    }

    /// Receiver for phase changes (e.g. to drive a spinner).
    pub fn subscribe_phase(&self) -> watch::Receiver<CheckoutPhase> {
        self.phase.subscribe()
    }

    /// True while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validates the form, assembles the order from the cart and submits it.
    ///
    /// Validation failures never reach the transport.
    pub async fn place_order<S: KeyValueStore>(
        &self,
        form: &CustomerForm,
        cart_store: &mut CartStore<S>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let _attempt = self.begin()?;

        self.set_phase(CheckoutPhase::Validating);
        let submission = match prepare(cart_store.cart(), form) {
            Ok(submission) => submission,
            Err(e) => {
                debug!(error = %e, "Checkout rejected before submission");
                self.finish(CheckoutPhase::Failed);
                return Err(e.into());
            }
        };

        self.send(&submission, cart_store).await
    }

    /// Submits an already assembled order.
    ///
    /// On success the cart is cleared. On failure it is left untouched and
    /// the error carries the backend's message, or [`ORDER_FAILED_MESSAGE`].
    pub async fn submit<S: KeyValueStore>(
        &self,
        submission: &OrderSubmission,
        cart_store: &mut CartStore<S>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let _attempt = self.begin()?;
        self.send(submission, cart_store).await
    }

    fn begin(&self) -> Result<Attempt<'_>, CheckoutError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CheckoutError::AlreadySubmitting)?;
        Ok(Attempt { busy: &self.busy })
    }

    async fn send<S: KeyValueStore>(
        &self,
        submission: &OrderSubmission,
        cart_store: &mut CartStore<S>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        self.set_phase(CheckoutPhase::Submitting);
        debug!(
            products = submission.product_ids.len(),
            sizes = submission.quantity_by_size_id.len(),
            "Submitting order"
        );

        let result = match serde_json::to_value(submission) {
            Ok(body) => {
                self.transport
                    .post(CREATE_ORDER_PATH, Some(body), Params::new())
                    .await
            }
            Err(e) => Err(TransportError::Decode(e.to_string())),
        };

        match result {
            Ok(response) => {
                cart_store.clear_cart();
                let confirmation = serde_json::from_value::<OrderConfirmation>(response)
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Unrecognised order response; order was accepted");
                        OrderConfirmation::default()
                    });
                info!(
                    order_id = confirmation.id.as_deref().unwrap_or("-"),
                    status = confirmation.order_status.as_deref().unwrap_or("-"),
                    "Order placed"
                );
                self.finish(CheckoutPhase::Succeeded);
                Ok(confirmation)
            }
            Err(source) => {
                let message = source
                    .server_message()
                    .unwrap_or(ORDER_FAILED_MESSAGE)
                    .to_string();
                warn!(error = %source, "Order submission failed; cart kept");
                self.finish(CheckoutPhase::Failed);
                Err(CheckoutError::Failed { message, source })
            }
        }
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        self.phase.send_replace(phase);
    }

    /// Reports the outcome, then returns to `Idle`.
    fn finish(&self, outcome: CheckoutPhase) {
        self.set_phase(outcome);
        self.set_phase(CheckoutPhase::Idle);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
