//! # Checkout Command
//!
//! Places an order for the current cart.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront checkout --email ... --phone-number ...                     │
//! │                                                                         │
//! │  1. Refresh CSRF cookie (catalog read, failures only logged)            │
//! │  2. Checkout::place_order                                               │
//! │       ├── form invalid / cart empty ──► VALIDATION_ERROR, no request    │
//! │       ├── backend refuses ────────────► ORDER_FAILED, cart kept         │
//! │       └── accepted ───────────────────► confirmation, cart cleared      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use clap::Args;
use storefront_client::checkout::ORDER_PLACED_MESSAGE;
use storefront_client::{CatalogClient, Checkout, Transport};
use storefront_core::CustomerForm;
use storefront_store::{CartStore, KeyValueStore};
use tracing::warn;

use crate::error::CliError;

/// Customer details. Omitted fields are sent to validation as empty.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub street: String,

    #[arg(long, default_value = "")]
    pub building_number: String,

    #[arg(long, default_value = "")]
    pub flat_number: String,

    /// Egyptian mobile number, e.g. 01012345678
    #[arg(long, default_value = "")]
    pub phone_number: String,
}

impl From<CheckoutArgs> for CustomerForm {
    fn from(args: CheckoutArgs) -> Self {
        CustomerForm {
            email: args.email,
            name: args.name,
            city: args.city,
            street: args.street,
            building_number: args.building_number,
            flat_number: args.flat_number,
            phone_number: args.phone_number,
        }
    }
}

pub async fn run<S, T>(
    args: CheckoutArgs,
    store: &mut CartStore<S>,
    catalog: &CatalogClient<T>,
    checkout: &Checkout<T>,
    currency: &str,
) -> Result<String, CliError>
where
    S: KeyValueStore,
    T: Transport + ?Sized,
{
    if let Err(e) = catalog.refresh_csrf_token().await {
        warn!(error = %e, "Could not refresh CSRF token; submitting anyway");
    }

    let form = CustomerForm::from(args);
    let confirmation = checkout.place_order(&form, store).await?;

    let mut out = ORDER_PLACED_MESSAGE.to_string();
    if let Some(id) = &confirmation.id {
        let _ = write!(out, "\nOrder: {id}");
    }
    if let Some(status) = &confirmation.order_status {
        let _ = write!(out, "\nStatus: {status}");
    }
    if let Some(total) = confirmation.total_price {
        let _ = write!(out, "\nTotal: {total} {currency}");
    }
    Ok(out)
}
