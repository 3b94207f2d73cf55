//! Custom request extractors.

mod payment_form;
mod validated_json;

pub use payment_form::PaymentForm;
pub use validated_json::{JsonBody, ValidatedJson};
