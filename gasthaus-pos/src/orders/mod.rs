//! Order editing, send-delta routing, split billing and close-out

pub mod cart;
pub mod checkout;
pub mod delta;
pub mod split;

pub use cart::{DecrementOutcome, OrderCart};
pub use checkout::{build_history_record, close_order};
pub use delta::{SendPlan, apply_markers, compute_send_plan};
pub use split::{SplitSelection, partial_total, plan_partial_payment};
