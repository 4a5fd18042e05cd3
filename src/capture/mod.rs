//! Key-down event sources

mod traits;

pub use traits::{EventCapture, KeyDownCallback, ManualCapture, SubscriptionHandle};
