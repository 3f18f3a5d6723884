//! Channel business rules on top of the storage port.

mod channels;
mod validation;
pub use channels::ChannelService;
pub use validation::{FieldKind, RequestValidator, ValidationRule, CHANNEL_RULES};
