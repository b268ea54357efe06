pub mod admin;
pub mod delivery_log;
pub mod entry;
pub mod feed;
pub mod form;

pub use admin::Admin;
pub use delivery_log::DeliveryLog;
pub use entry::Entry;
pub use feed::Feed;
pub use form::{Field, FieldType, Form, SubInput};
