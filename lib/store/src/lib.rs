//! Record trait + Ops CRUD operations.
//!
//! The model impls [`Record`] to declare its key + hooks.
//! [`Ops<T>`] provides the actual get/save/list/delete using a KvStore backend.

pub mod ops;
pub mod record;

pub use ops::Ops;
pub use record::Record;
