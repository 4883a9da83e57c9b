//! Serialization formats for a [`JsonWebSignature`](crate::JsonWebSignature).
//!
//! Currently, the only format is [`Compact`].

mod compact;

#[doc(inline)]
pub use self::compact::Compact;
