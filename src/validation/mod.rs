//! Single-address validation: the four independent checks and the
//! [`Validator`] that combines them.

pub mod address;
pub mod deliverability;
pub mod disposable;
pub mod domain;
pub mod syntax;
pub mod validator;

pub use deliverability::{DeliverabilityCheck, DeliverabilityResult, DnsDeliverabilityChecker};
pub use disposable::{DisposableCheck, DomainListChecker};
pub use validator::{DefaultValidator, Validator};
