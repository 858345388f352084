//! Contract bindings for the token client.
//!
//! The ERC20 interface is generated with alloy's `sol!` macro. Next to it sits
//! a static descriptor table listing every function with its mutability, so
//! callers can inspect the interface without going through the generated types.

pub mod token;
