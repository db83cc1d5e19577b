//! Ports Layer - Trait definitions
//!
//! - `inbound`: the membership API exposed to callers

pub mod inbound;

pub use inbound::MembershipFilter;
