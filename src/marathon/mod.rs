//! Marathon REST API access.

mod client;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use client::{MarathonClient, Unchecked};
#[cfg(test)]
pub use transport::Method;
pub use transport::{Transport, UreqTransport};
