//! Shared-link minting, management, and anonymous resolution.

pub mod access;
pub mod link;
pub mod service;

pub use access::AccessService;
pub use link::LinkService;
pub use service::{CreatedShare, EventShareRequest, ShareService};
