//! # explorer-entity
//!
//! Domain entity models for WorldExplorer. Every struct in this crate
//! represents a stored document or a domain value object. Stored
//! documents additionally derive `sqlx::FromRow`; embedded event lists
//! are persisted as JSONB.

pub mod event;
pub mod itinerary;
pub mod legacy;
pub mod share;
