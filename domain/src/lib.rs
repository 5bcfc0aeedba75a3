//! Business operations for the meeting bridge.
//!
//! This crate sits between the HTTP surface (`web`) and the outside world:
//! it owns the provisioning orchestration, caller identity resolution, SDK
//! token issuance, and the gateway clients for the meeting provider and the
//! backing store. The `web` layer depends only on this crate and never talks
//! to a gateway directly.

pub mod error;
pub mod jwt;
pub mod meeting;
pub mod user;

pub mod gateway;
