//! Service layer.
//!
//! Each service is a zero-sized struct providing synchronous operations that
//! accept the caller's transactional context (`&S` or `&mut S` where
//! `S: WorldStateStore`) as the first argument. Services hold no state between
//! calls and never cache world state.

pub mod asset_service;

pub use asset_service::AssetService;
