//! Tea review catalogue with two ways in: the Discover preference ranking
//! and the Teasonality personality quiz.
//!
//! Data flows one way: [`loader`] builds a ranked [`loader::Catalogue`],
//! which [`catalogue`], [`discover`] and [`teasonality`] consume as plain
//! slices. Nothing here holds shared mutable state.

pub mod catalogue;
pub mod config;
pub mod discover;
pub mod error;
pub mod loader;
pub mod report;
pub mod teasonality;
pub mod types;
