//! Game rules for Cachex
//!
//! This module implements the rule set including:
//! - Diamond captures
//! - The swap (steal) opening rule
//! - Edge-to-edge connection wins

pub mod capture;
pub mod swap;
pub mod win;

// Re-exports for convenient access
pub use capture::{execute_captures, find_captures, CaptureSet};
pub use swap::SwapRule;
pub use win::{check_winner, has_connection};
