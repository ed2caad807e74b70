//! Outer surfaces that feed commands into a [`crate::NavContext`].

pub mod keys;
pub mod socket;
