//! Editor channel frame contracts
//!
//! These shapes are what the external editor process parses; field renames
//! here are breaking changes.
