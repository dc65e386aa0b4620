//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from stores and
//! pages so those stay testable off the browser.

pub mod token_storage;
