// Test modules for errorkit crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

pub mod classify;
