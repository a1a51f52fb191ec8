pub mod allowlist;
pub mod operation;
pub mod reconcile;
pub mod session;
