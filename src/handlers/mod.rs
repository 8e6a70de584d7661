// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (Basic auth, owner checks on mutation)
pub mod protected;
pub mod public;
