// handlers/public/mod.rs - Public handlers (no identity cookie required)
//
// Login, logout, the branch company directory and health checks. Nothing here touches a
// tenant's business tables except login, which checks a credential on the branch it names.

pub mod account;
pub mod company;
pub mod root;
