pub mod archive;
pub mod catalog;
pub mod config;
pub mod interact;
pub mod matcher;
pub mod reconcile;
pub mod report;
pub mod vmod;
