//! Collaborator layer around `kin-core`: configuration, record ingestion,
//! DOT export, and the command implementations behind the `kinship` binary.

pub mod commands;
pub mod config;
pub mod export;
pub mod ingest;
