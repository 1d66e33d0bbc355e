//! Deployment trigger: looks up a deployment record by token and applies it
//! to the cluster with `helm upgrade --install`.

pub mod commands;
pub mod defaults;
pub mod flows;
pub mod infra;
pub mod logging;
pub mod logic;
pub mod models;
