pub mod deploy;

pub use deploy::{run_deployment, DeployOutcome};
