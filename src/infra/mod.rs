pub mod db;
pub mod helm;
pub mod k8s;
pub mod process;
