//! Client core for the careerdesk document tools: draft state, panel
//! composition, submissions to the generation backend, the output pane and
//! the job tracker.

pub mod api_client;
pub mod browser;
pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod session;
pub mod state;
pub mod submission;
pub mod tracker;
pub mod views;

pub use errors::ClientError;
pub use state::{App, Browser};
