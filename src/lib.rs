//! Quay Client Library
//!
//! This file serves as the library root for the quay-client crate,
//! organizing and exposing the modules used by the library and the CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;

pub use config::ClientConfig;
pub use error::{QuayError, Result};
pub use logging::Logger;
pub use registry::{
    HttpRequest, HttpResponse, QuayClient, QuayClientBuilder, Repository, ReqwestTransport,
    RobotAccount, Transport,
};
