//! Registry module for Quay API interactions
//!
//! This module provides the client, its transport abstraction and the typed
//! payloads for repository and robot account management.

pub mod client;
pub mod models;
pub mod transport;

pub use client::{QuayClient, QuayClientBuilder};
pub use models::{ErrorPayload, Repository, RobotAccount};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
