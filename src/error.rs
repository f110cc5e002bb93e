// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Unified error types for the localllm library.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! always confined to the request or interaction that triggered them; the
//! HTTP layer maps them onto response bodies and the chat layer maps them
//! onto apologetic assistant messages.

use thiserror::Error;

/// The main error type for localllm operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing or malformed.
    ///
    /// Raised when an environment variable cannot be parsed or a required
    /// setting (for example the SMTP sender) is absent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Composing or delivering an email failed.
    #[error("Mail error: {0}")]
    Mail(String),

    /// The external model endpoint could not be used.
    #[error("Chat error: {0}")]
    Chat(String),

    /// No catalog record exists with the given identity.
    #[error("GPU not found: {0}")]
    NotFound(String),

    /// The record exists but cannot be selected for rental.
    #[error("GPU {0} is not available for rent")]
    Unavailable(String),

    /// An I/O error occurred (reading an attachment, binding a socket).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An outbound HTTP request failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A specialized Result type for localllm operations.
pub type Result<T> = std::result::Result<T, Error>;
