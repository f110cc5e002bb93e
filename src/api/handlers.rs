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

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_state::SharedState;
use crate::catalog::constants::FILTER_ALL;
use crate::catalog::{CatalogQuery, Offer, SortColumn, SortDirection};
use crate::chat::conversation::{Attachment, ChatMessage};
use crate::error::Error;
use crate::mail::{contact_notification, rental_notification};
use crate::rental::{ContactRequest, QuoteRequest, RentalRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorBody {
        error: message.into(),
    });
    (status, body).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unavailable(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string())
    }
}

pub async fn health() -> &'static str {
    "OK"
}

// === Catalog ===

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub gpu_type: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
}

impl ListParams {
    pub fn into_query(self) -> Result<CatalogQuery, String> {
        let sort = match self.sort.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<SortColumn>()?),
            None => None,
        };
        let or_all = |value: Option<String>| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| FILTER_ALL.to_string())
        };
        Ok(CatalogQuery {
            search: self.q.unwrap_or_default(),
            location: or_all(self.location),
            gpu_type: or_all(self.gpu_type),
            sort,
            direction: self.dir.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub last_updated: Option<DateTime<Utc>>,
    pub total: usize,
    pub gpus: Vec<Offer>,
}

pub async fn list_gpus(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };
    let catalog = state.catalog.read().await;
    let gpus = catalog.query(&query);
    Json(ListResponse {
        last_updated: catalog.last_updated(),
        total: gpus.len(),
        gpus,
    })
    .into_response()
}

pub async fn get_gpu(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Offer>, Error> {
    let catalog = state.catalog.read().await;
    catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(Error::NotFound(id))
}

pub async fn quote_gpu(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    let catalog = state.catalog.read().await;
    let Some(offer) = catalog.get(&id) else {
        return Error::NotFound(id).into_response();
    };
    match request.quote(offer) {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => e.into_response(),
    }
}

// === Form relays ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RelayStatus {
    pub success: bool,
    pub message: String,
}

pub async fn rent_gpu(
    State(state): State<SharedState>,
    payload: Result<Json<RentalRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::error!("Error processing rental request: {rejection}");
            let body = RelayStatus {
                success: false,
                message: "Failed to process rental request".to_string(),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    tracing::info!(
        gpu_id = %request.gpu_id,
        gpu_model = %request.gpu_model,
        name = %request.user_details.name,
        email = %request.user_details.email,
        duration = %request.rental_options.duration,
        quantity = request.rental_options.quantity,
        bid_price = ?request.rental_options.bid_price,
        total_cost = request.total_cost,
        timestamp = %Utc::now().to_rfc3339(),
        "GPU rental request received"
    );

    // Delivery failures do not fail the request
    match &state.mailer {
        Some(mailer) => {
            let sent = match rental_notification(&request) {
                Ok(mail) => mailer.send(&mail).await,
                Err(e) => Err(e),
            };
            match sent {
                Ok(()) => tracing::info!(transport = mailer.name(), "Rental email sent"),
                Err(e) => {
                    tracing::error!(transport = mailer.name(), "Failed to send rental email: {e}")
                }
            }
        }
        None => tracing::info!("SMTP_PASS not set, skipping rental email"),
    }

    Json(RelayStatus {
        success: true,
        message: "Rental request processed successfully".to_string(),
    })
    .into_response()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn send_email(
    State(state): State<SharedState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Response {
    const FAILURE: &str = "Failed to send email";

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::error!("Error sending email: {rejection}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILURE);
        }
    };

    let Some(mailer) = &state.mailer else {
        tracing::error!("Error sending email: no mail transport configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILURE);
    };

    let sent = match contact_notification(&request) {
        Ok(mail) => mailer.send(&mail).await,
        Err(e) => Err(e),
    };
    match sent {
        Ok(()) => {
            tracing::info!(name = %request.name, "Contact email sent");
            Json(MessageBody {
                message: "Email sent successfully".to_string(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(transport = mailer.name(), "Error sending email: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FAILURE)
        }
    }
}

// === Chat proxy ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload {
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Base64-encoded file contents.
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub attachment: Option<AttachmentPayload>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Forward a conversation to the model. Failures come back as reply text.
pub async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatReply> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Malformed chat request: {rejection}");
            return Json(ChatReply {
                reply: format!("Error: {}", rejection.body_text()),
            });
        }
    };

    let attachment = match request.attachment {
        Some(file) => match Attachment::from_base64(file.name, file.mime_type, &file.data) {
            Ok(attachment) => Some(attachment),
            Err(e) => {
                return Json(ChatReply {
                    reply: format!("Error: {e}"),
                })
            }
        },
        None => None,
    };

    let reply = state
        .chat
        .reply(&request.messages, attachment.as_ref())
        .await;
    Json(ChatReply { reply })
}
