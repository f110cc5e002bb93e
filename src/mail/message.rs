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

use askama::Template;

use crate::error::{Error, Result};
use crate::rental::request::{ContactRequest, RentalRequest};

/// A composed notification, independent of the transport that delivers it.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingMail {
    pub subject: String,
    pub text: Option<String>,
    pub html: String,
    /// Address replies should go to, when the sender supplied one.
    pub reply_to: Option<String>,
}

#[derive(Template)]
#[template(path = "rental_notification.html")]
struct RentalTemplate<'a> {
    request: &'a RentalRequest,
    bid: Option<f64>,
}

#[derive(Template)]
#[template(path = "contact_notification.html")]
struct ContactHtmlTemplate<'a> {
    request: &'a ContactRequest,
    lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "contact_notification.txt")]
struct ContactTextTemplate<'a> {
    request: &'a ContactRequest,
}

fn render<T: Template>(template: &T) -> Result<String> {
    template
        .render()
        .map_err(|e| Error::Mail(format!("failed to render notification: {e}")))
}

pub fn rental_notification(request: &RentalRequest) -> Result<OutgoingMail> {
    // Non-positive bids are not bids.
    let bid = request.rental_options.bid_price.filter(|bid| *bid > 0.0);
    let html = render(&RentalTemplate { request, bid })?;

    Ok(OutgoingMail {
        subject: format!("New GPU Rental Request: {}", request.gpu_model),
        text: None,
        html,
        reply_to: Some(request.user_details.email.clone()),
    })
}

pub fn contact_notification(request: &ContactRequest) -> Result<OutgoingMail> {
    let text = render(&ContactTextTemplate { request })?;
    let html = render(&ContactHtmlTemplate {
        request,
        lines: request.message.split('\n').collect(),
    })?;

    Ok(OutgoingMail {
        subject: format!("New Contact from LocaLLM: {}", request.name),
        text: Some(text),
        html,
        reply_to: Some(request.email.clone()),
    })
}
