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

use std::borrow::Cow;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const WELCOME_TITLE: &str = "Welcome to LocaLLM";
pub const WELCOME_MESSAGE: &str = "Hello! I'm your secure local AI assistant. I'm running entirely on your on-premise infrastructure. How can I help you today?";
pub const NEW_CHAT_TITLE: &str = "New Conversation";
pub const DEFAULT_ATTACHMENT_MIME: &str = "application/pdf";

// Only a trailing marker is recognised, matching how messages are composed.
static ATTACHMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n📎 \[Attached: .+\]$").expect("valid marker pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "model")]
    Assistant,
}

impl Role {
    /// Role name used by the generative-language wire format.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            role,
            content: content.into(),
        }
    }

    /// Message text with the attachment marker removed.
    pub fn text_for_model(&self) -> Cow<'_, str> {
        strip_attachment_marker(&self.content)
    }
}

/// A file sent along with the latest user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ATTACHMENT_MIME.to_string()),
            data,
        }
    }

    /// Decode an attachment whose bytes arrive base64-encoded.
    pub fn from_base64(name: impl Into<String>, mime_type: Option<String>, data: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| Error::Chat(format!("attachment is not valid base64: {e}")))?;
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_from_extension(path), data))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

fn mime_from_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Visible text of a user message, with the attachment marker appended.
pub fn compose_user_text(input: &str, attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(file) => format!("{input}\n📎 [Attached: {}]", file.name),
        None => input.to_string(),
    }
}

pub fn strip_attachment_marker(content: &str) -> Cow<'_, str> {
    ATTACHMENT_MARKER.replace(content, "")
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
}

/// All conversations of one user, newest first, with one selected.
#[derive(Clone, Debug)]
pub struct ChatSession {
    chats: Vec<Chat>,
    current: String,
    next_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            chats: Vec::new(),
            current: String::new(),
            next_id: 1,
        };
        let welcome_id = session.allocate_id();
        let mut greeting = ChatMessage::new(Role::Assistant, WELCOME_MESSAGE);
        greeting.id = session.allocate_id();
        session.chats.push(Chat {
            id: welcome_id.clone(),
            title: WELCOME_TITLE.to_string(),
            created_at: Utc::now(),
            messages: vec![greeting],
        });
        session.current = welcome_id;
        session
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn current(&self) -> &Chat {
        self.chats
            .iter()
            .find(|c| c.id == self.current)
            .unwrap_or(&self.chats[0])
    }

    fn current_mut(&mut self) -> &mut Chat {
        let index = self
            .chats
            .iter()
            .position(|c| c.id == self.current)
            .unwrap_or(0);
        &mut self.chats[index]
    }

    /// Start an empty conversation at the top of the list and select it.
    pub fn new_chat(&mut self) -> &Chat {
        let id = self.allocate_id();
        self.chats.insert(
            0,
            Chat {
                id: id.clone(),
                title: NEW_CHAT_TITLE.to_string(),
                created_at: Utc::now(),
                messages: Vec::new(),
            },
        );
        self.current = id;
        &self.chats[0]
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.chats.iter().any(|c| c.id == id) {
            return Err(Error::Chat(format!("unknown chat {id}")));
        }
        self.current = id.to_string();
        Ok(())
    }

    /// Append to the selected conversation.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> &ChatMessage {
        let mut message = ChatMessage::new(role, content);
        message.id = self.allocate_id();
        let chat = self.current_mut();
        chat.messages.push(message);
        let last = chat.messages.len() - 1;
        &chat.messages[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_session_starts_with_welcome_chat() {
        let session = ChatSession::new();
        assert_eq!(session.chats().len(), 1);
        let chat = session.current();
        assert_eq!(chat.title, WELCOME_TITLE);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, Role::Assistant);
        assert_eq!(chat.messages[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_new_chat_is_prepended_and_selected() {
        let mut session = ChatSession::new();
        let id = session.new_chat().id.clone();
        assert_eq!(session.chats()[0].id, id);
        assert_eq!(session.chats()[0].title, NEW_CHAT_TITLE);
        assert_eq!(session.current().id, id);

        session.push(Role::User, "hello");
        assert_eq!(session.current().messages.len(), 1);
        assert_eq!(session.chats()[1].messages.len(), 1);
    }

    #[test]
    fn test_select_unknown_chat() {
        let mut session = ChatSession::new();
        assert!(session.select("404").is_err());
        let welcome = session.chats()[0].id.clone();
        session.new_chat();
        session.select(&welcome).unwrap();
        assert_eq!(session.current().title, WELCOME_TITLE);
    }

    #[test]
    fn test_attachment_marker_round_trip() {
        let file = Attachment::new("report.pdf", None, vec![1, 2, 3]);
        let text = compose_user_text("Summarise", Some(&file));
        assert_eq!(text, "Summarise\n📎 [Attached: report.pdf]");
        assert_eq!(strip_attachment_marker(&text), "Summarise");
        assert_eq!(file.mime_type, DEFAULT_ATTACHMENT_MIME);
    }

    #[test]
    fn test_marker_only_stripped_at_end() {
        let text = "a\n📎 [Attached: x.pdf] trailing";
        assert_eq!(strip_attachment_marker(text), text);
    }

    #[test]
    fn test_attachment_from_path() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"png-bytes").unwrap();
        let attachment = Attachment::from_path(file.path()).unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.data, b"png-bytes");
        assert_eq!(attachment.to_base64(), "cG5nLWJ5dGVz");
    }

    #[test]
    fn test_attachment_from_base64_rejects_garbage() {
        assert!(Attachment::from_base64("a.pdf", None, "***").is_err());
    }

    #[test]
    fn test_role_accepts_model_alias() {
        let role: Role = serde_json::from_str("\"model\"").unwrap();
        assert_eq!(role, Role::Assistant);
        assert_eq!(Role::User.wire_name(), "user");
    }
}
