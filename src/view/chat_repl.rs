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

use std::io::{stdout, Write};
use std::path::Path;

use crossterm::style::Color;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::conversation::{compose_user_text, Attachment, ChatSession, Role};
use crate::chat::GenerativeClient;
use crate::common::config::ChatSettings;
use crate::error::Result;
use crate::ui::text::print_colored_text;

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Quit,
    NewChat,
    ListChats,
    Switch(&'a str),
    Attach(&'a str),
    Message(&'a str),
    Help,
}

pub fn parse_command(line: &str) -> ReplCommand<'_> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ReplCommand::Message(trimmed);
    };
    let (command, argument) = rest
        .split_once(char::is_whitespace)
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((rest, ""));
    match command {
        "quit" | "exit" => ReplCommand::Quit,
        "new" => ReplCommand::NewChat,
        "chats" => ReplCommand::ListChats,
        "switch" => ReplCommand::Switch(argument),
        "attach" => ReplCommand::Attach(argument),
        _ => ReplCommand::Help,
    }
}

const HELP: &str = "/new  /chats  /switch <id>  /attach <path>  /quit";

fn say<W: Write>(out: &mut W, text: &str, color: Color) -> Result<()> {
    print_colored_text(out, text, color, None, None)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Interactive chat against the hosted model.
pub async fn run_chat_mode() -> Result<()> {
    let client = GenerativeClient::new(ChatSettings::from_env());
    let mut session = ChatSession::new();
    let mut pending: Option<Attachment> = None;
    let mut out = stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let welcome = session.current();
    say(&mut out, &welcome.title, Color::Cyan)?;
    for message in &welcome.messages {
        say(&mut out, &message.content, Color::Green)?;
    }
    say(&mut out, HELP, Color::DarkGrey)?;

    loop {
        print_colored_text(&mut out, "> ", Color::Yellow, None, None)?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => say(&mut out, HELP, Color::DarkGrey)?,
            ReplCommand::NewChat => {
                let chat = session.new_chat();
                let notice = format!("Started {} ({})", chat.title, chat.id);
                say(&mut out, &notice, Color::Cyan)?;
            }
            ReplCommand::ListChats => {
                let current = session.current().id.clone();
                for chat in session.chats() {
                    let marker = if chat.id == current { '*' } else { ' ' };
                    let line = format!(
                        "{marker} {:>3}  {}  ({} messages)",
                        chat.id,
                        chat.title,
                        chat.messages.len()
                    );
                    say(&mut out, &line, Color::Grey)?;
                }
            }
            ReplCommand::Switch(id) => match session.select(id) {
                Ok(()) => {
                    let notice = format!("Switched to {}", session.current().title);
                    say(&mut out, &notice, Color::Cyan)?;
                }
                Err(e) => say(&mut out, &e.to_string(), Color::Red)?,
            },
            ReplCommand::Attach(path) => match Attachment::from_path(Path::new(path)) {
                Ok(file) => {
                    let notice = format!("Attached {} ({})", file.name, file.mime_type);
                    say(&mut out, &notice, Color::Cyan)?;
                    pending = Some(file);
                }
                Err(e) => say(&mut out, &format!("Cannot attach {path}: {e}"), Color::Red)?,
            },
            ReplCommand::Message(text) => {
                if text.is_empty() && pending.is_none() {
                    continue;
                }
                let file = pending.take();
                session.push(Role::User, compose_user_text(text, file.as_ref()));
                let history = session.current().messages.clone();
                let reply = client.reply(&history, file.as_ref()).await;
                say(&mut out, &reply, Color::Green)?;
                session.push(Role::Assistant, reply);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("/quit"), ReplCommand::Quit);
        assert_eq!(parse_command("  /new "), ReplCommand::NewChat);
        assert_eq!(parse_command("/chats"), ReplCommand::ListChats);
        assert_eq!(parse_command("/switch 3"), ReplCommand::Switch("3"));
        assert_eq!(
            parse_command("/attach  ./report.pdf"),
            ReplCommand::Attach("./report.pdf")
        );
        assert_eq!(parse_command("/what"), ReplCommand::Help);
        assert_eq!(parse_command(" hello "), ReplCommand::Message("hello"));
    }
}
