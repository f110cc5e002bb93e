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

use std::io::stdout;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::error::{Error, Result};

/// Alternate-screen raw-mode session, restored on drop.
pub struct TerminalManager {
    initialized: bool,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        let mut manager = Self { initialized: false };
        manager.initialize()?;
        Ok(manager)
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("terminal not available: {e}"),
            ))
        })?;

        let mut stdout = stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            crossterm::terminal::Clear(ClearType::All)
        ) {
            let _ = disable_raw_mode();
            return Err(Error::Io(e));
        }

        self.initialized = true;
        Ok(())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if self.initialized {
            let mut stdout = stdout();
            let _ = execute!(stdout, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
