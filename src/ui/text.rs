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

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

// Helper function to calculate display width of a string
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

// Helper function to truncate a string to fit within a given display width
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad or cut `text` to exactly `width` columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    if display_width(text) > width {
        truncate_to_width(text, width)
    } else {
        format!("{text:<width$}")
    }
}

/// Right-align `text` in `width` columns.
pub fn right_align(text: &str, width: usize) -> String {
    if display_width(text) > width {
        truncate_to_width(text, width)
    } else {
        format!("{text:>width$}")
    }
}

/// Hourly price as shown in the marketplace, e.g. `$0.450`.
pub fn format_price(price: f64) -> String {
    format!("${price:.3}")
}

/// First three words of a processor descriptor, e.g. `AMD EPYC 7763...`.
pub fn cpu_summary(cpu: &str) -> String {
    let words: Vec<&str> = cpu.split(' ').take(3).collect();
    format!("{}...", words.join(" "))
}

/// Group thousands with commas, e.g. `16384` -> `16,384`.
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn print_colored_text<W: Write>(
    stdout: &mut W,
    text: &str,
    fg_color: Color,
    bg_color: Option<Color>,
    width: Option<usize>,
) -> io::Result<()> {
    let adjusted_text = match width {
        Some(w) => fit_to_width(text, w),
        None => text.to_string(),
    };

    if let Some(bg) = bg_color {
        queue!(
            stdout,
            SetForegroundColor(fg_color),
            SetBackgroundColor(bg),
            Print(adjusted_text),
            ResetColor
        )
    } else {
        queue!(
            stdout,
            SetForegroundColor(fg_color),
            Print(adjusted_text),
            ResetColor
        )
    }
}
