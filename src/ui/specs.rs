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

use crossterm::{queue, style::Color, style::Print};

use crate::catalog::Offer;
use crate::rental::Quote;
use crate::ui::constants::DIALOG_WIDTH;
use crate::ui::text::{fit_to_width, format_price, format_thousands, print_colored_text};

/// Label/value pairs of the hardware section, in display order.
pub fn spec_rows(offer: &Offer) -> Vec<(&'static str, String)> {
    let specs = &offer.specs;
    let mut rows = vec![
        ("Architecture", specs.architecture.clone()),
        ("CUDA Cores", format_thousands(specs.cuda_cores)),
        ("Tensor Cores", format_thousands(specs.tensor_cores)),
    ];
    if let Some(rt_cores) = specs.rt_cores {
        rows.push(("RT Cores", format_thousands(rt_cores)));
    }
    rows.extend([
        ("Base / Boost", format!("{} / {}", specs.base_clock, specs.boost_clock)),
        ("Memory Type", specs.memory_type.clone()),
        ("Bandwidth", specs.memory_bandwidth.clone()),
        ("Power (TDP)", specs.power_consumption.clone()),
        ("CUDA Version", specs.cuda_version.clone()),
        ("FP32 / FP16", format!("{} / {}", specs.fp32_performance, specs.fp16_performance)),
        ("CPU", offer.cpu.clone()),
        ("Storage", offer.storage.clone()),
    ]);
    rows
}

fn frame_line<W: Write>(out: &mut W, left: char, right: char) -> io::Result<()> {
    let line = format!("{left}{}{right}\r\n", "─".repeat(DIALOG_WIDTH + 2));
    print_colored_text(out, &line, Color::DarkGrey, None, None)
}

fn boxed<W: Write>(out: &mut W, text: &str, color: Color) -> io::Result<()> {
    print_colored_text(out, "│ ", Color::DarkGrey, None, None)?;
    print_colored_text(out, &fit_to_width(text, DIALOG_WIDTH), color, None, None)?;
    print_colored_text(out, " │", Color::DarkGrey, None, None)?;
    queue!(out, Print("\r\n"))
}

/// Draw the specs dialog of a single offer.
pub fn render_specs_dialog<W: Write>(out: &mut W, offer: &Offer) -> io::Result<()> {
    frame_line(out, '┌', '┐')?;
    boxed(out, &format!("{}x {}", offer.count, offer.model), Color::White)?;
    boxed(
        out,
        &format!("{} • {}% Reliability", offer.location, offer.reliability),
        Color::Grey,
    )?;
    boxed(out, &format!("Status: {}", offer.status), status_color(offer))?;
    frame_line(out, '├', '┤')?;

    let headline = [
        ("VRAM", format!("{} GB", offer.vram)),
        ("Compute", format!("{:.1} TFLOPS", offer.tflops)),
        ("Price", format!("{}/hr", format_price(offer.price))),
        ("Max Duration", offer.max_duration.clone()),
    ];
    for (label, value) in headline {
        boxed(out, &format!("{label:<14}{value}"), Color::White)?;
    }
    frame_line(out, '├', '┤')?;

    for (label, value) in spec_rows(offer) {
        boxed(out, &format!("{label:<14}{value}"), Color::Grey)?;
    }
    frame_line(out, '├', '┤')?;
    boxed(out, &format!("ID: {}", offer.id), Color::DarkGrey)?;
    frame_line(out, '└', '┘')
}

fn status_color(offer: &Offer) -> Color {
    if offer.is_rentable() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Draw the cost summary for a rental quote.
pub fn render_quote<W: Write>(out: &mut W, quote: &Quote) -> io::Result<()> {
    print_colored_text(
        out,
        &format!("{}x {} ({})", quote.quantity, quote.gpu_model, quote.gpu_id),
        Color::White,
        None,
        None,
    )?;
    queue!(out, Print("\r\n"))?;
    print_colored_text(
        out,
        &format!(
            "{} at {}/hr → ${:.2}",
            quote.duration,
            format_price(quote.unit_price),
            quote.total_cost
        ),
        Color::Green,
        None,
        None,
    )?;
    queue!(out, Print("\r\n"))
}
