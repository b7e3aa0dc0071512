// stepview - Step-Through Debugger Client
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! View renderer
//!
//! Projects the session's source listing and one snapshot into a [`View`]
//! with three panes: source with the current line highlighted, the stack
//! (a synthetic root frame followed by the locals), and the heap.
//!
//! [`render`] is pure and idempotent; frontends decide how to draw the
//! result. The [`Display`](fmt::Display) impl is the canonical text form.

use std::fmt;
use stepview_common::types::Snapshot;

/// Label of the synthetic outermost frame shown at the top of the stack pane
pub const ROOT_FRAME: &str = "main()";

/// Marker placed next to the highlighted line in the text form
pub const HIGHLIGHT_MARKER: char = '>';

/// One line of the source pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-indexed line number
    pub number: usize,
    /// Line text
    pub text: String,
    /// Whether this is the line the debugger is paused on
    pub highlighted: bool,
}

/// One entry of the stack pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRow {
    /// Frame or variable name
    pub name: String,
    /// Variable value; `None` for the root frame
    pub value: Option<String>,
}

impl StackRow {
    /// Text shown for this row
    pub fn label(&self) -> String {
        match &self.value {
            Some(value) => format!("{} → {}", self.name, value),
            None => self.name.clone(),
        }
    }
}

/// One entry of the heap pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapRow {
    /// Cell address
    pub address: String,
    /// Cell contents
    pub value: String,
}

impl HeapRow {
    /// Text shown for this row
    pub fn label(&self) -> String {
        format!("{} : {}", self.address, self.value)
    }
}

/// Everything a frontend needs to draw one pause point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Full source listing, every line
    pub source: Vec<SourceLine>,
    /// Root frame followed by the locals in server order
    pub stack: Vec<StackRow>,
    /// Heap cells in snapshot order
    pub heap: Vec<HeapRow>,
    /// Line the backend reported, in range or not
    pub current_line: Option<u32>,
    /// "function @ file" when the backend reported a location
    pub location: Option<String>,
}

impl View {
    /// The highlighted source line, if the reported line is in range
    pub fn highlighted_line(&self) -> Option<&SourceLine> {
        self.source.iter().find(|line| line.highlighted)
    }

    /// The backend reported a line that does not exist in the listing
    pub fn line_out_of_range(&self) -> bool {
        self.current_line.is_some() && self.highlighted_line().is_none()
    }

    /// Width of the line-number gutter
    pub fn gutter_width(&self) -> usize {
        self.source.len().to_string().len().max(3)
    }
}

/// Whether `line` (1-indexed) addresses a line of a listing of `len` lines
pub fn line_in_range(line: u32, len: usize) -> bool {
    usize::try_from(line).is_ok_and(|line| (1..=len).contains(&line))
}

/// Project the session's source lines and a snapshot into a view
///
/// The source always comes from the session, never from the snapshot. A
/// missing or out-of-range line highlights nothing.
pub fn render(source_lines: &[String], snapshot: &Snapshot) -> View {
    let highlighted = snapshot.line.filter(|line| line_in_range(*line, source_lines.len()));

    let source = source_lines
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let number = idx + 1;
            SourceLine {
                number,
                text: text.clone(),
                highlighted: highlighted.is_some_and(|line| line as usize == number),
            }
        })
        .collect();

    let stack = std::iter::once(StackRow { name: ROOT_FRAME.to_string(), value: None })
        .chain(
            snapshot
                .stack
                .iter()
                .map(|var| StackRow { name: var.name.clone(), value: Some(var.value.clone()) }),
        )
        .collect();

    let heap = snapshot
        .heap
        .iter()
        .map(|entry| HeapRow { address: entry.address.clone(), value: entry.value.clone() })
        .collect();

    let location = match (&snapshot.frame_name, &snapshot.file) {
        (Some(func), Some(file)) => Some(format!("{func} @ {file}")),
        (Some(func), None) => Some(func.clone()),
        (None, Some(file)) => Some(file.clone()),
        (None, None) => None,
    };

    View { source, stack, heap, current_line: snapshot.line, location }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => writeln!(f, "-- Source ({location}) --")?,
            None => writeln!(f, "-- Source --")?,
        }
        let width = self.gutter_width();
        for line in &self.source {
            let marker = if line.highlighted { HIGHLIGHT_MARKER } else { ' ' };
            writeln!(f, "{:>width$} {} {}", line.number, marker, line.text)?;
        }

        writeln!(f, "-- Stack --")?;
        for row in &self.stack {
            writeln!(f, "{}", row.label())?;
        }

        writeln!(f, "-- Heap --")?;
        for row in &self.heap {
            writeln!(f, "{}", row.label())?;
        }
        Ok(())
    }
}
