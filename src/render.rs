//! Terminal rendering
//!
//! Paints the model's views to any `Write`: a status line while loading or
//! after a failure, the colored code block, and one row per inspection entry.

use std::io::{self, Write};

use crossterm::style::{Color as TermColor, Stylize};
use serde::Serialize;

use crate::model::{AppModel, HighlightState};
use crate::projection::{DisplayToken, Projection};
use crate::theme::{Color, Theme};

const TITLE: &str = "Token Scopes";
const LOADING: &str = "Loading highlighter...";
const CODE_SECTION: &str = "Highlighted Code:";
const INSPECTION_SECTION: &str = "Token Analysis:";
const INSPECTION_HINT: &str = "Declaration keywords (const, let, var) should carry a keyword scope rather than a variable one";

/// Terminal renderer bound to a theme
pub struct Renderer<'a> {
    theme: &'a Theme,
    /// Emit ANSI colors
    color: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme, color: bool) -> Self {
        Self { theme, color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(to_term(color)).to_string()
        } else {
            text.to_string()
        }
    }

    /// Paint on the code block background
    fn paint_code(&self, text: &str, hex: &str) -> String {
        if self.color {
            text.with(to_term(self.token_color(hex)))
                .on(to_term(self.theme.editor.code_background))
                .to_string()
        } else {
            text.to_string()
        }
    }

    /// A token's hex color, falling back to the theme foreground
    fn token_color(&self, hex: &str) -> Color {
        Color::from_hex(hex).unwrap_or(self.theme.editor.foreground)
    }

    fn heading(&self, out: &mut impl Write, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(
                out,
                "{}",
                text.with(to_term(self.theme.text.section_title)).bold()
            )
        } else {
            writeln!(out, "{}", text)
        }
    }

    /// Loading indicator or error line; nothing once results are ready
    pub fn render_status(&self, out: &mut impl Write, model: &AppModel) -> io::Result<()> {
        match &model.state {
            HighlightState::Loading => {
                writeln!(out, "{}", self.paint(LOADING, self.theme.text.muted))
            }
            HighlightState::Failed(message) => writeln!(
                out,
                "{}",
                self.paint(&format!("Error: {}", message), self.theme.text.error)
            ),
            HighlightState::Ready(_) => Ok(()),
        }
    }

    /// Colored code block, one terminal line per source line
    pub fn render_code(&self, out: &mut impl Write, projection: &Projection) -> io::Result<()> {
        for line in projection.lines() {
            for token in line {
                write!(out, "{}", self.paint_code(&token.content, &token.color))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// One row per entry: quoted content, then its scope path
    pub fn render_inspection<'t>(
        &self,
        out: &mut impl Write,
        entries: impl IntoIterator<Item = &'t DisplayToken>,
    ) -> io::Result<()> {
        for entry in entries {
            let quoted = format!("\"{}\"", entry.content);
            let content = if self.color {
                quoted
                    .with(to_term(self.token_color(&entry.color)))
                    .on(to_term(self.theme.editor.code_background))
                    .bold()
                    .to_string()
            } else {
                quoted
            };
            writeln!(
                out,
                "  {}  {}",
                content,
                self.paint(&entry.scopes, self.theme.text.muted)
            )?;
        }
        Ok(())
    }

    /// Full screen: title, status, code block and inspection list
    pub fn render(&self, out: &mut impl Write, model: &AppModel) -> io::Result<()> {
        if self.color {
            writeln!(
                out,
                "{}",
                TITLE
                    .with(to_term(self.theme.text.title))
                    .on(to_term(self.theme.editor.background))
                    .bold()
            )?;
        } else {
            writeln!(out, "{}", TITLE)?;
        }
        self.render_status(out, model)?;
        writeln!(out)?;

        self.heading(out, CODE_SECTION)?;
        if let Some(projection) = model.projection() {
            self.render_code(out, projection)?;
        }
        writeln!(out)?;

        self.heading(out, INSPECTION_SECTION)?;
        writeln!(out, "{}", self.paint(INSPECTION_HINT, self.theme.text.muted))?;
        self.render_inspection(out, model.inspection())?;
        out.flush()
    }
}

fn to_term(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    content: &'a str,
    color: &'a str,
    scopes: &'a str,
}

/// Inspection list as pretty-printed JSON
pub fn render_json(out: &mut impl Write, model: &AppModel) -> io::Result<()> {
    let entries: Vec<JsonEntry<'_>> = model
        .inspection()
        .into_iter()
        .map(|t| JsonEntry {
            content: &t.content,
            color: &t.color,
            scopes: &t.scopes,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)
}
