//! Scripted slider sessions: replay a list of events against a services
//! slider without a browser.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! next            # next button
//! prev            # previous button
//! goto 3          # dot 3
//! left / right    # arrow keys
//! drag -60        # press, move by -60px, release
//! resize 1024     # resize to 1024px wide and let the debounce settle
//! tick            # fire the live auto-play timer
//! hover / leave   # pointer enters / leaves the slider
//! ```

use crate::error::FolioError;
use crate::services::{ArrowKey, ServicesEvent, ServicesSlider, Viewport};

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Next,
    Prev,
    GoTo(usize),
    Key(ArrowKey),
    Drag(f64),
    Resize(f64),
    Tick,
    Hover,
    Leave,
}

/// Slider state after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub line: usize,
    pub step: Step,
    pub index: usize,
    pub max_index: usize,
    pub cards_per_view: usize,
    pub autoplay_running: bool,
}

/// Parse a script. Blank lines and comments are skipped.
pub fn parse(script: &str) -> Result<Vec<(usize, Step)>, FolioError> {
    let mut steps = Vec::new();
    for (i, raw) in script.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let mut words = content.split_whitespace();
        let command = words.next().unwrap_or_default();
        let arg = words.next();
        if words.next().is_some() {
            return Err(script_error(line, "too many arguments"));
        }

        let step = match (command, arg) {
            ("next", None) => Step::Next,
            ("prev", None) => Step::Prev,
            ("left", None) => Step::Key(ArrowKey::Left),
            ("right", None) => Step::Key(ArrowKey::Right),
            ("tick", None) => Step::Tick,
            ("hover", None) => Step::Hover,
            ("leave", None) => Step::Leave,
            ("goto", Some(n)) => Step::GoTo(
                n.parse()
                    .map_err(|_| script_error(line, &format!("bad index '{n}'")))?,
            ),
            ("drag", Some(dx)) => Step::Drag(
                dx.parse()
                    .map_err(|_| script_error(line, &format!("bad distance '{dx}'")))?,
            ),
            ("resize", Some(w)) => Step::Resize(
                w.parse()
                    .map_err(|_| script_error(line, &format!("bad width '{w}'")))?,
            ),
            (cmd, _) => return Err(script_error(line, &format!("unrecognized step '{cmd}'"))),
        };
        steps.push((line, step));
    }
    Ok(steps)
}

fn script_error(line: usize, reason: &str) -> FolioError {
    FolioError::Script {
        line,
        reason: reason.to_string(),
    }
}

/// Run parsed steps, acting as a host whose timers fire on demand.
pub fn replay(slider: &mut ServicesSlider, steps: &[(usize, Step)]) -> Vec<StepReport> {
    steps
        .iter()
        .map(|&(line, step)| {
            apply(slider, step);
            StepReport {
                line,
                step,
                index: slider.current_index(),
                max_index: slider.max_index(),
                cards_per_view: slider.cards_per_view(),
                autoplay_running: slider.autoplay_token().is_some(),
            }
        })
        .collect()
}

fn apply(slider: &mut ServicesSlider, step: Step) {
    match step {
        Step::Next => {
            slider.handle(ServicesEvent::Next);
        }
        Step::Prev => {
            slider.handle(ServicesEvent::Prev);
        }
        Step::GoTo(index) => {
            slider.handle(ServicesEvent::Dot(index));
        }
        Step::Key(key) => {
            slider.handle(ServicesEvent::Key(key));
        }
        Step::Drag(dx) => {
            slider.handle(ServicesEvent::PointerDown(0.0));
            slider.handle(ServicesEvent::PointerMove(dx));
            slider.handle(ServicesEvent::PointerUp);
        }
        Step::Resize(width) => {
            let current = slider.viewport();
            let viewport = Viewport::new(width, current.card_width, current.gap);
            slider.handle(ServicesEvent::Resize(viewport));
            if let Some(token) = slider.resize_token() {
                slider.handle(ServicesEvent::Tick(token));
            }
        }
        Step::Tick => {
            if let Some(token) = slider.autoplay_token() {
                slider.handle(ServicesEvent::Tick(token));
            }
        }
        Step::Hover => {
            slider.handle(ServicesEvent::PointerEnter);
        }
        Step::Leave => {
            slider.handle(ServicesEvent::PointerLeave);
        }
    }
}
