/*!
 # Custom animation streams

 The device takes custom animations as one line of space separated
 integers:

 ```text
 <panelCount> { <panelId> <frameCount> { <R> <G> <B> 0 <transitionTime> } }
 ```

 The format is positional with no tagging, so panels and frames are
 written exactly in the order given. The fourth value of every frame is
 a reserved channel that is always `0`.
*/

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Reserved per-frame channel, always emitted as zero
const RESERVED: u8 = 0;

/// One color step of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Tenths of a second to reach this color from the previous one
    pub transition_time: u16,
}

impl Frame {
    pub fn new(red: u8, green: u8, blue: u8, transition_time: u16) -> Self {
        Self {
            red,
            green,
            blue,
            transition_time,
        }
    }
}

/// A physical panel and its frames
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Panel {
    pub id: u16,
    pub frames: Vec<Frame>,
}

/// Ordered per-panel animation for [`crate::EffectsClient::display_animation`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StreamAnimation {
    pub panels: Vec<Panel>,
}

impl StreamAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a panel after the existing ones
    pub fn with_panel(mut self, id: u16, frames: Vec<Frame>) -> Self {
        self.panels.push(Panel { id, frames });
        self
    }

    /// Renders the positional text the device expects
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StreamAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.panels.len())?;

        for panel in &self.panels {
            write!(f, " {} {}", panel.id, panel.frames.len())?;

            for frame in &panel.frames {
                write!(
                    f,
                    " {} {} {} {} {}",
                    frame.red, frame.green, frame.blue, RESERVED, frame.transition_time
                )?;
            }
        }

        Ok(())
    }
}

/// Pulls typed integers off a whitespace tokenizer
struct Tokens<'a> {
    inner: std::str::SplitAsciiWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        self.position += 1;
        let token = self.inner.next().ok_or_else(|| {
            Error::InvalidStream(format!("expected {what} at token {}", self.position))
        })?;

        token.parse().map_err(|_| {
            Error::InvalidStream(format!(
                "invalid {what} '{token}' at token {}",
                self.position
            ))
        })
    }
}

impl FromStr for StreamAnimation {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = Tokens {
            inner: text.split_ascii_whitespace(),
            position: 0,
        };

        let panel_count: usize = tokens.next("panel count")?;
        let mut panels = Vec::with_capacity(panel_count.min(1024));

        for _ in 0..panel_count {
            let id = tokens.next("panel id")?;
            let frame_count: usize = tokens.next("frame count")?;
            let mut frames = Vec::with_capacity(frame_count.min(1024));

            for _ in 0..frame_count {
                let red = tokens.next("red")?;
                let green = tokens.next("green")?;
                let blue = tokens.next("blue")?;
                let reserved: u8 = tokens.next("reserved channel")?;
                if reserved != RESERVED {
                    return Err(Error::InvalidStream(format!(
                        "reserved channel must be 0, got {reserved} at token {}",
                        tokens.position
                    )));
                }
                let transition_time = tokens.next("transition time")?;

                frames.push(Frame {
                    red,
                    green,
                    blue,
                    transition_time,
                });
            }

            panels.push(Panel { id, frames });
        }

        if let Some(extra) = tokens.inner.next() {
            return Err(Error::InvalidStream(format!(
                "unexpected trailing token '{extra}'"
            )));
        }

        Ok(StreamAnimation { panels })
    }
}
