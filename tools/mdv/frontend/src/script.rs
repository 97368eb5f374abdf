//! Pad scripts for headless runs.
//!
//! A script is whitespace- or comma-separated tokens, one per tap:
//! `L`, `R`, `U`, `D` for the D-pad and `N` for a tap of nothing. A token may
//! carry a repeat count, `D*14`. Each tap holds the buttons for one frame and
//! releases them for the next, so every tap is a separate press.

use std::str::FromStr;

use genesis::{Buttons, PLANE_WIDTH};

/// Largest repeat a single token may carry; a few screen widths is plenty
/// to pin the cursor against any edge.
pub const MAX_REPEAT: u32 = 4 * PLANE_WIDTH as u32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown token {0:?} (expected L, R, U, D or N)")]
    UnknownToken(String),
    #[error("bad repeat count in {0:?}")]
    BadCount(String),
    #[error("repeat count in {0:?} is over {max}", max = MAX_REPEAT)]
    CountTooLarge(String),
}

/// One tap of the pad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tap(pub Buttons);

impl Tap {
    pub const FRAMES: u64 = 2;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    taps: Vec<Tap>,
}

impl Script {
    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    /// Frames needed to play every tap.
    pub fn frames(&self) -> u64 {
        self.taps.len() as u64 * Tap::FRAMES
    }

    /// The pad state for each frame, press then release per tap.
    pub fn frame_states(&self) -> impl Iterator<Item = Buttons> + '_ {
        self.taps.iter().flat_map(|tap| [tap.0, Buttons::empty()])
    }
}

fn parse_buttons(token: &str) -> Result<Buttons, ScriptError> {
    match token.to_ascii_uppercase().as_str() {
        "L" => Ok(Buttons::LEFT),
        "R" => Ok(Buttons::RIGHT),
        "U" => Ok(Buttons::UP),
        "D" => Ok(Buttons::DOWN),
        "N" => Ok(Buttons::empty()),
        _ => Err(ScriptError::UnknownToken(token.to_string())),
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut taps = Vec::new();

        for token in s.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()) {
            let (name, count) = match token.split_once('*') {
                Some((name, count)) => {
                    let count = count.parse::<u32>().map_err(|_| ScriptError::BadCount(token.to_string()))?;
                    if count > MAX_REPEAT {
                        return Err(ScriptError::CountTooLarge(token.to_string()));
                    }
                    (name, count)
                }
                None => (token, 1),
            };

            let buttons = parse_buttons(name)?;
            taps.extend(std::iter::repeat(Tap(buttons)).take(count as usize));
        }

        Ok(Script { taps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_walkthrough() {
        let script: Script = "R D*14".parse().unwrap();
        assert_eq!(script.taps().len(), 15);
        assert_eq!(script.taps()[0], Tap(Buttons::RIGHT));
        assert!(script.taps()[1..].iter().all(|t| *t == Tap(Buttons::DOWN)));
        assert_eq!(script.frames(), 30);
    }

    #[test]
    fn commas_case_and_blanks() {
        let script: Script = " l, n ,u*0,  ".parse().unwrap();
        assert_eq!(script.taps(), &[Tap(Buttons::LEFT), Tap(Buttons::empty())]);
        assert_eq!(Script::from_str("").unwrap(), Script::default());
    }

    #[test]
    fn each_tap_is_press_then_release() {
        let script: Script = "L R".parse().unwrap();
        let states: Vec<_> = script.frame_states().collect();
        assert_eq!(states, [Buttons::LEFT, Buttons::empty(), Buttons::RIGHT, Buttons::empty()]);
    }

    #[test]
    fn rejects_junk() {
        assert_eq!(Script::from_str("L Q"), Err(ScriptError::UnknownToken("Q".into())));
        assert_eq!(Script::from_str("D*x"), Err(ScriptError::BadCount("D*x".into())));
        assert_eq!(Script::from_str("D*-1"), Err(ScriptError::BadCount("D*-1".into())));
        assert_eq!(Script::from_str("D*4000000000"), Err(ScriptError::CountTooLarge("D*4000000000".into())));
    }

    #[test]
    fn repeat_count_is_capped() {
        let longest: Script = format!("L*{MAX_REPEAT}").parse().unwrap();
        assert_eq!(longest.taps().len(), MAX_REPEAT as usize);
        assert_eq!(longest.frames(), MAX_REPEAT as u64 * 2);

        let over = format!("L*{}", MAX_REPEAT + 1);
        assert_eq!(Script::from_str(&over), Err(ScriptError::CountTooLarge(over.clone())));
    }
}
