use cloak_detection::{CloakColor, HsvProfile};
use std::io::{self, BufRead, Write};

pub const INVALID_CHOICE: &str = "Invalid color! Please choose from the given options.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Accepted {
        color: CloakColor,
        profile: HsvProfile,
    },
    Reprompt {
        attempts: u32,
    },
}

#[derive(Debug, Default)]
// Tracks attempts at picking a cloak color, independent of any terminal.
pub struct ColorPrompt {
    attempts: u32,
}

impl ColorPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question() -> String {
        let names: Vec<&str> = CloakColor::ALL.iter().map(|c| c.name()).collect();
        format!("Pick a color for your cloak ({}): ", names.join(", "))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn submit(&mut self, answer: &str) -> PromptOutcome {
        self.attempts += 1;
        match answer.parse::<CloakColor>() {
            Ok(color) => PromptOutcome::Accepted {
                color,
                profile: color.profile(),
            },
            Err(e) => {
                tracing::debug!(attempts = self.attempts, error = %e, "rejected color choice");
                PromptOutcome::Reprompt {
                    attempts: self.attempts,
                }
            }
        }
    }
}

// Asks until a known color is entered; end of input is an error.
pub fn ask_color<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<(CloakColor, HsvProfile)> {
    let mut prompt = ColorPrompt::new();
    let mut line = String::new();
    loop {
        write!(output, "{}", ColorPrompt::question())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a color was chosen",
            ));
        }

        match prompt.submit(&line) {
            PromptOutcome::Accepted { color, profile } => return Ok((color, profile)),
            PromptOutcome::Reprompt { .. } => writeln!(output, "{INVALID_CHOICE}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn question_lists_every_color() {
        assert_eq!(
            ColorPrompt::question(),
            "Pick a color for your cloak (red, blue, green, yellow, purple, orange): "
        );
    }

    #[test]
    fn unknown_then_valid_uses_the_valid_profile() {
        let mut prompt = ColorPrompt::new();
        assert_eq!(prompt.submit("magenta"), PromptOutcome::Reprompt { attempts: 1 });
        assert_eq!(
            prompt.submit("Green"),
            PromptOutcome::Accepted {
                color: CloakColor::Green,
                profile: CloakColor::Green.profile(),
            }
        );
        assert_eq!(prompt.attempts(), 2);
    }

    #[test]
    fn reader_reprompts_until_valid() {
        let mut input = Cursor::new("chartreuse\n\nBLUE\n");
        let mut output = Vec::new();

        let (color, profile) = ask_color(&mut input, &mut output).unwrap();
        assert_eq!(color, CloakColor::Blue);
        assert_eq!(profile, CloakColor::Blue.profile());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Pick a color").count(), 3);
        assert_eq!(text.matches(INVALID_CHOICE).count(), 2);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let err = ask_color(&mut input, &mut output).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
