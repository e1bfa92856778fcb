//! Line-based questions for the interactive `build` flow.

use std::io::{self, BufRead, Write};

use crate::BuildArgs;

/// Build options collected interactively.
#[derive(Debug, PartialEq)]
pub struct Answers {
    pub description: String,
    pub website_type: String,
    pub style: String,
    pub name: Option<String>,
    pub skip_review: bool,
}

/// Asks questions on `output` and reads the answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a question, returning the trimmed answer or `default` for an empty line.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(default) => write!(self.output, "{question} [{default}]: ")?,
            None => write!(self.output, "{question}: ")?,
        }
        let answer = self.read_answer(question)?;
        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        })
    }

    /// Ask until a non-empty answer is given.
    pub fn ask_required(&mut self, question: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(question, None)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "An answer is required.")?;
        }
    }

    /// Ask a yes/no question.
    pub fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{question} [{hint}] ")?;
            let answer = self.read_answer(question)?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer to '{question}'"),
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Collect every build option, using the command line values as defaults.
    pub fn build_answers(&mut self, args: &BuildArgs) -> io::Result<Answers> {
        let description = match args.description.as_deref() {
            Some(description) if !description.trim().is_empty() => {
                self.ask("Describe your website", Some(description))?
            }
            _ => self.ask_required("Describe your website")?,
        };
        let website_type = self.ask(
            "Website type (business, portfolio, landing, blog, saas)",
            Some(args.website_type.as_str()),
        )?;
        let style = self.ask(
            "Style (modern, minimal, bold, elegant, playful)",
            Some(args.style.as_str()),
        )?;
        let name = match args.name.as_deref() {
            Some(name) => self.ask("Project name", Some(name))?,
            None => self.ask("Project name (blank to derive from the description)", None)?,
        };
        let review = self.confirm("Run the review stage?", !args.skip_review)?;

        Ok(Answers {
            description,
            website_type,
            style,
            name: Some(name).filter(|n| !n.is_empty()),
            skip_review: !review,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_ask_uses_default_for_empty_line() {
        let mut prompter = prompter("\n  blog \n");
        assert_eq!(prompter.ask("Type", Some("business")).unwrap(), "business");
        assert_eq!(prompter.ask("Type", Some("business")).unwrap(), "blog");

        let shown = String::from_utf8(prompter.output).unwrap();
        assert!(shown.starts_with("Type [business]: "));
    }

    #[test]
    fn test_ask_required_repeats_until_answered() {
        let mut prompter = prompter("\n\nA bakery\n");
        assert_eq!(prompter.ask_required("Describe").unwrap(), "A bakery");
        assert_eq!(
            String::from_utf8(prompter.output).unwrap().matches("An answer is required.").count(),
            2
        );
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let err = prompter("").ask_required("Describe").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_confirm() {
        let mut prompter = prompter("\nmaybe\nN\nyes\n");
        assert!(prompter.confirm("Review?", true).unwrap());
        assert!(!prompter.confirm("Review?", true).unwrap());
        assert!(prompter.confirm("Review?", false).unwrap());
    }

    #[test]
    fn test_build_answers_without_description() {
        let args = crate::BuildArgs::try_parse_from(["build", "-s", "bold"]).unwrap();
        let mut prompter = prompter("A bakery in Lisbon\nportfolio\n\ncorner\nn\n");

        let answers = prompter.build_answers(&args).unwrap();

        assert_eq!(
            answers,
            Answers {
                description: "A bakery in Lisbon".to_string(),
                website_type: "portfolio".to_string(),
                style: "bold".to_string(),
                name: Some("corner".to_string()),
                skip_review: true,
            }
        );
    }

    #[test]
    fn test_build_answers_keep_command_line_values() {
        let args =
            crate::BuildArgs::try_parse_from(["build", "-d", "A bakery", "-n", "bakery"]).unwrap();
        let mut prompter = prompter("\n\n\n\n\n");

        let answers = prompter.build_answers(&args).unwrap();

        assert_eq!(answers.description, "A bakery");
        assert_eq!(answers.website_type, "business");
        assert_eq!(answers.style, "modern");
        assert_eq!(answers.name.as_deref(), Some("bakery"));
        assert!(!answers.skip_review);
    }
}
