// Copyright (c) Microsoft. All rights reserved.

/// Line input for the interactive prompts.
///
/// Masked reads have to switch the terminal out of echo mode, so this goes through rustyline rather than a locked
/// `std::io::Stdin`. Tests substitute scripted answers.
pub(crate) trait Reader {
    /// Shows `prompt`, then appends the answer to `line` without its line terminator.
    ///
    /// Returns the number of bytes appended, which is zero for an empty answer.
    /// End of input and Ctrl-C are reported as `std::io::ErrorKind::UnexpectedEof`.
    fn read_line(&mut self, prompt: &str, line: &mut String) -> std::io::Result<usize>;

    /// As `read_line`, but the typed characters are masked.
    fn read_secret(&mut self, prompt: &str, line: &mut String) -> std::io::Result<usize>;
}

pub(crate) struct Stdin {
    editor: rustyline::Editor<StdinHelper>,
}

impl Default for Stdin {
    fn default() -> Self {
        let mut stdin = Stdin {
            editor: rustyline::Editor::new(),
        };

        stdin.editor.set_helper(Some(StdinHelper {
            reading_secret: false,
        }));

        stdin
    }
}

impl Stdin {
    fn readline(&mut self, prompt: &str, reading_secret: bool) -> rustyline::Result<String> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.reading_secret = reading_secret;
        }

        self.editor.readline(prompt)
    }
}

impl Reader for Stdin {
    fn read_line(&mut self, prompt: &str, line: &mut String) -> std::io::Result<usize> {
        loop {
            match self.readline(prompt, false) {
                Ok(response) => {
                    line.push_str(&response);
                    return Ok(response.len());
                }

                Err(rustyline::error::ReadlineError::Io(err)) => return Err(err),

                Err(rustyline::error::ReadlineError::Eof)
                | Err(rustyline::error::ReadlineError::Interrupted) => {
                    return Err(std::io::ErrorKind::UnexpectedEof.into())
                }

                Err(rustyline::error::ReadlineError::Utf8Error) => {
                    eprintln!("Answer is not valid UTF-8, try again");
                }

                Err(err) => return Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
            }
        }
    }

    fn read_secret(&mut self, prompt: &str, line: &mut String) -> std::io::Result<usize> {
        let result = self.readline(prompt, true);

        // Secrets must not show up when scrolling back through history.
        self.editor.clear_history();

        match result {
            Ok(response) => {
                line.push_str(&response);
                Ok(response.len())
            }

            Err(rustyline::error::ReadlineError::Io(err)) => Err(err),

            Err(rustyline::error::ReadlineError::Eof)
            | Err(rustyline::error::ReadlineError::Interrupted) => {
                Err(std::io::ErrorKind::UnexpectedEof.into())
            }

            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err)),
        }
    }
}

/// Replaces each typed character with `*` while a password is being read.
struct StdinHelper {
    reading_secret: bool,
}

impl rustyline::completion::Completer for StdinHelper {
    type Candidate = <() as rustyline::completion::Completer>::Candidate;
}

impl rustyline::hint::Hinter for StdinHelper {
    type Hint = String;
}

impl rustyline::highlight::Highlighter for StdinHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        if self.reading_secret {
            std::borrow::Cow::Owned("*".repeat(line.chars().count()))
        } else {
            std::borrow::Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        self.reading_secret
    }
}

impl rustyline::validate::Validator for StdinHelper {}

impl rustyline::Helper for StdinHelper {}

/// Asks `question` until a non-empty answer is given.
pub(crate) fn prompt(stdin: &mut impl Reader, question: &str) -> anyhow::Result<String> {
    let mut line = String::new();

    loop {
        stdin.read_line(question, &mut line)?;
        if line.is_empty() {
            continue;
        }

        return Ok(line);
    }
}

/// Like `prompt`, with the answer masked.
pub(crate) fn prompt_secret(stdin: &mut impl Reader, question: &str) -> anyhow::Result<String> {
    let mut line = String::new();

    loop {
        stdin.read_secret(question, &mut line)?;
        if line.is_empty() {
            continue;
        }

        return Ok(line);
    }
}
