//! Interactive input for the `resolve` command.
//!
//! The user enters aggregator URLs one per line, finishing with an empty
//! line, and may then enter a search term for the link collector.

use std::io::{self, BufRead, Write};

/// What the user typed at the prompts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PromptInput {
    pub urls: Vec<String>,
    pub search_term: Option<String>,
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read URLs until an empty line or end of input.
pub fn read_urls<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Vec<String>> {
    writeln!(out, "Enter Google News URLs (empty line to finish):")?;
    let mut urls = Vec::new();
    loop {
        write!(out, "URL: ")?;
        out.flush()?;
        match read_trimmed_line(input)? {
            Some(line) if !line.is_empty() => urls.push(line),
            _ => break,
        }
    }
    Ok(urls)
}

/// Ask for an optional search term; an empty answer skips the search.
pub fn read_search_term<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    write!(out, "\nSearch term (empty line to skip): ")?;
    out.flush()?;
    Ok(read_trimmed_line(input)?.filter(|term| !term.is_empty()))
}

/// Run both prompts in order.
pub fn interactive<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<PromptInput> {
    let urls = read_urls(input, out)?;
    let search_term = read_search_term(input, out)?;
    Ok(PromptInput { urls, search_term })
}
