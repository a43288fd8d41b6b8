use collage_layout::layout::{LayoutCandidate, PageSpec};
use collage_layout::{CollageError, LayoutSelector, Result};
use std::io::{BufRead, Write};

/// Lets the user pick a layout on the terminal
pub struct InteractivePrompt {
    page: PageSpec,
}

impl InteractivePrompt {
    pub fn new(page: PageSpec) -> Self {
        Self { page }
    }
}

impl LayoutSelector for InteractivePrompt {
    fn select(&self, candidates: &[LayoutCandidate]) -> Result<usize> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stderr();
        choose(candidates, &self.page, &mut input, &mut output)
    }
}

/// List the candidates and read a 1-based choice.
///
/// An empty line takes the first (best-scored) layout; anything else that
/// is not a listed number asks again.
fn choose(
    candidates: &[LayoutCandidate],
    page: &PageSpec,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<usize> {
    if candidates.is_empty() {
        return Err(CollageError::NoFeasibleLayout);
    }

    writeln!(output, "\nLayouts that fit these images:")?;
    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} (space efficiency {:.1}%)",
            i + 1,
            candidate.kind,
            candidate.efficiency(page) * 100.0
        )?;
    }

    loop {
        write!(output, "Choose a layout [1-{}, default 1]: ", candidates.len())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(CollageError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no layout chosen",
            )));
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(0);
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => return Ok(n - 1),
            _ => writeln!(output, "Please enter a number from 1 to {}", candidates.len())?,
        }
    }
}
