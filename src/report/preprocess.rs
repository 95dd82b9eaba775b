use super::{Block, Error, Layout, Line, ReportKind};

/// Strips every header and footer block from a report and returns the
/// remaining non-blank lines.
///
/// A block runs from a line matching its start anchor through the next line
/// matching its end anchor, both inclusive; the two may be the same line.
/// Blocks are removed wherever they occur, since multi-page exports repeat
/// them on every page. Trailing carriage returns are dropped; all other
/// whitespace is preserved.
///
/// # Errors
///
/// Returns [`Error::MalformedReport`] if the layout declares a header or
/// footer that never appears, or if a block starts but never ends. The line
/// number of these errors is an index into the raw text.
pub fn preprocess<'a>(text: &'a str, kind: ReportKind) -> Result<Vec<Line<'a>>, Error> {
    let layout = kind.layout();
    let mut cleaned = Vec::new();
    let mut open: Option<(&str, &Block, usize)> = None;
    let mut seen_header = false;
    let mut seen_footer = false;
    let mut raw_lines = 0;

    for (raw_index, raw) in text.split('\n').enumerate() {
        raw_lines = raw_index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some((_, block, _)) = open {
            if block.ends(line) {
                open = None;
            }
            continue;
        }

        if let Some((name, block)) = opening_block(layout, line) {
            if name == "header" {
                seen_header = true;
            } else {
                seen_footer = true;
            }
            if !block.ends(line) {
                open = Some((name, block, raw_index));
            }
            continue;
        }

        if !line.trim().is_empty() {
            cleaned.push(Line::new(cleaned.len(), line));
        }
    }

    if let Some((name, _, start)) = open {
        return Err(Error::malformed(
            kind,
            start,
            format!("{name} starting here never ends"),
        ));
    }
    if layout.header.is_some() && !seen_header {
        return Err(Error::malformed(kind, raw_lines, "page header not found"));
    }
    if layout.footer.is_some() && !seen_footer {
        return Err(Error::malformed(kind, raw_lines, "page footer not found"));
    }

    tracing::debug!(
        "{kind}: {} of {raw_lines} raw lines kept after preprocessing",
        cleaned.len()
    );
    Ok(cleaned)
}

fn opening_block<'l>(layout: &'l Layout, line: &str) -> Option<(&'static str, &'l Block)> {
    let header = layout.header.as_ref().map(|block| ("header", block));
    let footer = layout.footer.as_ref().map(|block| ("footer", block));
    header
        .into_iter()
        .chain(footer)
        .find(|(_, block)| block.starts(line))
}
