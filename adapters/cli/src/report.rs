use std::io::Write;

use anyhow::{Context, Result};
use typer_core::Money;

use crate::autopilot::Summary;

/// Writes the summary as pretty-printed JSON.
pub(crate) fn write_json(out: &mut impl Write, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary).context("failed to encode summary")?;
    writeln!(out).context("failed to write summary")
}

/// Writes the summary as a human-readable report.
pub(crate) fn write_text(out: &mut impl Write, summary: &Summary) -> Result<()> {
    let stats = &summary.stats;
    writeln!(
        out,
        "simulated {} frames ({} ms) over {} round(s)",
        summary.frames, summary.elapsed_ms, summary.rounds
    )?;
    writeln!(
        out,
        "currency {}  earned {}  spent {}",
        stats.currency(),
        stats.earned(),
        stats.spent()
    )?;
    writeln!(
        out,
        "words: {} by you, {} by goroutines  garbage {}  cpu upgrades {}  mistypes {}",
        stats.human_words(),
        stats.item_words(),
        stats.garbage(),
        stats.cpu_upgrades(),
        summary.mistypes
    )?;

    writeln!(out, "purchases:")?;
    for purchase in &summary.purchases {
        writeln!(
            out,
            "  frame {:>6}  {:?} for {}",
            purchase.frame,
            purchase.kind,
            Money::new(purchase.price)
        )?;
    }

    writeln!(out, "items:")?;
    for item in &summary.items {
        let id = item.id.map_or_else(|| "-".to_owned(), |id| id.to_string());
        let status = item
            .claimed_word
            .map_or_else(|| "idle".to_owned(), |word| format!("typing word {word}"));
        writeln!(out, "  #{id} {} ({status})", item.name)?;
    }

    writeln!(out, "words:")?;
    for word in &summary.words {
        let marker = if word.active { ">" } else { " " };
        let owner = word
            .claimed_by
            .map_or_else(String::new, |item| format!("  [#{item}]"));
        writeln!(out, " {marker} {:<12} {:>3}%{owner}", word.text, word.percent)?;
    }
    Ok(())
}
