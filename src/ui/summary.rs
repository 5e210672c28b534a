use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::preview::ServerPhase;

pub fn print_serve_summary(site_title: &str, url: &str, phase: ServerPhase) {
    let use_color = std::io::stdout().is_terminal();

    println!();
    if use_color {
        println!("  {} {}", "blogrig".bold(), site_title.cyan());
    } else {
        println!("  blogrig {}", site_title);
    }
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Site").set_alignment(CellAlignment::Left),
        Cell::new("URL").set_alignment(CellAlignment::Left),
        Cell::new("Status").set_alignment(CellAlignment::Center),
    ]);

    let status_text = if use_color {
        match phase {
            ServerPhase::Running => format!("{} {}", "\u{25cf}".green(), "running".green()),
            ServerPhase::Starting => format!("{} {}", "\u{25cf}".yellow(), "starting".yellow()),
            ServerPhase::Stopping => format!("{} {}", "\u{25cf}".yellow(), "stopping".yellow()),
            ServerPhase::Stopped => format!("{} {}", "\u{25cf}".red(), "stopped".red()),
        }
    } else {
        let label = match phase {
            ServerPhase::Running => "running",
            ServerPhase::Starting => "starting",
            ServerPhase::Stopping => "stopping",
            ServerPhase::Stopped => "stopped",
        };
        format!("\u{25cf} {}", label)
    };

    table.add_row(vec![
        Cell::new(site_title),
        Cell::new(url),
        Cell::new(&status_text),
    ]);

    // Indent the table by 2 spaces
    for line in table.to_string().lines() {
        println!("  {}", line);
    }

    println!();
    if use_color {
        println!(
            "  Edit [preview].port in blogrig.toml to move the server, {} to stop",
            "Ctrl+C".bold()
        );
    } else {
        println!("  Edit [preview].port in blogrig.toml to move the server, Ctrl+C to stop");
    }
    println!();
}
