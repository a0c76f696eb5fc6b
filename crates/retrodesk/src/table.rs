use retrodesk_core::{Applet, Window};

/// Print a formatted table of windows, topmost first.
pub fn print_windows_table(windows: &[&Window], active_window_id: Option<&str>) {
    let mut rows: Vec<&Window> = windows.to_vec();
    rows.sort_by(|a, b| b.z_index.cmp(&a.z_index));

    let id_width = rows
        .iter()
        .map(|w| w.id.chars().count())
        .max()
        .unwrap_or(2)
        .clamp(2, 28);
    let title_width = rows
        .iter()
        .map(|w| w.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 32);
    let size_width = 11; // "1920x1080" format
    let pos_width = 15; // "x:-1234 y:1234" format
    let z_width = 6;
    let status_width = 17; // "maximized, active"

    let widths = [
        id_width,
        title_width,
        size_width,
        pos_width,
        z_width,
        status_width,
    ];

    print_border('┌', '┬', '┐', &widths);
    println!(
        "│ {:<id_width$} │ {:<title_width$} │ {:<size_width$} │ {:<pos_width$} │ {:<z_width$} │ {:<status_width$} │",
        "ID",
        "Title",
        "Size",
        "Position",
        "Z",
        "Status",
    );
    print_border('├', '┼', '┤', &widths);

    for window in rows {
        let size = format!("{}x{}", window.width, window.height);
        let pos = format!("x:{} y:{}", window.x, window.y);
        let status = if active_window_id == Some(window.id.as_str()) {
            format!("{}, active", window.status())
        } else {
            window.status().to_string()
        };

        println!(
            "│ {:<id_width$} │ {:<title_width$} │ {:<size_width$} │ {:<pos_width$} │ {:<z_width$} │ {:<status_width$} │",
            truncate(&window.id, id_width),
            truncate(&window.title, title_width),
            truncate(&size, size_width),
            truncate(&pos, pos_width),
            window.z_index,
            truncate(&status, status_width),
        );
    }

    print_border('└', '┴', '┘', &widths);
}

/// Print the built-in applets and their default geometry.
pub fn print_applets_table(applets: &[Applet]) {
    let id_width = applets
        .iter()
        .map(|a| a.id().chars().count())
        .max()
        .unwrap_or(2)
        .max(2);
    let title_width = applets
        .iter()
        .map(|a| a.title().chars().count())
        .max()
        .unwrap_or(5)
        .max(5);
    let size_width = 11;

    let widths = [id_width, title_width, size_width];

    print_border('┌', '┬', '┐', &widths);
    println!(
        "│ {:<id_width$} │ {:<title_width$} │ {:<size_width$} │",
        "ID", "Title", "Size",
    );
    print_border('├', '┼', '┤', &widths);

    for applet in applets {
        let spec = applet.spec();
        println!(
            "│ {:<id_width$} │ {:<title_width$} │ {:<size_width$} │",
            applet.id(),
            applet.title(),
            format!("{}x{}", spec.width, spec.height),
        );
    }

    print_border('└', '┴', '┘', &widths);
}

fn print_border(left: char, middle: char, right: char, widths: &[usize]) {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    println!("{}{}{}", left, segments.join(&middle.to_string()), right);
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
