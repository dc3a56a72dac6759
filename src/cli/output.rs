use anyhow::Result;
use serde_json::json;

use veduta::{ALL_FACET, ImageRecord, Store};

/// Print a plain-text listing of the active subset and the facet counts.
pub(crate) fn print_plain(store: &Store) {
    let state = store.state();
    println!("{} images found", state.active.len());

    for record in store.active_records() {
        println!("{}", format_row(record));
    }

    let facets: Vec<String> = state
        .facets
        .iter()
        .map(|(tag, count)| format!("{tag} {count}"))
        .collect();
    if !facets.is_empty() {
        println!("{}", facets.join(" | "));
    }

    if let Some(record) = store.selected_record() {
        match state.last_selected_pos {
            Some(position) => println!("selected {} at position {position}", record.ssid),
            None => println!("selected {} (not in the active subset)", record.ssid),
        }
    }
}

/// Format the result listing as a JSON string.
pub(crate) fn format_results_json(store: &Store) -> Result<String> {
    let state = store.state();
    let images: Vec<&ImageRecord> = store.active_records().collect();

    let payload = json!({
        "found": state.active.len(),
        "images": images,
        "facets": state.facets,
        "selected": store.selected_record().map(|record| record.ssid.clone()),
        "position": state.last_selected_pos,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the result listing.
pub(crate) fn print_json(store: &Store) -> Result<()> {
    println!("{}", format_results_json(store)?);
    Ok(())
}

fn format_row(record: &ImageRecord) -> String {
    let mut row = record.ssid.clone();

    match (record.firstyear, record.lastyear) {
        (Some(first), Some(last)) if first == last => row.push_str(&format!("  {first}")),
        (Some(first), Some(last)) => row.push_str(&format!("  {first}-{last}")),
        _ => {}
    }
    if let Some(title) = &record.title {
        row.push_str(&format!("  {title}"));
    }
    if let Some(creator) = &record.creator {
        row.push_str(&format!(" ({creator})"));
    }
    row
}
