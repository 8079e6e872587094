use anyhow::{Result, bail};
use shuls_application::{
    AddressInputHandle, AddressInputService, ControllerState, SelectionController,
    SelectionEvent, SelectionSnapshot,
};
use shuls_core::{Candidate, FormSink, Location, SearchResults, SelectionConfig};
use std::io::Write;
use std::sync::Arc;

use super::{AppContext, describe_candidate};

/// Writes mirrored form values as `name=value` lines.
struct LineFormSink {
    out: Box<dyn Write + Send>,
}

impl LineFormSink {
    /// Stdout for text output; stderr when stdout carries a JSON document.
    fn for_output(json: bool) -> Self {
        let out: Box<dyn Write + Send> = if json {
            Box::new(std::io::stderr())
        } else {
            Box::new(std::io::stdout())
        };
        Self { out }
    }
}

impl FormSink for LineFormSink {
    fn set_value(&mut self, name: &str, value: &str) {
        let _ = writeln!(self.out, "{}={}", name, value);
    }

    fn dispatch_change(&mut self, name: &str) {
        tracing::debug!("change dispatched for {}", name);
    }
}

/// Seeds a blank controller and rejects queries too short to be searched.
fn prepare_controller(query: &str, selection: SelectionConfig) -> Result<SelectionController> {
    let min_length = selection.min_query_length;
    let mut controller =
        SelectionController::new(Location::blank(selection.blank_zoom), false, selection);
    controller.on_text_input(query);
    if !controller.query_is_searchable() {
        bail!(
            "Query '{}' is too short; at least {} characters are needed",
            query.trim(),
            min_length
        );
    }
    Ok(controller)
}

pub async fn run(context: &AppContext, query: &str, index: usize) -> Result<()> {
    let controller = prepare_controller(query, context.config.selection.clone())?;
    let mut handle = AddressInputService::new(controller, Arc::new(context.gateway()))
        .with_form_sink(Box::new(LineFormSink::for_output(context.json)))
        .spawn();

    handle
        .send(SelectionEvent::TextInput(query.to_string()))
        .await?;
    let candidates = wait_for_results(&mut handle).await?;

    for (position, candidate) in candidates.iter().enumerate() {
        tracing::info!("{}", describe_candidate(position, candidate));
    }
    let Some(candidate) = candidates.get(index).cloned() else {
        bail!(
            "Candidate {} does not exist ({} results)",
            index,
            candidates.len()
        );
    };

    let before = handle.snapshot().current;
    handle
        .send(SelectionEvent::CandidateSelected(candidate))
        .await?;
    let snapshot = wait_for_selection(&mut handle, &before).await?;

    let controller = handle.shutdown().await?;
    if context.json {
        println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    } else {
        println!("display_name={}", snapshot.current.display_name);
    }
    Ok(())
}

async fn wait_for_results(handle: &mut AddressInputHandle) -> Result<Vec<Candidate>> {
    loop {
        let snapshot = handle.changed().await?;
        match snapshot.results {
            SearchResults::NotSearched => continue,
            SearchResults::Found { candidates, .. } => return Ok(candidates),
            SearchResults::NoResults { query } => bail!("No results found for '{}'", query),
            SearchResults::Failed { query, .. } => bail!(
                "Search for '{}' failed: {}",
                query,
                snapshot.error.unwrap_or_default()
            ),
        }
    }
}

async fn wait_for_selection(
    handle: &mut AddressInputHandle,
    before: &Location,
) -> Result<SelectionSnapshot> {
    let mut snapshot = handle.snapshot();
    loop {
        if let Some(error) = &snapshot.error {
            bail!("Selection failed: {}", error);
        }
        if snapshot.state == ControllerState::Idle && &snapshot.current != before {
            return Ok(snapshot);
        }
        snapshot = handle.changed().await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_short_query_is_rejected_before_searching() {
        let err = prepare_controller("ab", SelectionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("too short"));

        let err = prepare_controller("  ab  ", SelectionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_searchable_query_seeds_display_text() {
        let controller = prepare_controller("123 Main", SelectionConfig::default()).unwrap();
        assert_eq!(controller.display_text(), "123 Main");
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_form_lines_go_to_the_configured_writer() {
        let buffer = SharedBuffer::default();
        let mut sink = LineFormSink {
            out: Box::new(buffer.clone()),
        };
        sink.set_value("latitude", "51.5034");
        sink.set_value("place_id", "");

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "latitude=51.5034\nplace_id=\n");
    }
}
