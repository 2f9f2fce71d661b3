use std::path::Path;

use anyhow::Context;
use civic_core::responses::IssueQueryResponse;
use civic_query::{IssueQuery, load_snapshot, query};

use crate::cli::GlobalFlags;
use crate::output::output;

pub fn handle(
    file: &Path,
    search: Option<&str>,
    status: Option<&str>,
    sort: Option<&str>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read snapshot {}", file.display()))?;
    let q = IssueQuery::parse(search, status, sort)?;
    let response = run(&json, &q, flags.limit)?;
    output(&response, flags.format)
}

fn run(json: &str, q: &IssueQuery, limit: Option<u32>) -> anyhow::Result<IssueQueryResponse> {
    let issues = load_snapshot(json)?;
    let mut results: Vec<_> = query(&issues, q).into_iter().cloned().collect();
    if let Some(limit) = limit {
        results.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    tracing::debug!(
        snapshot = issues.len(),
        matched = results.len(),
        "snapshot query evaluated"
    );
    Ok(IssueQueryResponse {
        search: q.search_term.clone(),
        status: q.status_filter.to_string(),
        sort: q.sort_mode.to_string(),
        total_results: u32::try_from(results.len()).unwrap_or(u32::MAX),
        results,
    })
}
