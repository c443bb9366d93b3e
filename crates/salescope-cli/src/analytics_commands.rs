// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use salescope_model::{with_moving_average, ChartSpec, QueryResult, Tier};
use salescope_query::{
    tier_operations, OperationDescriptor, OperationId, OperationRequest, ParamSchema, QueryError,
    SalesAnalytics, CATALOG,
};
use salescope_report::{ReportExporter, ReportManifest};
use serde_json::json;

use crate::helpers::{emit_ok, load_policy, open_store};
use crate::render::{render_bars, render_grid};
use crate::{CliError, GlobalOptions, OutputMode};

fn resolve_operation(name: &str) -> Result<&'static OperationDescriptor, CliError> {
    OperationId::from_name(name)
        .map(OperationId::descriptor)
        .ok_or_else(|| {
            CliError::usage(format!(
                "unknown operation `{name}`; run `salescope catalog` for the list"
            ))
        })
}

fn parameter_text(desc: &OperationDescriptor) -> String {
    match desc.param {
        ParamSchema::None => "-".to_string(),
        ParamSchema::RowLimit { default } => format!("limit (default {default})"),
    }
}

pub(crate) fn catalog(tier: Option<Tier>, output_mode: OutputMode) -> Result<(), CliError> {
    let entries: Vec<&OperationDescriptor> = match tier {
        Some(t) => tier_operations(t).collect(),
        None => CATALOG.iter().collect(),
    };
    if output_mode.json {
        return emit_ok(output_mode, &json!({ "operations": entries }));
    }
    let name_w = entries.iter().map(|d| d.name.len()).max().unwrap_or(0);
    for desc in entries {
        println!(
            "{:<name_w$}  {:<12}  {:<32}  {}",
            desc.name,
            desc.tier.as_str(),
            desc.title,
            parameter_text(desc)
        );
    }
    Ok(())
}

fn run_operation(
    globals: &GlobalOptions,
    desc: &OperationDescriptor,
    limit: Option<i64>,
) -> Result<QueryResult, CliError> {
    let policy = load_policy(globals)?;
    let store = open_store(globals, &policy)?;
    let request = OperationRequest {
        id: desc.id,
        limit,
    };
    store
        .with_session(|session| SalesAnalytics::for_session(session, &policy).run(&request))
        .map_err(CliError::from)
}

fn apply_moving_average(result: QueryResult, window: usize) -> Result<QueryResult, CliError> {
    let QueryResult::Table(table) = result else {
        return Err(QueryError::invalid_parameter(
            "moving average needs an operation that returns a single table",
        )
        .into());
    };
    let spec = ChartSpec::infer(&table).ok_or_else(|| {
        CliError::from(QueryError::invalid_parameter("result has no numeric column to average"))
    })?;
    let table = with_moving_average(table, &spec.value_column, window)
        .map_err(|e| CliError::from(QueryError::invalid_parameter(e.to_string())))?;
    Ok(QueryResult::Table(table))
}

pub(crate) fn query(
    globals: &GlobalOptions,
    name: &str,
    limit: Option<i64>,
    moving_average: Option<usize>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let desc = resolve_operation(name)?;
    let mut result = run_operation(globals, desc, limit)?;
    if let Some(window) = moving_average {
        result = apply_moving_average(result, window)?;
    }

    if output_mode.json {
        return emit_ok(
            output_mode,
            &json!({
                "operation": desc.name,
                "title": desc.title,
                "tier": desc.tier,
                "result": result,
            }),
        );
    }
    let bundled = !matches!(result, QueryResult::Table(_));
    for (label, table) in result.sections(desc.title) {
        if bundled {
            println!("== {label} ==");
        } else {
            println!("{label}");
        }
        print!("{}", render_grid(table));
    }
    Ok(())
}

pub(crate) fn plot(
    globals: &GlobalOptions,
    name: &str,
    limit: Option<i64>,
    width: usize,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    if width == 0 {
        return Err(QueryError::invalid_parameter("plot width must be >= 1").into());
    }
    let desc = resolve_operation(name)?;
    let result = run_operation(globals, desc, limit)?;

    let charts: Vec<_> = result
        .sections(desc.title)
        .into_iter()
        .filter_map(|(label, table)| {
            ChartSpec::infer(table).map(|spec| {
                let points = spec.points(table);
                (label, spec, points)
            })
        })
        .collect();
    if charts.is_empty() {
        return Err(QueryError::invalid_parameter(format!(
            "{} has no numeric column to plot",
            desc.name
        ))
        .into());
    }

    if output_mode.json {
        let payload: Vec<_> = charts
            .iter()
            .map(|(label, spec, points)| json!({ "label": label, "chart": spec, "points": points }))
            .collect();
        return emit_ok(output_mode, &json!({ "operation": desc.name, "charts": payload }));
    }
    for (label, spec, points) in &charts {
        println!("{label} ({})", spec.value_column);
        print!("{}", render_bars(points, width));
    }
    Ok(())
}

pub(crate) fn report(
    globals: &GlobalOptions,
    out: PathBuf,
    tier: Option<Tier>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let policy = load_policy(globals)?;
    let store = open_store(globals, &policy)?;
    let exporter = ReportExporter::new(out);
    let manifests: Vec<ReportManifest> = store.with_session(|session| {
        let analytics = SalesAnalytics::for_session(session, &policy);
        match tier {
            Some(t) => exporter.export_tier(&analytics, t).map(|m| vec![m]),
            None => exporter.export_all(&analytics),
        }
    })?;

    let reports: Vec<_> = manifests
        .iter()
        .map(|m| {
            json!({
                "tier": m.tier,
                "dir": exporter.report_dir(m.tier),
                "sheets": m.sheets.len(),
                "rows": m.total_rows(),
            })
        })
        .collect();
    emit_ok(
        output_mode,
        &json!({ "command": "report", "status": "ok", "reports": reports }),
    )
}
