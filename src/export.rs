use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::board::{BoardQuery, big_board};
use crate::dataset::{Dataset, MeasureKind, ScoutService, StatCategory};
use crate::percentile::SortedCohort;
use crate::profile::{measurement_cohort, number_or_na};
use crate::stat_hub::StatHub;

pub struct ExportReport {
    pub path: PathBuf,
    pub board_rows: usize,
    pub stat_rows: usize,
    pub measurement_rows: usize,
}

pub fn default_export_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("draft_hub_{stamp}.xlsx"))
}

/// Write the big board (as currently sorted and filtered), stat hub and measurements.
pub fn export_workbook(
    path: &Path,
    dataset: &Dataset,
    hub: &StatHub,
    query: &BoardQuery,
) -> Result<ExportReport> {
    let board_rows = board_sheet_rows(dataset, hub, query);
    let stat_rows = stat_sheet_rows(hub);
    let measurement_rows = measurement_sheet_rows(dataset);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("BigBoard")?;
        write_rows(sheet, &board_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("StatHub")?;
        write_rows(sheet, &stat_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Measurements")?;
        write_rows(sheet, &measurement_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        board_rows: board_rows.len().saturating_sub(1),
        stat_rows: stat_rows.len().saturating_sub(1),
        measurement_rows: measurement_rows.len().saturating_sub(1),
    })
}

pub fn board_sheet_rows(dataset: &Dataset, hub: &StatHub, query: &BoardQuery) -> Vec<Vec<String>> {
    let mut header = vec!["Player ID".to_string(), "Player".to_string()];
    header.extend(ScoutService::ALL.iter().map(|s| s.label().to_string()));
    header.push("Avg Rank".to_string());
    header.push("Medals".to_string());

    let mut rows = vec![header];
    for row in big_board(dataset, &hub.medals, query) {
        let mut out = vec![row.player.player_id.to_string(), row.player.name.clone()];
        out.extend(row.chips.iter().map(|chip| number_or_na(chip.rank)));
        out.push(number_or_na(row.average_rank));
        out.push(
            row.medals
                .iter()
                .map(|m| format!("{} {}", m.medal.icon(), m.category.label()))
                .collect::<Vec<_>>()
                .join(" "),
        );
        rows.push(out);
    }
    rows
}

pub fn stat_sheet_rows(hub: &StatHub) -> Vec<Vec<String>> {
    let mut header = vec!["Player ID".to_string(), "Player".to_string()];
    header.extend(StatCategory::ALL.iter().map(|c| c.label().to_string()));
    header.extend(StatCategory::ALL.iter().map(|c| format!("{} pct", c.label())));

    let mut rows = vec![header];
    for row in &hub.rows {
        let mut out = vec![row.player_id.to_string(), row.name.clone()];
        out.extend(StatCategory::ALL.iter().map(|c| number_or_na(row.value(*c))));
        out.extend(
            StatCategory::ALL
                .iter()
                .map(|c| opt_to_string(row.percentile(*c))),
        );
        rows.push(out);
    }
    rows
}

pub fn measurement_sheet_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    const KINDS: [MeasureKind; 4] = [
        MeasureKind::Wingspan,
        MeasureKind::MaxVertical,
        MeasureKind::NoStepVertical,
        MeasureKind::Sprint,
    ];
    let cohorts: Vec<SortedCohort> = KINDS
        .iter()
        .map(|k| measurement_cohort(dataset, *k))
        .collect();

    let mut header = vec!["Player ID".to_string(), "Player".to_string()];
    for kind in KINDS {
        header.push(kind.label().to_string());
        header.push(format!("{} pct", kind.label()));
    }

    let mut rows = vec![header];
    for bio in &dataset.bio {
        let Some(m) = dataset.measurement(bio.player_id) else {
            continue;
        };
        let mut out = vec![bio.player_id.to_string(), bio.name.clone()];
        for (kind, cohort) in KINDS.iter().zip(&cohorts) {
            let value = m.value(*kind);
            out.push(number_or_na(value));
            out.push(opt_to_string(value.and_then(|v| cohort.percentile(v))));
        }
        rows.push(out);
    }
    rows
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
