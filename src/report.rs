use std::path::PathBuf;

use plotters::style::RGBColor;
use tracing::{debug, warn};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::measurement::{Function, Metric, Program};
use crate::plot::{self, ChartData, Series, PROCESS_COLOR, THREAD_COLOR};
use crate::table::{self, Table};

/// One output image: a metric plotted against worker count for one workload.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub index: u8,
    pub function: Function,
    pub metric: Metric,
}

pub const CHARTS: [ChartSpec; 9] = [
    ChartSpec {
        index: 1,
        function: Function::Cpu,
        metric: Metric::Memory,
    },
    ChartSpec {
        index: 2,
        function: Function::Cpu,
        metric: Metric::Cpu,
    },
    ChartSpec {
        index: 3,
        function: Function::Io,
        metric: Metric::Io,
    },
    ChartSpec {
        index: 4,
        function: Function::Io,
        metric: Metric::Memory,
    },
    ChartSpec {
        index: 5,
        function: Function::Io,
        metric: Metric::Cpu,
    },
    ChartSpec {
        index: 6,
        function: Function::Mem,
        metric: Metric::Io,
    },
    ChartSpec {
        index: 7,
        function: Function::Mem,
        metric: Metric::Memory,
    },
    ChartSpec {
        index: 8,
        function: Function::Mem,
        metric: Metric::Cpu,
    },
    ChartSpec {
        index: 9,
        function: Function::Cpu,
        metric: Metric::Io,
    },
];

fn series_color(program: Program) -> RGBColor {
    match program {
        Program::Process => PROCESS_COLOR,
        Program::Thread => THREAD_COLOR,
    }
}

impl ChartSpec {
    pub fn file_name(&self) -> String {
        format!(
            "plot{}_{}_{}_vs_count.png",
            self.index,
            self.function.slug(),
            self.metric.slug()
        )
    }

    pub fn title(&self) -> String {
        format!("{}: {} vs Count", self.function.title(), self.metric.title())
    }

    /// Process and thread series for this chart. An empty group yields an
    /// empty series rather than an error.
    pub fn chart_data(&self, table: &Table) -> ChartData {
        let series = Program::ALL
            .iter()
            .map(|&program| {
                let points: Vec<(f64, f64)> = table::select(table, program, self.function)
                    .into_iter()
                    .map(|row| (row.num_workers, self.metric.value(row)))
                    .collect();

                if points.is_empty() {
                    warn!(
                        "no {} rows for function '{}', {} will have an empty series",
                        program.label(),
                        self.function.code(),
                        self.file_name()
                    );
                }

                Series {
                    label: program.label(),
                    color: series_color(program),
                    points,
                }
            })
            .collect();

        ChartData {
            title: self.title(),
            x_desc: "Count",
            y_desc: self.metric.axis_label(),
            series,
        }
    }
}

/// Loads the results table and writes all nine charts. Returns the paths
/// written, in chart order.
pub fn run(config: &ReportConfig) -> Result<Vec<PathBuf>, ReportError> {
    let table = table::load(&config.input)?;
    if table.is_empty() {
        warn!("{} contains no rows", config.input.display());
    }

    println!("Generating individual plots...");

    let mut written = Vec::with_capacity(CHARTS.len());
    for spec in CHARTS.iter() {
        let chart = spec.chart_data(&table);
        let path = config.output_dir.join(spec.file_name());

        debug!(
            "rendering {} ({} process / {} thread points)",
            path.display(),
            chart.series[0].points.len(),
            chart.series[1].points.len()
        );
        plot::render(&chart, &path)?;

        println!("✓ Saved: {}", spec.file_name());
        written.push(path);
    }

    println!("\nAll {} plots have been saved successfully!", written.len());
    Ok(written)
}
