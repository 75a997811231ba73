use std::path::Path;

use csv::ReaderBuilder;
use thousands::Separable;
use tracing::info;

use crate::error::DataLoadError;
use crate::measurement::{Function, Measurement, Program};

/// Header names every results file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Program",
    "Function",
    "Num_Workers",
    "Memory(MB)",
    "CPU%",
    "IO(MB/s)",
];

/// The results table, in file order. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Measurement>,
}

impl Table {
    pub fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn load(path: &Path) -> Result<Table, DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| DataLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: Measurement = record.map_err(|source| DataLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    let table = Table::new(rows);
    info!(
        "loaded {} rows from {}",
        table.len().separate_with_commas(),
        path.display()
    );

    Ok(table)
}

/// Rows of one (program, function) group, in table order. May be empty.
pub fn select(table: &Table, program: Program, function: Function) -> Vec<&Measurement> {
    table
        .rows()
        .iter()
        .filter(|row| row.matches(program, function))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{scratch_dir, write_csv, SAMPLE_CSV};

    #[test]
    fn test_load_reads_all_rows() {
        let dir = scratch_dir();
        let path = write_csv(dir.path(), SAMPLE_CSV);
        let table = load(&path).unwrap();
        assert_eq!(table.len(), 8);

        let first = &table.rows()[0];
        assert_eq!(first.program, "A");
        assert_eq!(first.function, "cpu");
        assert_eq!(first.num_workers, 1.0);
        assert_eq!(first.memory_mb, 10.0);
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let csv = "Run,Program,Function,Num_Workers,Memory(MB),CPU%,IO(MB/s)\n\
                   7,A,io,2,1.5,90.0,12.25\n";
        let dir = scratch_dir();
        let path = write_csv(dir.path(), csv);
        let table = load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].io_mb_per_s, 12.25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = scratch_dir();
        let path = dir.path().join("nope.csv");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Open { .. }), "{err}");
    }

    #[test]
    fn test_load_missing_column() {
        let csv = "Program,Function,Num_Workers,Memory(MB),IO(MB/s)\nA,cpu,1,10,0\n";
        let dir = scratch_dir();
        let path = write_csv(dir.path(), csv);
        match load(&path).unwrap_err() {
            DataLoadError::MissingColumn { column, .. } => assert_eq!(column, "CPU%"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_non_numeric_cell() {
        let csv = "Program,Function,Num_Workers,Memory(MB),CPU%,IO(MB/s)\nA,cpu,one,10,5,0\n";
        let dir = scratch_dir();
        let path = write_csv(dir.path(), csv);
        let err = load(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_select_only_matching_rows() {
        let dir = scratch_dir();
        let path = write_csv(dir.path(), SAMPLE_CSV);
        let table = load(&path).unwrap();

        for program in Program::ALL {
            for function in [Function::Cpu, Function::Io, Function::Mem] {
                for row in select(&table, program, function) {
                    assert_eq!(row.program, program.code());
                    assert_eq!(row.function, function.code());
                }
            }
        }

        let thread_io = select(&table, Program::Thread, Function::Io);
        assert_eq!(thread_io.len(), 2);
    }

    #[test]
    fn test_select_keeps_file_order() {
        let csv = "Program,Function,Num_Workers,Memory(MB),CPU%,IO(MB/s)\n\
                   A,mem,3,30,0,0\n\
                   A,mem,1,10,0,0\n\
                   A,mem,2,20,0,0\n";
        let dir = scratch_dir();
        let path = write_csv(dir.path(), csv);
        let table = load(&path).unwrap();
        let workers: Vec<f64> = select(&table, Program::Process, Function::Mem)
            .iter()
            .map(|r| r.num_workers)
            .collect();
        assert_eq!(workers, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_select_empty_group() {
        let dir = scratch_dir();
        let path = write_csv(dir.path(), SAMPLE_CSV);
        let table = load(&path).unwrap();
        assert!(select(&table, Program::Thread, Function::Mem).is_empty());
    }
}
