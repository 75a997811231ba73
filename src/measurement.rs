use serde::Deserialize;

/// How the benchmark ran its workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Process,
    Thread,
}

impl Program {
    pub const ALL: [Program; 2] = [Program::Process, Program::Thread];

    /// Value of the `Program` column for this variant.
    pub fn code(self) -> &'static str {
        match self {
            Program::Process => "A",
            Program::Thread => "B",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Program::Process => "Process",
            Program::Thread => "Thread",
        }
    }
}

/// Workload exercised by each worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Cpu,
    Io,
    Mem,
}

impl Function {
    /// Value of the `Function` column for this variant.
    pub fn code(self) -> &'static str {
        match self {
            Function::Cpu => "cpu",
            Function::Io => "io",
            Function::Mem => "mem",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Function::Cpu => "CPU Worker",
            Function::Io => "IO Worker",
            Function::Mem => "Memory Worker",
        }
    }

    /// Name used in output file names.
    pub fn slug(self) -> &'static str {
        match self {
            Function::Cpu => "cpu",
            Function::Io => "io",
            Function::Mem => "memory",
        }
    }
}

/// A measured column plotted on the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Memory,
    Cpu,
    Io,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Memory => "Memory",
            Metric::Cpu => "CPU",
            Metric::Io => "IO",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Memory => "Memory (KB)",
            Metric::Cpu => "CPU Usage (%)",
            Metric::Io => "Disk IO (MiB)",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Metric::Memory => "memory",
            Metric::Cpu => "cpu",
            Metric::Io => "io",
        }
    }

    pub fn value(self, row: &Measurement) -> f64 {
        match self {
            Metric::Memory => row.memory_mb,
            Metric::Cpu => row.cpu_percent,
            Metric::Io => row.io_mb_per_s,
        }
    }
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "Num_Workers")]
    pub num_workers: f64,
    #[serde(rename = "Memory(MB)")]
    pub memory_mb: f64,
    #[serde(rename = "CPU%")]
    pub cpu_percent: f64,
    #[serde(rename = "IO(MB/s)")]
    pub io_mb_per_s: f64,
}

impl Measurement {
    pub fn matches(&self, program: Program, function: Function) -> bool {
        self.program == program.code() && self.function == function.code()
    }
}
