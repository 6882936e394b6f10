// Query families and the label-to-expression templater
use super::labels::LabelSet;

/// The fixed set of metric query templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFamily {
    IoInvocations,
    IoVolume,
    Throughput,
}

impl QueryFamily {
    pub fn metric(self) -> &'static str {
        match self {
            QueryFamily::IoInvocations => "io_syscalls_invocations_sum",
            QueryFamily::IoVolume => "io_syscalls_data_volume_sum",
            QueryFamily::Throughput => "throughput_sum",
        }
    }

    pub fn x_field(self) -> &'static str {
        match self {
            QueryFamily::IoInvocations | QueryFamily::IoVolume => "syscall",
            QueryFamily::Throughput => "exported_job",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            QueryFamily::IoInvocations => "Invocations",
            QueryFamily::IoVolume => "Bytes",
            QueryFamily::Throughput => "Mbps",
        }
    }

    /// Panel title suffix
    pub fn title(self) -> &'static str {
        match self {
            QueryFamily::IoInvocations => "Syscalls",
            QueryFamily::IoVolume => "Data Volume",
            QueryFamily::Throughput => "Throughput",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Table,
}

impl ResultFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultFormat::Table => "table",
        }
    }
}

/// A rendered query expression plus presentation hints
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBinding {
    pub expr: String,
    pub x_field: &'static str,
    pub axis_label: &'static str,
    pub format: ResultFormat,
    pub instant: bool,
}

pub fn build(family: QueryFamily, labels: &LabelSet) -> QueryBinding {
    QueryBinding {
        expr: format!("{}{{{}}}", family.metric(), labels.format()),
        x_field: family.x_field(),
        axis_label: family.axis_label(),
        format: ResultFormat::Table,
        instant: true,
    }
}
