//! Elements of a facility's processing sequence.

use ef_units::{Connector, Process};

/// One element of the ordered sequence a facility runs.
#[derive(Debug)]
pub enum Stage {
    Process(Process),
    Connector(Connector),
}

impl Stage {
    pub fn name(&self) -> &str {
        match self {
            Stage::Process(p) => p.name(),
            Stage::Connector(c) => c.name(),
        }
    }

    /// "Process" or the connector kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Stage::Process(_) => "Process",
            Stage::Connector(c) => c.kind(),
        }
    }

    pub fn as_process(&self) -> Option<&Process> {
        match self {
            Stage::Process(p) => Some(p),
            Stage::Connector(_) => None,
        }
    }

    pub fn as_process_mut(&mut self) -> Option<&mut Process> {
        match self {
            Stage::Process(p) => Some(p),
            Stage::Connector(_) => None,
        }
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Stage::Connector(c) => Some(c),
            Stage::Process(_) => None,
        }
    }
}

impl From<Process> for Stage {
    fn from(p: Process) -> Self {
        Stage::Process(p)
    }
}

impl From<Connector> for Stage {
    fn from(c: Connector) -> Self {
        Stage::Connector(c)
    }
}
