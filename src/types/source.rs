//! Data source references for RFT/PLT plots

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::sources::{GridCase, RftReader, SummaryEnsemble, WellLogFile};

/// Identity of an externally owned payload (grid case, RFT reader, log file).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where a time series of well data originates.
///
/// Declaration order is the ordering used for set/map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSourceKind {
    Grid,
    Rft,
    SummaryRft,
    Ensemble,
    Observed,
}

impl DataSourceKind {
    /// Single-letter tag used in time step option labels.
    ///
    /// Summary case RFT data shares the "R" tag with simulated RFT data.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Observed => "O",
            Self::Rft | Self::SummaryRft => "R",
            Self::Grid => "G",
            Self::Ensemble => "E",
        }
    }

    /// Label tags in the order they appear in option labels.
    pub const TAG_ORDER: [&'static str; 4] = ["O", "R", "G", "E"];
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grid => "Grid",
            Self::Rft => "RFT",
            Self::SummaryRft => "Summary RFT",
            Self::Ensemble => "Ensemble",
            Self::Observed => "Observed",
        };
        f.write_str(name)
    }
}

/// A reference to one data source, tagged by kind.
///
/// Payloads are shared handles to collaborators owned elsewhere. Equality,
/// ordering and hashing only look at the kind, the payload variant and the
/// payload's [`SourceId`], so two handles to the same case compare equal.
#[derive(Clone)]
pub enum DataSourceRef {
    /// Dynamic cell results of a simulation grid case.
    Grid(Arc<dyn GridCase>),
    /// Simulated RFT/PLT data from a case's RFT reader.
    Rft(Arc<dyn RftReader>),
    /// Observed LAS/CSV well log file.
    ObservedLog(Arc<dyn WellLogFile>),
    /// Observed RFT data (FMU RFT / pressure-depth) exposed through a reader.
    ObservedRft(Arc<dyn RftReader>),
    /// RFT data of a single summary case.
    SummaryRft(Arc<dyn RftReader>),
    /// A summary case ensemble; its time steps are those of all members.
    Ensemble(Arc<dyn SummaryEnsemble>),
}

impl DataSourceRef {
    pub fn kind(&self) -> DataSourceKind {
        match self {
            Self::Grid(_) => DataSourceKind::Grid,
            Self::Rft(_) => DataSourceKind::Rft,
            Self::SummaryRft(_) => DataSourceKind::SummaryRft,
            Self::Ensemble(_) => DataSourceKind::Ensemble,
            Self::ObservedLog(_) | Self::ObservedRft(_) => DataSourceKind::Observed,
        }
    }

    pub fn id(&self) -> &SourceId {
        match self {
            Self::Grid(case) => case.id(),
            Self::Rft(reader) | Self::ObservedRft(reader) | Self::SummaryRft(reader) => reader.id(),
            Self::ObservedLog(file) => file.id(),
            Self::Ensemble(ensemble) => ensemble.id(),
        }
    }

    pub fn grid_case(&self) -> Option<&Arc<dyn GridCase>> {
        match self {
            Self::Grid(case) => Some(case),
            _ => None,
        }
    }

    pub fn rft_reader(&self) -> Option<&Arc<dyn RftReader>> {
        match self {
            Self::Rft(reader) | Self::ObservedRft(reader) | Self::SummaryRft(reader) => Some(reader),
            _ => None,
        }
    }

    pub fn ensemble(&self) -> Option<&Arc<dyn SummaryEnsemble>> {
        match self {
            Self::Ensemble(ensemble) => Some(ensemble),
            _ => None,
        }
    }

    pub fn well_log_file(&self) -> Option<&Arc<dyn WellLogFile>> {
        match self {
            Self::ObservedLog(file) => Some(file),
            _ => None,
        }
    }

    /// Position of the payload variant within its kind.
    fn variant_rank(&self) -> u8 {
        match self {
            Self::Grid(_)
            | Self::Rft(_)
            | Self::SummaryRft(_)
            | Self::Ensemble(_)
            | Self::ObservedLog(_) => 0,
            Self::ObservedRft(_) => 1,
        }
    }

    fn sort_key(&self) -> (DataSourceKind, u8, &SourceId) {
        (self.kind(), self.variant_rank(), self.id())
    }
}

impl PartialEq for DataSourceRef {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for DataSourceRef {}

impl PartialOrd for DataSourceRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DataSourceRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for DataSourceRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl fmt::Debug for DataSourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Grid(_) => "Grid",
            Self::Rft(_) => "Rft",
            Self::ObservedLog(_) => "ObservedLog",
            Self::ObservedRft(_) => "ObservedRft",
            Self::SummaryRft(_) => "SummaryRft",
            Self::Ensemble(_) => "Ensemble",
        };
        f.debug_tuple(variant).field(&self.id().as_str()).finish()
    }
}

impl fmt::Display for DataSourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.id())
    }
}
