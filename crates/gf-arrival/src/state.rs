//! Per-approach notification state.

/// Whether an arrival has already been announced for the current approach.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalState {
    /// No arrival announced since the last reset; the next entry fires.
    #[default]
    Armed,
    /// Arrival already announced; waiting for the observer to leave the
    /// departure band.
    Notified,
}

impl ArrivalState {
    #[inline]
    pub fn is_notified(self) -> bool {
        matches!(self, ArrivalState::Notified)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalState::Armed    => "armed",
            ArrivalState::Notified => "notified",
        }
    }
}

impl std::fmt::Display for ArrivalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
